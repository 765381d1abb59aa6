use crate::query::Nullable;
use crate::value_objects::{QuestionType, Role, TermId};

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub term_id: TermId,
    pub question_id: String,
    pub role: Role,
    pub question_type: QuestionType,
    pub question: String,
    pub is_required: bool,
    pub order_num: i32,
    pub max_length: Option<i32>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct QuestionPatch {
    pub question_id: Option<String>,
    pub role: Option<Role>,
    pub question_type: Option<QuestionType>,
    pub question: Option<String>,
    pub is_required: Option<bool>,
    pub order_num: Option<i32>,
    pub max_length: Nullable<i32>,
    pub placeholder: Nullable<String>,
    pub help_text: Nullable<String>,
}

impl QuestionPatch {
    pub fn is_empty(&self) -> bool {
        self.question_id.is_none()
            && self.role.is_none()
            && self.question_type.is_none()
            && self.question.is_none()
            && self.is_required.is_none()
            && self.order_num.is_none()
            && self.max_length.is_none()
            && self.placeholder.is_none()
            && self.help_text.is_none()
    }
}

impl From<&NewQuestion> for QuestionPatch {
    fn from(q: &NewQuestion) -> Self {
        Self {
            question_id: None,
            role: Some(q.role),
            question_type: Some(q.question_type),
            question: Some(q.question.clone()),
            is_required: Some(q.is_required),
            order_num: Some(q.order_num),
            max_length: Some(q.max_length),
            placeholder: Some(q.placeholder.clone()),
            help_text: Some(q.help_text.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct QuestionFilter {
    pub term_id: Option<TermId>,
    /// Any of these roles
    pub roles: Option<Vec<Role>>,
    pub question_type: Option<QuestionType>,
    pub is_required: Option<bool>,
}

impl QuestionFilter {
    pub fn for_term(term_id: TermId) -> Self {
        Self {
            term_id: Some(term_id),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuestionOrderBy {
    #[default]
    OrderNum,
    Id,
}
