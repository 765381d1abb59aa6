use crate::entities::AnswerSlots;
use crate::query::Nullable;
use crate::value_objects::{ApplicationId, QuestionId};

#[derive(Debug, Clone)]
pub struct NewApplicationAnswer {
    pub application_id: ApplicationId,
    pub question_id: QuestionId,
    pub answer_text: Option<String>,
    pub answer_option: Option<String>,
    pub answer_options: Vec<String>,
    pub answer_file: Option<String>,
}

impl NewApplicationAnswer {
    pub fn slots(&self) -> AnswerSlots<'_> {
        AnswerSlots {
            text: self.answer_text.as_deref(),
            option: self.answer_option.as_deref(),
            options: &self.answer_options,
            file: self.answer_file.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationAnswerPatch {
    pub answer_text: Nullable<String>,
    pub answer_option: Nullable<String>,
    pub answer_options: Option<Vec<String>>,
    pub answer_file: Nullable<String>,
}

impl ApplicationAnswerPatch {
    pub fn is_empty(&self) -> bool {
        self.answer_text.is_none()
            && self.answer_option.is_none()
            && self.answer_options.is_none()
            && self.answer_file.is_none()
    }
}

/// Replaces every slot, so a changed answer type leaves no stale value behind
impl From<&NewApplicationAnswer> for ApplicationAnswerPatch {
    fn from(a: &NewApplicationAnswer) -> Self {
        Self {
            answer_text: Some(a.answer_text.clone()),
            answer_option: Some(a.answer_option.clone()),
            answer_options: Some(a.answer_options.clone()),
            answer_file: Some(a.answer_file.clone()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationAnswerFilter {
    pub application_id: Option<ApplicationId>,
    pub question_id: Option<QuestionId>,
    pub question_ids: Option<Vec<QuestionId>>,
}

impl ApplicationAnswerFilter {
    pub fn for_application(application_id: ApplicationId) -> Self {
        Self {
            application_id: Some(application_id),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AnswerOrderBy {
    #[default]
    Id,
    UpdatedAt,
}
