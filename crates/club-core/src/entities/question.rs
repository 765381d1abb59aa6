//! Question entity - a term-scoped custom form field

use crate::value_objects::{QuestionId, QuestionType, Role, TermId};

/// Question entity (unique per term + slug)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub id: QuestionId,
    pub term_id: TermId,
    /// Human-assigned slug, distinct from the surrogate key
    pub question_id: String,
    pub role: Role,
    pub question_type: QuestionType,
    pub question: String,
    pub is_required: bool,
    /// Display ordering within a term
    pub order_num: i32,
    pub max_length: Option<i32>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
}

impl Question {
    /// Whether an applicant applying for `roles` is shown this question
    ///
    /// General and supplementary questions are shown to everyone.
    pub fn applies_to(&self, roles: &[Role]) -> bool {
        self.role.is_shared() || roles.contains(&self.role)
    }

    /// Required questions an applicant must answer before submitting
    pub fn is_required_for(&self, roles: &[Role]) -> bool {
        self.is_required && self.applies_to(roles)
    }
}

/// Question slugs are lowercase ascii, digits, `_` and `-`
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= 64
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
