use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::query::Nullable;
use crate::value_objects::{ApplicationId, ApplicationStatus, ProfileId, Role, TermId};

#[derive(Debug, Clone)]
pub struct NewApplication {
    pub profile_id: ProfileId,
    pub term_id: TermId,
    pub roles_applying_for: Vec<Role>,
    pub resume_path: Option<String>,
    pub status: ApplicationStatus,
    pub comments: Option<String>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl NewApplication {
    /// An empty draft for `profile_id` in `term_id`
    pub fn draft(profile_id: ProfileId, term_id: TermId) -> Self {
        Self {
            profile_id,
            term_id,
            roles_applying_for: Vec::new(),
            resume_path: None,
            status: ApplicationStatus::Draft,
            comments: None,
            submitted_at: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationPatch {
    pub roles_applying_for: Option<Vec<Role>>,
    pub resume_path: Nullable<String>,
    pub status: Option<ApplicationStatus>,
    pub comments: Nullable<String>,
    pub submitted_at: Nullable<DateTime<Utc>>,
}

impl ApplicationPatch {
    pub fn is_empty(&self) -> bool {
        self.roles_applying_for.is_none()
            && self.resume_path.is_none()
            && self.status.is_none()
            && self.comments.is_none()
            && self.submitted_at.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ApplicationFilter {
    pub ids: Option<Vec<ApplicationId>>,
    pub profile_id: Option<ProfileId>,
    pub term_id: Option<TermId>,
    /// Any of these statuses
    pub status: Option<Vec<ApplicationStatus>>,
    /// Applying for this role
    pub role: Option<Role>,
    pub submitted: Option<bool>,
}

impl ApplicationFilter {
    pub fn for_term(term_id: TermId) -> Self {
        Self {
            term_id: Some(term_id),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApplicationOrderBy {
    #[default]
    CreatedAt,
    UpdatedAt,
    SubmittedAt,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ApplicationAggregate {
    pub count: i64,
    pub submitted: i64,
    pub first_submitted_at: Option<DateTime<Utc>>,
    pub last_submitted_at: Option<DateTime<Utc>>,
}
