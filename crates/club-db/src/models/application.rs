//! Application database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for applications table
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationModel {
    pub id: i64,
    pub profile_id: Uuid,
    pub term_id: i64,
    pub roles_applying_for: Vec<String>,
    pub resume_path: Option<String>,
    pub status: String,
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl ApplicationModel {
    #[inline]
    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }
}
