//! Term database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for terms table
#[derive(Debug, Clone, FromRow)]
pub struct TermModel {
    pub id: i64,
    pub term_name: String,
    pub app_release_date: DateTime<Utc>,
    pub app_soft_deadline: DateTime<Utc>,
    pub app_hard_deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, FromRow)]
pub struct TermAggregateModel {
    pub count: i64,
    pub earliest_release: Option<DateTime<Utc>>,
    pub latest_hard_deadline: Option<DateTime<Utc>>,
}
