//! Application answer database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for application_answers table
#[derive(Debug, Clone, FromRow)]
pub struct ApplicationAnswerModel {
    pub id: i64,
    pub application_id: i64,
    pub question_id: i64,
    pub answer_text: Option<String>,
    pub answer_option: Option<String>,
    pub answer_options: Vec<String>,
    pub answer_file: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
