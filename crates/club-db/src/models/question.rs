//! Question database model

use sqlx::FromRow;

/// Database model for questions table
#[derive(Debug, Clone, FromRow)]
pub struct QuestionModel {
    pub id: i64,
    pub term_id: i64,
    pub question_id: String,
    pub role: String,
    #[sqlx(rename = "type")]
    pub question_type: String,
    pub question: String,
    pub is_required: bool,
    pub order_num: i32,
    pub max_length: Option<i32>,
    pub placeholder: Option<String>,
    pub help_text: Option<String>,
}
