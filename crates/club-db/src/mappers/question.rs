//! Question entity <-> model mapper

use club_core::entities::Question;
use club_core::error::DomainError;
use club_core::inputs::NewQuestion;
use club_core::value_objects::{QuestionId, TermId};
use sqlx::query_builder::Separated;
use sqlx::Postgres;

use super::{parse_column, InsertRow};
use crate::models::QuestionModel;

/// Convert QuestionModel to Question entity
impl TryFrom<QuestionModel> for Question {
    type Error = DomainError;

    fn try_from(model: QuestionModel) -> Result<Self, Self::Error> {
        Ok(Question {
            id: QuestionId::new(model.id),
            term_id: TermId::new(model.term_id),
            question_id: model.question_id,
            role: parse_column(&model.role)?,
            question_type: parse_column(&model.question_type)?,
            question: model.question,
            is_required: model.is_required,
            order_num: model.order_num,
            max_length: model.max_length,
            placeholder: model.placeholder,
            help_text: model.help_text,
        })
    }
}

impl InsertRow for NewQuestion {
    const COLUMNS: &'static str = "(term_id, question_id, role, \"type\", question, is_required, \
        order_num, max_length, placeholder, help_text)";

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.term_id.into_inner())
            .push_bind(self.question_id.clone())
            .push_bind(self.role.as_str())
            .push_bind(self.question_type.as_str())
            .push_bind(self.question.clone())
            .push_bind(self.is_required)
            .push_bind(self.order_num)
            .push_bind(self.max_length)
            .push_bind(self.placeholder.clone())
            .push_bind(self.help_text.clone());
    }
}
