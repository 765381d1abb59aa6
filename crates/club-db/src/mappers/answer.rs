//! Application answer entity <-> model mapper

use club_core::entities::ApplicationAnswer;
use club_core::inputs::NewApplicationAnswer;
use club_core::value_objects::{AnswerId, ApplicationId, QuestionId};
use sqlx::query_builder::Separated;
use sqlx::Postgres;

use super::InsertRow;
use crate::models::ApplicationAnswerModel;

/// Convert ApplicationAnswerModel to ApplicationAnswer entity
impl From<ApplicationAnswerModel> for ApplicationAnswer {
    fn from(model: ApplicationAnswerModel) -> Self {
        ApplicationAnswer {
            id: AnswerId::new(model.id),
            application_id: ApplicationId::new(model.application_id),
            question_id: QuestionId::new(model.question_id),
            answer_text: model.answer_text,
            answer_option: model.answer_option,
            answer_options: model.answer_options,
            answer_file: model.answer_file,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl InsertRow for NewApplicationAnswer {
    const COLUMNS: &'static str =
        "(application_id, question_id, answer_text, answer_option, answer_options, answer_file)";

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.application_id.into_inner())
            .push_bind(self.question_id.into_inner())
            .push_bind(self.answer_text.clone())
            .push_bind(self.answer_option.clone())
            .push_bind(self.answer_options.clone())
            .push_bind(self.answer_file.clone());
    }
}
