//! Application entity <-> model mapper

use club_core::entities::Application;
use club_core::error::DomainError;
use club_core::inputs::NewApplication;
use club_core::value_objects::{ApplicationId, ProfileId, TermId};
use sqlx::query_builder::Separated;
use sqlx::Postgres;

use super::{parse_column, parse_roles, roles_to_text, InsertRow};
use crate::models::ApplicationModel;

/// Convert ApplicationModel to Application entity
impl TryFrom<ApplicationModel> for Application {
    type Error = DomainError;

    fn try_from(model: ApplicationModel) -> Result<Self, Self::Error> {
        Ok(Application {
            id: ApplicationId::new(model.id),
            profile_id: ProfileId::new(model.profile_id),
            term_id: TermId::new(model.term_id),
            roles_applying_for: parse_roles(&model.roles_applying_for)?,
            resume_path: model.resume_path,
            status: parse_column(&model.status)?,
            comments: model.comments,
            created_at: model.created_at,
            updated_at: model.updated_at,
            submitted_at: model.submitted_at,
        })
    }
}

impl InsertRow for NewApplication {
    const COLUMNS: &'static str =
        "(profile_id, term_id, roles_applying_for, resume_path, status, comments, submitted_at)";

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.profile_id.into_inner())
            .push_bind(self.term_id.into_inner())
            .push_bind(roles_to_text(&self.roles_applying_for))
            .push_bind(self.resume_path.clone())
            .push_bind(self.status.as_str())
            .push_bind(self.comments.clone())
            .push_bind(self.submitted_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use club_core::value_objects::{ApplicationStatus, Role};

    #[test]
    fn test_model_to_entity() {
        let model = ApplicationModel {
            id: 7,
            profile_id: uuid::Uuid::new_v4(),
            term_id: 2,
            roles_applying_for: vec!["events_exec".to_string(), "design_exec".to_string()],
            resume_path: Some("resumes/a.pdf".to_string()),
            status: "under_review".to_string(),
            comments: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            submitted_at: Some(Utc::now()),
        };
        assert!(model.is_submitted());

        let app = Application::try_from(model).unwrap();
        assert_eq!(app.id, ApplicationId::new(7));
        assert_eq!(app.status, ApplicationStatus::UnderReview);
        assert_eq!(app.roles_applying_for, vec![Role::EventsExec, Role::DesignExec]);
    }
}
