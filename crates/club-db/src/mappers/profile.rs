//! Profile entity <-> model mapper

use club_core::entities::Profile;
use club_core::error::DomainError;
use club_core::inputs::{MembershipStats, NewProfile};
use club_core::value_objects::ProfileId;
use sqlx::query_builder::Separated;
use sqlx::Postgres;

use super::{parse_column, InsertRow};
use crate::models::{MembershipStatsModel, ProfileModel};

/// Convert ProfileModel to Profile entity
impl TryFrom<ProfileModel> for Profile {
    type Error = DomainError;

    fn try_from(model: ProfileModel) -> Result<Self, Self::Error> {
        Ok(Profile {
            id: ProfileId::new(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            user_status: parse_column(&model.user_status)?,
            has_paid: model.has_paid,
            wat_iam: model.wat_iam,
            faculty: parse_column(&model.faculty)?,
            term: model.term,
            heard_from_where: model.heard_from_where,
            payment_method: parse_column(&model.payment_method)?,
            payment_location: model.payment_location,
            verifier: model.verifier,
            member_ideas: model.member_ideas,
            is_math_soc_member: model.is_math_soc_member,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl From<MembershipStatsModel> for MembershipStats {
    fn from(model: MembershipStatsModel) -> Self {
        MembershipStats {
            total_users: model.total_users,
            paid_users: model.paid_users,
            math_soc_members: model.math_soc_members,
        }
    }
}

impl InsertRow for NewProfile {
    const COLUMNS: &'static str = "(id, first_name, last_name, user_status, has_paid, wat_iam, \
        faculty, term, heard_from_where, payment_method, payment_location, verifier, \
        member_ideas, is_math_soc_member)";

    fn bind_values<'args>(&self, row: &mut Separated<'_, 'args, Postgres, &'static str>) {
        row.push_bind(self.id.into_inner())
            .push_bind(self.first_name.clone())
            .push_bind(self.last_name.clone())
            .push_bind(self.user_status.as_str())
            .push_bind(self.has_paid)
            .push_bind(self.wat_iam.clone())
            .push_bind(self.faculty.as_str())
            .push_bind(self.term.clone())
            .push_bind(self.heard_from_where.clone())
            .push_bind(self.payment_method.as_str())
            .push_bind(self.payment_location.clone())
            .push_bind(self.verifier.clone())
            .push_bind(self.member_ideas.clone())
            .push_bind(self.is_math_soc_member);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use club_core::value_objects::{Faculty, UserStatus};

    fn model() -> ProfileModel {
        ProfileModel {
            id: uuid::Uuid::new_v4(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            user_status: "exec".to_string(),
            has_paid: true,
            wat_iam: None,
            faculty: "engineering".to_string(),
            term: "3A".to_string(),
            heard_from_where: String::new(),
            payment_method: "math_soc".to_string(),
            payment_location: Some("MC Comfy".to_string()),
            verifier: Some("treasurer".to_string()),
            member_ideas: None,
            is_math_soc_member: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_model_to_entity() {
        let profile = Profile::try_from(model()).unwrap();
        assert_eq!(profile.user_status, UserStatus::Exec);
        assert_eq!(profile.faculty, Faculty::Engineering);
        assert!(profile.is_admin());
    }

    #[test]
    fn test_corrupt_enum_rejected() {
        let mut bad = model();
        bad.user_status = "owner".to_string();
        assert!(Profile::try_from(bad).is_err());
    }
}
