use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::query::Nullable;
use crate::value_objects::{Faculty, PaymentMethod, ProfileId, UserStatus};

/// Insert model for a profile; `id` comes from the identity provider
#[derive(Debug, Clone)]
pub struct NewProfile {
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub user_status: UserStatus,
    pub has_paid: bool,
    pub wat_iam: Option<String>,
    pub faculty: Faculty,
    pub term: String,
    pub heard_from_where: String,
    pub payment_method: PaymentMethod,
    pub payment_location: Option<String>,
    pub verifier: Option<String>,
    pub member_ideas: Option<String>,
    pub is_math_soc_member: bool,
}

impl NewProfile {
    /// A fresh unpaid member; MathSoc membership follows the faculty
    pub fn member(
        id: ProfileId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        faculty: Faculty,
        term: impl Into<String>,
        payment_method: PaymentMethod,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            user_status: UserStatus::Member,
            has_paid: false,
            wat_iam: None,
            faculty,
            term: term.into(),
            heard_from_where: String::new(),
            payment_method,
            payment_location: None,
            verifier: None,
            member_ideas: None,
            is_math_soc_member: faculty.is_math(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub user_status: Option<UserStatus>,
    pub has_paid: Option<bool>,
    pub wat_iam: Nullable<String>,
    pub faculty: Option<Faculty>,
    pub term: Option<String>,
    pub heard_from_where: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub payment_location: Nullable<String>,
    pub verifier: Nullable<String>,
    pub member_ideas: Nullable<String>,
    pub is_math_soc_member: Option<bool>,
}

impl ProfilePatch {
    /// Keep `is_math_soc_member` in step with a faculty change
    pub fn with_derived_math_soc(mut self) -> Self {
        if let Some(faculty) = self.faculty {
            self.is_math_soc_member = Some(faculty.is_math());
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.user_status.is_none()
            && self.has_paid.is_none()
            && self.wat_iam.is_none()
            && self.faculty.is_none()
            && self.term.is_none()
            && self.heard_from_where.is_none()
            && self.payment_method.is_none()
            && self.payment_location.is_none()
            && self.verifier.is_none()
            && self.member_ideas.is_none()
            && self.is_math_soc_member.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfileFilter {
    pub ids: Option<Vec<ProfileId>>,
    pub user_status: Option<UserStatus>,
    pub has_paid: Option<bool>,
    pub faculty: Option<Faculty>,
    pub is_math_soc_member: Option<bool>,
    pub term: Option<String>,
    /// Case-insensitive match on first name, last name or WatIAM
    pub search: Option<String>,
    pub created_after: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProfileOrderBy {
    #[default]
    CreatedAt,
    FirstName,
    LastName,
    UpdatedAt,
}

/// Counts shown on the admin memberships dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MembershipStats {
    pub total_users: i64,
    pub paid_users: i64,
    pub math_soc_members: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_derives_math_soc() {
        let p = NewProfile::member(
            ProfileId::new_v4(),
            "Ada",
            "Lovelace",
            Faculty::Math,
            "1A",
            PaymentMethod::Cash,
        );
        assert!(p.is_math_soc_member);
        assert!(!p.has_paid);
        assert_eq!(p.user_status, UserStatus::Member);
    }

    #[test]
    fn test_patch_derives_math_soc() {
        let patch = ProfilePatch {
            faculty: Some(Faculty::Arts),
            ..Default::default()
        }
        .with_derived_math_soc();
        assert_eq!(patch.is_math_soc_member, Some(false));

        assert!(ProfilePatch::default().with_derived_math_soc().is_empty());
    }
}
