//! Profile entity - a person's membership record
//!
//! Distinct from the authentication identity: the id is the identity provider's
//! user id, everything else is club metadata.

use chrono::{DateTime, Utc};

use crate::value_objects::{Faculty, PaymentMethod, ProfileId, UserStatus};

/// Profile entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub user_status: UserStatus,
    pub has_paid: bool,
    /// Institutional identifier (WatIAM)
    pub wat_iam: Option<String>,
    pub faculty: Faculty,
    /// Academic term the member is in, e.g. "2B"
    pub term: String,
    pub heard_from_where: String,
    pub payment_method: PaymentMethod,
    pub payment_location: Option<String>,
    /// Who confirmed the payment
    pub verifier: Option<String>,
    pub member_ideas: Option<String>,
    pub is_math_soc_member: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Admins and execs can manage memberships, terms, and events
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.user_status.is_privileged()
    }

    /// A profile is complete once the member has filled in their name
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty() && !self.last_name.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Profile {
        let now = Utc::now();
        Profile {
            id: ProfileId::new_v4(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            user_status: UserStatus::Member,
            has_paid: false,
            wat_iam: Some("alovelac".to_string()),
            faculty: Faculty::Math,
            term: "2B".to_string(),
            heard_from_where: "friends".to_string(),
            payment_method: PaymentMethod::Online,
            payment_location: None,
            verifier: None,
            member_ideas: None,
            is_math_soc_member: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample().full_name(), "Ada Lovelace");
    }

    #[test]
    fn test_is_admin() {
        let mut profile = sample();
        assert!(!profile.is_admin());
        profile.user_status = UserStatus::Exec;
        assert!(profile.is_admin());
    }

    #[test]
    fn test_is_complete() {
        let mut profile = sample();
        assert!(profile.is_complete());
        profile.last_name = "   ".to_string();
        assert!(!profile.is_complete());
    }
}
