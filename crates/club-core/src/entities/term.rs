//! Term entity - an admission cycle with its own deadlines and question set

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::TermId;

/// Term entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub id: TermId,
    /// Globally unique, e.g. "Fall 2025"
    pub term_name: String,
    pub app_release_date: DateTime<Utc>,
    pub app_soft_deadline: DateTime<Utc>,
    pub app_hard_deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Term {
    /// Applications are accepted from release until the hard deadline (inclusive)
    pub fn is_open(&self, now: DateTime<Utc>) -> bool {
        self.app_release_date <= now && now <= self.app_hard_deadline
    }

    /// Past the advertised deadline but possibly still open
    pub fn is_past_soft_deadline(&self, now: DateTime<Utc>) -> bool {
        now > self.app_soft_deadline
    }

    pub fn is_released(&self, now: DateTime<Utc>) -> bool {
        self.app_release_date <= now
    }

    pub fn validate_deadlines(&self) -> Result<(), DomainError> {
        validate_term_deadlines(
            self.app_release_date,
            self.app_soft_deadline,
            self.app_hard_deadline,
        )
    }
}

/// release <= soft deadline <= hard deadline
pub fn validate_term_deadlines(
    release: DateTime<Utc>,
    soft: DateTime<Utc>,
    hard: DateTime<Utc>,
) -> Result<(), DomainError> {
    if release > soft {
        return Err(DomainError::ValidationError(
            "app_release_date must not be after app_soft_deadline".to_string(),
        ));
    }
    if soft > hard {
        return Err(DomainError::ValidationError(
            "app_soft_deadline must not be after app_hard_deadline".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn term_around(now: DateTime<Utc>) -> Term {
        Term {
            id: TermId::new(1),
            term_name: "Fall 2025".to_string(),
            app_release_date: now - Duration::days(7),
            app_soft_deadline: now + Duration::days(7),
            app_hard_deadline: now + Duration::days(10),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_is_open_window() {
        let now = Utc::now();
        let term = term_around(now);
        assert!(term.is_open(now));
        assert!(!term.is_open(now - Duration::days(8)));
        assert!(term.is_open(now + Duration::days(9)));
        assert!(!term.is_open(now + Duration::days(11)));
    }

    #[test]
    fn test_soft_deadline() {
        let now = Utc::now();
        let term = term_around(now);
        assert!(!term.is_past_soft_deadline(now));
        assert!(term.is_past_soft_deadline(now + Duration::days(8)));
        assert!(term.is_open(now + Duration::days(8)));
    }

    #[test]
    fn test_validate_deadlines() {
        let now = Utc::now();
        assert!(term_around(now).validate_deadlines().is_ok());

        let err = validate_term_deadlines(now, now - Duration::hours(1), now).unwrap_err();
        assert!(err.is_validation());

        let err = validate_term_deadlines(now, now, now - Duration::hours(1)).unwrap_err();
        assert!(err.is_validation());
    }
}
