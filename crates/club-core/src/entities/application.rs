//! Application entity - a profile's submission for a term

use chrono::{DateTime, Utc};

use crate::error::DomainError;
use crate::value_objects::{ApplicationId, ApplicationStatus, ProfileId, Role, TermId};

/// Application entity (unique per profile + term)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    pub id: ApplicationId,
    pub profile_id: ProfileId,
    pub term_id: TermId,
    pub roles_applying_for: Vec<Role>,
    pub resume_path: Option<String>,
    pub status: ApplicationStatus,
    /// Reviewer notes
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
}

impl Application {
    #[inline]
    pub fn is_submitted(&self) -> bool {
        self.submitted_at.is_some()
    }

    #[inline]
    pub fn is_editable(&self) -> bool {
        self.status.is_editable()
    }

    pub fn is_applying_for(&self, role: Role) -> bool {
        self.roles_applying_for.contains(&role)
    }

    /// Check a review decision against the status machine
    pub fn ensure_transition(&self, next: ApplicationStatus) -> Result<(), DomainError> {
        if self.status.can_transition_to(next) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.status,
                to: next,
            })
        }
    }
}

/// Remove duplicates while keeping the applicant's ordering
pub fn dedup_roles(roles: &[Role]) -> Vec<Role> {
    let mut out = Vec::with_capacity(roles.len());
    for role in roles {
        if !out.contains(role) {
            out.push(*role);
        }
    }
    out
}
