//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{
    AnswerId, ApplicationId, ApplicationStatus, AttendanceId, EventId, ProfileId, QuestionId,
    TermId,
};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Profile not found: {0}")]
    ProfileNotFound(ProfileId),

    #[error("Term not found: {0}")]
    TermNotFound(TermId),

    #[error("Application not found: {0}")]
    ApplicationNotFound(ApplicationId),

    #[error("Question not found: {0}")]
    QuestionNotFound(QuestionId),

    #[error("Answer not found: {0}")]
    AnswerNotFound(AnswerId),

    #[error("Event not found: {0}")]
    EventNotFound(EventId),

    #[error("Attendance not found: {0}")]
    AttendanceNotFound(AttendanceId),

    /// A lookup by filter or compound key matched nothing
    #[error("No {0} matched the query")]
    NoMatch(&'static str),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid answer for question '{question_id}': {reason}")]
    InvalidAnswer { question_id: String, reason: String },

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Admin access required")]
    AdminRequired,

    #[error("Not the owner of this resource")]
    NotOwner,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Profile already exists")]
    ProfileAlreadyExists,

    #[error("Term name already in use: {0}")]
    TermNameTaken(String),

    #[error("Already applied for this term")]
    AlreadyApplied,

    #[error("Question slug already used in this term: {0}")]
    DuplicateQuestion(String),

    #[error("Question already answered in this application")]
    DuplicateAnswer,

    #[error("Already registered for this event")]
    AlreadyRegistered,

    /// A row is still referenced by dependents that are not cascaded
    #[error("Still referenced: {0}")]
    ReferenceViolation(String),

    // =========================================================================
    // Business Rule Violations
    // =========================================================================
    #[error("Applications for this term are closed")]
    TermClosed,

    #[error("Application can no longer be edited")]
    ApplicationNotEditable,

    #[error("Cannot move application from {from} to {to}")]
    InvalidStatusTransition {
        from: ApplicationStatus,
        to: ApplicationStatus,
    },

    #[error("Required questions unanswered: {}", .0.join(", "))]
    MissingRequiredAnswers(Vec<String>),

    #[error("Check-in is not open for this event")]
    CheckInClosed,

    #[error("Membership fee must be paid first")]
    PaymentRequired,

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::ProfileNotFound(_) => "UNKNOWN_PROFILE",
            Self::TermNotFound(_) => "UNKNOWN_TERM",
            Self::ApplicationNotFound(_) => "UNKNOWN_APPLICATION",
            Self::QuestionNotFound(_) => "UNKNOWN_QUESTION",
            Self::AnswerNotFound(_) => "UNKNOWN_ANSWER",
            Self::EventNotFound(_) => "UNKNOWN_EVENT",
            Self::AttendanceNotFound(_) => "UNKNOWN_ATTENDANCE",
            Self::NoMatch(_) => "NOT_FOUND",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidAnswer { .. } => "INVALID_ANSWER",

            // Authorization
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::NotOwner => "NOT_OWNER",

            // Conflict
            Self::ProfileAlreadyExists => "PROFILE_ALREADY_EXISTS",
            Self::TermNameTaken(_) => "TERM_NAME_TAKEN",
            Self::AlreadyApplied => "ALREADY_APPLIED",
            Self::DuplicateQuestion(_) => "DUPLICATE_QUESTION",
            Self::DuplicateAnswer => "DUPLICATE_ANSWER",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::ReferenceViolation(_) => "REFERENCE_VIOLATION",

            // Business Rules
            Self::TermClosed => "TERM_CLOSED",
            Self::ApplicationNotEditable => "APPLICATION_NOT_EDITABLE",
            Self::InvalidStatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            Self::MissingRequiredAnswers(_) => "MISSING_REQUIRED_ANSWERS",
            Self::CheckInClosed => "CHECK_IN_CLOSED",
            Self::PaymentRequired => "PAYMENT_REQUIRED",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound(_)
                | Self::TermNotFound(_)
                | Self::ApplicationNotFound(_)
                | Self::QuestionNotFound(_)
                | Self::AnswerNotFound(_)
                | Self::EventNotFound(_)
                | Self::AttendanceNotFound(_)
                | Self::NoMatch(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidAnswer { .. })
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::AdminRequired | Self::NotOwner)
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::ProfileAlreadyExists
                | Self::TermNameTaken(_)
                | Self::AlreadyApplied
                | Self::DuplicateQuestion(_)
                | Self::DuplicateAnswer
                | Self::AlreadyRegistered
                | Self::ReferenceViolation(_)
        )
    }

    /// Check if this is a business rule violation
    pub fn is_business_rule(&self) -> bool {
        matches!(
            self,
            Self::TermClosed
                | Self::ApplicationNotEditable
                | Self::InvalidStatusTransition { .. }
                | Self::MissingRequiredAnswers(_)
                | Self::CheckInClosed
                | Self::PaymentRequired
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = DomainError::TermNotFound(TermId::new(1));
        assert_eq!(err.code(), "UNKNOWN_TERM");

        let err = DomainError::DuplicateQuestion("why_join".to_string());
        assert_eq!(err.code(), "DUPLICATE_QUESTION");
    }

    #[test]
    fn test_is_not_found() {
        assert!(DomainError::EventNotFound(EventId::new(1)).is_not_found());
        assert!(DomainError::NoMatch("term").is_not_found());
        assert!(!DomainError::AlreadyApplied.is_not_found());
    }

    #[test]
    fn test_categories() {
        assert!(DomainError::AdminRequired.is_authorization());
        assert!(DomainError::AlreadyRegistered.is_conflict());
        assert!(DomainError::ReferenceViolation("question".to_string()).is_conflict());
        assert!(DomainError::CheckInClosed.is_business_rule());
        assert!(!DomainError::CheckInClosed.is_conflict());
    }

    #[test]
    fn test_error_display() {
        let err = DomainError::ApplicationNotFound(ApplicationId::new(123));
        assert_eq!(err.to_string(), "Application not found: 123");

        let err = DomainError::InvalidStatusTransition {
            from: ApplicationStatus::Draft,
            to: ApplicationStatus::Accepted,
        };
        assert_eq!(err.to_string(), "Cannot move application from draft to accepted");

        let err = DomainError::MissingRequiredAnswers(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Required questions unanswered: a, b");
    }
}
