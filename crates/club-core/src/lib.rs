//! # club-core
//!
//! Domain layer containing entities, value objects, query inputs and repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod inputs;
pub mod query;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Application, ApplicationAnswer, Event, EventAttendance, EventWindow, Profile, Question, Term,
};
pub use error::DomainError;
pub use query::{FindMany, GroupCount, Nullable, Page, SortOrder};
pub use traits::{
    ApplicationAnswerRepository, ApplicationRepository, EventAttendanceRepository,
    EventRepository, ProfileRepository, QuestionRepository, RepoResult, TermRepository,
};
pub use value_objects::{
    AnswerId, ApplicationId, ApplicationStatus, AttendanceId, EventId, Faculty, ImageId,
    PaymentMethod, ProfileId, QuestionId, QuestionType, Role, TermId, UserStatus,
};
