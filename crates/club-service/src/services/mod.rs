//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod application;
pub mod context;
pub mod error;
pub mod event;
pub mod profile;
pub mod question;
pub mod term;

// Re-export all services for convenience
pub use application::ApplicationService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use event::EventService;
pub use profile::ProfileService;
pub use question::QuestionService;
pub use term::TermService;
