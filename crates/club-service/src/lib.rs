//! # club-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    ApplicationService, EventService, ProfileService, QuestionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult, TermService,
};
