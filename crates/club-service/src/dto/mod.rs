//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

// Re-export commonly used request types
pub use requests::{
    page_of, AdminUpdateMemberRequest, AnswerInput, CreateEventRequest, CreateProfileRequest,
    CreateQuestionRequest, CreateTermRequest, EventTimeframe, ListApplicationsQuery,
    ListEventsQuery, ListMembersQuery, ListQuestionsQuery, MarkPaidRequest, QuestionPosition,
    ReorderQuestionsRequest, SaveAnswersRequest, SetStatusRequest, StartApplicationRequest,
    UpdateApplicationRequest, UpdateEventRequest, UpdateProfileRequest, UpdateQuestionRequest,
    UpdateTermRequest,
};

// Re-export commonly used response types
pub use responses::{
    AnswerResponse, ApplicationResponse, ApplicationReviewResponse, ApplicationStatsResponse,
    AttendanceResponse, AttendanceSummaryResponse, EventResponse, HealthChecks, HealthResponse,
    MembershipStatsResponse, PaginatedResponse, PaginationMeta, ProfileCompletionResponse,
    ProfileResponse, QuestionResponse, ReadinessResponse, TermResponse,
};
