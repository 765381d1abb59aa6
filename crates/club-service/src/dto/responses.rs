//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Bigint IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use club_core::inputs::{ApplicationAggregate, AttendanceSummary, MembershipStats};
use club_core::{
    AnswerId, ApplicationId, ApplicationStatus, AttendanceId, EventId, Faculty, GroupCount,
    ImageId, Page, PaymentMethod, ProfileId, QuestionId, QuestionType, Role, TermId, UserStatus,
};
use serde::Serialize;

// ============================================================================
// Common Response Types
// ============================================================================

/// Paginated response with offset pagination
#[derive(Debug, Serialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, total: i64, page: Page) -> Self {
        let has_more = page.skip + (data.len() as i64) < total;
        Self {
            data,
            pagination: PaginationMeta {
                total,
                take: page.take,
                skip: page.skip,
                has_more,
            },
        }
    }
}

/// Pagination metadata
#[derive(Debug, Serialize)]
pub struct PaginationMeta {
    /// Rows matching the filter, ignoring paging
    pub total: i64,
    pub take: i64,
    pub skip: i64,
    /// Whether more results exist
    pub has_more: bool,
}

// ============================================================================
// Profile Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: ProfileId,
    pub first_name: String,
    pub last_name: String,
    pub user_status: UserStatus,
    pub has_paid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wat_iam: Option<String>,
    pub faculty: Faculty,
    pub term: String,
    pub heard_from_where: String,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_ideas: Option<String>,
    pub is_math_soc_member: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Membership counts for the admin dashboard
pub type MembershipStatsResponse = MembershipStats;

/// Whether the signed-in user still has to onboard
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ProfileCompletionResponse {
    pub complete: bool,
}

// ============================================================================
// Term Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct TermResponse {
    pub id: TermId,
    pub term_name: String,
    pub app_release_date: DateTime<Utc>,
    pub app_soft_deadline: DateTime<Utc>,
    pub app_hard_deadline: DateTime<Utc>,
    /// Accepting applications at response time
    pub is_open: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Question Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: QuestionId,
    pub term_id: TermId,
    pub question_id: String,
    pub role: Role,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub question: String,
    pub is_required: bool,
    pub order_num: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

// ============================================================================
// Application Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub id: AnswerId,
    pub question_id: QuestionId,
    pub answer_text: Option<String>,
    pub answer_option: Option<String>,
    pub answer_options: Vec<String>,
    pub answer_file: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationResponse {
    pub id: ApplicationId,
    pub profile_id: ProfileId,
    pub term_id: TermId,
    pub roles_applying_for: Vec<Role>,
    pub resume_path: Option<String>,
    pub status: ApplicationStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub submitted_at: Option<DateTime<Utc>>,
    /// Present on the applicant's own view
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answers: Option<Vec<AnswerResponse>>,
}

/// Admin view of one application: the form, its answers and who applied
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationReviewResponse {
    #[serde(flatten)]
    pub application: ApplicationResponse,
    pub applicant: ProfileResponse,
}

/// Admin overview of a term's applications
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationStatsResponse {
    pub totals: ApplicationAggregate,
    pub by_status: Vec<GroupCount<ApplicationStatus>>,
}

// ============================================================================
// Event Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct EventResponse {
    pub id: EventId,
    pub name: String,
    pub registration_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub start_time: DateTime<Utc>,
    pub buffered_start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub buffered_end_time: DateTime<Utc>,
    pub payment_required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<ImageId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AttendanceResponse {
    pub id: AttendanceId,
    pub event_id: EventId,
    pub profile_id: ProfileId,
    pub checked_in: bool,
    pub created_at: DateTime<Utc>,
}

/// Registered and checked-in counts for one event
pub type AttendanceSummaryResponse = AttendanceSummary;

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
}

impl ReadinessResponse {
    pub fn ready(database_healthy: bool) -> Self {
        Self {
            status: if database_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: if database_healthy { "healthy" } else { "unhealthy" }.to_string(),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_has_more() {
        let page = Page::new(2, 0);
        let first = PaginatedResponse::new(vec![1, 2], 5, page);
        assert!(first.pagination.has_more);
        assert_eq!(first.pagination.total, 5);

        let last = PaginatedResponse::new(vec![5], 5, Page::new(2, 4));
        assert!(!last.pagination.has_more);
    }

    #[test]
    fn test_question_type_serialized_as_type() {
        let q = QuestionResponse {
            id: QuestionId::new(9_007_199_254_740_993),
            term_id: TermId::new(1),
            question_id: "why_join".to_string(),
            role: Role::General,
            question_type: QuestionType::Textarea,
            question: "Why?".to_string(),
            is_required: true,
            order_num: 1,
            max_length: None,
            placeholder: None,
            help_text: None,
        };
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "textarea");
        assert_eq!(json["id"], "9007199254740993");
        assert!(json.get("max_length").is_none());
    }

    #[test]
    fn test_health_response() {
        let health = HealthResponse::healthy();
        assert_eq!(health.status, "healthy");
    }

    #[test]
    fn test_readiness_response() {
        let ready = ReadinessResponse::ready(true);
        assert_eq!(ready.status, "ready");
        assert_eq!(ready.checks.database, "healthy");
        assert!(ready.is_ready());

        let not_ready = ReadinessResponse::ready(false);
        assert_eq!(not_ready.status, "not_ready");
        assert_eq!(not_ready.checks.database, "unhealthy");
    }
}
