//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.
//! Nullable fields distinguish "absent" (keep) from `null` (clear).

use chrono::{DateTime, Utc};
use club_core::entities::is_valid_slug;
use club_core::inputs::{
    ApplicationPatch, EventPatch, NewApplicationAnswer, NewEvent, NewProfile, NewQuestion,
    NewTerm, ProfilePatch, QuestionPatch, TermPatch,
};
use club_core::{
    ApplicationId, ApplicationStatus, Faculty, ImageId, Nullable, Page, PaymentMethod, ProfileId,
    QuestionId, QuestionType, Role, TermId, UserStatus,
};
use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationError};

/// Deserialize a present field (including `null`) as `Some(_)`
fn nullable<'de, D, T>(deserializer: D) -> Result<Nullable<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(ValidationError::new("slug")
            .with_message("Use lowercase letters, digits, '_' or '-' (max 64)".into()))
    }
}

/// Offset paging from `take`/`skip` query parameters
pub fn page_of(take: Option<i64>, skip: Option<i64>) -> Page {
    Page::new(
        take.unwrap_or(Page::DEFAULT_TAKE),
        skip.unwrap_or_default(),
    )
}

// ============================================================================
// Profile Requests
// ============================================================================

/// Onboarding form for the signed-in user
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: String,

    #[validate(length(min = 2, max = 16, message = "WatIAM must be 2-16 characters"))]
    pub wat_iam: Option<String>,

    pub faculty: Faculty,

    /// Academic term, e.g. "2B"
    #[validate(length(min = 1, max = 16, message = "Term must be 1-16 characters"))]
    pub term: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "Answer must be at most 500 characters"))]
    pub heard_from_where: String,

    pub payment_method: PaymentMethod,

    #[validate(length(max = 200, message = "Payment location must be at most 200 characters"))]
    pub payment_location: Option<String>,

    #[validate(length(max = 2000, message = "Ideas must be at most 2000 characters"))]
    pub member_ideas: Option<String>,
}

impl CreateProfileRequest {
    pub fn into_new_profile(self, id: ProfileId) -> NewProfile {
        let mut profile = NewProfile::member(
            id,
            self.first_name.trim(),
            self.last_name.trim(),
            self.faculty,
            self.term,
            self.payment_method,
        );
        profile.wat_iam = self.wat_iam;
        profile.heard_from_where = self.heard_from_where;
        profile.payment_location = self.payment_location;
        profile.member_ideas = self.member_ideas;
        profile
    }
}

/// Self-service profile edit
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,

    /// WatIAM or null to remove
    #[serde(default, deserialize_with = "nullable")]
    pub wat_iam: Nullable<String>,

    pub faculty: Option<Faculty>,

    #[validate(length(min = 1, max = 16, message = "Term must be 1-16 characters"))]
    pub term: Option<String>,

    #[validate(length(max = 500, message = "Answer must be at most 500 characters"))]
    pub heard_from_where: Option<String>,

    pub payment_method: Option<PaymentMethod>,

    #[serde(default, deserialize_with = "nullable")]
    pub payment_location: Nullable<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub member_ideas: Nullable<String>,
}

impl UpdateProfileRequest {
    pub fn into_patch(self) -> ProfilePatch {
        ProfilePatch {
            first_name: self.first_name,
            last_name: self.last_name,
            wat_iam: self.wat_iam,
            faculty: self.faculty,
            term: self.term,
            heard_from_where: self.heard_from_where,
            payment_method: self.payment_method,
            payment_location: self.payment_location,
            member_ideas: self.member_ideas,
            ..ProfilePatch::default()
        }
        .with_derived_math_soc()
    }
}

/// Admin edit of a membership
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AdminUpdateMemberRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be 1-100 characters"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Last name must be 1-100 characters"))]
    pub last_name: Option<String>,

    pub user_status: Option<UserStatus>,

    pub has_paid: Option<bool>,

    pub faculty: Option<Faculty>,

    #[validate(length(min = 1, max = 16, message = "Term must be 1-16 characters"))]
    pub term: Option<String>,

    pub payment_method: Option<PaymentMethod>,

    #[serde(default, deserialize_with = "nullable")]
    pub payment_location: Nullable<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub verifier: Nullable<String>,

    /// Overrides the value derived from `faculty`
    pub is_math_soc_member: Option<bool>,
}

impl AdminUpdateMemberRequest {
    pub fn into_patch(self) -> ProfilePatch {
        let explicit_math_soc = self.is_math_soc_member;
        let patch = ProfilePatch {
            first_name: self.first_name,
            last_name: self.last_name,
            user_status: self.user_status,
            has_paid: self.has_paid,
            faculty: self.faculty,
            term: self.term,
            payment_method: self.payment_method,
            payment_location: self.payment_location,
            verifier: self.verifier,
            ..ProfilePatch::default()
        }
        .with_derived_math_soc();

        match explicit_math_soc {
            Some(value) => ProfilePatch {
                is_math_soc_member: Some(value),
                ..patch
            },
            None => patch,
        }
    }
}

/// Record a membership fee payment
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MarkPaidRequest {
    pub payment_method: PaymentMethod,

    #[validate(length(max = 200, message = "Payment location must be at most 200 characters"))]
    pub payment_location: Option<String>,

    /// Defaults to the admin recording the payment
    #[validate(length(min = 1, max = 200, message = "Verifier must be 1-200 characters"))]
    pub verifier: Option<String>,
}

/// Query for the admin memberships list
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ListMembersQuery {
    /// Return membership counts instead of the list
    #[serde(default)]
    pub stats: bool,

    #[validate(length(min = 1, max = 100, message = "Search must be 1-100 characters"))]
    pub search: Option<String>,

    pub user_status: Option<UserStatus>,

    pub has_paid: Option<bool>,

    pub faculty: Option<Faculty>,

    pub take: Option<i64>,

    pub skip: Option<i64>,
}

// ============================================================================
// Term Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateTermRequest {
    #[validate(length(min = 1, max = 32, message = "Term name must be 1-32 characters"))]
    pub term_name: String,

    pub app_release_date: DateTime<Utc>,

    pub app_soft_deadline: DateTime<Utc>,

    pub app_hard_deadline: DateTime<Utc>,
}

impl CreateTermRequest {
    pub fn into_new_term(self) -> NewTerm {
        NewTerm {
            term_name: self.term_name.trim().to_string(),
            app_release_date: self.app_release_date,
            app_soft_deadline: self.app_soft_deadline,
            app_hard_deadline: self.app_hard_deadline,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateTermRequest {
    #[validate(length(min = 1, max = 32, message = "Term name must be 1-32 characters"))]
    pub term_name: Option<String>,

    pub app_release_date: Option<DateTime<Utc>>,

    pub app_soft_deadline: Option<DateTime<Utc>>,

    pub app_hard_deadline: Option<DateTime<Utc>>,
}

impl UpdateTermRequest {
    pub fn into_patch(self) -> TermPatch {
        TermPatch {
            term_name: self.term_name.map(|n| n.trim().to_string()),
            app_release_date: self.app_release_date,
            app_soft_deadline: self.app_soft_deadline,
            app_hard_deadline: self.app_hard_deadline,
        }
    }
}

// ============================================================================
// Question Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateQuestionRequest {
    /// Slug, unique within the term
    #[validate(custom(function = "validate_slug"))]
    pub question_id: String,

    pub role: Role,

    #[serde(rename = "type")]
    pub question_type: QuestionType,

    #[validate(length(min = 1, max = 1000, message = "Question must be 1-1000 characters"))]
    pub question: String,

    #[serde(default)]
    pub is_required: bool,

    /// Appended after the last question when omitted
    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub order_num: Option<i32>,

    #[validate(range(min = 1, max = 10000, message = "Max length must be 1-10000"))]
    pub max_length: Option<i32>,

    #[validate(length(max = 200, message = "Placeholder must be at most 200 characters"))]
    pub placeholder: Option<String>,

    #[validate(length(max = 1000, message = "Help text must be at most 1000 characters"))]
    pub help_text: Option<String>,
}

impl CreateQuestionRequest {
    pub fn into_new_question(self, term_id: TermId, order_num: i32) -> NewQuestion {
        NewQuestion {
            term_id,
            question_id: self.question_id,
            role: self.role,
            question_type: self.question_type,
            question: self.question,
            is_required: self.is_required,
            order_num,
            max_length: self.max_length,
            placeholder: self.placeholder,
            help_text: self.help_text,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateQuestionRequest {
    #[validate(custom(function = "validate_slug"))]
    pub question_id: Option<String>,

    pub role: Option<Role>,

    #[serde(rename = "type")]
    pub question_type: Option<QuestionType>,

    #[validate(length(min = 1, max = 1000, message = "Question must be 1-1000 characters"))]
    pub question: Option<String>,

    pub is_required: Option<bool>,

    #[validate(range(min = 0, message = "Order must not be negative"))]
    pub order_num: Option<i32>,

    #[serde(default, deserialize_with = "nullable")]
    pub max_length: Nullable<i32>,

    #[serde(default, deserialize_with = "nullable")]
    pub placeholder: Nullable<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub help_text: Nullable<String>,
}

impl UpdateQuestionRequest {
    pub fn into_patch(self) -> QuestionPatch {
        QuestionPatch {
            question_id: self.question_id,
            role: self.role,
            question_type: self.question_type,
            question: self.question,
            is_required: self.is_required,
            order_num: self.order_num,
            max_length: self.max_length,
            placeholder: self.placeholder,
            help_text: self.help_text,
        }
    }
}

/// New position for one question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPosition {
    pub id: QuestionId,
    pub order_num: i32,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReorderQuestionsRequest {
    #[validate(length(min = 1, max = 500, message = "Must reorder 1-500 questions"))]
    pub positions: Vec<QuestionPosition>,
}

/// Query for listing a term's questions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuestionsQuery {
    /// Comma separated roles; shared questions are always included
    pub roles: Option<String>,
}

impl ListQuestionsQuery {
    /// Parsed role list; `None` means every role
    pub fn roles(&self) -> Result<Option<Vec<Role>>, ValidationError> {
        let Some(raw) = self.roles.as_deref() else {
            return Ok(None);
        };
        raw.split(',')
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .map(|r| {
                r.parse::<Role>().map_err(|_| {
                    ValidationError::new("role").with_message(format!("unknown role '{r}'").into())
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }
}

// ============================================================================
// Application Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct StartApplicationRequest {
    #[serde(default)]
    #[validate(length(max = 15, message = "Too many roles"))]
    pub roles_applying_for: Vec<Role>,

    #[validate(length(max = 500, message = "Resume path must be at most 500 characters"))]
    pub resume_path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateApplicationRequest {
    #[validate(length(max = 15, message = "Too many roles"))]
    pub roles_applying_for: Option<Vec<Role>>,

    /// Resume storage path or null to remove
    #[serde(default, deserialize_with = "nullable")]
    pub resume_path: Nullable<String>,
}

impl UpdateApplicationRequest {
    pub fn into_patch(self) -> ApplicationPatch {
        ApplicationPatch {
            roles_applying_for: self.roles_applying_for,
            resume_path: self.resume_path,
            ..ApplicationPatch::default()
        }
    }
}

/// One answer; only the slot matching the question type may be set
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnswerInput {
    pub question_id: QuestionId,

    #[validate(length(max = 10000, message = "Answer must be at most 10000 characters"))]
    pub answer_text: Option<String>,

    #[validate(length(max = 500, message = "Option must be at most 500 characters"))]
    pub answer_option: Option<String>,

    #[serde(default)]
    #[validate(length(max = 50, message = "At most 50 options"))]
    pub answer_options: Vec<String>,

    #[validate(length(max = 500, message = "File path must be at most 500 characters"))]
    pub answer_file: Option<String>,
}

impl AnswerInput {
    pub fn into_new_answer(self, application_id: ApplicationId) -> NewApplicationAnswer {
        NewApplicationAnswer {
            application_id,
            question_id: self.question_id,
            answer_text: self.answer_text,
            answer_option: self.answer_option,
            answer_options: self.answer_options,
            answer_file: self.answer_file,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SaveAnswersRequest {
    #[validate(length(min = 1, max = 200, message = "Must save 1-200 answers"), nested)]
    pub answers: Vec<AnswerInput>,
}

/// Admin review decision
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SetStatusRequest {
    pub status: ApplicationStatus,

    #[validate(length(max = 2000, message = "Comments must be at most 2000 characters"))]
    pub comments: Option<String>,
}

/// Query for the admin applications list
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListApplicationsQuery {
    pub status: Option<ApplicationStatus>,

    pub role: Option<Role>,

    pub submitted: Option<bool>,

    pub take: Option<i64>,

    pub skip: Option<i64>,
}

// ============================================================================
// Event Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Event name must be 1-200 characters"))]
    pub name: String,

    #[serde(default)]
    pub registration_required: bool,

    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    #[validate(length(max = 200, message = "Location must be at most 200 characters"))]
    pub location: Option<String>,

    pub start_time: DateTime<Utc>,

    pub end_time: DateTime<Utc>,

    /// Check-in opens here; defaults to `start_time`
    pub buffered_start_time: Option<DateTime<Utc>>,

    /// Check-in closes here; defaults to `end_time`
    pub buffered_end_time: Option<DateTime<Utc>>,

    #[serde(default)]
    pub payment_required: bool,

    pub image_id: Option<ImageId>,
}

impl CreateEventRequest {
    pub fn into_new_event(self) -> NewEvent {
        NewEvent {
            name: self.name.trim().to_string(),
            registration_required: self.registration_required,
            description: self.description,
            location: self.location,
            start_time: self.start_time,
            buffered_start_time: self.buffered_start_time.unwrap_or(self.start_time),
            end_time: self.end_time,
            buffered_end_time: self.buffered_end_time.unwrap_or(self.end_time),
            payment_required: self.payment_required,
            image_id: self.image_id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEventRequest {
    #[validate(length(min = 1, max = 200, message = "Event name must be 1-200 characters"))]
    pub name: Option<String>,

    pub registration_required: Option<bool>,

    #[serde(default, deserialize_with = "nullable")]
    pub description: Nullable<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub location: Nullable<String>,

    pub start_time: Option<DateTime<Utc>>,

    pub buffered_start_time: Option<DateTime<Utc>>,

    pub end_time: Option<DateTime<Utc>>,

    pub buffered_end_time: Option<DateTime<Utc>>,

    pub payment_required: Option<bool>,

    #[serde(default, deserialize_with = "nullable")]
    pub image_id: Nullable<ImageId>,
}

impl UpdateEventRequest {
    pub fn into_patch(self) -> EventPatch {
        EventPatch {
            name: self.name.map(|n| n.trim().to_string()),
            registration_required: self.registration_required,
            description: self.description,
            location: self.location,
            start_time: self.start_time,
            buffered_start_time: self.buffered_start_time,
            end_time: self.end_time,
            buffered_end_time: self.buffered_end_time,
            payment_required: self.payment_required,
            image_id: self.image_id,
        }
    }
}

/// Which events to list, relative to now
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventTimeframe {
    /// Not yet ended
    #[default]
    Upcoming,
    /// Already ended
    Past,
    All,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListEventsQuery {
    #[serde(default)]
    pub when: EventTimeframe,

    pub take: Option<i64>,

    pub skip: Option<i64>,
}
