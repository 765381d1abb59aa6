//! Repository traits (ports) - define the interface for data access
//!
//! Every entity gets the same operation set: unique and first lookups (with
//! `_or_throw` variants), filtered listing, single and bulk writes, upsert on
//! the natural key, deletes, counts and entity-specific aggregates. The
//! infrastructure layer provides the implementations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{
    Application, ApplicationAnswer, Event, EventAttendance, Profile, Question, Term,
};
use crate::error::DomainError;
use crate::inputs::{
    AnswerOrderBy, ApplicationAggregate, ApplicationAnswerFilter, ApplicationAnswerPatch,
    ApplicationFilter, ApplicationOrderBy, ApplicationPatch, AttendanceOrderBy, AttendanceSummary,
    EventAggregate, EventAttendanceFilter, EventAttendancePatch, EventFilter, EventOrderBy,
    EventPatch, MembershipStats, NewApplication, NewApplicationAnswer, NewEvent,
    NewEventAttendance, NewProfile, NewQuestion, NewTerm, ProfileFilter, ProfileOrderBy,
    ProfilePatch, QuestionFilter, QuestionOrderBy, QuestionPatch, TermAggregate, TermFilter,
    TermOrderBy, TermPatch,
};
use crate::query::{FindMany, GroupCount, SortOrder};
use crate::value_objects::{
    AnswerId, ApplicationId, ApplicationStatus, AttendanceId, EventId, Faculty, ProfileId,
    QuestionId, Role, TermId, UserStatus,
};

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Profile Repository
// ============================================================================

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by ID
    async fn find_unique(&self, id: ProfileId) -> RepoResult<Option<Profile>>;

    async fn find_unique_or_throw(&self, id: ProfileId) -> RepoResult<Profile> {
        self.find_unique(id)
            .await?
            .ok_or(DomainError::ProfileNotFound(id))
    }

    /// Find profile by WatIAM
    async fn find_by_wat_iam(&self, wat_iam: &str) -> RepoResult<Option<Profile>>;

    async fn find_first(
        &self,
        filter: &ProfileFilter,
        order_by: ProfileOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<Profile>>;

    async fn find_first_or_throw(
        &self,
        filter: &ProfileFilter,
        order_by: ProfileOrderBy,
        order: SortOrder,
    ) -> RepoResult<Profile> {
        self.find_first(filter, order_by, order)
            .await?
            .ok_or(DomainError::NoMatch("profile"))
    }

    async fn find_many(
        &self,
        query: &FindMany<ProfileFilter, ProfileOrderBy>,
    ) -> RepoResult<Vec<Profile>>;

    /// Create a new profile
    async fn create(&self, profile: &NewProfile) -> RepoResult<Profile>;

    /// Insert many; with `skip_duplicates` existing ids are ignored
    async fn create_many(&self, profiles: &[NewProfile], skip_duplicates: bool) -> RepoResult<u64>;

    async fn create_many_and_return(&self, profiles: &[NewProfile]) -> RepoResult<Vec<Profile>>;

    /// Update a profile, touching `updated_at`
    async fn update(&self, id: ProfileId, patch: &ProfilePatch) -> RepoResult<Profile>;

    async fn update_many(&self, filter: &ProfileFilter, patch: &ProfilePatch) -> RepoResult<u64>;

    async fn update_many_and_return(
        &self,
        filter: &ProfileFilter,
        patch: &ProfilePatch,
    ) -> RepoResult<Vec<Profile>>;

    /// Insert, or apply `patch` when the id already exists
    async fn upsert(&self, create: &NewProfile, patch: &ProfilePatch) -> RepoResult<Profile>;

    /// Hard delete; applications and attendances cascade
    async fn delete(&self, id: ProfileId) -> RepoResult<Profile>;

    async fn delete_many(&self, filter: &ProfileFilter) -> RepoResult<u64>;

    async fn count(&self, filter: &ProfileFilter) -> RepoResult<i64>;

    /// Total, paid and MathSoc member counts
    async fn membership_stats(&self) -> RepoResult<MembershipStats>;

    async fn group_by_faculty(&self, filter: &ProfileFilter) -> RepoResult<Vec<GroupCount<Faculty>>>;

    async fn group_by_status(
        &self,
        filter: &ProfileFilter,
    ) -> RepoResult<Vec<GroupCount<UserStatus>>>;
}

// ============================================================================
// Term Repository
// ============================================================================

#[async_trait]
pub trait TermRepository: Send + Sync {
    /// Find term by ID
    async fn find_unique(&self, id: TermId) -> RepoResult<Option<Term>>;

    async fn find_unique_or_throw(&self, id: TermId) -> RepoResult<Term> {
        self.find_unique(id).await?.ok_or(DomainError::TermNotFound(id))
    }

    /// Find term by its unique name
    async fn find_by_name(&self, term_name: &str) -> RepoResult<Option<Term>>;

    async fn find_first(
        &self,
        filter: &TermFilter,
        order_by: TermOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<Term>>;

    async fn find_first_or_throw(
        &self,
        filter: &TermFilter,
        order_by: TermOrderBy,
        order: SortOrder,
    ) -> RepoResult<Term> {
        self.find_first(filter, order_by, order)
            .await?
            .ok_or(DomainError::NoMatch("term"))
    }

    async fn find_many(&self, query: &FindMany<TermFilter, TermOrderBy>) -> RepoResult<Vec<Term>>;

    /// Create a new term; the name must be unused
    async fn create(&self, term: &NewTerm) -> RepoResult<Term>;

    async fn create_many(&self, terms: &[NewTerm], skip_duplicates: bool) -> RepoResult<u64>;

    async fn create_many_and_return(&self, terms: &[NewTerm]) -> RepoResult<Vec<Term>>;

    async fn update(&self, id: TermId, patch: &TermPatch) -> RepoResult<Term>;

    async fn update_many(&self, filter: &TermFilter, patch: &TermPatch) -> RepoResult<u64>;

    async fn update_many_and_return(
        &self,
        filter: &TermFilter,
        patch: &TermPatch,
    ) -> RepoResult<Vec<Term>>;

    /// Upsert keyed on `term_name`
    async fn upsert(&self, create: &NewTerm, patch: &TermPatch) -> RepoResult<Term>;

    /// Hard delete; applications and questions cascade
    async fn delete(&self, id: TermId) -> RepoResult<Term>;

    async fn delete_many(&self, filter: &TermFilter) -> RepoResult<u64>;

    async fn count(&self, filter: &TermFilter) -> RepoResult<i64>;

    async fn aggregate(&self, filter: &TermFilter) -> RepoResult<TermAggregate>;
}

// ============================================================================
// Application Repository
// ============================================================================

#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Find application by ID
    async fn find_unique(&self, id: ApplicationId) -> RepoResult<Option<Application>>;

    async fn find_unique_or_throw(&self, id: ApplicationId) -> RepoResult<Application> {
        self.find_unique(id)
            .await?
            .ok_or(DomainError::ApplicationNotFound(id))
    }

    /// Find by the (profile, term) compound key
    async fn find_by_profile_and_term(
        &self,
        profile_id: ProfileId,
        term_id: TermId,
    ) -> RepoResult<Option<Application>>;

    async fn find_first(
        &self,
        filter: &ApplicationFilter,
        order_by: ApplicationOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<Application>>;

    async fn find_first_or_throw(
        &self,
        filter: &ApplicationFilter,
        order_by: ApplicationOrderBy,
        order: SortOrder,
    ) -> RepoResult<Application> {
        self.find_first(filter, order_by, order)
            .await?
            .ok_or(DomainError::NoMatch("application"))
    }

    async fn find_many(
        &self,
        query: &FindMany<ApplicationFilter, ApplicationOrderBy>,
    ) -> RepoResult<Vec<Application>>;

    /// Create an application; one per profile and term
    async fn create(&self, application: &NewApplication) -> RepoResult<Application>;

    async fn create_many(
        &self,
        applications: &[NewApplication],
        skip_duplicates: bool,
    ) -> RepoResult<u64>;

    async fn create_many_and_return(
        &self,
        applications: &[NewApplication],
    ) -> RepoResult<Vec<Application>>;

    async fn update(&self, id: ApplicationId, patch: &ApplicationPatch) -> RepoResult<Application>;

    /// Patch one application and delete its answers to `stale_questions` in
    /// the same transaction
    async fn update_and_drop_answers(
        &self,
        id: ApplicationId,
        patch: &ApplicationPatch,
        stale_questions: &[QuestionId],
    ) -> RepoResult<Application>;

    async fn update_many(
        &self,
        filter: &ApplicationFilter,
        patch: &ApplicationPatch,
    ) -> RepoResult<u64>;

    async fn update_many_and_return(
        &self,
        filter: &ApplicationFilter,
        patch: &ApplicationPatch,
    ) -> RepoResult<Vec<Application>>;

    /// Upsert keyed on (profile_id, term_id)
    async fn upsert(
        &self,
        create: &NewApplication,
        patch: &ApplicationPatch,
    ) -> RepoResult<Application>;

    /// Hard delete; answers cascade
    async fn delete(&self, id: ApplicationId) -> RepoResult<Application>;

    async fn delete_many(&self, filter: &ApplicationFilter) -> RepoResult<u64>;

    async fn count(&self, filter: &ApplicationFilter) -> RepoResult<i64>;

    async fn aggregate(&self, filter: &ApplicationFilter) -> RepoResult<ApplicationAggregate>;

    async fn group_by_status(
        &self,
        filter: &ApplicationFilter,
    ) -> RepoResult<Vec<GroupCount<ApplicationStatus>>>;

    /// Atomically move a draft to submitted
    ///
    /// Fails with `ApplicationNotEditable` when the row is no longer a draft.
    async fn submit(&self, id: ApplicationId, submitted_at: DateTime<Utc>) -> RepoResult<Application>;
}

// ============================================================================
// Question Repository
// ============================================================================

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Find question by surrogate ID
    async fn find_unique(&self, id: QuestionId) -> RepoResult<Option<Question>>;

    async fn find_unique_or_throw(&self, id: QuestionId) -> RepoResult<Question> {
        self.find_unique(id)
            .await?
            .ok_or(DomainError::QuestionNotFound(id))
    }

    /// Find by the (term, slug) compound key
    async fn find_by_term_and_slug(
        &self,
        term_id: TermId,
        question_id: &str,
    ) -> RepoResult<Option<Question>>;

    async fn find_first(
        &self,
        filter: &QuestionFilter,
        order_by: QuestionOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<Question>>;

    async fn find_first_or_throw(
        &self,
        filter: &QuestionFilter,
        order_by: QuestionOrderBy,
        order: SortOrder,
    ) -> RepoResult<Question> {
        self.find_first(filter, order_by, order)
            .await?
            .ok_or(DomainError::NoMatch("question"))
    }

    async fn find_many(
        &self,
        query: &FindMany<QuestionFilter, QuestionOrderBy>,
    ) -> RepoResult<Vec<Question>>;

    async fn create(&self, question: &NewQuestion) -> RepoResult<Question>;

    async fn create_many(&self, questions: &[NewQuestion], skip_duplicates: bool)
        -> RepoResult<u64>;

    async fn create_many_and_return(&self, questions: &[NewQuestion]) -> RepoResult<Vec<Question>>;

    async fn update(&self, id: QuestionId, patch: &QuestionPatch) -> RepoResult<Question>;

    async fn update_many(&self, filter: &QuestionFilter, patch: &QuestionPatch) -> RepoResult<u64>;

    async fn update_many_and_return(
        &self,
        filter: &QuestionFilter,
        patch: &QuestionPatch,
    ) -> RepoResult<Vec<Question>>;

    /// Upsert keyed on (term_id, question_id)
    async fn upsert(&self, create: &NewQuestion, patch: &QuestionPatch) -> RepoResult<Question>;

    /// Hard delete; refused while answers reference the question
    async fn delete(&self, id: QuestionId) -> RepoResult<Question>;

    async fn delete_many(&self, filter: &QuestionFilter) -> RepoResult<u64>;

    async fn count(&self, filter: &QuestionFilter) -> RepoResult<i64>;

    /// Highest `order_num` in a term, if it has questions
    async fn max_order_num(&self, term_id: TermId) -> RepoResult<Option<i32>>;

    async fn group_by_role(&self, term_id: TermId) -> RepoResult<Vec<GroupCount<Role>>>;

    /// Set display order for many questions of a term in one transaction
    async fn reorder(&self, term_id: TermId, positions: &[(QuestionId, i32)]) -> RepoResult<()>;
}

// ============================================================================
// Application Answer Repository
// ============================================================================

#[async_trait]
pub trait ApplicationAnswerRepository: Send + Sync {
    async fn find_unique(&self, id: AnswerId) -> RepoResult<Option<ApplicationAnswer>>;

    async fn find_unique_or_throw(&self, id: AnswerId) -> RepoResult<ApplicationAnswer> {
        self.find_unique(id)
            .await?
            .ok_or(DomainError::AnswerNotFound(id))
    }

    /// Find by the (application, question) compound key
    async fn find_by_application_and_question(
        &self,
        application_id: ApplicationId,
        question_id: QuestionId,
    ) -> RepoResult<Option<ApplicationAnswer>>;

    async fn find_first(
        &self,
        filter: &ApplicationAnswerFilter,
        order_by: AnswerOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<ApplicationAnswer>>;

    async fn find_first_or_throw(
        &self,
        filter: &ApplicationAnswerFilter,
        order_by: AnswerOrderBy,
        order: SortOrder,
    ) -> RepoResult<ApplicationAnswer> {
        self.find_first(filter, order_by, order)
            .await?
            .ok_or(DomainError::NoMatch("answer"))
    }

    async fn find_many(
        &self,
        query: &FindMany<ApplicationAnswerFilter, AnswerOrderBy>,
    ) -> RepoResult<Vec<ApplicationAnswer>>;

    async fn create(&self, answer: &NewApplicationAnswer) -> RepoResult<ApplicationAnswer>;

    async fn create_many(
        &self,
        answers: &[NewApplicationAnswer],
        skip_duplicates: bool,
    ) -> RepoResult<u64>;

    async fn create_many_and_return(
        &self,
        answers: &[NewApplicationAnswer],
    ) -> RepoResult<Vec<ApplicationAnswer>>;

    async fn update(
        &self,
        id: AnswerId,
        patch: &ApplicationAnswerPatch,
    ) -> RepoResult<ApplicationAnswer>;

    async fn update_many(
        &self,
        filter: &ApplicationAnswerFilter,
        patch: &ApplicationAnswerPatch,
    ) -> RepoResult<u64>;

    async fn update_many_and_return(
        &self,
        filter: &ApplicationAnswerFilter,
        patch: &ApplicationAnswerPatch,
    ) -> RepoResult<Vec<ApplicationAnswer>>;

    /// Upsert keyed on (application_id, question_id)
    async fn upsert(
        &self,
        create: &NewApplicationAnswer,
        patch: &ApplicationAnswerPatch,
    ) -> RepoResult<ApplicationAnswer>;

    /// Upsert every answer in one transaction; all or nothing
    async fn upsert_many(
        &self,
        answers: &[NewApplicationAnswer],
    ) -> RepoResult<Vec<ApplicationAnswer>>;

    async fn delete(&self, id: AnswerId) -> RepoResult<ApplicationAnswer>;

    async fn delete_many(&self, filter: &ApplicationAnswerFilter) -> RepoResult<u64>;

    async fn count(&self, filter: &ApplicationAnswerFilter) -> RepoResult<i64>;

    async fn group_by_question(
        &self,
        filter: &ApplicationAnswerFilter,
    ) -> RepoResult<Vec<GroupCount<QuestionId>>>;
}

// ============================================================================
// Event Repository
// ============================================================================

#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_unique(&self, id: EventId) -> RepoResult<Option<Event>>;

    async fn find_unique_or_throw(&self, id: EventId) -> RepoResult<Event> {
        self.find_unique(id).await?.ok_or(DomainError::EventNotFound(id))
    }

    async fn find_first(
        &self,
        filter: &EventFilter,
        order_by: EventOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<Event>>;

    async fn find_first_or_throw(
        &self,
        filter: &EventFilter,
        order_by: EventOrderBy,
        order: SortOrder,
    ) -> RepoResult<Event> {
        self.find_first(filter, order_by, order)
            .await?
            .ok_or(DomainError::NoMatch("event"))
    }

    async fn find_many(&self, query: &FindMany<EventFilter, EventOrderBy>)
        -> RepoResult<Vec<Event>>;

    async fn create(&self, event: &NewEvent) -> RepoResult<Event>;

    /// Events have no natural key, so `skip_duplicates` only skips id clashes
    async fn create_many(&self, events: &[NewEvent], skip_duplicates: bool) -> RepoResult<u64>;

    async fn create_many_and_return(&self, events: &[NewEvent]) -> RepoResult<Vec<Event>>;

    async fn update(&self, id: EventId, patch: &EventPatch) -> RepoResult<Event>;

    async fn update_many(&self, filter: &EventFilter, patch: &EventPatch) -> RepoResult<u64>;

    async fn update_many_and_return(
        &self,
        filter: &EventFilter,
        patch: &EventPatch,
    ) -> RepoResult<Vec<Event>>;

    /// Insert with an explicit id, or apply `patch` when it exists
    async fn upsert(&self, id: EventId, create: &NewEvent, patch: &EventPatch)
        -> RepoResult<Event>;

    /// Hard delete; attendances cascade
    async fn delete(&self, id: EventId) -> RepoResult<Event>;

    async fn delete_many(&self, filter: &EventFilter) -> RepoResult<u64>;

    async fn count(&self, filter: &EventFilter) -> RepoResult<i64>;

    async fn aggregate(&self, filter: &EventFilter) -> RepoResult<EventAggregate>;
}

// ============================================================================
// Event Attendance Repository
// ============================================================================

#[async_trait]
pub trait EventAttendanceRepository: Send + Sync {
    async fn find_unique(&self, id: AttendanceId) -> RepoResult<Option<EventAttendance>>;

    async fn find_unique_or_throw(&self, id: AttendanceId) -> RepoResult<EventAttendance> {
        self.find_unique(id)
            .await?
            .ok_or(DomainError::AttendanceNotFound(id))
    }

    /// Find by the (event, profile) compound key
    async fn find_by_event_and_profile(
        &self,
        event_id: EventId,
        profile_id: ProfileId,
    ) -> RepoResult<Option<EventAttendance>>;

    async fn find_first(
        &self,
        filter: &EventAttendanceFilter,
        order_by: AttendanceOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<EventAttendance>>;

    async fn find_first_or_throw(
        &self,
        filter: &EventAttendanceFilter,
        order_by: AttendanceOrderBy,
        order: SortOrder,
    ) -> RepoResult<EventAttendance> {
        self.find_first(filter, order_by, order)
            .await?
            .ok_or(DomainError::NoMatch("attendance"))
    }

    async fn find_many(
        &self,
        query: &FindMany<EventAttendanceFilter, AttendanceOrderBy>,
    ) -> RepoResult<Vec<EventAttendance>>;

    /// Register a profile for an event
    async fn create(&self, attendance: &NewEventAttendance) -> RepoResult<EventAttendance>;

    async fn create_many(
        &self,
        attendances: &[NewEventAttendance],
        skip_duplicates: bool,
    ) -> RepoResult<u64>;

    async fn create_many_and_return(
        &self,
        attendances: &[NewEventAttendance],
    ) -> RepoResult<Vec<EventAttendance>>;

    async fn update(
        &self,
        id: AttendanceId,
        patch: &EventAttendancePatch,
    ) -> RepoResult<EventAttendance>;

    async fn update_many(
        &self,
        filter: &EventAttendanceFilter,
        patch: &EventAttendancePatch,
    ) -> RepoResult<u64>;

    async fn update_many_and_return(
        &self,
        filter: &EventAttendanceFilter,
        patch: &EventAttendancePatch,
    ) -> RepoResult<Vec<EventAttendance>>;

    /// Upsert keyed on (event_id, profile_id)
    async fn upsert(
        &self,
        create: &NewEventAttendance,
        patch: &EventAttendancePatch,
    ) -> RepoResult<EventAttendance>;

    async fn delete(&self, id: AttendanceId) -> RepoResult<EventAttendance>;

    async fn delete_many(&self, filter: &EventAttendanceFilter) -> RepoResult<u64>;

    async fn count(&self, filter: &EventAttendanceFilter) -> RepoResult<i64>;

    async fn summary(&self, event_id: EventId) -> RepoResult<AttendanceSummary>;

    async fn group_by_event(
        &self,
        filter: &EventAttendanceFilter,
    ) -> RepoResult<Vec<GroupCount<EventId>>>;

    /// Get-or-create the attendance row and mark it checked in, atomically
    async fn check_in(&self, event_id: EventId, profile_id: ProfileId)
        -> RepoResult<EventAttendance>;
}
