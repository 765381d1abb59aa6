//! Event service
//!
//! Handles club events, registration and check-in.

use chrono::{DateTime, Utc};
use club_core::inputs::{
    AttendanceOrderBy, EventAttendanceFilter, EventFilter, EventOrderBy, NewEventAttendance,
};
use club_core::{DomainError, Event, EventId, FindMany, Profile, ProfileId, SortOrder};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    page_of, AttendanceResponse, AttendanceSummaryResponse, CreateEventRequest, EventResponse,
    EventTimeframe, ListEventsQuery, PaginatedResponse, UpdateEventRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Event service
pub struct EventService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> EventService<'a> {
    /// Create a new EventService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Events relative to now; upcoming soonest first, past most recent first
    #[instrument(skip(self))]
    pub async fn list_events(
        &self,
        query: ListEventsQuery,
    ) -> ServiceResult<PaginatedResponse<EventResponse>> {
        let (filter, order) = timeframe_filter(query.when, Utc::now());
        let page = page_of(query.take, query.skip);

        let repo = self.ctx.event_repo();
        let find = FindMany::new(filter)
            .order_by(EventOrderBy::StartTime, order)
            .page(page);
        let events = repo.find_many(&find).await?;
        let total = repo.count(&find.filter).await?;

        Ok(PaginatedResponse::new(
            events.iter().map(EventResponse::from).collect(),
            total,
            page,
        ))
    }

    #[instrument(skip(self))]
    pub async fn get_event(&self, event_id: EventId) -> ServiceResult<EventResponse> {
        let event = self.ctx.event_repo().find_unique_or_throw(event_id).await?;
        Ok(EventResponse::from(&event))
    }

    /// Create an event; the check-in buffer must enclose the event
    #[instrument(skip(self, request))]
    pub async fn create_event(&self, request: CreateEventRequest) -> ServiceResult<EventResponse> {
        request.validate()?;

        let new_event = request.into_new_event();
        new_event.window().validate()?;

        let event = self.ctx.event_repo().create(&new_event).await?;

        info!(event_id = %event.id, name = %event.name, start = %event.start_time, "Event created");

        Ok(EventResponse::from(&event))
    }

    /// Patch an event; the merged time window is revalidated
    #[instrument(skip(self, request))]
    pub async fn update_event(
        &self,
        event_id: EventId,
        request: UpdateEventRequest,
    ) -> ServiceResult<EventResponse> {
        request.validate()?;

        let repo = self.ctx.event_repo();
        let current = repo.find_unique_or_throw(event_id).await?;

        let patch = request.into_patch();
        if patch.is_empty() {
            return Ok(EventResponse::from(&current));
        }
        patch.merged_window(current.window()).validate()?;

        let event = repo.update(event_id, &patch).await?;

        info!(event_id = %event_id, "Event updated");

        Ok(EventResponse::from(&event))
    }

    /// Delete an event and its attendance
    #[instrument(skip(self))]
    pub async fn delete_event(&self, event_id: EventId) -> ServiceResult<()> {
        let event = self.ctx.event_repo().delete(event_id).await?;

        info!(event_id = %event_id, name = %event.name, "Event deleted");

        Ok(())
    }

    async fn event_and_member(
        &self,
        event_id: EventId,
        profile_id: ProfileId,
    ) -> ServiceResult<(Event, Profile)> {
        let event = self.ctx.event_repo().find_unique_or_throw(event_id).await?;
        let profile = self.ctx.profile_repo().find_unique_or_throw(profile_id).await?;
        Ok((event, profile))
    }

    /// Sign up for an event
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        event_id: EventId,
        profile_id: ProfileId,
    ) -> ServiceResult<AttendanceResponse> {
        let (event, profile) = self.event_and_member(event_id, profile_id).await?;
        check_eligibility(&event, &profile)?;

        let attendance = self
            .ctx
            .attendance_repo()
            .create(&NewEventAttendance {
                event_id,
                profile_id,
                checked_in: false,
            })
            .await?;

        info!(event_id = %event_id, profile_id = %profile_id, "Registered for event");

        Ok(AttendanceResponse::from(&attendance))
    }

    /// Check in during the buffered window, registering on the spot if needed
    #[instrument(skip(self))]
    pub async fn check_in(
        &self,
        event_id: EventId,
        profile_id: ProfileId,
    ) -> ServiceResult<AttendanceResponse> {
        let (event, profile) = self.event_and_member(event_id, profile_id).await?;
        if !event.is_check_in_open(Utc::now()) {
            return Err(DomainError::CheckInClosed.into());
        }
        check_eligibility(&event, &profile)?;

        let attendance = self.ctx.attendance_repo().check_in(event_id, profile_id).await?;

        info!(event_id = %event_id, profile_id = %profile_id, "Checked in");

        Ok(AttendanceResponse::from(&attendance))
    }

    /// Everyone registered for an event, in sign-up order
    #[instrument(skip(self))]
    pub async fn attendance(&self, event_id: EventId) -> ServiceResult<Vec<AttendanceResponse>> {
        self.ctx.event_repo().find_unique_or_throw(event_id).await?;

        let find = FindMany::new(EventAttendanceFilter::for_event(event_id))
            .order_by(AttendanceOrderBy::CreatedAt, SortOrder::Asc)
            .unpaged();
        let rows = self.ctx.attendance_repo().find_many(&find).await?;
        Ok(rows.iter().map(AttendanceResponse::from).collect())
    }

    #[instrument(skip(self))]
    pub async fn attendance_summary(
        &self,
        event_id: EventId,
    ) -> ServiceResult<AttendanceSummaryResponse> {
        self.ctx.event_repo().find_unique_or_throw(event_id).await?;
        Ok(self.ctx.attendance_repo().summary(event_id).await?)
    }
}

/// Paid-only events need a paid membership
fn check_eligibility(event: &Event, profile: &Profile) -> Result<(), DomainError> {
    if event.payment_required && !profile.has_paid {
        return Err(DomainError::PaymentRequired);
    }
    Ok(())
}

/// Upcoming means not yet ended, past means already ended
fn timeframe_filter(when: EventTimeframe, now: DateTime<Utc>) -> (EventFilter, SortOrder) {
    match when {
        EventTimeframe::Upcoming => (
            EventFilter {
                ends_after: Some(now),
                ..EventFilter::default()
            },
            SortOrder::Asc,
        ),
        EventTimeframe::Past => (
            EventFilter {
                ends_before: Some(now),
                ..EventFilter::default()
            },
            SortOrder::Desc,
        ),
        EventTimeframe::All => (EventFilter::default(), SortOrder::Desc),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use club_core::{Faculty, PaymentMethod, UserStatus};

    fn event(payment_required: bool) -> Event {
        let now = Utc::now();
        Event {
            id: EventId::new(1),
            name: "Games Night".to_string(),
            registration_required: true,
            description: None,
            location: None,
            start_time: now,
            buffered_start_time: now - Duration::minutes(15),
            end_time: now + Duration::hours(2),
            buffered_end_time: now + Duration::hours(3),
            payment_required,
            image_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn member(has_paid: bool) -> Profile {
        let now = Utc::now();
        Profile {
            id: ProfileId::new_v4(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            user_status: UserStatus::Member,
            has_paid,
            wat_iam: None,
            faculty: Faculty::Math,
            term: "3A".to_string(),
            heard_from_where: String::new(),
            payment_method: PaymentMethod::Online,
            payment_location: None,
            verifier: None,
            member_ideas: None,
            is_math_soc_member: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_paid_event_needs_paid_member() {
        assert!(check_eligibility(&event(false), &member(false)).is_ok());
        assert!(check_eligibility(&event(true), &member(true)).is_ok());
        assert!(matches!(
            check_eligibility(&event(true), &member(false)),
            Err(DomainError::PaymentRequired)
        ));
    }

    #[test]
    fn test_timeframe_filter() {
        let now = Utc::now();

        let (upcoming, order) = timeframe_filter(EventTimeframe::Upcoming, now);
        assert_eq!(upcoming.ends_after, Some(now));
        assert_eq!(order, SortOrder::Asc);

        let (past, order) = timeframe_filter(EventTimeframe::Past, now);
        assert_eq!(past.ends_before, Some(now));
        assert!(past.ends_after.is_none());
        assert_eq!(order, SortOrder::Desc);

        let (all, _) = timeframe_filter(EventTimeframe::All, now);
        assert!(all.ends_after.is_none() && all.ends_before.is_none());
    }
}
