//! Event handlers
//!
//! Club events, sign-ups and check-in.

use axum::{extract::State, Json};
use club_core::EventId;
use club_service::dto::{
    AttendanceResponse, AttendanceSummaryResponse, CreateEventRequest, EventResponse,
    ListEventsQuery, PaginatedResponse, UpdateEventRequest,
};
use club_service::EventService;

use crate::extractors::{AdminUser, AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// `?when=upcoming|past|all`, upcoming by default
///
/// GET /events
pub async fn list_events(
    State(state): State<AppState>,
    _auth: AuthUser,
    QueryParams(query): QueryParams<ListEventsQuery>,
) -> ApiResult<Json<PaginatedResponse<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.list_events(query).await?;
    Ok(Json(response))
}

/// GET /events/{event_id}
pub async fn get_event(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(event_id): IdPath<EventId>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.get_event(event_id).await?;
    Ok(Json(response))
}

/// POST /events
pub async fn create_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateEventRequest>,
) -> ApiResult<Created<Json<EventResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.create_event(request).await?;
    Ok(Created(Json(response)))
}

/// PATCH /events/{event_id}
pub async fn update_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(event_id): IdPath<EventId>,
    ValidatedJson(request): ValidatedJson<UpdateEventRequest>,
) -> ApiResult<Json<EventResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.update_event(event_id, request).await?;
    Ok(Json(response))
}

/// DELETE /events/{event_id}
pub async fn delete_event(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(event_id): IdPath<EventId>,
) -> ApiResult<NoContent> {
    let service = EventService::new(state.service_context());
    service.delete_event(event_id).await?;
    Ok(NoContent)
}

/// Sign the caller up
///
/// POST /events/{event_id}/register
pub async fn register(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath<EventId>,
) -> ApiResult<Created<Json<AttendanceResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.register(event_id, auth.profile_id).await?;
    Ok(Created(Json(response)))
}

/// Check the caller in; registers them on the spot if needed
///
/// POST /events/{event_id}/check-in
pub async fn check_in(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(event_id): IdPath<EventId>,
) -> ApiResult<Json<AttendanceResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.check_in(event_id, auth.profile_id).await?;
    Ok(Json(response))
}

/// GET /events/{event_id}/attendance
pub async fn list_attendance(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(event_id): IdPath<EventId>,
) -> ApiResult<Json<Vec<AttendanceResponse>>> {
    let service = EventService::new(state.service_context());
    let response = service.attendance(event_id).await?;
    Ok(Json(response))
}

/// GET /events/{event_id}/attendance/summary
pub async fn get_attendance_summary(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(event_id): IdPath<EventId>,
) -> ApiResult<Json<AttendanceSummaryResponse>> {
    let service = EventService::new(state.service_context());
    let response = service.attendance_summary(event_id).await?;
    Ok(Json(response))
}
