//! Application handlers
//!
//! The applicant's own draft for a term, plus the admin review surface.

use axum::{extract::State, Json};
use club_core::{ApplicationId, TermId};
use club_service::dto::{
    AnswerResponse, ApplicationResponse, ApplicationReviewResponse, ApplicationStatsResponse,
    ListApplicationsQuery,
    PaginatedResponse, SaveAnswersRequest, SetStatusRequest, StartApplicationRequest,
    UpdateApplicationRequest,
};
use club_service::ApplicationService;

use crate::extractors::{AdminUser, AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /terms/{term_id}/application
pub async fn get_my_application(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(term_id): IdPath<TermId>,
) -> ApiResult<Json<ApplicationResponse>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.get_application(auth.profile_id, term_id).await?;
    Ok(Json(response))
}

/// Start a draft application
///
/// POST /terms/{term_id}/application
pub async fn start_application(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(term_id): IdPath<TermId>,
    ValidatedJson(request): ValidatedJson<StartApplicationRequest>,
) -> ApiResult<Created<Json<ApplicationResponse>>> {
    let service = ApplicationService::new(state.service_context());
    let response = service
        .start_application(auth.profile_id, term_id, request)
        .await?;
    Ok(Created(Json(response)))
}

/// PATCH /terms/{term_id}/application
pub async fn update_my_application(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(term_id): IdPath<TermId>,
    ValidatedJson(request): ValidatedJson<UpdateApplicationRequest>,
) -> ApiResult<Json<ApplicationResponse>> {
    let service = ApplicationService::new(state.service_context());
    let response = service
        .update_application(auth.profile_id, term_id, request)
        .await?;
    Ok(Json(response))
}

/// Save a batch of answers; all are written or none
///
/// PUT /terms/{term_id}/application/answers
pub async fn save_answers(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(term_id): IdPath<TermId>,
    ValidatedJson(request): ValidatedJson<SaveAnswersRequest>,
) -> ApiResult<Json<Vec<AnswerResponse>>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.save_answers(auth.profile_id, term_id, request).await?;
    Ok(Json(response))
}

/// POST /terms/{term_id}/application/submit
pub async fn submit_application(
    State(state): State<AppState>,
    auth: AuthUser,
    IdPath(term_id): IdPath<TermId>,
) -> ApiResult<Json<ApplicationResponse>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.submit_application(auth.profile_id, term_id).await?;
    Ok(Json(response))
}

/// GET /admin/terms/{term_id}/applications
pub async fn list_applications(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(term_id): IdPath<TermId>,
    QueryParams(query): QueryParams<ListApplicationsQuery>,
) -> ApiResult<Json<PaginatedResponse<ApplicationResponse>>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.list_applications(term_id, query).await?;
    Ok(Json(response))
}

/// GET /admin/terms/{term_id}/applications/stats
pub async fn get_application_stats(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(term_id): IdPath<TermId>,
) -> ApiResult<Json<ApplicationStatsResponse>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.status_counts(term_id).await?;
    Ok(Json(response))
}

/// GET /admin/applications/{application_id}
pub async fn get_application_for_review(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(application_id): IdPath<ApplicationId>,
) -> ApiResult<Json<ApplicationReviewResponse>> {
    let service = ApplicationService::new(state.service_context());
    let response = service.get_application_for_review(application_id).await?;
    Ok(Json(response))
}

/// Record a review decision
///
/// PATCH /admin/applications/{application_id}/status
pub async fn set_application_status(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(application_id): IdPath<ApplicationId>,
    ValidatedJson(request): ValidatedJson<SetStatusRequest>,
) -> ApiResult<Json<ApplicationResponse>> {
    tracing::debug!(reviewer = %admin.profile_id(), "Reviewing application");

    let service = ApplicationService::new(state.service_context());
    let response = service.set_status(application_id, request).await?;
    Ok(Json(response))
}
