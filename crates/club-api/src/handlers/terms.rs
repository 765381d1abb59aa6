//! Term handlers
//!
//! Recruiting terms; reads are open to any signed-in user, writes need an admin.

use axum::{extract::State, Json};
use club_core::TermId;
use club_service::dto::{CreateTermRequest, TermResponse, UpdateTermRequest};
use club_service::TermService;

use crate::extractors::{AdminUser, AuthUser, IdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// GET /terms
pub async fn list_terms(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<Vec<TermResponse>>> {
    let service = TermService::new(state.service_context());
    let response = service.list_terms().await?;
    Ok(Json(response))
}

/// The term currently accepting applications
///
/// GET /terms/active
pub async fn get_active_term(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> ApiResult<Json<TermResponse>> {
    let service = TermService::new(state.service_context());
    let response = service.active_term().await?;
    Ok(Json(response))
}

/// GET /terms/{term_id}
pub async fn get_term(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(term_id): IdPath<TermId>,
) -> ApiResult<Json<TermResponse>> {
    let service = TermService::new(state.service_context());
    let response = service.get_term(term_id).await?;
    Ok(Json(response))
}

/// POST /terms
pub async fn create_term(
    State(state): State<AppState>,
    _admin: AdminUser,
    ValidatedJson(request): ValidatedJson<CreateTermRequest>,
) -> ApiResult<Created<Json<TermResponse>>> {
    let service = TermService::new(state.service_context());
    let response = service.create_term(request).await?;
    Ok(Created(Json(response)))
}

/// PATCH /terms/{term_id}
pub async fn update_term(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(term_id): IdPath<TermId>,
    ValidatedJson(request): ValidatedJson<UpdateTermRequest>,
) -> ApiResult<Json<TermResponse>> {
    let service = TermService::new(state.service_context());
    let response = service.update_term(term_id, request).await?;
    Ok(Json(response))
}

/// Delete a term along with its questions and applications
///
/// DELETE /terms/{term_id}
pub async fn delete_term(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(term_id): IdPath<TermId>,
) -> ApiResult<NoContent> {
    let service = TermService::new(state.service_context());
    service.delete_term(term_id).await?;
    Ok(NoContent)
}
