//! Membership handlers
//!
//! Admin management of member profiles and fee payments.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use club_core::ProfileId;
use club_service::dto::{
    AdminUpdateMemberRequest, ListMembersQuery, MarkPaidRequest, ProfileResponse,
};
use club_service::ProfileService;

use crate::extractors::{AdminUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List members, or their totals with `?stats=true`
///
/// GET /admin/memberships
pub async fn list_memberships(
    State(state): State<AppState>,
    _admin: AdminUser,
    QueryParams(query): QueryParams<ListMembersQuery>,
) -> ApiResult<Response> {
    let service = ProfileService::new(state.service_context());
    if query.stats {
        let stats = service.membership_stats().await?;
        return Ok(Json(stats).into_response());
    }

    let page = service.list_profiles(query).await?;
    Ok(Json(page).into_response())
}

/// PATCH /admin/memberships/{id}
pub async fn update_membership(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(profile_id): IdPath<ProfileId>,
    ValidatedJson(request): ValidatedJson<AdminUpdateMemberRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service.update_member(profile_id, request).await?;
    Ok(Json(response))
}

/// Record a fee payment
///
/// POST /admin/memberships/{id}/payment
pub async fn mark_membership_paid(
    State(state): State<AppState>,
    admin: AdminUser,
    IdPath(profile_id): IdPath<ProfileId>,
    ValidatedJson(request): ValidatedJson<MarkPaidRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service
        .mark_as_paid(&admin.profile, profile_id, request)
        .await?;
    Ok(Json(response))
}

/// DELETE /admin/memberships/{id}
pub async fn delete_membership(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(profile_id): IdPath<ProfileId>,
) -> ApiResult<NoContent> {
    let service = ProfileService::new(state.service_context());
    service.delete_member(profile_id).await?;
    Ok(NoContent)
}
