//! Profile handlers
//!
//! The signed-in user's own profile.

use axum::{extract::State, Json};
use club_service::dto::{
    CreateProfileRequest, ProfileCompletionResponse, ProfileResponse, UpdateProfileRequest,
};
use club_service::ProfileService;

use crate::extractors::{AuthUser, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /profiles/@me
pub async fn get_my_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service.get_profile(auth.profile_id).await?;
    Ok(Json(response))
}

/// Onboard the signed-in user
///
/// POST /profiles/@me
pub async fn create_my_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateProfileRequest>,
) -> ApiResult<Created<Json<ProfileResponse>>> {
    let service = ProfileService::new(state.service_context());
    let response = service.create_profile(auth.profile_id, request).await?;
    Ok(Created(Json(response)))
}

/// PATCH /profiles/@me
pub async fn update_my_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileResponse>> {
    let service = ProfileService::new(state.service_context());
    let response = service.update_profile(auth.profile_id, request).await?;
    Ok(Json(response))
}

/// Whether onboarding is finished; false when no profile exists yet
///
/// GET /profiles/@me/complete
pub async fn get_my_profile_completion(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<ProfileCompletionResponse>> {
    let service = ProfileService::new(state.service_context());
    let complete = service.is_profile_complete(auth.profile_id).await?;
    Ok(Json(ProfileCompletionResponse { complete }))
}
