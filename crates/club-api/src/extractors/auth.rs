//! Authentication extractors
//!
//! Verifies bearer tokens from the identity provider and resolves the caller's profile.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use club_core::{Profile, ProfileId};
use club_service::ProfileService;

use crate::response::ApiError;
use crate::state::AppState;

/// Caller identified by a valid bearer token
///
/// The profile may not exist yet; onboarding creates it.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub profile_id: ProfileId,
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);
        let profile_id = app_state
            .jwt_verifier()
            .authenticate(bearer.token())
            .map_err(|e| {
                tracing::warn!(error = %e, "Rejected bearer token");
                ApiError::App(e)
            })?;

        Ok(Self { profile_id })
    }
}

/// Caller whose profile has admin or exec status
#[derive(Debug, Clone)]
pub struct AdminUser {
    pub profile: Profile,
}

impl AdminUser {
    pub fn profile_id(&self) -> ProfileId {
        self.profile.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth = AuthUser::from_request_parts(parts, state).await?;

        let app_state = AppState::from_ref(state);
        let profile = ProfileService::new(app_state.service_context())
            .require_admin(auth.profile_id)
            .await?;

        Ok(Self { profile })
    }
}
