//! Profile service
//!
//! Handles onboarding, self-service edits and the admin memberships surface.

use club_core::inputs::{ProfileFilter, ProfileOrderBy, ProfilePatch};
use club_core::{DomainError, FindMany, Profile, ProfileId, SortOrder};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    page_of, AdminUpdateMemberRequest, CreateProfileRequest, ListMembersQuery, MarkPaidRequest,
    MembershipStatsResponse, PaginatedResponse, ProfileResponse, UpdateProfileRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Profile service
pub struct ProfileService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProfileService<'a> {
    /// Create a new ProfileService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Get the signed-in user's profile
    #[instrument(skip(self))]
    pub async fn get_profile(&self, profile_id: ProfileId) -> ServiceResult<ProfileResponse> {
        let profile = self.ctx.profile_repo().find_unique_or_throw(profile_id).await?;
        Ok(ProfileResponse::from(&profile))
    }

    /// Load the caller's profile and require admin or exec status
    ///
    /// A caller without a profile is treated as a non-admin.
    #[instrument(skip(self))]
    pub async fn require_admin(&self, profile_id: ProfileId) -> ServiceResult<Profile> {
        match self.ctx.profile_repo().find_unique(profile_id).await? {
            Some(profile) if profile.is_admin() => Ok(profile),
            _ => Err(DomainError::AdminRequired.into()),
        }
    }

    /// Onboard the signed-in user
    #[instrument(skip(self, request))]
    pub async fn create_profile(
        &self,
        profile_id: ProfileId,
        request: CreateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        request.validate()?;

        let new_profile = request.into_new_profile(profile_id);
        let profile = self.ctx.profile_repo().create(&new_profile).await?;

        info!(profile_id = %profile.id, faculty = %profile.faculty, "Profile created");

        Ok(ProfileResponse::from(&profile))
    }

    /// Self-service edit; `is_math_soc_member` follows the faculty
    #[instrument(skip(self, request))]
    pub async fn update_profile(
        &self,
        profile_id: ProfileId,
        request: UpdateProfileRequest,
    ) -> ServiceResult<ProfileResponse> {
        request.validate()?;

        let patch = request.into_patch();
        let profile = if patch.is_empty() {
            self.ctx.profile_repo().find_unique_or_throw(profile_id).await?
        } else {
            let profile = self.ctx.profile_repo().update(profile_id, &patch).await?;
            info!(profile_id = %profile_id, "Profile updated");
            profile
        };

        Ok(ProfileResponse::from(&profile))
    }

    /// Whether the user has onboarded with a name
    #[instrument(skip(self))]
    pub async fn is_profile_complete(&self, profile_id: ProfileId) -> ServiceResult<bool> {
        let profile = self.ctx.profile_repo().find_unique(profile_id).await?;
        Ok(profile.is_some_and(|p| p.is_complete()))
    }

    /// Admin list of memberships, newest first
    #[instrument(skip(self))]
    pub async fn list_profiles(
        &self,
        query: ListMembersQuery,
    ) -> ServiceResult<PaginatedResponse<ProfileResponse>> {
        query.validate()?;

        let filter = ProfileFilter {
            user_status: query.user_status,
            has_paid: query.has_paid,
            faculty: query.faculty,
            search: query.search.map(|s| s.trim().to_string()),
            ..ProfileFilter::default()
        };
        let page = page_of(query.take, query.skip);

        let repo = self.ctx.profile_repo();
        let find = FindMany::new(filter)
            .order_by(ProfileOrderBy::CreatedAt, SortOrder::Desc)
            .page(page);
        let profiles = repo.find_many(&find).await?;
        let total = repo.count(&find.filter).await?;

        Ok(PaginatedResponse::new(
            profiles.iter().map(ProfileResponse::from).collect(),
            total,
            page,
        ))
    }

    /// Totals shown on the memberships dashboard
    #[instrument(skip(self))]
    pub async fn membership_stats(&self) -> ServiceResult<MembershipStatsResponse> {
        Ok(self.ctx.profile_repo().membership_stats().await?)
    }

    /// Record a membership fee payment
    ///
    /// The verifier defaults to the admin recording it.
    #[instrument(skip(self, admin, request), fields(admin_id = %admin.id))]
    pub async fn mark_as_paid(
        &self,
        admin: &Profile,
        profile_id: ProfileId,
        request: MarkPaidRequest,
    ) -> ServiceResult<ProfileResponse> {
        request.validate()?;

        let patch = ProfilePatch {
            has_paid: Some(true),
            payment_method: Some(request.payment_method),
            payment_location: Some(request.payment_location),
            verifier: Some(Some(request.verifier.unwrap_or_else(|| admin.full_name()))),
            ..ProfilePatch::default()
        };
        let profile = self.ctx.profile_repo().update(profile_id, &patch).await?;

        info!(
            profile_id = %profile_id,
            payment_method = %request.payment_method,
            "Membership marked as paid"
        );

        Ok(ProfileResponse::from(&profile))
    }

    /// Admin edit of any membership field, including status
    #[instrument(skip(self, request))]
    pub async fn update_member(
        &self,
        profile_id: ProfileId,
        request: AdminUpdateMemberRequest,
    ) -> ServiceResult<ProfileResponse> {
        request.validate()?;

        let patch = request.into_patch();
        if patch.is_empty() {
            return Err(ServiceError::validation("No fields to update"));
        }

        let profile = self.ctx.profile_repo().update(profile_id, &patch).await?;

        info!(
            profile_id = %profile_id,
            user_status = %profile.user_status,
            has_paid = profile.has_paid,
            "Membership updated"
        );

        Ok(ProfileResponse::from(&profile))
    }

    /// Remove a membership and everything that belongs to it
    #[instrument(skip(self))]
    pub async fn delete_member(&self, profile_id: ProfileId) -> ServiceResult<()> {
        self.ctx.profile_repo().delete(profile_id).await?;

        info!(profile_id = %profile_id, "Membership deleted");

        Ok(())
    }
}
