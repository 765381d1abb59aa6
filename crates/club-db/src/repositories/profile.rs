//! PostgreSQL implementation of ProfileRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::Profile;
use club_core::error::DomainError;
use club_core::inputs::{
    MembershipStats, NewProfile, ProfileFilter, ProfileOrderBy, ProfilePatch,
};
use club_core::traits::{ProfileRepository, RepoResult};
use club_core::value_objects::{Faculty, ProfileId, UserStatus};
use club_core::{FindMany, GroupCount, SortOrder};

use crate::mappers::{convert_all, parse_column};
use crate::models::{MembershipStatsModel, ProfileModel};

use super::crud::{self, Table};
use super::error::{map_db_error, map_unique_violation, map_write_error};

const PROFILES: Table = Table {
    name: "profiles",
    columns: "id, first_name, last_name, user_status, has_paid, wat_iam, faculty, term, \
              heard_from_where, payment_method, payment_location, verifier, member_ideas, \
              is_math_soc_member, created_at, updated_at",
    touch: Some("updated_at"),
};

/// PostgreSQL implementation of ProfileRepository
#[derive(Clone)]
pub struct PgProfileRepository {
    pool: PgPool,
}

impl PgProfileRepository {
    /// Create a new PgProfileRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn group_by<K>(&self, column: &str, filter: &ProfileFilter) -> RepoResult<Vec<GroupCount<K>>>
    where
        K: std::str::FromStr<Err = club_core::value_objects::EnumParseError>,
    {
        let rows: Vec<(String, i64)> = crud::group_count(&self.pool, &PROFILES, column, filter)
            .await
            .map_err(map_db_error)?;

        rows.into_iter()
            .map(|(key, count)| Ok(GroupCount { key: parse_column(&key)?, count }))
            .collect()
    }
}

#[async_trait]
impl ProfileRepository for PgProfileRepository {
    #[instrument(skip(self))]
    async fn find_unique(&self, id: ProfileId) -> RepoResult<Option<Profile>> {
        let result: Option<ProfileModel> = crud::find_by_id(&self.pool, &PROFILES, id.into_inner())
            .await
            .map_err(map_db_error)?;

        result.map(Profile::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_wat_iam(&self, wat_iam: &str) -> RepoResult<Option<Profile>> {
        let result = sqlx::query_as::<_, ProfileModel>(&format!(
            "SELECT {} FROM profiles WHERE wat_iam = $1 ORDER BY created_at LIMIT 1",
            PROFILES.columns
        ))
        .bind(wat_iam)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Profile::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_first(
        &self,
        filter: &ProfileFilter,
        order_by: ProfileOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<Profile>> {
        let result: Option<ProfileModel> =
            crud::find_first(&self.pool, &PROFILES, filter, &order_by, order)
                .await
                .map_err(map_db_error)?;

        result.map(Profile::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        query: &FindMany<ProfileFilter, ProfileOrderBy>,
    ) -> RepoResult<Vec<Profile>> {
        let rows: Vec<ProfileModel> = crud::find_many(&self.pool, &PROFILES, query)
            .await
            .map_err(map_db_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self, profile), fields(profile_id = %profile.id))]
    async fn create(&self, profile: &NewProfile) -> RepoResult<Profile> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: ProfileModel = crud::insert_one(&mut conn, &PROFILES, profile)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::ProfileAlreadyExists))?;

        Profile::try_from(model)
    }

    #[instrument(skip(self, profiles), fields(count = profiles.len()))]
    async fn create_many(&self, profiles: &[NewProfile], skip_duplicates: bool) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let inserted = crud::insert_many(&mut tx, &PROFILES, profiles, skip_duplicates)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::ProfileAlreadyExists))?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(inserted)
    }

    #[instrument(skip(self, profiles), fields(count = profiles.len()))]
    async fn create_many_and_return(&self, profiles: &[NewProfile]) -> RepoResult<Vec<Profile>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let rows: Vec<ProfileModel> = crud::insert_many_returning(&mut tx, &PROFILES, profiles)
            .await
            .map_err(|e| map_unique_violation(e, || DomainError::ProfileAlreadyExists))?;
        tx.commit().await.map_err(map_db_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: ProfileId, patch: &ProfilePatch) -> RepoResult<Profile> {
        let result: Option<ProfileModel> =
            crud::update_by_id(&self.pool, &PROFILES, id.into_inner(), patch)
                .await
                .map_err(map_write_error)?;

        result
            .ok_or(DomainError::ProfileNotFound(id))
            .and_then(Profile::try_from)
    }

    #[instrument(skip(self, patch))]
    async fn update_many(&self, filter: &ProfileFilter, patch: &ProfilePatch) -> RepoResult<u64> {
        crud::update_many(&self.pool, &PROFILES, filter, patch)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self, patch))]
    async fn update_many_and_return(
        &self,
        filter: &ProfileFilter,
        patch: &ProfilePatch,
    ) -> RepoResult<Vec<Profile>> {
        let rows: Vec<ProfileModel> =
            crud::update_many_returning(&self.pool, &PROFILES, filter, patch)
                .await
                .map_err(map_write_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self, create, patch), fields(profile_id = %create.id))]
    async fn upsert(&self, create: &NewProfile, patch: &ProfilePatch) -> RepoResult<Profile> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: ProfileModel = crud::upsert(&mut conn, &PROFILES, create, "(id)", patch)
            .await
            .map_err(map_write_error)?;

        Profile::try_from(model)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ProfileId) -> RepoResult<Profile> {
        let result: Option<ProfileModel> = crud::delete_by_id(&self.pool, &PROFILES, id.into_inner())
            .await
            .map_err(map_write_error)?;

        result
            .ok_or(DomainError::ProfileNotFound(id))
            .and_then(Profile::try_from)
    }

    #[instrument(skip(self))]
    async fn delete_many(&self, filter: &ProfileFilter) -> RepoResult<u64> {
        crud::delete_many(&self.pool, &PROFILES, filter)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &ProfileFilter) -> RepoResult<i64> {
        crud::count(&self.pool, &PROFILES, filter)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn membership_stats(&self) -> RepoResult<MembershipStats> {
        let stats = sqlx::query_as::<_, MembershipStatsModel>(
            r"
            SELECT COUNT(*) AS total_users,
                   COUNT(*) FILTER (WHERE has_paid) AS paid_users,
                   COUNT(*) FILTER (WHERE is_math_soc_member) AS math_soc_members
            FROM profiles
            ",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(stats.into())
    }

    #[instrument(skip(self))]
    async fn group_by_faculty(&self, filter: &ProfileFilter) -> RepoResult<Vec<GroupCount<Faculty>>> {
        self.group_by("faculty", filter).await
    }

    #[instrument(skip(self))]
    async fn group_by_status(
        &self,
        filter: &ProfileFilter,
    ) -> RepoResult<Vec<GroupCount<UserStatus>>> {
        self.group_by("user_status", filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgProfileRepository>();
    }
}
