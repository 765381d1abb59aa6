//! PostgreSQL implementation of ApplicationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use club_core::entities::Application;
use club_core::error::DomainError;
use club_core::inputs::{
    ApplicationAggregate, ApplicationFilter, ApplicationOrderBy, ApplicationPatch, NewApplication,
};
use club_core::traits::{ApplicationRepository, RepoResult};
use club_core::value_objects::{ApplicationId, ApplicationStatus, ProfileId, QuestionId, TermId};
use club_core::{FindMany, GroupCount, SortOrder};

use crate::mappers::{convert_all, parse_column};
use crate::models::ApplicationModel;
use crate::sql::{Conditions, SqlFilter};

use super::crud::{self, Table};
use super::error::{map_db_error, map_unique_violation, map_write_error};

const APPLICATIONS: Table = Table {
    name: "applications",
    columns: "id, profile_id, term_id, roles_applying_for, resume_path, status, comments, \
              created_at, updated_at, submitted_at",
    touch: Some("updated_at"),
};

fn already_applied(e: sqlx::Error) -> DomainError {
    map_unique_violation(e, || DomainError::AlreadyApplied)
}

/// PostgreSQL implementation of ApplicationRepository
#[derive(Clone)]
pub struct PgApplicationRepository {
    pool: PgPool,
}

impl PgApplicationRepository {
    /// Create a new PgApplicationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationRepository for PgApplicationRepository {
    #[instrument(skip(self))]
    async fn find_unique(&self, id: ApplicationId) -> RepoResult<Option<Application>> {
        let result: Option<ApplicationModel> =
            crud::find_by_id(&self.pool, &APPLICATIONS, id.into_inner())
                .await
                .map_err(map_db_error)?;

        result.map(Application::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_profile_and_term(
        &self,
        profile_id: ProfileId,
        term_id: TermId,
    ) -> RepoResult<Option<Application>> {
        let result = sqlx::query_as::<_, ApplicationModel>(&format!(
            "SELECT {} FROM applications WHERE profile_id = $1 AND term_id = $2",
            APPLICATIONS.columns
        ))
        .bind(profile_id.into_inner())
        .bind(term_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Application::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_first(
        &self,
        filter: &ApplicationFilter,
        order_by: ApplicationOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<Application>> {
        let result: Option<ApplicationModel> =
            crud::find_first(&self.pool, &APPLICATIONS, filter, &order_by, order)
                .await
                .map_err(map_db_error)?;

        result.map(Application::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        query: &FindMany<ApplicationFilter, ApplicationOrderBy>,
    ) -> RepoResult<Vec<Application>> {
        let rows: Vec<ApplicationModel> = crud::find_many(&self.pool, &APPLICATIONS, query)
            .await
            .map_err(map_db_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self, application), fields(profile_id = %application.profile_id, term_id = %application.term_id))]
    async fn create(&self, application: &NewApplication) -> RepoResult<Application> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: ApplicationModel = crud::insert_one(&mut conn, &APPLICATIONS, application)
            .await
            .map_err(already_applied)?;

        Application::try_from(model)
    }

    #[instrument(skip(self, applications), fields(count = applications.len()))]
    async fn create_many(
        &self,
        applications: &[NewApplication],
        skip_duplicates: bool,
    ) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let inserted = crud::insert_many(&mut tx, &APPLICATIONS, applications, skip_duplicates)
            .await
            .map_err(already_applied)?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(inserted)
    }

    #[instrument(skip(self, applications), fields(count = applications.len()))]
    async fn create_many_and_return(
        &self,
        applications: &[NewApplication],
    ) -> RepoResult<Vec<Application>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let rows: Vec<ApplicationModel> =
            crud::insert_many_returning(&mut tx, &APPLICATIONS, applications)
                .await
                .map_err(already_applied)?;
        tx.commit().await.map_err(map_db_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: ApplicationId, patch: &ApplicationPatch) -> RepoResult<Application> {
        let result: Option<ApplicationModel> =
            crud::update_by_id(&self.pool, &APPLICATIONS, id.into_inner(), patch)
                .await
                .map_err(map_write_error)?;

        result
            .ok_or(DomainError::ApplicationNotFound(id))
            .and_then(Application::try_from)
    }

    #[instrument(skip(self, patch, stale_questions), fields(stale = stale_questions.len()))]
    async fn update_and_drop_answers(
        &self,
        id: ApplicationId,
        patch: &ApplicationPatch,
        stale_questions: &[QuestionId],
    ) -> RepoResult<Application> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let result: Option<ApplicationModel> =
            crud::update_by_id(&mut *tx, &APPLICATIONS, id.into_inner(), patch)
                .await
                .map_err(map_write_error)?;
        let Some(model) = result else {
            return Err(DomainError::ApplicationNotFound(id));
        };

        if !stale_questions.is_empty() {
            let question_ids: Vec<i64> = stale_questions.iter().map(|q| q.into_inner()).collect();
            sqlx::query(
                r"
                DELETE FROM application_answers
                WHERE application_id = $1 AND question_id = ANY($2)
                ",
            )
            .bind(id.into_inner())
            .bind(question_ids)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;
        }

        tx.commit().await.map_err(map_db_error)?;

        Application::try_from(model)
    }

    #[instrument(skip(self, patch))]
    async fn update_many(
        &self,
        filter: &ApplicationFilter,
        patch: &ApplicationPatch,
    ) -> RepoResult<u64> {
        crud::update_many(&self.pool, &APPLICATIONS, filter, patch)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self, patch))]
    async fn update_many_and_return(
        &self,
        filter: &ApplicationFilter,
        patch: &ApplicationPatch,
    ) -> RepoResult<Vec<Application>> {
        let rows: Vec<ApplicationModel> =
            crud::update_many_returning(&self.pool, &APPLICATIONS, filter, patch)
                .await
                .map_err(map_write_error)?;

        convert_all(rows)
    }

    /// Keyed on (profile_id, term_id)
    #[instrument(skip(self, create, patch), fields(profile_id = %create.profile_id, term_id = %create.term_id))]
    async fn upsert(
        &self,
        create: &NewApplication,
        patch: &ApplicationPatch,
    ) -> RepoResult<Application> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: ApplicationModel =
            crud::upsert(&mut conn, &APPLICATIONS, create, "(profile_id, term_id)", patch)
                .await
                .map_err(map_write_error)?;

        Application::try_from(model)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ApplicationId) -> RepoResult<Application> {
        let result: Option<ApplicationModel> =
            crud::delete_by_id(&self.pool, &APPLICATIONS, id.into_inner())
                .await
                .map_err(map_write_error)?;

        result
            .ok_or(DomainError::ApplicationNotFound(id))
            .and_then(Application::try_from)
    }

    #[instrument(skip(self))]
    async fn delete_many(&self, filter: &ApplicationFilter) -> RepoResult<u64> {
        crud::delete_many(&self.pool, &APPLICATIONS, filter)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &ApplicationFilter) -> RepoResult<i64> {
        crud::count(&self.pool, &APPLICATIONS, filter)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn aggregate(&self, filter: &ApplicationFilter) -> RepoResult<ApplicationAggregate> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*), COUNT(submitted_at), MIN(submitted_at), MAX(submitted_at) \
             FROM applications",
        );
        filter.push_conditions(&mut Conditions::new(&mut qb));

        let (count, submitted, first_submitted_at, last_submitted_at) = qb
            .build_query_as::<(i64, i64, Option<DateTime<Utc>>, Option<DateTime<Utc>>)>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(ApplicationAggregate {
            count,
            submitted,
            first_submitted_at,
            last_submitted_at,
        })
    }

    #[instrument(skip(self))]
    async fn group_by_status(
        &self,
        filter: &ApplicationFilter,
    ) -> RepoResult<Vec<GroupCount<ApplicationStatus>>> {
        let rows: Vec<(String, i64)> =
            crud::group_count(&self.pool, &APPLICATIONS, "status", filter)
                .await
                .map_err(map_db_error)?;

        rows.into_iter()
            .map(|(key, count)| Ok(GroupCount { key: parse_column(&key)?, count }))
            .collect()
    }

    #[instrument(skip(self))]
    async fn submit(&self, id: ApplicationId, submitted_at: DateTime<Utc>) -> RepoResult<Application> {
        let result = sqlx::query_as::<_, ApplicationModel>(&format!(
            r"
            UPDATE applications
            SET status = 'submitted', submitted_at = $2, updated_at = NOW()
            WHERE id = $1 AND status = 'draft'
            RETURNING {}
            ",
            APPLICATIONS.columns
        ))
        .bind(id.into_inner())
        .bind(submitted_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        match result {
            Some(model) => Application::try_from(model),
            // Either gone or already past draft
            None => match self.find_unique(id).await? {
                Some(_) => Err(DomainError::ApplicationNotEditable),
                None => Err(DomainError::ApplicationNotFound(id)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgApplicationRepository>();
    }

    #[test]
    fn test_duplicate_maps_through() {
        assert_eq!(already_applied(sqlx::Error::PoolClosed).code(), "DATABASE_ERROR");
    }
}
