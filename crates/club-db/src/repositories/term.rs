//! PostgreSQL implementation of TermRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use club_core::entities::Term;
use club_core::error::DomainError;
use club_core::inputs::{NewTerm, TermAggregate, TermFilter, TermOrderBy, TermPatch};
use club_core::traits::{RepoResult, TermRepository};
use club_core::value_objects::TermId;
use club_core::{FindMany, SortOrder};

use crate::models::{TermAggregateModel, TermModel};
use crate::sql::{Conditions, SqlFilter};

use super::crud::{self, Table};
use super::error::{map_db_error, map_unique_violation, map_write_error};

const TERMS: Table = Table {
    name: "terms",
    columns: "id, term_name, app_release_date, app_soft_deadline, app_hard_deadline, \
              created_at, updated_at",
    touch: Some("updated_at"),
};

/// Unique violations on `terms_term_name_key`; `name` is unknown for batches
fn name_taken(name: Option<&str>) -> impl FnOnce(sqlx::Error) -> DomainError + '_ {
    move |e| {
        map_unique_violation(e, || {
            DomainError::TermNameTaken(name.unwrap_or("<batch>").to_string())
        })
    }
}

/// PostgreSQL implementation of TermRepository
#[derive(Clone)]
pub struct PgTermRepository {
    pool: PgPool,
}

impl PgTermRepository {
    /// Create a new PgTermRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TermRepository for PgTermRepository {
    #[instrument(skip(self))]
    async fn find_unique(&self, id: TermId) -> RepoResult<Option<Term>> {
        let result: Option<TermModel> = crud::find_by_id(&self.pool, &TERMS, id.into_inner())
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Term::from))
    }

    #[instrument(skip(self))]
    async fn find_by_name(&self, term_name: &str) -> RepoResult<Option<Term>> {
        let result = sqlx::query_as::<_, TermModel>(&format!(
            "SELECT {} FROM terms WHERE term_name = $1",
            TERMS.columns
        ))
        .bind(term_name)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Term::from))
    }

    #[instrument(skip(self))]
    async fn find_first(
        &self,
        filter: &TermFilter,
        order_by: TermOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<Term>> {
        let result: Option<TermModel> =
            crud::find_first(&self.pool, &TERMS, filter, &order_by, order)
                .await
                .map_err(map_db_error)?;

        Ok(result.map(Term::from))
    }

    #[instrument(skip(self))]
    async fn find_many(&self, query: &FindMany<TermFilter, TermOrderBy>) -> RepoResult<Vec<Term>> {
        let rows: Vec<TermModel> = crud::find_many(&self.pool, &TERMS, query)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(Term::from).collect())
    }

    #[instrument(skip(self))]
    async fn create(&self, term: &NewTerm) -> RepoResult<Term> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: TermModel = crud::insert_one(&mut conn, &TERMS, term)
            .await
            .map_err(name_taken(Some(term.term_name.as_str())))?;

        Ok(model.into())
    }

    #[instrument(skip(self, terms), fields(count = terms.len()))]
    async fn create_many(&self, terms: &[NewTerm], skip_duplicates: bool) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let inserted = crud::insert_many(&mut tx, &TERMS, terms, skip_duplicates)
            .await
            .map_err(name_taken(None))?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(inserted)
    }

    #[instrument(skip(self, terms), fields(count = terms.len()))]
    async fn create_many_and_return(&self, terms: &[NewTerm]) -> RepoResult<Vec<Term>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let rows: Vec<TermModel> = crud::insert_many_returning(&mut tx, &TERMS, terms)
            .await
            .map_err(name_taken(None))?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(rows.into_iter().map(Term::from).collect())
    }

    #[instrument(skip(self))]
    async fn update(&self, id: TermId, patch: &TermPatch) -> RepoResult<Term> {
        let result: Option<TermModel> = crud::update_by_id(&self.pool, &TERMS, id.into_inner(), patch)
            .await
            .map_err(name_taken(patch.term_name.as_deref()))?;

        result.map(Term::from).ok_or(DomainError::TermNotFound(id))
    }

    #[instrument(skip(self))]
    async fn update_many(&self, filter: &TermFilter, patch: &TermPatch) -> RepoResult<u64> {
        crud::update_many(&self.pool, &TERMS, filter, patch)
            .await
            .map_err(name_taken(patch.term_name.as_deref()))
    }

    #[instrument(skip(self))]
    async fn update_many_and_return(
        &self,
        filter: &TermFilter,
        patch: &TermPatch,
    ) -> RepoResult<Vec<Term>> {
        let rows: Vec<TermModel> = crud::update_many_returning(&self.pool, &TERMS, filter, patch)
            .await
            .map_err(name_taken(patch.term_name.as_deref()))?;

        Ok(rows.into_iter().map(Term::from).collect())
    }

    /// Keyed on `term_name`
    #[instrument(skip(self))]
    async fn upsert(&self, create: &NewTerm, patch: &TermPatch) -> RepoResult<Term> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: TermModel = crud::upsert(&mut conn, &TERMS, create, "(term_name)", patch)
            .await
            .map_err(name_taken(patch.term_name.as_deref()))?;

        Ok(model.into())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: TermId) -> RepoResult<Term> {
        let result: Option<TermModel> = crud::delete_by_id(&self.pool, &TERMS, id.into_inner())
            .await
            .map_err(map_write_error)?;

        result.map(Term::from).ok_or(DomainError::TermNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete_many(&self, filter: &TermFilter) -> RepoResult<u64> {
        crud::delete_many(&self.pool, &TERMS, filter)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &TermFilter) -> RepoResult<i64> {
        crud::count(&self.pool, &TERMS, filter)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn aggregate(&self, filter: &TermFilter) -> RepoResult<TermAggregate> {
        let mut qb = QueryBuilder::<Postgres>::new(
            "SELECT COUNT(*) AS count, MIN(app_release_date) AS earliest_release, \
             MAX(app_hard_deadline) AS latest_hard_deadline FROM terms",
        );
        filter.push_conditions(&mut Conditions::new(&mut qb));

        let model = qb
            .build_query_as::<TermAggregateModel>()
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgTermRepository>();
    }

    #[test]
    fn test_name_taken_passes_other_errors() {
        let err = name_taken(Some("F25"))(sqlx::Error::RowNotFound);
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
