//! PostgreSQL implementation of ApplicationAnswerRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::ApplicationAnswer;
use club_core::error::DomainError;
use club_core::inputs::{
    AnswerOrderBy, ApplicationAnswerFilter, ApplicationAnswerPatch, NewApplicationAnswer,
};
use club_core::traits::{ApplicationAnswerRepository, RepoResult};
use club_core::value_objects::{AnswerId, ApplicationId, QuestionId};
use club_core::{FindMany, GroupCount, SortOrder};

use crate::models::ApplicationAnswerModel;

use super::crud::{self, Table};
use super::error::{map_db_error, map_unique_violation, map_write_error};

const ANSWERS: Table = Table {
    name: "application_answers",
    columns: "id, application_id, question_id, answer_text, answer_option, answer_options, \
              answer_file, created_at, updated_at",
    touch: Some("updated_at"),
};

const ANSWER_KEY: &str = "(application_id, question_id)";

fn duplicate_answer(e: sqlx::Error) -> DomainError {
    map_unique_violation(e, || DomainError::DuplicateAnswer)
}

/// PostgreSQL implementation of ApplicationAnswerRepository
#[derive(Clone)]
pub struct PgApplicationAnswerRepository {
    pool: PgPool,
}

impl PgApplicationAnswerRepository {
    /// Create a new PgApplicationAnswerRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ApplicationAnswerRepository for PgApplicationAnswerRepository {
    #[instrument(skip(self))]
    async fn find_unique(&self, id: AnswerId) -> RepoResult<Option<ApplicationAnswer>> {
        let result: Option<ApplicationAnswerModel> =
            crud::find_by_id(&self.pool, &ANSWERS, id.into_inner())
                .await
                .map_err(map_db_error)?;

        Ok(result.map(ApplicationAnswer::from))
    }

    #[instrument(skip(self))]
    async fn find_by_application_and_question(
        &self,
        application_id: ApplicationId,
        question_id: QuestionId,
    ) -> RepoResult<Option<ApplicationAnswer>> {
        let result = sqlx::query_as::<_, ApplicationAnswerModel>(&format!(
            "SELECT {} FROM application_answers WHERE application_id = $1 AND question_id = $2",
            ANSWERS.columns
        ))
        .bind(application_id.into_inner())
        .bind(question_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ApplicationAnswer::from))
    }

    #[instrument(skip(self))]
    async fn find_first(
        &self,
        filter: &ApplicationAnswerFilter,
        order_by: AnswerOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<ApplicationAnswer>> {
        let result: Option<ApplicationAnswerModel> =
            crud::find_first(&self.pool, &ANSWERS, filter, &order_by, order)
                .await
                .map_err(map_db_error)?;

        Ok(result.map(ApplicationAnswer::from))
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        query: &FindMany<ApplicationAnswerFilter, AnswerOrderBy>,
    ) -> RepoResult<Vec<ApplicationAnswer>> {
        let rows: Vec<ApplicationAnswerModel> = crud::find_many(&self.pool, &ANSWERS, query)
            .await
            .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ApplicationAnswer::from).collect())
    }

    #[instrument(skip(self, answer), fields(application_id = %answer.application_id, question_id = %answer.question_id))]
    async fn create(&self, answer: &NewApplicationAnswer) -> RepoResult<ApplicationAnswer> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: ApplicationAnswerModel = crud::insert_one(&mut conn, &ANSWERS, answer)
            .await
            .map_err(duplicate_answer)?;

        Ok(model.into())
    }

    #[instrument(skip(self, answers), fields(count = answers.len()))]
    async fn create_many(
        &self,
        answers: &[NewApplicationAnswer],
        skip_duplicates: bool,
    ) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let inserted = crud::insert_many(&mut tx, &ANSWERS, answers, skip_duplicates)
            .await
            .map_err(duplicate_answer)?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(inserted)
    }

    #[instrument(skip(self, answers), fields(count = answers.len()))]
    async fn create_many_and_return(
        &self,
        answers: &[NewApplicationAnswer],
    ) -> RepoResult<Vec<ApplicationAnswer>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let rows: Vec<ApplicationAnswerModel> =
            crud::insert_many_returning(&mut tx, &ANSWERS, answers)
                .await
                .map_err(duplicate_answer)?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(rows.into_iter().map(ApplicationAnswer::from).collect())
    }

    #[instrument(skip(self, patch))]
    async fn update(
        &self,
        id: AnswerId,
        patch: &ApplicationAnswerPatch,
    ) -> RepoResult<ApplicationAnswer> {
        let result: Option<ApplicationAnswerModel> =
            crud::update_by_id(&self.pool, &ANSWERS, id.into_inner(), patch)
                .await
                .map_err(map_write_error)?;

        result
            .map(ApplicationAnswer::from)
            .ok_or(DomainError::AnswerNotFound(id))
    }

    #[instrument(skip(self, patch))]
    async fn update_many(
        &self,
        filter: &ApplicationAnswerFilter,
        patch: &ApplicationAnswerPatch,
    ) -> RepoResult<u64> {
        crud::update_many(&self.pool, &ANSWERS, filter, patch)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self, patch))]
    async fn update_many_and_return(
        &self,
        filter: &ApplicationAnswerFilter,
        patch: &ApplicationAnswerPatch,
    ) -> RepoResult<Vec<ApplicationAnswer>> {
        let rows: Vec<ApplicationAnswerModel> =
            crud::update_many_returning(&self.pool, &ANSWERS, filter, patch)
                .await
                .map_err(map_write_error)?;

        Ok(rows.into_iter().map(ApplicationAnswer::from).collect())
    }

    #[instrument(skip(self, create, patch), fields(application_id = %create.application_id, question_id = %create.question_id))]
    async fn upsert(
        &self,
        create: &NewApplicationAnswer,
        patch: &ApplicationAnswerPatch,
    ) -> RepoResult<ApplicationAnswer> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: ApplicationAnswerModel =
            crud::upsert(&mut conn, &ANSWERS, create, ANSWER_KEY, patch)
                .await
                .map_err(map_write_error)?;

        Ok(model.into())
    }

    #[instrument(skip(self, answers), fields(count = answers.len()))]
    async fn upsert_many(
        &self,
        answers: &[NewApplicationAnswer],
    ) -> RepoResult<Vec<ApplicationAnswer>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let mut saved = Vec::with_capacity(answers.len());

        for answer in answers {
            let patch = ApplicationAnswerPatch::from(answer);
            let model: ApplicationAnswerModel =
                crud::upsert(&mut tx, &ANSWERS, answer, ANSWER_KEY, &patch)
                    .await
                    .map_err(map_write_error)?;
            saved.push(model.into());
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(saved)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: AnswerId) -> RepoResult<ApplicationAnswer> {
        let result: Option<ApplicationAnswerModel> =
            crud::delete_by_id(&self.pool, &ANSWERS, id.into_inner())
                .await
                .map_err(map_write_error)?;

        result
            .map(ApplicationAnswer::from)
            .ok_or(DomainError::AnswerNotFound(id))
    }

    #[instrument(skip(self))]
    async fn delete_many(&self, filter: &ApplicationAnswerFilter) -> RepoResult<u64> {
        crud::delete_many(&self.pool, &ANSWERS, filter)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &ApplicationAnswerFilter) -> RepoResult<i64> {
        crud::count(&self.pool, &ANSWERS, filter)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn group_by_question(
        &self,
        filter: &ApplicationAnswerFilter,
    ) -> RepoResult<Vec<GroupCount<QuestionId>>> {
        let rows: Vec<(i64, i64)> = crud::group_count(&self.pool, &ANSWERS, "question_id", filter)
            .await
            .map_err(map_db_error)?;

        Ok(rows
            .into_iter()
            .map(|(key, count)| GroupCount {
                key: QuestionId::new(key),
                count,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgApplicationAnswerRepository>();
    }
}
