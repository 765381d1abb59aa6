//! PostgreSQL implementation of QuestionRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use club_core::entities::Question;
use club_core::error::DomainError;
use club_core::inputs::{NewQuestion, QuestionFilter, QuestionOrderBy, QuestionPatch};
use club_core::traits::{QuestionRepository, RepoResult};
use club_core::value_objects::{QuestionId, Role, TermId};
use club_core::{FindMany, GroupCount, SortOrder};

use crate::mappers::{convert_all, parse_column};
use crate::models::QuestionModel;

use super::crud::{self, Table};
use super::error::{map_db_error, map_unique_violation, map_write_error};

const QUESTIONS: Table = Table {
    name: "questions",
    columns: "id, term_id, question_id, role, \"type\", question, is_required, order_num, \
              max_length, placeholder, help_text",
    touch: None,
};

/// Unique violations on `questions_term_slug_key`
fn duplicate_slug(slug: Option<&str>) -> impl FnOnce(sqlx::Error) -> DomainError + '_ {
    move |e| {
        map_unique_violation(e, || {
            DomainError::DuplicateQuestion(slug.unwrap_or("<batch>").to_string())
        })
    }
}

/// PostgreSQL implementation of QuestionRepository
#[derive(Clone)]
pub struct PgQuestionRepository {
    pool: PgPool,
}

impl PgQuestionRepository {
    /// Create a new PgQuestionRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl QuestionRepository for PgQuestionRepository {
    #[instrument(skip(self))]
    async fn find_unique(&self, id: QuestionId) -> RepoResult<Option<Question>> {
        let result: Option<QuestionModel> = crud::find_by_id(&self.pool, &QUESTIONS, id.into_inner())
            .await
            .map_err(map_db_error)?;

        result.map(Question::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_term_and_slug(
        &self,
        term_id: TermId,
        question_id: &str,
    ) -> RepoResult<Option<Question>> {
        let result = sqlx::query_as::<_, QuestionModel>(&format!(
            "SELECT {} FROM questions WHERE term_id = $1 AND question_id = $2",
            QUESTIONS.columns
        ))
        .bind(term_id.into_inner())
        .bind(question_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Question::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_first(
        &self,
        filter: &QuestionFilter,
        order_by: QuestionOrderBy,
        order: SortOrder,
    ) -> RepoResult<Option<Question>> {
        let result: Option<QuestionModel> =
            crud::find_first(&self.pool, &QUESTIONS, filter, &order_by, order)
                .await
                .map_err(map_db_error)?;

        result.map(Question::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_many(
        &self,
        query: &FindMany<QuestionFilter, QuestionOrderBy>,
    ) -> RepoResult<Vec<Question>> {
        let rows: Vec<QuestionModel> = crud::find_many(&self.pool, &QUESTIONS, query)
            .await
            .map_err(map_db_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self, question), fields(term_id = %question.term_id, slug = %question.question_id))]
    async fn create(&self, question: &NewQuestion) -> RepoResult<Question> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: QuestionModel = crud::insert_one(&mut conn, &QUESTIONS, question)
            .await
            .map_err(duplicate_slug(Some(question.question_id.as_str())))?;

        Question::try_from(model)
    }

    #[instrument(skip(self, questions), fields(count = questions.len()))]
    async fn create_many(&self, questions: &[NewQuestion], skip_duplicates: bool) -> RepoResult<u64> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let inserted = crud::insert_many(&mut tx, &QUESTIONS, questions, skip_duplicates)
            .await
            .map_err(duplicate_slug(None))?;
        tx.commit().await.map_err(map_db_error)?;

        Ok(inserted)
    }

    #[instrument(skip(self, questions), fields(count = questions.len()))]
    async fn create_many_and_return(&self, questions: &[NewQuestion]) -> RepoResult<Vec<Question>> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;
        let rows: Vec<QuestionModel> = crud::insert_many_returning(&mut tx, &QUESTIONS, questions)
            .await
            .map_err(duplicate_slug(None))?;
        tx.commit().await.map_err(map_db_error)?;

        convert_all(rows)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: QuestionId, patch: &QuestionPatch) -> RepoResult<Question> {
        let result: Option<QuestionModel> =
            crud::update_by_id(&self.pool, &QUESTIONS, id.into_inner(), patch)
                .await
                .map_err(duplicate_slug(patch.question_id.as_deref()))?;

        result
            .ok_or(DomainError::QuestionNotFound(id))
            .and_then(Question::try_from)
    }

    #[instrument(skip(self, patch))]
    async fn update_many(&self, filter: &QuestionFilter, patch: &QuestionPatch) -> RepoResult<u64> {
        crud::update_many(&self.pool, &QUESTIONS, filter, patch)
            .await
            .map_err(duplicate_slug(patch.question_id.as_deref()))
    }

    #[instrument(skip(self, patch))]
    async fn update_many_and_return(
        &self,
        filter: &QuestionFilter,
        patch: &QuestionPatch,
    ) -> RepoResult<Vec<Question>> {
        let rows: Vec<QuestionModel> =
            crud::update_many_returning(&self.pool, &QUESTIONS, filter, patch)
                .await
                .map_err(duplicate_slug(patch.question_id.as_deref()))?;

        convert_all(rows)
    }

    /// Keyed on (term_id, question_id)
    #[instrument(skip(self, create, patch), fields(term_id = %create.term_id, slug = %create.question_id))]
    async fn upsert(&self, create: &NewQuestion, patch: &QuestionPatch) -> RepoResult<Question> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        let model: QuestionModel =
            crud::upsert(&mut conn, &QUESTIONS, create, "(term_id, question_id)", patch)
                .await
                .map_err(duplicate_slug(patch.question_id.as_deref()))?;

        Question::try_from(model)
    }

    /// Fails with `ReferenceViolation` while answers still point at the question
    #[instrument(skip(self))]
    async fn delete(&self, id: QuestionId) -> RepoResult<Question> {
        let result: Option<QuestionModel> =
            crud::delete_by_id(&self.pool, &QUESTIONS, id.into_inner())
                .await
                .map_err(map_write_error)?;

        result
            .ok_or(DomainError::QuestionNotFound(id))
            .and_then(Question::try_from)
    }

    #[instrument(skip(self))]
    async fn delete_many(&self, filter: &QuestionFilter) -> RepoResult<u64> {
        crud::delete_many(&self.pool, &QUESTIONS, filter)
            .await
            .map_err(map_write_error)
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: &QuestionFilter) -> RepoResult<i64> {
        crud::count(&self.pool, &QUESTIONS, filter)
            .await
            .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn max_order_num(&self, term_id: TermId) -> RepoResult<Option<i32>> {
        sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(order_num) FROM questions WHERE term_id = $1",
        )
        .bind(term_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn group_by_role(&self, term_id: TermId) -> RepoResult<Vec<GroupCount<Role>>> {
        let rows: Vec<(String, i64)> = crud::group_count(
            &self.pool,
            &QUESTIONS,
            "role",
            &QuestionFilter::for_term(term_id),
        )
        .await
        .map_err(map_db_error)?;

        rows.into_iter()
            .map(|(key, count)| Ok(GroupCount { key: parse_column(&key)?, count }))
            .collect()
    }

    #[instrument(skip(self, positions), fields(count = positions.len()))]
    async fn reorder(&self, term_id: TermId, positions: &[(QuestionId, i32)]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        for (question_id, order_num) in positions {
            let updated = sqlx::query(
                r"
                UPDATE questions
                SET order_num = $3
                WHERE id = $1 AND term_id = $2
                ",
            )
            .bind(question_id.into_inner())
            .bind(term_id.into_inner())
            .bind(*order_num)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?
            .rows_affected();

            // Dropping the transaction rolls back earlier moves
            if updated == 0 {
                return Err(DomainError::QuestionNotFound(*question_id));
            }
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgQuestionRepository>();
    }
}
