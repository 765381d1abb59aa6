//! Question service
//!
//! Handles a term's application form: its questions and their order.

use std::collections::HashSet;

use club_core::inputs::{QuestionFilter, QuestionOrderBy};
use club_core::{FindMany, Question, QuestionId, Role, SortOrder, TermId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    CreateQuestionRequest, QuestionResponse, ReorderQuestionsRequest, UpdateQuestionRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Question service
pub struct QuestionService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> QuestionService<'a> {
    /// Create a new QuestionService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// A term's questions in form order
    pub(crate) async fn questions_for_term(&self, term_id: TermId) -> ServiceResult<Vec<Question>> {
        let find = FindMany::new(QuestionFilter::for_term(term_id))
            .order_by(QuestionOrderBy::OrderNum, SortOrder::Asc)
            .unpaged();
        Ok(self.ctx.question_repo().find_many(&find).await?)
    }

    /// Questions of a term, optionally only those shown for `roles`
    #[instrument(skip(self))]
    pub async fn list_for_term(
        &self,
        term_id: TermId,
        roles: Option<Vec<Role>>,
    ) -> ServiceResult<Vec<QuestionResponse>> {
        self.ctx.term_repo().find_unique_or_throw(term_id).await?;

        let questions = self.questions_for_term(term_id).await?;
        Ok(questions
            .iter()
            .filter(|q| roles.as_deref().is_none_or(|roles| q.applies_to(roles)))
            .map(QuestionResponse::from)
            .collect())
    }

    /// Add a question; it goes last unless `order_num` is given
    #[instrument(skip(self, request))]
    pub async fn create_question(
        &self,
        term_id: TermId,
        request: CreateQuestionRequest,
    ) -> ServiceResult<QuestionResponse> {
        request.validate()?;

        self.ctx.term_repo().find_unique_or_throw(term_id).await?;

        let order_num = match request.order_num {
            Some(order_num) => order_num,
            None => next_order_num(self.ctx.question_repo().max_order_num(term_id).await?),
        };

        let new_question = request.into_new_question(term_id, order_num);
        let question = self.ctx.question_repo().create(&new_question).await?;

        info!(
            term_id = %term_id,
            question_id = %question.id,
            slug = %question.question_id,
            "Question created"
        );

        Ok(QuestionResponse::from(&question))
    }

    #[instrument(skip(self, request))]
    pub async fn update_question(
        &self,
        question_id: QuestionId,
        request: UpdateQuestionRequest,
    ) -> ServiceResult<QuestionResponse> {
        request.validate()?;

        let patch = request.into_patch();
        let question = if patch.is_empty() {
            self.ctx.question_repo().find_unique_or_throw(question_id).await?
        } else {
            let question = self.ctx.question_repo().update(question_id, &patch).await?;
            info!(question_id = %question_id, "Question updated");
            question
        };

        Ok(QuestionResponse::from(&question))
    }

    /// Delete a question; fails while answers still reference it
    #[instrument(skip(self))]
    pub async fn delete_question(&self, question_id: QuestionId) -> ServiceResult<()> {
        let question = self.ctx.question_repo().delete(question_id).await?;

        info!(question_id = %question_id, term_id = %question.term_id, "Question deleted");

        Ok(())
    }

    /// Move several questions at once; all or nothing
    #[instrument(skip(self, request))]
    pub async fn reorder(
        &self,
        term_id: TermId,
        request: ReorderQuestionsRequest,
    ) -> ServiceResult<Vec<QuestionResponse>> {
        request.validate()?;

        let positions: Vec<(QuestionId, i32)> = request
            .positions
            .iter()
            .map(|p| (p.id, p.order_num))
            .collect();
        check_positions(&positions)?;

        self.ctx.question_repo().reorder(term_id, &positions).await?;

        info!(term_id = %term_id, moved = positions.len(), "Questions reordered");

        let questions = self.questions_for_term(term_id).await?;
        Ok(questions.iter().map(QuestionResponse::from).collect())
    }
}

/// Position after the current last question
fn next_order_num(max: Option<i32>) -> i32 {
    max.map_or(0, |m| m.saturating_add(1))
}

/// Each question may appear once, with a non-negative position
fn check_positions(positions: &[(QuestionId, i32)]) -> ServiceResult<()> {
    let mut seen = HashSet::with_capacity(positions.len());
    for (id, order_num) in positions {
        if *order_num < 0 {
            return Err(ServiceError::validation(format!(
                "order_num for question {id} must not be negative"
            )));
        }
        if !seen.insert(*id) {
            return Err(ServiceError::validation(format!(
                "question {id} listed more than once"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_order_num() {
        assert_eq!(next_order_num(None), 0);
        assert_eq!(next_order_num(Some(4)), 5);
        assert_eq!(next_order_num(Some(i32::MAX)), i32::MAX);
    }

    #[test]
    fn test_check_positions() {
        let a = QuestionId::new(1);
        let b = QuestionId::new(2);

        assert!(check_positions(&[(a, 1), (b, 0)]).is_ok());

        let dup = check_positions(&[(a, 1), (a, 2)]).unwrap_err();
        assert!(dup.to_string().contains("more than once"));

        assert!(check_positions(&[(b, -1)]).is_err());
    }
}
