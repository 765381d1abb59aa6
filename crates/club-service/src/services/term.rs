//! Term service
//!
//! Handles recruiting terms and their application windows.

use chrono::Utc;
use club_core::entities::validate_term_deadlines;
use club_core::inputs::{TermFilter, TermOrderBy};
use club_core::{FindMany, SortOrder, TermId};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{CreateTermRequest, TermResponse, UpdateTermRequest};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Term service
pub struct TermService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TermService<'a> {
    /// Create a new TermService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Create a term; deadlines must be ordered and the name unused
    #[instrument(skip(self, request))]
    pub async fn create_term(&self, request: CreateTermRequest) -> ServiceResult<TermResponse> {
        request.validate()?;

        let new_term = request.into_new_term();
        validate_term_deadlines(
            new_term.app_release_date,
            new_term.app_soft_deadline,
            new_term.app_hard_deadline,
        )?;

        let term = self.ctx.term_repo().create(&new_term).await?;

        info!(term_id = %term.id, term_name = %term.term_name, "Term created");

        Ok(TermResponse::from(&term))
    }

    #[instrument(skip(self))]
    pub async fn get_term(&self, term_id: TermId) -> ServiceResult<TermResponse> {
        let term = self.ctx.term_repo().find_unique_or_throw(term_id).await?;
        Ok(TermResponse::from(&term))
    }

    /// Every term, most recently released first
    #[instrument(skip(self))]
    pub async fn list_terms(&self) -> ServiceResult<Vec<TermResponse>> {
        let find = FindMany::new(TermFilter::default())
            .order_by(TermOrderBy::AppReleaseDate, SortOrder::Desc)
            .unpaged();
        let terms = self.ctx.term_repo().find_many(&find).await?;
        Ok(terms.iter().map(TermResponse::from).collect())
    }

    /// The open term with the latest release date
    #[instrument(skip(self))]
    pub async fn active_term(&self) -> ServiceResult<TermResponse> {
        let term = self
            .ctx
            .term_repo()
            .find_first(
                &TermFilter::open_at(Utc::now()),
                TermOrderBy::AppReleaseDate,
                SortOrder::Desc,
            )
            .await?
            .ok_or_else(|| ServiceError::not_found("Term", "active"))?;

        Ok(TermResponse::from(&term))
    }

    /// Patch a term; the merged deadlines are revalidated
    #[instrument(skip(self, request))]
    pub async fn update_term(
        &self,
        term_id: TermId,
        request: UpdateTermRequest,
    ) -> ServiceResult<TermResponse> {
        request.validate()?;

        let repo = self.ctx.term_repo();
        let current = repo.find_unique_or_throw(term_id).await?;

        let patch = request.into_patch();
        if patch.is_empty() {
            return Ok(TermResponse::from(&current));
        }

        validate_term_deadlines(
            patch.app_release_date.unwrap_or(current.app_release_date),
            patch.app_soft_deadline.unwrap_or(current.app_soft_deadline),
            patch.app_hard_deadline.unwrap_or(current.app_hard_deadline),
        )?;

        let term = repo.update(term_id, &patch).await?;

        info!(term_id = %term_id, term_name = %term.term_name, "Term updated");

        Ok(TermResponse::from(&term))
    }

    /// Delete a term with its questions and applications
    #[instrument(skip(self))]
    pub async fn delete_term(&self, term_id: TermId) -> ServiceResult<()> {
        let term = self.ctx.term_repo().delete(term_id).await?;

        info!(term_id = %term_id, term_name = %term.term_name, "Term deleted");

        Ok(())
    }
}
