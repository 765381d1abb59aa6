//! Question handlers
//!
//! A term's application form.

use axum::{extract::State, Json};
use club_core::{QuestionId, TermId};
use club_service::dto::{
    CreateQuestionRequest, ListQuestionsQuery, QuestionResponse, ReorderQuestionsRequest,
    UpdateQuestionRequest,
};
use club_service::QuestionService;

use crate::extractors::{AdminUser, AuthUser, IdPath, QueryParams, ValidatedJson};
use crate::response::{ApiError, ApiResult, Created, NoContent};
use crate::state::AppState;

/// Questions in form order; `?roles=events_exec,design_exec` keeps only those shown for the roles
///
/// GET /terms/{term_id}/questions
pub async fn list_questions(
    State(state): State<AppState>,
    _auth: AuthUser,
    IdPath(term_id): IdPath<TermId>,
    QueryParams(query): QueryParams<ListQuestionsQuery>,
) -> ApiResult<Json<Vec<QuestionResponse>>> {
    let roles = query
        .roles()
        .map_err(|e| ApiError::invalid_query(e.to_string()))?;

    let service = QuestionService::new(state.service_context());
    let response = service.list_for_term(term_id, roles).await?;
    Ok(Json(response))
}

/// POST /terms/{term_id}/questions
pub async fn create_question(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(term_id): IdPath<TermId>,
    ValidatedJson(request): ValidatedJson<CreateQuestionRequest>,
) -> ApiResult<Created<Json<QuestionResponse>>> {
    let service = QuestionService::new(state.service_context());
    let response = service.create_question(term_id, request).await?;
    Ok(Created(Json(response)))
}

/// PATCH /questions/{question_id}
pub async fn update_question(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(question_id): IdPath<QuestionId>,
    ValidatedJson(request): ValidatedJson<UpdateQuestionRequest>,
) -> ApiResult<Json<QuestionResponse>> {
    let service = QuestionService::new(state.service_context());
    let response = service.update_question(question_id, request).await?;
    Ok(Json(response))
}

/// Fails with 409 while answers still reference the question
///
/// DELETE /questions/{question_id}
pub async fn delete_question(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(question_id): IdPath<QuestionId>,
) -> ApiResult<NoContent> {
    let service = QuestionService::new(state.service_context());
    service.delete_question(question_id).await?;
    Ok(NoContent)
}

/// PUT /terms/{term_id}/questions/order
pub async fn reorder_questions(
    State(state): State<AppState>,
    _admin: AdminUser,
    IdPath(term_id): IdPath<TermId>,
    ValidatedJson(request): ValidatedJson<ReorderQuestionsRequest>,
) -> ApiResult<Json<Vec<QuestionResponse>>> {
    let service = QuestionService::new(state.service_context());
    let response = service.reorder(term_id, request).await?;
    Ok(Json(response))
}
