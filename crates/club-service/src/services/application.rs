//! Application service
//!
//! Handles an applicant's draft, its answers, submission and admin review.

use std::collections::{HashMap, HashSet};

use chrono::Utc;
use club_core::entities::dedup_roles;
use club_core::inputs::{
    ApplicationAnswerFilter, ApplicationFilter, ApplicationOrderBy, ApplicationPatch,
    NewApplication, NewApplicationAnswer,
};
use club_core::{
    Application, ApplicationAnswer, ApplicationId, ApplicationStatus, DomainError, FindMany,
    ProfileId, Question, QuestionId, Role, SortOrder, Term, TermId,
};
use tracing::{info, instrument};
use validator::Validate;

use crate::dto::{
    page_of, AnswerInput, AnswerResponse, ApplicationResponse, ApplicationReviewResponse,
    ApplicationStatsResponse,
    ListApplicationsQuery, PaginatedResponse, SaveAnswersRequest, SetStatusRequest,
    StartApplicationRequest, UpdateApplicationRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::question::QuestionService;

/// Application service
pub struct ApplicationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ApplicationService<'a> {
    /// Create a new ApplicationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn find_own(&self, profile_id: ProfileId, term_id: TermId) -> ServiceResult<Application> {
        self.ctx
            .application_repo()
            .find_by_profile_and_term(profile_id, term_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Application", format!("term {term_id}")))
    }

    async fn open_term(&self, term_id: TermId) -> ServiceResult<Term> {
        let term = self.ctx.term_repo().find_unique_or_throw(term_id).await?;
        if !term.is_open(Utc::now()) {
            return Err(DomainError::TermClosed.into());
        }
        Ok(term)
    }

    async fn answers_of(&self, application_id: ApplicationId) -> ServiceResult<Vec<ApplicationAnswer>> {
        let find = FindMany::new(ApplicationAnswerFilter::for_application(application_id))
            .unpaged();
        Ok(self.ctx.answer_repo().find_many(&find).await?)
    }

    /// The caller's application for a term, with its answers
    #[instrument(skip(self))]
    pub async fn get_application(
        &self,
        profile_id: ProfileId,
        term_id: TermId,
    ) -> ServiceResult<ApplicationResponse> {
        let application = self.find_own(profile_id, term_id).await?;
        let answers = self.answers_of(application.id).await?;
        Ok(ApplicationResponse::from(&application).with_answers(&answers))
    }

    /// Open a draft; the term must be open and the caller must not have applied yet
    #[instrument(skip(self, request))]
    pub async fn start_application(
        &self,
        profile_id: ProfileId,
        term_id: TermId,
        request: StartApplicationRequest,
    ) -> ServiceResult<ApplicationResponse> {
        request.validate()?;

        self.ctx.profile_repo().find_unique_or_throw(profile_id).await?;
        self.open_term(term_id).await?;

        let new_application = NewApplication {
            roles_applying_for: normalize_roles(&request.roles_applying_for)?,
            resume_path: request.resume_path,
            ..NewApplication::draft(profile_id, term_id)
        };
        let application = self.ctx.application_repo().create(&new_application).await?;

        info!(
            application_id = %application.id,
            profile_id = %profile_id,
            term_id = %term_id,
            "Application started"
        );

        Ok(ApplicationResponse::from(&application).with_answers(&[]))
    }

    /// Change roles or resume while still a draft
    #[instrument(skip(self, request))]
    pub async fn update_application(
        &self,
        profile_id: ProfileId,
        term_id: TermId,
        request: UpdateApplicationRequest,
    ) -> ServiceResult<ApplicationResponse> {
        request.validate()?;

        let application = self.find_own(profile_id, term_id).await?;
        if !application.is_editable() {
            return Err(DomainError::ApplicationNotEditable.into());
        }

        let mut patch = request.into_patch();
        if let Some(roles) = patch.roles_applying_for.as_deref() {
            patch.roles_applying_for = Some(normalize_roles(roles)?);
        }

        if patch.is_empty() {
            let answers = self.answers_of(application.id).await?;
            return Ok(ApplicationResponse::from(&application).with_answers(&answers));
        }

        // Answers to questions the new roles no longer ask are removed
        let stale = match patch.roles_applying_for.as_deref() {
            Some(roles) => {
                let questions = QuestionService::new(self.ctx).questions_for_term(term_id).await?;
                let answers = self.answers_of(application.id).await?;
                stale_answers(&questions, &answers, roles)
            }
            None => Vec::new(),
        };

        let updated = self
            .ctx
            .application_repo()
            .update_and_drop_answers(application.id, &patch, &stale)
            .await?;
        info!(
            application_id = %updated.id,
            dropped_answers = stale.len(),
            "Application updated"
        );

        let answers = self.answers_of(updated.id).await?;
        Ok(ApplicationResponse::from(&updated).with_answers(&answers))
    }

    /// Save answers to a draft; every answer is checked against its question
    /// and the whole batch is written atomically
    #[instrument(skip(self, request))]
    pub async fn save_answers(
        &self,
        profile_id: ProfileId,
        term_id: TermId,
        request: SaveAnswersRequest,
    ) -> ServiceResult<Vec<AnswerResponse>> {
        request.validate()?;

        let application = self.find_own(profile_id, term_id).await?;
        if !application.is_editable() {
            return Err(DomainError::ApplicationNotEditable.into());
        }
        self.open_term(term_id).await?;

        let questions = QuestionService::new(self.ctx).questions_for_term(term_id).await?;
        let answers = build_answers(
            application.id,
            &questions,
            &application.roles_applying_for,
            request.answers,
        )?;

        let saved = self.ctx.answer_repo().upsert_many(&answers).await?;

        info!(
            application_id = %application.id,
            answers = saved.len(),
            "Answers saved"
        );

        Ok(saved.iter().map(AnswerResponse::from).collect())
    }

    /// Submit a draft while the term is open and every required question is answered
    #[instrument(skip(self))]
    pub async fn submit_application(
        &self,
        profile_id: ProfileId,
        term_id: TermId,
    ) -> ServiceResult<ApplicationResponse> {
        let application = self.find_own(profile_id, term_id).await?;
        if !application.is_editable() {
            return Err(DomainError::ApplicationNotEditable.into());
        }
        self.open_term(term_id).await?;

        if application.roles_applying_for.is_empty() {
            return Err(ServiceError::validation(
                "Select at least one role before submitting",
            ));
        }

        let questions = QuestionService::new(self.ctx).questions_for_term(term_id).await?;
        let answers = self.answers_of(application.id).await?;
        let missing =
            missing_required_answers(&questions, &answers, &application.roles_applying_for);
        if !missing.is_empty() {
            return Err(DomainError::MissingRequiredAnswers(missing).into());
        }

        let submitted = self
            .ctx
            .application_repo()
            .submit(application.id, Utc::now())
            .await?;

        info!(
            application_id = %submitted.id,
            profile_id = %profile_id,
            term_id = %term_id,
            "Application submitted"
        );

        Ok(ApplicationResponse::from(&submitted).with_answers(&answers))
    }

    /// Admin list of a term's applications, latest submissions first
    #[instrument(skip(self))]
    pub async fn list_applications(
        &self,
        term_id: TermId,
        query: ListApplicationsQuery,
    ) -> ServiceResult<PaginatedResponse<ApplicationResponse>> {
        self.ctx.term_repo().find_unique_or_throw(term_id).await?;

        let filter = ApplicationFilter {
            status: query.status.map(|s| vec![s]),
            role: query.role,
            submitted: query.submitted,
            ..ApplicationFilter::for_term(term_id)
        };
        let page = page_of(query.take, query.skip);

        let repo = self.ctx.application_repo();
        let find = FindMany::new(filter)
            .order_by(ApplicationOrderBy::SubmittedAt, SortOrder::Desc)
            .page(page);
        let applications = repo.find_many(&find).await?;
        let total = repo.count(&find.filter).await?;

        Ok(PaginatedResponse::new(
            applications.iter().map(ApplicationResponse::from).collect(),
            total,
            page,
        ))
    }

    /// One application with its answers and the applicant's profile
    #[instrument(skip(self))]
    pub async fn get_application_for_review(
        &self,
        application_id: ApplicationId,
    ) -> ServiceResult<ApplicationReviewResponse> {
        let application = self
            .ctx
            .application_repo()
            .find_unique_or_throw(application_id)
            .await?;
        let applicant = self
            .ctx
            .profile_repo()
            .find_unique_or_throw(application.profile_id)
            .await?;
        let answers = self.answers_of(application.id).await?;

        Ok(ApplicationReviewResponse::new(&application, &answers, &applicant))
    }

    /// Record a review decision
    #[instrument(skip(self, request))]
    pub async fn set_status(
        &self,
        application_id: ApplicationId,
        request: SetStatusRequest,
    ) -> ServiceResult<ApplicationResponse> {
        request.validate()?;

        let application = self
            .ctx
            .application_repo()
            .find_unique_or_throw(application_id)
            .await?;
        application.ensure_transition(request.status)?;

        let patch = ApplicationPatch {
            status: Some(request.status),
            comments: request.comments.map(Some),
            submitted_at: (request.status == ApplicationStatus::Submitted
                && application.submitted_at.is_none())
            .then(|| Some(Utc::now())),
            ..ApplicationPatch::default()
        };
        let updated = self
            .ctx
            .application_repo()
            .update(application_id, &patch)
            .await?;

        info!(
            application_id = %application_id,
            from = %application.status,
            to = %updated.status,
            "Application status changed"
        );

        Ok(ApplicationResponse::from(&updated))
    }

    /// Totals and per-status counts for a term
    #[instrument(skip(self))]
    pub async fn status_counts(&self, term_id: TermId) -> ServiceResult<ApplicationStatsResponse> {
        self.ctx.term_repo().find_unique_or_throw(term_id).await?;

        let filter = ApplicationFilter::for_term(term_id);
        let repo = self.ctx.application_repo();
        Ok(ApplicationStatsResponse {
            totals: repo.aggregate(&filter).await?,
            by_status: repo.group_by_status(&filter).await?,
        })
    }
}

/// Roles an applicant can pick are real positions, each listed once
fn normalize_roles(roles: &[Role]) -> ServiceResult<Vec<Role>> {
    if let Some(shared) = roles.iter().find(|r| r.is_shared()) {
        return Err(ServiceError::validation(format!(
            "'{shared}' is not a position that can be applied for"
        )));
    }
    Ok(dedup_roles(roles))
}

/// Turn request answers into rows, checking each against its question
fn build_answers(
    application_id: ApplicationId,
    questions: &[Question],
    roles: &[Role],
    inputs: Vec<AnswerInput>,
) -> ServiceResult<Vec<NewApplicationAnswer>> {
    let by_id: HashMap<QuestionId, &Question> = questions.iter().map(|q| (q.id, q)).collect();
    let mut seen = HashSet::with_capacity(inputs.len());

    inputs
        .into_iter()
        .map(|input| {
            let question = by_id
                .get(&input.question_id)
                .copied()
                .ok_or(DomainError::QuestionNotFound(input.question_id))?;
            if !seen.insert(question.id) {
                return Err(ServiceError::validation(format!(
                    "question '{}' answered more than once",
                    question.question_id
                )));
            }
            if !question.applies_to(roles) {
                return Err(DomainError::InvalidAnswer {
                    question_id: question.question_id.clone(),
                    reason: "question is not asked for the selected roles".to_string(),
                }
                .into());
            }

            let answer = input.into_new_answer(application_id);
            answer.slots().validate_against(question)?;
            Ok(answer)
        })
        .collect()
}

/// Questions that have an answer but are not asked for `roles`
fn stale_answers(
    questions: &[Question],
    answers: &[ApplicationAnswer],
    roles: &[Role],
) -> Vec<QuestionId> {
    let asked: HashSet<QuestionId> = questions
        .iter()
        .filter(|q| q.applies_to(roles))
        .map(|q| q.id)
        .collect();

    answers
        .iter()
        .map(|a| a.question_id)
        .filter(|id| !asked.contains(id))
        .collect()
}

/// Slugs of required questions for `roles` with no usable answer
fn missing_required_answers(
    questions: &[Question],
    answers: &[ApplicationAnswer],
    roles: &[Role],
) -> Vec<String> {
    let answers: HashMap<QuestionId, &ApplicationAnswer> =
        answers.iter().map(|a| (a.question_id, a)).collect();

    questions
        .iter()
        .filter(|q| q.is_required_for(roles))
        .filter(|q| {
            !answers
                .get(&q.id)
                .is_some_and(|a| a.is_answered(q.question_type))
        })
        .map(|q| q.question_id.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use club_core::{AnswerId, QuestionType};

    fn question(id: i64, slug: &str, role: Role, qtype: QuestionType, required: bool) -> Question {
        Question {
            id: QuestionId::new(id),
            term_id: TermId::new(1),
            question_id: slug.to_string(),
            role,
            question_type: qtype,
            question: format!("{slug}?"),
            is_required: required,
            order_num: id as i32,
            max_length: Some(20),
            placeholder: None,
            help_text: None,
        }
    }

    fn text_answer(question_id: i64, text: &str) -> ApplicationAnswer {
        let now = Utc::now();
        ApplicationAnswer {
            id: AnswerId::new(question_id * 10),
            application_id: ApplicationId::new(1),
            question_id: QuestionId::new(question_id),
            answer_text: Some(text.to_string()),
            answer_option: None,
            answer_options: vec![],
            answer_file: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn input(question_id: i64, text: &str) -> AnswerInput {
        AnswerInput {
            question_id: QuestionId::new(question_id),
            answer_text: Some(text.to_string()),
            answer_option: None,
            answer_options: vec![],
            answer_file: None,
        }
    }

    fn form() -> Vec<Question> {
        vec![
            question(1, "why_join", Role::General, QuestionType::Textarea, true),
            question(2, "event_idea", Role::EventsExec, QuestionType::Text, true),
            question(3, "portfolio", Role::DesignExec, QuestionType::FileUpload, true),
            question(4, "fun_fact", Role::Supplementary, QuestionType::Text, false),
        ]
    }

    #[test]
    fn test_normalize_roles() {
        let roles = normalize_roles(&[Role::EventsExec, Role::DesignExec, Role::EventsExec]).unwrap();
        assert_eq!(roles, vec![Role::EventsExec, Role::DesignExec]);

        assert!(normalize_roles(&[Role::General]).is_err());
    }

    #[test]
    fn test_missing_required_answers() {
        let questions = form();
        let roles = [Role::EventsExec];

        let none = missing_required_answers(&questions, &[], &roles);
        assert_eq!(none, vec!["why_join", "event_idea"]);

        // Blank text does not count as answered
        let answers = vec![text_answer(1, "I like math"), text_answer(2, "   ")];
        assert_eq!(
            missing_required_answers(&questions, &answers, &roles),
            vec!["event_idea"]
        );

        let answers = vec![text_answer(1, "I like math"), text_answer(2, "Trivia")];
        assert!(missing_required_answers(&questions, &answers, &roles).is_empty());
    }

    #[test]
    fn test_stale_answers_after_narrowing_roles() {
        let questions = form();
        let answers = vec![
            text_answer(1, "I like math"),
            text_answer(2, "Trivia"),
            text_answer(3, "dribbble.com/me"),
            text_answer(4, "Cats"),
        ];

        // Dropping DesignExec leaves the portfolio answer behind
        let stale = stale_answers(&questions, &answers, &[Role::EventsExec]);
        assert_eq!(stale, vec![QuestionId::new(3)]);

        // Shared questions always stay
        let stale = stale_answers(&questions, &answers, &[]);
        assert_eq!(stale, vec![QuestionId::new(2), QuestionId::new(3)]);

        let both = [Role::EventsExec, Role::DesignExec];
        assert!(stale_answers(&questions, &answers, &both).is_empty());
    }

    #[test]
    fn test_build_answers_checks_questions() {
        let questions = form();
        let roles = [Role::EventsExec];
        let app = ApplicationId::new(1);

        let ok = build_answers(app, &questions, &roles, vec![input(1, "Hi"), input(4, "Cats")]);
        assert_eq!(ok.unwrap().len(), 2);

        // Unknown question
        let err = build_answers(app, &questions, &roles, vec![input(99, "x")]).unwrap_err();
        assert_eq!(err.error_code(), "UNKNOWN_QUESTION");

        // Same question twice
        let err =
            build_answers(app, &questions, &roles, vec![input(1, "a"), input(1, "b")]).unwrap_err();
        assert_eq!(err.status_code(), 400);

        // Question for a role not applied for
        let err = build_answers(app, &questions, &roles, vec![input(3, "x")]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ANSWER");

        // Over max_length
        let long = "x".repeat(21);
        let err = build_answers(app, &questions, &roles, vec![input(2, &long)]).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_ANSWER");
    }
}
