//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use chrono::Utc;
use club_core::{
    Application, ApplicationAnswer, Event, EventAttendance, Profile, Question, Term,
};

use super::responses::{
    AnswerResponse, ApplicationResponse, ApplicationReviewResponse, AttendanceResponse,
    EventResponse, ProfileResponse, QuestionResponse, TermResponse,
};

// ============================================================================
// Profile Mappers
// ============================================================================

impl From<&Profile> for ProfileResponse {
    fn from(p: &Profile) -> Self {
        Self {
            id: p.id,
            first_name: p.first_name.clone(),
            last_name: p.last_name.clone(),
            user_status: p.user_status,
            has_paid: p.has_paid,
            wat_iam: p.wat_iam.clone(),
            faculty: p.faculty,
            term: p.term.clone(),
            heard_from_where: p.heard_from_where.clone(),
            payment_method: p.payment_method,
            payment_location: p.payment_location.clone(),
            verifier: p.verifier.clone(),
            member_ideas: p.member_ideas.clone(),
            is_math_soc_member: p.is_math_soc_member,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

impl From<Profile> for ProfileResponse {
    fn from(p: Profile) -> Self {
        Self::from(&p)
    }
}

// ============================================================================
// Term Mappers
// ============================================================================

impl From<&Term> for TermResponse {
    fn from(t: &Term) -> Self {
        Self {
            id: t.id,
            term_name: t.term_name.clone(),
            app_release_date: t.app_release_date,
            app_soft_deadline: t.app_soft_deadline,
            app_hard_deadline: t.app_hard_deadline,
            is_open: t.is_open(Utc::now()),
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

impl From<Term> for TermResponse {
    fn from(t: Term) -> Self {
        Self::from(&t)
    }
}

// ============================================================================
// Question Mappers
// ============================================================================

impl From<&Question> for QuestionResponse {
    fn from(q: &Question) -> Self {
        Self {
            id: q.id,
            term_id: q.term_id,
            question_id: q.question_id.clone(),
            role: q.role,
            question_type: q.question_type,
            question: q.question.clone(),
            is_required: q.is_required,
            order_num: q.order_num,
            max_length: q.max_length,
            placeholder: q.placeholder.clone(),
            help_text: q.help_text.clone(),
        }
    }
}

impl From<Question> for QuestionResponse {
    fn from(q: Question) -> Self {
        Self::from(&q)
    }
}

// ============================================================================
// Application Mappers
// ============================================================================

impl From<&ApplicationAnswer> for AnswerResponse {
    fn from(a: &ApplicationAnswer) -> Self {
        Self {
            id: a.id,
            question_id: a.question_id,
            answer_text: a.answer_text.clone(),
            answer_option: a.answer_option.clone(),
            answer_options: a.answer_options.clone(),
            answer_file: a.answer_file.clone(),
            updated_at: a.updated_at,
        }
    }
}

impl From<ApplicationAnswer> for AnswerResponse {
    fn from(a: ApplicationAnswer) -> Self {
        Self::from(&a)
    }
}

impl From<&Application> for ApplicationResponse {
    fn from(a: &Application) -> Self {
        Self {
            id: a.id,
            profile_id: a.profile_id,
            term_id: a.term_id,
            roles_applying_for: a.roles_applying_for.clone(),
            resume_path: a.resume_path.clone(),
            status: a.status,
            comments: a.comments.clone(),
            created_at: a.created_at,
            updated_at: a.updated_at,
            submitted_at: a.submitted_at,
            answers: None,
        }
    }
}

impl From<Application> for ApplicationResponse {
    fn from(a: Application) -> Self {
        Self::from(&a)
    }
}

impl ApplicationResponse {
    pub fn with_answers(mut self, answers: &[ApplicationAnswer]) -> Self {
        self.answers = Some(answers.iter().map(AnswerResponse::from).collect());
        self
    }
}

impl ApplicationReviewResponse {
    pub fn new(
        application: &Application,
        answers: &[ApplicationAnswer],
        applicant: &Profile,
    ) -> Self {
        Self {
            application: ApplicationResponse::from(application).with_answers(answers),
            applicant: ProfileResponse::from(applicant),
        }
    }
}

// ============================================================================
// Event Mappers
// ============================================================================

impl From<&Event> for EventResponse {
    fn from(e: &Event) -> Self {
        Self {
            id: e.id,
            name: e.name.clone(),
            registration_required: e.registration_required,
            description: e.description.clone(),
            location: e.location.clone(),
            start_time: e.start_time,
            buffered_start_time: e.buffered_start_time,
            end_time: e.end_time,
            buffered_end_time: e.buffered_end_time,
            payment_required: e.payment_required,
            image_id: e.image_id,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

impl From<Event> for EventResponse {
    fn from(e: Event) -> Self {
        Self::from(&e)
    }
}

impl From<&EventAttendance> for AttendanceResponse {
    fn from(a: &EventAttendance) -> Self {
        Self {
            id: a.id,
            event_id: a.event_id,
            profile_id: a.profile_id,
            checked_in: a.checked_in,
            created_at: a.created_at,
        }
    }
}

impl From<EventAttendance> for AttendanceResponse {
    fn from(a: EventAttendance) -> Self {
        Self::from(&a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use club_core::{
        AnswerId, ApplicationId, ApplicationStatus, EventId, Faculty, PaymentMethod, ProfileId,
        QuestionId, Role, TermId, UserStatus,
    };

    #[test]
    fn test_term_response_is_open() {
        let now = Utc::now();
        let term = Term {
            id: TermId::new(3),
            term_name: "W26".to_string(),
            app_release_date: now - Duration::days(1),
            app_soft_deadline: now + Duration::days(5),
            app_hard_deadline: now + Duration::days(7),
            created_at: now,
            updated_at: now,
        };
        let response = TermResponse::from(&term);
        assert!(response.is_open);
        assert_eq!(response.term_name, "W26");
    }

    #[test]
    fn test_application_response_answers() {
        let now = Utc::now();
        let application = Application {
            id: ApplicationId::new(10),
            profile_id: ProfileId::new_v4(),
            term_id: TermId::new(3),
            roles_applying_for: vec![Role::EventsExec],
            resume_path: None,
            status: ApplicationStatus::Draft,
            comments: None,
            created_at: now,
            updated_at: now,
            submitted_at: None,
        };

        let bare = ApplicationResponse::from(&application);
        let json = serde_json::to_value(&bare).unwrap();
        assert!(json.get("answers").is_none());
        assert_eq!(json["status"], "draft");
        assert_eq!(json["roles_applying_for"][0], "events_exec");

        let with = bare.with_answers(&[]);
        assert_eq!(with.answers.map(|a| a.len()), Some(0));
    }

    #[test]
    fn test_application_review_response() {
        let now = Utc::now();
        let applicant = Profile {
            id: ProfileId::new_v4(),
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            user_status: UserStatus::Member,
            has_paid: true,
            wat_iam: Some("ghopper".to_string()),
            faculty: Faculty::Math,
            term: "3A".to_string(),
            heard_from_where: "Clubs fair".to_string(),
            payment_method: PaymentMethod::Online,
            payment_location: None,
            verifier: None,
            member_ideas: None,
            is_math_soc_member: true,
            created_at: now,
            updated_at: now,
        };
        let application = Application {
            id: ApplicationId::new(11),
            profile_id: applicant.id,
            term_id: TermId::new(3),
            roles_applying_for: vec![Role::DesignExec],
            resume_path: Some("resumes/grace.pdf".to_string()),
            status: ApplicationStatus::Submitted,
            comments: None,
            created_at: now,
            updated_at: now,
            submitted_at: Some(now),
        };
        let answer = ApplicationAnswer {
            id: AnswerId::new(5),
            application_id: application.id,
            question_id: QuestionId::new(2),
            answer_text: Some("Posters".to_string()),
            answer_option: None,
            answer_options: vec![],
            answer_file: None,
            created_at: now,
            updated_at: now,
        };

        let review = ApplicationReviewResponse::new(&application, &[answer], &applicant);
        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["id"], "11");
        assert_eq!(json["status"], "submitted");
        assert_eq!(json["answers"][0]["answer_text"], "Posters");
        assert_eq!(json["applicant"]["first_name"], "Grace");
        assert_eq!(json["applicant"]["wat_iam"], "ghopper");
    }

    #[test]
    fn test_event_response_ids_as_strings() {
        let now = Utc::now();
        let event = Event {
            id: EventId::new(42),
            name: "Hack Night".to_string(),
            registration_required: false,
            description: None,
            location: Some("MC 3003".to_string()),
            start_time: now,
            buffered_start_time: now,
            end_time: now + Duration::hours(2),
            buffered_end_time: now + Duration::hours(2),
            payment_required: false,
            image_id: None,
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(EventResponse::from(event)).unwrap();
        assert_eq!(json["id"], "42");
        assert!(json.get("image_id").is_none());
    }
}
