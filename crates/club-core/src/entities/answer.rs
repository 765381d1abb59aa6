//! ApplicationAnswer entity - an applicant's response to one question

use chrono::{DateTime, Utc};

use crate::entities::Question;
use crate::error::DomainError;
use crate::value_objects::{AnswerId, ApplicationId, QuestionId, QuestionType};

/// ApplicationAnswer entity (unique per application + question)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationAnswer {
    pub id: AnswerId,
    pub application_id: ApplicationId,
    pub question_id: QuestionId,
    pub answer_text: Option<String>,
    /// Single-choice selection
    pub answer_option: Option<String>,
    /// Multi-choice / checkbox selections
    pub answer_options: Vec<String>,
    /// Storage path of an uploaded file
    pub answer_file: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ApplicationAnswer {
    /// Whether the slot matching `question_type` holds a non-blank value
    pub fn is_answered(&self, question_type: QuestionType) -> bool {
        AnswerSlots::from(self).is_answered(question_type)
    }

    pub fn validate_against(&self, question: &Question) -> Result<(), DomainError> {
        if question.id != self.question_id {
            return Err(DomainError::ValidationError(format!(
                "answer belongs to question {}, not {}",
                self.question_id, question.id
            )));
        }
        AnswerSlots::from(self).validate_against(question)
    }
}

/// The four answer slots, borrowed from either a stored answer or an input
#[derive(Debug, Clone, Copy)]
pub struct AnswerSlots<'a> {
    pub text: Option<&'a str>,
    pub option: Option<&'a str>,
    pub options: &'a [String],
    pub file: Option<&'a str>,
}

impl<'a> From<&'a ApplicationAnswer> for AnswerSlots<'a> {
    fn from(answer: &'a ApplicationAnswer) -> Self {
        Self {
            text: answer.answer_text.as_deref(),
            option: answer.answer_option.as_deref(),
            options: &answer.answer_options,
            file: answer.answer_file.as_deref(),
        }
    }
}

fn filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

impl AnswerSlots<'_> {
    pub fn is_answered(&self, question_type: QuestionType) -> bool {
        match question_type {
            QuestionType::Text | QuestionType::Textarea | QuestionType::Date | QuestionType::Number => {
                filled(self.text)
            }
            QuestionType::MultipleChoice => filled(self.option),
            QuestionType::Checkbox => self.options.iter().any(|o| !o.trim().is_empty()),
            QuestionType::FileUpload => filled(self.file),
        }
    }

    /// Check the answer uses the slot its question expects and respects limits
    pub fn validate_against(&self, question: &Question) -> Result<(), DomainError> {
        let invalid = |msg: &str| {
            Err(DomainError::InvalidAnswer {
                question_id: question.question_id.clone(),
                reason: msg.to_string(),
            })
        };

        let (uses_text, uses_option, uses_options, uses_file) = (
            self.text.is_some(),
            self.option.is_some(),
            !self.options.is_empty(),
            self.file.is_some(),
        );

        match question.question_type {
            QuestionType::Text | QuestionType::Textarea | QuestionType::Date | QuestionType::Number => {
                if uses_option || uses_options || uses_file {
                    return invalid("expected a text answer");
                }
                if let (Some(text), Some(max)) = (self.text, question.max_length) {
                    if text.chars().count() > usize::try_from(max).unwrap_or(0) {
                        return invalid(&format!("answer exceeds {max} characters"));
                    }
                }
                if question.question_type == QuestionType::Number {
                    if let Some(text) = self.text.filter(|t| !t.trim().is_empty()) {
                        if text.trim().parse::<f64>().is_err() {
                            return invalid("expected a number");
                        }
                    }
                }
                if question.question_type == QuestionType::Date {
                    if let Some(text) = self.text.filter(|t| !t.trim().is_empty()) {
                        if chrono::NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").is_err() {
                            return invalid("expected a date (YYYY-MM-DD)");
                        }
                    }
                }
            }
            QuestionType::MultipleChoice => {
                if uses_text || uses_options || uses_file {
                    return invalid("expected a single option");
                }
            }
            QuestionType::Checkbox => {
                if uses_text || uses_option || uses_file {
                    return invalid("expected a list of options");
                }
            }
            QuestionType::FileUpload => {
                if uses_text || uses_option || uses_options {
                    return invalid("expected a file");
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value_objects::{Role, TermId};

    fn question(question_type: QuestionType, max_length: Option<i32>) -> Question {
        Question {
            id: QuestionId::new(3),
            term_id: TermId::new(1),
            question_id: "q".to_string(),
            role: Role::General,
            question_type,
            question: "?".to_string(),
            is_required: true,
            order_num: 0,
            max_length,
            placeholder: None,
            help_text: None,
        }
    }

    fn text(value: &str) -> AnswerSlots<'_> {
        AnswerSlots {
            text: Some(value),
            option: None,
            options: &[],
            file: None,
        }
    }

    #[test]
    fn test_text_answer_length() {
        let q = question(QuestionType::Textarea, Some(5));
        assert!(text("hello").validate_against(&q).is_ok());

        let err = text("hello!").validate_against(&q).unwrap_err();
        assert_eq!(err.code(), "INVALID_ANSWER");
    }

    #[test]
    fn test_wrong_slot_rejected() {
        let q = question(QuestionType::MultipleChoice, None);
        assert!(text("a").validate_against(&q).is_err());

        let slots = AnswerSlots {
            text: None,
            option: Some("a"),
            options: &[],
            file: None,
        };
        assert!(slots.validate_against(&q).is_ok());
        assert!(slots.is_answered(QuestionType::MultipleChoice));
    }

    #[test]
    fn test_number_and_date_answers() {
        assert!(text("42.5").validate_against(&question(QuestionType::Number, None)).is_ok());
        assert!(text("many").validate_against(&question(QuestionType::Number, None)).is_err());
        assert!(text("2025-09-01").validate_against(&question(QuestionType::Date, None)).is_ok());
        assert!(text("tomorrow").validate_against(&question(QuestionType::Date, None)).is_err());
    }

    #[test]
    fn test_checkbox_answered() {
        let options = vec!["a".to_string(), String::new()];
        let slots = AnswerSlots {
            text: None,
            option: None,
            options: &options,
            file: None,
        };
        assert!(slots.is_answered(QuestionType::Checkbox));
        assert!(!slots.is_answered(QuestionType::FileUpload));
        assert!(!text("   ").is_answered(QuestionType::Text));
    }
}
