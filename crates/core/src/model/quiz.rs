use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{
    ids::QuizId,
    text::{AnswerText, QuestionText, TextError},
};

//
// ─── QUIZ TYPES ────────────────────────────────────────────────────────────────
//

/// Raw question/answer pair as typed by a user or read from a seed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizDraft {
    pub question: String,
    pub answer: String,
}

impl QuizDraft {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    /// Validate both fields, collecting every failure.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError` listing the question error first and the
    /// answer error second when both are blank.
    pub fn validate(self, now: DateTime<Utc>) -> Result<ValidatedQuiz, QuizValidationError> {
        let (question, answer) = self.into_texts()?;
        Ok(ValidatedQuiz {
            question,
            answer,
            created_at: now,
        })
    }

    fn into_texts(self) -> Result<(QuestionText, AnswerText), QuizValidationError> {
        let question = QuestionText::parse(self.question);
        let answer = AnswerText::parse(self.answer);

        match (question, answer) {
            (Ok(question), Ok(answer)) => Ok((question, answer)),
            (question, answer) => {
                let mut fields = Vec::with_capacity(2);
                if let Err(source) = question {
                    fields.push(FieldError {
                        field: QuizField::Question,
                        source,
                    });
                }
                if let Err(source) = answer {
                    fields.push(FieldError {
                        field: QuizField::Answer,
                        source,
                    });
                }
                Err(QuizValidationError { fields })
            }
        }
    }
}

/// A quiz that passed validation but has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedQuiz {
    question: QuestionText,
    answer: AnswerText,
    created_at: DateTime<Utc>,
}

impl ValidatedQuiz {
    #[must_use]
    pub fn question(&self) -> &str {
        self.question.as_str()
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        self.answer.as_str()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn assign_id(self, id: QuizId) -> Quiz {
        Quiz {
            id,
            question: self.question,
            answer: self.answer,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    id: QuizId,
    question: QuestionText,
    answer: AnswerText,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Quiz {
    /// Rebuild a quiz from stored columns.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError` if the stored text is blank.
    pub fn from_persisted(
        id: QuizId,
        question: String,
        answer: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Result<Self, QuizValidationError> {
        let (question, answer) = QuizDraft { question, answer }.into_texts()?;
        Ok(Self {
            id,
            question,
            answer,
            created_at,
            updated_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> QuizId {
        self.id
    }

    #[must_use]
    pub fn question(&self) -> &str {
        self.question.as_str()
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        self.answer.as_str()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Replace question and answer, keeping id and creation time.
    ///
    /// # Errors
    ///
    /// Returns `QuizValidationError` and leaves the quiz untouched if the draft
    /// is invalid.
    pub fn revise(&mut self, draft: QuizDraft, now: DateTime<Utc>) -> Result<(), QuizValidationError> {
        let (question, answer) = draft.into_texts()?;
        self.question = question;
        self.answer = answer;
        self.updated_at = now;
        Ok(())
    }

    /// Whether `given` matches the stored answer, ignoring surrounding
    /// whitespace and letter case.
    #[must_use]
    pub fn is_correct(&self, given: &str) -> bool {
        answers_match(self.answer(), given)
    }
}

/// Compare two answers after trimming and case folding.
#[must_use]
pub fn answers_match(expected: &str, given: &str) -> bool {
    expected.trim().to_lowercase() == given.trim().to_lowercase()
}

//
// ─── VALIDATION ERRORS ─────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizField {
    Question,
    Answer,
}

impl QuizField {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizField::Question => "question",
            QuizField::Answer => "answer",
        }
    }
}

impl fmt::Display for QuizField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{field}: {source}")]
pub struct FieldError {
    pub field: QuizField,
    #[source]
    pub source: TextError,
}

/// One or more field errors, in field order.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid quiz ({} field error(s))", .fields.len())]
pub struct QuizValidationError {
    pub fields: Vec<FieldError>,
}

impl QuizValidationError {
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.fields.iter()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn quiz_fails_if_question_empty() {
        let err = QuizDraft::new("   ", "ok").validate(fixed_now()).unwrap_err();
        assert_eq!(err.fields.len(), 1);
        assert_eq!(err.fields[0].field, QuizField::Question);
    }

    #[test]
    fn quiz_reports_both_fields_in_order() {
        let err = QuizDraft::new("", " ").validate(fixed_now()).unwrap_err();
        let fields: Vec<_> = err.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec![QuizField::Question, QuizField::Answer]);
        assert_eq!(err.fields[1].to_string(), "answer: text must not be empty");
    }

    #[test]
    fn valid_quiz_validates_and_assigns_id() {
        let quiz = QuizDraft::new("2+2?", "4")
            .validate(fixed_now())
            .unwrap()
            .assign_id(QuizId::new(7));

        assert_eq!(quiz.id(), QuizId::new(7));
        assert_eq!(quiz.question(), "2+2?");
        assert_eq!(quiz.answer(), "4");
        assert_eq!(quiz.created_at(), quiz.updated_at());
    }

    #[test]
    fn revise_keeps_identity_and_bumps_updated_at() {
        let mut quiz = QuizDraft::new("Q", "A")
            .validate(fixed_now())
            .unwrap()
            .assign_id(QuizId::new(1));
        let later = fixed_now() + chrono::Duration::minutes(5);

        quiz.revise(QuizDraft::new("Q2", "A2"), later).unwrap();

        assert_eq!(quiz.id(), QuizId::new(1));
        assert_eq!(quiz.question(), "Q2");
        assert_eq!(quiz.created_at(), fixed_now());
        assert_eq!(quiz.updated_at(), later);
    }

    #[test]
    fn failed_revise_leaves_quiz_untouched() {
        let mut quiz = QuizDraft::new("Q", "A")
            .validate(fixed_now())
            .unwrap()
            .assign_id(QuizId::new(1));
        let before = quiz.clone();

        assert!(quiz.revise(QuizDraft::new("Q2", ""), fixed_now()).is_err());
        assert_eq!(quiz, before);
    }

    #[test]
    fn answers_ignore_case_and_surrounding_whitespace() {
        assert!(answers_match("Answer", " Answer "));
        assert!(answers_match("Answer", "answer"));
        assert!(answers_match(" París ", "PARÍS"));
        assert!(!answers_match("Answer", "Answers"));
    }
}
