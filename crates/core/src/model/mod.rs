mod ids;
mod quiz;
mod text;

pub use ids::{ParseIdError, QuizId};
pub use quiz::{
    FieldError, Quiz, QuizDraft, QuizField, QuizValidationError, ValidatedQuiz, answers_match,
};
pub use text::{Answer, AnswerText, Question, QuestionText, Text, TextError};
