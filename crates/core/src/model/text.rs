use std::fmt;
use std::marker::PhantomData;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TextError {
    #[error("text must not be empty")]
    Empty,
}

/// Non-empty text tagged with the quiz field it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text<T>(String, PhantomData<T>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question;
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer;

pub type QuestionText = Text<Question>;
pub type AnswerText = Text<Answer>;

impl<T> Text<T> {
    /// Accepts any string with at least one non-whitespace character.
    ///
    /// The text is stored as given; trimming only decides emptiness.
    pub fn parse(s: impl Into<String>) -> Result<Self, TextError> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(s, PhantomData))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl<T> fmt::Display for Text<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
