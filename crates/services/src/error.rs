//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{QuizId, QuizValidationError};
use storage::repository::StorageError;

use crate::io::TransportError;

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("there is no quiz with id={0}")]
    NotFound(QuizId),
    #[error(transparent)]
    Validation(#[from] QuizValidationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Everything a command handler can fail with.
///
/// All variants except `Transport` are reported to the user and the session
/// carries on; `Transport` ends the session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CommandError {
    #[error("missing parameter <id>")]
    MissingParameter,
    #[error("the value of parameter <id> is not a number")]
    NotANumber,
    #[error("there is no quiz with id={0}")]
    NotFound(QuizId),
    #[error(transparent)]
    Validation(QuizValidationError),
    #[error(transparent)]
    Storage(StorageError),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl From<QuizServiceError> for CommandError {
    fn from(err: QuizServiceError) -> Self {
        match err {
            QuizServiceError::NotFound(id) => CommandError::NotFound(id),
            QuizServiceError::Validation(e) => CommandError::Validation(e),
            QuizServiceError::Storage(e) => CommandError::Storage(e),
        }
    }
}
