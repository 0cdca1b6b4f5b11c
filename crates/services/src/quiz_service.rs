use std::sync::Arc;

use quiz_core::model::{Quiz, QuizDraft, QuizId};
use storage::repository::{QuizRepository, StorageError};

use crate::Clock;
use crate::error::QuizServiceError;

/// Validated CRUD over the quiz repository.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    quizzes: Arc<dyn QuizRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(clock: Clock, quizzes: Arc<dyn QuizRepository>) -> Self {
        Self { clock, quizzes }
    }

    /// Validate a draft and persist it.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Validation` listing every blank field.
    /// Returns `QuizServiceError::Storage` if persistence fails.
    pub async fn create_quiz(&self, draft: QuizDraft) -> Result<Quiz, QuizServiceError> {
        let quiz = draft.validate(self.clock.now())?;
        let stored = self.quizzes.insert_quiz(&quiz).await?;
        tracing::debug!(id = %stored.id(), "quiz created");
        Ok(stored)
    }

    /// All quizzes in repository order.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn list_quizzes(&self) -> Result<Vec<Quiz>, QuizServiceError> {
        Ok(self.quizzes.list_quizzes().await?)
    }

    /// Fetch a quiz that must exist.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotFound` if there is no quiz with this id.
    /// Returns `QuizServiceError::Storage` if repository access fails.
    pub async fn get_quiz(&self, id: QuizId) -> Result<Quiz, QuizServiceError> {
        self.quizzes
            .get_quiz(id)
            .await?
            .ok_or(QuizServiceError::NotFound(id))
    }

    /// Replace question and answer of `quiz` and persist the result.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Validation` if the draft is invalid; nothing
    /// is written in that case.
    /// Returns `QuizServiceError::NotFound` if the quiz was deleted meanwhile.
    /// Returns `QuizServiceError::Storage` if persistence fails.
    pub async fn revise_quiz(
        &self,
        mut quiz: Quiz,
        draft: QuizDraft,
    ) -> Result<Quiz, QuizServiceError> {
        quiz.revise(draft, self.clock.now())?;
        self.quizzes
            .update_quiz(&quiz)
            .await
            .map_err(|e| not_found_as(e, quiz.id()))?;
        tracing::debug!(id = %quiz.id(), "quiz updated");
        Ok(quiz)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::NotFound` if nothing was deleted.
    /// Returns `QuizServiceError::Storage` if persistence fails.
    pub async fn delete_quiz(&self, id: QuizId) -> Result<(), QuizServiceError> {
        self.quizzes
            .delete_quiz(id)
            .await
            .map_err(|e| not_found_as(e, id))?;
        tracing::debug!(%id, "quiz deleted");
        Ok(())
    }
}

fn not_found_as(err: StorageError, id: QuizId) -> QuizServiceError {
    match err {
        StorageError::NotFound => QuizServiceError::NotFound(id),
        other => QuizServiceError::Storage(other),
    }
}
