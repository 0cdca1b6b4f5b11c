use async_trait::async_trait;
use quiz_core::model::{Quiz, QuizId, ValidatedQuiz};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for quizzes.
///
/// Implementations must be safe to share between sessions; each call is
/// independent and the caller adds no locking of its own.
#[async_trait]
pub trait QuizRepository: Send + Sync {
    /// Persist a new quiz and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the quiz cannot be stored.
    async fn insert_quiz(&self, quiz: &ValidatedQuiz) -> Result<Quiz, StorageError>;

    /// All quizzes, ordered by ascending id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError>;

    /// Fetch a quiz by id. Returns `Ok(None)` when it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError>;

    /// Overwrite question, answer and `updated_at` of an existing quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the quiz no longer exists.
    async fn update_quiz(&self, quiz: &Quiz) -> Result<(), StorageError>;

    /// Remove a quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if nothing was removed.
    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError>;

    /// Number of stored quizzes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn count_quizzes(&self) -> Result<u64, StorageError>;
}

#[derive(Default)]
struct InMemoryState {
    last_id: i64,
    quizzes: BTreeMap<QuizId, Quiz>,
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Ids are assigned from a monotonically increasing counter and never reused.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<InMemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, InMemoryState>, StorageError> {
        self.state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl QuizRepository for InMemoryRepository {
    async fn insert_quiz(&self, quiz: &ValidatedQuiz) -> Result<Quiz, StorageError> {
        let mut guard = self.lock()?;
        guard.last_id += 1;
        let stored = quiz.clone().assign_id(QuizId::new(guard.last_id));
        guard.quizzes.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.quizzes.values().cloned().collect())
    }

    async fn get_quiz(&self, id: QuizId) -> Result<Option<Quiz>, StorageError> {
        let guard = self.lock()?;
        Ok(guard.quizzes.get(&id).cloned())
    }

    async fn update_quiz(&self, quiz: &Quiz) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        match guard.quizzes.get_mut(&quiz.id()) {
            Some(slot) => {
                *slot = quiz.clone();
                Ok(())
            }
            None => Err(StorageError::NotFound),
        }
    }

    async fn delete_quiz(&self, id: QuizId) -> Result<(), StorageError> {
        let mut guard = self.lock()?;
        guard
            .quizzes
            .remove(&id)
            .map(|_| ())
            .ok_or(StorageError::NotFound)
    }

    async fn count_quizzes(&self) -> Result<u64, StorageError> {
        let guard = self.lock()?;
        Ok(guard.quizzes.len() as u64)
    }
}

/// Holds the quiz repository behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub quizzes: Arc<dyn QuizRepository>,
}
