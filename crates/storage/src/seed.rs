//! Default quiz set and JSON seed files.

use chrono::{DateTime, Utc};
use quiz_core::model::{QuizDraft, QuizValidationError};
use serde::Deserialize;
use thiserror::Error;

use crate::repository::{QuizRepository, StorageError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error("invalid seed quiz #{index}: {source}")]
    Invalid {
        index: usize,
        #[source]
        source: QuizValidationError,
    },
    #[error("invalid seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Quizzes inserted into an empty store on first start.
#[must_use]
pub fn default_quizzes() -> Vec<QuizDraft> {
    vec![
        QuizDraft::new("Capital of Italy", "Rome"),
        QuizDraft::new("Capital of France", "Paris"),
        QuizDraft::new("Capital of Spain", "Madrid"),
        QuizDraft::new("Capital of Portugal", "Lisbon"),
    ]
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SeedFile {
    Bare(Vec<QuizDraft>),
    Wrapped { quizzes: Vec<QuizDraft> },
}

/// Parse a seed file: either a JSON array of `{question, answer}` objects or
/// an object with a `quizzes` array.
///
/// # Errors
///
/// Returns `SeedError::Parse` if the JSON does not match either shape.
pub fn parse_seed_file(json: &str) -> Result<Vec<QuizDraft>, SeedError> {
    let parsed: SeedFile = serde_json::from_str(json)?;
    Ok(match parsed {
        SeedFile::Bare(quizzes) | SeedFile::Wrapped { quizzes } => quizzes,
    })
}

/// Insert every draft. All drafts are validated before anything is written.
///
/// # Errors
///
/// Returns `SeedError::Invalid` for the first invalid draft, or
/// `SeedError::Storage` if an insert fails.
pub async fn insert_all(
    repo: &dyn QuizRepository,
    drafts: Vec<QuizDraft>,
    now: DateTime<Utc>,
) -> Result<usize, SeedError> {
    let mut validated = Vec::with_capacity(drafts.len());
    for (index, draft) in drafts.into_iter().enumerate() {
        let quiz = draft
            .validate(now)
            .map_err(|source| SeedError::Invalid { index, source })?;
        validated.push(quiz);
    }

    for quiz in &validated {
        repo.insert_quiz(quiz).await?;
    }
    Ok(validated.len())
}

/// Insert `drafts` only when the store holds no quizzes. Returns how many
/// were inserted.
///
/// # Errors
///
/// See [`insert_all`].
pub async fn seed_if_empty(
    repo: &dyn QuizRepository,
    drafts: Vec<QuizDraft>,
    now: DateTime<Utc>,
) -> Result<usize, SeedError> {
    if repo.count_quizzes().await? > 0 {
        return Ok(0);
    }
    let inserted = insert_all(repo, drafts, now).await?;
    tracing::info!(inserted, "seeded empty quiz store");
    Ok(inserted)
}
