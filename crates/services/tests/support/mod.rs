#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::{Quiz, QuizDraft, QuizId, ValidatedQuiz};
use quiz_core::time::fixed_clock;
use services::{Draw, Line, QuizService, SessionIo, Shell, Tone, TransportError};
use storage::repository::{InMemoryRepository, QuizRepository, StorageError};

/// Everything a session did to its transport, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Prompt {
        text: String,
        prefill: Option<String>,
    },
    Line(String),
    Banner(String),
    Closed,
}

/// Replays canned input lines and records output. Runs dry like a closed
/// socket once the script is exhausted.
#[derive(Debug, Default)]
pub struct ScriptedIo {
    inputs: VecDeque<String>,
    pub events: Vec<Event>,
    closed: bool,
}

impl ScriptedIo {
    pub fn new<S: Into<String>>(inputs: impl IntoIterator<Item = S>) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            events: Vec::new(),
            closed: false,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Line(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn banners(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Banner(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn prompts(&self) -> Vec<(String, Option<String>)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Prompt { text, prefill } => Some((text.clone(), prefill.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn unread(&self) -> usize {
        self.inputs.len()
    }
}

#[async_trait]
impl SessionIo for ScriptedIo {
    async fn prompt(
        &mut self,
        prompt: Line,
        prefill: Option<&str>,
    ) -> Result<String, TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.events.push(Event::Prompt {
            text: prompt.to_string(),
            prefill: prefill.map(str::to_owned),
        });
        self.inputs
            .pop_front()
            .map(|line| line.trim().to_owned())
            .ok_or(TransportError::Closed)
    }

    async fn write_line(&mut self, line: Line) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.events.push(Event::Line(line.to_string()));
        Ok(())
    }

    async fn write_banner(
        &mut self,
        text: &str,
        _tone: Option<Tone>,
    ) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.events.push(Event::Banner(text.to_owned()));
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.closed = true;
        self.events.push(Event::Closed);
        Ok(())
    }
}

/// Answers exam prompts from a question → answer table, getting the
/// `wrong_at`-th question (1-based) wrong on purpose.
pub struct OracleIo {
    answers: HashMap<String, String>,
    wrong_at: Option<usize>,
    pub asked: Vec<String>,
    pub lines: Vec<String>,
}

impl OracleIo {
    pub fn new(quizzes: &[Quiz], wrong_at: Option<usize>) -> Self {
        Self {
            answers: quizzes
                .iter()
                .map(|q| (format!("{}? ", q.question()), q.answer().to_owned()))
                .collect(),
            wrong_at,
            asked: Vec::new(),
            lines: Vec::new(),
        }
    }
}

#[async_trait]
impl SessionIo for OracleIo {
    async fn prompt(
        &mut self,
        prompt: Line,
        _prefill: Option<&str>,
    ) -> Result<String, TransportError> {
        let text = prompt.to_string();
        self.asked.push(text.clone());
        if Some(self.asked.len()) == self.wrong_at {
            return Ok("definitely wrong".to_owned());
        }
        self.answers
            .get(&text)
            .cloned()
            .ok_or(TransportError::Closed)
    }

    async fn write_line(&mut self, line: Line) -> Result<(), TransportError> {
        self.lines.push(line.to_string());
        Ok(())
    }

    async fn write_banner(&mut self, _: &str, _: Option<Tone>) -> Result<(), TransportError> {
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}

/// Returns pre-recorded indices, then falls back to the first element.
pub struct ScriptedDraw(pub VecDeque<usize>);

impl ScriptedDraw {
    pub fn new(indices: impl IntoIterator<Item = usize>) -> Self {
        Self(indices.into_iter().collect())
    }
}

impl Draw for ScriptedDraw {
    fn draw(&mut self, _len: usize) -> usize {
        self.0.pop_front().unwrap_or(0)
    }
}

/// A repository whose every call fails.
pub struct FailingRepository;

fn down() -> StorageError {
    StorageError::Connection("database is down".into())
}

#[async_trait]
impl QuizRepository for FailingRepository {
    async fn insert_quiz(&self, _: &ValidatedQuiz) -> Result<Quiz, StorageError> {
        Err(down())
    }
    async fn list_quizzes(&self) -> Result<Vec<Quiz>, StorageError> {
        Err(down())
    }
    async fn get_quiz(&self, _: QuizId) -> Result<Option<Quiz>, StorageError> {
        Err(down())
    }
    async fn update_quiz(&self, _: &Quiz) -> Result<(), StorageError> {
        Err(down())
    }
    async fn delete_quiz(&self, _: QuizId) -> Result<(), StorageError> {
        Err(down())
    }
    async fn count_quizzes(&self) -> Result<u64, StorageError> {
        Err(down())
    }
}

/// An in-memory shell pre-loaded with `quizzes`, plus a handle on its store.
pub async fn shell_with(quizzes: &[(&str, &str)]) -> (Shell, InMemoryRepository) {
    let repo = InMemoryRepository::new();
    let service = QuizService::new(fixed_clock(), Arc::new(repo.clone()));
    for (question, answer) in quizzes {
        service
            .create_quiz(QuizDraft::new(*question, *answer))
            .await
            .expect("seed quiz");
    }
    (Shell::new(service), repo)
}

pub fn failing_shell() -> Shell {
    Shell::new(QuizService::new(fixed_clock(), Arc::new(FailingRepository)))
}
