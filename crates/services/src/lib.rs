#![forbid(unsafe_code)]

pub mod command;
pub mod error;
pub mod exam;
mod handlers;
pub mod io;
pub mod quiz_service;
pub mod session;
pub mod validation;

pub use quiz_core::Clock;

pub use error::{CommandError, QuizServiceError};
pub use exam::{Draw, Exam, ExamOutcome, ExamReport, RandomDraw, run_exam};
pub use handlers::AUTHORS;
pub use io::{Line, SessionIo, Span, Tone, TransportError};
pub use quiz_service::QuizService;
pub use session::{Flow, Session, SessionEnd, Shell};
pub use validation::validate_id;
