//! The per-session command loop.

use tracing::Instrument;
use uuid::Uuid;

use crate::command::{CommandLine, Verb};
use crate::error::CommandError;
use crate::exam::{Draw, RandomDraw};
use crate::handlers;
use crate::io::{Line, SessionIo, Tone, TransportError};
use crate::quiz_service::QuizService;

/// What the loop does after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Why a session stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The user typed `quit`.
    Quit,
    /// Input ended: terminal EOF or the peer disconnected.
    Disconnected,
}

/// Factory for sessions sharing one quiz service.
#[derive(Clone)]
pub struct Shell {
    quizzes: QuizService,
    seed: Option<u64>,
}

impl Shell {
    #[must_use]
    pub fn new(quizzes: QuizService) -> Self {
        Self {
            quizzes,
            seed: None,
        }
    }

    /// Seed every session's exam draws with `seed` instead of OS entropy.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Open a session over `io` with its own random draws.
    pub fn session<I: SessionIo>(&self, io: I) -> Session<I, RandomDraw> {
        let draw = match self.seed {
            Some(seed) => RandomDraw::seeded(seed),
            None => RandomDraw::from_os_rng(),
        };
        self.session_with_draw(io, draw)
    }

    pub fn session_with_draw<I: SessionIo, D: Draw>(&self, io: I, draw: D) -> Session<I, D> {
        Session {
            id: Uuid::new_v4(),
            io,
            draw,
            quizzes: self.quizzes.clone(),
        }
    }
}

/// One independent shell bound to one transport.
pub struct Session<I, D> {
    id: Uuid,
    io: I,
    draw: D,
    quizzes: QuizService,
}

impl<I: SessionIo, D: Draw> Session<I, D> {
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn io(&self) -> &I {
        &self.io
    }

    pub fn into_io(self) -> I {
        self.io
    }

    /// Greet the user and serve commands until `quit` or end of input.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Io` if the transport fails for any reason
    /// other than closing.
    pub async fn run(&mut self) -> Result<SessionEnd, TransportError> {
        let span = tracing::info_span!("session", id = %self.id);
        async {
            tracing::info!("session started");
            let end = match self.serve().await {
                Ok(end) => end,
                Err(TransportError::Closed) => SessionEnd::Disconnected,
                Err(err) => {
                    tracing::warn!(error = %err, "session transport failed");
                    return Err(err);
                }
            };
            tracing::info!(?end, "session ended");
            Ok(end)
        }
        .instrument(span)
        .await
    }

    async fn serve(&mut self) -> Result<SessionEnd, TransportError> {
        self.io.write_banner("Quiz", Some(Tone::Success)).await?;
        loop {
            let line = self
                .io
                .prompt(Line::toned("quiz > ", Tone::Info), None)
                .await?;
            if self.execute(&line).await? == Flow::Quit {
                return Ok(SessionEnd::Quit);
            }
        }
    }

    /// Handle one input line.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` when the transport closes or fails; every
    /// other failure is written to the session and yields `Flow::Continue`.
    pub async fn execute(&mut self, line: &str) -> Result<Flow, TransportError> {
        let (verb, arg) = match CommandLine::parse(line) {
            CommandLine::Empty => return Ok(Flow::Continue),
            CommandLine::Unknown(word) => {
                self.io
                    .write_line(Line::error(format!("Unknown command: '{word}'")))
                    .await?;
                self.io
                    .write_line(Line::plain("Use help to see all available commands."))
                    .await?;
                return Ok(Flow::Continue);
            }
            CommandLine::Known { verb, arg } => (verb, arg),
        };

        tracing::debug!(?verb, arg = arg.as_deref(), "dispatching command");
        if verb == Verb::Quit {
            self.io.close().await?;
            return Ok(Flow::Quit);
        }

        let io: &mut dyn SessionIo = &mut self.io;
        let quizzes = &self.quizzes;
        let arg = arg.as_deref();
        let result: Result<(), CommandError> = match verb {
            Verb::Help => handlers::help(io).await,
            Verb::List => handlers::list(io, quizzes).await,
            Verb::Show => handlers::show(io, quizzes, arg).await,
            Verb::Add => handlers::add(io, quizzes).await,
            Verb::Delete => handlers::delete(quizzes, arg).await,
            Verb::Edit => handlers::edit(io, quizzes, arg).await,
            Verb::Test => handlers::test(io, quizzes, arg).await,
            Verb::Play => handlers::play(io, quizzes, &mut self.draw).await,
            Verb::Credits => handlers::credits(io).await,
            Verb::Quit => Ok(()),
        };

        if let Err(err) = result {
            handlers::report(io, err).await?;
        }
        Ok(Flow::Continue)
    }
}
