//! The seam between the command engine and a concrete transport.
//!
//! A session talks to exactly one user through a [`SessionIo`]: it asks for
//! lines with [`SessionIo::prompt`] and writes [`Line`]s and banners back. The
//! local terminal and every TCP connection implement the same trait, so the
//! handlers never know which one they are driving.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Cosmetic color hint. Transports may ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Ids, arrows and other highlights.
    Accent,
    Success,
    Danger,
    Info,
}

/// A run of text with an optional tone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub tone: Option<Tone>,
}

/// One output line made of spans.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    spans: Vec<Span>,
}

impl Line {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().push(text)
    }

    #[must_use]
    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self::new().push_toned(text, tone)
    }

    /// `Error: <message>`, all in the danger tone.
    #[must_use]
    pub fn error(message: impl fmt::Display) -> Self {
        Self::new()
            .push_toned("Error", Tone::Danger)
            .push(": ")
            .push_toned(message.to_string(), Tone::Danger)
    }

    #[must_use]
    pub fn push(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span {
            text: text.into(),
            tone: None,
        });
        self
    }

    #[must_use]
    pub fn push_toned(mut self, text: impl Into<String>, tone: Tone) -> Self {
        self.spans.push(Span {
            text: text.into(),
            tone: Some(tone),
        });
        self
    }

    #[must_use]
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }
}

/// Renders the text without tones.
impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for span in &self.spans {
            f.write_str(&span.text)?;
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The peer hung up, the terminal hit EOF, or the session was closed.
    #[error("session closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Prompt adapter and output sink for one session.
#[async_trait]
pub trait SessionIo: Send {
    /// Show `prompt` and wait for one line of input, returned trimmed.
    ///
    /// `prefill` is the current value when editing. Transports that can offer
    /// it as an editable default do so; others ignore it.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Closed` when input ends before a line arrives.
    async fn prompt(&mut self, prompt: Line, prefill: Option<&str>)
    -> Result<String, TransportError>;

    /// # Errors
    ///
    /// Returns `TransportError` if the line cannot be delivered.
    async fn write_line(&mut self, line: Line) -> Result<(), TransportError>;

    /// Write `text` in large letters.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the banner cannot be delivered.
    async fn write_banner(&mut self, text: &str, tone: Option<Tone>)
    -> Result<(), TransportError>;

    /// Flush and release the transport. Later calls fail with `Closed`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Io` if shutting down the writer fails.
    async fn close(&mut self) -> Result<(), TransportError>;
}
