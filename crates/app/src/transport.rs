//! Line-oriented `SessionIo` over any async byte stream.
//!
//! The local terminal (stdin/stdout) and every accepted TCP connection use
//! the same [`LineTransport`]; they only differ in how `prefill` is offered.

use std::io;

use async_trait::async_trait;
use crossterm::style::{Color, Stylize, style};
use services::{Line, SessionIo, Tone, TransportError};
use tokio::io::{
    AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout,
};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};

use crate::banner;

/// How a transport offers the current value when editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefillMode {
    /// Show the current value after the prompt; an empty reply keeps it.
    Hint,
    /// Ask as if there were no current value.
    Ignore,
}

pub struct LineTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
    color: bool,
    prefill: PrefillMode,
    closed: bool,
}

impl LineTransport<Stdin, Stdout> {
    #[must_use]
    pub fn terminal(color: bool) -> Self {
        Self::new(tokio::io::stdin(), tokio::io::stdout())
            .with_color(color)
            .with_prefill(PrefillMode::Hint)
    }
}

impl LineTransport<OwnedReadHalf, OwnedWriteHalf> {
    #[must_use]
    pub fn socket(reader: OwnedReadHalf, writer: OwnedWriteHalf, color: bool) -> Self {
        Self::new(reader, writer).with_color(color)
    }
}

impl<R, W> LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    /// Plain output, prefill ignored.
    #[must_use]
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
            color: false,
            prefill: PrefillMode::Ignore,
            closed: false,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn with_prefill(mut self, prefill: PrefillMode) -> Self {
        self.prefill = prefill;
        self
    }

    fn paint(&self, text: &str, tone: Option<Tone>) -> String {
        match tone {
            Some(tone) if self.color => style(text).with(color_of(tone)).to_string(),
            _ => text.to_owned(),
        }
    }

    fn render(&self, line: &Line) -> String {
        line.spans()
            .iter()
            .map(|span| self.paint(&span.text, span.tone))
            .collect()
    }

    async fn send(&mut self, text: &str) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        self.writer
            .write_all(text.as_bytes())
            .await
            .map_err(classify)?;
        self.writer.flush().await.map_err(classify)
    }
}

fn color_of(tone: Tone) -> Color {
    match tone {
        Tone::Accent => Color::Yellow,
        Tone::Success => Color::Green,
        Tone::Danger => Color::Red,
        Tone::Info => Color::Cyan,
    }
}

/// A vanished peer is an ordinary end of session, not a failure.
fn classify(err: io::Error) -> TransportError {
    match err.kind() {
        io::ErrorKind::BrokenPipe
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::ConnectionAborted
        | io::ErrorKind::UnexpectedEof => TransportError::Closed,
        _ => TransportError::Io(err),
    }
}

#[async_trait]
impl<R, W> SessionIo for LineTransport<R, W>
where
    R: AsyncRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn prompt(
        &mut self,
        prompt: Line,
        prefill: Option<&str>,
    ) -> Result<String, TransportError> {
        let hint = match (self.prefill, prefill) {
            (PrefillMode::Hint, Some(current)) => Some(current),
            _ => None,
        };

        let mut text = self.render(&prompt);
        if let Some(current) = hint {
            text.push('[');
            text.push_str(&self.paint(current, Some(Tone::Accent)));
            text.push_str("] ");
        }
        self.send(&text).await?;

        let mut raw = Vec::new();
        let read = self
            .reader
            .read_until(b'\n', &mut raw)
            .await
            .map_err(classify)?;
        if read == 0 {
            self.closed = true;
            return Err(TransportError::Closed);
        }
        // Invalid UTF-8 is replaced, not fatal.
        let reply = String::from_utf8_lossy(&raw);
        let reply = reply.trim();
        match hint {
            Some(current) if reply.is_empty() => Ok(current.to_owned()),
            _ => Ok(reply.to_owned()),
        }
    }

    async fn write_line(&mut self, line: Line) -> Result<(), TransportError> {
        let mut text = self.render(&line);
        text.push('\n');
        self.send(&text).await
    }

    async fn write_banner(
        &mut self,
        text: &str,
        tone: Option<Tone>,
    ) -> Result<(), TransportError> {
        let mut out = String::new();
        for row in banner::render(text) {
            out.push_str(&self.paint(&row, tone));
            out.push('\n');
        }
        self.send(&out).await
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        match self.writer.shutdown().await.map_err(classify) {
            Err(TransportError::Closed) => Ok(()),
            other => other,
        }
    }
}
