//! TCP front end: one independent session per accepted connection.

use services::{SessionEnd, Shell};
use tokio::net::TcpListener;
use tracing::Instrument;

use crate::transport::LineTransport;

/// Accept connections forever, spawning a session for each.
///
/// Accept failures are logged and the loop keeps going.
pub async fn serve(listener: TcpListener, shell: Shell, color: bool) {
    loop {
        let (stream, peer) = match listener.accept().await {
            Ok(conn) => conn,
            Err(err) => {
                tracing::warn!(error = %err, "failed to accept connection");
                continue;
            }
        };
        tracing::info!(%peer, "accepted connection");

        let shell = shell.clone();
        let span = tracing::info_span!("connection", %peer);
        tokio::spawn(
            async move {
                let (reader, writer) = stream.into_split();
                let mut session = shell.session(LineTransport::socket(reader, writer, color));
                match session.run().await {
                    Ok(SessionEnd::Quit) => tracing::info!("client quit"),
                    Ok(SessionEnd::Disconnected) => tracing::info!("client disconnected"),
                    Err(err) => tracing::warn!(error = %err, "connection failed"),
                }
            }
            .instrument(span),
        );
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use quiz_core::model::QuizDraft;
    use quiz_core::time::fixed_clock;
    use services::QuizService;
    use storage::repository::InMemoryRepository;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    use super::*;

    async fn shell() -> Shell {
        let service = QuizService::new(fixed_clock(), Arc::new(InMemoryRepository::new()));
        service
            .create_quiz(QuizDraft::new("Capital of Italy", "Rome"))
            .await
            .unwrap();
        Shell::new(service)
    }

    async fn start() -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, shell().await, false));
        addr
    }

    async fn converse(addr: std::net::SocketAddr, input: &[u8]) -> String {
        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(input).await.unwrap();
        let mut out = String::new();
        client.read_to_string(&mut out).await.unwrap();
        out
    }

    #[tokio::test]
    async fn client_session_runs_until_quit() {
        let addr = start().await;

        let out = converse(addr, b"list\r\nshow 1\r\nquit\r\n").await;

        assert!(out.contains("quiz > "));
        assert!(out.contains("[1]: Capital of Italy\n"));
        assert!(out.contains("[1]: Capital of Italy => Rome\n"));
    }

    #[tokio::test]
    async fn clients_are_independent() {
        let addr = start().await;

        let (first, second) = tokio::join!(
            converse(addr, b"bogus\nquit\n"),
            converse(addr, b"show 1\nquit\n"),
        );

        assert!(first.contains("Error: Unknown command: 'bogus'"));
        assert!(!first.contains("Rome"));
        assert!(second.contains("=> Rome"));
        assert!(!second.contains("bogus"));
    }

    #[tokio::test]
    async fn half_closed_client_ends_its_session() {
        let addr = start().await;
        let mut client = TcpStream::connect(addr).await.unwrap();
        client.write_all(b"add\nHalf a question\n").await.unwrap();
        client.shutdown().await.unwrap();

        let mut out = String::new();
        client.read_to_string(&mut out).await.unwrap();

        assert!(out.contains("Enter the answer: "));
        assert!(!out.contains("Added"));
    }
}
