mod args;
mod banner;
mod logging;
mod server;
mod transport;

use std::sync::Arc;

use services::{Clock, QuizService, Shell};
use storage::repository::Storage;
use storage::seed::{default_quizzes, seed_if_empty};
use tokio::net::TcpListener;
use tracing::Instrument;

use crate::args::{Args, EnvDefaults, prepare_sqlite_file, print_usage};
use crate::transport::LineTransport;

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();

    let parsed = Args::parse(EnvDefaults::from_env(), std::env::args().skip(1)).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;
    let Some(parsed) = parsed else {
        print_usage();
        return Ok(());
    };

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let storage = Storage::sqlite(&parsed.db_url).await?;
    let clock = Clock::default();

    if parsed.seed_store {
        seed_if_empty(storage.quizzes.as_ref(), default_quizzes(), clock.now()).await?;
    }

    let quizzes = QuizService::new(clock, Arc::clone(&storage.quizzes));
    let shell = Shell::new(quizzes).with_seed(parsed.draw_seed);

    if let Some(addr) = parsed.listen {
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(addr = %listener.local_addr()?, "listening");
        tokio::spawn(server::serve(listener, shell.clone(), parsed.color));
    }

    if parsed.terminal {
        let mut session = shell.session(LineTransport::terminal(parsed.color));
        let end = session
            .run()
            .instrument(tracing::info_span!("terminal"))
            .await?;
        tracing::debug!(?end, "terminal session finished");
    } else {
        tokio::signal::ctrl_c().await?;
        tracing::info!("interrupted, shutting down");
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
