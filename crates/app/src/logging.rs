use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// Honors `RUST_LOG`; otherwise only warnings and errors are shown so the
/// local terminal session stays readable. Output goes to stderr.
pub fn init() {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new("warn")
    };

    // Ignore error if a subscriber is already set (e.g. in tests).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
