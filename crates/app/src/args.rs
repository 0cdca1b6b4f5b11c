use std::fmt;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_URL: &str = "sqlite://quizzes.sqlite3";
pub const DEFAULT_LISTEN: &str = "127.0.0.1:3030";

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownSubcommand(String),
    InvalidDbUrl { raw: String },
    InvalidListen { raw: String },
    InvalidSeed { raw: String },
    NothingToServe,
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownSubcommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidListen { raw } => write!(f, "invalid --listen value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::NothingToServe => {
                write!(f, "--no-listen and --no-terminal leave nothing to serve")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

/// Settings taken from the environment before flags are applied.
#[derive(Debug, Clone, Default)]
pub struct EnvDefaults {
    pub db_url: Option<String>,
    pub listen: Option<String>,
    pub no_color: bool,
}

impl EnvDefaults {
    pub fn from_env() -> Self {
        Self {
            db_url: std::env::var("QUIZ_DB_URL").ok(),
            listen: std::env::var("QUIZ_LISTEN").ok(),
            no_color: std::env::var("NO_COLOR").is_ok_and(|v| !v.is_empty()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub db_url: String,
    /// `None` when the TCP listener is disabled.
    pub listen: Option<SocketAddr>,
    pub terminal: bool,
    pub color: bool,
    pub seed_store: bool,
    /// Fixed seed for exam draws.
    pub draw_seed: Option<u64>,
}

pub fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [serve] [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>   SQLite URL (default: {DEFAULT_DB_URL})");
    eprintln!("  --listen <addr>     TCP address to serve on (default: {DEFAULT_LISTEN})");
    eprintln!("  --no-listen         Do not accept TCP connections");
    eprintln!("  --no-terminal       Do not run a session on this terminal");
    eprintln!("  --no-color          Disable ANSI colors");
    eprintln!("  --no-seed           Do not insert the default quizzes into an empty store");
    eprintln!("  --seed <u64>        Fixed seed for exam question order");
    eprintln!("  -h, --help          Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_LISTEN, NO_COLOR, RUST_LOG");
}

impl Args {
    /// Parse `argv` (without the program name) on top of `env`.
    ///
    /// Returns `Ok(None)` when help was requested.
    pub fn parse(
        env: EnvDefaults,
        argv: impl IntoIterator<Item = String>,
    ) -> Result<Option<Self>, ArgsError> {
        let mut args = argv.into_iter().peekable();
        match args.peek().map(String::as_str) {
            Some("serve") => {
                args.next();
            }
            Some(first) if !first.starts_with('-') => {
                return Err(ArgsError::UnknownSubcommand(first.to_owned()));
            }
            _ => {}
        }

        let db_url = env
            .db_url
            .unwrap_or_else(|| DEFAULT_DB_URL.to_owned());
        let mut db_url = normalize_sqlite_url(db_url);
        let mut listen_raw = env.listen.unwrap_or_else(|| DEFAULT_LISTEN.to_owned());
        let mut listen_enabled = true;
        let mut terminal = true;
        let mut color = !env.no_color;
        let mut seed_store = true;
        let mut draw_seed = None;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--listen" => listen_raw = require_value(&mut args, "--listen")?,
                "--no-listen" => listen_enabled = false,
                "--no-terminal" => terminal = false,
                "--no-color" => color = false,
                "--no-seed" => seed_store = false,
                "--seed" => {
                    let value = require_value(&mut args, "--seed")?;
                    let parsed = value
                        .trim()
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    draw_seed = Some(parsed);
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        let listen = if listen_enabled {
            let addr = listen_raw
                .trim()
                .parse::<SocketAddr>()
                .map_err(|_| ArgsError::InvalidListen { raw: listen_raw })?;
            Some(addr)
        } else {
            None
        };
        if listen.is_none() && !terminal {
            return Err(ArgsError::NothingToServe);
        }

        Ok(Some(Self {
            db_url,
            listen,
            terminal,
            color,
            seed_store,
            draw_seed,
        }))
    }
}

/// Turn `path`, `sqlite:path` or `sqlite://path` into an absolute
/// `sqlite://` URL. In-memory URLs pass through unchanged.
pub fn normalize_sqlite_url(raw: String) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite:file:") {
        return trimmed.to_owned();
    }

    let path_str = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let path = Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

/// Create the database file (and its directory) so SQLite can open it.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" || db_url.starts_with("sqlite:file:") {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_owned(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_owned(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }
    Ok(())
}
