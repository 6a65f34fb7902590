use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use quiz_core::model::QuestionSource;
use services::{AppServices, Clock, QuizLoopService, ResultsService, TriviaConfig};
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://quiz.sqlite3";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
    InvalidTriviaUrl { raw: String },
    InvalidSource { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::InvalidTriviaUrl { raw } => write!(f, "invalid --trivia-url value: {raw}"),
            ArgsError::InvalidSource { raw } => {
                write!(f, "invalid QUIZ_SOURCE value: {raw} (expected remote or local)")
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

struct DesktopApp {
    initial_source: QuestionSource,
    services: AppServices,
}

impl UiApp for DesktopApp {
    fn initial_source(&self) -> QuestionSource {
        self.initial_source
    }

    fn quiz_loop(&self) -> Arc<QuizLoopService> {
        self.services.quiz_loop()
    }

    fn results(&self) -> Arc<ResultsService> {
        self.services.results()
    }
}

struct Args {
    db_url: String,
    trivia: TriviaConfig,
    source: QuestionSource,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--trivia-url <url>] [--local]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --trivia-url {}", services::questions::DEFAULT_TRIVIA_URL);
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_DB_URL, QUIZ_TRIVIA_URL, QUIZ_SOURCE (remote|local), RUST_LOG");
}

fn parse_source(raw: &str) -> Result<QuestionSource, ArgsError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "remote" | "api" => Ok(QuestionSource::Remote),
        "local" => Ok(QuestionSource::Local),
        _ => Err(ArgsError::InvalidSource {
            raw: raw.to_string(),
        }),
    }
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = std::env::var("QUIZ_DB_URL")
            .ok()
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut trivia = TriviaConfig::from_env().map_err(|_| ArgsError::InvalidTriviaUrl {
            raw: std::env::var("QUIZ_TRIVIA_URL").unwrap_or_default(),
        })?;
        let mut source = match std::env::var("QUIZ_SOURCE") {
            Ok(raw) => parse_source(&raw)?,
            Err(_) => QuestionSource::Remote,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--trivia-url" => {
                    let value = require_value(args, "--trivia-url")?;
                    trivia = TriviaConfig::new(&value)
                        .map_err(|_| ArgsError::InvalidTriviaUrl { raw: value.clone() })?;
                }
                "--local" => source = QuestionSource::Local,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            trivia,
            source,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
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

fn init_logging() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services = AppServices::new_sqlite(&parsed.db_url, Clock::system(), parsed.trivia).await?;
    tracing::info!(db = %parsed.db_url, source = %parsed.source, "starting quiz");

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        initial_source: parsed.source,
        services,
    });
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Quiz App")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_logging();
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
