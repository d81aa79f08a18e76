//! Tracing initialisation for the `apitree::*` log targets.

use crate::constants;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Log sink: the file named by `APITREE_LOG_FILE`, else stderr.
struct LogSink {
    file: Option<Mutex<File>>,
}

impl LogSink {
    fn from_env() -> Self {
        let Ok(path) = std::env::var(constants::ENV_APITREE_LOG_FILE) else {
            return Self { file: None };
        };
        match OpenOptions::new().create(true).append(true).open(&path) {
            Ok(file) => Self {
                file: Some(Mutex::new(file)),
            },
            Err(e) => {
                // No subscriber yet.
                eprintln!("Warning: cannot open log file '{path}': {e}. Logging to stderr.");
                Self { file: None }
            }
        }
    }
}

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = Box<dyn Write + 'a>;

    fn make_writer(&'a self) -> Self::Writer {
        let file = self
            .file
            .as_ref()
            .and_then(|file| file.lock().ok())
            .and_then(|file| file.try_clone().ok());
        match file {
            Some(file) => Box::new(file),
            None => Box::new(std::io::stderr()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LogFormat {
    Text,
    Json,
}

impl LogFormat {
    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "text" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    fn from_env() -> Self {
        let Ok(raw) = std::env::var(constants::ENV_APITREE_LOG_FORMAT) else {
            return Self::Text;
        };
        Self::parse(&raw).unwrap_or_else(|| {
            eprintln!(
                "Warning: {} must be 'text' or 'json', got '{raw}'. Using 'text'.",
                constants::ENV_APITREE_LOG_FORMAT
            );
            Self::Text
        })
    }
}

/// Filter directive for the given `-v` count, falling back to `APITREE_LOG`.
fn log_level(verbosity: u8) -> String {
    match verbosity {
        0 => std::env::var(constants::ENV_APITREE_LOG).unwrap_or_else(|_| "error".to_string()),
        1 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}

/// Installs the global subscriber. Call once, before any collaborator logs.
pub fn init_tracing(verbosity: u8) {
    let filter = EnvFilter::try_new(log_level(verbosity)).unwrap_or_else(|_| EnvFilter::new("error"));
    let sink = LogSink::from_env();

    match LogFormat::from_env() {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_span_list(false)
                    .with_line_number(true)
                    .with_writer(sink),
            )
            .init(),
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(sink))
            .init(),
    }
}
