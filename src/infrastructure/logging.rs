use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Cannot open log file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot install logger: {0}")]
    Subscriber(String),
}

/// Installs the global subscriber, appending to `path`.
///
/// The terminal belongs to the UI, so logs never go to stdout. Verbosity comes
/// from `RUST_LOG` and defaults to `info`.
pub fn init_logging(path: &Path) -> Result<(), LoggingError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| LoggingError::Subscriber(e.to_string()))
}
