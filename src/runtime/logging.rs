//! File logging for the terminal UI.
//!
//! The UI owns the terminal, so log records go to a file through a
//! non-blocking writer. The returned guard flushes it on drop and must live
//! until shutdown.

use std::fs;
use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::{LogSettings, default_log_path};

/// Environment variable that overrides `log.filter`.
const LOG_ENV: &str = "CADENZA_LOG";

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("no log file location; set log.file or HOME")]
    NoLogPath,
    #[error("failed to prepare log directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing_subscriber::util::TryInitError),
}

pub fn init(settings: &LogSettings) -> Result<WorkerGuard, LoggingError> {
    let path = settings
        .file
        .clone()
        .or_else(default_log_path)
        .ok_or(LoggingError::NoLogPath)?;

    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    fs::create_dir_all(dir).map_err(|source| LoggingError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    let file_name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "cadenza.log".into());

    let (writer, guard) = tracing_appender::non_blocking(tracing_appender::rolling::never(
        dir, file_name,
    ));
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&settings.filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .try_init()?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(guard)
}
