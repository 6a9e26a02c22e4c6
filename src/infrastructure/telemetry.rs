//! Log file setup.
//!
//! The terminal owns stdout while the form is open, so events go to a file
//! through a non-blocking writer. The returned guard must outlive the UI.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::ParseError;

pub const LOG_FILE_NAME: &str = "jobform.log";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log level/filter '{value}': unable to build EnvFilter")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("cannot create log directory {}: {source}", .path.display())]
    LogDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("telemetry error: {0}")]
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

pub fn init(log_dir: &Path, log_level: &str) -> Result<WorkerGuard, TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => fallback_filter(log_level)?,
    };

    fs::create_dir_all(log_dir).map_err(|source| TelemetryError::LogDir {
        path: log_dir.to_path_buf(),
        source,
    })?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(non_blocking)
        .with_target(false)
        .with_ansi(false)
        .compact()
        .try_init()
        .map_err(TelemetryError::Subscriber)?;

    Ok(guard)
}

fn fallback_filter(log_level: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(log_level).map_err(|source| TelemetryError::EnvFilter {
        value: log_level.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_filter_accepts_levels() {
        assert!(fallback_filter("debug").is_ok());
        assert!(fallback_filter("jobform=trace,warn").is_ok());
    }

    #[test]
    fn test_fallback_filter_rejects_bad_level() {
        let err = fallback_filter("jobform=loud").unwrap_err();
        assert!(err.to_string().contains("jobform=loud"));
    }
}
