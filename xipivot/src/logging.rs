//! Tracing subscriber setup.
//!
//! Installs a stderr layer and, optionally, a plain-text file layer. The level
//! defaults to `info` (`debug` when requested) and `RUST_LOG` always wins.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const TIME_FORMAT: &str = "[hour]:[minute]:[second]";

/// Logging options.
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    /// Log at `debug` instead of `info`.
    pub debug: bool,

    /// Also write logs to this file.
    pub log_file: Option<PathBuf>,
}

/// Errors from [`init_logging`].
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to open log file {path}: {message}")]
    Appender { path: PathBuf, message: String },

    #[error("Invalid timestamp format: {0}")]
    TimeFormat(String),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(String),
}

/// Keeps the background file writer alive. Drop it last.
#[must_use = "dropping the guard stops file logging"]
pub struct LoggingGuard {
    _file_guard: Option<WorkerGuard>,
}

/// Default filter directive for the given verbosity.
pub fn default_directive(debug: bool) -> String {
    let level = if debug { "debug" } else { "info" };
    format!("warn,xipivot={level},xipivot_cli={level}")
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, LoggingError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config.debug)));

    let format = time::format_description::parse_borrowed::<2>(TIME_FORMAT)
        .map_err(|e| LoggingError::TimeFormat(e.to_string()))?;
    let timer = LocalTime::new(format);

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer.clone())
        .with_target(false);

    let (file_layer, file_guard) = match &config.log_file {
        Some(path) => {
            let appender = open_appender(path)?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_timer(timer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn open_appender(path: &Path) -> Result<RollingFileAppender, LoggingError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| LoggingError::Appender {
            path: path.to_path_buf(),
            message: "path has no file name".to_string(),
        })?;

    std::fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
        path: dir.clone(),
        source,
    })?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(&dir)
        .map_err(|e| LoggingError::Appender {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_directive() {
        assert_eq!(
            default_directive(false),
            "warn,xipivot=info,xipivot_cli=info"
        );
        assert!(default_directive(true).contains("xipivot=debug"));
    }

    #[test]
    fn test_time_format_parses() {
        let format = time::format_description::parse_borrowed::<2>(TIME_FORMAT).unwrap();
        assert!(!format.is_empty());
    }

    #[test]
    fn test_open_appender_creates_directory() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("logs").join("xipivot.log");

        open_appender(&path).unwrap();
        assert!(temp.path().join("logs").is_dir());
    }

    #[test]
    fn test_open_appender_rejects_missing_file_name() {
        let err = open_appender(Path::new("/")).unwrap_err();
        assert!(matches!(err, LoggingError::Appender { .. }));
    }
}
