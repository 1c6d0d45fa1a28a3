//! Configuration store error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading or writing a persisted configuration section.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The backing file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backing file could not be written.
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The backing file is not valid INI.
    #[error("Failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    /// `save` was called for a section that was never loaded or written.
    #[error("Section '{0}' has no values to save")]
    UnknownSection(String),
}

impl ConfigError {
    pub(crate) fn from_ini(path: PathBuf, err: ini::Error) -> Self {
        match err {
            ini::Error::Io(source) => ConfigError::ReadFailed { path, source },
            ini::Error::Parse(e) => ConfigError::Parse {
                path,
                message: e.to_string(),
            },
        }
    }
}
