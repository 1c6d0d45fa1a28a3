//! CLI error types.

use std::fmt;
use std::path::PathBuf;

use xipivot::config::{ConfigError, KeyError};

/// Errors surfaced to the user by CLI commands.
#[derive(Debug)]
pub enum CliError {
    /// Reading or writing the settings file failed.
    Config(ConfigError),

    /// Bad setting key or value.
    Setting(KeyError),

    /// Overlay add/remove could not be applied.
    Overlay(String),

    /// A write was attempted before the settings file exists and no root
    /// path was given to seed it.
    NotInitialized(PathBuf),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Setting(e) => write!(f, "{}", e),
            CliError::Overlay(msg) => write!(f, "Overlay error: {}", msg),
            CliError::NotInitialized(path) => write!(
                f,
                "No settings file at {}; run 'xipivot init --root-path <DIR>' first",
                path.display()
            ),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Setting(e) => Some(e),
            CliError::Overlay(_) | CliError::NotInitialized(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<KeyError> for CliError {
    fn from(e: KeyError) -> Self {
        CliError::Setting(e)
    }
}
