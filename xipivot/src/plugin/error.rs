//! Plugin error types.

use thiserror::Error;

use crate::hooks::RegistryError;

/// Errors raised while constructing the plugin.
#[derive(Debug, Error)]
pub enum PluginError {
    /// The active-instance registry refused the new instance.
    #[error("Failed to register plugin instance: {0}")]
    Registration(#[from] RegistryError),
}
