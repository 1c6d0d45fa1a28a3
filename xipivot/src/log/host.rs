//! Host-side logging contract.

use super::provider::LogLevel;

/// Severity levels understood by the host log manager.
///
/// Discriminants are the values the host expects on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum HostLogLevel {
    Error = 2,
    Warn = 3,
    Info = 4,
    Debug = 5,
}

impl HostLogLevel {
    /// Map an internal severity to the host's, or `None` for `Discard`.
    pub fn from_internal(level: LogLevel) -> Option<Self> {
        match level {
            LogLevel::Discard => None,
            LogLevel::Debug => Some(HostLogLevel::Debug),
            LogLevel::Info => Some(HostLogLevel::Info),
            LogLevel::Warn => Some(HostLogLevel::Warn),
            LogLevel::Error => Some(HostLogLevel::Error),
        }
    }

    /// Raw value passed to [`HostLogManager::log`].
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    /// Inverse of [`as_u32`](Self::as_u32).
    pub fn from_u32(value: u32) -> Option<Self> {
        match value {
            2 => Some(HostLogLevel::Error),
            3 => Some(HostLogLevel::Warn),
            4 => Some(HostLogLevel::Info),
            5 => Some(HostLogLevel::Debug),
            _ => None,
        }
    }
}

/// The host's log manager.
pub trait HostLogManager: Send + Sync {
    /// Record `message` from `source` at the raw host `level`.
    fn log(&self, level: u32, source: &str, message: &str);
}

/// [`HostLogManager`] that emits `tracing` events.
///
/// Used when the plugin runs outside the real client, e.g. from the CLI.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogManager;

impl HostLogManager for TracingLogManager {
    fn log(&self, level: u32, source: &str, message: &str) {
        match HostLogLevel::from_u32(level) {
            Some(HostLogLevel::Error) => tracing::error!(source, "{}", message),
            Some(HostLogLevel::Warn) => tracing::warn!(source, "{}", message),
            Some(HostLogLevel::Info) => tracing::info!(source, "{}", message),
            Some(HostLogLevel::Debug) => tracing::debug!(source, "{}", message),
            None => tracing::trace!(source, level, "{}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_is_total() {
        assert_eq!(HostLogLevel::from_internal(LogLevel::Discard), None);
        assert_eq!(
            HostLogLevel::from_internal(LogLevel::Debug),
            Some(HostLogLevel::Debug)
        );
        assert_eq!(
            HostLogLevel::from_internal(LogLevel::Info),
            Some(HostLogLevel::Info)
        );
        assert_eq!(
            HostLogLevel::from_internal(LogLevel::Warn),
            Some(HostLogLevel::Warn)
        );
        assert_eq!(
            HostLogLevel::from_internal(LogLevel::Error),
            Some(HostLogLevel::Error)
        );
    }

    #[test]
    fn test_wire_values() {
        for level in [
            HostLogLevel::Error,
            HostLogLevel::Warn,
            HostLogLevel::Info,
            HostLogLevel::Debug,
        ] {
            assert_eq!(HostLogLevel::from_u32(level.as_u32()), Some(level));
        }
        assert_eq!(HostLogLevel::Error.as_u32(), 2);
        assert_eq!(HostLogLevel::Debug.as_u32(), 5);
        assert_eq!(HostLogLevel::from_u32(0), None);
    }
}
