//! Internal logging contract shared with the redirector and cache.

use std::fmt;

/// Severity of an internal log message.
///
/// `Discard` is a sentinel: messages at this level are dropped by every
/// provider and never reach the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogLevel {
    Discard,
    Debug,
    Info,
    Warn,
    Error,
}

/// Sink for log messages produced by the redirector and cache.
pub trait LogProvider: Send + Sync {
    /// Log a pre-formatted message.
    fn log_message(&self, level: LogLevel, message: &str) {
        self.log_message_fmt(level, format_args!("{}", message));
    }

    /// Log a message built from format arguments.
    fn log_message_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>);
}
