//! Forwarding of internal log messages to the host log manager.

use std::fmt::{self, Write};
use std::sync::Arc;

use super::host::{HostLogLevel, HostLogManager};
use super::provider::{LogLevel, LogProvider};

/// Maximum length, in bytes, of a forwarded message.
pub const MESSAGE_CAPACITY: usize = 511;

/// [`LogProvider`] that forwards to the host's [`HostLogManager`].
///
/// Every message is tagged with the bridge's source name. Messages longer
/// than [`MESSAGE_CAPACITY`] bytes are cut at the last whole character that
/// fits.
#[derive(Clone)]
pub struct LogBridge {
    source: String,
    manager: Arc<dyn HostLogManager>,
}

impl LogBridge {
    /// Create a bridge that logs as `source`.
    pub fn new(source: impl Into<String>, manager: Arc<dyn HostLogManager>) -> Self {
        Self {
            source: source.into(),
            manager,
        }
    }

    /// The source name passed to the host.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for LogBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogBridge")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl LogProvider for LogBridge {
    fn log_message_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        let Some(host_level) = HostLogLevel::from_internal(level) else {
            return;
        };

        let mut buffer = BoundedBuffer::new(MESSAGE_CAPACITY);
        // BoundedBuffer never reports an error; overflow is dropped.
        let _ = buffer.write_fmt(args);

        self.manager
            .log(host_level.as_u32(), &self.source, buffer.as_str());
    }
}

/// String buffer that silently drops anything past its capacity.
struct BoundedBuffer {
    text: String,
    capacity: usize,
}

impl BoundedBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            text: String::with_capacity(capacity),
            capacity,
        }
    }

    fn as_str(&self) -> &str {
        &self.text
    }
}

impl fmt::Write for BoundedBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = self.capacity - self.text.len();
        if s.len() <= remaining {
            self.text.push_str(s);
            return Ok(());
        }

        let mut cut = remaining;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.text.push_str(&s[..cut]);
        // Nothing after a cut may be appended, even if it would fit.
        self.capacity = self.text.len();
        Ok(())
    }
}
