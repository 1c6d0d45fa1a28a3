//! Logging contracts and the bridge to the host log manager.
//!
//! ```text
//! Redirector / MemCache ──► LogProvider (LogBridge) ──► HostLogManager
//!        LogLevel::{Discard, Debug, Info, Warn, Error}      u32 host level
//! ```

mod bridge;
mod host;
mod provider;

pub use bridge::{LogBridge, MESSAGE_CAPACITY};
pub use host::{HostLogLevel, HostLogManager, TracingLogManager};
pub use provider::{LogLevel, LogProvider};
