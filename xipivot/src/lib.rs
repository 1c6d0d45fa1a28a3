//! XIPivot - runtime DAT / music replacement for the FFXI client
//!
//! This library is the bootstrap layer that sits between the host plugin
//! loader and the file redirection / memory cache machinery. It:
//!
//! - negotiates the plugin lifecycle with the host (`initialize` / `release`)
//! - loads, normalises and persists the user's settings (root path, overlays,
//!   cache budget)
//! - bridges the internal logging contract onto the host's log manager
//!
//! # Architecture
//!
//! ```text
//! Host ──► PivotPlugin ──► Settings ◄──► ConfigStore (INI)
//!               │
//!               ├──► Redirector  (root path, overlays, hooks)
//!               ├──► MemCache    (byte budget, hooks)
//!               └──► LogBridge ──► HostLogManager
//! ```
//!
//! The redirector and cache themselves live behind the traits in [`hooks`];
//! this crate only wires configuration into them and arms/disarms their hooks.

pub mod config;
pub mod hooks;
pub mod log;
pub mod logging;
pub mod plugin;

/// Crate version, as reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
