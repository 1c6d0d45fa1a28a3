//! Contracts of the hook-owning collaborators.
//!
//! The redirector intercepts the client's file access and serves replacement
//! DATs from the root path and overlays; the memory cache keeps redirected
//! content in memory within a byte budget. Both install their hooks in
//! `setup_hooks` and remove them in `release_hooks`. This crate only
//! configures them.

use std::sync::Arc;

use crate::log::LogProvider;

/// File access redirector.
pub trait Redirector: Send + Sync {
    /// Route the redirector's own log output through `provider`.
    fn set_log_provider(&self, provider: Arc<dyn LogProvider>);

    /// Enable or disable verbose logging.
    fn set_debug_log(&self, enabled: bool);

    /// Directory holding the replacement DATs.
    fn set_root_path(&self, path: &str);

    /// Append an overlay. Overlays are searched in the order they were added.
    fn add_overlay(&self, path: &str);

    /// Install the file hooks. Returns `false` if they could not be armed.
    fn setup_hooks(&self) -> bool;

    /// Remove the file hooks. Must be safe to call when none are installed.
    fn release_hooks(&self);
}

/// In-memory cache for redirected content.
pub trait MemCache: Send + Sync {
    /// Route the cache's log output through `provider`.
    fn set_log_provider(&self, provider: Arc<dyn LogProvider>);

    /// Enable or disable verbose logging.
    fn set_debug_log(&self, enabled: bool);

    /// Maximum number of bytes the cache may hold.
    fn set_cache_allocation(&self, bytes: u64);

    /// Install the cache hooks. Returns `false` if they could not be armed.
    fn setup_hooks(&self) -> bool;

    /// Remove the cache hooks. Must be safe to call when none are installed.
    fn release_hooks(&self);
}
