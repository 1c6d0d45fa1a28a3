//! Contracts the host plugin loader provides, and the base plugin state.

use std::fmt;
use std::sync::Arc;

use super::info::PluginInfo;
use crate::config::ConfigStore;
use crate::log::HostLogManager;

/// The host core handed to plugins at initialization.
pub trait HostCore: Send + Sync {
    /// The host's configuration manager, if it has one.
    fn configuration(&self) -> Option<Arc<dyn ConfigStore>>;
}

/// Lifecycle every plugin exposes to the host.
pub trait Plugin {
    /// Identity metadata.
    fn info(&self) -> &PluginInfo;

    /// Bring the plugin up. Returns `false` if it is not fully functional;
    /// the host decides whether to keep it loaded.
    fn initialize(
        &mut self,
        core: Arc<dyn HostCore>,
        log_manager: Arc<dyn HostLogManager>,
        id: u32,
    ) -> bool;

    /// Tear the plugin down. Never fails.
    fn release(&mut self);
}

/// Host handles stored by every plugin between `initialize` and `release`.
#[derive(Default)]
pub struct PluginBase {
    core: Option<Arc<dyn HostCore>>,
    log_manager: Option<Arc<dyn HostLogManager>>,
    id: u32,
}

impl PluginBase {
    /// Store the host handles.
    pub fn initialize(
        &mut self,
        core: Arc<dyn HostCore>,
        log_manager: Arc<dyn HostLogManager>,
        id: u32,
    ) {
        self.core = Some(core);
        self.log_manager = Some(log_manager);
        self.id = id;
    }

    /// Drop the host handles.
    pub fn release(&mut self) {
        self.core = None;
        self.log_manager = None;
    }

    pub fn core(&self) -> Option<&Arc<dyn HostCore>> {
        self.core.as_ref()
    }

    pub fn log_manager(&self) -> Option<&Arc<dyn HostLogManager>> {
        self.log_manager.as_ref()
    }

    /// Id assigned by the host at initialization.
    pub fn id(&self) -> u32 {
        self.id
    }
}

impl fmt::Debug for PluginBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginBase")
            .field("attached", &self.core.is_some())
            .field("id", &self.id)
            .finish()
    }
}
