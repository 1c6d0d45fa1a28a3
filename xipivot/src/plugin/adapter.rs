//! The XIPivot plugin: host lifecycle adapter.
//!
//! `PivotPlugin` turns the host's `initialize` / `release` calls into
//! configuration of the redirector and memory cache:
//!
//! ```text
//! initialize
//!   1. store host handles, attach the log bridge to the redirector
//!   2. load settings (if the host has a configuration manager)
//!      └── push debug flag, root path and overlays into the redirector
//!   3. configure the memory cache (if enabled)
//!   4. save settings (seeds the store on first run)
//!   5. arm cache hooks (if enabled), then redirector hooks
//!
//! release
//!   1. disarm cache hooks (if enabled), then redirector hooks
//!   2. drop host handles
//! ```
//!
//! Both hook sets are always attempted; `initialize` reports `true` only if
//! every armed subsystem armed successfully.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::error::PluginError;
use super::host::{HostCore, Plugin, PluginBase};
use super::info::{PluginInfo, PLUGIN_INFO};
use crate::config::{ConfigStore, Settings};
use crate::hooks::{InstanceGuard, InstanceRegistry, MemCache, Redirector, ReloadPolicy};
use crate::log::{HostLogManager, LogBridge, LogLevel, LogProvider};

/// Lifecycle state of the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginState {
    Constructed,
    Initialized,
    Released,
}

/// XIPivot plugin instance.
pub struct PivotPlugin {
    args: String,
    base: PluginBase,
    settings: Settings,
    state: PluginState,
    redirector: Arc<dyn Redirector>,
    mem_cache: Arc<dyn MemCache>,
    log_bridge: Option<Arc<LogBridge>>,
    registration: InstanceGuard,
}

impl PivotPlugin {
    /// Create the plugin and register its redirector with the process-wide
    /// registry using the default [`ReloadPolicy`].
    pub fn new(
        args: Option<&str>,
        redirector: Arc<dyn Redirector>,
        mem_cache: Arc<dyn MemCache>,
    ) -> Result<Self, PluginError> {
        Self::with_registry(
            args,
            redirector,
            mem_cache,
            &InstanceRegistry::global(),
            ReloadPolicy::default(),
        )
    }

    /// Create the plugin against an explicit registry and reload policy.
    ///
    /// # Errors
    ///
    /// Returns [`PluginError::Registration`] if another instance is active
    /// and `policy` is [`ReloadPolicy::Reject`].
    pub fn with_registry(
        args: Option<&str>,
        redirector: Arc<dyn Redirector>,
        mem_cache: Arc<dyn MemCache>,
        registry: &Arc<InstanceRegistry>,
        policy: ReloadPolicy,
    ) -> Result<Self, PluginError> {
        let registration = registry.register(PLUGIN_INFO.name, Arc::clone(&redirector), policy)?;

        Ok(Self {
            args: args.unwrap_or_default().to_string(),
            base: PluginBase::default(),
            settings: Settings::default(),
            state: PluginState::Constructed,
            redirector,
            mem_cache,
            log_bridge: None,
            registration,
        })
    }

    /// Arguments the host passed at load time, verbatim.
    pub fn args(&self) -> &str {
        &self.args
    }

    /// Current settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PluginState {
        self.state
    }

    /// Host handles stored at initialization.
    pub fn base(&self) -> &PluginBase {
        &self.base
    }

    /// Whether this instance still owns the active-instance slot.
    pub fn is_active_instance(&self) -> bool {
        self.registration.is_current()
    }

    /// Load settings and push them into the redirector and cache.
    fn apply_configuration(&mut self, store: &dyn ConfigStore, bridge: &Arc<LogBridge>) {
        match self.settings.load(store) {
            Ok(true) => {
                self.redirector.set_debug_log(self.settings.debug_log);
                self.redirector.set_root_path(&self.settings.root_path);
                for overlay in &self.settings.overlays {
                    self.redirector.add_overlay(overlay);
                }
                info!(
                    root_path = %self.settings.root_path,
                    overlays = self.settings.overlays.len(),
                    "Applied saved settings"
                );
            }
            Ok(false) => info!("No saved settings found, using defaults"),
            Err(e) => warn!(error = %e, "Failed to load settings, using defaults"),
        }

        if self.settings.cache_enabled {
            self.mem_cache.set_log_provider(Arc::clone(bridge) as Arc<dyn LogProvider>);
            self.mem_cache.set_debug_log(self.settings.debug_log);
            self.mem_cache.set_cache_allocation(self.settings.cache_size);
            debug!(
                cache_size_mib = self.settings.cache_size_mib(),
                "Configured memory cache"
            );
        }

        // Saved even when nothing was loaded, so a first run seeds the store.
        if let Err(e) = self.settings.save(store) {
            warn!(error = %e, "Failed to save settings");
        }
    }
}

impl Plugin for PivotPlugin {
    fn info(&self) -> &PluginInfo {
        &PLUGIN_INFO
    }

    fn initialize(
        &mut self,
        core: Arc<dyn HostCore>,
        log_manager: Arc<dyn HostLogManager>,
        id: u32,
    ) -> bool {
        if self.state != PluginState::Constructed {
            warn!(state = ?self.state, "Initialize called out of order, ignoring");
            return false;
        }

        self.base
            .initialize(Arc::clone(&core), Arc::clone(&log_manager), id);

        let bridge = Arc::new(LogBridge::new(PLUGIN_INFO.name, log_manager));
        self.redirector
            .set_log_provider(Arc::clone(&bridge) as Arc<dyn LogProvider>);

        match core.configuration() {
            Some(store) => self.apply_configuration(store.as_ref(), &bridge),
            None => debug!("Host has no configuration manager, using defaults"),
        }
        self.log_bridge = Some(bridge);

        let mut initialized = true;
        if self.settings.cache_enabled {
            initialized &= self.mem_cache.setup_hooks();
        }
        initialized &= self.redirector.setup_hooks();

        self.state = PluginState::Initialized;

        if initialized {
            info!(
                id,
                cache_enabled = self.settings.cache_enabled,
                "XIPivot initialized"
            );
        } else {
            warn!(
                id,
                cache_enabled = self.settings.cache_enabled,
                "XIPivot failed to arm all hooks"
            );
        }
        initialized
    }

    fn release(&mut self) {
        if self.state != PluginState::Initialized {
            debug!(state = ?self.state, "Release called without an active initialization");
            return;
        }

        if self.settings.cache_enabled {
            self.mem_cache.release_hooks();
        }
        self.redirector.release_hooks();
        self.base.release();
        self.log_bridge = None;
        self.state = PluginState::Released;

        info!("XIPivot released");
    }
}

impl LogProvider for PivotPlugin {
    fn log_message_fmt(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        match &self.log_bridge {
            Some(bridge) => bridge.log_message_fmt(level, args),
            None => debug!(?level, "{}", args),
        }
    }
}

impl Drop for PivotPlugin {
    fn drop(&mut self) {
        // Hooks must not outlive the plugin that armed them.
        self.release();
    }
}

impl fmt::Debug for PivotPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PivotPlugin")
            .field("args", &self.args)
            .field("state", &self.state)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
