//! Process-wide registry of the active redirector.
//!
//! Hook callbacks run on arbitrary client threads and need to find the
//! redirector that owns them. The registry holds at most one active
//! registration; what happens when a second plugin instance registers while
//! the first is still alive (a reload) is governed by [`ReloadPolicy`].
//!
//! Registrations are released by dropping the returned [`InstanceGuard`]. A
//! guard only clears the slot if it still owns it, so an instance that was
//! replaced cannot evict its successor.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

use super::contracts::Redirector;

static GLOBAL: OnceLock<Arc<InstanceRegistry>> = OnceLock::new();

/// What to do when an instance registers while another is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReloadPolicy {
    /// Refuse the new registration.
    Reject,
    /// Replace the active instance and log a warning.
    #[default]
    Replace,
}

/// Errors from [`InstanceRegistry::register`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Another instance holds the slot and the policy is [`ReloadPolicy::Reject`].
    #[error("Instance '{active}' is already active")]
    AlreadyActive { active: String },
}

struct Registration {
    generation: u64,
    name: String,
    instance: Arc<dyn Redirector>,
}

/// Holder of the single active redirector.
pub struct InstanceRegistry {
    slot: Mutex<Option<Registration>>,
    next_generation: AtomicU64,
}

impl InstanceRegistry {
    /// Create an empty, standalone registry.
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            next_generation: AtomicU64::new(1),
        }
    }

    /// The process-wide registry.
    pub fn global() -> Arc<InstanceRegistry> {
        GLOBAL.get_or_init(|| Arc::new(InstanceRegistry::new())).clone()
    }

    /// Make `instance` the active redirector.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::AlreadyActive`] if another instance is active
    /// and `policy` is [`ReloadPolicy::Reject`].
    pub fn register(
        self: &Arc<Self>,
        name: impl Into<String>,
        instance: Arc<dyn Redirector>,
        policy: ReloadPolicy,
    ) -> Result<InstanceGuard, RegistryError> {
        let name = name.into();
        let mut slot = self.slot.lock();

        if let Some(active) = slot.as_ref() {
            match policy {
                ReloadPolicy::Reject => {
                    return Err(RegistryError::AlreadyActive {
                        active: active.name.clone(),
                    });
                }
                ReloadPolicy::Replace => {
                    warn!(
                        replaced = %active.name,
                        replacement = %name,
                        "Replacing active redirector instance"
                    );
                }
            }
        }

        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);
        *slot = Some(Registration {
            generation,
            name: name.clone(),
            instance,
        });
        debug!(name = %name, generation, "Registered redirector instance");

        Ok(InstanceGuard {
            registry: Arc::clone(self),
            generation,
        })
    }

    /// The active redirector, if any.
    pub fn active(&self) -> Option<Arc<dyn Redirector>> {
        self.slot
            .lock()
            .as_ref()
            .map(|registration| Arc::clone(&registration.instance))
    }

    /// Name of the active registration, if any.
    pub fn active_name(&self) -> Option<String> {
        self.slot
            .lock()
            .as_ref()
            .map(|registration| registration.name.clone())
    }

    /// Whether any instance is registered.
    pub fn is_active(&self) -> bool {
        self.slot.lock().is_some()
    }

    fn unregister(&self, generation: u64) {
        let mut slot = self.slot.lock();
        match slot.as_ref() {
            Some(active) if active.generation == generation => {
                debug!(name = %active.name, generation, "Unregistered redirector instance");
                *slot = None;
            }
            _ => debug!(generation, "Registration already superseded"),
        }
    }
}

impl Default for InstanceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InstanceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceRegistry")
            .field("active", &self.active_name())
            .finish()
    }
}

/// Keeps a registration alive; unregisters on drop.
pub struct InstanceGuard {
    registry: Arc<InstanceRegistry>,
    generation: u64,
}

impl InstanceGuard {
    /// Whether this guard's registration is still the active one.
    pub fn is_current(&self) -> bool {
        self.registry
            .slot
            .lock()
            .as_ref()
            .is_some_and(|active| active.generation == self.generation)
    }
}

impl fmt::Debug for InstanceGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InstanceGuard")
            .field("generation", &self.generation)
            .finish()
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        self.registry.unregister(self.generation);
    }
}
