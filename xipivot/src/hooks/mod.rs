//! Hook-owning collaborators and the active-instance registry.

mod contracts;
mod registry;

pub use contracts::{MemCache, Redirector};
pub use registry::{InstanceGuard, InstanceRegistry, RegistryError, ReloadPolicy};
