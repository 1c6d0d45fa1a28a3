//! Host plugin contract and the XIPivot plugin.

mod adapter;
mod error;
mod host;
mod info;

pub use adapter::{PivotPlugin, PluginState};
pub use error::PluginError;
pub use host::{HostCore, Plugin, PluginBase};
pub use info::{PluginInfo, PLUGIN_INFO};
