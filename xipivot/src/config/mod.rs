//! Settings persistence.
//!
//! - [`ConfigStore`] / [`IniConfigStore`]: the section/group/key store
//! - [`read_list`] / [`write_list`]: ordered lists encoded as indexed keys
//! - [`Settings`]: the plugin's persisted configuration
//! - [`SettingKey`]: `group.key` addressing for command-line editing

mod error;
mod keys;
pub mod list;
mod settings;
mod store;

pub use error::ConfigError;
pub use keys::{KeyError, SettingKey};
pub use list::{read_list, write_list};
pub use settings::{
    Settings, BYTES_PER_MIB, DEFAULT_CACHE_SIZE_MIB, DEFAULT_PURGE_DELAY_SECS, SECTION_NAME,
};
pub use store::{default_config_dir, ConfigStore, IniConfigStore};
