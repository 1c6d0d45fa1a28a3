//! Addressable scalar settings for command-line editing.
//!
//! Keys use the persisted `group.key` names, e.g. `cache.size`. Overlays are
//! a list and are edited through [`Settings::add_overlay`] /
//! [`Settings::remove_overlay`] instead.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::settings::Settings;

/// Errors from parsing or applying a [`SettingKey`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("Unknown setting '{0}'")]
    UnknownKey(String),

    #[error("Invalid value '{value}' for {key}: expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// A scalar setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    RootPath,
    DebugLog,
    CacheEnabled,
    CacheSize,
    CacheMaxAge,
}

impl SettingKey {
    /// All keys, in persisted order.
    pub fn all() -> &'static [SettingKey] {
        &[
            SettingKey::RootPath,
            SettingKey::DebugLog,
            SettingKey::CacheEnabled,
            SettingKey::CacheSize,
            SettingKey::CacheMaxAge,
        ]
    }

    /// Full `group.key` name.
    pub fn name(&self) -> &'static str {
        match self {
            SettingKey::RootPath => "settings.root_path",
            SettingKey::DebugLog => "settings.debug_log",
            SettingKey::CacheEnabled => "cache.enabled",
            SettingKey::CacheSize => "cache.size",
            SettingKey::CacheMaxAge => "cache.max_age",
        }
    }

    /// Group part of the name.
    pub fn group(&self) -> &'static str {
        self.name().split_once('.').map_or("", |(group, _)| group)
    }

    /// Key part of the name.
    pub fn key_name(&self) -> &'static str {
        self.name().split_once('.').map_or("", |(_, key)| key)
    }

    /// Current value in its persisted form.
    pub fn get(&self, settings: &Settings) -> String {
        match self {
            SettingKey::RootPath => settings.root_path.clone(),
            SettingKey::DebugLog => settings.debug_log.to_string(),
            SettingKey::CacheEnabled => settings.cache_enabled.to_string(),
            SettingKey::CacheSize => settings.cache_size_mib().to_string(),
            SettingKey::CacheMaxAge => settings.cache_purge_delay.to_string(),
        }
    }

    /// Parse `value` and store it.
    pub fn set(&self, settings: &mut Settings, value: &str) -> Result<(), KeyError> {
        match self {
            SettingKey::RootPath => {
                if value.is_empty() {
                    return Err(self.invalid(value, "a non-empty path"));
                }
                settings.root_path = value.to_string();
            }
            SettingKey::DebugLog => settings.debug_log = self.parse_bool(value)?,
            SettingKey::CacheEnabled => settings.cache_enabled = self.parse_bool(value)?,
            SettingKey::CacheSize => {
                let mib = self.parse_i32_range(value, "a size in MiB")?;
                settings.set_cache_size_mib(mib);
            }
            SettingKey::CacheMaxAge => {
                settings.cache_purge_delay = self.parse_i32_range(value, "a number of seconds")?;
            }
        }
        Ok(())
    }

    fn invalid(&self, value: &str, expected: &'static str) -> KeyError {
        KeyError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            expected,
        }
    }

    fn parse_bool(&self, value: &str) -> Result<bool, KeyError> {
        value
            .trim()
            .parse()
            .map_err(|_| self.invalid(value, "true or false"))
    }

    // Persisted integers are read back as i32, so larger values would not
    // survive a reload.
    fn parse_i32_range(&self, value: &str, expected: &'static str) -> Result<u32, KeyError> {
        value
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|v| i32::try_from(*v).is_ok())
            .ok_or_else(|| self.invalid(value, expected))
    }
}

impl FromStr for SettingKey {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SettingKey::all()
            .iter()
            .copied()
            .find(|key| key.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| KeyError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
