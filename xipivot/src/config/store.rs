//! Section-based key/value configuration store.
//!
//! The host hands plugins a configuration manager organised as
//! `section -> group -> key = value`, where every value is stored as a string
//! and typed getters interpret it on the way out. [`ConfigStore`] captures that
//! contract; [`IniConfigStore`] backs it with one INI document per section.
//!
//! # File Layout
//!
//! ```text
//! <config_dir>/XIPivot.ini
//!
//! [settings]
//! root_path=C:/Games/FFXI/DATs
//! debug_log=false
//!
//! [overlays]
//! 0=music
//! 1=hd_textures
//!
//! [cache]
//! enabled=true
//! size=2048
//! max_age=600
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ini::{EscapePolicy, Ini, ParseOption};
use parking_lot::RwLock;

use super::error::ConfigError;

/// Directory name used below the platform config directory.
const CONFIG_DIR_NAME: &str = "XIPivot";

/// Default directory for persisted settings.
///
/// Resolves to `<platform config dir>/XIPivot`, falling back to `./config`
/// when the platform does not expose a config directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(CONFIG_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from("config"))
}

/// Host-provided key/value configuration store.
///
/// All methods take `&self`; implementations use interior mutability so the
/// same handle can be shared between the host and the plugin.
pub trait ConfigStore: Send + Sync {
    /// Load `section` from its backing document `file`.
    ///
    /// Returns `Ok(false)` when the document does not exist yet.
    fn load(&self, section: &str, file: &str) -> Result<bool, ConfigError>;

    /// Get the raw string value of `group.key`, or `None` if absent.
    fn get_string(&self, section: &str, group: &str, key: &str) -> Option<String>;

    /// Store `value` at `group.key`. Values are always persisted as strings.
    fn set_value(&self, section: &str, group: &str, key: &str, value: &str);

    /// Persist `section` to its backing document `file`.
    fn save(&self, section: &str, file: &str) -> Result<(), ConfigError>;

    /// Get `group.key` as a boolean, or `default` if absent or unrecognised.
    fn get_bool(&self, section: &str, group: &str, key: &str, default: bool) -> bool {
        self.get_string(section, group, key)
            .and_then(|value| parse_bool(&value))
            .unwrap_or(default)
    }

    /// Get `group.key` as a signed 32-bit integer, or `default` if absent or
    /// unparseable.
    fn get_i32(&self, section: &str, group: &str, key: &str, default: i32) -> i32 {
        self.get_string(section, group, key)
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or(default)
    }
}

/// Interpret a persisted boolean.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// [`ConfigStore`] backed by INI files in a single directory.
///
/// Each section lives in `<config_dir>/<file>.ini` and its groups map to INI
/// sections. Loaded documents are kept in memory until saved.
pub struct IniConfigStore {
    config_dir: PathBuf,
    documents: RwLock<HashMap<String, Ini>>,
}

impl IniConfigStore {
    /// Create a store rooted at `config_dir`. Nothing is read until `load`.
    pub fn new(config_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store rooted at [`default_config_dir`].
    pub fn with_default_dir() -> Self {
        Self::new(default_config_dir())
    }

    /// Directory holding the INI documents.
    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    /// Full path of the document backing `file`.
    pub fn document_path(&self, file: &str) -> PathBuf {
        self.config_dir.join(format!("{}.ini", file))
    }

    // Values are written verbatim, so the reader must not interpret
    // backslashes (Windows paths) or leading quotes (overlay names).
    fn parse_options() -> ParseOption {
        ParseOption {
            enabled_quote: false,
            enabled_escape: false,
            ..Default::default()
        }
    }
}

impl ConfigStore for IniConfigStore {
    fn load(&self, section: &str, file: &str) -> Result<bool, ConfigError> {
        let path = self.document_path(file);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No configuration document found");
            return Ok(false);
        }

        let document = Ini::load_from_file_opt(&path, Self::parse_options())
            .map_err(|e| ConfigError::from_ini(path.clone(), e))?;

        self.documents.write().insert(section.to_string(), document);
        tracing::debug!(section, path = %path.display(), "Loaded configuration document");
        Ok(true)
    }

    fn get_string(&self, section: &str, group: &str, key: &str) -> Option<String> {
        self.documents
            .read()
            .get(section)
            .and_then(|document| document.get_from(Some(group), key))
            .map(str::to_string)
    }

    fn set_value(&self, section: &str, group: &str, key: &str, value: &str) {
        self.documents
            .write()
            .entry(section.to_string())
            .or_insert_with(Ini::new)
            .with_section(Some(group))
            .set(key, value);
    }

    fn save(&self, section: &str, file: &str) -> Result<(), ConfigError> {
        let path = self.document_path(file);
        let documents = self.documents.read();
        let document = documents
            .get(section)
            .ok_or_else(|| ConfigError::UnknownSection(section.to_string()))?;

        std::fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::WriteFailed {
            path: self.config_dir.clone(),
            source,
        })?;

        document
            .write_to_file_policy(&path, EscapePolicy::Nothing)
            .map_err(|source| ConfigError::WriteFailed {
                path: path.clone(),
                source,
            })?;

        tracing::debug!(section, path = %path.display(), "Saved configuration document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_document_returns_false() {
        let temp = TempDir::new().unwrap();
        let store = IniConfigStore::new(temp.path());

        assert!(!store.load("XIPivot", "XIPivot").unwrap());
        assert_eq!(store.get_string("XIPivot", "settings", "root_path"), None);
    }

    #[test]
    fn test_set_save_load_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = IniConfigStore::new(temp.path().join("nested"));
        store.set_value("XIPivot", "settings", "root_path", "C:\\Games\\DATs");
        store.save("XIPivot", "XIPivot").unwrap();

        let reloaded = IniConfigStore::new(temp.path().join("nested"));
        assert!(reloaded.load("XIPivot", "XIPivot").unwrap());
        assert_eq!(
            reloaded.get_string("XIPivot", "settings", "root_path"),
            Some("C:\\Games\\DATs".to_string())
        );
    }

    #[test]
    fn test_quotes_survive_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = IniConfigStore::new(temp.path());
        store.set_value("XIPivot", "settings", "root_path", "\"C:/Program Files/FFXI\"");
        store.set_value("XIPivot", "overlays", "0", "'90s music");
        store.save("XIPivot", "XIPivot").unwrap();

        let reloaded = IniConfigStore::new(temp.path());
        assert!(reloaded.load("XIPivot", "XIPivot").unwrap());
        assert_eq!(
            reloaded.get_string("XIPivot", "settings", "root_path").as_deref(),
            Some("\"C:/Program Files/FFXI\"")
        );
        assert_eq!(
            reloaded.get_string("XIPivot", "overlays", "0").as_deref(),
            Some("'90s music")
        );
    }

    #[test]
    fn test_load_parses_hand_written_file() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("XIPivot.ini"),
            "[cache]\nenabled=Yes\nsize=4096\nmax_age=abc\n",
        )
        .unwrap();

        let store = IniConfigStore::new(temp.path());
        assert!(store.load("XIPivot", "XIPivot").unwrap());
        assert!(store.get_bool("XIPivot", "cache", "enabled", false));
        assert_eq!(store.get_i32("XIPivot", "cache", "size", 2048), 4096);
        assert_eq!(store.get_i32("XIPivot", "cache", "max_age", 600), 600);
    }

    #[test]
    fn test_get_bool_falls_back_to_default() {
        let temp = TempDir::new().unwrap();
        let store = IniConfigStore::new(temp.path());
        store.set_value("s", "g", "weird", "maybe");

        assert!(store.get_bool("s", "g", "missing", true));
        assert!(!store.get_bool("s", "g", "weird", false));
        assert!(store.get_bool("s", "g", "weird", true));
    }

    #[test]
    fn test_save_unknown_section_fails() {
        let temp = TempDir::new().unwrap();
        let store = IniConfigStore::new(temp.path());

        let err = store.save("XIPivot", "XIPivot").unwrap_err();
        assert!(matches!(err, ConfigError::UnknownSection(_)));
    }

    #[test]
    fn test_parse_bool_values() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool(" FALSE "), Some(false));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("off"), Some(false));
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn test_document_path() {
        let store = IniConfigStore::new("/tmp/cfg");
        assert_eq!(
            store.document_path("XIPivot"),
            PathBuf::from("/tmp/cfg/XIPivot.ini")
        );
    }
}
