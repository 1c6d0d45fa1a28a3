//! Persisted plugin settings.
//!
//! `Settings` is default-constructed, then [`Settings::load`] overwrites every
//! field it finds in the store. The plugin always calls [`Settings::save`]
//! afterwards, so a first run seeds the store with the defaults.

use super::error::ConfigError;
use super::list::{read_list, write_list};
use super::store::ConfigStore;

/// Name of the configuration section (and backing document).
pub const SECTION_NAME: &str = "XIPivot";

/// Bytes in one mebibyte. The cache size is persisted in whole MiB.
pub const BYTES_PER_MIB: u64 = 1_048_576;

/// Default memory cache budget in MiB.
pub const DEFAULT_CACHE_SIZE_MIB: u32 = 2048;

/// Default age, in seconds, after which unused cache entries are purged.
pub const DEFAULT_PURGE_DELAY_SECS: u32 = 600;

const GROUP_SETTINGS: &str = "settings";
const GROUP_OVERLAYS: &str = "overlays";
const GROUP_CACHE: &str = "cache";

/// User-facing plugin configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Directory holding replacement DATs.
    pub root_path: String,

    /// Overlay search paths, in precedence order. Duplicates are kept.
    pub overlays: Vec<String>,

    /// Verbose logging in the redirector and cache.
    pub debug_log: bool,

    /// Whether the memory cache is armed.
    pub cache_enabled: bool,

    /// Memory cache budget in bytes.
    pub cache_size: u64,

    /// Seconds before an unused cache entry may be purged.
    pub cache_purge_delay: u32,
}

impl Default for Settings {
    fn default() -> Self {
        let work_dir = std::env::current_dir()
            .map(|dir| dir.to_string_lossy().into_owned())
            .unwrap_or_else(|_| ".".to_string());
        Self::with_root(format!("{}/DATs", work_dir))
    }
}

impl Settings {
    /// Default settings with an explicit root path.
    pub fn with_root(root_path: impl Into<String>) -> Self {
        Self {
            root_path: root_path.into(),
            overlays: Vec::new(),
            debug_log: false,
            cache_enabled: false,
            cache_size: u64::from(DEFAULT_CACHE_SIZE_MIB) * BYTES_PER_MIB,
            cache_purge_delay: DEFAULT_PURGE_DELAY_SECS,
        }
    }

    /// Load every field from `store`.
    ///
    /// Returns `Ok(false)` and leaves the current values untouched when the
    /// store has no section for the plugin. Fields missing from an existing
    /// section fall back to their persisted defaults, except `root_path`
    /// which keeps its current value.
    pub fn load(&mut self, store: &dyn ConfigStore) -> Result<bool, ConfigError> {
        if !store.load(SECTION_NAME, SECTION_NAME)? {
            return Ok(false);
        }

        if let Some(root_path) = store.get_string(SECTION_NAME, GROUP_SETTINGS, "root_path") {
            self.root_path = root_path;
        }
        self.debug_log = store.get_bool(SECTION_NAME, GROUP_SETTINGS, "debug_log", true);

        self.overlays = read_list(store, SECTION_NAME, GROUP_OVERLAYS);

        self.cache_enabled = store.get_bool(SECTION_NAME, GROUP_CACHE, "enabled", false);
        let size_mib = store.get_i32(
            SECTION_NAME,
            GROUP_CACHE,
            "size",
            DEFAULT_CACHE_SIZE_MIB as i32,
        );
        self.cache_size = u64::from(clamp_unsigned(size_mib)) * BYTES_PER_MIB;
        self.cache_purge_delay = clamp_unsigned(store.get_i32(
            SECTION_NAME,
            GROUP_CACHE,
            "max_age",
            DEFAULT_PURGE_DELAY_SECS as i32,
        ));

        tracing::debug!(
            root_path = %self.root_path,
            overlays = self.overlays.len(),
            cache_enabled = self.cache_enabled,
            cache_size_mib = self.cache_size_mib(),
            "Loaded settings"
        );
        Ok(true)
    }

    /// Write every field back to `store` and commit the section.
    ///
    /// The cache size is written in whole MiB; any sub-MiB remainder is
    /// dropped.
    pub fn save(&self, store: &dyn ConfigStore) -> Result<(), ConfigError> {
        store.set_value(SECTION_NAME, GROUP_SETTINGS, "root_path", &self.root_path);
        store.set_value(
            SECTION_NAME,
            GROUP_SETTINGS,
            "debug_log",
            bool_str(self.debug_log),
        );

        write_list(store, SECTION_NAME, GROUP_OVERLAYS, &self.overlays);

        store.set_value(
            SECTION_NAME,
            GROUP_CACHE,
            "enabled",
            bool_str(self.cache_enabled),
        );
        store.set_value(
            SECTION_NAME,
            GROUP_CACHE,
            "size",
            &self.cache_size_mib().to_string(),
        );
        store.set_value(
            SECTION_NAME,
            GROUP_CACHE,
            "max_age",
            &self.cache_purge_delay.to_string(),
        );

        store.save(SECTION_NAME, SECTION_NAME)
    }

    /// Cache budget in whole MiB, truncated.
    pub fn cache_size_mib(&self) -> u64 {
        self.cache_size / BYTES_PER_MIB
    }

    /// Set the cache budget from a MiB count.
    pub fn set_cache_size_mib(&mut self, mib: u32) {
        self.cache_size = u64::from(mib) * BYTES_PER_MIB;
    }

    /// Append an overlay at the lowest precedence.
    ///
    /// Empty paths are refused, since an empty entry would end the persisted
    /// list early. Returns whether the overlay was added.
    pub fn add_overlay(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if path.is_empty() {
            return false;
        }
        self.overlays.push(path);
        true
    }

    /// Remove the first overlay equal to `path`. Returns whether one was found.
    pub fn remove_overlay(&mut self, path: &str) -> bool {
        match self.overlays.iter().position(|overlay| overlay == path) {
            Some(index) => {
                self.overlays.remove(index);
                true
            }
            None => false,
        }
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn clamp_unsigned(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::list::tests::MemoryStore;
    use crate::config::IniConfigStore;
    use tempfile::TempDir;

    fn populated_store() -> MemoryStore {
        let store = MemoryStore::default();
        store.insert(SECTION_NAME, "settings", "root_path", "C:/x");
        store.insert(SECTION_NAME, "settings", "debug_log", "true");
        store.insert(SECTION_NAME, "overlays", "0", "a");
        store.insert(SECTION_NAME, "overlays", "1", "b");
        store.insert(SECTION_NAME, "cache", "enabled", "true");
        store.insert(SECTION_NAME, "cache", "size", "4096");
        store.insert(SECTION_NAME, "cache", "max_age", "120");
        store
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(!settings.cache_enabled);
        assert!(!settings.debug_log);
        assert_eq!(settings.cache_purge_delay, 600);
        assert_eq!(settings.cache_size, 2048 * BYTES_PER_MIB);
        assert!(settings.overlays.is_empty());
        assert!(settings.root_path.ends_with("/DATs"));
    }

    #[test]
    fn test_load_populated_store() {
        let store = populated_store();
        let mut settings = Settings::with_root("/default");

        assert!(settings.load(&store).unwrap());
        assert_eq!(settings.root_path, "C:/x");
        assert!(settings.debug_log);
        assert_eq!(settings.overlays, vec!["a", "b"]);
        assert!(settings.cache_enabled);
        assert_eq!(settings.cache_size, 4096 * BYTES_PER_MIB);
        assert_eq!(settings.cache_purge_delay, 120);
    }

    #[test]
    fn test_load_missing_section_keeps_defaults() {
        let store = MemoryStore::default();
        let mut settings = Settings::with_root("/default");

        assert!(!settings.load(&store).unwrap());
        assert_eq!(settings, Settings::with_root("/default"));
    }

    #[test]
    fn test_load_missing_keys_use_persisted_defaults() {
        let store = MemoryStore::default();
        store.insert(SECTION_NAME, "cache", "enabled", "false");
        let mut settings = Settings::with_root("/default");

        assert!(settings.load(&store).unwrap());
        assert_eq!(settings.root_path, "/default");
        // An existing section without debug_log turns debug logging on.
        assert!(settings.debug_log);
        assert_eq!(settings.cache_size, 2048 * BYTES_PER_MIB);
        assert_eq!(settings.cache_purge_delay, 600);
    }

    #[test]
    fn test_load_overlay_gap_truncates() {
        let store = MemoryStore::default();
        store.insert(SECTION_NAME, "overlays", "0", "a");
        store.insert(SECTION_NAME, "overlays", "1", "b");
        store.insert(SECTION_NAME, "overlays", "3", "d");
        let mut settings = Settings::with_root("/default");

        settings.load(&store).unwrap();
        assert_eq!(settings.overlays, vec!["a", "b"]);
    }

    #[test]
    fn test_load_negative_values_clamp_to_zero() {
        let store = MemoryStore::default();
        store.insert(SECTION_NAME, "cache", "size", "-5");
        store.insert(SECTION_NAME, "cache", "max_age", "-1");
        let mut settings = Settings::with_root("/default");

        settings.load(&store).unwrap();
        assert_eq!(settings.cache_size, 0);
        assert_eq!(settings.cache_purge_delay, 0);
    }

    #[test]
    fn test_save_writes_string_literals() {
        let store = MemoryStore::default();
        let mut settings = Settings::with_root("/dats");
        settings.cache_enabled = true;
        settings.save(&store).unwrap();

        let get = |group: &str, key: &str| store.get_string(SECTION_NAME, group, key);
        assert_eq!(get("settings", "debug_log").as_deref(), Some("false"));
        assert_eq!(get("cache", "enabled").as_deref(), Some("true"));
        assert_eq!(get("cache", "size").as_deref(), Some("2048"));
        assert_eq!(get("cache", "max_age").as_deref(), Some("600"));
    }

    #[test]
    fn test_save_shrink_then_reload() {
        let temp = TempDir::new().unwrap();
        let store = IniConfigStore::new(temp.path());

        let mut settings = Settings::with_root("/dats");
        settings.overlays = vec!["a".into(), "b".into(), "c".into()];
        settings.save(&store).unwrap();

        settings.overlays.truncate(1);
        settings.save(&store).unwrap();

        let fresh_store = IniConfigStore::new(temp.path());
        let mut reloaded = Settings::with_root("/other");
        assert!(reloaded.load(&fresh_store).unwrap());
        assert_eq!(reloaded.overlays, vec!["a"]);
        assert_eq!(
            fresh_store.get_string(SECTION_NAME, "overlays", "1").as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_save_skips_empty_overlays() {
        let temp = TempDir::new().unwrap();
        let store = IniConfigStore::new(temp.path());

        let mut settings = Settings::with_root("/dats");
        settings.overlays = vec!["a".into(), String::new(), "b".into()];
        settings.save(&store).unwrap();

        let fresh_store = IniConfigStore::new(temp.path());
        let mut reloaded = Settings::with_root("/other");
        assert!(reloaded.load(&fresh_store).unwrap());
        assert_eq!(reloaded.overlays, vec!["a", "b"]);
    }

    #[test]
    fn test_quoted_values_reload_verbatim() {
        let temp = TempDir::new().unwrap();
        let store = IniConfigStore::new(temp.path());

        let mut settings = Settings::with_root("\"C:/Program Files/FFXI\"");
        settings.overlays = vec!["'90s music".into(), "hd".into()];
        settings.save(&store).unwrap();

        let fresh_store = IniConfigStore::new(temp.path());
        let mut reloaded = Settings::with_root("/other");
        assert!(reloaded.load(&fresh_store).unwrap());
        assert_eq!(reloaded.root_path, "\"C:/Program Files/FFXI\"");
        assert_eq!(reloaded.overlays, vec!["'90s music", "hd"]);
    }

    #[test]
    fn test_cache_size_truncates_to_whole_mib() {
        let temp = TempDir::new().unwrap();
        let store = IniConfigStore::new(temp.path());

        let mut settings = Settings::with_root("/dats");
        settings.cache_size = BYTES_PER_MIB * 3 + 500;
        settings.save(&store).unwrap();

        let mut reloaded = Settings::with_root("/dats");
        reloaded.load(&IniConfigStore::new(temp.path())).unwrap();
        assert_eq!(reloaded.cache_size, BYTES_PER_MIB * 3);
    }

    #[test]
    fn test_first_run_seeds_defaults() {
        let temp = TempDir::new().unwrap();
        let store = IniConfigStore::new(temp.path());
        let mut settings = Settings::with_root("/dats");

        assert!(!settings.load(&store).unwrap());
        settings.save(&store).unwrap();

        let mut reloaded = Settings::with_root("/elsewhere");
        assert!(reloaded.load(&IniConfigStore::new(temp.path())).unwrap());
        assert_eq!(reloaded, settings);
    }

    #[test]
    fn test_add_and_remove_overlay() {
        let mut settings = Settings::with_root("/dats");
        assert!(settings.add_overlay("music"));
        assert!(settings.add_overlay("music"));
        assert!(!settings.add_overlay(""));
        assert_eq!(settings.overlays, vec!["music", "music"]);

        assert!(settings.remove_overlay("music"));
        assert_eq!(settings.overlays, vec!["music"]);
        assert!(!settings.remove_overlay("missing"));
    }

    #[test]
    fn test_cache_size_mib_helpers() {
        let mut settings = Settings::with_root("/dats");
        settings.set_cache_size_mib(512);
        assert_eq!(settings.cache_size, 512 * BYTES_PER_MIB);
        assert_eq!(settings.cache_size_mib(), 512);
    }
}
