//! CLI command implementations.

pub mod init;
pub mod overlay;
pub mod settings;

use std::path::PathBuf;

use xipivot::config::{IniConfigStore, Settings, SECTION_NAME};

use crate::error::CliError;

/// Settings store shared by all commands.
pub struct Context {
    store: IniConfigStore,
}

impl Context {
    /// Open the store in `config_dir`, or the default config directory.
    pub fn new(config_dir: Option<PathBuf>) -> Self {
        let store = match config_dir {
            Some(dir) => IniConfigStore::new(dir),
            None => IniConfigStore::with_default_dir(),
        };
        Self { store }
    }

    /// Path of the settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.store.document_path(SECTION_NAME)
    }

    /// Load settings, falling back to defaults when the file does not exist.
    ///
    /// The flag reports whether a settings file was found.
    pub fn load(&self) -> Result<(Settings, bool), CliError> {
        let mut settings = Settings::default();
        let found = settings.load(&self.store)?;
        tracing::debug!(path = %self.settings_path().display(), found, "Loaded settings");
        Ok((settings, found))
    }

    /// Load settings that a command is about to modify and save.
    ///
    /// A missing file is only seeded when `root_path` is given: the default
    /// root is derived from the working directory, and the CLI's working
    /// directory is not the game's. A given `root_path` also replaces the
    /// persisted one.
    pub fn load_for_update(&self, root_path: Option<&str>) -> Result<Settings, CliError> {
        let (mut settings, found) = self.load()?;
        match root_path {
            Some(root) => settings.root_path = root.to_string(),
            None if !found => return Err(CliError::NotInitialized(self.settings_path())),
            None => {}
        }
        Ok(settings)
    }

    /// Persist `settings`.
    pub fn save(&self, settings: &Settings) -> Result<(), CliError> {
        settings.save(&self.store)?;
        tracing::debug!(path = %self.settings_path().display(), "Saved settings");
        Ok(())
    }
}
