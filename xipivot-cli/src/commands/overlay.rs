//! Overlay management commands.

use clap::Subcommand;
use xipivot::config::Settings;

use crate::commands::Context;
use crate::error::CliError;

/// Overlay subcommands.
#[derive(Debug, Subcommand)]
pub enum OverlayCommands {
    /// List overlays in precedence order
    List,

    /// Append an overlay (lowest precedence)
    Add {
        /// Overlay path
        path: String,
    },

    /// Remove an overlay
    Remove {
        /// Overlay path, exactly as listed
        path: String,
    },
}

/// Run an overlay subcommand.
pub fn run(context: &Context, command: OverlayCommands) -> Result<(), CliError> {
    match command {
        OverlayCommands::List => {
            let (settings, _) = context.load()?;
            if settings.overlays.is_empty() {
                println!("No overlays configured.");
            }
            for (index, overlay) in settings.overlays.iter().enumerate() {
                println!("{:>3}  {}", index, overlay);
            }
            Ok(())
        }
        OverlayCommands::Add { path } => {
            let mut settings = context.load_for_update(None)?;
            add(&mut settings, &path)?;
            context.save(&settings)?;
            println!("Added overlay '{}' at position {}", path, settings.overlays.len() - 1);
            Ok(())
        }
        OverlayCommands::Remove { path } => {
            let mut settings = context.load_for_update(None)?;
            remove(&mut settings, &path)?;
            context.save(&settings)?;
            println!("Removed overlay '{}'", path);
            Ok(())
        }
    }
}

fn add(settings: &mut Settings, path: &str) -> Result<(), CliError> {
    if settings.overlays.iter().any(|overlay| overlay == path) {
        return Err(CliError::Overlay(format!("'{}' is already configured", path)));
    }
    if !settings.add_overlay(path) {
        return Err(CliError::Overlay("overlay path must not be empty".to_string()));
    }
    Ok(())
}

fn remove(settings: &mut Settings, path: &str) -> Result<(), CliError> {
    if settings.remove_overlay(path) {
        Ok(())
    } else {
        Err(CliError::Overlay(format!("'{}' is not configured", path)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_add_rejects_duplicates_and_empty() {
        let mut settings = Settings::with_root("/dats");
        add(&mut settings, "music").unwrap();

        assert!(add(&mut settings, "music").is_err());
        assert!(add(&mut settings, "").is_err());
        assert_eq!(settings.overlays, vec!["music"]);
    }

    #[test]
    fn test_remove_missing_overlay() {
        let mut settings = Settings::with_root("/dats");
        assert!(matches!(
            remove(&mut settings, "music"),
            Err(CliError::Overlay(_))
        ));
    }

    #[test]
    fn test_add_on_fresh_dir_does_not_write_cwd_root() {
        let temp = TempDir::new().unwrap();
        let context = Context::new(Some(temp.path().to_path_buf()));

        let err = run(&context, OverlayCommands::Add { path: "music".to_string() }).unwrap_err();
        assert!(matches!(err, CliError::NotInitialized(_)));
        assert!(!context.settings_path().exists());

        // Once seeded with an explicit root, adding keeps that root.
        context.save(&Settings::with_root("C:/FFXI/DATs")).unwrap();
        run(&context, OverlayCommands::Add { path: "music".to_string() }).unwrap();

        let (settings, _) = context.load().unwrap();
        assert_eq!(settings.root_path, "C:/FFXI/DATs");
        assert_eq!(settings.overlays, vec!["music"]);
    }

    #[test]
    fn test_add_then_remove_persists() {
        let temp = TempDir::new().unwrap();
        let context = Context::new(Some(temp.path().to_path_buf()));
        context.save(&Settings::with_root("C:/FFXI/DATs")).unwrap();

        run(&context, OverlayCommands::Add { path: "a".to_string() }).unwrap();
        run(&context, OverlayCommands::Add { path: "b".to_string() }).unwrap();
        run(&context, OverlayCommands::Remove { path: "a".to_string() }).unwrap();

        let (settings, _) = context.load().unwrap();
        assert_eq!(settings.overlays, vec!["b"]);
    }
}
