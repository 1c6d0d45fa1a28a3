//! Scalar setting commands: `show`, `get`, `set`, `path`.

use xipivot::config::SettingKey;

use crate::commands::Context;
use crate::error::CliError;

/// Show every setting, grouped as persisted.
pub fn run_show(context: &Context) -> Result<(), CliError> {
    let (settings, found) = context.load()?;

    println!("XIPivot Settings");
    println!("================");
    if !found {
        println!("(no settings file yet, showing defaults)");
    }
    println!();

    let mut current_group = "";
    for key in SettingKey::all() {
        let group = key.group();
        if group != current_group {
            if !current_group.is_empty() {
                println!();
            }
            println!("[{}]", group);
            current_group = group;
        }
        println!("  {} = {}", key.key_name(), key.get(&settings));
    }

    println!();
    println!("[overlays]");
    if settings.overlays.is_empty() {
        println!("  (none)");
    }
    for (index, overlay) in settings.overlays.iter().enumerate() {
        println!("  {} = {}", index, overlay);
    }

    Ok(())
}

/// Print one setting.
pub fn run_get(context: &Context, key: &str) -> Result<(), CliError> {
    let key: SettingKey = key.parse()?;
    let (settings, _) = context.load()?;

    println!("{}", key.get(&settings));
    Ok(())
}

/// Change one setting and persist.
pub fn run_set(context: &Context, key: &str, value: &str) -> Result<(), CliError> {
    let key: SettingKey = key.parse()?;
    // Setting the root path is itself enough to seed a missing file.
    let root_path = (key == SettingKey::RootPath).then_some(value);
    let mut settings = context.load_for_update(root_path)?;

    key.set(&mut settings, value)?;
    context.save(&settings)?;

    println!("Set {} = {}", key, key.get(&settings));
    Ok(())
}

/// Print the settings file path.
pub fn run_path(context: &Context) -> Result<(), CliError> {
    println!("{}", context.settings_path().display());
    Ok(())
}
