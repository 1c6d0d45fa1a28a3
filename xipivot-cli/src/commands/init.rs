//! Init command - create the settings file.

use crate::commands::Context;
use crate::error::CliError;

/// Run the init command.
///
/// Loads whatever is already persisted and writes it back, so an existing
/// file keeps its values. A missing file needs `root_path`; with it, the
/// file is seeded with defaults around that root.
pub fn run(context: &Context, root_path: Option<&str>) -> Result<(), CliError> {
    let existed = context.settings_path().exists();
    let settings = context.load_for_update(root_path)?;
    context.save(&settings)?;

    if existed {
        println!("Settings file already existed; normalised in place.");
    } else {
        println!("Created settings file with defaults.");
    }
    println!("Settings file: {}", context.settings_path().display());
    println!("Root path: {}", settings.root_path);
    println!();
    println!("Use 'xipivot overlay add <path>' to register overlays.");
    Ok(())
}
