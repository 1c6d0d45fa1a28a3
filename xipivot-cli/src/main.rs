//! XIPivot CLI - inspect and edit the plugin's persisted settings
//!
//! Reads and writes the same `XIPivot.ini` the plugin uses, so overlays and
//! cache settings can be changed without starting the client.

mod commands;
mod error;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use xipivot::logging::{init_logging, LoggingConfig};

use crate::commands::overlay::OverlayCommands;
use crate::commands::Context;

#[derive(Debug, Parser)]
#[command(name = "xipivot", version, about = "Manage XIPivot DAT overlay settings")]
struct Cli {
    /// Directory holding XIPivot.ini (defaults to the platform config dir)
    #[arg(long, global = true, value_name = "DIR")]
    config_dir: Option<PathBuf>,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create the settings file with defaults (existing values are kept)
    Init {
        /// DAT root directory; required when no settings file exists yet
        #[arg(long, value_name = "DIR")]
        root_path: Option<String>,
    },

    /// Show all settings
    Show,

    /// Get a setting value
    Get {
        /// Setting in format group.key (e.g., cache.size)
        key: String,
    },

    /// Set a setting value
    Set {
        /// Setting in format group.key (e.g., cache.size)
        key: String,

        /// Value to set
        value: String,
    },

    /// Manage overlays
    Overlay {
        #[command(subcommand)]
        command: OverlayCommands,
    },

    /// Show the settings file path
    Path,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _logging = match init_logging(&LoggingConfig {
        debug: cli.verbose,
        log_file: cli.log_file.clone(),
    }) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let context = Context::new(cli.config_dir);
    let result = match cli.command {
        Commands::Init { root_path } => commands::init::run(&context, root_path.as_deref()),
        Commands::Show => commands::settings::run_show(&context),
        Commands::Get { key } => commands::settings::run_get(&context, &key),
        Commands::Set { key, value } => commands::settings::run_set(&context, &key, &value),
        Commands::Overlay { command } => commands::overlay::run(&context, command),
        Commands::Path => commands::settings::run_path(&context),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
