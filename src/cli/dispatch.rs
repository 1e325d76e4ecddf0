//! Command dispatch, kept out of the binary.

use super::args::{Cli, Commands};
use super::handlers::{handle_fix, handle_rules, handle_scan};
use crate::config::Config;
use crate::exit::GadgetsExit;
use anyhow::Result;
use colored::Colorize;

/// Loads configuration and runs the parsed command.
///
/// # Errors
/// Returns error if the command handler fails.
pub fn execute(cli: Cli) -> Result<GadgetsExit> {
    let Some(command) = cli.command else {
        use clap::CommandFactory;
        let _ = Cli::command().print_help();
        return Ok(GadgetsExit::Success);
    };

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {e}", "Config error:".red());
            return Ok(GadgetsExit::InvalidInput);
        }
    };

    match command {
        Commands::Scan { paths, format } => handle_scan(&config, &paths, format),
        Commands::Fix { paths, dry_run } => Ok(handle_fix(&config, &paths, dry_run)),
        Commands::Rules => Ok(handle_rules(&config)),
    }
}
