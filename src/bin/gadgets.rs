use clap::Parser;
use colored::Colorize;
use gadgets_core::cli::{self, Cli};
use gadgets_core::exit::GadgetsExit;
use tracing_subscriber::EnvFilter;

/// Env var holding a `tracing` filter, e.g. `gadgets_core=trace`.
const LOG_ENV: &str = "GADGETS_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose {
        "gadgets_core=debug"
    } else {
        "gadgets_core=warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> GadgetsExit {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli::dispatch::execute(cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("{} {e:#}", "Error:".red());
            GadgetsExit::Error
        }
    }
}
