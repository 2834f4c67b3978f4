//! # Weldtime CLI
//!
//! Terminal front end for `weld_core`: estimates project files, writes
//! starter settings and projects, and prints results as tables or JSON.
//!
//! Logs go to stderr so `--format json` output can be piped.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "weld_cli=info,weld_core=warn";

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("weld_cli=debug,weld_core=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
