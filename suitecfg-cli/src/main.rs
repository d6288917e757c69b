//! `suitecfg` entry point: install diagnostics, parse arguments, run.

use std::io;

use clap::Parser;
use suitecfg_cli::{CommandLine, run};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV_VAR: &str = "SUITECFG_LOG";

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    init_tracing();
    let cli = CommandLine::parse();
    let mut stdout = io::stdout().lock();
    run(&cli, &mut stdout).map_err(color_eyre::eyre::Report::from)
}
