mod commands;
mod config;
mod ops;
mod reports;

use clap::Parser;
use eyre::Result;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

/// Environment variable holding the log filter directives.
const LOG_ENV: &str = "PGPY_LOG";

fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| "pgpy=info".into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    Cli::parse().run()
}
