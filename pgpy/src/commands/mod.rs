mod check;
mod generate;

use std::path::{Path, PathBuf};

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use eyre::Result;
use generate::GenerateCommand;

use crate::config::{CONFIG_FILE, Config, Overrides};

/// Print a failed run, rendering schema errors with their statement.
pub(crate) fn print_error(report: eyre::Report) {
    let chain: Vec<String> = report.chain().map(|cause| cause.to_string()).collect();
    match report.downcast::<pgpy_schema::Error>() {
        Ok(schema_error) => {
            let message = schema_error.to_string();
            let context: Vec<_> = chain.into_iter().filter(|c| *c != message).collect();
            if !context.is_empty() {
                eprintln!("error: {}", context.join(": "));
            }
            eprintln!("{:?}", miette::Report::new(schema_error));
        }
        Err(report) => eprintln!("{:?}", report),
    }
}

/// Extension trait for exiting on errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                print_error(e);
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "pgpy")]
#[command(version)]
#[command(about = "Generate typed psycopg bindings from PostgreSQL schema scripts")]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Python modules from the schema scripts
    Generate(GenerateCommand),

    /// Validate the schema scripts without writing anything
    Check(CheckCommand),
}

/// Where the schema lives and what to call the generated module.
#[derive(Args)]
pub(crate) struct SchemaArgs {
    /// Path to pgpy.toml (defaults to ./pgpy.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory containing the types/, views/ and functions/ scripts
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Dotted name of the generated module (e.g. 'api.db')
    #[arg(short, long)]
    pub module: Option<String>,
}

impl SchemaArgs {
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => Config::load(path, true),
            None => Config::load(Path::new(CONFIG_FILE), false),
        }
    }

    pub fn overrides(&self) -> Overrides {
        Overrides {
            input: self.input.clone(),
            module: self.module.clone(),
            ..Default::default()
        }
    }
}
