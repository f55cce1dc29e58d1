use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use tracing::error;

use super::{SchemaArgs, UnwrapOrExit, print_error};
use crate::{
    config::Overrides,
    ops::{self, GenerateOptions, ScriptRunner},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    #[command(flatten)]
    pub schema: SchemaArgs,

    /// Root directory of the Python package the module is written into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Keep running and regenerate whenever a schema script changes
    #[arg(short, long)]
    pub watch: bool,

    /// Apply the schema scripts to the database with psql before generating
    #[arg(long)]
    pub roll: bool,

    /// Preview generated code without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    #[command(flatten)]
    pub database: DatabaseArgs,
}

/// Connection for `--roll`.
#[derive(Args)]
pub struct DatabaseArgs {
    /// Database host [default: localhost]
    #[arg(long, value_name = "HOST", help_heading = "Database")]
    pub dbhost: Option<String>,

    /// Database port [default: 5432]
    #[arg(long, value_name = "PORT", help_heading = "Database")]
    pub dbport: Option<u16>,

    /// Database name
    #[arg(long, value_name = "NAME", help_heading = "Database")]
    pub dbname: Option<String>,

    /// Database user
    #[arg(long, value_name = "USER", help_heading = "Database")]
    pub dbuser: Option<String>,

    /// File containing the database password
    #[arg(long, value_name = "FILE", help_heading = "Database")]
    pub dbpassword: Option<PathBuf>,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let config = self.schema.load_config()?;
        let overrides = self.overrides();
        let settings = config.settings(&overrides)?;
        let output_root = config.output(&overrides)?;

        let runner = if self.roll {
            Some(ScriptRunner::new(config.database(&overrides)?)?)
        } else {
            None
        };

        let opts = GenerateOptions {
            settings: &settings,
            output_root: &output_root,
            runner: runner.as_ref(),
            dry_run: self.dry_run,
        };

        if !self.watch {
            let report = ops::generate(&opts).unwrap_or_exit();
            report.render(&mut TerminalOutput::new());
            return Ok(());
        }

        self.generate_and_report(&opts);
        ops::watch(&settings.input, || {
            self.generate_and_report(&opts);
            Ok(())
        })
    }

    /// One watch-mode run. Failures are printed and the watch goes on.
    fn generate_and_report(&self, opts: &GenerateOptions<'_>) {
        match ops::generate(opts) {
            Ok(report) => report.render(&mut TerminalOutput::new()),
            Err(e) => {
                error!("generation failed, waiting for the next change");
                print_error(e);
            }
        }
    }

    fn overrides(&self) -> Overrides {
        Overrides {
            output: self.output.clone(),
            host: self.database.dbhost.clone(),
            port: self.database.dbport,
            name: self.database.dbname.clone(),
            user: self.database.dbuser.clone(),
            password_file: self.database.dbpassword.clone(),
            ..self.schema.overrides()
        }
    }
}
