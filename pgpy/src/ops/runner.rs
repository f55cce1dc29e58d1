//! Applying schema scripts to a database through `psql`.

use std::{
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
    process::Command,
};

use eyre::{Context, Result};
use pgpy_codegen::sources::{SchemaSources, SourceFile};
use pgpy_codegen_python::NOT_NULL_DOMAINS;
use tracing::{error, info};

use crate::config::DatabaseSettings;

const PSQL: &str = "psql";
const PASSWORD_ENV: &str = "PGPASSWORD";

/// Scripts that ran and scripts that failed during one roll.
#[derive(Debug, Default)]
pub struct RollSummary {
    pub applied: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

/// Runs `.sql` scripts with `psql` against one database.
pub struct ScriptRunner {
    settings: DatabaseSettings,
    password: String,
    program: OsString,
}

impl ScriptRunner {
    /// Create a runner, reading the password from the settings' password file.
    pub fn new(settings: DatabaseSettings) -> Result<Self> {
        let content = std::fs::read_to_string(&settings.password_file).wrap_err_with(|| {
            format!(
                "failed to read password file {}",
                settings.password_file.display()
            )
        })?;
        let password = content.lines().next().unwrap_or_default().trim_end().to_string();

        Ok(Self {
            settings,
            password,
            program: PSQL.into(),
        })
    }

    /// Use another executable in place of `psql`.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    /// Run one script.
    ///
    /// Returns `Ok(false)` when `psql` ran but reported a failure; its output is
    /// logged. Fails only when `psql` cannot be started.
    pub fn run_script(&self, script: &Path) -> Result<bool> {
        info!(script = %script.display(), "running script");

        let output = Command::new(&self.program)
            .arg("-h")
            .arg(&self.settings.host)
            .arg("-p")
            .arg(self.settings.port.to_string())
            .arg("-d")
            .arg(&self.settings.name)
            .arg("-U")
            .arg(&self.settings.user)
            .arg("-f")
            .arg(script)
            .arg("-q")
            .env(PASSWORD_ENV, &self.password)
            .output()
            .wrap_err_with(|| format!("failed to start {}", self.program.to_string_lossy()))?;

        if output.status.success() {
            return Ok(true);
        }

        let mut message = String::from_utf8_lossy(&output.stdout).into_owned();
        message.push_str(&String::from_utf8_lossy(&output.stderr));
        error!(
            script = %script.display(),
            status = %output.status,
            "script failed:\n{}",
            message.trim_end()
        );
        Ok(false)
    }

    /// Apply the built-in not-null domains, then every type, view and function
    /// script under `input`, in that order.
    ///
    /// A failing script does not stop the roll.
    pub fn roll(&self, input: &Path, sources: &SchemaSources) -> Result<RollSummary> {
        let mut summary = RollSummary::default();

        let builtins = builtin_domains_script()?;
        self.record(builtins.path(), &mut summary)?;

        for group in [&sources.type_files, &sources.view_files, &sources.function_files] {
            for file in sorted(group) {
                self.record(&input.join(&file.path), &mut summary)?;
            }
        }

        Ok(summary)
    }

    fn record(&self, script: &Path, summary: &mut RollSummary) -> Result<()> {
        if self.run_script(script)? {
            summary.applied.push(script.to_path_buf());
        } else {
            summary.failed.push(script.to_path_buf());
        }
        Ok(())
    }
}

/// The `CREATE DOMAIN ... NOT NULL` statements every generated module relies on.
pub fn builtin_domains_sql() -> String {
    NOT_NULL_DOMAINS
        .iter()
        .map(|domain| domain.create_statement() + "\n")
        .collect()
}

fn builtin_domains_script() -> Result<tempfile::NamedTempFile> {
    let mut script = tempfile::Builder::new()
        .prefix("pgpy-domains-")
        .suffix(".sql")
        .tempfile()
        .wrap_err("failed to create the built-in domain script")?;
    script
        .write_all(builtin_domains_sql().as_bytes())
        .wrap_err("failed to write the built-in domain script")?;
    Ok(script)
}

fn sorted(files: &[SourceFile]) -> Vec<&SourceFile> {
    let mut files: Vec<_> = files.iter().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}
