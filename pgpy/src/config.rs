//! Optional `pgpy.toml` project configuration.
//!
//! ```toml
//! [generate]
//! input = "schema"
//! output = "src"
//! module = "app.db"
//!
//! [database]
//! host = "localhost"
//! port = 5432
//! name = "app"
//! user = "app"
//! password_file = ".pgpass"
//! ```
//!
//! Every value can also be given on the command line, which wins over the file.
//! Relative paths in the file resolve against the file's directory.

use std::path::{Path, PathBuf};

use eyre::{Context, Result, eyre};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "pgpy.toml";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 5432;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub generate: GenerateConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerateConfig {
    /// Schema root holding `types/`, `views/` and `functions/`.
    pub input: Option<PathBuf>,
    /// Package root the generated module tree is written under.
    pub output: Option<PathBuf>,
    /// Dotted name of the generated root module.
    pub module: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
    pub user: Option<String>,
    /// File whose first line is the database password.
    pub password_file: Option<PathBuf>,
}

/// Values given on the command line.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub module: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub name: Option<String>,
    pub user: Option<String>,
    pub password_file: Option<PathBuf>,
}

/// Resolved schema settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input: PathBuf,
    pub module: String,
}

/// Resolved connection settings for the script runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password_file: PathBuf,
}

impl Config {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).wrap_err("invalid pgpy configuration")
    }

    /// Load `path`, or an empty configuration when `path` does not exist and
    /// was not asked for explicitly.
    pub fn load(path: &Path, explicit: bool) -> Result<Self> {
        if !path.exists() && !explicit {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let mut config =
            Self::parse(&content).wrap_err_with(|| format!("in {}", path.display()))?;

        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    fn resolve_paths(&mut self, base: &Path) {
        for path in [
            &mut self.generate.input,
            &mut self.generate.output,
            &mut self.database.password_file,
        ]
        .into_iter()
        .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }

    pub fn settings(&self, overrides: &Overrides) -> Result<Settings> {
        let input = overrides
            .input
            .clone()
            .or_else(|| self.generate.input.clone())
            .ok_or_else(|| missing("--input", "generate.input"))?;
        let module = overrides
            .module
            .clone()
            .or_else(|| self.generate.module.clone())
            .ok_or_else(|| missing("--module", "generate.module"))?;

        if module.split('.').any(|segment| segment.trim().is_empty()) {
            return Err(eyre!("'{module}' is not a dotted module name"));
        }

        Ok(Settings { input, module })
    }

    /// Package root to write generated modules under.
    pub fn output(&self, overrides: &Overrides) -> Result<PathBuf> {
        overrides
            .output
            .clone()
            .or_else(|| self.generate.output.clone())
            .ok_or_else(|| missing("--output", "generate.output"))
    }

    pub fn database(&self, overrides: &Overrides) -> Result<DatabaseSettings> {
        let db = &self.database;
        Ok(DatabaseSettings {
            host: overrides
                .host
                .clone()
                .or_else(|| db.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides.port.or(db.port).unwrap_or(DEFAULT_PORT),
            name: overrides
                .name
                .clone()
                .or_else(|| db.name.clone())
                .ok_or_else(|| missing("--dbname", "database.name"))?,
            user: overrides
                .user
                .clone()
                .or_else(|| db.user.clone())
                .ok_or_else(|| missing("--dbuser", "database.user"))?,
            password_file: overrides
                .password_file
                .clone()
                .or_else(|| db.password_file.clone())
                .ok_or_else(|| missing("--dbpassword", "database.password_file"))?,
        })
    }
}

fn missing(flag: &str, key: &str) -> eyre::Report {
    eyre!("missing {flag}: pass it on the command line or set `{key}` in {CONFIG_FILE}")
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_flags_override_file() {
        let config = Config::parse(
            r#"
            [generate]
            input = "schema"
            output = "src"
            module = "app.db"
            "#,
        )
        .unwrap();
        let overrides = Overrides {
            module: Some("other.db".into()),
            ..Default::default()
        };

        let settings = config.settings(&overrides).unwrap();

        assert_eq!(settings.input, PathBuf::from("schema"));
        assert_eq!(settings.module, "other.db");
        assert_eq!(config.output(&overrides).unwrap(), PathBuf::from("src"));
    }

    #[test]
    fn test_missing_value_names_flag_and_key() {
        let err = Config::default()
            .settings(&Overrides::default())
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("--input"));
        assert!(message.contains("generate.input"));
    }

    #[test]
    fn test_rejects_empty_module_segment() {
        let overrides = Overrides {
            input: Some("schema".into()),
            module: Some("app..db".into()),
            ..Default::default()
        };
        assert!(Config::default().settings(&overrides).is_err());
    }

    #[test]
    fn test_database_defaults() {
        let config = Config::parse(
            r#"
            [database]
            name = "app"
            user = "owner"
            password_file = "/run/secrets/pg"
            "#,
        )
        .unwrap();

        let db = config.database(&Overrides::default()).unwrap();

        assert_eq!(db.host, DEFAULT_HOST);
        assert_eq!(db.port, 5432);
        assert_eq!(db.name, "app");
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        assert!(Config::parse("[generate]\nschema = \"x\"").is_err());
    }

    #[test]
    fn test_missing_implicit_file_is_empty() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join(CONFIG_FILE), false).unwrap();
        assert!(config.generate.input.is_none());
        assert!(Config::load(&temp.path().join(CONFIG_FILE), true).is_err());
    }

    #[test]
    fn test_relative_paths_resolve_against_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "[generate]\ninput = \"schema\"\noutput = \"/abs\"\n").unwrap();

        let config = Config::load(&path, true).unwrap();

        assert_eq!(config.generate.input, Some(temp.path().join("schema")));
        assert_eq!(config.generate.output, Some(PathBuf::from("/abs")));
    }
}
