//! Generate operation - schema scripts to Python modules.

use std::path::Path;

use eyre::{Context, Result};
use pgpy_codegen::pipeline::{GenerationOutput, Pipeline, Severity};
use pgpy_codegen_python::Generator;
use pgpy_core::module_file_path;
use pgpy_schema::SchemaObject;

use super::{ScriptRunner, discover, write::package_dir, write_output};
use crate::{
    config::Settings,
    reports::{
        GenerateReport, GenerationResult, ObjectCounts, PreviewFile, PreviewResult, RollResult,
        WrittenResult,
    },
};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    pub settings: &'a Settings,
    /// Package root the module tree is written under.
    pub output_root: &'a Path,
    /// Applies the schema scripts before writing, when set.
    pub runner: Option<&'a ScriptRunner>,
    /// Whether to preview without writing files or touching the database.
    pub dry_run: bool,
}

/// Execute the generate operation.
///
/// Reads the schema scripts, runs the pipeline, optionally rolls the scripts
/// into the database and writes the generated modules. Nothing is rolled or
/// written when generation fails.
pub fn generate(opts: &GenerateOptions<'_>) -> Result<GenerateReport> {
    let settings = opts.settings;
    let sources = discover(&settings.input)?;
    let output = Pipeline::new(&settings.module)
        .run(&sources, &Generator::new())
        .wrap_err_with(|| format!("failed to generate '{}'", settings.module))?;

    let roll = match opts.runner {
        Some(runner) if !opts.dry_run => {
            let summary = runner.roll(&settings.input, &sources)?;
            Some(RollResult {
                applied: summary.applied.len(),
                failed: summary.failed,
            })
        }
        _ => None,
    };

    let result = if opts.dry_run {
        GenerationResult::Preview(preview(opts.output_root, &output))
    } else {
        let summary = write_output(opts.output_root, &settings.module, &output)?;
        GenerationResult::Written(WrittenResult {
            package_dir: package_dir(opts.output_root, &settings.module),
            written: summary.written,
            unchanged: summary.unchanged.len(),
            removed: summary.removed,
        })
    };

    Ok(GenerateReport {
        module: settings.module.clone(),
        schema_files: sources.len(),
        counts: count_objects(&output),
        warnings: messages(&output, Severity::Warning),
        roll,
        result,
    })
}

fn preview(output_root: &Path, output: &GenerationOutput) -> PreviewResult {
    let files = output
        .all_modules()
        .map(|module| PreviewFile {
            path: module_file_path(output_root, &module.module_name)
                .display()
                .to_string(),
            content: module.source.clone(),
        })
        .collect();
    PreviewResult { files }
}

/// Diagnostic messages of one severity, with their locations.
pub(crate) fn messages(output: &GenerationOutput, severity: Severity) -> Vec<String> {
    output
        .diagnostics
        .iter()
        .filter(|d| d.severity == severity)
        .map(|d| match &d.location {
            Some(loc) => format!("{}\n  --> {}", d.message, loc),
            None => d.message.clone(),
        })
        .collect()
}

/// Recognized objects across every generated module.
pub(crate) fn count_objects(output: &GenerationOutput) -> ObjectCounts {
    let mut counts = ObjectCounts::default();
    for object in output.modules.iter().flat_map(|m| &m.objects) {
        match object {
            SchemaObject::Type(_) => counts.types += 1,
            SchemaObject::Domain(_) => counts.domains += 1,
            SchemaObject::Function(_) => counts.functions += 1,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use std::fs;

    use indoc::indoc;
    use tempfile::TempDir;

    use super::*;

    fn schema(root: &Path) {
        let types = root.join("schema").join("types");
        let functions = root.join("schema").join("functions");
        fs::create_dir_all(&types).unwrap();
        fs::create_dir_all(&functions).unwrap();
        fs::write(
            types.join("01_address.sql"),
            "CREATE TYPE address AS (street TEXT, zip INTEGER_NOTNULL);",
        )
        .unwrap();
        fs::write(
            functions.join("addresses.sql"),
            indoc! {"
                CREATE FUNCTION get_address(p_id INTEGER_NOTNULL)
                RETURNS address LANGUAGE sql AS $$ SELECT NULL::address $$;
            "},
        )
        .unwrap();
    }

    fn settings(root: &Path) -> Settings {
        Settings {
            input: root.join("schema"),
            module: "app.db".to_string(),
        }
    }

    #[test]
    fn test_generate_writes_package() {
        let temp = TempDir::new().unwrap();
        schema(temp.path());
        let settings = settings(temp.path());
        let output_root = temp.path().join("src");

        let report = generate(&GenerateOptions {
            settings: &settings,
            output_root: &output_root,
            runner: None,
            dry_run: false,
        })
        .unwrap();

        assert_eq!(report.schema_files, 2);
        assert_eq!(report.counts.types, 1);
        assert_eq!(report.counts.functions, 1);
        assert!(report.roll.is_none());

        let package = output_root.join("app").join("db");
        let address = fs::read_to_string(package.join("types").join("address.py")).unwrap();
        assert!(address.contains("class Address:"));
        let functions = fs::read_to_string(package.join("functions").join("addresses.py")).unwrap();
        assert!(functions.contains("from app.db.types.address import Address"));
        assert!(package.join("register.py").is_file());
        assert!(package.join("py.typed").is_file());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp = TempDir::new().unwrap();
        schema(temp.path());
        let settings = settings(temp.path());
        let output_root = temp.path().join("src");

        let report = generate(&GenerateOptions {
            settings: &settings,
            output_root: &output_root,
            runner: None,
            dry_run: true,
        })
        .unwrap();

        let GenerationResult::Preview(preview) = report.result else {
            panic!("expected a preview");
        };
        assert_eq!(preview.files.len(), 3);
        assert!(preview.files[0].path.ends_with("address.py"));
        assert!(!output_root.exists());
    }

    #[test]
    fn test_schema_error_writes_nothing() {
        let temp = TempDir::new().unwrap();
        schema(temp.path());
        fs::write(
            temp.path().join("schema").join("types").join("02_broken.sql"),
            "CREATE TYPE broken AS (a TEXT, b);",
        )
        .unwrap();
        let settings = settings(temp.path());
        let output_root = temp.path().join("src");

        let err = generate(&GenerateOptions {
            settings: &settings,
            output_root: &output_root,
            runner: None,
            dry_run: false,
        })
        .unwrap_err();

        assert!(err.downcast_ref::<pgpy_schema::Error>().is_some());
        assert!(!output_root.exists());
    }
}
