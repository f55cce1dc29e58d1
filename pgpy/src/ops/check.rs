//! Check operation - schema validation without writing.

use eyre::{Context, Result};
use pgpy_codegen::pipeline::{Pipeline, Severity};
use pgpy_codegen_python::Generator;

use super::{
    discover,
    generate::{count_objects, messages},
};
use crate::{config::Settings, reports::CheckReport};

/// Execute the check operation.
///
/// Runs the full pipeline over the schema scripts and reports what would be
/// generated. Malformed statements and unknown types fail the check.
pub fn check(settings: &Settings) -> Result<CheckReport> {
    let sources = discover(&settings.input)?;
    let output = Pipeline::new(&settings.module)
        .run(&sources, &Generator::new())
        .wrap_err("Validation failed")?;

    Ok(CheckReport {
        input: settings.input.clone(),
        modules: output
            .all_modules()
            .map(|module| module.module_name.clone())
            .collect(),
        counts: count_objects(&output),
        errors: messages(&output, Severity::Error),
        warnings: messages(&output, Severity::Warning),
        infos: messages(&output, Severity::Info),
    })
}
