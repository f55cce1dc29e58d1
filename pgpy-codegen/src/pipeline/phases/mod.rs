//! Built-in pipeline phases, in execution order:
//!
//! - [`TypePhase`] - records and aliases from type files; fills the symbol table
//! - [`FunctionPhase`] - callable wrappers from function files
//! - [`RegistrationPhase`] - the aggregate driver registration module

mod functions;
mod registration;
mod types;

pub use functions::FunctionPhase;
pub use registration::RegistrationPhase;
pub use types::TypePhase;

use eyre::Result;
use pgpy_schema::{DEFAULT_DELIMITER, Extractor, SchemaObject, extract_objects, split_statements};

use crate::sources::SourceFile;

/// Files ordered by path so numeric prefixes control processing order.
fn sorted(files: &[SourceFile]) -> Vec<&SourceFile> {
    let mut files: Vec<_> = files.iter().collect();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    files
}

/// Split a file into statements and run the given extractors over them.
fn parse_file(file: &SourceFile, extractors: &[Extractor]) -> Result<Vec<SchemaObject>> {
    let statements = split_statements(&file.contents, DEFAULT_DELIMITER);
    let objects = extract_objects(&statements, extractors).map_err(|e| *e)?;
    Ok(objects)
}
