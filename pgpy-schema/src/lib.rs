//! Postgres schema parsing for pgpy.
//!
//! Turns the text of a `.sql` schema script into structured objects:
//!
//! - [`split_statements`] normalizes whitespace and cuts the text into statements
//! - [`extract`] recognizes composite types, domains and functions
//! - [`scanner`] splits parenthesized lists while respecting nesting and quotes
//!
//! Statements that no extractor recognizes (indexes, grants, views, ...) are
//! skipped without error. A statement that is recognized but malformed yields
//! an [`Error`] carrying the statement text for diagnostic rendering.

mod error;
mod objects;
mod statements;

pub mod extract;
pub mod scanner;

pub use error::{Error, Result, SourceContext};
pub use extract::{
    Extractor, FUNCTION_FILE_EXTRACTORS, TYPE_FILE_EXTRACTORS, extract_domain, extract_function,
    extract_object, extract_objects, extract_type,
};
pub use objects::{
    ObjectKind, SchemaArgument, SchemaDomain, SchemaField, SchemaFunction, SchemaObject, SchemaType,
};
pub use statements::{DEFAULT_DELIMITER, normalize_whitespace, split_statements};
