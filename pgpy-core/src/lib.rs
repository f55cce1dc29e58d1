//! Core utilities and types for the pgpy binding generator.
//!
//! This crate provides the naming transforms, module path derivation and
//! generated-file writing shared across the pgpy workspace.

mod file;
mod module;
mod utils;

// File operations
pub use file::{File, GeneratedFile, WriteResult, find_stale_files};
// Module naming
pub use module::{MODULE_SEPARATOR, module_file_path, module_name_for};
// String utilities
pub use utils::{strip_ordering_prefix, to_pascal_case};
