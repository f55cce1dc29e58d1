//! Shared code generation utilities for pgpy.
//!
//! This crate provides the language-agnostic half of the generator, used by
//! language-specific backends (e.g., `pgpy-codegen-python`).
//!
//! # Module Organization
//!
//! - [`builder`] - Code generation building blocks (CodeBuilder, CodeFragment, etc.)
//! - [`types`] - Type-mapping engine (TypeDescriptor, map_type, TypeMapper)
//! - [`symbols`] - Cross-file symbol table
//! - [`imports`] - Import collection
//! - [`language`] - The LanguageCodegen seam
//! - [`pipeline`] - Generation orchestrator (phases, context, diagnostics)

pub mod builder;
pub mod imports;
pub mod language;
pub mod pipeline;
pub mod sources;
pub mod symbols;
pub mod types;

mod error;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
