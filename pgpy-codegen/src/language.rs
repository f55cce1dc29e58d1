//! Seam between the orchestrator and a target language.

use pgpy_schema::{SchemaDomain, SchemaFunction, SchemaObject, SchemaType};

use crate::{
    Result,
    symbols::{SymbolKind, SymbolTable},
};

/// A name provided by the target runtime rather than by generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinSymbol {
    pub name: &'static str,
    pub module: &'static str,
    pub kind: SymbolKind,
}

/// Trait for language-specific code generators.
///
/// Every method is pure: it receives the objects of one module plus the
/// symbol table built so far and returns the module's source text.
pub trait LanguageCodegen {
    /// Language identifier (e.g., "python")
    fn language(&self) -> &'static str;

    /// File extension for generated source files (e.g., "py")
    fn file_extension(&self) -> &'static str;

    /// Runtime names registered before any file is processed.
    fn builtin_symbols(&self) -> Vec<BuiltinSymbol> {
        Vec::new()
    }

    /// Render the module for one type file (composite types and domains).
    fn type_module(
        &self,
        module_name: &str,
        objects: &[SchemaObject],
        symbols: &SymbolTable,
    ) -> Result<String>;

    /// Render the module for one function file.
    fn function_module(
        &self,
        module_name: &str,
        functions: &[SchemaFunction],
        symbols: &SymbolTable,
    ) -> Result<String>;

    /// Render the module that registers every type and domain with the driver.
    fn registration_module(
        &self,
        module_name: &str,
        types: &[SchemaType],
        domains: &[SchemaDomain],
        symbols: &SymbolTable,
    ) -> Result<String>;
}
