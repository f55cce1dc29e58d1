//! Generation context passed through pipeline phases.

use std::path::Path;

use eyre::{Result, eyre};
use pgpy_schema::{SchemaDomain, SchemaType};

use super::{Diagnostic, GeneratedModule, GenerationOutput};
use crate::{language::LanguageCodegen, sources::SchemaSources, symbols::SymbolTable};

/// State shared by all phases of one run.
///
/// The context owns the symbol table; phases borrow it mutably in turn and
/// nothing else resets it.
pub struct GenerationContext<'a> {
    /// Dotted root module of the generated package.
    pub output_module: String,
    pub sources: &'a SchemaSources,
    pub codegen: &'a dyn LanguageCodegen,
    pub symbols: SymbolTable,
    /// Generated modules in processing order.
    pub modules: Vec<GeneratedModule>,
    /// Populated by the registration phase.
    pub registration: Option<GeneratedModule>,
    /// Every composite type seen so far, in processing order.
    pub types: Vec<SchemaType>,
    /// Every domain seen so far, in processing order.
    pub domains: Vec<SchemaDomain>,
    pub diagnostics: Vec<Diagnostic>,
}

impl<'a> GenerationContext<'a> {
    pub fn new(
        output_module: impl Into<String>,
        sources: &'a SchemaSources,
        codegen: &'a dyn LanguageCodegen,
    ) -> Self {
        Self {
            output_module: output_module.into(),
            sources,
            codegen,
            symbols: SymbolTable::new(),
            modules: Vec::new(),
            registration: None,
            types: Vec::new(),
            domains: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(phase, message));
    }

    /// Record an informational note about the schema file at `location`.
    pub fn add_info(&mut self, phase: &str, message: impl Into<String>, location: &Path) {
        self.diagnostics
            .push(Diagnostic::info(phase, message).at(location.display().to_string()));
    }

    /// Finish the run.
    ///
    /// Fails if the registration phase never ran.
    pub fn into_output(self) -> Result<GenerationOutput> {
        let registration = self
            .registration
            .ok_or_else(|| eyre!("registration module was not generated"))?;

        let mut view_files: Vec<_> = self
            .sources
            .view_files
            .iter()
            .map(|file| file.path.clone())
            .collect();
        view_files.sort();

        Ok(GenerationOutput {
            modules: self.modules,
            registration,
            view_files,
            symbols: self.symbols,
            diagnostics: self.diagnostics,
        })
    }
}
