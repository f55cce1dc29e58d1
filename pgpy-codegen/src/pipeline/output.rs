//! Pipeline results.

use std::path::PathBuf;

use pgpy_schema::SchemaObject;

use super::Diagnostic;
use crate::symbols::SymbolTable;

/// Source text generated for one module.
#[derive(Debug, Clone)]
pub struct GeneratedModule {
    /// Dotted module name (`app.db.types.address`).
    pub module_name: String,
    /// Schema file the module was generated from. `None` for the
    /// registration module.
    pub source_file: Option<PathBuf>,
    /// Objects recognized in the schema file, in statement order.
    pub objects: Vec<SchemaObject>,
    pub source: String,
}

/// Everything a pipeline run produced.
#[derive(Debug)]
pub struct GenerationOutput {
    /// Type modules first, then function modules, each in path order.
    pub modules: Vec<GeneratedModule>,
    pub registration: GeneratedModule,
    /// View scripts are not generated from; they are passed through for the runner.
    pub view_files: Vec<PathBuf>,
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
}

impl GenerationOutput {
    /// Every generated module, the registration module last.
    pub fn all_modules(&self) -> impl Iterator<Item = &GeneratedModule> {
        self.modules.iter().chain(std::iter::once(&self.registration))
    }

    pub fn object_count(&self) -> usize {
        self.modules.iter().map(|m| m.objects.len()).sum()
    }
}
