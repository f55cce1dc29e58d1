use indexmap::IndexSet;
use pgpy_codegen::{
    Result,
    imports::ImportCollector,
    symbols::{SymbolKind, SymbolTable},
    types::TypeDescriptor,
};

use crate::type_mapper::PythonTypeMapper;

/// Name resolution for the module being emitted.
///
/// Names defined by the module itself are not in the symbol table yet; they
/// resolve locally and never produce an import.
pub(crate) struct ModuleScope<'a> {
    module_name: &'a str,
    symbols: &'a SymbolTable,
    local: IndexSet<String>,
    mapper: PythonTypeMapper,
}

impl<'a> ModuleScope<'a> {
    pub fn new(module_name: &'a str, symbols: &'a SymbolTable) -> Self {
        Self {
            module_name,
            symbols,
            local: IndexSet::new(),
            mapper: PythonTypeMapper,
        }
    }

    pub fn define(&mut self, name: impl Into<String>) {
        self.local.insert(name.into());
    }

    pub fn mapper(&self) -> &PythonTypeMapper {
        &self.mapper
    }

    /// Add every import `ty` needs once rendered.
    pub fn reference(&self, ty: &TypeDescriptor, imports: &mut ImportCollector) -> Result<()> {
        self.mapper.collect_imports(ty, imports);
        self.reference_name(ty, imports)
    }

    /// Add the import for the composite base of `ty`, if any.
    pub fn reference_name(&self, ty: &TypeDescriptor, imports: &mut ImportCollector) -> Result<()> {
        if let Some(name) = ty.composite_name()
            && !self.local.contains(name)
            && let Some(module) = self.symbols.import_for(name, self.module_name)?
        {
            imports.add(module, name);
        }
        Ok(())
    }

    /// Whether `ty` is backed by a generated dataclass rather than an alias.
    pub fn is_record(&self, ty: &TypeDescriptor) -> Result<bool> {
        let Some(name) = ty.composite_name() else {
            return Ok(false);
        };
        if self.local.contains(name) {
            return Ok(true);
        }
        Ok(self.symbols.lookup(name)?.kind == SymbolKind::Record)
    }
}
