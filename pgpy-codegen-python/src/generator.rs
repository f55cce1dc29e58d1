//! Python implementation of the language seam.

use pgpy_codegen::{
    Result,
    language::{BuiltinSymbol, LanguageCodegen},
    symbols::{SymbolKind, SymbolTable},
};
use pgpy_schema::{SchemaDomain, SchemaFunction, SchemaObject, SchemaType};

use crate::{
    emit::{emit_function_module, emit_registration_module, emit_type_module},
    loaders::LOADERS,
};

/// Python code generator targeting psycopg 3.
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator;

impl Generator {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageCodegen for Generator {
    fn language(&self) -> &'static str {
        "python"
    }

    fn file_extension(&self) -> &'static str {
        "py"
    }

    fn builtin_symbols(&self) -> Vec<BuiltinSymbol> {
        LOADERS
            .iter()
            .map(|loader| BuiltinSymbol {
                name: loader.name,
                module: loader.module,
                kind: SymbolKind::Loader,
            })
            .collect()
    }

    fn type_module(
        &self,
        module_name: &str,
        objects: &[SchemaObject],
        symbols: &SymbolTable,
    ) -> Result<String> {
        emit_type_module(module_name, objects, symbols)
    }

    fn function_module(
        &self,
        module_name: &str,
        functions: &[SchemaFunction],
        symbols: &SymbolTable,
    ) -> Result<String> {
        emit_function_module(module_name, functions, symbols)
    }

    fn registration_module(
        &self,
        module_name: &str,
        types: &[SchemaType],
        domains: &[SchemaDomain],
        symbols: &SymbolTable,
    ) -> Result<String> {
        emit_registration_module(module_name, types, domains, symbols)
    }
}
