//! A minimal codegen used to exercise the pipeline without a real backend.

use pgpy_schema::{SchemaDomain, SchemaFunction, SchemaObject, SchemaType};

use crate::{
    Result,
    language::{BuiltinSymbol, LanguageCodegen},
    symbols::{SymbolKind, SymbolTable},
    types::{display_name, map_type},
};

/// Renders one line per object and resolves every composite reference
/// through the symbol table, like a real backend would for imports.
pub(crate) struct OutlineCodegen;

fn resolve(
    type_name: &str,
    local: &[String],
    module_name: &str,
    symbols: &SymbolTable,
) -> Result<()> {
    if let Some(name) = map_type(type_name).composite_name()
        && !local.iter().any(|l| l == name)
    {
        symbols.import_for(name, module_name)?;
    }
    Ok(())
}

impl LanguageCodegen for OutlineCodegen {
    fn language(&self) -> &'static str {
        "outline"
    }

    fn file_extension(&self) -> &'static str {
        "txt"
    }

    fn builtin_symbols(&self) -> Vec<BuiltinSymbol> {
        vec![BuiltinSymbol {
            name: "TextLoader",
            module: "driver.loaders",
            kind: SymbolKind::Loader,
        }]
    }

    fn type_module(
        &self,
        module_name: &str,
        objects: &[SchemaObject],
        symbols: &SymbolTable,
    ) -> Result<String> {
        let local: Vec<String> = objects.iter().map(|o| display_name(o.name())).collect();
        let mut lines = Vec::new();
        for object in objects {
            match object {
                SchemaObject::Type(ty) => {
                    for field in &ty.fields {
                        resolve(&field.type_name, &local, module_name, symbols)?;
                    }
                    lines.push(format!("type {}", display_name(&ty.name)));
                }
                SchemaObject::Domain(domain) => {
                    resolve(&domain.underlying_type, &local, module_name, symbols)?;
                    lines.push(format!("domain {}", display_name(&domain.name)));
                }
                SchemaObject::Function(_) => {}
            }
        }
        Ok(lines.join("\n"))
    }

    fn function_module(
        &self,
        module_name: &str,
        functions: &[SchemaFunction],
        symbols: &SymbolTable,
    ) -> Result<String> {
        let mut lines = Vec::new();
        for function in functions {
            resolve(&function.return_type, &[], module_name, symbols)?;
            for arg in &function.args {
                resolve(&arg.type_name, &[], module_name, symbols)?;
            }
            lines.push(format!("fn {}", function.name));
        }
        Ok(lines.join("\n"))
    }

    fn registration_module(
        &self,
        _module_name: &str,
        types: &[SchemaType],
        domains: &[SchemaDomain],
        _symbols: &SymbolTable,
    ) -> Result<String> {
        Ok(format!("{} types, {} domains", types.len(), domains.len()))
    }
}
