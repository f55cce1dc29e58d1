//! Registration emitter.
//!
//! psycopg only loads composite types and domains into Python objects once
//! they are registered on the connection. The registration module defines
//! three helpers and a `register_types(conn)` function calling them for every
//! composite type, every built-in not-null domain and every user domain, in
//! that order.

use pgpy_codegen::{
    Result,
    imports::ImportCollector,
    symbols::SymbolTable,
    types::{BaseType, DomainShape, TypeDescriptor, classify_domain, display_name},
};
use pgpy_schema::{SchemaDomain, SchemaType};

use crate::{
    PyFile,
    ast::{Def, Param, Stmt},
    loaders::{Loader, NOT_NULL_DOMAINS, builtin_domain, loader_for},
};

/// Render the registration module.
pub fn emit_registration_module(
    module_name: &str,
    types: &[SchemaType],
    domains: &[SchemaDomain],
    symbols: &SymbolTable,
) -> Result<String> {
    let mut imports = ImportCollector::new();
    imports.add("typing", "Optional");
    imports.add("psycopg", "Connection");
    imports.add("psycopg.types", "TypeInfo");
    imports.add("psycopg.types.composite", "CompositeInfo");
    imports.add("psycopg.types.composite", "register_composite");

    let mut resolve = |name: &str| -> Result<String> {
        if let Some(module) = symbols.import_for(name, module_name)? {
            imports.add(module, name);
        }
        Ok(name.to_string())
    };

    let mut calls = Vec::new();
    for ty in types {
        let factory = resolve(&display_name(&ty.name))?;
        calls.push(register_composite_type_call(&ty.name, &factory));
    }
    for domain in NOT_NULL_DOMAINS {
        let loader = loader_argument(domain.loader(), &mut resolve)?;
        calls.push(register_domain_type_call(domain.name, &loader));
    }
    for domain in domains {
        if builtin_domain(&domain.name).is_some() {
            continue;
        }
        let call = match classify_domain(domain) {
            DomainShape::CompositeAlias(ty) => {
                let factory = resolve(&display_name(&domain.name))?;
                register_composite_domain_type_call(&domain.name, schema_name(&ty), &factory)
            }
            DomainShape::SameAsUnderlying(ty) if !ty.is_array && ty.primitive().is_none() => {
                let factory = resolve(&display_name(&domain.name))?;
                register_composite_domain_type_call(&domain.name, schema_name(&ty), &factory)
            }
            DomainShape::SameAsUnderlying(ty) | DomainShape::ScalarAlias(ty) => {
                let loader = if ty.is_array {
                    None
                } else {
                    ty.primitive().and_then(loader_for)
                };
                let loader = loader_argument(loader, &mut resolve)?;
                register_domain_type_call(&domain.name, &loader)
            }
        };
        calls.push(call);
    }

    let register_types = Def::new("register_types")
        .param(Param::new("conn", "Connection"))
        .returns("None")
        .stmts(calls);

    Ok(PyFile::new()
        .imports(&imports)
        .add(register_composite_type())
        .add(register_composite_domain_type())
        .add(register_domain_type())
        .add(register_types)
        .render())
}

fn schema_name(ty: &TypeDescriptor) -> &str {
    match &ty.base {
        BaseType::Composite { schema_name, .. } => schema_name,
        BaseType::Primitive(primitive) => primitive.as_str(),
    }
}

fn loader_argument(
    loader: Option<Loader>,
    resolve: &mut impl FnMut(&str) -> Result<String>,
) -> Result<String> {
    match loader {
        Some(loader) => resolve(loader.name),
        None => Ok("None".to_string()),
    }
}

fn register_composite_type_call(type_name: &str, factory: &str) -> Stmt {
    Stmt::simple(format!(
        "register_composite_type(conn, \"{type_name}\", {factory})"
    ))
}

fn register_composite_domain_type_call(domain_name: &str, underlying: &str, factory: &str) -> Stmt {
    Stmt::simple(format!(
        "register_composite_domain_type(conn, \"{domain_name}\", \"{underlying}\", {factory})"
    ))
}

fn register_domain_type_call(domain_name: &str, loader: &str) -> Stmt {
    Stmt::simple(format!(
        "register_domain_type(conn, \"{domain_name}\", {loader})"
    ))
}

fn raise_missing(what: &str) -> Stmt {
    Stmt::compound(
        "else:",
        vec![Stmt::simple(format!(
            "raise RuntimeError(f\"Could not find {what}\")"
        ))],
    )
}

fn register_composite_type() -> Def {
    Def::new("register_composite_type")
        .param(Param::new("conn", "Connection"))
        .param(Param::new("type_name", "str"))
        .param(Param::new("factory", "type"))
        .returns("None")
        .stmt(Stmt::simple("info = CompositeInfo.fetch(conn, type_name)"))
        .stmt(Stmt::compound(
            "if info is not None:",
            vec![Stmt::simple("register_composite(info, conn, factory)")],
        ))
        .stmt(raise_missing("composite type {type_name}"))
}

fn register_composite_domain_type() -> Def {
    Def::new("register_composite_domain_type")
        .param(Param::new("conn", "Connection"))
        .param(Param::new("domain_name", "str"))
        .param(Param::new("underlying_type_name", "str"))
        .param(Param::new("factory", "type"))
        .returns("None")
        .stmt(Stmt::simple(
            "domain_info = CompositeInfo.fetch(conn, domain_name)",
        ))
        .stmt(Stmt::simple(
            "underlying_info = CompositeInfo.fetch(conn, underlying_type_name)",
        ))
        .stmt(Stmt::compound(
            "if domain_info is None:",
            vec![Stmt::simple(
                "raise RuntimeError(f\"Could not find domain {domain_name}\")",
            )],
        ))
        .stmt(Stmt::compound(
            "if underlying_info is None:",
            vec![Stmt::simple(
                "raise RuntimeError(f\"Could not find underlying type {underlying_type_name}\")",
            )],
        ))
        .stmt(Stmt::simple("domain_info.register(conn)"))
        .stmt(Stmt::simple(
            "domain_info.field_names = underlying_info.field_names",
        ))
        .stmt(Stmt::simple(
            "domain_info.field_types = underlying_info.field_types",
        ))
        .stmt(Stmt::simple("domain_info.array_oid = underlying_info.array_oid"))
        .stmt(Stmt::simple("register_composite(domain_info, conn, factory)"))
}

fn register_domain_type() -> Def {
    Def::new("register_domain_type")
        .param(Param::new("conn", "Connection"))
        .param(Param::new("domain_name", "str"))
        .param(Param::new("loader", "Optional[type]"))
        .returns("None")
        .stmt(Stmt::simple("info = TypeInfo.fetch(conn, domain_name)"))
        .stmt(Stmt::compound(
            "if info is not None:",
            vec![
                Stmt::simple("info.register(conn)"),
                Stmt::compound(
                    "if loader is not None:",
                    vec![Stmt::simple(
                        "conn.adapters.register_loader(domain_name, loader)",
                    )],
                ),
            ],
        ))
        .stmt(raise_missing("domain type {domain_name}"))
}
