//! Record emitter for type files.
//!
//! - a composite type becomes a `@dataclass` with its fields in order
//! - a domain over a primitive or an array becomes `Name = <type>`
//! - a domain over a composite with a new name becomes `Name = Underlying`
//! - a domain whose name resolves to its underlying type emits nothing

use pgpy_codegen::{
    Result,
    imports::ImportCollector,
    symbols::SymbolTable,
    types::{DomainShape, TypeMapper, classify_domain, display_name, map_type},
};
use pgpy_schema::{SchemaDomain, SchemaObject, SchemaType};

use super::scope::ModuleScope;
use crate::{
    PyFile,
    ast::{Assign, Dataclass, Field},
    naming::safe_name,
    type_mapper::required,
};

/// Render the module for one type file.
pub fn emit_type_module(
    module_name: &str,
    objects: &[SchemaObject],
    symbols: &SymbolTable,
) -> Result<String> {
    let mut scope = ModuleScope::new(module_name, symbols);
    for object in objects {
        match object {
            SchemaObject::Type(ty) => scope.define(display_name(&ty.name)),
            SchemaObject::Domain(domain) => {
                if !matches!(classify_domain(domain), DomainShape::SameAsUnderlying(_)) {
                    scope.define(display_name(&domain.name));
                }
            }
            SchemaObject::Function(_) => {}
        }
    }

    let mut imports = ImportCollector::new();
    let mut file = PyFile::new();
    for object in objects {
        match object {
            SchemaObject::Type(ty) => {
                imports.add("dataclasses", "dataclass");
                file = file.add(emit_dataclass(ty, &scope, &mut imports)?);
            }
            SchemaObject::Domain(domain) => {
                if let Some(alias) = emit_alias(domain, &scope, &mut imports)? {
                    file = file.add(alias);
                }
            }
            SchemaObject::Function(_) => {}
        }
    }

    Ok(file.imports(&imports).render())
}

fn emit_dataclass(
    ty: &SchemaType,
    scope: &ModuleScope<'_>,
    imports: &mut ImportCollector,
) -> Result<Dataclass> {
    let mut class = Dataclass::new(display_name(&ty.name));
    for field in &ty.fields {
        let descriptor = map_type(&field.type_name);
        scope.reference(&descriptor, imports)?;
        class = class.field(Field::new(
            safe_name(&field.name),
            scope.mapper().render_type(&descriptor),
        ));
    }
    Ok(class)
}

fn emit_alias(
    domain: &SchemaDomain,
    scope: &ModuleScope<'_>,
    imports: &mut ImportCollector,
) -> Result<Option<Assign>> {
    let value = match classify_domain(domain) {
        DomainShape::SameAsUnderlying(_) => return Ok(None),
        DomainShape::ScalarAlias(ty) => {
            let ty = required(&ty);
            scope.reference(&ty, imports)?;
            scope.mapper().render_type(&ty)
        }
        DomainShape::CompositeAlias(ty) => {
            scope.reference_name(&ty, imports)?;
            scope.mapper().render_base(&ty.base)
        }
    };
    Ok(Some(Assign::new(display_name(&domain.name), value)))
}

#[cfg(test)]
mod tests {
    use pgpy_codegen::{Error, symbols::SymbolKind};
    use pgpy_schema::SchemaField;

    use super::*;

    fn schema_type(name: &str, fields: &[(&str, &str)]) -> SchemaObject {
        SchemaObject::Type(SchemaType {
            name: name.to_string(),
            fields: fields
                .iter()
                .map(|(name, type_name)| SchemaField {
                    name: name.to_string(),
                    type_name: type_name.to_string(),
                })
                .collect(),
        })
    }

    fn domain(name: &str, underlying: &str) -> SchemaObject {
        SchemaObject::Domain(SchemaDomain {
            name: name.to_string(),
            underlying_type: underlying.to_string(),
        })
    }

    #[test]
    fn test_dataclass_with_stdlib_imports() {
        let source = emit_type_module(
            "db.types.event",
            &[schema_type(
                "event",
                &[
                    ("id", "BIGINT_NOTNULL"),
                    ("at", "TIMESTAMP_NOTNULL"),
                    ("duration", "INTERVAL"),
                    ("cost", "NUMERIC(10, 2)"),
                ],
            )],
            &SymbolTable::new(),
        )
        .unwrap();

        assert_eq!(
            source,
            "from dataclasses import dataclass\n\
             from datetime import datetime, timedelta\n\
             from decimal import Decimal\n\
             from typing import Optional\n\
             \n\
             \n\
             @dataclass\n\
             class Event:\n    \
                 id: int\n    \
                 at: datetime\n    \
                 duration: Optional[timedelta]\n    \
                 cost: Optional[Decimal]\n"
        );
    }

    #[test]
    fn test_keyword_field_names_are_escaped() {
        let source = emit_type_module(
            "db.types.course",
            &[schema_type("course", &[("class", "TEXT"), ("from", "DATE_NOTNULL")])],
            &SymbolTable::new(),
        )
        .unwrap();

        assert!(source.contains("    class_: Optional[str]\n"));
        assert!(source.contains("    from_: date\n"));
    }

    #[test]
    fn test_local_reference_needs_no_import() {
        let source = emit_type_module(
            "db.types.user",
            &[
                schema_type("address", &[("street", "TEXT_NOTNULL")]),
                schema_type("user", &[("home", "address_notnull")]),
            ],
            &SymbolTable::new(),
        )
        .unwrap();

        assert!(source.contains("    home: Address\n"));
        assert!(!source.contains("import Address"));
    }

    #[test]
    fn test_reference_to_other_module_is_imported() {
        let mut symbols = SymbolTable::new();
        symbols
            .register("Address", "db.types.address", SymbolKind::Record)
            .unwrap();

        let source = emit_type_module(
            "db.types.user",
            &[schema_type("user", &[("homes", "address_notnull[]")])],
            &symbols,
        )
        .unwrap();

        assert!(source.contains("from db.types.address import Address\n"));
        assert!(source.contains("    homes: Optional[list[Address]]\n"));
    }

    #[test]
    fn test_unknown_reference_fails() {
        let err = emit_type_module(
            "db.types.user",
            &[schema_type("user", &[("home", "address")])],
            &SymbolTable::new(),
        )
        .unwrap_err();

        assert_eq!(
            err,
            Error::UnknownSymbol {
                name: "Address".to_string()
            }
        );
    }

    #[test]
    fn test_domains() {
        let source = emit_type_module(
            "db.types.user",
            &[
                schema_type("user", &[("id", "INTEGER_NOTNULL")]),
                domain("user_notnull", "user"),
                domain("admin", "user"),
                domain("email", "TEXT"),
                domain("tags", "TEXT_NOTNULL[]"),
            ],
            &SymbolTable::new(),
        )
        .unwrap();

        assert!(!source.contains("UserNotnull"));
        assert!(source.contains("\n\n\nAdmin = User\n"));
        assert!(source.contains("\n\n\nEmail = str\n"));
        assert!(source.contains("\n\n\nTags = list[str]\n"));
    }

    #[test]
    fn test_same_as_underlying_domain_only_renders_nothing() {
        let source = emit_type_module(
            "db.types.notnull",
            &[domain("integer_notnull", "INTEGER")],
            &SymbolTable::new(),
        )
        .unwrap();
        assert_eq!(source, "");
    }
}
