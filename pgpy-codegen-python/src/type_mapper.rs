//! Python type mapper implementation.

use pgpy_codegen::{
    imports::ImportCollector,
    types::{BaseType, PrimitiveType, TypeDescriptor, TypeMapper},
};

/// Python type mapper implementation.
///
/// Renders descriptors as `typing`-style annotations and reports which
/// standard library and psycopg names an annotation needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonTypeMapper;

impl TypeMapper for PythonTypeMapper {
    fn map_primitive(&self, ty: PrimitiveType) -> String {
        match ty {
            PrimitiveType::Text => "str",
            PrimitiveType::Integer | PrimitiveType::BigInt => "int",
            PrimitiveType::Decimal => "Decimal",
            PrimitiveType::Timestamp => "datetime",
            PrimitiveType::Date => "date",
            PrimitiveType::Interval => "timedelta",
            PrimitiveType::DateRange => "Range[date]",
            PrimitiveType::Boolean => "bool",
            PrimitiveType::Void => "None",
        }
        .to_string()
    }

    fn map_optional(&self, inner: &str) -> String {
        format!("Optional[{inner}]")
    }

    fn map_array(&self, inner: &str) -> String {
        format!("list[{inner}]")
    }
}

impl PythonTypeMapper {
    /// Add the non-generated imports `render_type(ty)` refers to.
    ///
    /// Composite types are not covered; they resolve through the symbol table.
    pub fn collect_imports(&self, ty: &TypeDescriptor, imports: &mut ImportCollector) {
        if ty.is_nullable || (ty.is_array && ty.element_nullable) {
            imports.add("typing", "Optional");
        }
        let BaseType::Primitive(primitive) = ty.base else {
            return;
        };
        match primitive {
            PrimitiveType::Decimal => imports.add("decimal", "Decimal"),
            PrimitiveType::Timestamp => imports.add("datetime", "datetime"),
            PrimitiveType::Date => imports.add("datetime", "date"),
            PrimitiveType::Interval => imports.add("datetime", "timedelta"),
            PrimitiveType::DateRange => {
                imports.add("datetime", "date");
                imports.add("psycopg.types.range", "Range");
            }
            PrimitiveType::Text
            | PrimitiveType::Integer
            | PrimitiveType::BigInt
            | PrimitiveType::Boolean
            | PrimitiveType::Void => {}
        }
    }
}

/// The descriptor with its outer slot made non-nullable.
pub(crate) fn required(ty: &TypeDescriptor) -> TypeDescriptor {
    TypeDescriptor {
        is_nullable: false,
        ..ty.clone()
    }
}
