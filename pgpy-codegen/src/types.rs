//! Type-mapping engine.
//!
//! Schema type names encode nullability and array-ness in the name itself:
//!
//! ```text
//! base [ _NOTNULL ] [ ( modifiers ) ] [ [] [ _NOTNULL ] ]
//! ```
//!
//! `TEXT` is a nullable string, `TEXT_NOTNULL` a non-null one, and
//! `TEXT_NOTNULL[]_NOTNULL` a non-null array of non-null strings. A
//! [`TypeDescriptor`] captures that structure once; a [`TypeMapper`] renders it
//! for a target language.

use pgpy_core::to_pascal_case;
use pgpy_schema::{SchemaDomain, normalize_whitespace};

/// Suffix marking a non-nullable type or array slot.
pub const NOT_NULL_SUFFIX: &str = "_NOTNULL";

const ARRAY_MARKER: &str = "[]";

/// Built-in scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveType {
    Text,
    Integer,
    BigInt,
    Decimal,
    Timestamp,
    Date,
    Interval,
    DateRange,
    Boolean,
    Void,
}

impl PrimitiveType {
    /// All primitives, in declaration order.
    pub const ALL: [PrimitiveType; 10] = [
        PrimitiveType::Text,
        PrimitiveType::Integer,
        PrimitiveType::BigInt,
        PrimitiveType::Decimal,
        PrimitiveType::Timestamp,
        PrimitiveType::Date,
        PrimitiveType::Interval,
        PrimitiveType::DateRange,
        PrimitiveType::Boolean,
        PrimitiveType::Void,
    ];

    /// Look up a base name (modifiers and markers already stripped).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = normalize_whitespace(name).to_ascii_uppercase();
        let ty = match name.as_str() {
            "TEXT" | "VARCHAR" | "CHARACTER VARYING" | "CHAR" | "CHARACTER" => Self::Text,
            "INT" | "INTEGER" | "SMALLINT" | "INT2" | "INT4" => Self::Integer,
            "BIGINT" | "INT8" => Self::BigInt,
            "DECIMAL" | "NUMERIC" => Self::Decimal,
            "TIMESTAMP"
            | "TIMESTAMPTZ"
            | "TIMESTAMP WITH TIME ZONE"
            | "TIMESTAMP WITHOUT TIME ZONE" => Self::Timestamp,
            "DATE" => Self::Date,
            "INTERVAL" => Self::Interval,
            "DATERANGE" => Self::DateRange,
            "BOOLEAN" | "BOOL" => Self::Boolean,
            "VOID" => Self::Void,
            _ => return None,
        };
        Some(ty)
    }

    /// Canonical lowercase schema name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::Decimal => "decimal",
            Self::Timestamp => "timestamp",
            Self::Date => "date",
            Self::Interval => "interval",
            Self::DateRange => "daterange",
            Self::Boolean => "boolean",
            Self::Void => "void",
        }
    }
}

impl std::fmt::Display for PrimitiveType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BaseType {
    Primitive(PrimitiveType),
    /// A user-defined composite type.
    Composite {
        /// Name as written in the schema, not-null suffix stripped.
        schema_name: String,
        /// Name of the generated record.
        display_name: String,
    },
}

/// Normalized description of a schema type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    pub base: BaseType,
    pub is_array: bool,
    /// Nullability of the slot itself (the array, for arrays).
    pub is_nullable: bool,
    /// Nullability of array elements. Always `false` for non-arrays.
    pub element_nullable: bool,
}

impl TypeDescriptor {
    pub fn is_void(&self) -> bool {
        matches!(self.base, BaseType::Primitive(PrimitiveType::Void)) && !self.is_array
    }

    pub fn primitive(&self) -> Option<PrimitiveType> {
        match self.base {
            BaseType::Primitive(ty) => Some(ty),
            BaseType::Composite { .. } => None,
        }
    }

    /// Display name of the composite base, if any.
    pub fn composite_name(&self) -> Option<&str> {
        match &self.base {
            BaseType::Composite { display_name, .. } => Some(display_name),
            BaseType::Primitive(_) => None,
        }
    }
}

/// Name structure before the base is resolved.
struct ParsedName<'a> {
    base: &'a str,
    base_nullable: bool,
    /// `Some(slot_nullable)` for arrays.
    array: Option<bool>,
}

fn strip_suffix_ignore_case<'a>(text: &'a str, suffix: &str) -> Option<&'a str> {
    let split = text.len().checked_sub(suffix.len())?;
    let tail = text.get(split..)?;
    if tail.eq_ignore_ascii_case(suffix) {
        text.get(..split)
    } else {
        None
    }
}

/// Drop a trailing `( ... )` modifier group.
fn strip_modifiers(text: &str) -> &str {
    let text = text.trim_end();
    if !text.ends_with(')') {
        return text;
    }
    let mut depth = 0usize;
    for (index, ch) in text.char_indices().rev() {
        match ch {
            ')' => depth += 1,
            '(' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return text[..index].trim_end();
                }
            }
            _ => {}
        }
    }
    text
}

fn parse_name(name: &str) -> ParsedName<'_> {
    let name = name.trim();

    let (rest, array) = if let Some(rest) = strip_suffix_ignore_case(name, NOT_NULL_SUFFIX)
        .and_then(|rest| rest.strip_suffix(ARRAY_MARKER))
    {
        (rest, Some(false))
    } else if let Some(rest) = name.strip_suffix(ARRAY_MARKER) {
        (rest, Some(true))
    } else {
        (name, None)
    };

    let rest = strip_modifiers(rest);
    let (rest, base_nullable) = match strip_suffix_ignore_case(rest, NOT_NULL_SUFFIX) {
        Some(rest) => (rest, false),
        None => (rest, true),
    };

    ParsedName {
        base: strip_modifiers(rest).trim(),
        base_nullable,
        array,
    }
}

/// Strip array markers, not-null suffixes and modifiers from a type name.
///
/// Idempotent: `base_type(&base_type(n)) == base_type(n)`.
///
/// ```
/// use pgpy_codegen::types::base_type;
///
/// assert_eq!(base_type("user_account_NOTNULL[]_NOTNULL"), "user_account");
/// assert_eq!(base_type("NUMERIC_NOTNULL(10, 2)"), "NUMERIC");
/// ```
pub fn base_type(name: &str) -> String {
    let mut current = normalize_whitespace(name);
    loop {
        let next = parse_name(&current).base.to_string();
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Record name for a schema type name: the pascal-cased base with any schema
/// qualifier dropped (`billing.invoice_line_notnull` -> `InvoiceLine`).
pub fn display_name(name: &str) -> String {
    let base = base_type(name);
    let unqualified = base.rsplit('.').next().unwrap_or(&base);
    to_pascal_case(unqualified)
}

/// Map a schema type name to its descriptor.
///
/// ```
/// use pgpy_codegen::types::{BaseType, PrimitiveType, map_type};
///
/// let tags = map_type("TEXT_NOTNULL[]");
/// assert_eq!(tags.base, BaseType::Primitive(PrimitiveType::Text));
/// assert!(tags.is_array && tags.is_nullable && !tags.element_nullable);
/// ```
pub fn map_type(name: &str) -> TypeDescriptor {
    let normalized = normalize_whitespace(name);
    let parsed = parse_name(&normalized);
    let base_name = base_type(parsed.base);

    let base = match PrimitiveType::from_name(&base_name) {
        Some(ty) => BaseType::Primitive(ty),
        None => BaseType::Composite {
            display_name: display_name(&base_name),
            schema_name: base_name,
        },
    };

    let descriptor = match parsed.array {
        Some(slot_nullable) => TypeDescriptor {
            base,
            is_array: true,
            is_nullable: slot_nullable,
            element_nullable: parsed.base_nullable,
        },
        None => TypeDescriptor {
            base,
            is_array: false,
            is_nullable: parsed.base_nullable,
            element_nullable: false,
        },
    };

    if descriptor.is_void() {
        return TypeDescriptor {
            is_nullable: false,
            ..descriptor
        };
    }
    descriptor
}

/// How a domain relates to the type it is declared over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainShape {
    /// The domain's own name resolves to its underlying type
    /// (`user_notnull AS user`, `integer_notnull AS INTEGER`). Nothing new is
    /// generated.
    SameAsUnderlying(TypeDescriptor),
    /// A new name for a primitive or an array.
    ScalarAlias(TypeDescriptor),
    /// A new name for a composite record.
    CompositeAlias(TypeDescriptor),
}

impl DomainShape {
    pub fn underlying(&self) -> &TypeDescriptor {
        match self {
            DomainShape::SameAsUnderlying(ty)
            | DomainShape::ScalarAlias(ty)
            | DomainShape::CompositeAlias(ty) => ty,
        }
    }
}

/// Classify a domain by comparing its own name with its underlying type.
pub fn classify_domain(domain: &SchemaDomain) -> DomainShape {
    let underlying = map_type(&domain.underlying_type);
    let own = map_type(&domain.name);

    let same_base = match (&own.base, &underlying.base) {
        (
            BaseType::Composite { display_name: a, .. },
            BaseType::Composite { display_name: b, .. },
        ) => a == b,
        (a, b) => a == b,
    };

    if same_base && !underlying.is_array {
        DomainShape::SameAsUnderlying(underlying)
    } else if underlying.is_array || underlying.primitive().is_some() {
        DomainShape::ScalarAlias(underlying)
    } else {
        DomainShape::CompositeAlias(underlying)
    }
}

/// Trait for rendering descriptors in a target language.
pub trait TypeMapper {
    /// Render a primitive.
    fn map_primitive(&self, ty: PrimitiveType) -> String;

    /// Render a reference to a generated record.
    fn map_composite(&self, display_name: &str) -> String {
        display_name.to_string()
    }

    /// Wrap a type as nullable.
    fn map_optional(&self, inner: &str) -> String;

    /// Wrap a type as a list.
    fn map_array(&self, inner: &str) -> String;

    /// Render the base type with no wrappers.
    fn render_base(&self, base: &BaseType) -> String {
        match base {
            BaseType::Primitive(ty) => self.map_primitive(*ty),
            BaseType::Composite { display_name, .. } => self.map_composite(display_name),
        }
    }

    /// Render a descriptor: nullable around the element, array around that,
    /// nullable around the array slot.
    fn render_type(&self, ty: &TypeDescriptor) -> String {
        let base = self.render_base(&ty.base);
        if ty.is_array {
            let element = if ty.element_nullable {
                self.map_optional(&base)
            } else {
                base
            };
            let array = self.map_array(&element);
            if ty.is_nullable {
                self.map_optional(&array)
            } else {
                array
            }
        } else if ty.is_nullable {
            self.map_optional(&base)
        } else {
            base
        }
    }
}
