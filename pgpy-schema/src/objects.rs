//! Schema objects recognized in statements.
//!
//! Type names are kept as written (`INTEGER_NOTNULL`, `address[]`); resolving
//! them to target types happens during generation.

/// `CREATE TYPE <name> AS (<fields>)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaType {
    pub name: String,
    pub fields: Vec<SchemaField>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaField {
    pub name: String,
    pub type_name: String,
}

/// `CREATE [OR REPLACE] FUNCTION <name>(<args>) RETURNS [SETOF] <type> ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaFunction {
    pub name: String,
    /// Return type without the `SETOF` keyword.
    pub return_type: String,
    pub returns_set: bool,
    /// Input arguments in declaration order. `OUT` arguments are not listed.
    pub args: Vec<SchemaArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaArgument {
    pub name: String,
    pub type_name: String,
    /// Declared `VARIADIC`; callers must pass it with the `VARIADIC` marker.
    pub variadic: bool,
}

/// `CREATE DOMAIN <name> AS <type> ...`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaDomain {
    pub name: String,
    pub underlying_type: String,
}

/// Any object an extractor can produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaObject {
    Type(SchemaType),
    Function(SchemaFunction),
    Domain(SchemaDomain),
}

impl SchemaObject {
    pub fn name(&self) -> &str {
        match self {
            SchemaObject::Type(t) => &t.name,
            SchemaObject::Function(f) => &f.name,
            SchemaObject::Domain(d) => &d.name,
        }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            SchemaObject::Type(_) => ObjectKind::Type,
            SchemaObject::Function(_) => ObjectKind::Function,
            SchemaObject::Domain(_) => ObjectKind::Domain,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Type,
    Function,
    Domain,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Type => "type",
            ObjectKind::Function => "function",
            ObjectKind::Domain => "domain",
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
