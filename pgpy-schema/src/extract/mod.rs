//! Object extractors.
//!
//! Each extractor looks at one statement and returns:
//!
//! - `Ok(Some(object))` when it recognizes and parses the statement
//! - `Ok(None)` when the statement is something else
//! - `Err(..)` when the statement is recognizably its kind but malformed

mod composite;
mod domain;
mod function;

pub use composite::extract_type;
pub use domain::extract_domain;
pub use function::extract_function;

use crate::{Result, SchemaObject, scanner::find_top_level_keyword};

/// Signature shared by every extractor.
pub type Extractor = fn(&str) -> Result<Option<SchemaObject>>;

/// Extractors applied to files under `types/`.
pub const TYPE_FILE_EXTRACTORS: &[Extractor] = &[type_object, domain_object];

/// Extractors applied to files under `functions/`.
pub const FUNCTION_FILE_EXTRACTORS: &[Extractor] = &[function_object];

/// Optionally schema-qualified identifier.
pub(crate) const IDENT: &str = r"(?:[A-Za-z_][A-Za-z0-9_]*\.)?[A-Za-z_][A-Za-z0-9_]*";

fn type_object(statement: &str) -> Result<Option<SchemaObject>> {
    Ok(extract_type(statement)?.map(SchemaObject::Type))
}

fn domain_object(statement: &str) -> Result<Option<SchemaObject>> {
    Ok(extract_domain(statement)?.map(SchemaObject::Domain))
}

fn function_object(statement: &str) -> Result<Option<SchemaObject>> {
    Ok(extract_function(statement)?.map(SchemaObject::Function))
}

/// Run extractors in order and return the first object recognized.
pub fn extract_object(statement: &str, extractors: &[Extractor]) -> Result<Option<SchemaObject>> {
    for extractor in extractors {
        if let Some(object) = extractor(statement)? {
            return Ok(Some(object));
        }
    }
    Ok(None)
}

/// Extract every recognized object, preserving statement order.
///
/// ```
/// use pgpy_schema::{TYPE_FILE_EXTRACTORS, extract_objects, split_statements};
///
/// let statements = split_statements(
///     "CREATE TYPE a AS (x TEXT); CREATE INDEX i ON t (c); CREATE DOMAIN d AS a;",
///     ';',
/// );
/// let objects = extract_objects(&statements, TYPE_FILE_EXTRACTORS).unwrap();
/// let names: Vec<_> = objects.iter().map(|o| o.name()).collect();
/// assert_eq!(names, ["a", "d"]);
/// ```
pub fn extract_objects(
    statements: &[String],
    extractors: &[Extractor],
) -> Result<Vec<SchemaObject>> {
    let mut objects = Vec::new();
    for statement in statements {
        if let Some(object) = extract_object(statement, extractors)? {
            objects.push(object);
        }
    }
    Ok(objects)
}

/// Split `<name> <type ...>` into its name and the remaining type text.
///
/// The type is empty when the clause is a single word.
pub(crate) fn split_declaration(clause: &str) -> (String, &str) {
    let clause = clause.trim();
    let (name, rest) = match clause.find(char::is_whitespace) {
        Some(index) => (&clause[..index], clause[index..].trim()),
        None => (clause, ""),
    };
    (unquote_ident(name), rest)
}

/// Drop everything from the first top-level keyword in `keywords` onward.
pub(crate) fn cut_at_keywords<'a>(text: &'a str, keywords: &[&str]) -> &'a str {
    let end = keywords
        .iter()
        .filter_map(|keyword| find_top_level_keyword(text, keyword))
        .min()
        .unwrap_or(text.len());
    text[..end].trim()
}

fn unquote_ident(name: &str) -> String {
    name.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(name)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_declaration() {
        assert_eq!(
            split_declaration("amount NUMERIC(10, 2)"),
            ("amount".to_string(), "NUMERIC(10, 2)")
        );
        assert_eq!(split_declaration("\"Name\" TEXT"), ("Name".to_string(), "TEXT"));
        assert_eq!(split_declaration("lonely"), ("lonely".to_string(), ""));
    }

    #[test]
    fn test_cut_at_keywords() {
        assert_eq!(cut_at_keywords("TEXT DEFAULT 'a'", &["DEFAULT"]), "TEXT");
        assert_eq!(
            cut_at_keywords("TEXT COLLATE \"C\" DEFAULT 'x'", &["DEFAULT", "COLLATE"]),
            "TEXT"
        );
        assert_eq!(cut_at_keywords("TEXT", &["DEFAULT"]), "TEXT");
    }

    #[test]
    fn test_extract_object_skips_unrecognized() {
        let object = extract_object("GRANT ALL ON t TO u", TYPE_FILE_EXTRACTORS).unwrap();
        assert_eq!(object, None);
    }

    #[test]
    fn test_type_file_extractors_ignore_functions() {
        let object = extract_object(
            "CREATE FUNCTION f() RETURNS VOID LANGUAGE sql",
            TYPE_FILE_EXTRACTORS,
        )
        .unwrap();
        assert_eq!(object, None);
    }

    #[test]
    fn test_extract_objects_propagates_errors() {
        let statements = vec![
            "CREATE TYPE ok AS (a TEXT)".to_string(),
            "CREATE TYPE broken AS (a TEXT, b)".to_string(),
        ];
        assert!(extract_objects(&statements, TYPE_FILE_EXTRACTORS).is_err());
    }
}
