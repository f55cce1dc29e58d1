use std::sync::LazyLock;

use regex::Regex;

use super::{IDENT, cut_at_keywords, split_declaration};
use crate::{
    Result, SchemaField, SchemaType, SourceContext,
    scanner::{balanced_group, split_top_level},
};

static TYPE_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^CREATE\s+TYPE\s+({IDENT})\s+AS\s*\(")).expect("valid regex")
});

/// Recognize `CREATE TYPE <name> AS (<field> <type>, ...)`.
///
/// Enum and range types (`AS ENUM`, `AS RANGE`) are not composites and are
/// left unrecognized.
pub fn extract_type(statement: &str) -> Result<Option<SchemaType>> {
    let Some(captures) = TYPE_HEAD.captures(statement) else {
        return Ok(None);
    };
    let (head, [name]) = captures.extract();
    let open = head.len() - 1;

    let ctx = SourceContext::new(statement, "statement");
    let (start, end) = balanced_group(statement, open).ok_or_else(|| ctx.unbalanced(name, open))?;

    let mut fields = Vec::new();
    for segment in split_top_level(&statement[start..end], ',') {
        let (field, type_name) = split_declaration(segment.text);
        let type_name = cut_at_keywords(type_name, &["COLLATE"]);
        if type_name.is_empty() {
            return Err(ctx.missing_type(
                "field",
                name,
                field,
                (start + segment.offset, segment.text.len()),
            ));
        }
        fields.push(SchemaField {
            name: field,
            type_name: type_name.to_string(),
        });
    }

    Ok(Some(SchemaType {
        name: name.to_string(),
        fields,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn field(name: &str, type_name: &str) -> SchemaField {
        SchemaField {
            name: name.to_string(),
            type_name: type_name.to_string(),
        }
    }

    #[test]
    fn test_extract_type() {
        let ty = extract_type("CREATE TYPE address AS (street TEXT, zip INTEGER_NOTNULL)")
            .unwrap()
            .unwrap();

        assert_eq!(ty.name, "address");
        assert_eq!(
            ty.fields,
            [field("street", "TEXT"), field("zip", "INTEGER_NOTNULL")]
        );
    }

    #[test]
    fn test_extract_type_with_modifiers_and_arrays() {
        let ty = extract_type(
            "create type invoice as (total NUMERIC_NOTNULL(10, 2), tags TEXT_NOTNULL[]_NOTNULL, note TEXT COLLATE \"C\")",
        )
        .unwrap()
        .unwrap();

        assert_eq!(
            ty.fields,
            [
                field("total", "NUMERIC_NOTNULL(10, 2)"),
                field("tags", "TEXT_NOTNULL[]_NOTNULL"),
                field("note", "TEXT"),
            ]
        );
    }

    #[test]
    fn test_extract_type_schema_qualified() {
        let ty = extract_type("CREATE TYPE billing.invoice AS (id INTEGER)")
            .unwrap()
            .unwrap();
        assert_eq!(ty.name, "billing.invoice");
    }

    #[test]
    fn test_extract_type_empty_field_list() {
        let ty = extract_type("CREATE TYPE empty AS ()").unwrap().unwrap();
        assert!(ty.fields.is_empty());
    }

    #[test]
    fn test_enum_is_not_a_composite() {
        let ty = extract_type("CREATE TYPE mood AS ENUM ('sad', 'ok')").unwrap();
        assert_eq!(ty, None);
    }

    #[test]
    fn test_other_statements_are_ignored() {
        assert_eq!(extract_type("CREATE TABLE t (a TEXT)").unwrap(), None);
    }

    #[test]
    fn test_missing_field_type() {
        let err = extract_type("CREATE TYPE broken AS (a TEXT, b)").unwrap_err();
        match *err {
            Error::MissingType {
                owner, clause, span, ..
            } => {
                assert_eq!(owner, "broken");
                assert_eq!(clause, "b");
                assert_eq!(span.offset(), 31);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unbalanced_field_list() {
        let err = extract_type("CREATE TYPE broken AS (a NUMERIC(1, 2)").unwrap_err();
        assert!(matches!(*err, Error::Unbalanced { .. }));
    }
}
