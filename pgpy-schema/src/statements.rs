//! Statement splitting.

/// Statement delimiter used by Postgres scripts.
pub const DEFAULT_DELIMITER: char = ';';

/// Collapse every whitespace run, newlines included, into a single space.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split schema text into an ordered list of statements.
///
/// The split is purely syntactic: a delimiter inside a string literal, a
/// comment or a dollar-quoted function body also ends the statement.
///
/// ```
/// use pgpy_schema::split_statements;
///
/// let statements = split_statements("CREATE TYPE a AS (x TEXT);\n\nGRANT ALL ON a TO b;", ';');
/// assert_eq!(statements, ["CREATE TYPE a AS (x TEXT)", "GRANT ALL ON a TO b"]);
/// ```
pub fn split_statements(text: &str, delimiter: char) -> Vec<String> {
    normalize_whitespace(text)
        .split(delimiter)
        .map(str::trim)
        .filter(|statement| !statement.is_empty())
        .map(str::to_string)
        .collect()
}
