//! Python-specific naming conventions.

/// Prefix conventionally given to function arguments in the schema.
const ARGUMENT_PREFIX: &str = "p_";

/// Python keywords that cannot be used as identifiers.
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class",
    "continue", "def", "del", "elif", "else", "except", "finally", "for", "from", "global",
    "if", "import", "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return",
    "try", "while", "with", "yield",
];

/// Append `_` to names that collide with a keyword.
pub fn safe_name(name: &str) -> String {
    if PYTHON_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else {
        name.to_string()
    }
}

/// Python parameter for a schema argument: `p_user_id` -> `user_id`.
pub fn param_name(argument: &str) -> String {
    let stripped = match argument.strip_prefix(ARGUMENT_PREFIX) {
        Some(rest) if !rest.is_empty() => rest,
        _ => argument,
    };
    safe_name(stripped)
}

/// Python function name for a schema function, schema qualifier dropped.
pub fn function_name(schema_name: &str) -> String {
    let unqualified = schema_name.rsplit('.').next().unwrap_or(schema_name);
    safe_name(unqualified.trim_matches('"'))
}
