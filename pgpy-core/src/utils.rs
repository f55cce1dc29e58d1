//! Shared naming utilities.

/// Convert a schema name to PascalCase.
///
/// Each underscore-separated token is lowercased and then capitalized, so
/// `user_account` and `USER_ACCOUNT` both become `UserAccount`.
pub fn to_pascal_case(s: &str) -> String {
    s.split('_')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(c) => c
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
            }
        })
        .collect()
}

/// Strip a leading numeric ordering prefix (`01_users` -> `users`).
///
/// Only a run of ASCII digits directly followed by an underscore counts as a
/// prefix. Names that would become empty are returned unchanged.
pub fn strip_ordering_prefix(name: &str) -> &str {
    let digits = name.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return name;
    }
    match name[digits..].strip_prefix('_') {
        Some(rest) if !rest.is_empty() => rest,
        _ => name,
    }
}
