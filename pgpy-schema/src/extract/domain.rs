use std::sync::LazyLock;

use regex::Regex;

use super::{IDENT, cut_at_keywords};
use crate::{Result, SchemaDomain, SourceContext};

static DOMAIN_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^CREATE\s+DOMAIN\s+({IDENT})(?:\s+AS)?(?:\s+(.*))?$"
    ))
    .expect("valid regex")
});

/// Constraint clauses that follow the underlying type.
const CONSTRAINT_KEYWORDS: &[&str] = &["COLLATE", "DEFAULT", "CONSTRAINT", "NOT", "NULL", "CHECK"];

/// Recognize `CREATE DOMAIN <name> [AS] <type> [constraints...]`.
///
/// Only the name and the underlying type are kept; constraints are dropped.
pub fn extract_domain(statement: &str) -> Result<Option<SchemaDomain>> {
    let Some(captures) = DOMAIN_HEAD.captures(statement) else {
        return Ok(None);
    };
    let name = captures.get(1).map_or("", |m| m.as_str());
    let rest = captures.get(2).map_or("", |m| m.as_str());

    let underlying_type = cut_at_keywords(rest, CONSTRAINT_KEYWORDS);
    if underlying_type.is_empty() {
        return Err(SourceContext::new(statement, "statement").missing_domain_type(name));
    }

    Ok(Some(SchemaDomain {
        name: name.to_string(),
        underlying_type: underlying_type.to_string(),
    }))
}
