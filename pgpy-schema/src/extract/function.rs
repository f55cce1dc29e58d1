use std::sync::LazyLock;

use regex::Regex;

use super::{IDENT, cut_at_keywords, split_declaration};
use crate::{
    Result, SchemaArgument, SchemaFunction, SourceContext,
    scanner::{balanced_group, find_top_level_char, split_top_level},
};

static FUNCTION_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?i)^CREATE\s+(?:OR\s+REPLACE\s+)?FUNCTION\s+({IDENT})\s*\("
    ))
    .expect("valid regex")
});

static RETURNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*RETURNS\s+(SETOF\s+)?").expect("valid regex"));

/// Clauses that may follow the return type.
static RETURN_TYPE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\s(?:LANGUAGE|AS|IMMUTABLE|STABLE|VOLATILE|STRICT|SECURITY|PARALLEL|COST|ROWS|SET|CALLED|RETURNS\s+NULL|WINDOW|LEAKPROOF|NOT\s+LEAKPROOF|EXTERNAL|SUPPORT|TRANSFORM|BEGIN)\b",
    )
    .expect("valid regex")
});

static TABLE_RETURN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^TABLE\s*\(").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArgMode {
    In,
    Out,
    InOut,
    Variadic,
}

impl ArgMode {
    fn parse(word: &str) -> Option<Self> {
        match word.to_ascii_uppercase().as_str() {
            "IN" => Some(ArgMode::In),
            "OUT" => Some(ArgMode::Out),
            "INOUT" => Some(ArgMode::InOut),
            "VARIADIC" => Some(ArgMode::Variadic),
            _ => None,
        }
    }

    fn is_input(self) -> bool {
        !matches!(self, ArgMode::Out)
    }
}

/// Recognize `CREATE [OR REPLACE] FUNCTION <name>(<args>) RETURNS [SETOF] <type> ...`.
pub fn extract_function(statement: &str) -> Result<Option<SchemaFunction>> {
    let Some(captures) = FUNCTION_HEAD.captures(statement) else {
        return Ok(None);
    };
    let (head, [name]) = captures.extract();
    let open = head.len() - 1;

    let ctx = SourceContext::new(statement, "statement");
    let (start, end) = balanced_group(statement, open).ok_or_else(|| ctx.unbalanced(name, open))?;

    let mut args = Vec::new();
    for segment in split_top_level(&statement[start..end], ',') {
        let span = (start + segment.offset, segment.text.len());
        if let Some(arg) = parse_argument(&ctx, name, segment.text, span)? {
            args.push(arg);
        }
    }

    // `end` is the closing parenthesis of the argument list.
    let tail_start = end + 1;
    let tail = &statement[tail_start..];
    let Some(returns) = RETURNS.captures(tail) else {
        return Err(ctx.missing_return(name));
    };
    let returns_set = returns.get(1).is_some();
    let type_start = returns.get(0).map_or(0, |m| m.end());
    let rest = &tail[type_start..];

    if TABLE_RETURN.is_match(rest) {
        let found = balanced_group(rest, rest.find('(').unwrap_or(0))
            .map_or(rest, |(_, close)| &rest[..=close]);
        return Err(ctx.unsupported_return(name, found, (tail_start + type_start, found.len())));
    }

    let type_end = RETURN_TYPE_END.find(rest).map_or(rest.len(), |m| m.start());
    let return_type = rest[..type_end].trim();
    if return_type.is_empty() {
        return Err(ctx.missing_return(name));
    }

    Ok(Some(SchemaFunction {
        name: name.to_string(),
        return_type: return_type.to_string(),
        returns_set,
        args,
    }))
}

/// Parse one argument clause. `OUT` arguments yield `None`.
fn parse_argument(
    ctx: &SourceContext,
    function: &str,
    clause: &str,
    span: (usize, usize),
) -> Result<Option<SchemaArgument>> {
    let clause = cut_at_keywords(clause, &["DEFAULT"]);
    let clause = match find_top_level_char(clause, '=') {
        Some(index) => clause[..index].trim(),
        None => clause,
    };

    let (first, rest) = split_declaration(clause);
    let (mode, declaration) = match ArgMode::parse(&first) {
        Some(mode) if !rest.is_empty() => (mode, rest),
        _ => (ArgMode::In, clause),
    };
    if !mode.is_input() {
        return Ok(None);
    }

    let (name, type_name) = split_declaration(declaration);
    if type_name.is_empty() {
        return Err(ctx.missing_type("argument", function, name, span));
    }

    Ok(Some(SchemaArgument {
        name,
        type_name: type_name.to_string(),
        variadic: matches!(mode, ArgMode::Variadic),
    }))
}
