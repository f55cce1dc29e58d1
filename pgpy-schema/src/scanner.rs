//! Nesting- and quote-aware scanning of statement text.
//!
//! Types like `NUMERIC(10, 2)` put commas inside field lists, so splitting a
//! parenthesized list on every comma breaks them apart. The scanner walks the
//! text one character at a time, skipping quoted regions (`'...'`, `"..."`
//! and `$tag$...$tag$`) and tracking parenthesis depth.

/// A character outside any quoted region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Byte offset of the character in the scanned text.
    pub offset: usize,
    pub ch: char,
    /// Nesting level the character sits at. Parentheses report the level
    /// outside the group they open or close.
    pub depth: usize,
}

/// Iterator over the unquoted characters of a piece of SQL.
#[derive(Debug, Clone)]
pub struct Scanner<'a> {
    text: &'a str,
    pos: usize,
    depth: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            depth: 0,
        }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn skip_quoted(&mut self, quote: char) {
        self.pos += quote.len_utf8();
        loop {
            match self.rest().find(quote) {
                Some(index) => {
                    self.pos += index + quote.len_utf8();
                    // A doubled quote is an escaped quote, not the end.
                    if !self.rest().starts_with(quote) {
                        return;
                    }
                    self.pos += quote.len_utf8();
                }
                None => {
                    self.pos = self.text.len();
                    return;
                }
            }
        }
    }

    /// Length of the dollar-quote tag starting at the current position, if any.
    fn dollar_tag_len(&self) -> Option<usize> {
        let rest = self.rest();
        let body = rest.strip_prefix('$')?;
        let mut chars = body.char_indices();
        match chars.next() {
            Some((_, '$')) => return Some(2),
            Some((_, c)) if c.is_ascii_alphabetic() || c == '_' => {}
            _ => return None,
        }
        for (index, c) in chars {
            if c == '$' {
                return Some(index + 2);
            }
            if !(c.is_ascii_alphanumeric() || c == '_') {
                return None;
            }
        }
        None
    }

    fn skip_dollar_quoted(&mut self, tag_len: usize) {
        let tag = &self.text[self.pos..self.pos + tag_len];
        self.pos += tag_len;
        match self.rest().find(tag) {
            Some(index) => self.pos += index + tag_len,
            None => self.pos = self.text.len(),
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            let ch = self.rest().chars().next()?;
            match ch {
                '\'' | '"' => {
                    self.skip_quoted(ch);
                    continue;
                }
                '$' => {
                    if let Some(tag_len) = self.dollar_tag_len() {
                        self.skip_dollar_quoted(tag_len);
                        continue;
                    }
                }
                _ => {}
            }

            let offset = self.pos;
            self.pos += ch.len_utf8();
            let depth = match ch {
                '(' => {
                    self.depth += 1;
                    self.depth - 1
                }
                ')' => {
                    self.depth = self.depth.saturating_sub(1);
                    self.depth
                }
                _ => self.depth,
            };
            return Some(Token { offset, ch, depth });
        }
    }
}

/// A trimmed piece of a delimited list with its offset in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub offset: usize,
    pub text: &'a str,
}

/// Split `text` on `delimiter` wherever it appears at nesting depth zero.
///
/// Segments are trimmed; empty text yields no segments.
///
/// ```
/// use pgpy_schema::scanner::split_top_level;
///
/// let parts: Vec<_> = split_top_level("a NUMERIC(10, 2), b TEXT", ',')
///     .into_iter()
///     .map(|s| s.text)
///     .collect();
/// assert_eq!(parts, ["a NUMERIC(10, 2)", "b TEXT"]);
/// ```
pub fn split_top_level(text: &str, delimiter: char) -> Vec<Segment<'_>> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut start = 0;
    for token in Scanner::new(text) {
        if token.ch == delimiter && token.depth == 0 {
            segments.push(trimmed(text, start, token.offset));
            start = token.offset + delimiter.len_utf8();
        }
    }
    segments.push(trimmed(text, start, text.len()));
    segments
}

fn trimmed(text: &str, start: usize, end: usize) -> Segment<'_> {
    let raw = &text[start..end];
    let leading = raw.len() - raw.trim_start().len();
    Segment {
        offset: start + leading,
        text: raw.trim(),
    }
}

/// Find the parenthesis closing the group opened at byte offset `open`.
///
/// Returns the byte range of the group's contents, excluding both
/// parentheses, or `None` when the group is never closed.
pub fn balanced_group(text: &str, open: usize) -> Option<(usize, usize)> {
    if !text[open..].starts_with('(') {
        return None;
    }
    let mut tokens = Scanner::new(&text[open..]);
    tokens.next()?;
    tokens
        .find(|token| token.ch == ')' && token.depth == 0)
        .map(|close| (open + 1, open + close.offset))
}

/// Find a keyword at nesting depth zero, matched case-insensitively on word
/// boundaries.
pub fn find_top_level_keyword(text: &str, keyword: &str) -> Option<usize> {
    Scanner::new(text)
        .filter(|token| token.depth == 0)
        .map(|token| token.offset)
        .find(|&offset| keyword_at(text, offset, keyword))
}

/// Find a character at nesting depth zero.
pub fn find_top_level_char(text: &str, ch: char) -> Option<usize> {
    Scanner::new(text)
        .find(|token| token.ch == ch && token.depth == 0)
        .map(|token| token.offset)
}

fn keyword_at(text: &str, offset: usize, keyword: &str) -> bool {
    let end = offset + keyword.len();
    let Some(candidate) = text.get(offset..end) else {
        return false;
    };
    if !candidate.eq_ignore_ascii_case(keyword) {
        return false;
    }
    let before = text[..offset].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_ident_char) && !after.is_some_and(is_ident_char)
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(segments: &[Segment<'a>]) -> Vec<&'a str> {
        segments.iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_split_respects_nesting() {
        let segments = split_top_level("a NUMERIC(10,2), b TEXT, c INT[]", ',');
        assert_eq!(texts(&segments), ["a NUMERIC(10,2)", "b TEXT", "c INT[]"]);
    }

    #[test]
    fn test_split_reports_trimmed_offsets() {
        let text = "a TEXT,  b INT";
        let segments = split_top_level(text, ',');
        assert_eq!(segments[1].offset, 9);
        assert_eq!(&text[segments[1].offset..], "b INT");
    }

    #[test]
    fn test_split_ignores_quoted_delimiters() {
        let segments = split_top_level("a TEXT DEFAULT 'x, y', \"b,c\" INT", ',');
        assert_eq!(texts(&segments), ["a TEXT DEFAULT 'x, y'", "\"b,c\" INT"]);
    }

    #[test]
    fn test_split_escaped_quote() {
        let segments = split_top_level("a TEXT DEFAULT 'it''s, fine', b INT", ',');
        assert_eq!(texts(&segments), ["a TEXT DEFAULT 'it''s, fine'", "b INT"]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_top_level("   ", ',').is_empty());
    }

    #[test]
    fn test_balanced_group() {
        let text = "f(a NUMERIC(1,2), b TEXT) RETURNS x";
        let (start, end) = balanced_group(text, 1).unwrap();
        assert_eq!(&text[start..end], "a NUMERIC(1,2), b TEXT");
    }

    #[test]
    fn test_balanced_group_skips_quoted_parens() {
        let text = "(a TEXT DEFAULT ')') tail";
        let (start, end) = balanced_group(text, 0).unwrap();
        assert_eq!(&text[start..end], "a TEXT DEFAULT ')'");
    }

    #[test]
    fn test_balanced_group_unterminated() {
        assert_eq!(balanced_group("(a TEXT, (b", 0), None);
        assert_eq!(balanced_group("no paren", 0), None);
    }

    #[test]
    fn test_dollar_quoted_body_is_skipped() {
        let text = "AS $body$ SELECT (1, 2) $body$ LANGUAGE sql";
        assert_eq!(find_top_level_keyword(text, "LANGUAGE"), Some(31));
        assert_eq!(find_top_level_keyword(text, "SELECT"), None);
    }

    #[test]
    fn test_positional_parameter_is_not_dollar_quote() {
        let text = "SELECT $1, $2";
        let segments = split_top_level(text, ',');
        assert_eq!(texts(&segments), ["SELECT $1", "$2"]);
    }

    #[test]
    fn test_find_keyword_word_boundaries() {
        assert_eq!(find_top_level_keyword("default_value TEXT", "DEFAULT"), None);
        assert_eq!(find_top_level_keyword("a TEXT default 1", "DEFAULT"), Some(7));
        assert_eq!(find_top_level_keyword("a NUMERIC(default)", "DEFAULT"), None);
    }

    #[test]
    fn test_find_top_level_char() {
        assert_eq!(find_top_level_char("a INT = 1", '='), Some(6));
        assert_eq!(find_top_level_char("a INT DEFAULT '='", '='), None);
    }
}
