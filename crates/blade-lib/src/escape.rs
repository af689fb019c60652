//! String escaping between the host language and the query document.
//!
//! Literal string arguments arrive as raw source slices (with their original
//! escape sequences) and leave as double-quoted query-document strings.
//! Emitted documents are spliced back into the source as template literals,
//! which need their own escaping.

/// Interprets escape sequences in a string-literal body (the text between
/// the quotes, as written in source).
///
/// Unknown escapes keep the escaped character, matching host-language behavior.
pub(crate) fn unescape_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('0') => out.push('\0'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }

    out
}

/// Escapes a string value for emission inside a double-quoted
/// query-document string.
pub(crate) fn escape_double_quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes document text for splicing into a backtick template literal.
///
/// Backticks and backslashes are escaped, and `${` is broken up so the
/// emitted literal never interpolates.
pub(crate) fn escape_template(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            '`' => out.push_str("\\`"),
            '$' if chars.peek() == Some(&'{') => out.push_str("\\$"),
            _ => out.push(c),
        }
    }

    out
}
