use indexmap::IndexMap;

use crate::parsing::{
    cursor::LineCursor,
    diagnostics::{Diagnostic, DiagnosticCode, Reporter},
};

use super::classify::LineClass;

/// Attribute names (lowercased) to raw values, in source order.
///
/// A name given without `="..."` maps to the empty string.
pub type RawAttributes = IndexMap<String, String>;

/// Token closing the attribute list on an opening line.
pub const ATTRIBUTE_CLOSE: &[u8] = b":::";

/// Parses `name[="value"]` pairs up to the closing `:::`, consuming it.
///
/// Returns `None` after reporting a diagnostic if the list is malformed; the
/// cursor position is then meaningless. An empty list is valid.
pub fn parse_attributes(
    cur: &mut LineCursor<'_>,
    line: &LineClass,
    reporter: &mut dyn Reporter,
) -> Option<RawAttributes> {
    let mut attrs = RawAttributes::new();

    loop {
        let separated = cur.skip_spaces() > 0;

        if cur.starts_with(ATTRIBUTE_CLOSE) {
            cur.bump_n(ATTRIBUTE_CLOSE.len());
            return Some(attrs);
        }

        if cur.eof() {
            reporter.report(
                Diagnostic::error(
                    DiagnosticCode::MissingAttributeClose,
                    "image attributes must end with `:::`",
                    line,
                )
                .at(cur.pos()),
            );
            return None;
        }

        let start = cur.pos();
        if !attrs.is_empty() && !separated {
            reporter.report(
                Diagnostic::error(
                    DiagnosticCode::InvalidAttribute,
                    format!(
                        "attributes must be separated by whitespace at column {}",
                        cur.column() + 1
                    ),
                    line,
                )
                .at(start),
            );
            return None;
        }

        let Some(name) = parse_name(cur) else {
            reporter.report(
                Diagnostic::error(
                    DiagnosticCode::InvalidAttribute,
                    format!("invalid attribute at column {}", cur.column() + 1),
                    line,
                )
                .at(start),
            );
            return None;
        };

        if attrs.contains_key(&name) {
            reporter.report(
                Diagnostic::error(
                    DiagnosticCode::DuplicateAttribute,
                    format!("attribute `{name}` is specified multiple times"),
                    line,
                )
                .at(start),
            );
            return None;
        }

        cur.skip_spaces();
        let value = if cur.peek() == Some(b'=') {
            cur.bump();
            cur.skip_spaces();
            match parse_quoted(cur) {
                Some(value) => value,
                None => {
                    reporter.report(
                        Diagnostic::error(
                            DiagnosticCode::UnterminatedValue,
                            format!("unterminated value for attribute `{name}`"),
                            line,
                        )
                        .at(start),
                    );
                    return None;
                }
            }
        } else {
            String::new()
        };

        attrs.insert(name, value);
    }
}

/// Matches `[A-Za-z][A-Za-z0-9-]*` and folds it to lowercase.
fn parse_name(cur: &mut LineCursor<'_>) -> Option<String> {
    if !cur.peek().is_some_and(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    let len = cur
        .rest()
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'-')
        .count();
    let name = cur.rest()[..len].to_ascii_lowercase();
    cur.bump_n(len);
    Some(name)
}

/// Reads a double-quoted value, unescaping `\"` and `\\`.
///
/// Returns `None` if the cursor is not at a quote or the line ends first.
fn parse_quoted(cur: &mut LineCursor<'_>) -> Option<String> {
    if cur.peek() != Some(b'"') {
        return None;
    }
    cur.bump();

    let mut value = Vec::new();
    loop {
        match cur.bump()? {
            b'"' => break,
            b'\\' if matches!(cur.peek(), Some(b'"' | b'\\')) => {
                value.extend(cur.bump());
            }
            b => value.push(b),
        }
    }
    // Only ASCII bytes are dropped, so the value is still valid UTF-8.
    String::from_utf8(value).ok()
}
