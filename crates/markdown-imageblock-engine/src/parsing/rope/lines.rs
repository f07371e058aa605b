use xi_rope::Rope;

use super::span::Span;

/// A reference to a single line in the rope with its byte span.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// Zero-based line index within the document.
    pub index: usize,
    /// Byte span of this line in the rope (includes newline if present).
    pub span: Span,
    /// The line text as a string, newline included.
    pub text: String,
}

/// Returns an iterator over lines with their byte spans and indices.
///
/// Uses `lines_raw` to preserve newline characters so spans tile the rope
/// exactly.
pub fn lines_with_spans(rope: &Rope) -> impl Iterator<Item = LineRef> + '_ {
    let mut offset = 0usize;
    rope.lines_raw(..).enumerate().map(move |(index, line)| {
        let start = offset;
        offset += line.len();
        LineRef {
            index,
            span: Span { start, end: offset },
            text: line.into_owned(),
        }
    })
}
