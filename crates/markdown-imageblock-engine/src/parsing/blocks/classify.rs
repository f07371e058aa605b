use crate::parsing::{
    cursor::LineCursor,
    rope::{lines::LineRef, span::Span},
};

/// Classification of a single line containing only local facts.
///
/// This is phase 1 of block parsing: each line is classified independently
/// without reference to surrounding context.
#[derive(Debug, Clone)]
pub struct LineClass {
    /// Zero-based line index within the document.
    pub index: usize,
    /// Full byte span of this line in the rope, newline included.
    pub line: Span,
    /// Byte span of the line text without its line ending.
    pub text_span: Span,
    /// Line text without its line ending.
    pub text: String,
    /// Whether the line holds nothing but spaces and tabs.
    pub is_blank: bool,
}

impl LineClass {
    /// Builds a class for a line of `text` (no line ending) starting at
    /// byte offset `base`.
    pub fn from_text(index: usize, base: usize, text: &str) -> Self {
        let text_span = Span {
            start: base,
            end: base + text.len(),
        };
        LineClass {
            index,
            line: text_span,
            text_span,
            text: text.to_string(),
            is_blank: text.bytes().all(|b| b == b' ' || b == b'\t'),
        }
    }

    /// A cursor positioned at the start of the line text.
    pub fn cursor(&self) -> LineCursor<'_> {
        LineCursor::new(&self.text, self.text_span.start)
    }
}

/// Classifies individual lines for the block parsing phase.
pub struct MarkdownLineClassifier;

impl MarkdownLineClassifier {
    /// Classifies a line into a [`LineClass`], stripping its line ending.
    pub fn classify(&self, lr: &LineRef) -> LineClass {
        let trimmed = lr.text.trim_end_matches(['\r', '\n']);
        LineClass {
            line: lr.span,
            ..LineClass::from_text(lr.index, lr.span.start, trimmed)
        }
    }
}
