//! # Diagnostics
//!
//! Parsing never fails outright: malformed image blocks degrade to ordinary
//! content and the reason is handed to a caller-supplied [`Reporter`].
//! Diagnostics carry the offending line's index and raw text so a caller can
//! render them without holding on to the document.

use std::fmt;

use codespan_reporting::diagnostic::{Diagnostic as CodespanDiagnostic, Label, Severity};

use crate::parsing::{blocks::LineClass, rope::span::Span};

/// Category of a reported problem. `tag()` is the short, stable form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    /// An attribute name did not match `[A-Za-z][A-Za-z0-9-]*`.
    InvalidAttribute,
    /// The attribute list ran to line end without a closing `:::`.
    MissingAttributeClose,
    /// The same attribute name appeared twice.
    DuplicateAttribute,
    /// A quoted value had no closing quote.
    UnterminatedValue,
    /// An attribute outside the image schema.
    UnexpectedAttribute,
    /// A required attribute was absent or empty.
    MissingAttribute,
    /// A closing fence was not followed by `image-end:::`.
    MissingEndMarker,
    /// Characters followed `image-end:::` on the closing line.
    TrailingCharacters,
    /// Input ended with an image block still open.
    UnterminatedBlock,
}

impl DiagnosticCode {
    pub fn tag(self) -> &'static str {
        match self {
            DiagnosticCode::InvalidAttribute => "invalid-attribute",
            DiagnosticCode::MissingAttributeClose => "missing-attribute-close",
            DiagnosticCode::DuplicateAttribute => "duplicate-attribute",
            DiagnosticCode::UnterminatedValue => "unterminated-value",
            DiagnosticCode::UnexpectedAttribute => "unexpected-attribute",
            DiagnosticCode::MissingAttribute => "missing-attribute",
            DiagnosticCode::MissingEndMarker => "missing-end-marker",
            DiagnosticCode::TrailingCharacters => "trailing-characters",
            DiagnosticCode::UnterminatedBlock => "unterminated-block",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// A problem found while parsing, with its source location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: DiagnosticCode,
    pub severity: Severity,
    pub message: String,
    /// Zero-based index of the offending line.
    pub line: usize,
    /// Raw text of the offending line, newline stripped.
    pub line_text: String,
    /// Byte span in the document the diagnostic points at.
    pub span: Span,
    /// Id of the image block this diagnostic belongs to, once one exists.
    pub block_id: Option<String>,
}

impl Diagnostic {
    pub fn error(code: DiagnosticCode, message: impl Into<String>, line: &LineClass) -> Self {
        Self::new(Severity::Error, code, message, line)
    }

    pub fn warning(code: DiagnosticCode, message: impl Into<String>, line: &LineClass) -> Self {
        Self::new(Severity::Warning, code, message, line)
    }

    fn new(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        line: &LineClass,
    ) -> Self {
        Diagnostic {
            code,
            severity,
            message: message.into(),
            line: line.index,
            line_text: line.text.clone(),
            span: line.text_span,
            block_id: None,
        }
    }

    /// Narrows the span to start at `start` (clamped to the line).
    pub fn at(mut self, start: usize) -> Self {
        self.span.start = start.clamp(self.span.start, self.span.end);
        self
    }

    pub fn with_block(mut self, id: impl Into<String>) -> Self {
        self.block_id = Some(id.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }

    /// Convert to a codespan-reporting diagnostic for display.
    pub fn to_diagnostic<FileId: Copy>(&self, file_id: FileId) -> CodespanDiagnostic<FileId> {
        let mut notes = Vec::new();
        if let Some(id) = &self.block_id {
            notes.push(format!("image block `{id}`"));
        }
        CodespanDiagnostic::new(self.severity)
            .with_code(self.code.tag())
            .with_message(&self.message)
            .with_labels(vec![Label::primary(file_id, self.span)])
            .with_notes(notes)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: [{}] {}", self.line + 1, self.code, self.message)
    }
}

/// Sink for diagnostics, handed to the parser at call time.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl Reporter for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Adapts a closure into a [`Reporter`].
pub struct ReportFn<F>(pub F);

impl<F: FnMut(Diagnostic)> Reporter for ReportFn<F> {
    fn report(&mut self, diagnostic: Diagnostic) {
        (self.0)(diagnostic);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}
