use log::{debug, trace};

use crate::parsing::{
    diagnostics::{Diagnostic, DiagnosticCode, Reporter},
    rope::span::Span,
};

use super::super::{
    attributes::parse_attributes, classify::LineClass, fence::Fence, id::block_id,
    validate::validate,
};

/// A fenced image block with its validated fields.
///
/// ```text
/// ::: image source="cat.png" alt-text="A cat" :::
/// ...
/// :::image-end:::
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBlockNode {
    /// Zero-based line index of the opening fence.
    pub line: usize,
    /// Character column of the opening fence's first marker.
    pub column: usize,
    /// Number of markers in the opening fence; the closing fence must match.
    pub fence_len: usize,
    pub src: String,
    pub alt: String,
    /// Short anchor id, see [`block_id`].
    pub id: String,
    /// From the opening marker to the end of the last consumed line.
    pub span: Span,
    /// Lines between the fences, from line start, line endings excluded.
    pub content: Vec<Span>,
    pub is_closed: bool,
}

/// Result of offering a line to [`ImageBlock::try_open`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    /// Blank line; no decision.
    Blank,
    /// Not an image block. The line is ordinary content.
    Rejected,
    /// The block is open and owns the rest of this line.
    Opened(ImageBlockNode),
}

/// Result of offering a line to an open block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContinueOutcome {
    /// The line is block content.
    Content,
    /// A matching fence without `image-end:::`; reported, block stays open.
    MissingEndMarker,
    /// The block is closed; stop feeding it lines.
    Closed,
}

/// Image block syntax and its open/continue state machine.
pub struct ImageBlock;

impl ImageBlock {
    /// Extension name following the opening fence.
    pub const NAME: &'static str = "image";
    /// Keyword following the closing fence.
    pub const END_MARKER: &'static str = "image-end";
    /// Token terminating both the attribute list and the end marker.
    pub const CLOSE: &'static str = ":::";

    /// Tries to open an image block on `line`.
    ///
    /// Fence and name mismatches are rejected silently. Attribute problems
    /// are reported before rejecting.
    pub fn try_open(document: &str, line: &LineClass, reporter: &mut dyn Reporter) -> OpenOutcome {
        if line.is_blank {
            return OpenOutcome::Blank;
        }

        let mut cur = line.cursor();
        cur.skip_spaces();
        let start = cur.pos();
        let column = cur.column();

        let Some(fence_len) = Fence::count(&mut cur) else {
            return OpenOutcome::Rejected;
        };
        cur.skip_spaces();
        if !Fence::match_keyword(&mut cur, Self::NAME) {
            return OpenOutcome::Rejected;
        }
        // `::: imagery` is not an image block.
        if !matches!(cur.peek(), None | Some(b' ' | b'\t' | Fence::MARKER)) {
            return OpenOutcome::Rejected;
        }

        let Some(raw) = parse_attributes(&mut cur, line, reporter) else {
            trace!("line {}: image attributes rejected", line.index);
            return OpenOutcome::Rejected;
        };
        if !cur.rest_is_blank() {
            trace!("line {}: text after image attributes", line.index);
            return OpenOutcome::Rejected;
        }
        let Some(fields) = validate(raw, line, reporter) else {
            trace!("line {}: image attributes failed validation", line.index);
            return OpenOutcome::Rejected;
        };

        let id = block_id(document, line.index, column);
        debug!(
            "line {}: opened image block {id} with {fence_len}-colon fence",
            line.index
        );

        OpenOutcome::Opened(ImageBlockNode {
            line: line.index,
            column,
            fence_len,
            src: fields.src,
            alt: fields.alt,
            id,
            span: Span {
                start,
                end: line.line.end,
            },
            content: Vec::new(),
            is_closed: false,
        })
    }

    /// Offers the next line to an open block.
    ///
    /// Only a fence of exactly `node.fence_len` markers followed by
    /// `image-end:::` closes the block; anything after that is reported but
    /// does not prevent closing.
    pub fn try_continue(
        node: &mut ImageBlockNode,
        line: &LineClass,
        reporter: &mut dyn Reporter,
    ) -> ContinueOutcome {
        debug_assert!(!node.is_closed, "closed blocks take no more lines");
        node.span.end = line.line.end;

        let mut cur = line.cursor();
        if line.is_blank || !Fence::match_exact(&mut cur, node.fence_len) {
            node.content.push(line.text_span);
            return ContinueOutcome::Content;
        }

        cur.skip_spaces();
        if !(Fence::match_keyword(&mut cur, Self::END_MARKER)
            && Fence::match_keyword(&mut cur, Self::CLOSE))
        {
            reporter.report(
                Diagnostic::warning(
                    DiagnosticCode::MissingEndMarker,
                    format!(
                        "missing ending marker `{}{}` after closing fence",
                        Self::END_MARKER,
                        Self::CLOSE
                    ),
                    line,
                )
                .with_block(&node.id),
            );
            node.content.push(line.text_span);
            return ContinueOutcome::MissingEndMarker;
        }

        cur.skip_spaces();
        if !cur.eof() {
            reporter.report(
                Diagnostic::warning(
                    DiagnosticCode::TrailingCharacters,
                    format!(
                        "invalid character after `{}{}`: `{}`",
                        Self::END_MARKER,
                        Self::CLOSE,
                        cur.rest()
                    ),
                    line,
                )
                .at(cur.pos())
                .with_block(&node.id),
            );
        }

        node.is_closed = true;
        debug!("line {}: closed image block {}", line.index, node.id);
        ContinueOutcome::Closed
    }
}
