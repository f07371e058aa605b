use log::warn;

use crate::parsing::{
    ParseOptions,
    diagnostics::{Diagnostic, DiagnosticCode, Reporter},
    rope::span::Span,
};

use super::{
    classify::LineClass,
    kinds::{ContinueOutcome, ImageBlock, ImageBlockNode, OpenOutcome},
    types::{BlockKind, BlockNode},
};

#[derive(Debug, Clone)]
enum LeafState {
    None,
    Paragraph {
        start: Span,
        content_start: Span,
        last_line_end: usize,
    },
    Image {
        node: ImageBlockNode,
        opener: LineClass,
    },
}

/// Assembles classified lines into block nodes.
///
/// Lines are offered to [`ImageBlock::try_open`] until one opens a block;
/// from then on every line goes to [`ImageBlock::try_continue`] until the
/// block closes. Everything else is paragraph text.
pub struct BlockBuilder<'d> {
    document: &'d str,
    options: ParseOptions,
    leaf: LeafState,
    out: Vec<BlockNode>,
}

impl<'d> BlockBuilder<'d> {
    /// `document` identifies the source in generated block ids.
    pub fn new(document: &'d str, options: ParseOptions) -> Self {
        Self {
            document,
            options,
            leaf: LeafState::None,
            out: vec![],
        }
    }

    pub fn push(&mut self, c: &LineClass, reporter: &mut dyn Reporter) {
        if let LeafState::Image { node, .. } = &mut self.leaf {
            if ImageBlock::try_continue(node, c, reporter) == ContinueOutcome::Closed {
                self.flush_image(reporter);
            }
            return;
        }

        match ImageBlock::try_open(self.document, c, reporter) {
            OpenOutcome::Blank => self.flush_paragraph(),
            OpenOutcome::Opened(node) => {
                self.flush_paragraph();
                self.leaf = LeafState::Image {
                    node,
                    opener: c.clone(),
                };
            }
            OpenOutcome::Rejected => self.extend_paragraph(c.line, c.text_span),
        }
    }

    pub fn finish(mut self, reporter: &mut dyn Reporter) -> Vec<BlockNode> {
        // EOF flush
        self.flush_paragraph();
        self.flush_image(reporter);
        self.out
    }

    fn extend_paragraph(&mut self, line: Span, content_span: Span) {
        match self.leaf {
            LeafState::Paragraph {
                start,
                content_start,
                ..
            } => {
                self.leaf = LeafState::Paragraph {
                    start,
                    content_start,
                    last_line_end: line.end,
                };
            }
            _ => {
                self.leaf = LeafState::Paragraph {
                    start: line,
                    content_start: content_span,
                    last_line_end: line.end,
                };
            }
        }
    }

    fn flush_paragraph(&mut self) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        if let LeafState::Paragraph {
            start,
            content_start,
            last_line_end,
        } = prev
        {
            self.out.push(BlockNode {
                kind: BlockKind::Paragraph,
                span: Span {
                    start: start.start,
                    end: last_line_end,
                },
                content_span: Span {
                    start: content_start.start,
                    end: last_line_end,
                },
            });
        } else {
            self.leaf = prev; // put back non-paragraph leaf (e.g. image)
        }
    }

    /// Emits the image leaf, closed or not.
    fn flush_image(&mut self, reporter: &mut dyn Reporter) {
        let prev = std::mem::replace(&mut self.leaf, LeafState::None);
        let LeafState::Image { node, opener } = prev else {
            self.leaf = prev;
            return;
        };

        if !node.is_closed {
            warn!(
                "{}: image block {} opened on line {} is never closed",
                self.document,
                node.id,
                node.line + 1
            );
            if self.options.report_unterminated {
                reporter.report(
                    Diagnostic::warning(
                        DiagnosticCode::UnterminatedBlock,
                        format!(
                            "image block is never closed; expected `{}{}{}`",
                            ":".repeat(node.fence_len),
                            ImageBlock::END_MARKER,
                            ImageBlock::CLOSE
                        ),
                        &opener,
                    )
                    .with_block(&node.id),
                );
            }
        }

        let content_span = match (node.content.first(), node.content.last()) {
            (Some(first), Some(last)) => Span {
                start: first.start,
                end: last.end,
            },
            _ => Span {
                start: opener.line.end,
                end: opener.line.end,
            },
        };
        self.out.push(BlockNode {
            span: node.span,
            content_span,
            kind: BlockKind::Image(node),
        });
    }
}
