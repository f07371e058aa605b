use crate::parsing::rope::span::Span;

use super::kinds::ImageBlockNode;

/// The kind of a leaf block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    /// Consecutive non-blank lines that opened no other block, including
    /// rejected image block candidates.
    Paragraph,
    /// A fenced image block, closed or not.
    Image(ImageBlockNode),
}

/// A parsed block node with its kind and spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockNode {
    /// The kind of leaf block.
    pub kind: BlockKind,
    /// Full byte span of the block including delimiters.
    pub span: Span,
    /// Content span: paragraph text, or the lines between image fences.
    pub content_span: Span,
}

impl BlockNode {
    pub fn as_image(&self) -> Option<&ImageBlockNode> {
        match &self.kind {
            BlockKind::Image(node) => Some(node),
            BlockKind::Paragraph => None,
        }
    }
}
