use serde::Serialize;
use xi_rope::Rope;

use crate::parsing::{
    blocks::{BlockKind, BlockNode, ImageBlockNode},
    diagnostics::Diagnostic,
    rope::slice::preview,
};

/// Snapshot of a parsed document.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct Snap {
    /// All blocks in the document.
    pub blocks: Vec<BlockSnap>,
}

/// Snapshot of a single block.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct BlockSnap {
    /// Block kind as a string ("Paragraph" or "Image").
    pub kind: String,
    /// Byte span as (start, end) tuple.
    pub span: (usize, usize),
    /// Preview of block text (truncated for readability).
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageSnap>,
}

/// Fields of an image block, positions one-based for humans.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ImageSnap {
    pub id: String,
    pub line: usize,
    pub column: usize,
    pub fence_len: usize,
    pub src: String,
    pub alt: String,
    pub closed: bool,
    pub content_lines: usize,
}

impl From<&ImageBlockNode> for ImageSnap {
    fn from(node: &ImageBlockNode) -> Self {
        ImageSnap {
            id: node.id.clone(),
            line: node.line + 1,
            column: node.column + 1,
            fence_len: node.fence_len,
            src: node.src.clone(),
            alt: node.alt.clone(),
            closed: node.is_closed,
            content_lines: node.content.len(),
        }
    }
}

/// Snapshot of a reported diagnostic.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct DiagnosticSnap {
    pub code: String,
    pub severity: String,
    pub line: usize,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<String>,
}

/// Converts parsed blocks into a serializable snapshot.
pub fn normalize(rope: &Rope, blocks: &[BlockNode]) -> Snap {
    let blocks = blocks
        .iter()
        .map(|b| {
            let (kind, image) = match &b.kind {
                BlockKind::Paragraph => ("Paragraph", None),
                BlockKind::Image(node) => ("Image", Some(ImageSnap::from(node))),
            };
            BlockSnap {
                kind: kind.to_string(),
                span: (b.span.start, b.span.end),
                text: preview(rope, b.span, 80),
                image,
            }
        })
        .collect();

    Snap { blocks }
}

/// Converts diagnostics into serializable snapshots, lines one-based.
pub fn normalize_diagnostics(diagnostics: &[Diagnostic]) -> Vec<DiagnosticSnap> {
    diagnostics
        .iter()
        .map(|d| DiagnosticSnap {
            code: d.code.tag().to_string(),
            severity: format!("{:?}", d.severity).to_lowercase(),
            line: d.line + 1,
            message: d.message.clone(),
            block_id: d.block_id.clone(),
        })
        .collect()
}
