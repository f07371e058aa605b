use xi_rope::Rope;

use crate::parsing::blocks::{BlockKind, BlockNode};

/// Validates parser output invariants.
///
/// Asserts that:
/// - All block and content spans are within rope bounds
/// - Content spans are contained within their block spans
/// - Blocks appear in document order without overlapping
/// - Image content lines lie inside the image span
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(rope: &Rope, blocks: &[BlockNode]) {
    let n = rope.len();
    let mut prev_end = 0;
    for b in blocks {
        assert!(
            b.span.start <= b.span.end && b.span.end <= n,
            "block span out of bounds: {:?} (rope len: {})",
            b.span,
            n
        );
        assert!(
            b.span.contains(b.content_span),
            "content span not contained in block span: content {:?}, block {:?}",
            b.content_span,
            b.span
        );
        assert!(
            b.span.start >= prev_end,
            "block {:?} overlaps previous block ending at {}",
            b.span,
            prev_end
        );
        prev_end = b.span.end;

        if let BlockKind::Image(image) = &b.kind {
            for line in &image.content {
                assert!(
                    b.span.contains(*line),
                    "image content line {:?} outside block {:?}",
                    line,
                    b.span
                );
            }
        }
    }
}
