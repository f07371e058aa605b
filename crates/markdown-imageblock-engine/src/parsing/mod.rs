pub mod blocks;
pub mod cursor;
pub mod diagnostics;
pub mod rope;
pub mod snapshot;

#[cfg(test)]
mod tests;

use xi_rope::Rope;

use blocks::{BlockBuilder, BlockNode, ImageBlockNode, MarkdownLineClassifier};
use diagnostics::Reporter;
use rope::lines_with_spans;

/// Document-level parsing switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Report image blocks still open at end of input.
    pub report_unterminated: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            report_unterminated: true,
        }
    }
}

#[derive(Debug)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockNode>,
}

impl ParsedDoc {
    /// Image blocks in document order.
    pub fn images(&self) -> impl Iterator<Item = &ImageBlockNode> {
        self.blocks.iter().filter_map(BlockNode::as_image)
    }
}

/// Parses `rope` line by line into paragraphs and image blocks.
///
/// `document` is the identity mixed into block ids (usually a relative
/// path). Problems go to `reporter`; parsing itself never fails.
pub fn parse_document(
    rope: &Rope,
    document: &str,
    options: ParseOptions,
    reporter: &mut dyn Reporter,
) -> ParsedDoc {
    let classifier = MarkdownLineClassifier;
    let mut builder = BlockBuilder::new(document, options);

    for lr in lines_with_spans(rope) {
        let lc = classifier.classify(&lr);
        builder.push(&lc, reporter);
    }

    ParsedDoc {
        blocks: builder.finish(reporter),
    }
}
