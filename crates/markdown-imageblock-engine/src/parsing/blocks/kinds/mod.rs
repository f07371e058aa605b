pub mod image;

pub use image::{ContinueOutcome, ImageBlock, ImageBlockNode, OpenOutcome};
