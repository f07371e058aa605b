//! # Block Parsing
//!
//! Two-phase, line-driven block parsing.
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line becomes a `LineClass`
//!    holding local facts (index, spans, text, blank status)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` offers each line to
//!    the image block state machine and groups the rest into paragraphs
//!
//! ## Modules
//!
//! - **`types`**: Core types (`BlockNode`, `BlockKind`)
//! - **`kinds`**: Block-specific syntax and state (`ImageBlock`)
//! - **`fence`**: Colon fence matching shared by opening and closing lines
//! - **`attributes`**: The `name="value"` grammar of an opening line
//! - **`validate`**: Mapping raw attributes onto the image schema
//! - **`id`**: Position-derived block ids
//! - **`classify`**: `MarkdownLineClassifier` produces `LineClass` for each line
//! - **`builder`**: `BlockBuilder` state machine for block construction
//!
//! ## Key Invariants
//!
//! - An image block closes only on a fence of exactly its opening length
//! - Malformed openers become paragraph text, never partial blocks
//! - All block nodes store byte spans into the rope

pub mod attributes;
pub mod builder;
pub mod classify;
pub mod fence;
pub mod id;
pub mod kinds;
pub mod types;
pub mod validate;

pub use attributes::{RawAttributes, parse_attributes};
pub use builder::BlockBuilder;
pub use classify::{LineClass, MarkdownLineClassifier};
pub use fence::Fence;
pub use id::block_id;
pub use kinds::{ContinueOutcome, ImageBlock, ImageBlockNode, OpenOutcome};
pub use types::{BlockKind, BlockNode};
pub use validate::{ImageFields, validate};
