//! # Snapshot Support
//!
//! Utilities for checking the parser via structured comparisons and
//! invariant checks, also used for the CLI's machine-readable output.
//!
//! ## Modules
//!
//! - **`normalize`**: Converts parsed blocks and diagnostics to stable,
//!   serializable `Snap` values
//! - **`invariants`**: Runtime checks for parser correctness (spans in bounds,
//!   content spans contained in their blocks, blocks in order)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{BlockSnap, DiagnosticSnap, ImageSnap, Snap, normalize, normalize_diagnostics};
