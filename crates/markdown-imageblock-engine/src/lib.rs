pub mod io;
pub mod parsing;

// Re-export key types for easier usage
pub use io::*;
pub use parsing::{
    ParseOptions, ParsedDoc,
    blocks::{BlockKind, BlockNode, ImageBlockNode},
    diagnostics::{Diagnostic, DiagnosticCode, NullReporter, ReportFn, Reporter},
    parse_document,
};
