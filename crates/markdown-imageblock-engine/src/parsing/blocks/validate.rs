use crate::parsing::diagnostics::{Diagnostic, DiagnosticCode, Reporter};

use super::{attributes::RawAttributes, classify::LineClass};

/// The validated semantic fields of an image block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFields {
    /// Image location, from `source`.
    pub src: String,
    /// Alternative text, from `alt-text`.
    pub alt: String,
}

impl ImageFields {
    pub const SOURCE: &'static str = "source";
    pub const ALT_TEXT: &'static str = "alt-text";
}

/// Maps raw attributes onto [`ImageFields`].
///
/// The first attribute outside the schema is reported and fails validation
/// immediately. Otherwise every missing required field is reported before
/// failing.
pub fn validate(
    raw: RawAttributes,
    line: &LineClass,
    reporter: &mut dyn Reporter,
) -> Option<ImageFields> {
    let mut src = String::new();
    let mut alt = String::new();

    for (name, value) in raw {
        match name.as_str() {
            ImageFields::SOURCE => src = value,
            ImageFields::ALT_TEXT => alt = value,
            _ => {
                reporter.report(Diagnostic::error(
                    DiagnosticCode::UnexpectedAttribute,
                    format!("unexpected attribute `{name}`"),
                    line,
                ));
                return None;
            }
        }
    }

    if src.is_empty() {
        reporter.report(Diagnostic::error(
            DiagnosticCode::MissingAttribute,
            "source is a required attribute",
            line,
        ));
    }
    if alt.is_empty() {
        reporter.report(Diagnostic::error(
            DiagnosticCode::MissingAttribute,
            "alt-text is a required attribute",
            line,
        ));
    }
    if src.is_empty() || alt.is_empty() {
        return None;
    }

    Some(ImageFields { src, alt })
}
