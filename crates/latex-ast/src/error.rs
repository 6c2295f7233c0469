//! Non-fatal diagnostics collected during parsing.
//!
//! Grounded on `crates/math-core/src/error.rs`'s `LatexError`/`LatexErrKind`
//! split — a public error struct wrapping a byte span, a crate-private
//! kind enum, and an `ariadne`-backed pretty-report method behind a
//! feature flag. Diverges from that file in one respect: malformed LaTeX
//! here is *never* an early-return `Err`. `parse` always returns a
//! [`crate::ast::Document`]; a `Diagnostic` is only ever pushed onto an
//! accumulating `Vec`, per the specification's soft-error policy.

use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    UnterminatedGroup,
    UnterminatedEnvironment,
    MismatchedEnvironment,
    UnmatchedClose,
    UnterminatedLeft,
    UnmatchedRight,
    ExpectedDelimiter,
    UnclosedBracket,
    InvalidMacroName,
    MacroArityMismatch,
    MacroRecursionOverflow,
    NestingTooDeep,
}

impl DiagnosticKind {
    pub fn message(self) -> &'static str {
        match self {
            DiagnosticKind::UnterminatedGroup => "unterminated group, closed at end of input",
            DiagnosticKind::UnterminatedEnvironment => {
                "unterminated environment, closed at end of input"
            }
            DiagnosticKind::MismatchedEnvironment => {
                "\\end name does not match the innermost open \\begin"
            }
            DiagnosticKind::UnmatchedClose => "closing brace with no matching opening brace",
            DiagnosticKind::UnterminatedLeft => "\\left with no matching \\right",
            DiagnosticKind::UnmatchedRight => "\\right with no preceding \\left",
            DiagnosticKind::ExpectedDelimiter => "expected a delimiter here",
            DiagnosticKind::UnclosedBracket => "unterminated optional argument",
            DiagnosticKind::InvalidMacroName => "\\newcommand name must be a single command",
            DiagnosticKind::MacroArityMismatch => "not enough arguments supplied to macro",
            DiagnosticKind::MacroRecursionOverflow => "macro expansion recursion limit exceeded",
            DiagnosticKind::NestingTooDeep => {
                "nesting depth limit exceeded, remaining input flattened to literal text"
            }
        }
    }
}

/// A single soft error, with the byte span in the source it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub span: Range<usize>,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn new(at: usize, kind: DiagnosticKind) -> Self {
        Diagnostic {
            span: at..at + 1,
            kind,
        }
    }

    pub fn message(&self) -> &'static str {
        self.kind.message()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at byte {})", self.message(), self.span.start)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(feature = "ariadne")]
impl Diagnostic {
    /// Renders this diagnostic as an `ariadne::Report` for terminal output.
    pub fn to_report<'a>(
        &self,
        source_name: &'a str,
    ) -> ariadne::Report<'a, (&'a str, Range<usize>)> {
        use ariadne::{Config, IndexType, Label, Report, ReportKind};

        Report::build(ReportKind::Warning, (source_name, self.span.clone()))
            .with_config(Config::default().with_index_type(IndexType::Byte))
            .with_label(Label::new((source_name, self.span.clone())).with_message(self.message()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message_and_offset() {
        let d = Diagnostic::new(5, DiagnosticKind::UnterminatedGroup);
        let s = d.to_string();
        assert!(s.contains("unterminated group"));
        assert!(s.contains('5'));
    }
}
