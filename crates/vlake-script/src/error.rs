//! Errors reported while parsing and replaying edit scripts.

mod diagnostic;
mod error_code;
mod label;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;

use std::fmt;

use thiserror::Error;

use vlake::VlakeError;

use crate::span::Span;

/// One or more diagnostics collected while parsing a script.
#[derive(Debug)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// Get all diagnostics in this error.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(first) = self.diagnostics.first() {
            write!(f, "{first}")?;
            if self.diagnostics.len() > 1 {
                write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

/// Failure to load or replay a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A command hit broken editor state; the replay stopped there.
    #[error("command at {span} failed: {source}")]
    Command {
        span: Span,
        #[source]
        source: VlakeError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display_counts_extra_diagnostics() {
        let err = ParseError::new(vec![
            Diagnostic::error("first").with_code(ErrorCode::E100),
            Diagnostic::error("second"),
        ]);
        assert_eq!(err.to_string(), "error[E100]: first (+1 more)");
        assert_eq!(err.diagnostics().len(), 2);
    }

    #[test]
    fn test_script_error_wraps_parse_error() {
        let err: ScriptError = ParseError::from(Diagnostic::error("bad")).into();
        assert!(matches!(err, ScriptError::Parse(_)));
        assert_eq!(err.to_string(), "error: bad");
    }
}
