//! Errors surfaced by the command-line host.

use std::io;

use thiserror::Error;

use vlake::{Decline, VlakeError};
use vlake_script::{ParseError, ScriptError, Span};

use crate::config::ConfigError;

/// Everything that can stop a `vlake` run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The script did not parse. `src` is kept for source snippets.
    #[error("{err}")]
    Parse { err: ParseError, src: String },

    /// A parsed command hit broken editor state during replay.
    #[error("Command at {span} failed: {source}")]
    Command {
        span: Span,
        #[source]
        source: VlakeError,
        src: String,
    },

    #[error(transparent)]
    Vlake(#[from] VlakeError),

    #[error("Nothing to export: {0}")]
    Export(Decline),
}

impl CliError {
    /// Attaches the script source to a [`ScriptError`].
    pub fn from_script(err: ScriptError, src: impl Into<String>) -> Self {
        let src = src.into();
        match err {
            ScriptError::Parse(err) => Self::Parse { err, src },
            ScriptError::Command { span, source } => Self::Command { span, source, src },
        }
    }
}

#[cfg(test)]
mod tests {
    use vlake_script::Diagnostic;

    use super::*;

    #[test]
    fn test_from_script_keeps_source() {
        let parse = ParseError::from(Diagnostic::error("bad"));
        match CliError::from_script(ScriptError::Parse(parse), "add") {
            CliError::Parse { src, .. } => assert_eq!(src, "add"),
            other => panic!("Expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_command_error_message() {
        let err = CliError::from_script(
            ScriptError::Command {
                span: Span::new(4..9),
                source: VlakeError::InvalidState("stale layout".to_string()),
            },
            "    click 1 2",
        );
        assert_eq!(
            err.to_string(),
            "Command at 4..9 failed: Invalid state: stale layout"
        );
    }

    #[test]
    fn test_export_message() {
        let err = CliError::Export(Decline::EmptyDeduction);
        assert_eq!(
            err.to_string(),
            "Nothing to export: create a deduction before exporting it"
        );
    }
}
