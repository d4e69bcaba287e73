//! Error adapter for converting [`CliError`] to miette diagnostics.
//!
//! A script that fails to parse usually has more than one bad line; each
//! diagnostic is rendered as its own report with a snippet of the script.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use vlake_script::{Diagnostic, Span};

use crate::error::CliError;

/// Adapter for a single script diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Script source for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        // The first label marks the offending input.
        Some(Box::new(labels.iter().enumerate().map(|(i, label)| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if i == 0 {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for every [`CliError`] that is not a parse failure.
///
/// Replay failures still point at the command that caused them.
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            CliError::Io(_) => "vlake::io",
            CliError::Config(_) => "vlake::config",
            CliError::Parse { .. } => return None,
            CliError::Command { .. } => "vlake::replay",
            CliError::Vlake(_) => "vlake::editor",
            CliError::Export(_) => "vlake::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            CliError::Export(_) => Some(Box::new(
                "start the script with `select root` and give the root some text",
            )),
            _ => None,
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match &self.0 {
            CliError::Command { src, .. } => Some(src as &dyn miette::SourceCode),
            _ => None,
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match &self.0 {
            CliError::Command { span, .. } => Some(Box::new(std::iter::once(
                LabeledSpan::new_primary_with_span(
                    Some("while running this command".to_string()),
                    span_to_miette(*span),
                ),
            ))),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A script diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`CliError`] into a list of reportable errors.
///
/// Parse failures give one [`Reportable`] per diagnostic; everything else
/// gives a single one.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Parse { err: parse_err, src } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use vlake::{Decline, VlakeError};
    use vlake_script::{ErrorCode, ParseError};

    use super::*;

    #[test]
    fn test_multiple_diagnostics() {
        let diags = vec![
            Diagnostic::error("unknown symbol `log_xor`")
                .with_code(ErrorCode::E200)
                .with_label(Span::new(11..18), "not a symbol key"),
            Diagnostic::error("unterminated string")
                .with_code(ErrorCode::E101)
                .with_label(Span::new(30..35), "string starts here")
                .with_help("close the string with `\"`"),
        ];
        let err = CliError::Parse {
            err: ParseError::new(diags),
            src: "connective log_xor\ntext \"open".to_string(),
        };

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "unknown symbol `log_xor`");
        assert_eq!(
            reportables[0].code().map(|c| c.to_string()),
            Some("E200".to_string())
        );
        assert!(reportables[1].help().is_some());
    }

    #[test]
    fn test_first_label_is_primary() {
        let diag = Diagnostic::error("missing argument")
            .with_label(Span::new(0..3), "this command")
            .with_label(Span::new(4..8), "needs a direction");
        let adapter = DiagnosticAdapter::new(&diag, "add else");

        let labels: Vec<_> = adapter.labels().unwrap().collect();
        assert_eq!(labels.len(), 2);
        assert!(labels[0].primary());
        assert!(!labels[1].primary());
        assert_eq!(labels[1].label(), Some("needs a direction"));
    }

    #[test]
    fn test_command_error_points_at_command() {
        let err = CliError::Command {
            span: Span::new(12..25),
            source: VlakeError::InvalidState("stale".to_string()),
            src: "select root\nclick 400 150\n".to_string(),
        };

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        let reportable = &reportables[0];
        assert!(reportable.source_code().is_some());
        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels[0].offset(), 12);
        assert_eq!(labels[0].len(), 13);
        assert_eq!(
            reportable.code().map(|c| c.to_string()),
            Some("vlake::replay".to_string())
        );
    }

    #[test]
    fn test_plain_error() {
        let err = CliError::Export(Decline::EmptyDeduction);
        let reportables = to_reportables(&err);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert!(e.to_string().starts_with("Nothing to export"));
                assert!(e.source_code().is_none());
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }
}
