//! A single script error with its code, labelled spans and help text.

use std::fmt;

use crate::{
    error::{error_code::ErrorCode, label::Label},
    span::Span,
};

/// A script error with source location information.
///
/// # Example
///
/// ```text
/// error[E200]: unknown symbol key `log_xor`
///   --> proof.vls:4:12
///    |
///  4 | connective log_xor
///    |            ^^^^^^^ unknown symbol key
///    |
///    = help: valid keys: log_and, log_or, ...
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    ///
    /// # Example
    ///
    /// ```
    /// # use vlake_script::{Diagnostic, ErrorCode, Span};
    /// let diag = Diagnostic::error("missing direction")
    ///     .with_code(ErrorCode::E102)
    ///     .with_label(Span::new(0..3), "expected an argument")
    ///     .with_help("use one of: above, below, left, right");
    /// assert_eq!(diag.to_string(), "error[E102]: missing direction");
    /// ```
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Span of the first label, if any.
    pub fn span(&self) -> Option<Span> {
        self.labels.first().map(Label::span)
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::new(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("error")?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}
