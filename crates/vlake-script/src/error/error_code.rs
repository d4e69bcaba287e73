//! Error codes for script diagnostics.
//!
//! - `E1xx` - Syntax errors
//! - `E2xx` - Unknown names

use std::fmt;

/// Error codes for categorizing script diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // Syntax Errors (E1xx)
    // =========================================================================
    /// Unexpected input.
    ///
    /// An unknown command, a malformed argument, or trailing text after a
    /// complete command.
    E100,

    /// Unterminated string.
    ///
    /// A string was opened with a quote but the line ended before it was
    /// closed.
    E101,

    /// Missing argument.
    ///
    /// The line ended before a required argument was given.
    E102,

    // =========================================================================
    // Name Errors (E2xx)
    // =========================================================================
    /// Unknown symbol key.
    E200,

    /// Unknown line style.
    E201,
}

impl ErrorCode {
    /// Returns the code as a string (e.g., "E100").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E102 => "E102",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
        }
    }

    /// Returns a short description of what this error code means.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E100 => "unexpected input",
            ErrorCode::E101 => "unterminated string",
            ErrorCode::E102 => "missing argument",
            ErrorCode::E200 => "unknown symbol key",
            ErrorCode::E201 => "unknown line style",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
