//! Errors raised when a style or symbol name falls outside the recognized set.

use thiserror::Error;

/// A line style, connective symbol or macro that is not part of the known set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("unknown line style `{0}`, valid values: single_solid, single_dotted, double_solid")]
    UnknownLineStyle(String),

    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),

    #[error("no symbol is associated with macro `{0}`")]
    UnknownMarkup(String),
}
