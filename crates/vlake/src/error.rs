//! Error types for vlake operations.
//!
//! [`VlakeError`] covers failures that abort an operation. Conditions caused
//! by user input, such as editing with nothing selected, are not errors; they
//! are reported as [`EditStatus::Declined`](crate::editor::EditStatus::Declined).

use thiserror::Error;

use vlake_core::StyleError;

use crate::element::ElementId;

/// The main error type for vlake operations.
#[derive(Debug, Error)]
pub enum VlakeError {
    /// Geometry was read before a layout pass placed the element.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error(transparent)]
    UnknownStyle(#[from] StyleError),

    /// The element tree broke one of its structural rules.
    #[error("Structural invariant violated: {0}")]
    StructuralInvariant(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl VlakeError {
    pub(crate) fn unstaged(id: ElementId) -> Self {
        Self::InvalidState(format!("element {id} has not been staged"))
    }

    pub(crate) fn missing(id: ElementId) -> Self {
        Self::StructuralInvariant(format!("element {id} is not part of the tree"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_error_is_transparent() {
        let err = VlakeError::from(StyleError::UnknownSymbol("log_xor".to_string()));
        assert!(matches!(err, VlakeError::UnknownStyle(_)));
        assert_eq!(err.to_string(), "unknown symbol `log_xor`");
    }
}
