//! Text leaves and connective symbols.

use vlake_core::{
    StyleError,
    symbol::{Symbol, SymbolTable},
};

/// A leaf displaying free text or a symbol.
///
/// When `markup` is set it is exported instead of the displayed text. The
/// placeholder leaf shows a star and exports `\bigstar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtomicLeaf {
    text: String,
    markup: Option<String>,
}

impl AtomicLeaf {
    /// A leaf whose text is exported verbatim.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            markup: None,
        }
    }

    /// A leaf showing `symbol` and exporting its macro.
    pub fn from_symbol(symbol: Symbol) -> Self {
        Self {
            text: symbol.glyph(),
            markup: Some(symbol.markup().to_string()),
        }
    }

    /// The leaf every new deduction position starts with.
    pub fn placeholder() -> Self {
        Self::from_symbol(SymbolTable::builtin().default_symbol())
    }

    /// The text drawn on the canvas.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The markup override, if any.
    pub fn markup(&self) -> Option<&str> {
        self.markup.as_deref()
    }

    /// True if the leaf still shows the default star.
    pub fn is_placeholder(&self) -> bool {
        *self == Self::placeholder()
    }

    /// The text a host should present for editing.
    ///
    /// The placeholder is presented as an empty string.
    pub fn display_text(&self) -> &str {
        if self.is_placeholder() { "" } else { &self.text }
    }

    /// Replaces the leaf's text.
    ///
    /// Non-empty text drops any markup override. Empty text restores the
    /// placeholder.
    pub fn set_text(&mut self, text: &str) {
        if text.is_empty() {
            *self = Self::placeholder();
        } else {
            self.text = text.to_string();
            self.markup = None;
        }
    }

    /// The exported form: the markup override or the literal text.
    pub fn to_markup(&self) -> &str {
        self.markup.as_deref().unwrap_or(&self.text)
    }
}

/// A connective symbol between two children of a horizontal join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectiveLeaf {
    symbol: Symbol,
}

impl ConnectiveLeaf {
    /// Creates a connective for the symbol named `key`.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownSymbol`] if `key` is not in the symbol table.
    pub fn new(key: &str) -> Result<Self, StyleError> {
        SymbolTable::builtin()
            .get(key)
            .map(|symbol| Self { symbol })
    }

    pub(crate) fn default_connective() -> Self {
        Self {
            symbol: SymbolTable::builtin().default_connective(),
        }
    }

    pub fn key(&self) -> &'static str {
        self.symbol.key()
    }

    pub fn glyph(&self) -> String {
        self.symbol.glyph()
    }

    pub fn markup(&self) -> &'static str {
        self.symbol.markup()
    }

    /// Switches to the symbol named `key`, updating glyph and macro together.
    pub fn set_symbol(&mut self, key: &str) -> Result<(), StyleError> {
        self.symbol = SymbolTable::builtin().get(key)?;
        Ok(())
    }
}
