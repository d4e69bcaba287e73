//! Unicode/markup symbol table.
//!
//! Every symbol the editor can place is known by a short name (its *key*),
//! a unicode codepoint used for on-screen display, and the Virginia Lake
//! macro emitted on export. The table is static and ordered so that hosts can
//! list connective choices in a stable order.
//!
//! # Example
//!
//! ```
//! # use vlake_core::symbol::SymbolTable;
//! let table = SymbolTable::builtin();
//! assert_eq!(table.glyph_for("log_and").unwrap(), "\u{2227}");
//! assert_eq!(table.markup_for("log_and").unwrap(), "\\vlan");
//! assert_eq!(table.key_for_markup("\\vlan").unwrap(), "log_and");
//! ```

use std::sync::OnceLock;

use indexmap::IndexMap;

use crate::StyleError;

/// Key of the placeholder glyph used for fresh leaves (a filled star).
pub const DEFAULT_SYMBOL: &str = "black_star";

/// Key of the connective inserted between children of a horizontal join.
pub const DEFAULT_CONNECTIVE: &str = "log_and";

const BUILTIN_SYMBOLS: [(&str, char, &str); 14] = [
    ("log_and", '\u{2227}', "\\vlan"),
    ("log_or", '\u{2228}', "\\vlor"),
    ("log_not", '\u{00AC}', "\\vlne"),
    ("turned_ampersand", '\u{214B}', "\\vlpa"),
    ("circled_times", '\u{2297}', "\\vlte"),
    ("normal_subgroup_of", '\u{22B2}', "\\vlse"),
    ("multimap", '\u{22B8}', "\\vlli"),
    ("superset_of", '\u{2283}', "\\vljm"),
    ("subset_of", '\u{2282}', "\\vlmj"),
    ("psi_lower", '\u{03C8}', "\\psi"),
    ("right_arrow", '\u{2192}', "\\vlim"),
    ("left_arrow", '\u{2190}', "\\vlmi"),
    ("left_right_arrow", '\u{2194}', "\\vldi"),
    ("black_star", '\u{2605}', "\\bigstar"),
];

static BUILTIN_TABLE: OnceLock<SymbolTable> = OnceLock::new();

/// A single entry of the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    key: &'static str,
    codepoint: char,
    markup: &'static str,
}

impl Symbol {
    /// The symbol's name, e.g. `log_and`.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The unicode character displayed for this symbol.
    pub fn codepoint(&self) -> char {
        self.codepoint
    }

    /// The displayed glyph as a string.
    pub fn glyph(&self) -> String {
        self.codepoint.to_string()
    }

    /// The macro emitted for this symbol on export, e.g. `\vlan`.
    pub fn markup(&self) -> &'static str {
        self.markup
    }
}

/// Ordered lookup table between symbol keys, glyphs and macros.
#[derive(Debug)]
pub struct SymbolTable {
    by_key: IndexMap<&'static str, Symbol>,
    by_markup: IndexMap<&'static str, &'static str>,
}

impl SymbolTable {
    /// Returns the shared table of built-in symbols.
    pub fn builtin() -> &'static SymbolTable {
        BUILTIN_TABLE.get_or_init(|| {
            let mut by_key = IndexMap::with_capacity(BUILTIN_SYMBOLS.len());
            let mut by_markup = IndexMap::with_capacity(BUILTIN_SYMBOLS.len());
            for (key, codepoint, markup) in BUILTIN_SYMBOLS {
                by_key.insert(
                    key,
                    Symbol {
                        key,
                        codepoint,
                        markup,
                    },
                );
                by_markup.insert(markup, key);
            }
            SymbolTable { by_key, by_markup }
        })
    }

    /// Looks up a symbol by key.
    ///
    /// # Errors
    ///
    /// Returns [`StyleError::UnknownSymbol`] if the key is not in the table.
    pub fn get(&self, key: &str) -> Result<Symbol, StyleError> {
        self.by_key
            .get(key)
            .copied()
            .ok_or_else(|| StyleError::UnknownSymbol(key.to_string()))
    }

    /// Returns the displayed glyph for `key`.
    pub fn glyph_for(&self, key: &str) -> Result<String, StyleError> {
        self.get(key).map(|symbol| symbol.glyph())
    }

    /// Returns the export macro for `key`.
    pub fn markup_for(&self, key: &str) -> Result<&'static str, StyleError> {
        self.get(key).map(|symbol| symbol.markup())
    }

    /// Reverse lookup from an export macro to the symbol key.
    pub fn key_for_markup(&self, markup: &str) -> Result<&'static str, StyleError> {
        self.by_markup
            .get(markup)
            .copied()
            .ok_or_else(|| StyleError::UnknownMarkup(markup.to_string()))
    }

    /// Iterates over all symbols in table order.
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.by_key.values()
    }

    /// The placeholder symbol used for fresh leaves.
    pub fn default_symbol(&self) -> Symbol {
        self.by_key[DEFAULT_SYMBOL]
    }

    /// The connective inserted by default into horizontal joins.
    pub fn default_connective(&self) -> Symbol {
        self.by_key[DEFAULT_CONNECTIVE]
    }
}
