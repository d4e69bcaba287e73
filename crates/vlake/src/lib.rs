//! vlake - An editor model for deduction diagrams.
//!
//! A deduction is a tree of atomic formulas, logical connectives and
//! inference lines. This crate holds that tree, lays it out on a canvas,
//! draws it onto any [`draw::Surface`], resolves clicks into selections,
//! applies structural edits and exports the result as Virginia Lake LaTeX
//! markup.
//!
//! [`Editor`] is the entry point for hosts; the modules below expose the
//! pieces it is built from.

pub mod config;
pub mod edit;
pub mod editor;
pub mod element;
pub mod export;
pub mod layout;
pub mod markup;
pub mod render;
pub mod selection;

mod error;

pub use vlake_core::{color, draw, geometry, symbol};

pub use editor::{Decline, EditStatus, Editor};
pub use error::VlakeError;
