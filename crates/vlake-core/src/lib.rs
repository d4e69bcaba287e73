//! vlake Core Types and Definitions
//!
//! This crate provides the foundational types shared by the vlake deduction
//! editor. It includes:
//!
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Symbols**: The glyph/macro symbol table ([`symbol`] module)
//! - **Draw**: Text measurement, line styles and the drawing surface
//!   abstraction ([`draw`] module)

pub mod color;
pub mod draw;
pub mod geometry;
pub mod symbol;

mod error;

pub use error::StyleError;
