//! Export backends for rendered deductions.
//!
//! Markup export lives in [`crate::markup`]; this module holds the drawing
//! backends that turn a staged tree into an image.
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgSurface`]

pub mod svg;
