//! The abstract drawing capability that element trees render onto.
//!
//! A [`Surface`] can measure text, draw text, lines and rectangle outlines,
//! and carries a current stroke and fill color. Coordinates are in pixels
//! with the origin at the top-left corner and y growing downwards.

use crate::{
    color::Color,
    draw::text::{FontSpec, TextMeasurer},
    geometry::{Bounds, Point},
};

/// A 2-D drawing target.
///
/// Implementors only need to record or emit primitives; the element tree
/// decides colors and positions.
pub trait Surface: TextMeasurer {
    /// Draws `text` with its left edge at `position.x()`, vertically
    /// centered on `position.y()`.
    fn draw_text(&mut self, text: &str, position: Point, font: &FontSpec, color: &Color);

    /// Draws a straight stroke between two points.
    fn draw_line(&mut self, from: Point, to: Point, color: &Color);

    /// Draws the outline of a rectangle.
    fn draw_rect(&mut self, bounds: Bounds, color: &Color);

    /// The current stroke color.
    fn stroke_color(&self) -> &Color;

    /// Replaces the current stroke color.
    fn set_stroke_color(&mut self, color: Color);

    /// The current fill color.
    fn fill_color(&self) -> &Color;

    /// Replaces the current fill color.
    fn set_fill_color(&mut self, color: Color);
}
