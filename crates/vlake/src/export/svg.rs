//! SVG drawing surface.

use log::debug;
use svg::{self, node::Text as SvgText, node::element as svg_element};

use vlake_core::{
    color::Color,
    draw::{FontSpec, Surface, TextMeasurer},
    geometry::{Bounds, Point, Size},
};

/// A [`Surface`] that collects primitives into an SVG document.
///
/// Text measurement is delegated to the wrapped [`TextMeasurer`], which
/// should be the one used for layout so that text fits its boxes.
pub struct SvgSurface<'a> {
    measurer: &'a dyn TextMeasurer,
    size: Size,
    background: Option<Color>,
    stroke: Color,
    fill: Color,
    nodes: Vec<Box<dyn svg::Node>>,
}

impl<'a> SvgSurface<'a> {
    /// Creates an empty canvas of `size`.
    pub fn new(size: Size, measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            measurer,
            size,
            background: None,
            stroke: Color::default(),
            fill: Color::default(),
            nodes: Vec::new(),
        }
    }

    /// Sets a color to fill the canvas with before any drawing.
    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    /// Number of primitives drawn so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Finishes drawing and returns the document.
    pub fn into_document(self) -> svg::Document {
        debug!(primitives = self.nodes.len(); "Building SVG document");
        let mut doc = svg::Document::new()
            .set(
                "viewBox",
                format!("0 0 {} {}", self.size.width(), self.size.height()),
            )
            .set("width", self.size.width())
            .set("height", self.size.height());

        if let Some(background) = &self.background {
            let bg = svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", self.size.width())
                .set("height", self.size.height())
                .set("fill", background)
                .set("fill-opacity", background.alpha());
            doc = doc.add(bg);
        }

        for node in self.nodes {
            doc = doc.add(node);
        }
        doc
    }
}

impl TextMeasurer for SvgSurface<'_> {
    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32 {
        self.measurer.measure_text_width(text, font)
    }
}

impl Surface for SvgSurface<'_> {
    fn draw_text(&mut self, text: &str, position: Point, font: &FontSpec, color: &Color) {
        let rendered = svg_element::Text::new("")
            .set("x", position.x())
            .set("y", position.y())
            .set("text-anchor", "start")
            .set("dominant-baseline", "central")
            .set("font-family", font.family())
            .set("font-size", font.size())
            .set("fill", color)
            .set("fill-opacity", color.alpha())
            .add(SvgText::new(text));
        self.nodes.push(Box::new(rendered));
    }

    fn draw_line(&mut self, from: Point, to: Point, color: &Color) {
        let line = svg_element::Line::new()
            .set("x1", from.x())
            .set("y1", from.y())
            .set("x2", to.x())
            .set("y2", to.y())
            .set("stroke", color)
            .set("stroke-opacity", color.alpha())
            .set("stroke-width", 1);
        self.nodes.push(Box::new(line));
    }

    fn draw_rect(&mut self, bounds: Bounds, color: &Color) {
        let rect = svg_element::Rectangle::new()
            .set("x", bounds.min_x())
            .set("y", bounds.min_y())
            .set("width", bounds.width())
            .set("height", bounds.height())
            .set("fill", "none")
            .set("stroke", color)
            .set("stroke-opacity", color.alpha())
            .set("stroke-width", 1);
        self.nodes.push(Box::new(rect));
    }

    fn stroke_color(&self) -> &Color {
        &self.stroke
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke = color;
    }

    fn fill_color(&self) -> &Color {
        &self.fill
    }

    fn set_fill_color(&mut self, color: Color) {
        self.fill = color;
    }
}
