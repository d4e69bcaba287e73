//! Drawing a staged element tree onto a [`Surface`].
//!
//! Rendering reads the geometry assigned by the last layout pass, so every
//! element must be staged first. Colors are inherited down the tree: a
//! selected element and its whole subtree are drawn in the highlight color,
//! everything else in the surface's current stroke color.

use vlake_core::{
    color::Color,
    draw::{FontSpec, Surface},
    geometry::Point,
};

use crate::{
    config::AppConfig,
    element::{Element, Node},
    error::VlakeError,
};

/// Half the side length of the canvas centre crosshair.
const CENTRE_MARK_SIZE: f32 = 10.0;

/// Font and highlight color applied while rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    font: FontSpec,
    highlight: Color,
}

impl RenderStyle {
    pub fn new(font: FontSpec, highlight: Color) -> Self {
        Self { font, highlight }
    }

    /// Builds the render style from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns [`VlakeError::Config`] if the highlight color cannot be parsed.
    pub fn from_config(config: &AppConfig) -> Result<Self, VlakeError> {
        let highlight = config
            .style()
            .highlight_color()
            .map_err(VlakeError::Config)?;
        Ok(Self::new(config.layout().font().clone(), highlight))
    }

    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    pub fn highlight(&self) -> &Color {
        &self.highlight
    }
}

impl Element {
    /// Draws this subtree onto `surface`.
    ///
    /// Unselected elements use the surface's current stroke color.
    ///
    /// # Errors
    ///
    /// Returns [`VlakeError::InvalidState`] if any element has not been staged.
    pub fn render(&self, surface: &mut dyn Surface, style: &RenderStyle) -> Result<(), VlakeError> {
        let ink = *surface.stroke_color();
        self.render_with(surface, style, &ink)
    }

    fn render_with(
        &self,
        surface: &mut dyn Surface,
        style: &RenderStyle,
        inherited: &Color,
    ) -> Result<(), VlakeError> {
        let bounds = self.bounds()?;
        let color = if self.is_selected() {
            style.highlight()
        } else {
            inherited
        };
        let text_origin = Point::new(bounds.min_x(), bounds.center().y());

        match self.node() {
            Node::Leaf(leaf) => surface.draw_text(leaf.text(), text_origin, style.font(), color),
            Node::Connective(connective) => {
                surface.draw_text(&connective.glyph(), text_origin, style.font(), color)
            }
            Node::Line(line) => {
                for segment in line.style().segments(bounds.center(), line.width()?) {
                    surface.draw_line(segment.from, segment.to, color);
                }
            }
            Node::Join(join) => {
                for element in join.elements() {
                    element.render_with(surface, style, color)?;
                }
                if join.is_boxed() {
                    surface.draw_rect(bounds, color);
                }
            }
        }
        Ok(())
    }
}

/// Draws a diagonal crosshair centred on `center`.
///
/// The surface's stroke color is restored afterwards.
pub fn draw_centre_mark(surface: &mut dyn Surface, center: Point, color: Color) {
    let previous = *surface.stroke_color();
    surface.set_stroke_color(color);

    let offset = Point::new(CENTRE_MARK_SIZE, CENTRE_MARK_SIZE);
    let flipped = Point::new(CENTRE_MARK_SIZE, -CENTRE_MARK_SIZE);
    surface.draw_line(center.sub_point(offset), center.add_point(offset), &color);
    surface.draw_line(center.add_point(flipped), center.sub_point(flipped), &color);

    surface.set_stroke_color(previous);
}
