//! Box-packing layout of the element tree.
//!
//! Layout runs in two recursive passes over the tree. [`Element::measure`]
//! computes the size of a subtree bottom-up, and [`Element::stage`] assigns
//! every element its placement top-down, starting from the root at the
//! canvas centre.
//!
//! # Sizing rules
//!
//! | Element | Width | Height |
//! |---------|-------|--------|
//! | Leaf, connective | measured text | `leaf_height` |
//! | Line | assigned by its join | style height |
//! | Horizontal join | Σ widths + 2·hspace per connective | max child height |
//! | Vertical join | max child width | Σ heights + 2·vspace per line |
//!
//! A boxed join adds `box_margin` on every side.
//!
//! Geometry is valid until the next mutation; editing operations call
//! [`Element::unstage`] and hosts run [`layout`] again before drawing.

use log::{debug, trace};

use vlake_core::{
    draw::TextMeasurer,
    geometry::{Bounds, Point, Size},
};

use crate::{
    config::LayoutConfig,
    element::{Element, HorizontalLine, Join, Node, Orientation},
    error::VlakeError,
};

/// Constants and text measurement shared by one layout pass.
pub struct LayoutContext<'a> {
    config: &'a LayoutConfig,
    measurer: &'a dyn TextMeasurer,
}

impl<'a> LayoutContext<'a> {
    pub fn new(config: &'a LayoutConfig, measurer: &'a dyn TextMeasurer) -> Self {
        Self { config, measurer }
    }

    pub fn config(&self) -> &LayoutConfig {
        self.config
    }

    fn text_size(&self, text: &str) -> Size {
        let width = self
            .measurer
            .measure_text_width(text, self.config.font());
        Size::new(width, self.config.leaf_height())
    }

    fn box_padding(&self, join: &Join, size: Size) -> Size {
        if join.is_boxed() {
            size.add_padding(self.config.box_insets())
        } else {
            size
        }
    }

    fn interior(&self, join: &Join, bounds: Bounds) -> Bounds {
        if join.is_boxed() {
            bounds.shrink(self.config.box_insets())
        } else {
            bounds
        }
    }
}

/// Stages the whole tree with its root at the canvas centre.
///
/// Any previous geometry is discarded first. Returns the root's bounds.
///
/// # Errors
///
/// Returns [`VlakeError::StructuralInvariant`] if a join breaks the
/// connective-count rule.
pub fn layout(
    root: &mut Element,
    config: &LayoutConfig,
    measurer: &dyn TextMeasurer,
) -> Result<Bounds, VlakeError> {
    let ctx = LayoutContext::new(config, measurer);
    root.unstage();
    root.stage(config.canvas_center(), &ctx)?;
    let bounds = root.bounds()?;
    debug!(
        elements = root.count(),
        width = bounds.width(),
        height = bounds.height();
        "Layout complete"
    );
    Ok(bounds)
}

fn line_height(element: &Element) -> f32 {
    element.as_line().map_or(0.0, HorizontalLine::height)
}

impl Element {
    /// Computes the size of this subtree.
    ///
    /// # Errors
    ///
    /// Returns [`VlakeError::InvalidState`] for a line whose width has not
    /// been assigned, and [`VlakeError::StructuralInvariant`] for a malformed join.
    pub fn measure(&self, ctx: &LayoutContext<'_>) -> Result<Size, VlakeError> {
        match self.node() {
            Node::Leaf(leaf) => Ok(ctx.text_size(leaf.text())),
            Node::Connective(connective) => Ok(ctx.text_size(&connective.glyph())),
            Node::Line(line) => Ok(Size::new(line.width()?, line.height())),
            Node::Join(join) => {
                join.check()?;
                let config = ctx.config();
                let gaps = join.connectives().len() as f32;
                let size = match join.orientation() {
                    Orientation::Horizontal => {
                        let mut size = Size::default();
                        for element in join.elements() {
                            size = size.merge_horizontal(element.measure(ctx)?);
                        }
                        Size::new(size.width() + 2.0 * config.hspace() * gaps, size.height())
                    }
                    Orientation::Vertical => {
                        let mut size = Size::default();
                        for child in join.children() {
                            size = size.merge_vertical(child.measure(ctx)?);
                        }
                        let lines: f32 = join.connectives().iter().map(line_height).sum();
                        Size::new(
                            size.width(),
                            size.height() + lines + 2.0 * config.vspace() * gaps,
                        )
                    }
                };
                Ok(ctx.box_padding(join, size))
            }
        }
    }

    /// Places this subtree centred on `center`.
    pub fn stage(&mut self, center: Point, ctx: &LayoutContext<'_>) -> Result<(), VlakeError> {
        let size = self.measure(ctx)?;
        let bounds = Bounds::new_from_center(center, size);
        trace!(id:% = self.id(), kind:% = self.kind(), bounds:?; "Staging element");
        self.set_placement(bounds);

        if let Node::Join(join) = self.node_mut() {
            let interior = ctx.interior(join, bounds);
            match join.orientation() {
                Orientation::Horizontal => stage_row(join, interior, ctx)?,
                Orientation::Vertical => stage_column(join, interior, ctx)?,
            }
        }
        Ok(())
    }
}

fn stage_row(join: &mut Join, interior: Bounds, ctx: &LayoutContext<'_>) -> Result<(), VlakeError> {
    let hspace = ctx.config().hspace();
    let y = interior.center().y();
    let (children, connectives) = join.children_and_connectives_mut();

    let mut cursor = interior.min_x();
    for (index, child) in children.iter_mut().enumerate() {
        let width = child.measure(ctx)?.width();
        child.stage(Point::new(cursor + width / 2.0, y), ctx)?;
        cursor += width + hspace;

        if let Some(connective) = connectives.get_mut(index) {
            let width = connective.measure(ctx)?.width();
            connective.stage(Point::new(cursor + width / 2.0, y), ctx)?;
            cursor += width + hspace;
        }
    }
    Ok(())
}

fn stage_column(
    join: &mut Join,
    interior: Bounds,
    ctx: &LayoutContext<'_>,
) -> Result<(), VlakeError> {
    let vspace = ctx.config().vspace();
    let x = interior.center().x();
    let line_width = interior.width();
    let (children, connectives) = join.children_and_connectives_mut();

    let mut top = interior.min_y();
    for (index, child) in children.iter_mut().enumerate() {
        let height = child.measure(ctx)?.height();
        child.stage(Point::new(x, top + height / 2.0), ctx)?;
        top += height + vspace;

        if let Some(connective) = connectives.get_mut(index) {
            if let Some(line) = connective.as_line_mut() {
                line.set_width(line_width);
            }
            let height = line_height(connective);
            connective.stage(Point::new(x, top + height / 2.0), ctx)?;
            top += height + vspace;
        }
    }
    Ok(())
}
