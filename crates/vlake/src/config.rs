//! Configuration types for vlake layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so hosts can load them from
//! external sources. Missing fields fall back to their defaults.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Font, spacing and canvas constants used by the layout pass.
//! - [`StyleConfig`] - Colors and debug drawing options used when rendering.
//!
//! # Example
//!
//! ```
//! # use vlake::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().hspace(), 5.0);
//! assert!(config.style().highlight_color().is_ok());
//! ```

use serde::Deserialize;

use vlake_core::{
    color::Color,
    draw::FontSpec,
    geometry::{Insets, Point, Size},
};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Constants of the box-packing layout.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | `font` | Arial, 20 px |
/// | `leaf_height` | 20 |
/// | `hspace` | 5 |
/// | `vspace` | 2 |
/// | `box_margin` | 5 |
/// | `canvas_width` | 800 |
/// | `canvas_height` | 300 |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    font: FontSpec,
    leaf_height: f32,
    hspace: f32,
    vspace: f32,
    box_margin: f32,
    canvas_width: f32,
    canvas_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            font: FontSpec::default(),
            leaf_height: 20.0,
            hspace: 5.0,
            vspace: 2.0,
            box_margin: 5.0,
            canvas_width: 800.0,
            canvas_height: 300.0,
        }
    }
}

impl LayoutConfig {
    /// Font used for leaf and connective text.
    pub fn font(&self) -> &FontSpec {
        &self.font
    }

    /// Fixed height of leaves and connectives.
    pub fn leaf_height(&self) -> f32 {
        self.leaf_height
    }

    /// Horizontal gap on each side of a connective.
    pub fn hspace(&self) -> f32 {
        self.hspace
    }

    /// Vertical gap above and below each inference line.
    pub fn vspace(&self) -> f32 {
        self.vspace
    }

    /// Space reserved on every side of a boxed join.
    pub fn box_margin(&self) -> f32 {
        self.box_margin
    }

    pub(crate) fn box_insets(&self) -> Insets {
        Insets::uniform(self.box_margin)
    }

    /// Size of the drawing canvas.
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    /// The point the root element is staged at.
    pub fn canvas_center(&self) -> Point {
        Point::new(self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Returns a copy with a different canvas size.
    pub fn with_canvas_size(mut self, size: Size) -> Self {
        self.canvas_width = size.width();
        self.canvas_height = size.height();
        self
    }

    /// Returns a copy with a different font.
    pub fn with_font(mut self, font: FontSpec) -> Self {
        self.font = font;
        self
    }
}

/// Colors and debug options used when drawing.
///
/// Colors are stored as CSS color strings and parsed on access.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    text_color: String,
    highlight_color: String,
    centre_mark_color: String,
    background_color: Option<String>,
    centre_mark: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            text_color: "#000000".to_string(),
            highlight_color: "#0000FF".to_string(),
            centre_mark_color: "#009000".to_string(),
            background_color: None,
            centre_mark: false,
        }
    }
}

impl StyleConfig {
    /// Ink used for unselected elements.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn text_color(&self) -> Result<Color, String> {
        Color::new(&self.text_color).map_err(|err| format!("Invalid text color in config: {err}"))
    }

    /// Ink used for the selected element and its subtree.
    pub fn highlight_color(&self) -> Result<Color, String> {
        Color::new(&self.highlight_color)
            .map_err(|err| format!("Invalid highlight color in config: {err}"))
    }

    /// Ink used for the canvas centre crosshair.
    pub fn centre_mark_color(&self) -> Result<Color, String> {
        Color::new(&self.centre_mark_color)
            .map_err(|err| format!("Invalid centre mark color in config: {err}"))
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Whether a crosshair is drawn at the canvas centre.
    pub fn centre_mark(&self) -> bool {
        self.centre_mark
    }

    /// Returns a copy with the centre mark switched on or off.
    pub fn with_centre_mark(mut self, enabled: bool) -> Self {
        self.centre_mark = enabled;
        self
    }
}
