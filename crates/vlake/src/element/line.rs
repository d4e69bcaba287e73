//! Inference lines between the rows of a vertical join.

use std::{fmt, str::FromStr};

use vlake_core::draw::LineStyle;

use crate::error::VlakeError;

/// Which side of an inference line an annotation sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl FromStr for Side {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            _ => Err(format!("unknown side `{s}`, valid values: left, right")),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => f.write_str("left"),
            Self::Right => f.write_str("right"),
        }
    }
}

/// A horizontal inference line with optional side annotations.
///
/// The line's width is owned by the enclosing vertical join, which assigns
/// it on every layout pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HorizontalLine {
    width: Option<f32>,
    style: LineStyle,
    left: String,
    right: String,
}

impl HorizontalLine {
    pub fn new(style: LineStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    /// The width assigned by the last layout pass.
    ///
    /// # Errors
    ///
    /// Returns [`VlakeError::InvalidState`] if no width has been assigned
    /// since the last mutation.
    pub fn width(&self) -> Result<f32, VlakeError> {
        self.width.ok_or_else(|| {
            VlakeError::InvalidState("line width read before its join was staged".to_string())
        })
    }

    pub(crate) fn set_width(&mut self, width: f32) {
        self.width = Some(width);
    }

    pub(crate) fn clear_width(&mut self) {
        self.width = None;
    }

    pub fn height(&self) -> f32 {
        self.style.height()
    }

    pub fn style(&self) -> LineStyle {
        self.style
    }

    pub fn set_style(&mut self, style: LineStyle) {
        self.style = style;
    }

    pub fn annotation(&self, side: Side) -> &str {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn set_annotation(&mut self, side: Side, text: impl Into<String>) {
        match side {
            Side::Left => self.left = text.into(),
            Side::Right => self.right = text.into(),
        }
    }

    /// Copies style and annotations without the assigned width.
    pub(crate) fn copy_unstaged(&self) -> Self {
        Self {
            width: None,
            ..self.clone()
        }
    }
}
