//! Inference-line styles.
//!
//! A vertical join separates its children with horizontal inference lines.
//! Each line has one of three styles which determine its drawn strokes, its
//! fixed height and the macro used on export.
//!
//! | Style | Name | Height | Macro |
//! |-------|------|--------|-------|
//! | [`LineStyle::SingleSolid`] | `single_solid` | 8 | `\odi` |
//! | [`LineStyle::SingleDotted`] | `single_dotted` | 8 | `\odo` |
//! | [`LineStyle::DoubleSolid`] | `double_solid` | 10 | `\odI` |
//!
//! # Example
//!
//! ```
//! # use vlake_core::draw::LineStyle;
//! let style: LineStyle = "double_solid".parse().unwrap();
//! assert_eq!(style.height(), 10.0);
//! assert_eq!(style.markup_prefix(), "\\odI");
//! assert!("wavy".parse::<LineStyle>().is_err());
//! ```

use std::{fmt, str::FromStr};

use crate::{StyleError, geometry::Point};

/// Length of each dash (and each gap) of a dotted line.
const DASH_LENGTH: f32 = 3.0;

/// Vertical distance of each stroke of a double line from the line's center.
const DOUBLE_OFFSET: f32 = 2.0;

/// The drawing style of an inference line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// One continuous stroke (default)
    #[default]
    SingleSolid,
    /// One stroke of short dashes
    SingleDotted,
    /// Two parallel continuous strokes
    DoubleSolid,
}

/// A straight stroke from one point to another.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineStyle {
    /// All recognized styles, in menu order.
    pub const ALL: [LineStyle; 3] = [Self::SingleSolid, Self::SingleDotted, Self::DoubleSolid];

    /// The style's name as used in scripts and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleSolid => "single_solid",
            Self::SingleDotted => "single_dotted",
            Self::DoubleSolid => "double_solid",
        }
    }

    /// The fixed height reserved for a line of this style.
    pub fn height(&self) -> f32 {
        match self {
            Self::SingleSolid | Self::SingleDotted => 8.0,
            Self::DoubleSolid => 10.0,
        }
    }

    /// The macro that introduces an inference step drawn with this style.
    pub fn markup_prefix(&self) -> &'static str {
        match self {
            Self::SingleSolid => "\\odi",
            Self::SingleDotted => "\\odo",
            Self::DoubleSolid => "\\odI",
        }
    }

    /// Computes the strokes for a line of `width` centered on `center`.
    ///
    /// Dotted lines are split into dashes; the last dash is clipped to the
    /// line's right end.
    pub fn segments(&self, center: Point, width: f32) -> Vec<LineSegment> {
        let left = center.x() - width / 2.0;
        let right = center.x() + width / 2.0;
        let horizontal = |y: f32, from_x: f32, to_x: f32| LineSegment {
            from: Point::new(from_x, y),
            to: Point::new(to_x, y),
        };

        match self {
            Self::SingleSolid => vec![horizontal(center.y(), left, right)],
            Self::DoubleSolid => vec![
                horizontal(center.y() - DOUBLE_OFFSET, left, right),
                horizontal(center.y() + DOUBLE_OFFSET, left, right),
            ],
            Self::SingleDotted => {
                let mut dashes = Vec::new();
                let mut x = left;
                while x < right {
                    dashes.push(horizontal(center.y(), x, (x + DASH_LENGTH).min(right)));
                    x += 2.0 * DASH_LENGTH;
                }
                dashes
            }
        }
    }
}

impl FromStr for LineStyle {
    type Err = StyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "single_solid" => Ok(Self::SingleSolid),
            "single_dotted" => Ok(Self::SingleDotted),
            "double_solid" => Ok(Self::DoubleSolid),
            _ => Err(StyleError::UnknownLineStyle(s.to_string())),
        }
    }
}

impl fmt::Display for LineStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
