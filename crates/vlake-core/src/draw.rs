//! Drawing definitions shared by every rendering backend.
//!
//! - [`TextMeasurer`] and its implementations measure glyph and text widths.
//! - [`LineStyle`] describes the inference lines of vertical joins.
//! - [`Surface`] is the abstract drawing capability the element tree renders onto.

mod line;
mod surface;
mod text;

pub use line::{LineSegment, LineStyle};
pub use surface::Surface;
pub use text::{CosmicTextMeasurer, FontSpec, MonospaceMeasurer, TextMeasurer};
