//! Text measurement for leaf and connective glyphs.
//!
//! # Overview
//!
//! - [`FontSpec`] - Font family and pixel size used for all leaf text
//! - [`TextMeasurer`] - The measuring capability consumed by the layout engine
//! - [`CosmicTextMeasurer`] - Shaping-based measurement backed by cosmic-text
//! - [`MonospaceMeasurer`] - A deterministic fixed-advance approximation
//!
//! # Quick Start
//!
//! ```
//! # use vlake_core::draw::{FontSpec, MonospaceMeasurer, TextMeasurer};
//! let font = FontSpec::default();
//! let measurer = MonospaceMeasurer::default();
//! let width = measurer.measure_text_width("A \u{2227} B", &font);
//! assert!(width > 0.0);
//! ```

use std::sync::{Mutex, OnceLock};

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use log::{info, warn};
use serde::Deserialize;

/// Shared cosmic-text measurer, created on first use.
static SHARED_MEASURER: OnceLock<CosmicTextMeasurer> = OnceLock::new();

/// Font family and pixel size for rendered text.
///
/// # Default Values
///
/// | Property | Default |
/// |----------|---------|
/// | Family | `"Arial"` |
/// | Size | `20.0` px |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FontSpec {
    family: String,
    size: f32,
}

impl FontSpec {
    /// Creates a font specification from a family name and a pixel size.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// The font family name.
    pub fn family(&self) -> &str {
        &self.family
    }

    /// The font size in pixels.
    pub fn size(&self) -> f32 {
        self.size
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            size: 20.0,
        }
    }
}

/// Measures the advance width of a run of text.
pub trait TextMeasurer {
    /// Returns the width in pixels of `text` rendered with `font`.
    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32;
}

/// Fixed-advance text measurer.
///
/// Every character advances by `font.size() * advance_ratio`. Useful when the
/// exact font is unavailable and whenever layout must be reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    advance_ratio: f32,
}

impl MonospaceMeasurer {
    /// Creates a measurer where each character is `advance_ratio` ems wide.
    pub fn new(advance_ratio: f32) -> Self {
        Self { advance_ratio }
    }
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self::new(0.55)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size() * self.advance_ratio
    }
}

/// Measures text with real font metrics and shaping through cosmic-text.
///
/// Holds a reusable [`FontSystem`] to avoid the expensive font database scan
/// on every measurement.
pub struct CosmicTextMeasurer {
    font_system: Mutex<FontSystem>,
}

impl std::fmt::Debug for CosmicTextMeasurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CosmicTextMeasurer").finish_non_exhaustive()
    }
}

impl Default for CosmicTextMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl CosmicTextMeasurer {
    /// Create a new measurer with its own FontSystem
    pub fn new() -> Self {
        info!("Initializing FontSystem");
        Self {
            font_system: Mutex::new(FontSystem::new()),
        }
    }

    /// Returns a process-wide measurer shared between editors.
    pub fn shared() -> &'static CosmicTextMeasurer {
        SHARED_MEASURER.get_or_init(CosmicTextMeasurer::new)
    }
}

impl TextMeasurer for CosmicTextMeasurer {
    fn measure_text_width(&self, text: &str, font: &FontSpec) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let fallback = MonospaceMeasurer::default().measure_text_width(text, font);
        let Ok(mut font_system) = self.font_system.lock() else {
            warn!("FontSystem lock poisoned, falling back to fixed advance");
            return fallback;
        };

        let metrics = Metrics::new(font.size(), font.size() * 1.15);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        let mut buffer = buffer.borrow_with(&mut font_system);
        let attrs = Attrs::new().family(Family::Name(font.family()));

        buffer.set_size(None, None);
        buffer.set_text(text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(true);

        // Rightmost glyph edge over all layout runs
        let width = buffer
            .layout_runs()
            .filter_map(|run| run.glyphs.last().map(|glyph| glyph.x + glyph.w))
            .fold(None, |acc: Option<f32>, w| Some(acc.map_or(w, |a| a.max(w))));

        width.filter(|w| *w > 0.0).unwrap_or(fallback)
    }
}
