//! Text width measurement
//!
//! The engine only needs one number per line: how wide it renders at a
//! given size. `CosmicMeasure` asks cosmic-text; `FixedAdvance` is a
//! monospace stand-in for headless hosts and tests.
//!
//! Widths are cached per text + font size since the same handful of lines
//! is measured over and over during playback.

use cosmic_text::{Attrs, Buffer, Family, FontSystem, Metrics, Shaping};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared font system type
pub type SharedFontSystem = Arc<Mutex<FontSystem>>;

/// Paint parameters that affect width
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
}

/// Measures rendered text width in pixels
pub trait TextMeasure {
    fn measure_width(&self, text: &str, style: TextStyle) -> f32;
}

/// Cache key for measured widths
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct MeasureCacheKey {
    text: String,
    /// Font size multiplied by 100 and rounded to avoid float comparison issues
    font_size_x100: u32,
}

impl MeasureCacheKey {
    fn new(text: &str, font_size: f32) -> Self {
        Self {
            text: text.to_string(),
            font_size_x100: (font_size * 100.0).round() as u32,
        }
    }
}

/// Width measurement backed by cosmic-text shaping
pub struct CosmicMeasure {
    font_system: SharedFontSystem,
    /// Font family name; system sans-serif when `None`
    font_family: Option<String>,
    cache: Mutex<HashMap<MeasureCacheKey, f32>>,
}

impl CosmicMeasure {
    pub fn new(font_system: SharedFontSystem, font_family: Option<String>) -> Self {
        match &font_family {
            Some(family) => tracing::debug!("[CosmicMeasure] Using font family: {}", family),
            None => tracing::debug!("[CosmicMeasure] Using fallback font: SansSerif"),
        }
        Self {
            font_system,
            font_family,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Create with a fresh font system (slow: scans system fonts)
    pub fn with_system_fonts(font_family: Option<String>) -> Self {
        Self::new(Arc::new(Mutex::new(FontSystem::new())), font_family)
    }

    fn family(&self) -> Family<'_> {
        match &self.font_family {
            Some(name) => Family::Name(name),
            None => Family::SansSerif,
        }
    }

    fn shape_width(&self, text: &str, font_size: f32) -> f32 {
        let mut font_system = self.font_system.lock();

        let metrics = Metrics::new(font_size, font_size * 1.4);
        let mut buffer = Buffer::new(&mut font_system, metrics);
        // Unbounded width so the line never wraps
        buffer.set_size(&mut font_system, None, None);

        let attrs = Attrs::new().family(self.family());
        buffer.set_text(&mut font_system, text, &attrs, Shaping::Advanced, None);
        buffer.shape_until_scroll(&mut font_system, false);

        buffer
            .layout_runs()
            .map(|run| run.line_w)
            .fold(0.0_f32, f32::max)
    }
}

impl TextMeasure for CosmicMeasure {
    fn measure_width(&self, text: &str, style: TextStyle) -> f32 {
        if text.is_empty() {
            return 0.0;
        }

        let key = MeasureCacheKey::new(text, style.font_size);
        if let Some(&width) = self.cache.lock().get(&key) {
            return width;
        }

        let width = self.shape_width(text, style.font_size);
        self.cache.lock().insert(key, width);
        width
    }
}

/// Every character advances by `em_ratio * font_size`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub em_ratio: f32,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self { em_ratio: 0.5 }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure_width(&self, text: &str, style: TextStyle) -> f32 {
        text.chars().count() as f32 * style.font_size * self.em_ratio
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_advance() {
        let measure = FixedAdvance::default();
        let style = TextStyle { font_size: 32.0 };
        assert_eq!(measure.measure_width("", style), 0.0);
        assert_eq!(measure.measure_width("abcd", style), 64.0);
        // Counts characters, not bytes
        assert_eq!(measure.measure_width("歌词", style), 32.0);
    }

    #[test]
    fn test_cosmic_measure_grows_with_text() {
        let measure = CosmicMeasure::with_system_fonts(None);
        let style = TextStyle { font_size: 32.0 };

        assert_eq!(measure.measure_width("", style), 0.0, "empty text has no width");

        let short = measure.measure_width("la", style);
        let long = measure.measure_width("la la la la la la la la", style);
        assert!(long >= short, "longer text should not be narrower");

        // Second lookup is served from the cache and must agree
        assert_eq!(measure.measure_width("la", style), short);
    }
}
