//! Glyph Metrics
//!
//! Width measurement is an external service. The editor only needs
//! `GlyphMetrics::width_of`; `MeasureCache` memoises a font-aware
//! `TextMeasurer` so repeated caret/hit-test queries stay cheap.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use tracing::{debug, trace};
use unicode_width::UnicodeWidthStr;

use canvas_input_core::FontConfig;

/// Horizontal extent of rendered text under the active font
pub trait GlyphMetrics {
    fn width_of(&self, text: &str) -> f32;
}

impl<F> GlyphMetrics for F
where
    F: Fn(&str) -> f32,
{
    fn width_of(&self, text: &str) -> f32 {
        self(text)
    }
}

/// Measures text for an explicit font. Must be deterministic for a fixed font.
pub trait TextMeasurer {
    fn measure(&self, font: &FontConfig, text: &str) -> f32;
}

impl<F> TextMeasurer for F
where
    F: Fn(&FontConfig, &str) -> f32,
{
    fn measure(&self, font: &FontConfig, text: &str) -> f32 {
        self(font, text)
    }
}

/// Fixed-advance metrics: every terminal column is `advance` wide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellMetrics {
    pub advance: f32,
}

impl CellMetrics {
    pub fn new(advance: f32) -> Self {
        Self { advance }
    }
}

impl GlyphMetrics for CellMetrics {
    fn width_of(&self, text: &str) -> f32 {
        text.width() as f32 * self.advance
    }
}

/// Font-aware fixed-advance measurer: each column is `em_ratio * size` wide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub em_ratio: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self { em_ratio: 0.6 }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, font: &FontConfig, text: &str) -> f32 {
        CellMetrics::new(font.size * self.em_ratio).width_of(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    family: String,
    size_bits: u32,
    text: String,
}

/// Width cache keyed by `(font family, font size, text)`.
///
/// Entries are only dropped when the font actually changes.
pub struct MeasureCache<M> {
    measurer: M,
    font: FontConfig,
    widths: Mutex<HashMap<CacheKey, f32>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<M: TextMeasurer> MeasureCache<M> {
    pub fn new(measurer: M, font: FontConfig) -> Self {
        Self {
            measurer,
            font,
            widths: Mutex::new(HashMap::new()),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn font(&self) -> &FontConfig {
        &self.font
    }

    /// Switch font. Returns true if the cache was invalidated.
    pub fn set_font(&mut self, font: FontConfig) -> bool {
        if font == self.font {
            return false;
        }
        debug!(family = %font.family, size = font.size, "font changed, clearing width cache");
        self.font = font;
        self.widths.get_mut().clear();
        true
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.widths.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.lock().is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl<M: TextMeasurer> GlyphMetrics for MeasureCache<M> {
    fn width_of(&self, text: &str) -> f32 {
        let key = CacheKey {
            family: self.font.family.clone(),
            size_bits: self.font.size.to_bits(),
            text: text.to_string(),
        };

        let mut widths = self.widths.lock();
        if let Some(width) = widths.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return *width;
        }

        let width = self.measurer.measure(&self.font, text);
        trace!(text, width, "width cache miss");
        self.misses.fetch_add(1, Ordering::Relaxed);
        widths.insert(key, width);
        width
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_cell_metrics() {
        let metrics = CellMetrics::new(8.0);
        assert_eq!(metrics.width_of(""), 0.0);
        assert_eq!(metrics.width_of("abc"), 24.0);
    }

    #[test]
    fn test_closure_metrics() {
        let metrics = |text: &str| text.len() as f32 * 2.5;
        assert_eq!(metrics.width_of("ab"), 5.0);
    }

    #[test]
    fn test_cache_hits_and_misses() {
        let calls = Cell::new(0);
        let measurer = |_: &FontConfig, text: &str| {
            calls.set(calls.get() + 1);
            text.len() as f32
        };
        let cache = MeasureCache::new(measurer, FontConfig::default());

        assert_eq!(cache.width_of("a"), 1.0);
        assert_eq!(cache.width_of("a"), 1.0);
        assert_eq!(cache.width_of("bb"), 2.0);

        assert_eq!(calls.get(), 2);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.misses(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_cache_invalidated_only_on_font_change() {
        let mut cache = MeasureCache::new(MonospaceMeasurer { em_ratio: 0.5 }, FontConfig::default());
        let default_width = cache.width_of("abc");
        assert_eq!(default_width, 24.0);

        assert!(!cache.set_font(FontConfig::default()));
        assert_eq!(cache.len(), 1);

        let larger = FontConfig {
            size: 32.0,
            ..FontConfig::default()
        };
        assert!(cache.set_font(larger));
        assert!(cache.is_empty());
        assert_eq!(cache.width_of("abc"), 2.0 * default_width);
    }
}
