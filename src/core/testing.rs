//! Helpers shared by the unit tests.

use crate::core::metrics::{FontId, FontMetrics};

/// Every character advances `advance * size`, every line is `line_height * size` tall.
pub struct FixedMetrics {
    pub advance: f64,
    pub line_height: f64,
}

impl FontMetrics for FixedMetrics {
    fn line_height(&self, _font: FontId, size: f64) -> f64 {
        self.line_height * size
    }

    fn string_width(&self, text: &str, _font: FontId, size: f64) -> f64 {
        text.chars().count() as f64 * self.advance * size
    }
}
