use serde::{Deserialize, Serialize};

/// Handle to a font registered with a [`FontMetrics`] provider.
///
/// On a [`Page`](crate::core::page::Page) the font with id `n` is written as
/// resource `/F{n+1}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FontId(pub usize);

/// Font measurement consumed by the layout.
pub trait FontMetrics {
    /// Vertical space one line of text occupies at `size`.
    fn line_height(&self, font: FontId, size: f64) -> f64;

    /// Advance width of `text` set in `font` at `size`.
    fn string_width(&self, text: &str, font: FontId, size: f64) -> f64;
}

impl<M: FontMetrics + ?Sized> FontMetrics for &M {
    fn line_height(&self, font: FontId, size: f64) -> f64 {
        (**self).line_height(font, size)
    }

    fn string_width(&self, text: &str, font: FontId, size: f64) -> f64 {
        (**self).string_width(text, font, size)
    }
}
