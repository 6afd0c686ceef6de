/// Color representation for PDF rendering (RGB/RGBA)
use serde::{Deserialize, Serialize};

/// An RGB color with channels in `0.0..=1.0`.
///
/// In templates a color is written either as `{"r": .., "g": .., "b": ..}`
/// or as a `"#rrggbb"` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,  // alpha (1.0 = opaque)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Hex(String),
    Channels {
        r: f64,
        g: f64,
        b: f64,
        #[serde(default = "default_alpha")]
        a: f64,
    },
}

fn default_alpha() -> f64 { 1.0 }

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> Result<Self, Self::Error> {
        match repr {
            ColorRepr::Hex(s) => Color::from_hex(&s).ok_or_else(|| format!("invalid hex color '{}'", s)),
            ColorRepr::Channels { r, g, b, a } => Ok(Color { r, g, b, a }),
        }
    }
}

impl Color {
    /// Create RGB color (opaque)
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    /// Create RGBA color with transparency
    pub fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Color { r, g, b, a }
    }

    /// Create an opaque color from 8-bit channels
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Color::rgb(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Color::from_rgb8(channel(0)?, channel(2)?, channel(4)?))
    }

    // Common colors
    pub fn black() -> Self { Color::rgb(0.0, 0.0, 0.0) }
    pub fn white() -> Self { Color::rgb(1.0, 1.0, 1.0) }
    pub fn red() -> Self { Color::rgb(1.0, 0.0, 0.0) }
    pub fn gray(intensity: f64) -> Self { Color::rgb(intensity, intensity, intensity) }

    /// PDF fill color operator (rg)
    pub fn to_pdf_fill(&self) -> String {
        format!("{:.3} {:.3} {:.3} rg", self.r, self.g, self.b)
    }

    /// PDF stroke color operator (RG)
    pub fn to_pdf_stroke(&self) -> String {
        format!("{:.3} {:.3} {:.3} RG", self.r, self.g, self.b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::black()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_operators() {
        let c = Color::rgb(1.0, 0.5, 0.0);
        assert_eq!(c.to_pdf_fill(), "1.000 0.500 0.000 rg");
        assert_eq!(c.to_pdf_stroke(), "1.000 0.500 0.000 RG");
    }

    #[test]
    fn test_deserialize_channels_and_hex() {
        let c: Color = serde_json::from_str(r#"{"r": 0.2, "g": 0.4, "b": 0.6}"#).unwrap();
        assert_eq!(c.a, 1.0);
        assert_eq!(c.g, 0.4);

        let red: Color = serde_json::from_str(r##""#ff0000""##).unwrap();
        assert_eq!(red, Color::red());

        assert!(serde_json::from_str::<Color>(r#""nope""#).is_err());
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Color::from_hex("ffffff"), Some(Color::white()));
        assert_eq!(Color::from_hex("#000000"), Some(Color::black()));
        assert_eq!(Color::from_hex("#fff"), None);
        assert_eq!(Color::from_hex("#gg0000"), None);
    }
}
