use image::{ImageFormat, GenericImageView};

use crate::core::error::{Result, TableError};
use crate::core::layout::Size;

/// Pixel dimensions of an image placed in a cell.
///
/// Only the size takes part in layout. Embedding the pixels is left to the
/// surface that receives the image through `draw_image`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image {
    pub width: u32,
    pub height: u32,
}

impl Image {
    pub fn new(width: u32, height: u32) -> Self {
        Image { width, height }
    }

    /// Read the dimensions of a JPEG or PNG image held in memory
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let format = image::guess_format(bytes)
            .map_err(|e| TableError::Image(format!("unknown image format: {}", e)))?;

        match format {
            ImageFormat::Jpeg | ImageFormat::Png => {
                let img = image::load_from_memory_with_format(bytes, format)
                    .map_err(|e| TableError::Image(format!("failed to parse {:?}: {}", format, e)))?;
                let (width, height) = img.dimensions();
                Ok(Image { width, height })
            }
            other => Err(TableError::Image(format!("unsupported image format {:?}", other))),
        }
    }

    /// Scaled size of the image, shrunk to `max_width` when the scaled width
    /// exceeds it. The aspect ratio is preserved.
    pub fn fit_size(&self, scale: f64, max_width: f64) -> Size {
        let mut width = self.width as f64 * scale;
        let mut height = self.height as f64 * scale;

        if width > max_width && width > 0.0 {
            height *= max_width / width;
            width = max_width;
        }

        Size { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_size_keeps_scaled_size_when_it_fits() {
        let size = Image::new(40, 20).fit_size(0.5, 100.0);
        assert_eq!(size, Size { width: 20.0, height: 10.0 });
    }

    #[test]
    fn test_fit_size_shrinks_wide_images() {
        let size = Image::new(200, 100).fit_size(1.0, 50.0);
        assert_eq!(size, Size { width: 50.0, height: 25.0 });
    }

    #[test]
    fn test_fit_size_of_empty_image() {
        let size = Image::new(0, 0).fit_size(1.0, 50.0);
        assert_eq!(size, Size { width: 0.0, height: 0.0 });
    }

    #[test]
    fn test_png_dimensions() {
        let mut png = Vec::new();
        let buffer = image::RgbImage::from_pixel(3, 2, image::Rgb([255, 0, 0]));
        image::DynamicImage::ImageRgb8(buffer)
            .write_to(&mut std::io::Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();

        let decoded = Image::from_bytes(&png).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
    }

    #[test]
    fn test_unknown_format() {
        assert!(matches!(Image::from_bytes(b"not an image"), Err(TableError::Image(_))));
    }
}
