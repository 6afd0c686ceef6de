use std::collections::BTreeSet;
use std::io::{self, Error, ErrorKind, Write};
use std::sync::Arc;
use flate2::Compression;
use flate2::write::ZlibEncoder;

use crate::core::color::Color;
use crate::core::image::Image;
use crate::core::metrics::FontId;
use crate::core::surface::DrawingSurface;

/// A single page whose drawing operations are written as a PDF content stream.
///
/// Fonts are referenced as `/F{id+1}` and images as `/Im{n}` in order of first
/// use; [`fonts`](Self::fonts) and [`images`](Self::images) list what the page's
/// resource dictionary has to provide.
#[derive(Debug, Clone)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    content: Vec<u8>,
    fonts: BTreeSet<FontId>,
    images: Vec<Arc<Image>>,
    closed: bool,
}

impl Page {
    /// Create a new page with specified dimensions
    pub fn new(width: f64, height: f64) -> Self {
        Page {
            width,
            height,
            content: Vec::new(),
            fonts: BTreeSet::new(),
            images: Vec::new(),
            closed: false,
        }
    }

    /// The raw, uncompressed content stream
    pub fn content(&self) -> &[u8] {
        &self.content
    }

    /// The content stream deflated for a `/FlateDecode` stream
    pub fn compressed_content(&self) -> io::Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&self.content)?;
        encoder.finish()
    }

    pub fn fonts(&self) -> impl Iterator<Item = FontId> + '_ {
        self.fonts.iter().copied()
    }

    pub fn images(&self) -> &[Arc<Image>] {
        &self.images
    }

    /// Stop accepting drawing operations; every later primitive fails
    pub fn close(&mut self) {
        self.closed = true;
    }

    fn emit(&mut self, op: &str) -> io::Result<()> {
        if self.closed {
            return Err(Error::new(ErrorKind::BrokenPipe, "page content stream is closed"));
        }
        self.content.extend_from_slice(op.as_bytes());
        self.content.push(b'\n');
        Ok(())
    }

    fn image_name(&mut self, image: &Arc<Image>) -> String {
        let index = match self.images.iter().position(|i| Arc::ptr_eq(i, image)) {
            Some(index) => index,
            None => {
                self.images.push(Arc::clone(image));
                self.images.len() - 1
            }
        };
        format!("Im{}", index + 1)
    }
}

pub fn escape_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('(', "\\(").replace(')', "\\)")
}

impl DrawingSurface for Page {
    fn set_fill_color(&mut self, color: Color) -> io::Result<()> {
        self.emit(&color.to_pdf_fill())
    }

    fn set_stroke_color(&mut self, color: Color) -> io::Result<()> {
        self.emit(&color.to_pdf_stroke())
    }

    fn set_line_width(&mut self, width: f64) -> io::Result<()> {
        self.emit(&format!("{} w", width))
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> io::Result<()> {
        self.emit(&format!("{} {} {} {} re f", x, y, width, height))
    }

    fn move_to(&mut self, x: f64, y: f64) -> io::Result<()> {
        self.emit(&format!("{} {} m", x, y))
    }

    fn line_to(&mut self, x: f64, y: f64) -> io::Result<()> {
        self.emit(&format!("{} {} l", x, y))
    }

    fn stroke(&mut self) -> io::Result<()> {
        self.emit("S")
    }

    fn draw_text(&mut self, text: &str, font: FontId, size: f64, color: Color, x: f64, y: f64) -> io::Result<()> {
        let op = format!(
            "BT {} /F{} {} Tf {} {} Td ({}) Tj ET",
            color.to_pdf_fill(), font.0 + 1, size, x, y, escape_string(text)
        );
        self.emit(&op)?;
        self.fonts.insert(font);
        Ok(())
    }

    fn draw_image(&mut self, image: &Arc<Image>, x: f64, y: f64, width: f64, height: f64) -> io::Result<()> {
        if self.closed {
            return Err(Error::new(ErrorKind::BrokenPipe, "page content stream is closed"));
        }
        let name = self.image_name(image);
        self.emit(&format!("q {} 0 0 {} {} {} cm /{} Do Q", width, height, x, y, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::ZlibDecoder;
    use std::io::Read;

    fn content(page: &Page) -> String {
        String::from_utf8(page.content().to_vec()).unwrap()
    }

    #[test]
    fn test_path_operators() {
        let mut page = Page::new(595.0, 842.0);
        page.set_line_width(2.0).unwrap();
        page.stroke_line(10.0, 20.0, 30.0, 20.0).unwrap();
        page.set_fill_color(Color::red()).unwrap();
        page.fill_rect(0.0, 0.0, 100.0, 20.5).unwrap();
        assert_eq!(
            content(&page),
            "2 w\n10 20 m\n30 20 l\nS\n1.000 0.000 0.000 rg\n0 0 100 20.5 re f\n"
        );
    }

    #[test]
    fn test_text_is_escaped_and_font_tracked() {
        let mut page = Page::new(595.0, 842.0);
        page.draw_text("a (b)", FontId(1), 10.0, Color::black(), 5.0, 7.0).unwrap();
        assert_eq!(
            content(&page),
            "BT 0.000 0.000 0.000 rg /F2 10 Tf 5 7 Td (a \\(b\\)) Tj ET\n"
        );
        assert_eq!(page.fonts().collect::<Vec<_>>(), vec![FontId(1)]);
    }

    #[test]
    fn test_fonts_listed_once_in_id_order() {
        let mut page = Page::new(595.0, 842.0);
        page.draw_text("b", FontId(2), 10.0, Color::black(), 0.0, 0.0).unwrap();
        page.draw_text("a", FontId(0), 10.0, Color::black(), 0.0, 0.0).unwrap();
        page.draw_text("c", FontId(2), 12.0, Color::black(), 0.0, 0.0).unwrap();
        assert_eq!(page.fonts().collect::<Vec<_>>(), vec![FontId(0), FontId(2)]);
    }

    #[test]
    fn test_images_are_registered_once() {
        let mut page = Page::new(595.0, 842.0);
        let logo = Arc::new(Image::new(1, 1));
        let other = Arc::new(Image::new(1, 1));
        page.draw_image(&logo, 0.0, 0.0, 10.0, 10.0).unwrap();
        page.draw_image(&other, 0.0, 0.0, 10.0, 10.0).unwrap();
        page.draw_image(&logo, 5.0, 5.0, 10.0, 10.0).unwrap();
        assert_eq!(page.images().len(), 2);
        assert!(content(&page).ends_with("q 10 0 0 10 5 5 cm /Im1 Do Q\n"));
    }

    #[test]
    fn test_closed_page_rejects_drawing() {
        let mut page = Page::new(100.0, 100.0);
        page.close();
        let err = page.stroke().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BrokenPipe);
        assert!(page.content().is_empty());
    }

    #[test]
    fn test_compressed_content_inflates_back() {
        let mut page = Page::new(100.0, 100.0);
        page.fill_rect(1.0, 2.0, 3.0, 4.0).unwrap();
        let compressed = page.compressed_content().unwrap();
        let mut inflated = Vec::new();
        ZlibDecoder::new(&compressed[..]).read_to_end(&mut inflated).unwrap();
        assert_eq!(inflated, page.content());
    }
}
