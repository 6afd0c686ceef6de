use std::sync::Arc;
use std::cell::RefCell;
use std::collections::HashMap;
use owned_ttf_parser::{OwnedFace, AsFaceRef};
use log::warn;

use crate::core::error::{Result, TableError};
use crate::core::metrics::{FontId, FontMetrics};

/// A loaded TrueType/OpenType font with shaping-based measurement
#[derive(Clone)]
pub struct Font {
    pub(crate) face: Arc<OwnedFace>,
    pub(crate) name: String,
    pub(crate) units_per_em: u16,
    // Shaped runs keyed by (text, size * 100)
    shape_cache: Arc<RefCell<HashMap<String, Vec<u16>>>>,
}

impl Font {
    /// Load a font from bytes (e.g., embedded font data)
    pub fn from_bytes(data: Vec<u8>, name: impl Into<String>) -> Result<Self> {
        let face = OwnedFace::from_vec(data, 0)
            .map_err(|e| TableError::Font(format!("invalid font file: {}", e)))?;

        let units_per_em = face.as_face_ref().units_per_em();

        Ok(Font {
            face: Arc::new(face),
            name: name.into(),
            units_per_em,
            shape_cache: Arc::new(RefCell::new(HashMap::new())),
        })
    }

    /// Shape text and return its glyph IDs
    pub fn shape_text(&self, text: &str) -> Vec<u16> {
        if let Some(glyphs) = self.shape_cache.borrow().get(text) {
            return glyphs.clone();
        }

        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);

        let rb_face = rustybuzz::Face::from_face(self.face.as_face_ref().clone());
        let output = rustybuzz::shape(&rb_face, &[], buffer);

        let glyphs: Vec<u16> = output.glyph_infos().iter()
            .map(|info| info.glyph_id as u16)
            .collect();

        self.shape_cache.borrow_mut().insert(text.to_string(), glyphs.clone());

        glyphs
    }

    /// Measure text width from raw glyph advances.
    ///
    /// Kerning is ignored so the width matches a plain `Tj` show operator.
    pub fn measure_text(&self, text: &str, size: f64) -> f64 {
        let scale = size / self.units_per_em as f64;
        self.shape_text(text)
            .iter()
            .map(|&glyph| self.glyph_width(glyph) as f64 * scale)
            .sum()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Font ascender scaled to 1000 units
    pub fn ascent(&self) -> i16 {
        let ascender = self.face.as_face_ref().ascender();
        (ascender as i32 * 1000 / self.units_per_em as i32) as i16
    }

    /// Cap height scaled to 1000 units, 70% of the ascender when the font has none
    pub fn cap_height(&self) -> i16 {
        match self.face.as_face_ref().capital_height() {
            Some(cap_height) => (cap_height as i32 * 1000 / self.units_per_em as i32) as i16,
            None => (self.ascent() as i32 * 70 / 100) as i16,
        }
    }

    /// Line height at `size` in points, derived from the cap height
    pub fn line_height(&self, size: f64) -> f64 {
        self.cap_height() as f64 / 1000.0 * size
    }

    fn glyph_width(&self, glyph_id: u16) -> u16 {
        self.face
            .as_face_ref()
            .glyph_hor_advance(owned_ttf_parser::GlyphId(glyph_id))
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}

/// Registry of fonts addressed by [`FontId`]
#[derive(Debug, Default, Clone)]
pub struct FontBook {
    fonts: Vec<Font>,
}

impl FontBook {
    pub fn new() -> Self {
        FontBook::default()
    }

    /// Register a font, returning the id cells refer to it by
    pub fn add(&mut self, font: Font) -> FontId {
        self.fonts.push(font);
        FontId(self.fonts.len() - 1)
    }

    pub fn get(&self, id: FontId) -> Option<&Font> {
        self.fonts.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    fn lookup(&self, id: FontId) -> Option<&Font> {
        let font = self.get(id);
        if font.is_none() {
            warn!("font {:?} is not registered, measuring as zero", id);
        }
        font
    }
}

impl FontMetrics for FontBook {
    fn line_height(&self, font: FontId, size: f64) -> f64 {
        self.lookup(font).map_or(0.0, |f| f.line_height(size))
    }

    fn string_width(&self, text: &str, font: FontId, size: f64) -> f64 {
        self.lookup(font).map_or(0.0, |f| f.measure_text(text, size))
    }
}
