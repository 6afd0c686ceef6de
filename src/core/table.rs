use std::sync::Arc;
use serde::{Deserialize, Serialize};

use crate::core::color::Color;
use crate::core::error::{Result, TableError};
use crate::core::image::Image;
use crate::core::metrics::FontId;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlignment {
    #[default]
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlignment {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Four per-side lengths, used for padding and border widths.
///
/// Deserializes from a single number (all sides) or a per-side object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "InsetsRepr")]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum InsetsRepr {
    Uniform(f64),
    Sides {
        #[serde(default)]
        top: f64,
        #[serde(default)]
        right: f64,
        #[serde(default)]
        bottom: f64,
        #[serde(default)]
        left: f64,
    },
}

impl From<InsetsRepr> for Insets {
    fn from(repr: InsetsRepr) -> Self {
        match repr {
            InsetsRepr::Uniform(v) => Insets::uniform(v),
            InsetsRepr::Sides { top, right, bottom, left } => Insets { top, right, bottom, left },
        }
    }
}

impl Insets {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Insets { top, right, bottom, left }
    }

    pub fn uniform(value: f64) -> Self {
        Insets::new(value, value, value, value)
    }

    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Table-wide defaults for text cells
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSettings {
    #[serde(default)]
    pub font: FontId,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_word_break")]
    pub word_break: bool,
}

fn default_font_size() -> f64 { 10.0 }
fn default_word_break() -> bool { true }

impl Default for TableSettings {
    fn default() -> Self {
        TableSettings {
            font: FontId::default(),
            font_size: default_font_size(),
            word_break: default_word_break(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TextContent {
    pub text: String,
    /// Falls back to the table's font
    pub font: Option<FontId>,
    /// Falls back to the table's font size
    pub font_size: Option<f64>,
    /// Extra space between lines as a multiple of the line height
    pub line_spacing: f64,
    pub text_color: Color,
}

#[derive(Debug, Clone)]
pub struct ImageContent {
    pub image: Arc<Image>,
    pub scale: f64,
}

#[derive(Debug, Clone)]
pub enum CellContent {
    Text(TextContent),
    Image(ImageContent),
}

/// One cell of a row. Geometry is not stored here: widths come from the
/// table's columns and heights from the layout.
#[derive(Debug, Clone)]
pub struct Cell {
    pub content: CellContent,
    pub span: usize,
    pub padding: Insets,
    pub background_color: Option<Color>,
    /// Falls back to the row's border color
    pub border_color: Option<Color>,
    /// Zero on a side means no border there
    pub border_widths: Insets,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
}

impl Cell {
    fn with_content(content: CellContent) -> Self {
        Cell {
            content,
            span: 1,
            padding: Insets::default(),
            background_color: None,
            border_color: None,
            border_widths: Insets::default(),
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Cell::with_content(CellContent::Text(TextContent {
            text: text.into(),
            font: None,
            font_size: None,
            line_spacing: 1.0,
            text_color: Color::black(),
        }))
    }

    pub fn image(image: Arc<Image>) -> Self {
        Cell::with_content(CellContent::Image(ImageContent { image, scale: 1.0 }))
    }

    pub fn with_span(mut self, span: usize) -> Self {
        self.span = span;
        self
    }

    pub fn with_padding(mut self, padding: Insets) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    pub fn with_border_widths(mut self, widths: Insets) -> Self {
        self.border_widths = widths;
        self
    }

    pub fn with_alignment(mut self, horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        self.horizontal_alignment = horizontal;
        self.vertical_alignment = vertical;
        self
    }

    /// Override the table font for a text cell. No effect on image cells.
    pub fn with_font(mut self, font: FontId, size: f64) -> Self {
        if let CellContent::Text(text) = &mut self.content {
            text.font = Some(font);
            text.font_size = Some(size);
        }
        self
    }

    pub fn with_line_spacing(mut self, line_spacing: f64) -> Self {
        if let CellContent::Text(text) = &mut self.content {
            text.line_spacing = line_spacing;
        }
        self
    }

    pub fn with_text_color(mut self, color: Color) -> Self {
        if let CellContent::Text(text) = &mut self.content {
            text.text_color = color;
        }
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        if let CellContent::Image(image) = &mut self.content {
            image.scale = scale;
        }
        self
    }

    pub fn has_border_top(&self) -> bool { self.border_widths.top > 0.0 }
    pub fn has_border_right(&self) -> bool { self.border_widths.right > 0.0 }
    pub fn has_border_bottom(&self) -> bool { self.border_widths.bottom > 0.0 }
    pub fn has_border_left(&self) -> bool { self.border_widths.left > 0.0 }
}

#[derive(Debug, Clone)]
pub struct Row {
    pub cells: Vec<Cell>,
    /// Explicit height. When unset the tallest cell decides.
    pub height: Option<f64>,
    pub border_color: Color,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Row {
            cells,
            height: None,
            border_color: Color::black(),
        }
    }

    pub fn with_height(mut self, height: f64) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn span_count(&self) -> usize {
        self.cells.iter().map(|c| c.span).sum()
    }
}

#[derive(Debug, Clone)]
pub struct Table {
    pub column_widths: Vec<f64>,
    pub rows: Vec<Row>,
    pub settings: TableSettings,
}

impl Table {
    /// Table with explicit column widths in points
    pub fn new(column_widths: Vec<f64>) -> Result<Self> {
        if column_widths.is_empty() {
            return Err(TableError::InvalidTable("a table needs at least one column".to_string()));
        }
        if let Some(w) = column_widths.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(TableError::InvalidTable(format!("invalid column width {}", w)));
        }
        Ok(Table {
            column_widths,
            rows: Vec::new(),
            settings: TableSettings::default(),
        })
    }

    /// Table whose column widths are `weights` scaled to `total_width`.
    ///
    /// The last column absorbs the rounding remainder so the widths always
    /// add up to exactly `total_width`.
    pub fn with_proportional_columns(weights: &[f64], total_width: f64) -> Result<Self> {
        let weight_sum: f64 = weights.iter().sum();
        if weights.is_empty() || weight_sum <= 0.0 {
            return Err(TableError::InvalidTable("column weights must sum to a positive value".to_string()));
        }

        let mut widths: Vec<f64> = weights.iter().map(|w| w / weight_sum * total_width).collect();
        let head: f64 = widths[..widths.len() - 1].iter().sum();
        if let Some(last) = widths.last_mut() {
            *last = total_width - head;
        }
        Table::new(widths)
    }

    pub fn with_settings(mut self, settings: TableSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Append a row, checking that its spans cover every column exactly once
    pub fn add_row(&mut self, row: Row) -> Result<()> {
        if let Some(i) = row.cells.iter().position(|c| c.span == 0) {
            return Err(TableError::InvalidTable(format!(
                "cell {} of row {} has a span of zero", i, self.rows.len()
            )));
        }
        let spans = row.span_count();
        if spans != self.column_count() {
            return Err(TableError::InvalidTable(format!(
                "row {} spans {} columns, table has {}", self.rows.len(), spans, self.column_count()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn column_count(&self) -> usize {
        self.column_widths.len()
    }

    pub fn width(&self) -> f64 {
        self.column_widths.iter().sum()
    }

    /// Width available to a cell starting at `column` and covering `span` columns.
    /// Columns past the end of the table contribute nothing.
    pub fn cell_width(&self, column: usize, span: usize) -> f64 {
        self.column_widths
            .iter()
            .skip(column)
            .take(span)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_column_width() {
        let table = Table::new(vec![120.0]).unwrap();
        assert_eq!(table.cell_width(0, 1), 120.0);
    }

    #[test]
    fn test_span_width_is_exact_sum() {
        let table = Table::new(vec![10.1, 20.2, 30.3, 40.4]).unwrap();
        assert_eq!(table.cell_width(1, 2), 20.2 + 30.3);
        assert_eq!(table.cell_width(0, 4), table.width());
    }

    #[test]
    fn test_proportional_columns_sum_to_total() {
        let table = Table::with_proportional_columns(&[1.0, 1.0, 1.0], 100.0).unwrap();
        assert_eq!(table.column_count(), 3);
        assert_eq!(table.width(), 100.0);
        assert!((table.column_widths[0] - 100.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_add_row_checks_spans() {
        let mut table = Table::new(vec![50.0, 50.0, 50.0]).unwrap();
        assert!(table.add_row(Row::new(vec![Cell::text("a").with_span(2), Cell::text("b")])).is_ok());
        assert!(table.add_row(Row::new(vec![Cell::text("a")])).is_err());
        assert!(table.add_row(Row::new(vec![Cell::text("a").with_span(0), Cell::text("b").with_span(3)])).is_err());
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_invalid_columns() {
        assert!(Table::new(vec![]).is_err());
        assert!(Table::new(vec![10.0, -1.0]).is_err());
        assert!(Table::with_proportional_columns(&[0.0, 0.0], 100.0).is_err());
    }

    #[test]
    fn test_insets_deserialize() {
        let uniform: Insets = serde_json::from_str("2.5").unwrap();
        assert_eq!(uniform, Insets::uniform(2.5));
        let sides: Insets = serde_json::from_str(r#"{"left": 3}"#).unwrap();
        assert_eq!(sides, Insets::new(0.0, 0.0, 0.0, 3.0));
    }

    #[test]
    fn test_builder_setters_respect_content_kind() {
        let image = Arc::new(Image::new(1, 1));
        let cell = Cell::image(image).with_font(FontId(2), 8.0).with_scale(0.5);
        match cell.content {
            CellContent::Image(img) => assert_eq!(img.scale, 0.5),
            CellContent::Text(_) => panic!("expected image content"),
        }

        let cell = Cell::text("x").with_font(FontId(2), 8.0);
        match cell.content {
            CellContent::Text(t) => assert_eq!((t.font, t.font_size), (Some(FontId(2)), Some(8.0))),
            CellContent::Image(_) => panic!("expected text content"),
        }
    }
}
