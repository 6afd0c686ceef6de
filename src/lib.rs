//! Table layout and drawing for PDF pages.
//!
//! A [`Table`] is a grid of rows and cells with spans, padding, alignment,
//! backgrounds and per-side borders. [`draw_table`] resolves the geometry of
//! every cell and emits fills, text, images and border strokes to any
//! [`DrawingSurface`], measuring text through a [`FontMetrics`] provider.
//!
//! ```no_run
//! use pdf_table_drawer::{draw_table, Cell, Color, FontBook, Font, Insets, Page, Row, Table};
//!
//! # fn main() -> pdf_table_drawer::Result<()> {
//! let mut fonts = FontBook::new();
//! let font = fonts.add(Font::from_bytes(std::fs::read("DejaVuSans.ttf")?, "DejaVuSans")?);
//!
//! let mut table = Table::new(vec![100.0, 100.0])?;
//! table.settings.font = font;
//! table.add_row(Row::new(vec![
//!     Cell::text("Hi").with_border_widths(Insets::uniform(1.0)),
//!     Cell::text("there").with_background(Color::gray(0.9)),
//! ]))?;
//!
//! let mut page = Page::new(595.0, 842.0);
//! draw_table(&mut page, &fonts, &table, 50.0, 800.0)?;
//! # Ok(())
//! # }
//! ```

pub mod core;

pub use crate::core::color::Color;
pub use crate::core::drawer::{draw_table, TableDrawer};
pub use crate::core::error::{Result, TableError};
pub use crate::core::font::{Font, FontBook};
pub use crate::core::image::Image;
pub use crate::core::layout::{CellGeometry, ContentLayout, PlacedLine, Rect, Size, TableLayout};
pub use crate::core::metrics::{FontId, FontMetrics};
pub use crate::core::page::Page;
pub use crate::core::surface::{DrawCall, DrawingSurface, RecordingSurface};
pub use crate::core::table::{
    Cell, CellContent, HorizontalAlignment, ImageContent, Insets, Row, Table, TableSettings,
    TextContent, VerticalAlignment,
};
pub use crate::core::template::TableTemplate;
