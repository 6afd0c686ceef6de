//! Table geometry.
//!
//! [`TableLayout::compute`] walks the rows top to bottom and the cells left to
//! right and resolves every cell to absolute page coordinates (PDF space,
//! origin at the lower left, y growing upwards). The result is shared by the
//! content pass and the border pass of the drawer so both agree on every edge.

use log::{debug, trace, warn};

use crate::core::image::Image;
use crate::core::metrics::{FontId, FontMetrics};
use crate::core::table::{Cell, CellContent, HorizontalAlignment, Insets, Row, Table, VerticalAlignment};
use crate::core::text;
use crate::core::color::Color;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// One line of text positioned at its baseline origin
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ContentLayout {
    Text {
        lines: Vec<PlacedLine>,
        font: FontId,
        font_size: f64,
        color: Color,
    },
    Image {
        image: Arc<Image>,
        area: Rect,
    },
}

/// Resolved geometry of one cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGeometry {
    pub row: usize,
    /// Index of the cell within its row
    pub index: usize,
    /// First column the cell occupies
    pub column: usize,
    pub x: f64,
    /// Bottom edge of the row
    pub y: f64,
    pub width: f64,
    pub row_height: f64,
    /// Height the content needs including vertical padding
    pub cell_height: f64,
    pub content: ContentLayout,
}

impl CellGeometry {
    /// The area the cell covers, always the full row height
    pub fn rect(&self) -> Rect {
        Rect {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.row_height,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TableLayout {
    pub cells: Vec<CellGeometry>,
    pub row_heights: Vec<f64>,
}

struct MeasuredLine {
    text: String,
    width: f64,
}

// Content measured before the row height is known
enum Measured {
    Text {
        lines: Vec<MeasuredLine>,
        font: FontId,
        font_size: f64,
        line_height: f64,
        line_spacing: f64,
        color: Color,
    },
    Image {
        image: Arc<Image>,
        fit: Size,
    },
}

impl TableLayout {
    /// Lay out `table` with its top-left corner at (`origin_x`, `origin_y`).
    ///
    /// The first row starts one line height (table font and size) below
    /// `origin_y` so the first baseline sits under the nominal top.
    pub fn compute<M: FontMetrics + ?Sized>(table: &Table, metrics: &M, origin_x: f64, origin_y: f64) -> Self {
        let settings = &table.settings;
        let mut row_top = origin_y - metrics.line_height(settings.font, settings.font_size);

        let mut cells = Vec::new();
        let mut row_heights = Vec::with_capacity(table.rows.len());

        for (row_index, row) in table.rows.iter().enumerate() {
            let measured: Vec<(f64, Measured, f64)> = {
                let mut column = 0;
                row.cells
                    .iter()
                    .map(|cell| {
                        let width = table.cell_width(column, cell.span);
                        column += cell.span;
                        let content = measure(table, cell, width, metrics);
                        let height = required_height(&content, &cell.padding);
                        (width, content, height)
                    })
                    .collect()
            };

            let row_height = resolve_row_height(row_index, row, measured.iter().map(|m| m.2));
            row_heights.push(row_height);
            row_top -= row_height;

            let mut x = origin_x;
            let mut column = 0;
            for (index, (cell, (width, content, cell_height))) in row.cells.iter().zip(measured).enumerate() {
                let content = place(cell, content, x, row_top, width, row_height, cell_height);
                trace!(
                    "cell {}:{} at ({:.2}, {:.2}) {:.2}x{:.2}, content height {:.2}",
                    row_index, index, x, row_top, width, row_height, cell_height
                );
                cells.push(CellGeometry {
                    row: row_index,
                    index,
                    column,
                    x,
                    y: row_top,
                    width,
                    row_height,
                    cell_height,
                    content,
                });
                x += width;
                column += cell.span;
            }
        }

        debug!("laid out {} rows, {} cells", row_heights.len(), cells.len());

        TableLayout { cells, row_heights }
    }

    /// Total height of all rows
    pub fn height(&self) -> f64 {
        self.row_heights.iter().sum()
    }
}

fn measure<M: FontMetrics + ?Sized>(table: &Table, cell: &Cell, width: f64, metrics: &M) -> Measured {
    match &cell.content {
        CellContent::Text(content) => {
            let font = content.font.unwrap_or(table.settings.font);
            let font_size = content.font_size.unwrap_or(table.settings.font_size);
            let lines = if table.settings.word_break {
                let max_width = width - cell.padding.horizontal();
                text::break_lines(&content.text, max_width, font, font_size, metrics)
            } else {
                vec![content.text.clone()]
            };
            let lines = lines
                .into_iter()
                .map(|text| MeasuredLine {
                    width: metrics.string_width(&text, font, font_size),
                    text,
                })
                .collect();
            Measured::Text {
                lines,
                font,
                font_size,
                line_height: metrics.line_height(font, font_size),
                line_spacing: content.line_spacing,
                color: content.text_color,
            }
        }
        CellContent::Image(content) => {
            let fit = content.image.fit_size(content.scale, width - cell.padding.horizontal());
            if fit.width <= 0.0 || fit.height <= 0.0 {
                warn!("image cell fits to an empty area ({:.2}x{:.2})", fit.width, fit.height);
            }
            Measured::Image {
                image: Arc::clone(&content.image),
                fit,
            }
        }
    }
}

fn required_height(content: &Measured, padding: &Insets) -> f64 {
    let content_height = match content {
        Measured::Text { lines, line_height, line_spacing, .. } => {
            text::text_height(lines.len(), *line_height, *line_spacing)
        }
        Measured::Image { fit, .. } => fit.height,
    };
    content_height + padding.vertical()
}

/// Explicit row heights win even when content needs more: the content then
/// overflows the row and is not clipped.
fn resolve_row_height(row_index: usize, row: &Row, cell_heights: impl Iterator<Item = f64>) -> f64 {
    let required = cell_heights.fold(0.0, f64::max);
    match row.height {
        Some(height) => {
            if height < required {
                warn!(
                    "row {} height {:.2} is smaller than its content ({:.2}), content will overflow",
                    row_index, height, required
                );
            }
            height
        }
        None => required,
    }
}

fn place(cell: &Cell, content: Measured, x: f64, y: f64, width: f64, row_height: f64, cell_height: f64) -> ContentLayout {
    let padding = &cell.padding;
    match content {
        Measured::Text { lines, font, font_size, line_height, line_spacing, color } => {
            let mut baseline = y + vertical_start(cell.vertical_alignment, row_height, cell_height, padding);
            let lines = lines
                .into_iter()
                .enumerate()
                .map(|(i, line)| {
                    baseline -= line_height;
                    if i > 0 {
                        baseline -= line_height * line_spacing;
                    }
                    PlacedLine {
                        x: x + horizontal_offset(cell.horizontal_alignment, width, line.width, padding),
                        y: baseline,
                        width: line.width,
                        text: line.text,
                    }
                })
                .collect();
            ContentLayout::Text { lines, font, font_size, color }
        }
        Measured::Image { image, fit } => ContentLayout::Image {
            image,
            area: Rect {
                x: x + (width - padding.left - padding.right) / 2.0 + padding.left - fit.width / 2.0,
                y: y + (cell_height - padding.top - padding.bottom) / 2.0 + padding.bottom - fit.height / 2.0,
                width: fit.width,
                height: fit.height,
            },
        },
    }
}

/// Offset of the text top above the row bottom.
///
/// Alignment only has an effect when the row is taller than the cell needs.
pub fn vertical_start(alignment: VerticalAlignment, row_height: f64, cell_height: f64, padding: &Insets) -> f64 {
    if row_height > cell_height {
        match alignment {
            VerticalAlignment::Top => row_height - padding.top,
            VerticalAlignment::Middle => row_height / 2.0 + (cell_height - padding.bottom - padding.top) / 2.0,
            VerticalAlignment::Bottom => cell_height - padding.top,
        }
    } else {
        row_height - padding.top
    }
}

/// Offset of a line of `text_width` from the cell's left edge
pub fn horizontal_offset(alignment: HorizontalAlignment, cell_width: f64, text_width: f64, padding: &Insets) -> f64 {
    match alignment {
        HorizontalAlignment::Left => padding.left,
        HorizontalAlignment::Right => cell_width - (text_width + padding.right),
        HorizontalAlignment::Center => (cell_width - text_width) / 2.0,
    }
}
