use log::debug;

use crate::core::color::Color;
use crate::core::error::Result;
use crate::core::layout::{CellGeometry, ContentLayout, TableLayout};
use crate::core::metrics::FontMetrics;
use crate::core::surface::DrawingSurface;
use crate::core::table::{Cell, Row, Table};

/// Draws a [`Table`] onto a [`DrawingSurface`].
///
/// Drawing happens in two passes over the same layout: backgrounds and
/// content first, then borders, so borders always end up on top. A failing
/// surface aborts the draw at the first error; whatever was emitted before
/// stays on the surface.
pub struct TableDrawer<'a> {
    table: &'a Table,
    origin_x: f64,
    origin_y: f64,
}

impl<'a> TableDrawer<'a> {
    /// Drawer placing the table's top-left corner at (`origin_x`, `origin_y`)
    pub fn new(table: &'a Table, origin_x: f64, origin_y: f64) -> Self {
        TableDrawer { table, origin_x, origin_y }
    }

    /// Geometry the drawer works from, computed without touching a surface
    pub fn layout<M: FontMetrics + ?Sized>(&self, metrics: &M) -> TableLayout {
        TableLayout::compute(self.table, metrics, self.origin_x, self.origin_y)
    }

    /// Lay the table out and draw it, returning the layout used
    pub fn draw<S, M>(&self, surface: &mut S, metrics: &M) -> Result<TableLayout>
    where
        S: DrawingSurface + ?Sized,
        M: FontMetrics + ?Sized,
    {
        let layout = self.layout(metrics);
        debug!(
            "drawing table: {} rows, {} cells at ({}, {})",
            self.table.rows.len(), layout.cells.len(), self.origin_x, self.origin_y
        );

        self.draw_backgrounds_and_content(surface, &layout)?;
        self.draw_borders(surface, &layout)?;

        debug!("table drawn, {:.2}pt tall", layout.height());
        Ok(layout)
    }

    fn draw_backgrounds_and_content<S>(&self, surface: &mut S, layout: &TableLayout) -> Result<()>
    where
        S: DrawingSurface + ?Sized,
    {
        for geometry in &layout.cells {
            let cell = self.cell(geometry);

            if let Some(background) = cell.background_color {
                let area = geometry.rect();
                surface.set_fill_color(background)?;
                surface.fill_rect(area.x, area.y, area.width, area.height)?;
                surface.set_fill_color(Color::black())?;
            }

            match &geometry.content {
                ContentLayout::Text { lines, font, font_size, color } => {
                    for line in lines.iter().filter(|l| !l.text.is_empty()) {
                        surface.draw_text(&line.text, *font, *font_size, *color, line.x, line.y)?;
                    }
                }
                ContentLayout::Image { image, area } => {
                    surface.draw_image(image, area.x, area.y, area.width, area.height)?;
                }
            }
        }
        Ok(())
    }

    fn draw_borders<S>(&self, surface: &mut S, layout: &TableLayout) -> Result<()>
    where
        S: DrawingSurface + ?Sized,
    {
        for geometry in &layout.cells {
            let cell = self.cell(geometry);
            let row = self.row(geometry);
            let widths = &cell.border_widths;

            let left = geometry.x;
            let right = geometry.x + geometry.width;
            let bottom = geometry.y;
            let top = geometry.y + geometry.row_height;

            // Horizontal segments reach half a vertical border further so corners close
            if cell.has_border_top() || cell.has_border_bottom() {
                let start = left - if cell.has_border_left() { widths.left / 2.0 } else { 0.0 };
                let end = right + if cell.has_border_right() { widths.right / 2.0 } else { 0.0 };

                if cell.has_border_top() {
                    stroke_segment(surface, cell, row, widths.top, (start, top), (end, top))?;
                }
                if cell.has_border_bottom() {
                    stroke_segment(surface, cell, row, widths.bottom, (start, bottom), (end, bottom))?;
                }
            }

            if cell.has_border_left() || cell.has_border_right() {
                let low = bottom - if cell.has_border_bottom() { widths.bottom / 2.0 } else { 0.0 };
                let high = top + if cell.has_border_top() { widths.top / 2.0 } else { 0.0 };

                if cell.has_border_left() {
                    stroke_segment(surface, cell, row, widths.left, (left, low), (left, high))?;
                }
                if cell.has_border_right() {
                    stroke_segment(surface, cell, row, widths.right, (right, low), (right, high))?;
                }
            }
        }
        Ok(())
    }

    fn row(&self, geometry: &CellGeometry) -> &'a Row {
        &self.table.rows[geometry.row]
    }

    fn cell(&self, geometry: &CellGeometry) -> &'a Cell {
        &self.row(geometry).cells[geometry.index]
    }
}

/// Stroke one border side, then put the stroke color back to the row's color
fn stroke_segment<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    cell: &Cell,
    row: &Row,
    width: f64,
    from: (f64, f64),
    to: (f64, f64),
) -> Result<()> {
    surface.set_line_width(width)?;
    surface.set_stroke_color(cell.border_color.unwrap_or(row.border_color))?;
    surface.stroke_line(from.0, from.1, to.0, to.1)?;
    surface.set_stroke_color(row.border_color)?;
    Ok(())
}

/// Draw `table` with its top-left corner at (`origin_x`, `origin_y`)
pub fn draw_table<S, M>(surface: &mut S, metrics: &M, table: &Table, origin_x: f64, origin_y: f64) -> Result<()>
where
    S: DrawingSurface + ?Sized,
    M: FontMetrics + ?Sized,
{
    TableDrawer::new(table, origin_x, origin_y).draw(surface, metrics)?;
    Ok(())
}
