//! JSON description of a table.
//!
//! ```json
//! {
//!   "columns": [100, 100],
//!   "settings": { "font_size": 12, "word_break": true },
//!   "rows": [
//!     { "height": 20, "cells": [
//!       { "text": "Hi", "align": "center", "padding": 2, "border_width": 1 },
//!       { "image": "logo", "background_color": "#ff0000" }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Column widths are given either as `columns` (points) or as `weights`
//! together with the total `width`. Images are referenced by key and resolved
//! against the assets passed to [`TableTemplate::build`].

use std::collections::HashMap;
use std::sync::Arc;
use serde::{Deserialize, Serialize};

use crate::core::color::Color;
use crate::core::error::{Result, TableError};
use crate::core::image::Image;
use crate::core::metrics::FontId;
use crate::core::table::{Cell, CellContent, HorizontalAlignment, Insets, Row, Table, TableSettings, VerticalAlignment};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TableTemplate {
    #[serde(default)]
    pub columns: Option<Vec<f64>>,
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
    #[serde(default)]
    pub width: Option<f64>,
    #[serde(default)]
    pub settings: TableSettings,
    #[serde(default)]
    pub rows: Vec<RowTemplate>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RowTemplate {
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default)]
    pub border_color: Option<Color>,
    pub cells: Vec<CellTemplate>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CellTemplate {
    #[serde(default)]
    pub text: Option<String>,
    /// Key into the image assets
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_span")]
    pub span: usize,
    #[serde(default)]
    pub padding: Insets,
    #[serde(default)]
    pub border_width: Insets,
    #[serde(default)]
    pub background_color: Option<Color>,
    #[serde(default)]
    pub border_color: Option<Color>,
    #[serde(default)]
    pub text_color: Option<Color>,
    #[serde(default)]
    pub font: Option<FontId>,
    #[serde(default)]
    pub font_size: Option<f64>,
    #[serde(default)]
    pub line_spacing: Option<f64>,
    #[serde(default)]
    pub scale: Option<f64>,
    #[serde(default)]
    pub align: HorizontalAlignment,
    #[serde(default)]
    pub valign: VerticalAlignment,
}

fn default_span() -> usize { 1 }

impl TableTemplate {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the table, resolving image keys against `assets`
    pub fn build(&self, assets: &HashMap<String, Arc<Image>>) -> Result<Table> {
        let table = match (&self.columns, &self.weights, self.width) {
            (Some(columns), _, _) => Table::new(columns.clone())?,
            (None, Some(weights), Some(width)) => Table::with_proportional_columns(weights, width)?,
            (None, Some(_), None) => {
                return Err(TableError::InvalidTable("column weights need a total width".to_string()));
            }
            (None, None, _) => {
                return Err(TableError::InvalidTable("either columns or weights must be given".to_string()));
            }
        };
        let mut table = table.with_settings(self.settings.clone());

        for row in &self.rows {
            let cells = row
                .cells
                .iter()
                .map(|cell| cell.build(assets))
                .collect::<Result<Vec<_>>>()?;

            let mut built = Row::new(cells);
            if let Some(height) = row.height {
                built = built.with_height(height);
            }
            if let Some(color) = row.border_color {
                built = built.with_border_color(color);
            }
            table.add_row(built)?;
        }

        Ok(table)
    }
}

impl CellTemplate {
    fn build(&self, assets: &HashMap<String, Arc<Image>>) -> Result<Cell> {
        let mut cell = match (&self.text, &self.image) {
            (Some(text), None) => {
                let mut cell = Cell::text(text.clone());
                if let CellContent::Text(content) = &mut cell.content {
                    content.font = self.font;
                    content.font_size = self.font_size;
                    content.line_spacing = self.line_spacing.unwrap_or(content.line_spacing);
                    content.text_color = self.text_color.unwrap_or(content.text_color);
                }
                cell
            }
            (None, Some(key)) => {
                let image = assets
                    .get(key)
                    .ok_or_else(|| TableError::MissingAsset(key.clone()))?;
                Cell::image(Arc::clone(image)).with_scale(self.scale.unwrap_or(1.0))
            }
            _ => {
                return Err(TableError::InvalidTable(
                    "a cell needs exactly one of 'text' or 'image'".to_string(),
                ));
            }
        };

        cell = cell
            .with_span(self.span)
            .with_padding(self.padding)
            .with_border_widths(self.border_width)
            .with_alignment(self.align, self.valign);
        if let Some(color) = self.background_color {
            cell = cell.with_background(color);
        }
        if let Some(color) = self.border_color {
            cell = cell.with_border_color(color);
        }
        Ok(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::table::CellContent;

    const JSON: &str = r##"{
        "columns": [100, 100],
        "settings": { "font_size": 12 },
        "rows": [
            { "height": 20, "border_color": "#0000ff", "cells": [
                { "text": "Hi", "align": "center", "valign": "middle", "padding": 2, "border_width": { "left": 1 } },
                { "image": "logo", "background_color": "#ff0000", "scale": 0.5 }
            ] },
            { "cells": [ { "text": "wide", "span": 2, "font": 1, "text_color": { "r": 0, "g": 1, "b": 0 } } ] }
        ]
    }"##;

    fn assets() -> HashMap<String, Arc<Image>> {
        let mut assets = HashMap::new();
        assets.insert("logo".to_string(), Arc::new(Image::new(2, 2)));
        assets
    }

    #[test]
    fn test_build_from_json() {
        let table = TableTemplate::from_json(JSON).unwrap().build(&assets()).unwrap();

        assert_eq!(table.column_widths, vec![100.0, 100.0]);
        assert_eq!(table.settings.font_size, 12.0);
        assert!(table.settings.word_break);
        assert_eq!(table.rows.len(), 2);

        let first = &table.rows[0];
        assert_eq!(first.height, Some(20.0));
        assert_eq!(first.border_color, Color::rgb(0.0, 0.0, 1.0));
        assert_eq!(first.cells[0].horizontal_alignment, HorizontalAlignment::Center);
        assert_eq!(first.cells[0].vertical_alignment, VerticalAlignment::Middle);
        assert_eq!(first.cells[0].padding, Insets::uniform(2.0));
        assert!(first.cells[0].has_border_left());
        assert!(!first.cells[0].has_border_top());
        assert_eq!(first.cells[1].background_color, Some(Color::red()));
        match &first.cells[1].content {
            CellContent::Image(image) => assert_eq!(image.scale, 0.5),
            CellContent::Text(_) => panic!("expected image cell"),
        }

        let second = &table.rows[1].cells[0];
        assert_eq!(second.span, 2);
        match &second.content {
            CellContent::Text(text) => {
                assert_eq!(text.font, Some(FontId(1)));
                assert_eq!(text.font_size, None);
                assert_eq!(text.text_color, Color::rgb(0.0, 1.0, 0.0));
            }
            CellContent::Image(_) => panic!("expected text cell"),
        }
    }

    #[test]
    fn test_weights_need_width() {
        let template = TableTemplate::from_json(r#"{"weights": [1, 2], "rows": []}"#).unwrap();
        assert!(matches!(template.build(&HashMap::new()), Err(TableError::InvalidTable(_))));

        let template = TableTemplate::from_json(r#"{"weights": [1, 3], "width": 200, "rows": []}"#).unwrap();
        let table = template.build(&HashMap::new()).unwrap();
        assert_eq!(table.column_widths, vec![50.0, 150.0]);
    }

    #[test]
    fn test_missing_asset() {
        let template = TableTemplate::from_json(JSON).unwrap();
        assert!(matches!(template.build(&HashMap::new()), Err(TableError::MissingAsset(key)) if key == "logo"));
    }

    #[test]
    fn test_rejects_bad_rows() {
        let spans = r#"{"columns": [10, 10], "rows": [{"cells": [{"text": "a"}]}]}"#;
        let template = TableTemplate::from_json(spans).unwrap();
        assert!(matches!(template.build(&HashMap::new()), Err(TableError::InvalidTable(_))));

        let both = r#"{"columns": [10], "rows": [{"cells": [{"text": "a", "image": "b"}]}]}"#;
        let template = TableTemplate::from_json(both).unwrap();
        assert!(matches!(template.build(&HashMap::new()), Err(TableError::InvalidTable(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(TableTemplate::from_json("{"), Err(TableError::Template(_))));
    }
}
