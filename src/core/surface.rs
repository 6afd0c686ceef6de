use std::io::{self, Error, ErrorKind};
use std::sync::Arc;

use crate::core::color::Color;
use crate::core::image::Image;
use crate::core::metrics::FontId;

/// Target of the table drawer.
///
/// Coordinates are in PDF user space: origin at the lower left, y up.
/// Colors and line width are surface state and stay in effect until changed.
pub trait DrawingSurface {
    fn set_fill_color(&mut self, color: Color) -> io::Result<()>;
    fn set_stroke_color(&mut self, color: Color) -> io::Result<()>;
    fn set_line_width(&mut self, width: f64) -> io::Result<()>;

    /// Fill a rectangle whose lower-left corner is (`x`, `y`)
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> io::Result<()>;

    fn move_to(&mut self, x: f64, y: f64) -> io::Result<()>;
    fn line_to(&mut self, x: f64, y: f64) -> io::Result<()>;
    /// Stroke the current path with the current stroke color and line width
    fn stroke(&mut self) -> io::Result<()>;

    fn stroke_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) -> io::Result<()> {
        self.move_to(x1, y1)?;
        self.line_to(x2, y2)?;
        self.stroke()
    }

    /// Show `text` with its baseline origin at (`x`, `y`)
    fn draw_text(&mut self, text: &str, font: FontId, size: f64, color: Color, x: f64, y: f64) -> io::Result<()>;

    fn draw_image(&mut self, image: &Arc<Image>, x: f64, y: f64, width: f64, height: f64) -> io::Result<()>;
}

/// A primitive recorded by [`RecordingSurface`]
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    SetFillColor(Color),
    SetStrokeColor(Color),
    SetLineWidth(f64),
    FillRect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
    MoveTo {
        x: f64,
        y: f64,
    },
    LineTo {
        x: f64,
        y: f64,
    },
    Stroke,
    DrawText {
        text: String,
        font: FontId,
        size: f64,
        color: Color,
        x: f64,
        y: f64,
    },
    DrawImage {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    },
}

/// Surface that records every primitive instead of drawing it.
///
/// Useful for previews, hit testing and tests. With [`fail_after`](Self::fail_after)
/// it can also stand in for a surface that breaks mid-draw.
#[derive(Debug, Default, Clone)]
pub struct RecordingSurface {
    calls: Vec<DrawCall>,
    fail_after: Option<usize>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        RecordingSurface::default()
    }

    /// Accept `count` primitives, then fail every following one
    pub fn fail_after(count: usize) -> Self {
        RecordingSurface {
            calls: Vec::new(),
            fail_after: Some(count),
        }
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn into_calls(self) -> Vec<DrawCall> {
        self.calls
    }

    /// Line segments stroked so far as (x1, y1, x2, y2, line width, stroke color)
    pub fn strokes(&self) -> Vec<(f64, f64, f64, f64, f64, Color)> {
        let mut width = 1.0;
        let mut color = Color::black();
        let mut start = (0.0, 0.0);
        let mut end = (0.0, 0.0);
        let mut strokes = Vec::new();

        for call in &self.calls {
            match *call {
                DrawCall::SetLineWidth(w) => width = w,
                DrawCall::SetStrokeColor(c) => color = c,
                DrawCall::MoveTo { x, y } => start = (x, y),
                DrawCall::LineTo { x, y } => end = (x, y),
                DrawCall::Stroke => strokes.push((start.0, start.1, end.0, end.1, width, color)),
                _ => {}
            }
        }
        strokes
    }

    fn record(&mut self, call: DrawCall) -> io::Result<()> {
        if let Some(limit) = self.fail_after {
            if self.calls.len() >= limit {
                return Err(Error::new(ErrorKind::Other, "recording surface closed"));
            }
        }
        self.calls.push(call);
        Ok(())
    }
}

impl DrawingSurface for RecordingSurface {
    fn set_fill_color(&mut self, color: Color) -> io::Result<()> {
        self.record(DrawCall::SetFillColor(color))
    }

    fn set_stroke_color(&mut self, color: Color) -> io::Result<()> {
        self.record(DrawCall::SetStrokeColor(color))
    }

    fn set_line_width(&mut self, width: f64) -> io::Result<()> {
        self.record(DrawCall::SetLineWidth(width))
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> io::Result<()> {
        self.record(DrawCall::FillRect { x, y, width, height })
    }

    fn move_to(&mut self, x: f64, y: f64) -> io::Result<()> {
        self.record(DrawCall::MoveTo { x, y })
    }

    fn line_to(&mut self, x: f64, y: f64) -> io::Result<()> {
        self.record(DrawCall::LineTo { x, y })
    }

    fn stroke(&mut self) -> io::Result<()> {
        self.record(DrawCall::Stroke)
    }

    fn draw_text(&mut self, text: &str, font: FontId, size: f64, color: Color, x: f64, y: f64) -> io::Result<()> {
        self.record(DrawCall::DrawText {
            text: text.to_string(),
            font,
            size,
            color,
            x,
            y,
        })
    }

    fn draw_image(&mut self, _image: &Arc<Image>, x: f64, y: f64, width: f64, height: f64) -> io::Result<()> {
        self.record(DrawCall::DrawImage { x, y, width, height })
    }
}
