//! Recording render surface.
//!
//! Keeps a log of draw operations instead of pixels. Text metrics follow a
//! monospace Japanese Gothic face: ASCII glyphs are half as wide as the font
//! height and everything else is square.

use std::sync::{Arc, Mutex};

use crate::traits::RenderSurface;
use crate::types::{Color, Font, Rect};

/// Default panel size (M5Stack class devices).
pub const DEFAULT_WIDTH: i32 = 320;
pub const DEFAULT_HEIGHT: i32 = 240;

/// A recorded draw call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawOp {
    FillScreen(Color),
    FillRoundRect {
        rect: Rect,
        radius: i32,
        color: Color,
    },
    HLine {
        x: i32,
        y: i32,
        width: i32,
        color: Color,
    },
    Text {
        x: i32,
        y: i32,
        text: String,
        font: Font,
        foreground: Color,
        background: Color,
    },
}

/// Pixel height of each font role.
pub fn font_height(font: Font) -> i32 {
    match font {
        Font::Body => 24,
        Font::Summary => 32,
        Font::Button => 16,
    }
}

/// Width of `text` in pixels when drawn in `font`.
pub fn text_width(font: Font, text: &str) -> i32 {
    let full = font_height(font);
    let half = full / 2;
    text.chars()
        .map(|c| if c.is_ascii() { half } else { full })
        .sum()
}

/// Render surface that records every call.
///
/// # Examples
///
/// ```
/// use playreg_hardware::mock::RecordingSurface;
/// use playreg_hardware::traits::RenderSurface;
/// use playreg_hardware::types::Font;
///
/// let (mut surface, handle) = RecordingSurface::new();
/// surface.set_font(Font::Body);
/// surface.draw_text(8, 6, "CLEAR");
///
/// assert_eq!(surface.text_width("CLEAR"), 60);
/// assert_eq!(handle.texts(), vec!["CLEAR".to_string()]);
/// ```
#[derive(Debug)]
pub struct RecordingSurface {
    width: i32,
    height: i32,
    font: Font,
    foreground: Color,
    background: Color,
    ops: Arc<Mutex<Vec<DrawOp>>>,
}

impl RecordingSurface {
    /// Create a 320x240 surface.
    pub fn new() -> (Self, RecordingSurfaceHandle) {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    pub fn with_size(width: i32, height: i32) -> (Self, RecordingSurfaceHandle) {
        let ops = Arc::new(Mutex::new(Vec::new()));
        let surface = Self {
            width,
            height,
            font: Font::Body,
            foreground: Color::Black,
            background: Color::White,
            ops: Arc::clone(&ops),
        };
        (surface, RecordingSurfaceHandle { ops })
    }

    fn record(&self, op: DrawOp) {
        self.ops
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(op);
    }
}

impl RenderSurface for RecordingSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn fill_screen(&mut self, color: Color) {
        self.record(DrawOp::FillScreen(color));
    }

    fn fill_round_rect(&mut self, rect: Rect, radius: i32, color: Color) {
        self.record(DrawOp::FillRoundRect {
            rect,
            radius,
            color,
        });
    }

    fn draw_hline(&mut self, x: i32, y: i32, width: i32, color: Color) {
        self.record(DrawOp::HLine { x, y, width, color });
    }

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_text_color(&mut self, foreground: Color, background: Color) {
        self.foreground = foreground;
        self.background = background;
    }

    fn text_width(&self, text: &str) -> i32 {
        text_width(self.font, text)
    }

    fn font_height(&self) -> i32 {
        font_height(self.font)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.record(DrawOp::Text {
            x,
            y,
            text: text.to_string(),
            font: self.font,
            foreground: self.foreground,
            background: self.background,
        });
    }
}

/// Read access to a [`RecordingSurface`] log.
#[derive(Debug, Clone)]
pub struct RecordingSurfaceHandle {
    ops: Arc<Mutex<Vec<DrawOp>>>,
}

impl RecordingSurfaceHandle {
    /// Every operation since creation or the last [`clear`](Self::clear).
    pub fn ops(&self) -> Vec<DrawOp> {
        self.ops.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Operations since the most recent `fill_screen`, i.e. the current screen.
    pub fn last_frame(&self) -> Vec<DrawOp> {
        let ops = self.ops();
        let start = ops
            .iter()
            .rposition(|op| matches!(op, DrawOp::FillScreen(_)))
            .unwrap_or(0);
        ops[start..].to_vec()
    }

    /// Text strings drawn on the current screen, in draw order.
    pub fn texts(&self) -> Vec<String> {
        self.last_frame()
            .into_iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Number of full-screen redraws.
    pub fn frame_count(&self) -> usize {
        self.ops()
            .iter()
            .filter(|op| matches!(op, DrawOp::FillScreen(_)))
            .count()
    }

    pub fn clear(&self) {
        self.ops.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }
}
