//! Host-side peripherals: terminal screen, logged speaker, real clock.

use std::io::Write;

use playreg_hardware::mock::surface::{DEFAULT_HEIGHT, DEFAULT_WIDTH, font_height, text_width};
use playreg_hardware::{
    AnyByteStream, AnyCardReader, AudioSink, Color, Font, Rect, RenderSurface, SystemClock,
};
use playreg_register::Platform;

/// Peripherals of the host build.
#[derive(Debug, Clone, Copy, Default)]
pub struct HostPlatform;

impl Platform for HostPlatform {
    type DebugStream = AnyByteStream;
    type BarcodeStream = AnyByteStream;
    type CardReader = AnyCardReader;
    type Surface = TerminalSurface;
    type Audio = LogAudio;
    type Clock = SystemClock;
}

/// Screen that keeps only the text of the current frame and prints it
/// to stdout on [`present`](Self::present).
#[derive(Debug)]
pub struct TerminalSurface {
    width: i32,
    height: i32,
    font: Font,
    texts: Vec<(i32, i32, String)>,
    dirty: bool,
}

impl TerminalSurface {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            font: Font::Body,
            texts: Vec::new(),
            dirty: false,
        }
    }

    /// Print the frame if anything changed since the last call.
    pub fn present(&mut self) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let mut stdout = std::io::stdout().lock();
        let result = self.write_frame(&mut stdout);
        if let Err(e) = result.and_then(|()| stdout.flush()) {
            tracing::warn!(error = %e, "Failed to draw frame");
        }
    }

    fn write_frame(&self, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "+{}+", "-".repeat(38))?;
        for line in self.lines() {
            writeln!(out, "| {line}")?;
        }
        writeln!(out, "+{}+", "-".repeat(38))
    }

    /// Texts grouped into rows by y, left to right.
    fn lines(&self) -> Vec<String> {
        let mut texts = self.texts.clone();
        texts.sort_by_key(|(x, y, _)| (*y, *x));

        let mut lines: Vec<(i32, String)> = Vec::new();
        for (_, y, text) in texts {
            match lines.last_mut() {
                // Same row when the baselines are within a few pixels.
                Some((row_y, line)) if (y - *row_y).abs() <= 4 => {
                    line.push_str("  ");
                    line.push_str(&text);
                }
                _ => lines.push((y, text)),
            }
        }
        lines.into_iter().map(|(_, line)| line).collect()
    }
}

impl Default for TerminalSurface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl RenderSurface for TerminalSurface {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn fill_screen(&mut self, _color: Color) {
        self.texts.clear();
        self.dirty = true;
    }

    fn fill_round_rect(&mut self, _rect: Rect, _radius: i32, _color: Color) {}

    fn draw_hline(&mut self, _x: i32, _y: i32, _width: i32, _color: Color) {}

    fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    fn set_text_color(&mut self, _foreground: Color, _background: Color) {}

    fn text_width(&self, text: &str) -> i32 {
        text_width(self.font, text)
    }

    fn font_height(&self) -> i32 {
        font_height(self.font)
    }

    fn draw_text(&mut self, x: i32, y: i32, text: &str) {
        self.texts.push((x, y, text.to_string()));
        self.dirty = true;
    }
}

/// Speaker that logs tones instead of playing them.
#[derive(Debug, Default)]
pub struct LogAudio {
    volume: u8,
}

impl AudioSink for LogAudio {
    fn set_volume(&mut self, volume: u8) {
        self.volume = volume;
        tracing::debug!(volume, "Speaker volume");
    }

    fn tone(&mut self, frequency_hz: u16, duration_ms: u16) {
        tracing::info!(frequency_hz, duration_ms, volume = self.volume, "Tone");
    }
}
