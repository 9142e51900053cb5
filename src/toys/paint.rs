//! ASCII paint with brushes, lines, flood fill and save-to-text.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::core::paint::{Brush, Canvas, Tool, PALETTE_NAMES};
use crate::engine::{DrawContext, Flow, LoopConfig, Tick, Toy};
use crate::error::ToysError;
use crate::term::glyphs::UNICODE;
use crate::term::{CellStyle, Color, FrameBuffer, Glyphs, Viewport};
use crate::types::InputEvent;

use super::{blank, draw_field, field_size, millis, palette, DIM, TEXT};

/// How long the save notice stays on screen.
const NOTICE_MS: u32 = 2000;

const CURSOR: CellStyle = CellStyle::fg(Color::BrightWhite).reverse();
const LINE_START: CellStyle = CellStyle::fg(Color::BrightYellow).bold();

fn brush_glyph(glyphs: &Glyphs, brush: Brush) -> char {
    match brush {
        Brush::Block => glyphs.block,
        Brush::Circle => glyphs.bullet,
        Brush::Shade => glyphs.shade,
    }
}

/// Write the canvas to `path` as a plain-text grid.
pub fn save_canvas(canvas: &Canvas, glyphs: &Glyphs, path: &Path) -> Result<(), ToysError> {
    let text = canvas.to_text(|b| brush_glyph(glyphs, b));
    fs::write(path, text).map_err(|source| ToysError::Save {
        path: path.to_path_buf(),
        source,
    })
}

pub struct Paint {
    canvas: Canvas,
    save_path: PathBuf,
    /// Glyph table of the last drawn frame; saves use the same characters.
    glyphs: &'static Glyphs,
    notice: Option<(String, u32)>,
}

impl Paint {
    pub fn new(viewport: Viewport, settings: &Settings) -> Self {
        let (w, h) = field_size(viewport);
        Self {
            canvas: Canvas::new(w, h),
            save_path: settings.save_path.clone(),
            glyphs: &UNICODE,
            notice: None,
        }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_ref().map(|(text, _)| text.as_str())
    }

    fn save(&mut self) {
        let text = match save_canvas(&self.canvas, self.glyphs, &self.save_path) {
            Ok(()) => {
                tracing::info!(path = %self.save_path.display(), "canvas saved");
                format!("Saved to {}", self.save_path.display())
            }
            Err(err) => {
                tracing::warn!(%err, "canvas save failed");
                err.to_string()
            }
        };
        self.notice = Some((text, NOTICE_MS));
    }
}

impl Toy for Paint {
    fn name(&self) -> &'static str {
        "paint"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(20)
    }

    fn update(&mut self, event: InputEvent, tick: Tick) -> Flow {
        if let Some(dir) = event.arrow() {
            self.canvas.move_cursor(dir);
        } else if let Some(d @ 1..=8) = event.digit() {
            self.canvas.set_color(d - 1);
        } else {
            match event.char().map(|c| c.to_ascii_lowercase()) {
                Some(' ') => self.canvas.action(),
                Some('c') => self.canvas.cycle_color(),
                Some('b') => self.canvas.set_brush(Brush::Block),
                Some('n') => self.canvas.set_brush(Brush::Circle),
                Some('m') => self.canvas.set_brush(Brush::Shade),
                Some('e') => self.canvas.toggle_erase(),
                Some('l') => self.canvas.toggle_line_mode(),
                Some('f') => self.canvas.fill(),
                Some('x') => self.canvas.clear(),
                Some('s') => self.save(),
                _ => {}
            }
        }

        if let Some((_, left)) = self.notice.as_mut() {
            *left = left.saturating_sub(millis(tick.dt));
            if *left == 0 {
                self.notice = None;
            }
        }
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        self.glyphs = ctx.glyphs;
        let mut fb = blank(ctx.viewport);
        let (w, h) = (self.canvas.width(), self.canvas.height());
        draw_field(&mut fb, ctx.glyphs, w, h, "ASCII Paint");

        for y in 0..h as i32 {
            for x in 0..w as i32 {
                if let Some(mark) = self.canvas.get((x, y)) {
                    let ch = brush_glyph(ctx.glyphs, mark.brush);
                    fb.set_signed(x + 1, y + 1, CellStyle::fg(palette(mark.color)).into_cell(ch));
                }
            }
        }
        if let Some((sx, sy)) = self.canvas.line_start() {
            fb.set_signed(sx + 1, sy + 1, LINE_START.into_cell(ctx.glyphs.diamond));
        }
        let (cx, cy) = self.canvas.cursor();
        let under = self
            .canvas
            .get((cx, cy))
            .map_or('+', |m| brush_glyph(ctx.glyphs, m.brush));
        fb.set_signed(cx + 1, cy + 1, CURSOR.into_cell(under));

        let status_y = h as u16 + 2;
        let tool = self.canvas.tool();
        let color = self.canvas.color();
        let x = fb.put_str(1, status_y, &format!("Mode: {}  Color: ", tool.label()), TEXT);
        let x = fb.put_str(x, status_y, PALETTE_NAMES[color as usize], CellStyle::fg(palette(color)).bold());
        let x = fb.put_str(
            x,
            status_y,
            &format!("  Brush: {}  Pos: ({},{})", self.canvas.brush().name(), cx, cy),
            TEXT,
        );
        if tool == Tool::Line && self.canvas.line_start().is_some() {
            fb.put_str(x, status_y, "  [end point?]", DIM);
        }
        if let Some(notice) = self.notice() {
            let width = notice.chars().count() as u16;
            let nx = fb.width().saturating_sub(width + 1);
            fb.put_str(nx, status_y, notice, CellStyle::fg(Color::BrightGreen).bold());
        }
        fb.put_str(
            1,
            status_y + 1,
            "Space draw  C/1-8 color  B/N/M brush  E erase  L line  F fill  X clear  S save  Q quit",
            DIM,
        );
        fb
    }
}
