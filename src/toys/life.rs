use crate::config::Settings;
use crate::core::life::{Life, Pattern};
use crate::core::SimpleRng;
use crate::engine::{DrawContext, Flow, LoopConfig, Tick, Toy};
use crate::term::{CellStyle, Color, FrameBuffer, Viewport};
use crate::types::InputEvent;

use super::{blank, draw_field, field_size, millis, DIM, TEXT};

const ALIVE: CellStyle = CellStyle::fg(Color::BrightGreen);
const CURSOR: CellStyle = CellStyle::fg(Color::BrightYellow).reverse();

/// Conway's Game of Life with a cursor editor.
pub struct LifeToy {
    life: Life,
    rng: SimpleRng,
}

impl LifeToy {
    pub fn new(viewport: Viewport, settings: &Settings) -> Self {
        let (w, h) = field_size(viewport);
        Self {
            life: Life::new(w, h),
            rng: settings.rng(),
        }
    }

    pub fn life(&self) -> &Life {
        &self.life
    }
}

impl Toy for LifeToy {
    fn name(&self) -> &'static str {
        "life"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(20)
    }

    fn update(&mut self, event: InputEvent, tick: Tick) -> Flow {
        if let Some(dir) = event.arrow() {
            self.life.move_cursor(dir);
        } else if let Some(pattern) = event.digit().and_then(Pattern::from_digit) {
            self.life.place(pattern);
        } else {
            match event.char().map(|c| c.to_ascii_lowercase()) {
                Some('p') => self.life.toggle_play(),
                Some(' ') if !self.life.is_playing() => self.life.toggle_at_cursor(),
                Some('c') => self.life.clear(),
                Some('r') => self.life.randomize(&mut self.rng),
                _ => {}
            }
        }
        if !tick.is_paused() {
            self.life.tick(millis(tick.dt));
        }
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        let mut fb = blank(ctx.viewport);
        let (w, h) = (self.life.width(), self.life.height());
        draw_field(&mut fb, ctx.glyphs, w, h, "Game of Life");

        for y in 0..h {
            for x in 0..w {
                if self.life.is_alive(x, y) {
                    fb.put_char(x as u16 + 1, y as u16 + 1, ctx.glyphs.block, ALIVE);
                }
            }
        }
        if !self.life.is_playing() {
            let (cx, cy) = self.life.cursor();
            let ch = if self.life.is_alive(cx, cy) {
                ctx.glyphs.block
            } else {
                '+'
            };
            fb.put_char(cx as u16 + 1, cy as u16 + 1, ch, CURSOR);
        }

        let status_y = h as u16 + 2;
        let status = format!(
            "Generation: {}  Population: {}  [{}]",
            self.life.generation(),
            self.life.population(),
            if self.life.is_playing() {
                "PLAYING"
            } else {
                "EDITING"
            }
        );
        fb.put_str(1, status_y, &status, TEXT);
        fb.put_str(
            1,
            status_y + 1,
            "P play/pause  Arrows move  Space toggle  C clear  R random  1-5 patterns  Q quit",
            DIM,
        );
        fb
    }
}
