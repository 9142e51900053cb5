use crate::config::Settings;
use crate::core::ball::Balls;
use crate::core::SimpleRng;
use crate::engine::{DrawContext, Flow, LoopConfig, Tick, Toy};
use crate::term::{CellStyle, FrameBuffer, Viewport};
use crate::types::{InputEvent, TerminalMode};

use super::{blank, draw_field, field_size, palette, DIM, TEXT};

const UNICODE_BALLS: [char; 6] = ['●', '○', '◉', '◎', '◆', '■'];
const ASCII_BALLS: [char; 6] = ['O', 'o', '@', '0', '*', '+'];

/// Bouncing balls under gravity.
pub struct BouncingBall {
    field: Balls,
    rng: SimpleRng,
}

impl BouncingBall {
    pub fn new(viewport: Viewport, settings: &Settings) -> Self {
        let (w, h) = field_size(viewport);
        let mut rng = settings.rng();
        let field = Balls::with_start_balls(w, h, &mut rng);
        Self { field, rng }
    }

    pub fn field(&self) -> &Balls {
        &self.field
    }
}

impl Toy for BouncingBall {
    fn name(&self) -> &'static str {
        "bouncing-ball"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(50)
    }

    fn update(&mut self, event: InputEvent, tick: Tick) -> Flow {
        match event.char().map(|c| c.to_ascii_lowercase()) {
            Some(' ') => self.field.add_random(&mut self.rng),
            Some('c') => self.field.clear(),
            Some('g') => self.field.invert_gravity(),
            Some('t') => self.field.toggle_trails(),
            _ => {}
        }
        if !tick.is_paused() {
            self.field.step(&mut self.rng);
        }
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        let mut fb = blank(ctx.viewport);
        let (w, h) = (self.field.width(), self.field.height());
        draw_field(&mut fb, ctx.glyphs, w, h, "Bouncing Balls");

        let inside = |(x, y): (i32, i32)| x >= 0 && y >= 0 && (x as usize) < w && (y as usize) < h;
        let faces = match ctx.mode {
            TerminalMode::NativeAnsi => &UNICODE_BALLS,
            TerminalMode::DegradedAscii => &ASCII_BALLS,
        };

        for ball in self.field.balls() {
            let style = CellStyle::fg(palette(ball.color));
            if self.field.trails() {
                for &cell in ball.trail.iter().filter(|&&c| inside(c)) {
                    fb.set_signed(cell.0 + 1, cell.1 + 1, style.dim().into_cell(ctx.glyphs.dot));
                }
            }
            let cell = ball.cell();
            if inside(cell) {
                let face = faces[ball.style as usize % faces.len()];
                fb.set_signed(cell.0 + 1, cell.1 + 1, style.bold().into_cell(face));
            }
        }

        let status_y = h as u16 + 2;
        let status = format!(
            "Balls: {}  Gravity: {:+.1}  Trails: {}",
            self.field.balls().len(),
            self.field.gravity(),
            if self.field.trails() { "on" } else { "off" }
        );
        fb.put_str(1, status_y, &status, TEXT);
        fb.put_str(1, status_y + 1, "Space add  C clear  G gravity  T trails  Q quit", DIM);
        fb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn toy() -> BouncingBall {
        let settings = Settings {
            seed: Some(3),
            ..Settings::default()
        };
        BouncingBall::new(Viewport::new(40, 20), &settings)
    }

    fn tick() -> Tick {
        Tick::running(Duration::from_millis(50))
    }

    #[test]
    fn test_keys_add_and_clear_balls() {
        let mut toy = toy();
        assert_eq!(toy.field().balls().len(), 3);
        toy.update(InputEvent::Char(' '), tick());
        assert_eq!(toy.field().balls().len(), 4);
        toy.update(InputEvent::Char('C'), tick());
        assert!(toy.field().balls().is_empty());
    }

    #[test]
    fn test_gravity_and_trail_toggles() {
        let mut toy = toy();
        toy.update(InputEvent::Char('g'), tick());
        assert!(toy.field().gravity() < 0.0);
        toy.update(InputEvent::Char('t'), tick());
        assert!(!toy.field().trails());
    }

    #[test]
    fn test_degraded_frame_is_ascii() {
        let mut toy = toy();
        for _ in 0..5 {
            toy.update(InputEvent::None, tick());
        }
        let ctx = DrawContext::new(TerminalMode::DegradedAscii, Viewport::new(40, 20));
        let text = toy.draw(&ctx).to_text();
        assert!(text.is_ascii());
        assert!(text.contains("Balls: 3"));
    }
}
