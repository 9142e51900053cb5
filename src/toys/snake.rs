use crate::config::Settings;
use crate::core::snake::Snake;
use crate::engine::{DrawContext, Flow, LoopConfig, Tick, Toy};
use crate::term::{CellStyle, Color, FrameBuffer, Viewport};
use crate::types::InputEvent;

use super::{banner, blank, draw_field, millis, DIM, STATUS_LINES, TEXT};

const HEAD: CellStyle = CellStyle::fg(Color::BrightGreen).bold();
const BODY: CellStyle = CellStyle::fg(Color::Green);
const FOOD: CellStyle = CellStyle::fg(Color::BrightRed).bold();
const GAME_OVER: CellStyle = CellStyle::fg(Color::BrightRed).bold().reverse();

pub struct SnakeToy {
    snake: Snake,
}

impl SnakeToy {
    pub fn new(viewport: Viewport, settings: &Settings) -> Self {
        let h = viewport.height.saturating_sub(STATUS_LINES);
        Self {
            snake: Snake::new(viewport.width as i32, h as i32, settings.rng()),
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }
}

impl Toy for SnakeToy {
    fn name(&self) -> &'static str {
        "snake"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(20)
    }

    fn update(&mut self, event: InputEvent, tick: Tick) -> Flow {
        if self.snake.is_game_over() {
            // Any key after the crash leaves the game.
            return if event.is_none() {
                Flow::Continue
            } else {
                Flow::Done
            };
        }
        if let Some(dir) = event.direction() {
            self.snake.turn(dir);
        }
        if !tick.is_paused() && self.snake.tick(millis(tick.dt)) && self.snake.is_game_over() {
            tracing::debug!(score = self.snake.score(), length = self.snake.len(), "snake crashed");
        }
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        let mut fb = blank(ctx.viewport);
        let (w, h) = (self.snake.width(), self.snake.height());
        // The arena's outer ring is the wall, so the box is drawn on it.
        draw_field(&mut fb, ctx.glyphs, (w - 2) as usize, (h - 2) as usize, "Snake");

        let (fx, fy) = self.snake.food();
        fb.set_signed(fx, fy, FOOD.into_cell(ctx.glyphs.diamond));
        let head = self.snake.head();
        for (x, y) in self.snake.body() {
            let cell = if (x, y) == head {
                HEAD.into_cell(ctx.glyphs.bullet)
            } else {
                BODY.into_cell(ctx.glyphs.block)
            };
            fb.set_signed(x, y, cell);
        }

        let status_y = h as u16;
        let status = format!(
            "Score: {}  Length: {}  Speed: {}ms",
            self.snake.score(),
            self.snake.len(),
            self.snake.step_ms()
        );
        fb.put_str(1, status_y, &status, TEXT);
        fb.put_str(1, status_y + 1, "Arrows/WASD steer  Q quit", DIM);

        if self.snake.is_game_over() {
            banner(
                &mut fb,
                &format!("GAME OVER  Score: {}  Press any key", self.snake.score()),
                GAME_OVER,
            );
        }
        fb
    }
}
