use crate::config::Settings;
use crate::core::game_2048::{Game2048, Status, SIZE};
use crate::engine::{DrawContext, Flow, LoopConfig, Tick, Toy};
use crate::term::{CellStyle, Color, FrameBuffer};
use crate::types::InputEvent;

use super::{blank, draw_grid, grid_cell, DIM, FRAME, TEXT, TITLE};

const CELL_W: u16 = 6;

fn tile_style(value: u32) -> CellStyle {
    let color = match value {
        2 => Color::White,
        4 => Color::BrightWhite,
        8 => Color::Yellow,
        16 => Color::BrightYellow,
        32 => Color::Red,
        64 => Color::BrightRed,
        128 => Color::Magenta,
        256 => Color::BrightMagenta,
        512 => Color::Cyan,
        1024 => Color::BrightCyan,
        _ => Color::BrightGreen,
    };
    let style = CellStyle::fg(color);
    if value >= 128 {
        style.bold()
    } else {
        style
    }
}

pub struct Game2048Toy {
    game: Game2048,
}

impl Game2048Toy {
    pub fn new(settings: &Settings) -> Self {
        Self {
            game: Game2048::new(settings.rng()),
        }
    }

    pub fn with_game(game: Game2048) -> Self {
        Self { game }
    }

    pub fn game(&self) -> &Game2048 {
        &self.game
    }
}

impl Toy for Game2048Toy {
    fn name(&self) -> &'static str {
        "game-2048"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(50)
    }

    fn update(&mut self, event: InputEvent, _tick: Tick) -> Flow {
        if let Some(dir) = event.direction() {
            if self.game.slide(dir) {
                tracing::trace!(score = self.game.score(), moves = self.game.moves(), "2048 move");
            }
        } else if event.is_char_ignore_case('c') {
            self.game.continue_playing();
        }
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        let mut fb = blank(ctx.viewport);
        fb.put_centered(0, "2048", TITLE);
        fb.put_centered(
            1,
            &format!("Score: {}   Moves: {}", self.game.score(), self.game.moves()),
            TEXT,
        );

        let grid_w = SIZE as u16 * (CELL_W + 1) + 1;
        let x = fb.width().saturating_sub(grid_w) / 2;
        let origin = draw_grid(&mut fb, ctx.glyphs, (x, 3), (SIZE as u16, SIZE as u16), CELL_W, FRAME);

        for (r, row) in self.game.board().iter().enumerate() {
            for (c, &value) in row.iter().enumerate() {
                let (cx, cy) = grid_cell(origin, c as u16, r as u16, CELL_W);
                if value == 0 {
                    fb.put_char(cx + CELL_W / 2, cy, ctx.glyphs.dot, DIM);
                } else {
                    let text = format!("{value:^width$}", width = CELL_W as usize);
                    fb.put_str(cx, cy, &text, tile_style(value));
                }
            }
        }

        let y = 3 + 2 * SIZE as u16 + 2;
        let message = match self.game.status() {
            Status::Playing => None,
            Status::Won => Some(("You reached 2048! Press C to keep going", TITLE)),
            Status::GameOver => Some(("Game over! No moves left", CellStyle::fg(Color::BrightRed).bold())),
        };
        if let Some((text, style)) = message {
            fb.put_centered(y, text, style);
        }
        fb.put_centered(y + 1, "Arrows/WASD slide  Q quit", DIM);
        fb
    }
}
