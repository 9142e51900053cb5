use crate::config::Settings;
use crate::core::tictactoe::{Mark, Outcome, Phase, TicTacToe};
use crate::engine::{DrawContext, Flow, LoopConfig, Tick, Toy};
use crate::term::{CellStyle, Color, FrameBuffer};
use crate::types::InputEvent;

use super::{blank, draw_grid, grid_cell, millis, DIM, FRAME, TEXT, TITLE};

const CELL_W: u16 = 5;
const GRID_W: u16 = 3 * (CELL_W + 1) + 1;

const X_STYLE: CellStyle = CellStyle::fg(Color::BrightCyan).bold();
const O_STYLE: CellStyle = CellStyle::fg(Color::BrightMagenta).bold();
const WIN_STYLE: CellStyle = CellStyle::fg(Color::BrightGreen).bold().reverse();

/// Human (X) against a minimax computer (O).
pub struct TicTacToeToy {
    game: TicTacToe,
}

impl TicTacToeToy {
    pub fn new(settings: &Settings) -> Self {
        Self {
            game: TicTacToe::new(settings.rng()),
        }
    }

    pub fn game(&self) -> &TicTacToe {
        &self.game
    }

    fn status(&self) -> (&'static str, CellStyle) {
        match self.game.phase() {
            Phase::HumanTurn => ("Your turn (X): press 1-9", TEXT),
            Phase::AiThinking => ("Computer is thinking...", DIM),
            Phase::Over(Outcome::Win(Mark::X, _)) => ("You win!", WIN_STYLE),
            Phase::Over(Outcome::Win(Mark::O, _)) => ("Computer wins!", O_STYLE),
            Phase::Over(Outcome::Tie) => ("It's a tie!", TITLE),
        }
    }
}

impl Toy for TicTacToeToy {
    fn name(&self) -> &'static str {
        "tictactoe"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(100)
    }

    fn update(&mut self, event: InputEvent, tick: Tick) -> Flow {
        if let Some(d @ 1..=9) = event.digit() {
            self.game.play(d as usize - 1);
        } else if event.is_char_ignore_case('r') {
            self.game.restart();
        }
        if !tick.is_paused() && self.game.tick(millis(tick.dt)) {
            tracing::debug!(phase = ?self.game.phase(), "computer moved");
        }
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        let mut fb = blank(ctx.viewport);
        fb.put_centered(0, "Tic-Tac-Toe", TITLE);
        fb.put_centered(1, "You: X   Computer: O", DIM);

        let x = fb.width().saturating_sub(GRID_W) / 2;
        let origin = draw_grid(&mut fb, ctx.glyphs, (x, 3), (3, 3), CELL_W, FRAME);
        let winning = self.game.winning_line();

        for (i, cell) in self.game.grid().iter().enumerate() {
            let (cx, cy) = grid_cell(origin, (i % 3) as u16, (i / 3) as u16, CELL_W);
            let mid = cx + CELL_W / 2;
            let highlighted = winning.is_some_and(|line| line.contains(&i));
            match cell {
                Some(mark) => {
                    let style = if highlighted {
                        WIN_STYLE
                    } else if *mark == Mark::X {
                        X_STYLE
                    } else {
                        O_STYLE
                    };
                    fb.put_char(mid, cy, mark.symbol(), style);
                }
                None => {
                    let digit = char::from_digit(i as u32 + 1, 10).unwrap_or(' ');
                    fb.put_char(mid, cy, digit, DIM);
                }
            }
        }

        let (text, style) = self.status();
        fb.put_centered(11, text, style);
        fb.put_centered(13, "1-9 play  R restart  Q quit", DIM);
        fb
    }
}
