use crate::config::Settings;
use crate::core::tetris::{PieceKind, Shape, Tetris, BOARD_HEIGHT, BOARD_WIDTH};
use crate::engine::{DrawContext, Flow, LoopConfig, Tick, Toy};
use crate::term::{BoxKind, CellStyle, Color, FrameBuffer};
use crate::types::{Arrow, InputEvent, TerminalMode};

use super::{banner, blank, millis, DIM, FRAME, TEXT, TITLE};

const PANEL_X: u16 = BOARD_WIDTH as u16 * 2 + 4;

fn piece_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Cyan,
        PieceKind::O => Color::Yellow,
        PieceKind::T => Color::Magenta,
        PieceKind::S => Color::Green,
        PieceKind::Z => Color::Red,
        PieceKind::J => Color::Blue,
        PieceKind::L => Color::BrightYellow,
    }
}

/// Two characters per board cell so blocks look square.
fn block_chars(ctx: &DrawContext) -> [char; 2] {
    match ctx.mode {
        TerminalMode::NativeAnsi => [ctx.glyphs.block; 2],
        TerminalMode::DegradedAscii => ['[', ']'],
    }
}

fn put_block(fb: &mut FrameBuffer, x: u16, y: u16, chars: [char; 2], style: CellStyle) {
    fb.put_char(x, y, chars[0], style);
    fb.put_char(x + 1, y, chars[1], style);
}

pub struct TetrisToy {
    game: Tetris,
}

impl TetrisToy {
    pub fn new(settings: &Settings) -> Self {
        Self {
            game: Tetris::new(settings.rng()),
        }
    }

    pub fn game(&self) -> &Tetris {
        &self.game
    }
}

impl Toy for TetrisToy {
    fn name(&self) -> &'static str {
        "tetris"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(20).pause_keys(&['p', 'P'])
    }

    fn update(&mut self, event: InputEvent, tick: Tick) -> Flow {
        if tick.is_paused() {
            return Flow::Continue;
        }
        if self.game.is_game_over() {
            if event.is_char_ignore_case('r') {
                self.game.restart();
            }
            return Flow::Continue;
        }

        match event {
            InputEvent::Arrow(Arrow::Left) => {
                self.game.shift(-1);
            }
            InputEvent::Arrow(Arrow::Right) => {
                self.game.shift(1);
            }
            InputEvent::Arrow(Arrow::Up) => {
                self.game.rotate();
            }
            InputEvent::Arrow(Arrow::Down) => {
                self.game.soft_drop();
            }
            InputEvent::Char(' ') => self.game.hard_drop(),
            _ => {}
        }
        self.game.tick(millis(tick.dt));
        if self.game.is_game_over() {
            tracing::info!(score = self.game.score(), lines = self.game.lines(), "tetris game over");
        }
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        let mut fb = blank(ctx.viewport);
        let chars = block_chars(ctx);
        let board_w = BOARD_WIDTH as u16 * 2 + 2;
        let board_h = BOARD_HEIGHT as u16 + 2;
        ctx.glyphs.draw_box(&mut fb, BoxKind::Double, 0, 0, board_w, board_h, FRAME);

        let board = self.game.board();
        for y in 0..BOARD_HEIGHT as i32 {
            for x in 0..BOARD_WIDTH as i32 {
                let (cx, cy) = (1 + x as u16 * 2, 1 + y as u16);
                match board.get(x, y).flatten() {
                    Some(kind) => put_block(&mut fb, cx, cy, chars, CellStyle::fg(piece_color(kind))),
                    None => fb.put_char(cx, cy, ctx.glyphs.dot, DIM),
                }
            }
        }
        if !self.game.is_game_over() {
            let piece = self.game.current();
            let style = CellStyle::fg(piece_color(piece.kind)).bold();
            for (x, y) in piece.cells().filter(|&(_, y)| y >= 0) {
                put_block(&mut fb, 1 + x as u16 * 2, 1 + y as u16, chars, style);
            }
        }

        fb.put_str(PANEL_X, 1, "TETRIS", TITLE);
        fb.put_str(PANEL_X, 3, &format!("Score: {}", self.game.score()), TEXT);
        fb.put_str(PANEL_X, 4, &format!("Lines: {}", self.game.lines()), TEXT);
        fb.put_str(PANEL_X, 5, &format!("Level: {}", self.game.level()), TEXT);
        fb.put_str(PANEL_X, 7, "Next:", TEXT);
        let next = self.game.next();
        let style = CellStyle::fg(piece_color(next));
        for (dx, dy) in Shape::of(next).cells() {
            put_block(&mut fb, PANEL_X + dx as u16 * 2, 8 + dy as u16, chars, style);
        }
        for (i, line) in [
            "Left/Right move",
            "Up rotate",
            "Down soft drop",
            "Space hard drop",
            "P pause  Q quit",
        ]
        .iter()
        .enumerate()
        {
            fb.put_str(PANEL_X, 13 + i as u16, line, DIM);
        }

        if self.game.is_game_over() {
            banner(&mut fb, "GAME OVER  R restart", CellStyle::fg(Color::BrightRed).bold().reverse());
        } else if ctx.is_paused() {
            banner(&mut fb, "PAUSED  P resume", CellStyle::fg(Color::BrightYellow).bold().reverse());
        }
        fb
    }
}
