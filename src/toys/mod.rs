//! The toys: key bindings and drawing on top of the rules in `core`.
//!
//! Every toy draws a full frame each tick. Toys with a playfield share the
//! same layout: a single box around the field, the title in the top border
//! and one or two status lines under the box.

use std::time::Duration;

use crate::term::{BoxKind, CellStyle, Color, FrameBuffer, Glyphs, Viewport};

pub mod ball;
pub mod clock;
pub mod fire;
pub mod game_2048;
pub mod life;
pub mod matrix;
pub mod paint;
pub mod pipes;
pub mod snake;
pub mod tetris;
pub mod tictactoe;

pub use ball::BouncingBall;
pub use clock::Clock;
pub use fire::FireToy;
pub use game_2048::Game2048Toy;
pub use life::LifeToy;
pub use matrix::MatrixRain;
pub use paint::Paint;
pub use pipes::PipesToy;
pub use snake::SnakeToy;
pub use tetris::TetrisToy;
pub use tictactoe::TicTacToeToy;

/// Status lines drawn under a boxed field.
pub(crate) const STATUS_LINES: u16 = 2;

pub(crate) const TEXT: CellStyle = CellStyle::fg(Color::Default);
pub(crate) const DIM: CellStyle = CellStyle::fg(Color::Gray);
pub(crate) const TITLE: CellStyle = CellStyle::fg(Color::BrightCyan).bold();
pub(crate) const FRAME: CellStyle = CellStyle::fg(Color::Cyan);

/// Eight-entry palette shared by toys that color by index.
pub(crate) const PALETTE: [Color; 8] = [
    Color::Red,
    Color::Green,
    Color::Yellow,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::White,
    Color::Gray,
];

pub(crate) fn palette(index: u8) -> Color {
    PALETTE[index as usize % PALETTE.len()]
}

/// Milliseconds of a tick delta, saturating.
pub(crate) fn millis(dt: Duration) -> u32 {
    dt.as_millis().min(u32::MAX as u128) as u32
}

/// Inner size of a boxed field that fits `viewport` with its status lines.
pub(crate) fn field_size(viewport: Viewport) -> (usize, usize) {
    let w = viewport.width.saturating_sub(2).max(1);
    let h = viewport.height.saturating_sub(2 + STATUS_LINES).max(1);
    (w as usize, h as usize)
}

/// Blank frame of the viewport's size.
pub(crate) fn blank(viewport: Viewport) -> FrameBuffer {
    FrameBuffer::new(viewport.width, viewport.height)
}

/// Box around a `w`×`h` field at the origin with `title` in the top border.
pub(crate) fn draw_field(fb: &mut FrameBuffer, glyphs: &Glyphs, w: usize, h: usize, title: &str) {
    glyphs.draw_box(fb, BoxKind::Single, 0, 0, w as u16 + 2, h as u16 + 2, FRAME);
    fb.put_str(2, 0, &format!(" {title} "), TITLE);
}

/// Grid of `cols`×`rows` one-line cells, each `cell_w` wide, with its top-left
/// corner at `(x, y)`. Returns the position of cell `(0, 0)`'s content.
pub(crate) fn draw_grid(
    fb: &mut FrameBuffer,
    glyphs: &Glyphs,
    (x, y): (u16, u16),
    (cols, rows): (u16, u16),
    cell_w: u16,
    style: CellStyle,
) -> (u16, u16) {
    let b = glyphs.single;
    let pitch = cell_w + 1;
    for r in 0..=rows {
        let (left, mid, right) = if r == 0 {
            (b.top_left, glyphs.tee_down, b.top_right)
        } else if r == rows {
            (b.bottom_left, glyphs.tee_up, b.bottom_right)
        } else {
            (glyphs.tee_right, glyphs.cross, glyphs.tee_left)
        };
        let ly = y + 2 * r;
        for c in 0..=cols {
            let cx = x + c * pitch;
            let ch = if c == 0 {
                left
            } else if c == cols {
                right
            } else {
                mid
            };
            fb.put_char(cx, ly, ch, style);
            if c < cols {
                for dx in 1..pitch {
                    fb.put_char(cx + dx, ly, b.horizontal, style);
                }
            }
            if r < rows {
                fb.put_char(cx, ly + 1, b.vertical, style);
            }
        }
    }
    (x + 1, y + 1)
}

/// Content origin of cell `(col, row)` in a grid drawn by [`draw_grid`].
pub(crate) fn grid_cell(origin: (u16, u16), col: u16, row: u16, cell_w: u16) -> (u16, u16) {
    (origin.0 + col * (cell_w + 1), origin.1 + 2 * row)
}

/// Centred banner over the middle of the frame.
pub(crate) fn banner(fb: &mut FrameBuffer, text: &str, style: CellStyle) {
    let y = fb.height() / 2;
    fb.put_centered(y, &format!(" {text} "), style);
}
