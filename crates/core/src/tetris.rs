//! Tetris rules: 10x20 board, seven pieces, clockwise matrix rotation, classic
//! line scores.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19
//! (top to bottom). Pieces may sit partly above the board (negative y).

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;

pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;
const BOARD_SIZE: usize = BOARD_WIDTH * BOARD_HEIGHT;

/// Points for 1..=4 cleared lines, multiplied by the level.
pub const LINE_SCORES: [u32; 4] = [40, 100, 300, 1200];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    fn rows(self) -> &'static [&'static str] {
        match self {
            PieceKind::I => &["####"],
            PieceKind::O => &["##", "##"],
            PieceKind::T => &[".#.", "###"],
            PieceKind::S => &[".##", "##."],
            PieceKind::Z => &["##.", ".##"],
            PieceKind::J => &["#..", "###"],
            PieceKind::L => &["..#", "###"],
        }
    }
}

/// Piece matrix, at most 4x4.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    w: u8,
    h: u8,
    bits: [[bool; 4]; 4],
}

impl Shape {
    pub fn of(kind: PieceKind) -> Self {
        let rows = kind.rows();
        let mut bits = [[false; 4]; 4];
        let mut w = 0;
        for (r, row) in rows.iter().enumerate() {
            w = w.max(row.len());
            for (c, ch) in row.chars().enumerate() {
                bits[r][c] = ch == '#';
            }
        }
        Self {
            w: w as u8,
            h: rows.len() as u8,
            bits,
        }
    }

    pub fn width(&self) -> i32 {
        self.w as i32
    }

    pub fn height(&self) -> i32 {
        self.h as i32
    }

    /// Rotate 90 degrees clockwise: new\[r\]\[c\] = old\[h-1-c\]\[r\].
    pub fn rotated_cw(&self) -> Self {
        let mut bits = [[false; 4]; 4];
        for (r, row) in bits.iter_mut().enumerate().take(self.w as usize) {
            for (c, bit) in row.iter_mut().enumerate().take(self.h as usize) {
                *bit = self.bits[self.h as usize - 1 - c][r];
            }
        }
        Self {
            w: self.h,
            h: self.w,
            bits,
        }
    }

    /// Filled cells as (dx, dy) offsets.
    pub fn cells(&self) -> ArrayVec<(i32, i32), 4> {
        let mut out = ArrayVec::new();
        for r in 0..self.h as usize {
            for c in 0..self.w as usize {
                if self.bits[r][c] && !out.is_full() {
                    out.push((c as i32, r as i32));
                }
            }
        }
        out
    }
}

/// A piece in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Spawn centred at the top of the board.
    pub fn spawn(kind: PieceKind) -> Self {
        let shape = Shape::of(kind);
        Self {
            kind,
            shape,
            x: BOARD_WIDTH as i32 / 2 - shape.width() / 2,
            y: 0,
        }
    }

    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }
}

pub type Cell = Option<PieceKind>;

/// The game board - flat row-major storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i32, y: i32) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return None;
        }
        Some(y as usize * BOARD_WIDTH + x as usize)
    }

    /// Cell at (x, y); `None` when out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        Self::index(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece cell may occupy (x, y). Cells above the board are free.
    pub fn is_free(&self, x: i32, y: i32) -> bool {
        if x < 0 || x >= BOARD_WIDTH as i32 || y >= BOARD_HEIGHT as i32 {
            return false;
        }
        y < 0 || matches!(self.get(x, y), Some(None))
    }

    pub fn fits(&self, piece: &Piece) -> bool {
        piece.cells().all(|(x, y)| self.is_free(x, y))
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= BOARD_HEIGHT {
            return false;
        }
        let start = y * BOARD_WIDTH;
        self.cells[start..start + BOARD_WIDTH].iter().all(|c| c.is_some())
    }

    /// Clear all full rows and return their indices (bottom to top).
    ///
    /// Two-pointer compaction, no allocation.
    pub fn clear_full_rows(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        let mut write_y = BOARD_HEIGHT;

        for read_y in (0..BOARD_HEIGHT).rev() {
            if self.is_row_full(read_y) {
                // A single lock can fill at most four rows.
                if !cleared.is_full() {
                    cleared.push(read_y);
                }
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * BOARD_WIDTH;
                    self.cells.copy_within(src..src + BOARD_WIDTH, write_y * BOARD_WIDTH);
                }
            }
        }

        for cell in &mut self.cells[..write_y * BOARD_WIDTH] {
            *cell = None;
        }
        cleared
    }

    /// Write the piece's cells into the board. Cells above the top are lost.
    pub fn lock(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            self.set(x, y, Some(piece.kind));
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Score for clearing `lines` rows at `level`.
pub fn line_score(lines: usize, level: u32) -> u32 {
    if lines == 0 {
        return 0;
    }
    LINE_SCORES[lines.min(4) - 1] * level
}

/// Gravity interval: 1000ms at level 1, 100ms less per level, floor 100ms.
pub fn fall_interval_ms(level: u32) -> u32 {
    1000u32.saturating_sub(level.saturating_sub(1) * 100).max(100)
}

#[derive(Debug, Clone)]
pub struct Tetris {
    board: Board,
    current: Piece,
    next: PieceKind,
    score: u32,
    lines: u32,
    level: u32,
    fall_timer_ms: u32,
    game_over: bool,
    rng: SimpleRng,
}

impl Tetris {
    pub fn new(mut rng: SimpleRng) -> Self {
        let first = random_kind(&mut rng);
        let next = random_kind(&mut rng);
        Self {
            board: Board::new(),
            current: Piece::spawn(first),
            next,
            score: 0,
            lines: 0,
            level: 1,
            fall_timer_ms: 0,
            game_over: false,
            rng,
        }
    }

    /// Fresh game continuing the same random stream.
    pub fn restart(&mut self) {
        let rng = self.rng.clone();
        *self = Self::new(rng);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn next(&self) -> PieceKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn fall_interval_ms(&self) -> u32 {
        fall_interval_ms(self.level)
    }

    fn try_place(&mut self, piece: Piece) -> bool {
        if self.board.fits(&piece) {
            self.current = piece;
            true
        } else {
            false
        }
    }

    pub fn shift(&mut self, dx: i32) -> bool {
        if self.game_over {
            return false;
        }
        let moved = Piece {
            x: self.current.x + dx,
            ..self.current
        };
        self.try_place(moved)
    }

    /// Rotate clockwise in place; no wall kicks.
    pub fn rotate(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let rotated = Piece {
            shape: self.current.shape.rotated_cw(),
            ..self.current
        };
        self.try_place(rotated)
    }

    /// Move down one row, locking the piece when it cannot.
    /// Returns whether the piece moved.
    pub fn soft_drop(&mut self) -> bool {
        if self.game_over {
            return false;
        }
        let lowered = Piece {
            y: self.current.y + 1,
            ..self.current
        };
        if self.try_place(lowered) {
            true
        } else {
            self.lock_current();
            false
        }
    }

    pub fn hard_drop(&mut self) {
        if self.game_over {
            return;
        }
        while self.soft_drop() {}
    }

    fn lock_current(&mut self) {
        self.board.lock(&self.current);
        let cleared = self.board.clear_full_rows().len();
        if cleared > 0 {
            self.score += line_score(cleared, self.level);
            self.lines += cleared as u32;
            self.level = 1 + self.lines / 10;
        }

        self.current = Piece::spawn(self.next);
        self.next = random_kind(&mut self.rng);
        self.fall_timer_ms = 0;
        if !self.board.fits(&self.current) {
            self.game_over = true;
        }
    }

    /// Apply gravity. Returns whether the piece fell or locked.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }
        self.fall_timer_ms += elapsed_ms;
        if self.fall_timer_ms < self.fall_interval_ms() {
            return false;
        }
        self.fall_timer_ms = 0;
        self.soft_drop();
        true
    }

    #[cfg(test)]
    fn set_current(&mut self, kind: PieceKind) {
        self.current = Piece::spawn(kind);
    }
}

fn random_kind(rng: &mut SimpleRng) -> PieceKind {
    PieceKind::ALL[rng.index(PieceKind::ALL.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, y: i32, gap: Option<i32>) {
        for x in 0..BOARD_WIDTH as i32 {
            if Some(x) != gap {
                board.set(x, y, Some(PieceKind::O));
            }
        }
    }

    #[test]
    fn test_rotation_is_clockwise() {
        // .#.      #.
        // ###  ->  ##
        //          #.
        let t = Shape::of(PieceKind::T).rotated_cw();
        assert_eq!((t.width(), t.height()), (2, 3));
        let cells: Vec<_> = t.cells().into_iter().collect();
        assert_eq!(cells, vec![(0, 0), (0, 1), (1, 1), (0, 2)]);

        let i = Shape::of(PieceKind::I).rotated_cw();
        assert_eq!((i.width(), i.height()), (1, 4));
    }

    #[test]
    fn test_four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let s = Shape::of(kind);
            let back = s.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(s, back, "{kind:?}");
        }
    }

    #[test]
    fn test_spawn_is_centred() {
        assert_eq!(Piece::spawn(PieceKind::I).x, 3);
        assert_eq!(Piece::spawn(PieceKind::O).x, 4);
        assert_eq!(Piece::spawn(PieceKind::T).x, 4);
    }

    #[test]
    fn test_clear_full_rows_compacts() {
        let mut board = Board::new();
        fill_row(&mut board, 19, None);
        fill_row(&mut board, 18, Some(0));
        fill_row(&mut board, 17, None);
        board.set(5, 16, Some(PieceKind::T));

        let cleared = board.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[19, 17]);
        assert_eq!(board.get(5, 18), Some(Some(PieceKind::T)));
        assert_eq!(board.get(0, 19), Some(None));
        assert_eq!(board.get(1, 19), Some(Some(PieceKind::O)));
    }

    #[test]
    fn test_line_scores_and_levels() {
        assert_eq!(line_score(1, 1), 40);
        assert_eq!(line_score(2, 1), 100);
        assert_eq!(line_score(3, 2), 600);
        assert_eq!(line_score(4, 3), 3600);
        assert_eq!(fall_interval_ms(1), 1000);
        assert_eq!(fall_interval_ms(4), 700);
        assert_eq!(fall_interval_ms(15), 100);
    }

    #[test]
    fn test_hard_drop_clears_a_tetris() {
        let mut game = Tetris::new(SimpleRng::new(2));
        for y in 16..20 {
            fill_row(&mut game.board, y, Some(0));
        }
        game.set_current(PieceKind::I);
        assert!(game.rotate());
        // Vertical I sits in column 3 after spawn; walk it to column 0.
        while game.shift(-1) {}
        assert_eq!(game.current().x, 0);
        game.hard_drop();
        assert_eq!(game.lines(), 4);
        assert_eq!(game.score(), 1200);
        assert!(game.board().cells().iter().all(|c| c.is_none()));
    }

    #[test]
    fn test_walls_block_shifts() {
        let mut game = Tetris::new(SimpleRng::new(2));
        game.set_current(PieceKind::O);
        for _ in 0..20 {
            game.shift(1);
        }
        assert_eq!(game.current().x, BOARD_WIDTH as i32 - 2);
    }

    #[test]
    fn test_gravity_follows_interval() {
        let mut game = Tetris::new(SimpleRng::new(2));
        let y = game.current().y;
        assert!(!game.tick(999));
        assert!(game.tick(1));
        assert_eq!(game.current().y, y + 1);
    }

    #[test]
    fn test_blocked_spawn_is_game_over() {
        let mut game = Tetris::new(SimpleRng::new(2));
        for y in 0..BOARD_HEIGHT as i32 {
            board_fill_column_pair(&mut game.board, y);
        }
        game.hard_drop();
        assert!(game.is_game_over());
        assert!(!game.shift(1));

        game.restart();
        assert!(!game.is_game_over());
        assert_eq!(game.score(), 0);
    }

    fn board_fill_column_pair(board: &mut Board, y: i32) {
        for x in 3..7 {
            board.set(x, y, Some(PieceKind::Z));
        }
    }
}
