//! 2048 sliding tile rules on a 4x4 board.

use crate::rng::SimpleRng;
use crate::types::Arrow;

pub const SIZE: usize = 4;
pub const WIN_TILE: u32 = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Playing,
    /// Reached 2048; play resumes with [`Game2048::continue_playing`].
    Won,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct Game2048 {
    board: [[u32; SIZE]; SIZE],
    score: u32,
    moves: u32,
    status: Status,
    /// Set once the player chose to keep going after a win.
    continued: bool,
    rng: SimpleRng,
}

impl Game2048 {
    /// New game with two starting tiles.
    pub fn new(rng: SimpleRng) -> Self {
        let mut game = Self::from_board([[0; SIZE]; SIZE], rng);
        game.spawn_tile();
        game.spawn_tile();
        game
    }

    /// Game on a fixed board, no tiles added.
    pub fn from_board(board: [[u32; SIZE]; SIZE], rng: SimpleRng) -> Self {
        Self {
            board,
            score: 0,
            moves: 0,
            status: Status::Playing,
            continued: false,
            rng,
        }
    }

    pub fn board(&self) -> &[[u32; SIZE]; SIZE] {
        &self.board
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn continue_playing(&mut self) {
        if self.status == Status::Won {
            self.continued = true;
            self.status = if self.has_moves() {
                Status::Playing
            } else {
                Status::GameOver
            };
        }
    }

    /// Place a 2 (90%) or 4 on a random empty cell.
    pub fn spawn_tile(&mut self) -> bool {
        let mut empty = Vec::with_capacity(SIZE * SIZE);
        for (r, row) in self.board.iter().enumerate() {
            for (c, v) in row.iter().enumerate() {
                if *v == 0 {
                    empty.push((r, c));
                }
            }
        }
        let Some(&(r, c)) = self.rng.choose(&empty) else {
            return false;
        };
        self.board[r][c] = if self.rng.chance(0.9) { 2 } else { 4 };
        true
    }

    /// Slide towards `dir`. Returns whether any tile moved.
    ///
    /// A move that changes the board spawns one tile and may end the game.
    pub fn slide(&mut self, dir: Arrow) -> bool {
        if self.status != Status::Playing {
            return false;
        }
        let before = self.board;
        for i in 0..SIZE {
            let mut line = self.read_line(dir, i);
            self.score += slide_line(&mut line);
            self.write_line(dir, i, line);
        }
        if self.board == before {
            return false;
        }

        self.moves += 1;
        self.spawn_tile();
        if !self.continued && self.max_tile() >= WIN_TILE {
            self.status = Status::Won;
        } else if !self.has_moves() {
            self.status = Status::GameOver;
        }
        true
    }

    pub fn max_tile(&self) -> u32 {
        self.board.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Any empty cell or any orthogonally adjacent equal pair.
    pub fn has_moves(&self) -> bool {
        for r in 0..SIZE {
            for c in 0..SIZE {
                let v = self.board[r][c];
                if v == 0 {
                    return true;
                }
                if c + 1 < SIZE && self.board[r][c + 1] == v {
                    return true;
                }
                if r + 1 < SIZE && self.board[r + 1][c] == v {
                    return true;
                }
            }
        }
        false
    }

    // Lines are read so that index 0 is the edge tiles slide towards.
    fn read_line(&self, dir: Arrow, i: usize) -> [u32; SIZE] {
        let mut line = [0; SIZE];
        for (k, slot) in line.iter_mut().enumerate() {
            let (r, c) = line_cell(dir, i, k);
            *slot = self.board[r][c];
        }
        line
    }

    fn write_line(&mut self, dir: Arrow, i: usize, line: [u32; SIZE]) {
        for (k, v) in line.into_iter().enumerate() {
            let (r, c) = line_cell(dir, i, k);
            self.board[r][c] = v;
        }
    }
}

fn line_cell(dir: Arrow, i: usize, k: usize) -> (usize, usize) {
    match dir {
        Arrow::Left => (i, k),
        Arrow::Right => (i, SIZE - 1 - k),
        Arrow::Up => (k, i),
        Arrow::Down => (SIZE - 1 - k, i),
    }
}

/// Compact towards index 0, merging each equal pair once. Returns the merge
/// score.
pub fn slide_line(line: &mut [u32; SIZE]) -> u32 {
    let tiles: Vec<u32> = line.iter().copied().filter(|v| *v != 0).collect();
    let mut out = [0; SIZE];
    let mut score = 0;
    let mut n = 0;
    let mut i = 0;
    while i < tiles.len() {
        if i + 1 < tiles.len() && tiles[i] == tiles[i + 1] {
            out[n] = tiles[i] * 2;
            score += out[n];
            i += 2;
        } else {
            out[n] = tiles[i];
            i += 1;
        }
        n += 1;
    }
    *line = out;
    score
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_line_merges_once() {
        let mut line = [2, 2, 2, 2];
        assert_eq!(slide_line(&mut line), 8);
        assert_eq!(line, [4, 4, 0, 0]);

        let mut line = [0, 2, 0, 2];
        assert_eq!(slide_line(&mut line), 4);
        assert_eq!(line, [4, 0, 0, 0]);

        let mut line = [4, 4, 8, 0];
        assert_eq!(slide_line(&mut line), 8);
        assert_eq!(line, [8, 8, 0, 0]);

        let mut line = [2, 4, 8, 16];
        assert_eq!(slide_line(&mut line), 0);
        assert_eq!(line, [2, 4, 8, 16]);
    }

    #[test]
    fn test_new_game_has_two_tiles() {
        let game = Game2048::new(SimpleRng::new(5));
        let tiles: Vec<_> = game.board().iter().flatten().filter(|v| **v != 0).collect();
        assert_eq!(tiles.len(), 2);
        assert!(tiles.iter().all(|v| **v == 2 || **v == 4));
    }

    #[test]
    fn test_slide_right_scores_and_spawns() {
        let board = [[2, 2, 0, 0], [0; 4], [0; 4], [0; 4]];
        let mut game = Game2048::from_board(board, SimpleRng::new(1));
        assert!(game.slide(Arrow::Right));
        assert_eq!(game.board()[0][3], 4);
        assert_eq!(game.score(), 4);
        assert_eq!(game.moves(), 1);
        let tiles = game.board().iter().flatten().filter(|v| **v != 0).count();
        assert_eq!(tiles, 2);
    }

    #[test]
    fn test_slide_up_and_down_use_columns() {
        let board = [[2, 0, 0, 0], [2, 0, 0, 0], [4, 0, 0, 0], [0; 4]];
        let mut game = Game2048::from_board(board, SimpleRng::new(1));
        game.slide(Arrow::Down);
        assert_eq!(game.board()[3][0], 4);
        assert_eq!(game.board()[2][0], 4);
        assert_eq!(game.score(), 4);
    }

    #[test]
    fn test_no_op_move_does_not_spawn() {
        let board = [[2, 4, 0, 0], [0; 4], [0; 4], [0; 4]];
        let mut game = Game2048::from_board(board, SimpleRng::new(1));
        assert!(!game.slide(Arrow::Left));
        assert!(!game.slide(Arrow::Up));
        assert_eq!(game.moves(), 0);
    }

    #[test]
    fn test_game_over_when_full_without_pairs() {
        let board = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]];
        let game = Game2048::from_board(board, SimpleRng::new(1));
        assert!(!game.has_moves());

        let board = [[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 4]];
        let game = Game2048::from_board(board, SimpleRng::new(1));
        assert!(game.has_moves());
    }

    #[test]
    fn test_win_then_continue() {
        let board = [[1024, 1024, 0, 0], [0; 4], [0; 4], [0; 4]];
        let mut game = Game2048::from_board(board, SimpleRng::new(1));
        game.slide(Arrow::Left);
        assert_eq!(game.status(), Status::Won);
        assert!(!game.slide(Arrow::Right));

        game.continue_playing();
        assert_eq!(game.status(), Status::Playing);
        game.slide(Arrow::Right);
        assert_ne!(game.status(), Status::Won);
    }
}
