//! Tic-tac-toe: human X against a minimax O.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;

/// Delay before the computer answers a human move.
pub const AI_DELAY_MS: u32 = 500;

pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Opening squares for the computer on an empty board.
const OPENINGS: [usize; 5] = [0, 2, 4, 6, 8];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

pub type Grid = [Option<Mark>; 9];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Mark, [usize; 3]),
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    HumanTurn,
    AiThinking,
    Over(Outcome),
}

/// First completed line on `grid`.
pub fn winner(grid: &Grid) -> Option<(Mark, [usize; 3])> {
    LINES.iter().find_map(|line| {
        let [a, b, c] = *line;
        match grid[a] {
            Some(m) if grid[b] == Some(m) && grid[c] == Some(m) => Some((m, *line)),
            _ => None,
        }
    })
}

fn empty_squares(grid: &Grid) -> ArrayVec<usize, 9> {
    (0..9).filter(|i| grid[*i].is_none()).collect()
}

fn outcome(grid: &Grid) -> Option<Outcome> {
    if let Some((m, line)) = winner(grid) {
        return Some(Outcome::Win(m, line));
    }
    if grid.iter().all(|c| c.is_some()) {
        return Some(Outcome::Tie);
    }
    None
}

/// Minimax score from O's point of view: `10 - depth` for an O win,
/// `depth - 10` for an X win, 0 for a tie.
pub fn minimax(grid: &mut Grid, depth: i32, maximizing: bool) -> i32 {
    match winner(grid) {
        Some((Mark::O, _)) => return 10 - depth,
        Some((Mark::X, _)) => return depth - 10,
        None => {}
    }
    let empty = empty_squares(grid);
    if empty.is_empty() {
        return 0;
    }

    let (mark, mut best) = if maximizing {
        (Mark::O, i32::MIN)
    } else {
        (Mark::X, i32::MAX)
    };
    for i in empty {
        grid[i] = Some(mark);
        let score = minimax(grid, depth + 1, !maximizing);
        grid[i] = None;
        best = if maximizing { best.max(score) } else { best.min(score) };
    }
    best
}

/// Best square for O; ties go to the lowest index.
pub fn best_move(grid: &Grid) -> Option<usize> {
    let mut work = *grid;
    let mut best: Option<(usize, i32)> = None;
    for i in empty_squares(grid) {
        work[i] = Some(Mark::O);
        let score = minimax(&mut work, 0, false);
        work[i] = None;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((i, score));
        }
    }
    best.map(|(i, _)| i)
}

#[derive(Debug, Clone)]
pub struct TicTacToe {
    grid: Grid,
    phase: Phase,
    ai_timer_ms: u32,
    rng: SimpleRng,
}

impl TicTacToe {
    pub fn new(rng: SimpleRng) -> Self {
        Self {
            grid: [None; 9],
            phase: Phase::HumanTurn,
            ai_timer_ms: 0,
            rng,
        }
    }

    pub fn restart(&mut self) {
        self.grid = [None; 9];
        self.phase = Phase::HumanTurn;
        self.ai_timer_ms = 0;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winning_line(&self) -> Option<[usize; 3]> {
        match self.phase {
            Phase::Over(Outcome::Win(_, line)) => Some(line),
            _ => None,
        }
    }

    /// Human plays square `pos` (0-based). Returns whether the move was taken.
    pub fn play(&mut self, pos: usize) -> bool {
        if self.phase != Phase::HumanTurn || pos >= 9 || self.grid[pos].is_some() {
            return false;
        }
        self.grid[pos] = Some(Mark::X);
        self.phase = match outcome(&self.grid) {
            Some(o) => Phase::Over(o),
            None => {
                self.ai_timer_ms = 0;
                Phase::AiThinking
            }
        };
        true
    }

    /// Computer's choice for the current grid.
    pub fn ai_choice(&mut self) -> Option<usize> {
        if self.grid.iter().all(|c| c.is_none()) {
            return self.rng.choose(&OPENINGS).copied();
        }
        best_move(&self.grid)
    }

    /// Let the computer move once its delay has passed. Returns whether it moved.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.phase != Phase::AiThinking {
            return false;
        }
        self.ai_timer_ms += elapsed_ms;
        if self.ai_timer_ms < AI_DELAY_MS {
            return false;
        }
        let Some(pos) = self.ai_choice() else {
            return false;
        };
        self.grid[pos] = Some(Mark::O);
        self.phase = match outcome(&self.grid) {
            Some(o) => Phase::Over(o),
            None => Phase::HumanTurn,
        };
        true
    }
}
