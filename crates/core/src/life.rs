//! Conway's Game of Life on a bounded grid (B3/S23).
//!
//! Cells outside the grid count as dead. The grid advances one generation per
//! [`GENERATION_MS`] while playing; while paused the cursor edits cells.

use crate::rng::SimpleRng;
use crate::types::Arrow;

pub const GENERATION_MS: u32 = 100;

/// Density used by [`Life::randomize`].
pub const RANDOM_FILL: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    Glider,
    Blinker,
    Toad,
    Beacon,
    Pulsar,
}

impl Pattern {
    /// Pattern bound to keys `1..=5`.
    pub fn from_digit(d: u8) -> Option<Self> {
        match d {
            1 => Some(Pattern::Glider),
            2 => Some(Pattern::Blinker),
            3 => Some(Pattern::Toad),
            4 => Some(Pattern::Beacon),
            5 => Some(Pattern::Pulsar),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Pattern::Glider => "Glider",
            Pattern::Blinker => "Blinker",
            Pattern::Toad => "Toad",
            Pattern::Beacon => "Beacon",
            Pattern::Pulsar => "Pulsar",
        }
    }

    /// Rows of the pattern, `#` alive.
    pub fn rows(self) -> &'static [&'static str] {
        match self {
            Pattern::Glider => &[".#.", "..#", "###"],
            Pattern::Blinker => &["#", "#", "#"],
            Pattern::Toad => &[".###", "###."],
            Pattern::Beacon => &["##..", "##..", "..##", "..##"],
            Pattern::Pulsar => &[
                "..###...###..",
                ".............",
                "#....#.#....#",
                "#....#.#....#",
                "#....#.#....#",
                "..###...###..",
                ".............",
                "..###...###..",
                "#....#.#....#",
                "#....#.#....#",
                "#....#.#....#",
                ".............",
                "..###...###..",
            ],
        }
    }
}

#[derive(Debug, Clone)]
pub struct Life {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    scratch: Vec<bool>,
    cursor: (usize, usize),
    playing: bool,
    generation: u64,
    step_timer_ms: u32,
}

impl Life {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![false; width * height],
            scratch: vec![false; width * height],
            cursor: (width / 2, height / 2),
            playing: false,
            generation: 0,
            step_timer_ms: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cursor(&self) -> (usize, usize) {
        self.cursor
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, alive: bool) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = alive;
        }
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
        self.step_timer_ms = 0;
    }

    pub fn toggle_at_cursor(&mut self) {
        let (x, y) = self.cursor;
        let alive = self.is_alive(x, y);
        self.set(x, y, !alive);
    }

    /// Cursor moves are ignored while playing.
    pub fn move_cursor(&mut self, dir: Arrow) {
        if self.playing {
            return;
        }
        let (dx, dy) = dir.delta();
        let x = (self.cursor.0 as i64 + dx as i64).clamp(0, self.width as i64 - 1);
        let y = (self.cursor.1 as i64 + dy as i64).clamp(0, self.height as i64 - 1);
        self.cursor = (x as usize, y as usize);
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
        self.generation = 0;
    }

    pub fn randomize(&mut self, rng: &mut SimpleRng) {
        for cell in &mut self.cells {
            *cell = rng.chance(RANDOM_FILL);
        }
        self.generation = 0;
    }

    /// Stamp `pattern` centred on the cursor, clipped to the grid.
    pub fn place(&mut self, pattern: Pattern) {
        let rows = pattern.rows();
        let ph = rows.len() as i64;
        let pw = rows.first().map(|r| r.len()).unwrap_or(0) as i64;
        let ox = self.cursor.0 as i64 - pw / 2;
        let oy = self.cursor.1 as i64 - ph / 2;
        for (dy, row) in rows.iter().enumerate() {
            for (dx, ch) in row.chars().enumerate() {
                let x = ox + dx as i64;
                let y = oy + dy as i64;
                if x >= 0 && y >= 0 {
                    self.set(x as usize, y as usize, ch == '#');
                }
            }
        }
    }

    pub fn neighbors(&self, x: usize, y: usize) -> u8 {
        let mut n = 0;
        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx >= 0 && ny >= 0 && self.is_alive(nx as usize, ny as usize) {
                    n += 1;
                }
            }
        }
        n
    }

    /// Advance one generation.
    pub fn step(&mut self) {
        for y in 0..self.height {
            for x in 0..self.width {
                let n = self.neighbors(x, y);
                let alive = self.cells[y * self.width + x];
                self.scratch[y * self.width + x] = matches!((alive, n), (true, 2) | (true, 3) | (false, 3));
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
        self.generation += 1;
    }

    /// Run due generations. Returns how many ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> u32 {
        if !self.playing {
            return 0;
        }
        self.step_timer_ms += elapsed_ms;
        let mut ran = 0;
        while self.step_timer_ms >= GENERATION_MS {
            self.step_timer_ms -= GENERATION_MS;
            self.step();
            ran += 1;
        }
        ran
    }
}
