//! Snake rules: walled arena, growth on food, speed-up per food.

use std::collections::VecDeque;

use crate::rng::SimpleRng;
use crate::types::Arrow;

pub const START_STEP_MS: u32 = 150;
pub const MIN_STEP_MS: u32 = 50;
pub const STEP_SPEEDUP_MS: u32 = 5;
pub const FOOD_POINTS: u32 = 10;

/// Arena coordinates; the outer ring (x or y at 0 or max) is wall.
pub type Pos = (i32, i32);

#[derive(Debug, Clone)]
pub struct Snake {
    width: i32,
    height: i32,
    body: VecDeque<Pos>,
    dir: Arrow,
    /// Direction of the last completed step, for the reversal guard.
    moved: Arrow,
    food: Pos,
    score: u32,
    step_ms: u32,
    step_timer_ms: u32,
    game_over: bool,
    rng: SimpleRng,
}

impl Snake {
    /// Arena of `width` x `height` including walls (at least 5x5).
    pub fn new(width: i32, height: i32, rng: SimpleRng) -> Self {
        let width = width.max(5);
        let height = height.max(5);
        let mut body = VecDeque::new();
        body.push_back((width / 2, height / 2));
        let mut snake = Self {
            width,
            height,
            body,
            dir: Arrow::Right,
            moved: Arrow::Right,
            food: (1, 1),
            score: 0,
            step_ms: START_STEP_MS,
            step_timer_ms: 0,
            game_over: false,
            rng,
        };
        snake.food = snake.spawn_food();
        snake
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn body(&self) -> impl Iterator<Item = Pos> + '_ {
        self.body.iter().copied()
    }

    pub fn head(&self) -> Pos {
        self.body.front().copied().unwrap_or((self.width / 2, self.height / 2))
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn food(&self) -> Pos {
        self.food
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn step_ms(&self) -> u32 {
        self.step_ms
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn direction(&self) -> Arrow {
        self.dir
    }

    pub fn is_wall(&self, (x, y): Pos) -> bool {
        x <= 0 || y <= 0 || x >= self.width - 1 || y >= self.height - 1
    }

    /// Turn, unless that would reverse into the neck.
    pub fn turn(&mut self, dir: Arrow) {
        if dir != opposite(self.moved) {
            self.dir = dir;
        }
    }

    /// Put food on an interior cell not covered by the body.
    fn spawn_food(&mut self) -> Pos {
        let mut free = Vec::new();
        for y in 1..self.height - 1 {
            for x in 1..self.width - 1 {
                if !self.body.contains(&(x, y)) {
                    free.push((x, y));
                }
            }
        }
        self.rng.choose(&free).copied().unwrap_or(self.food)
    }

    /// One movement step.
    pub fn step(&mut self) {
        if self.game_over {
            return;
        }
        let (hx, hy) = self.head();
        let (dx, dy) = self.dir.delta();
        let next = (hx + dx, hy + dy);
        self.moved = self.dir;

        if self.is_wall(next) || self.body.contains(&next) {
            self.game_over = true;
            return;
        }

        self.body.push_front(next);
        if next == self.food {
            self.score += FOOD_POINTS;
            self.step_ms = self.step_ms.saturating_sub(STEP_SPEEDUP_MS).max(MIN_STEP_MS);
            self.food = self.spawn_food();
        } else {
            self.body.pop_back();
        }
    }

    /// Run due steps. Returns whether the snake moved.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.game_over {
            return false;
        }
        self.step_timer_ms += elapsed_ms;
        if self.step_timer_ms < self.step_ms {
            return false;
        }
        // One step per tick at most; leftover time is dropped.
        self.step_timer_ms = 0;
        self.step();
        true
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Pos) {
        self.food = food;
    }
}

fn opposite(dir: Arrow) -> Arrow {
    match dir {
        Arrow::Up => Arrow::Down,
        Arrow::Down => Arrow::Up,
        Arrow::Left => Arrow::Right,
        Arrow::Right => Arrow::Left,
    }
}
