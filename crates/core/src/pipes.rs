//! Growing-pipes screensaver.
//!
//! Each tick every pipe advances one cell. A pipe turns at the field boundary,
//! looks for a free cell in random order when it runs into a pipe, and dies
//! when it has nowhere to go. Dead pipes vanish with their trail.

use arrayvec::ArrayVec;

use crate::rng::SimpleRng;
use crate::types::Arrow;

pub const MAX_PIPES: usize = 5;
pub const SPAWN_CHANCE: f32 = 0.05;
pub const TURN_CHANCE: f32 = 0.1;
/// Pipes stay left of this column.
pub const MAX_X: i32 = 79;
pub const COLORS: u8 = 7;

const DIRECTIONS: [Arrow; 4] = [Arrow::Up, Arrow::Down, Arrow::Left, Arrow::Right];

/// How a trail cell connects to its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Joint {
    /// Where the pipe started.
    Start,
    Horizontal,
    Vertical,
    /// Connects right and down (top-left corner).
    DownRight,
    /// Connects left and down (top-right corner).
    DownLeft,
    /// Connects up and right (bottom-left corner).
    UpRight,
    /// Connects up and left (bottom-right corner).
    UpLeft,
}

/// Joint for a cell entered travelling `incoming` and left travelling
/// `outgoing`.
pub fn joint(incoming: Arrow, outgoing: Arrow) -> Joint {
    // The cell opens on the side it was entered from and the side it is left by.
    let entry = opposite(incoming);
    let sides = side_bit(entry) | side_bit(outgoing);
    match sides {
        0b0011 => Joint::Vertical,
        0b1100 => Joint::Horizontal,
        0b1010 => Joint::DownRight,
        0b0110 => Joint::DownLeft,
        0b1001 => Joint::UpRight,
        0b0101 => Joint::UpLeft,
        // Straight reversal never happens; draw it as a straight run.
        _ => match outgoing {
            Arrow::Left | Arrow::Right => Joint::Horizontal,
            Arrow::Up | Arrow::Down => Joint::Vertical,
        },
    }
}

fn side_bit(dir: Arrow) -> u8 {
    match dir {
        Arrow::Up => 0b0001,
        Arrow::Down => 0b0010,
        Arrow::Left => 0b0100,
        Arrow::Right => 0b1000,
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

fn direction_between(from: (i32, i32), to: (i32, i32)) -> Arrow {
    match (to.0 - from.0, to.1 - from.1) {
        (dx, _) if dx > 0 => Arrow::Right,
        (dx, _) if dx < 0 => Arrow::Left,
        (_, dy) if dy < 0 => Arrow::Up,
        _ => Arrow::Down,
    }
}

fn others(dir: Arrow) -> ArrayVec<Arrow, 4> {
    DIRECTIONS.into_iter().filter(|d| *d != dir).collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pipe {
    pub dir: Arrow,
    pub color: u8,
    /// Oldest first; the last cell is the pipe's head.
    pub trail: Vec<(i32, i32)>,
    pub alive: bool,
}

impl Pipe {
    pub fn new(x: i32, y: i32, dir: Arrow, color: u8) -> Self {
        Self {
            dir,
            color,
            trail: vec![(x, y)],
            alive: true,
        }
    }

    pub fn head(&self) -> (i32, i32) {
        self.trail.last().copied().unwrap_or((0, 0))
    }

    fn next_in(&self, dir: Arrow) -> (i32, i32) {
        let (x, y) = self.head();
        let (dx, dy) = dir.delta();
        (x + dx, y + dy)
    }

    /// Trail cells paired with their joints.
    pub fn segments(&self) -> impl Iterator<Item = ((i32, i32), Joint)> + '_ {
        let n = self.trail.len();
        self.trail.iter().enumerate().map(move |(i, &pos)| {
            let j = if i == 0 {
                Joint::Start
            } else if i + 1 < n {
                joint(
                    direction_between(self.trail[i - 1], pos),
                    direction_between(pos, self.trail[i + 1]),
                )
            } else {
                joint(self.dir, self.dir)
            };
            (pos, j)
        })
    }
}

#[derive(Debug, Clone)]
pub struct Pipes {
    width: i32,
    height: i32,
    pipes: Vec<Pipe>,
}

impl Pipes {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(14) as i32,
            height: height.max(14) as i32,
            pipes: Vec::new(),
        }
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn push(&mut self, pipe: Pipe) {
        self.pipes.push(pipe);
    }

    fn in_bounds(&self, (x, y): (i32, i32)) -> bool {
        x >= 1 && x < (self.width - 1).min(MAX_X) && y >= 1 && y < self.height - 1
    }

    pub fn is_occupied(&self, pos: (i32, i32)) -> bool {
        self.pipes.iter().any(|p| p.trail.contains(&pos))
    }

    pub fn spawn(&mut self, rng: &mut SimpleRng) {
        if self.pipes.len() >= MAX_PIPES {
            return;
        }
        let x = rng.range_i32(5, (self.width - 5).min(75));
        let y = rng.range_i32(5, self.height - 7);
        if self.is_occupied((x, y)) {
            return;
        }
        let dir = DIRECTIONS[rng.index(DIRECTIONS.len())];
        let color = rng.next_range(COLORS as u32) as u8;
        self.pipes.push(Pipe::new(x, y, dir, color));
    }

    /// Advance one frame.
    pub fn step(&mut self, rng: &mut SimpleRng) {
        self.pipes.retain(|p| p.alive);
        if rng.chance(SPAWN_CHANCE) {
            self.spawn(rng);
        }

        for i in 0..self.pipes.len() {
            let Some(next) = self.route(i, rng) else {
                self.pipes[i].alive = false;
                continue;
            };
            let pipe = &mut self.pipes[i];
            pipe.trail.push(next);
            if rng.chance(TURN_CHANCE) {
                let choices = others(pipe.dir);
                pipe.dir = choices[rng.index(choices.len())];
            }
        }
    }

    /// Next cell for pipe `i`, turning as needed; `None` when it is stuck.
    fn route(&mut self, i: usize, rng: &mut SimpleRng) -> Option<(i32, i32)> {
        let mut next = self.pipes[i].next_in(self.pipes[i].dir);

        if !self.in_bounds(next) {
            let choices = others(self.pipes[i].dir);
            let dir = choices[rng.index(choices.len())];
            self.pipes[i].dir = dir;
            next = self.pipes[i].next_in(dir);
            if !self.in_bounds(next) {
                return None;
            }
        }

        if self.is_occupied(next) {
            let mut choices = others(self.pipes[i].dir);
            rng.shuffle(&mut choices);
            let found = choices.into_iter().find_map(|dir| {
                let cand = self.pipes[i].next_in(dir);
                (self.in_bounds(cand) && !self.is_occupied(cand)).then_some((dir, cand))
            })?;
            self.pipes[i].dir = found.0;
            next = found.1;
        }
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joint_glyph_selection() {
        assert_eq!(joint(Arrow::Right, Arrow::Right), Joint::Horizontal);
        assert_eq!(joint(Arrow::Up, Arrow::Up), Joint::Vertical);
        // Travelling right then turning down: opens left and down.
        assert_eq!(joint(Arrow::Right, Arrow::Down), Joint::DownLeft);
        assert_eq!(joint(Arrow::Up, Arrow::Right), Joint::DownRight);
        assert_eq!(joint(Arrow::Down, Arrow::Left), Joint::UpLeft);
        assert_eq!(joint(Arrow::Left, Arrow::Up), Joint::UpRight);
    }

    #[test]
    fn test_segments_describe_turns() {
        let mut pipe = Pipe::new(5, 5, Arrow::Down, 0);
        pipe.trail.extend([(6, 5), (6, 6)]);
        let joints: Vec<_> = pipe.segments().map(|(_, j)| j).collect();
        assert_eq!(joints, vec![Joint::Start, Joint::DownLeft, Joint::Vertical]);
    }

    #[test]
    fn test_pipes_turn_at_the_boundary() {
        let mut field = Pipes::new(20, 20);
        field.push(Pipe::new(18, 10, Arrow::Right, 0));
        let mut rng = SimpleRng::new(6);
        field.step(&mut rng);
        let pipe = &field.pipes()[0];
        assert_eq!(pipe.trail.len(), 2);
        assert!(field.in_bounds(pipe.head()));
        assert_ne!(pipe.head(), (19, 10));
    }

    #[test]
    fn test_blocked_pipe_dies_and_is_removed() {
        let mut field = Pipes::new(20, 20);
        // A ring of trail around (10, 10).
        let mut ring = Pipe::new(9, 9, Arrow::Up, 1);
        ring.trail
            .extend([(10, 9), (11, 9), (11, 10), (11, 11), (10, 11), (9, 11), (9, 10)]);
        field.push(ring);
        field.push(Pipe::new(10, 10, Arrow::Up, 2));

        let mut rng = SimpleRng::new(1);
        assert!(field.route(1, &mut rng).is_none());

        field.step(&mut rng);
        assert!(!field.pipes()[1].alive);
        field.step(&mut rng);
        assert!(!field.pipes().iter().any(|p| p.trail[0] == (10, 10)));
    }

    #[test]
    fn test_trails_never_overlap() {
        let mut field = Pipes::new(80, 30);
        let mut rng = SimpleRng::new(42);
        for _ in 0..5 {
            field.spawn(&mut rng);
        }
        for _ in 0..200 {
            field.step(&mut rng);
            let mut seen = std::collections::HashSet::new();
            for p in field.pipes().iter().filter(|p| p.alive) {
                for &(x, y) in &p.trail {
                    assert!(field.in_bounds((x, y)));
                    assert!(seen.insert((x, y)), "overlap at {x},{y}");
                }
            }
            assert!(field.pipes().len() <= MAX_PIPES);
        }
    }
}
