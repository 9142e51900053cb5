//! Bouncing balls with gravity, damped wall bounces and pairwise collisions.
//!
//! Positions are in cells, velocities in cells per frame.

use std::collections::VecDeque;

use crate::rng::SimpleRng;

pub const GRAVITY: f32 = 0.1;
pub const DAMPING: f32 = 0.9;
pub const TRAIL_LEN: usize = 5;
pub const START_BALLS: usize = 3;
/// Centres closer than this collide.
pub const COLLISION_DISTANCE: f32 = 2.0;
/// Number of ball styles a renderer can choose from.
pub const STYLES: u8 = 6;
/// Number of ball colours a renderer can choose from.
pub const COLORS: u8 = 7;

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Index into the renderer's ball glyphs.
    pub style: u8,
    /// Index into the renderer's palette.
    pub color: u8,
    /// Oldest first.
    pub trail: VecDeque<(i32, i32)>,
}

impl Ball {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            style: 0,
            color: 0,
            trail: VecDeque::with_capacity(TRAIL_LEN + 1),
        }
    }

    pub fn cell(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }

    fn advance(&mut self, width: f32, height: f32, gravity: f32, rng: &mut SimpleRng) {
        self.trail.push_back(self.cell());
        if self.trail.len() > TRAIL_LEN {
            self.trail.pop_front();
        }

        self.x += self.vx;
        self.y += self.vy;
        self.vy += gravity;

        if self.x <= 0.0 || self.x >= width - 1.0 {
            self.vx = -self.vx * DAMPING;
            self.x = self.x.clamp(0.0, width - 1.0);
        }
        if self.y <= 0.0 || self.y >= height - 1.0 {
            self.vy = -self.vy * DAMPING;
            self.y = self.y.clamp(0.0, height - 1.0);
            // Kick a ball resting on the floor back into the air.
            if self.vy.abs() < 0.1 {
                self.vy = rng.range_f32(-0.5, -0.2);
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Balls {
    width: f32,
    height: f32,
    gravity: f32,
    trails: bool,
    balls: Vec<Ball>,
}

impl Balls {
    /// Empty field of `width` x `height` cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width: width.max(12) as f32,
            height: height.max(4) as f32,
            gravity: GRAVITY,
            trails: true,
            balls: Vec::new(),
        }
    }

    /// Field with the starting balls.
    pub fn with_start_balls(width: usize, height: usize, rng: &mut SimpleRng) -> Self {
        let mut field = Self::new(width, height);
        for _ in 0..START_BALLS {
            field.add_random(rng);
        }
        field
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn height(&self) -> usize {
        self.height as usize
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn gravity(&self) -> f32 {
        self.gravity
    }

    pub fn trails(&self) -> bool {
        self.trails
    }

    pub fn push(&mut self, ball: Ball) {
        self.balls.push(ball);
    }

    pub fn add_random(&mut self, rng: &mut SimpleRng) {
        let x = rng.range_i32(5, self.width as i32 - 5) as f32;
        let y = rng.range_i32(2, 10.min(self.height as i32 - 2)) as f32;
        let mut ball = Ball::new(x, y, rng.range_f32(-2.0, 2.0), rng.range_f32(-1.0, 1.0));
        ball.style = rng.next_range(STYLES as u32) as u8;
        ball.color = rng.next_range(COLORS as u32) as u8;
        self.balls.push(ball);
    }

    pub fn clear(&mut self) {
        self.balls.clear();
    }

    pub fn invert_gravity(&mut self) {
        self.gravity = -self.gravity;
    }

    pub fn toggle_trails(&mut self) {
        self.trails = !self.trails;
    }

    /// Advance one frame.
    pub fn step(&mut self, rng: &mut SimpleRng) {
        for ball in &mut self.balls {
            ball.advance(self.width, self.height, self.gravity, rng);
        }

        for i in 0..self.balls.len() {
            for j in i + 1..self.balls.len() {
                let (head, tail) = self.balls.split_at_mut(j);
                collide(&mut head[i], &mut tail[0]);
            }
        }
    }
}

/// Swap damped velocities and push the pair apart along their normal.
fn collide(a: &mut Ball, b: &mut Ball) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let dist = (dx * dx + dy * dy).sqrt();
    if dist >= COLLISION_DISTANCE {
        return;
    }
    let (avx, avy) = (a.vx, a.vy);
    a.vx = b.vx * DAMPING;
    a.vy = b.vy * DAMPING;
    b.vx = avx * DAMPING;
    b.vy = avy * DAMPING;

    if dist > 0.0 {
        let (nx, ny) = (dx / dist, dy / dist);
        a.x -= nx;
        a.y -= ny;
        b.x += nx;
        b.y += ny;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_starts_with_three_balls() {
        let field = Balls::with_start_balls(78, 28, &mut SimpleRng::new(1));
        assert_eq!(field.balls().len(), START_BALLS);
        for b in field.balls() {
            assert!((5.0..=73.0).contains(&b.x));
            assert!(b.style < STYLES && b.color < COLORS);
        }
    }

    #[test]
    fn test_right_wall_bounce_is_damped_and_clamped() {
        let mut field = Balls::new(20, 20);
        field.push(Ball::new(18.5, 10.0, 1.0, 0.0));
        field.step(&mut SimpleRng::new(1));
        let b = &field.balls()[0];
        assert!(approx(b.x, 19.0));
        assert!(approx(b.vx, -0.9));
    }

    #[test]
    fn test_floor_kick_when_resting() {
        let mut field = Balls::new(20, 10);
        field.push(Ball::new(10.0, 9.0, 0.0, 0.0));
        field.step(&mut SimpleRng::new(3));
        let b = &field.balls()[0];
        assert!(b.vy <= -0.2 && b.vy >= -0.5, "vy = {}", b.vy);
    }

    #[test]
    fn test_trail_is_bounded() {
        let mut field = Balls::new(40, 20);
        field.push(Ball::new(10.0, 5.0, 0.5, 0.0));
        let mut rng = SimpleRng::new(1);
        for _ in 0..20 {
            field.step(&mut rng);
        }
        assert_eq!(field.balls()[0].trail.len(), TRAIL_LEN);
    }

    #[test]
    fn test_collision_swaps_velocities() {
        let mut a = Ball::new(10.0, 5.0, 1.0, 0.0);
        let mut b = Ball::new(11.0, 5.0, -1.0, 0.5);
        collide(&mut a, &mut b);
        assert!(approx(a.vx, -0.9) && approx(a.vy, 0.45));
        assert!(approx(b.vx, 0.9) && approx(b.vy, 0.0));
        assert!(approx(a.x, 9.0) && approx(b.x, 12.0));
    }

    #[test]
    fn test_controls() {
        let mut field = Balls::with_start_balls(40, 20, &mut SimpleRng::new(1));
        field.invert_gravity();
        assert!(approx(field.gravity(), -GRAVITY));
        field.toggle_trails();
        assert!(!field.trails());
        field.clear();
        assert!(field.balls().is_empty());
    }
}
