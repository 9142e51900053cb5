//! Heat-diffusion fire.
//!
//! The bottom row is the source; each row above takes the average of a 2x3
//! window below it (shifted by wind), scaled by a random decay.

use crate::rng::SimpleRng;

/// Hottest heat level.
pub const MAX_HEAT: u8 = 7;
pub const MIN_INTENSITY: u8 = 1;
pub const MAX_WIND: i32 = 2;

/// Characters from cold to hot, indexed by heat.
pub const HEAT_CHARS: [char; 8] = [' ', '.', ':', ';', '+', '*', '#', '@'];

#[derive(Debug, Clone)]
pub struct Fire {
    width: usize,
    height: usize,
    heat: Vec<u8>,
    intensity: u8,
    wind: i32,
}

impl Fire {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(2);
        Self {
            width,
            height,
            heat: vec![0; width * height],
            intensity: 6,
            wind: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn heat(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.heat[y * self.width + x]
        } else {
            0
        }
    }

    pub fn intensity(&self) -> u8 {
        self.intensity
    }

    pub fn wind(&self) -> i32 {
        self.wind
    }

    pub fn adjust_intensity(&mut self, delta: i32) {
        let v = (self.intensity as i32 + delta).clamp(MIN_INTENSITY as i32, MAX_HEAT as i32);
        self.intensity = v as u8;
    }

    pub fn adjust_wind(&mut self, delta: i32) {
        self.wind = (self.wind + delta).clamp(-MAX_WIND, MAX_WIND);
    }

    fn seed_source(&mut self, rng: &mut SimpleRng) {
        let base = (self.height - 1) * self.width;
        let lo = self.intensity.saturating_sub(2) as i32;
        let hi = self.intensity.min(MAX_HEAT) as i32;
        for x in 0..self.width {
            self.heat[base + x] = if rng.chance(0.8) {
                rng.range_i32(lo, hi) as u8
            } else {
                0
            };
        }
        let spots = rng.range_i32(2, 5);
        let (from, to) = (self.width / 4, 3 * self.width / 4);
        for _ in 0..spots {
            let x = rng.range_i32(from as i32, to as i32) as usize;
            if x < self.width {
                self.heat[base + x] = MAX_HEAT;
            }
        }
    }

    /// Advance one frame.
    pub fn step(&mut self, rng: &mut SimpleRng) {
        self.seed_source(rng);
        let w = self.width as i32;
        for y in (0..self.height - 1).rev() {
            for x in 0..w {
                let mut total = 0u32;
                let mut count = 0u32;
                for dy in 1..=2 {
                    let ny = y + dy;
                    if ny >= self.height {
                        continue;
                    }
                    for dx in -1..=1 {
                        let nx = x + dx + self.wind;
                        if (0..w).contains(&nx) {
                            total += self.heat[ny * self.width + nx as usize] as u32;
                            count += 1;
                        }
                    }
                }
                let value = if count == 0 {
                    0
                } else {
                    let avg = total as f32 / count as f32;
                    ((avg * rng.range_f32(0.8, 1.1)) as i32).clamp(0, MAX_HEAT as i32) as u8
                };
                self.heat[y * self.width + x as usize] = value;
            }
        }
    }
}
