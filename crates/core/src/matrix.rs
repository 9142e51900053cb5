//! Falling-character rain.

use crate::rng::SimpleRng;

pub const ASCII_CHARS: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()_+-=[]{}|;:',.<>?/~`";
/// Half-width forms, so every character still fills exactly one column.
pub const KATAKANA: &str = "ｱｲｳｴｵｶｷｸｹｺｻｼｽｾｿﾀﾁﾂﾃﾄﾅﾆﾇﾈﾉﾊﾋﾌﾍﾎﾏﾐﾑﾒﾓﾔﾕﾖﾗﾘﾙﾚﾛﾜｦﾝ";

/// Share of columns with a drop at start.
pub const INITIAL_DENSITY: f32 = 0.3;
/// Per-frame chance that a free column starts a drop.
pub const SPAWN_CHANCE: f32 = 0.02;

/// Position of a character within its drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Head,
    /// The two characters behind the head.
    Near,
    Tail,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Drop {
    pub x: usize,
    /// Head row; may be negative before the drop enters the screen.
    pub y: f32,
    pub speed: f32,
    pub length: usize,
    /// Head first.
    pub chars: Vec<char>,
}

impl Drop {
    fn random(x: usize, y: f32, rng: &mut SimpleRng) -> Self {
        let length = rng.range_i32(5, 20) as usize;
        Self {
            x,
            y,
            speed: rng.range_f32(0.5, 2.0),
            length,
            chars: Vec::with_capacity(length),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Rain {
    width: usize,
    height: usize,
    charset: Vec<char>,
    drops: Vec<Drop>,
}

impl Rain {
    /// `katakana` adds [`KATAKANA`] to the charset.
    pub fn new(width: usize, height: usize, katakana: bool, rng: &mut SimpleRng) -> Self {
        let mut charset: Vec<char> = ASCII_CHARS.chars().collect();
        if katakana {
            charset.extend(KATAKANA.chars());
        }
        let mut rain = Self {
            width,
            height,
            charset,
            drops: Vec::new(),
        };
        for x in 0..width {
            if rng.chance(INITIAL_DENSITY) {
                let y = rng.range_i32(-(height as i32), 0) as f32;
                rain.drops.push(Drop::random(x, y, rng));
            }
        }
        rain
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn drops(&self) -> &[Drop] {
        &self.drops
    }

    /// Advance one frame: move, grow, retire, spawn.
    pub fn step(&mut self, rng: &mut SimpleRng) {
        for drop in &mut self.drops {
            drop.y += drop.speed;
            if drop.chars.len() < drop.length {
                if let Some(c) = rng.choose(&self.charset) {
                    drop.chars.push(*c);
                }
            }
        }

        let height = self.height as f32;
        self.drops
            .retain(|d| d.y - d.length as f32 <= height);

        for x in 0..self.width {
            if rng.chance(SPAWN_CHANCE) && !self.drops.iter().any(|d| d.x == x) {
                self.drops.push(Drop::random(x, 0.0, rng));
            }
        }
    }

    /// Visible characters as `(x, y, char, segment)`.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char, Segment)> + '_ {
        self.drops.iter().flat_map(move |d| {
            let head = d.y as i64;
            d.chars.iter().enumerate().filter_map(move |(i, c)| {
                let y = head - i as i64;
                if y < 0 || y >= self.height as i64 || d.x >= self.width {
                    return None;
                }
                let seg = match i {
                    0 => Segment::Head,
                    1 | 2 => Segment::Near,
                    _ => Segment::Tail,
                };
                Some((d.x, y as usize, *c, seg))
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_grows_to_its_length_and_retires() {
        let mut rng = SimpleRng::new(4);
        let mut rain = Rain::new(1, 10, false, &mut rng);
        rain.drops.clear();
        rain.drops.push(Drop {
            x: 0,
            y: 0.0,
            speed: 1.0,
            length: 5,
            chars: Vec::new(),
        });

        for _ in 0..5 {
            rain.step(&mut rng);
        }
        assert_eq!(rain.drops()[0].chars.len(), 5);

        // Head passes the bottom, then the tail does.
        for _ in 0..20 {
            rain.step(&mut rng);
        }
        assert!(rain.drops().iter().all(|d| d.y - d.length as f32 <= 10.0));
    }

    #[test]
    fn test_segments_follow_the_head() {
        let mut rng = SimpleRng::new(4);
        let mut rain = Rain::new(3, 10, false, &mut rng);
        rain.drops = vec![Drop {
            x: 1,
            y: 5.0,
            speed: 1.0,
            length: 5,
            chars: vec!['a', 'b', 'c', 'd', 'e'],
        }];
        let cells: Vec<_> = rain.cells().collect();
        assert_eq!(cells[0], (1, 5, 'a', Segment::Head));
        assert_eq!(cells[1].3, Segment::Near);
        assert_eq!(cells[2].3, Segment::Near);
        assert_eq!(cells[3], (1, 2, 'd', Segment::Tail));
        assert_eq!(cells.len(), 5);
    }

    #[test]
    fn test_offscreen_characters_are_hidden() {
        let mut rng = SimpleRng::new(4);
        let mut rain = Rain::new(3, 4, false, &mut rng);
        rain.drops = vec![Drop {
            x: 0,
            y: 1.0,
            speed: 1.0,
            length: 5,
            chars: vec!['a', 'b', 'c', 'd'],
        }];
        assert_eq!(rain.cells().count(), 2);
    }

    #[test]
    fn test_ascii_charset_in_degraded_mode() {
        let mut rng = SimpleRng::new(9);
        let mut rain = Rain::new(40, 20, false, &mut rng);
        for _ in 0..30 {
            rain.step(&mut rng);
        }
        assert!(rain.cells().all(|(_, _, c, _)| c.is_ascii()));
        assert!(rain.drops().iter().all(|d| (5..=20).contains(&d.length)));
    }
}
