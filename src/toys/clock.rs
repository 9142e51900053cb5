use chrono::{Local, Timelike};

use crate::core::clock::{analog_face, digital_rows, ClockMode, ClockTime, FaceCell, DIGIT_ROWS, FACE_RADIUS};
use crate::engine::{DrawContext, Flow, LoopConfig, Tick, Toy};
use crate::term::{CellStyle, Color, FrameBuffer, Glyphs};
use crate::types::InputEvent;

use super::{blank, DIM, TITLE};

const RIM: CellStyle = CellStyle::fg(Color::Cyan);
const NUMERAL: CellStyle = CellStyle::fg(Color::BrightYellow).bold();
const HOUR: CellStyle = CellStyle::fg(Color::BrightWhite).bold();
const MINUTE: CellStyle = CellStyle::fg(Color::Green);
const SECOND: CellStyle = CellStyle::fg(Color::Red);
const DIGITS: CellStyle = CellStyle::fg(Color::BrightGreen).bold();

/// Where the displayed time comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum TimeSource {
    Local,
    Fixed(ClockTime, String),
}

impl TimeSource {
    fn now(&self) -> (ClockTime, String) {
        match self {
            TimeSource::Local => {
                let now = Local::now();
                let t = ClockTime::new(now.hour(), now.minute(), now.second());
                (t, now.format("%A, %B %d, %Y").to_string())
            }
            TimeSource::Fixed(t, date) => (*t, date.clone()),
        }
    }
}

/// Analog and digital wall clock.
pub struct Clock {
    mode: ClockMode,
    source: TimeSource,
}

impl Clock {
    pub fn new() -> Self {
        Self {
            mode: ClockMode::Both,
            source: TimeSource::Local,
        }
    }

    /// Clock frozen at `time`, showing `date` as the date line.
    pub fn fixed(time: ClockTime, date: &str) -> Self {
        Self {
            mode: ClockMode::Both,
            source: TimeSource::Fixed(time, date.to_string()),
        }
    }

    pub fn mode(&self) -> ClockMode {
        self.mode
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

fn face_glyph(cell: FaceCell, glyphs: &Glyphs) -> Option<(char, CellStyle)> {
    let g = match cell {
        FaceCell::Empty | FaceCell::Numeral(_) => return None,
        FaceCell::Rim => (glyphs.dot, RIM),
        FaceCell::Marker => (glyphs.ring, RIM),
        FaceCell::HourHand => (glyphs.block, HOUR),
        FaceCell::MinuteHand => (glyphs.shade, MINUTE),
        FaceCell::SecondHand(true) => (glyphs.single.vertical, SECOND),
        FaceCell::SecondHand(false) => (glyphs.single.horizontal, SECOND),
        FaceCell::Center => (glyphs.bullet, NUMERAL),
    };
    Some(g)
}

impl Toy for Clock {
    fn name(&self) -> &'static str {
        "terminal-clock"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(500)
    }

    fn update(&mut self, event: InputEvent, _tick: Tick) -> Flow {
        match event.char().map(|c| c.to_ascii_lowercase()) {
            Some('a') => self.mode = ClockMode::Analog,
            Some('d') => self.mode = ClockMode::Digital,
            Some('b') => self.mode = ClockMode::Both,
            _ => {}
        }
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        let mut fb = blank(ctx.viewport);
        let (time, date) = self.source.now();
        fb.put_centered(0, &format!("Terminal Clock [{}]", self.mode.label()), TITLE);

        let mut y = 2u16;
        if self.mode.shows_analog() {
            let mut radius = FACE_RADIUS;
            if self.mode.shows_digital() {
                // Leave room for the digits, the date and the help line.
                let spare = ctx.viewport.height as i32 - DIGIT_ROWS as i32 - 7;
                radius = radius.min(spare / 2).max(3);
            }
            let face = analog_face(time, radius);
            let left = fb.width().saturating_sub(face.width() as u16) / 2;
            for fy in 0..face.height() {
                for fx in 0..face.width() {
                    let cell = face.get(fx, fy);
                    let (x, cy) = (left + fx as u16, y + fy as u16);
                    if let FaceCell::Numeral(n) = cell {
                        fb.put_str(x, cy, &n.to_string(), NUMERAL);
                    } else if let Some((ch, style)) = face_glyph(cell, ctx.glyphs) {
                        fb.put_char(x, cy, ch, style);
                    }
                }
            }
            y += face.height() as u16 + 1;
        }

        if self.mode.shows_digital() {
            for row in digital_rows(time) {
                let glyph_row: String = row
                    .chars()
                    .map(|c| if c == '#' { ctx.glyphs.block } else { c })
                    .collect();
                fb.put_centered(y, glyph_row.trim_end(), DIGITS);
                y += 1;
            }
            y += 1;
        } else {
            fb.put_centered(y, &time.hms(), DIGITS);
            y += 2;
        }

        fb.put_centered(y, &date, CellStyle::fg(Color::White));
        let help_y = fb.height().saturating_sub(1);
        fb.put_centered(help_y, "A analog  D digital  B both  Q quit", DIM);
        fb
    }
}
