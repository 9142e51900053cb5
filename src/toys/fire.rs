use crate::config::Settings;
use crate::core::fire::{Fire, HEAT_CHARS};
use crate::core::SimpleRng;
use crate::engine::{DrawContext, Flow, LoopConfig, Tick, Toy};
use crate::term::{CellStyle, Color, FrameBuffer, Viewport};
use crate::types::{Arrow, InputEvent};

use super::{blank, DIM, STATUS_LINES, TEXT};

/// Heat 0..=7 to color, cold to hot.
const HEAT_COLORS: [Color; 8] = [
    Color::Default,
    Color::Red,
    Color::Red,
    Color::BrightRed,
    Color::Yellow,
    Color::BrightYellow,
    Color::BrightYellow,
    Color::BrightWhite,
];

/// Rising fire over the whole screen.
pub struct FireToy {
    fire: Fire,
    rng: SimpleRng,
}

impl FireToy {
    pub fn new(viewport: Viewport, settings: &Settings) -> Self {
        let h = viewport.height.saturating_sub(STATUS_LINES) as usize;
        Self {
            fire: Fire::new(viewport.width as usize, h),
            rng: settings.rng(),
        }
    }

    pub fn fire(&self) -> &Fire {
        &self.fire
    }
}

impl Toy for FireToy {
    fn name(&self) -> &'static str {
        "fire"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(50)
    }

    fn update(&mut self, event: InputEvent, tick: Tick) -> Flow {
        match event {
            InputEvent::Char('+') | InputEvent::Char('=') => self.fire.adjust_intensity(1),
            InputEvent::Char('-') | InputEvent::Char('_') => self.fire.adjust_intensity(-1),
            InputEvent::Arrow(Arrow::Left) => self.fire.adjust_wind(-1),
            InputEvent::Arrow(Arrow::Right) => self.fire.adjust_wind(1),
            _ => {}
        }
        if !tick.is_paused() {
            self.fire.step(&mut self.rng);
        }
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        let mut fb = blank(ctx.viewport);
        for y in 0..self.fire.height() {
            for x in 0..self.fire.width() {
                let heat = self.fire.heat(x, y) as usize;
                if heat == 0 {
                    continue;
                }
                let mut style = CellStyle::fg(HEAT_COLORS[heat]);
                if heat >= 6 {
                    style = style.bold();
                }
                fb.put_char(x as u16, y as u16, HEAT_CHARS[heat], style);
            }
        }

        let status_y = self.fire.height() as u16;
        let status = format!("Intensity: {}  Wind: {:+}", self.fire.intensity(), self.fire.wind());
        fb.put_str(1, status_y, &status, TEXT);
        fb.put_str(1, status_y + 1, "+/- intensity  Left/Right wind  Q quit", DIM);
        fb
    }
}
