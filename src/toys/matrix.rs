use crate::config::Settings;
use crate::core::matrix::{Rain, Segment};
use crate::core::SimpleRng;
use crate::engine::{DrawContext, Flow, LoopConfig, Tick, Toy};
use crate::term::{CellStyle, Color, FrameBuffer, Viewport};
use crate::types::{InputEvent, TerminalMode};

use super::{blank, DIM};

const HEAD: CellStyle = CellStyle::fg(Color::BrightWhite).bold();
const NEAR: CellStyle = CellStyle::fg(Color::BrightGreen);
const TAIL: CellStyle = CellStyle::fg(Color::Green).dim();

/// Digital rain. Katakana only join the charset on native terminals.
pub struct MatrixRain {
    rain: Rain,
    rng: SimpleRng,
}

impl MatrixRain {
    pub fn new(viewport: Viewport, mode: TerminalMode, settings: &Settings) -> Self {
        let mut rng = settings.rng();
        let h = viewport.height.saturating_sub(1) as usize;
        let rain = Rain::new(viewport.width as usize, h, !mode.is_degraded(), &mut rng);
        Self { rain, rng }
    }

    pub fn rain(&self) -> &Rain {
        &self.rain
    }
}

impl Toy for MatrixRain {
    fn name(&self) -> &'static str {
        "matrix-rain"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(100)
    }

    fn update(&mut self, _event: InputEvent, tick: Tick) -> Flow {
        if !tick.is_paused() {
            self.rain.step(&mut self.rng);
        }
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        let mut fb = blank(ctx.viewport);
        for (x, y, ch, segment) in self.rain.cells() {
            let style = match segment {
                Segment::Head => HEAD,
                Segment::Near => NEAR,
                Segment::Tail => TAIL,
            };
            fb.put_char(x as u16, y as u16, ch, style);
        }
        let help_y = self.rain.height() as u16;
        fb.put_str(0, help_y, "Q quit", DIM);
        fb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn settings() -> Settings {
        Settings {
            seed: Some(5),
            ..Settings::default()
        }
    }

    #[test]
    fn test_degraded_rain_stays_ascii() {
        let vp = Viewport::new(60, 20);
        let mut toy = MatrixRain::new(vp, TerminalMode::DegradedAscii, &settings());
        for _ in 0..30 {
            toy.update(InputEvent::None, Tick::running(Duration::from_millis(100)));
        }
        let fb = toy.draw(&DrawContext::new(TerminalMode::DegradedAscii, vp));
        assert!(fb.to_text().is_ascii());
        assert!((0..19).any(|y| !fb.line_text(y).trim().is_empty()));
        assert!(fb.line_text(19).starts_with("Q quit"));
    }

    #[test]
    fn test_frame_rows_match_viewport() {
        let vp = Viewport::new(50, 22);
        let mut toy = MatrixRain::new(vp, TerminalMode::NativeAnsi, &settings());
        toy.update(InputEvent::None, Tick::running(Duration::from_millis(100)));
        let fb = toy.draw(&DrawContext::new(TerminalMode::NativeAnsi, vp));
        assert_eq!(fb.height(), 22);
        assert_eq!(toy.rain().height(), 21);
    }
}
