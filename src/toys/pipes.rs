use crate::config::Settings;
use crate::core::pipes::{Joint, Pipes};
use crate::core::SimpleRng;
use crate::engine::{DrawContext, Flow, LoopConfig, Tick, Toy};
use crate::term::{CellStyle, FrameBuffer, Glyphs, Viewport};
use crate::types::InputEvent;

use super::{blank, palette, DIM};

fn joint_glyph(glyphs: &Glyphs, joint: Joint) -> char {
    let b = &glyphs.single;
    match joint {
        Joint::Start => glyphs.bullet,
        Joint::Horizontal => b.horizontal,
        Joint::Vertical => b.vertical,
        Joint::DownRight => b.top_left,
        Joint::DownLeft => b.top_right,
        Joint::UpRight => b.bottom_left,
        Joint::UpLeft => b.bottom_right,
    }
}

/// Pipes screensaver.
pub struct PipesToy {
    pipes: Pipes,
    rng: SimpleRng,
}

impl PipesToy {
    pub fn new(viewport: Viewport, settings: &Settings) -> Self {
        let mut rng = settings.rng();
        let mut pipes = Pipes::new(viewport.width as usize, viewport.height.saturating_sub(1) as usize);
        pipes.spawn(&mut rng);
        Self { pipes, rng }
    }

    pub fn pipes(&self) -> &Pipes {
        &self.pipes
    }
}

impl Toy for PipesToy {
    fn name(&self) -> &'static str {
        "pipes"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(150)
    }

    fn update(&mut self, _event: InputEvent, tick: Tick) -> Flow {
        if !tick.is_paused() {
            self.pipes.step(&mut self.rng);
        }
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        let mut fb = blank(ctx.viewport);
        for pipe in self.pipes.pipes() {
            let style = CellStyle::fg(palette(pipe.color)).bold();
            for ((x, y), joint) in pipe.segments() {
                fb.set_signed(x, y, style.into_cell(joint_glyph(ctx.glyphs, joint)));
            }
        }
        let help_y = fb.height().saturating_sub(1);
        fb.put_str(0, help_y, &format!("Pipes: {}  Q quit", self.pipes.pipes().len()), DIM);
        fb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pipes::Pipe;
    use crate::term::glyphs::{ASCII, UNICODE};
    use crate::types::{Arrow, TerminalMode};
    use std::time::Duration;

    #[test]
    fn test_corner_glyphs() {
        assert_eq!(joint_glyph(&UNICODE, Joint::DownLeft), '┐');
        assert_eq!(joint_glyph(&UNICODE, Joint::UpRight), '└');
        assert_eq!(joint_glyph(&ASCII, Joint::UpLeft), '+');
        assert_eq!(joint_glyph(&ASCII, Joint::Vertical), '|');
    }

    #[test]
    fn test_turning_pipe_is_drawn_with_a_corner() {
        let settings = Settings {
            seed: Some(2),
            ..Settings::default()
        };
        let mut toy = PipesToy::new(Viewport::new(40, 20), &settings);
        toy.pipes = Pipes::new(40, 19);
        let mut pipe = Pipe::new(5, 5, Arrow::Down, 1);
        pipe.trail.extend([(6, 5), (6, 6)]);
        toy.pipes.push(pipe);

        let fb = toy.draw(&DrawContext::new(TerminalMode::NativeAnsi, Viewport::new(40, 20)));
        assert_eq!(fb.get(5, 5).unwrap().ch, '●');
        assert_eq!(fb.get(6, 5).unwrap().ch, '┐');
        assert_eq!(fb.get(6, 6).unwrap().ch, '│');
    }

    #[test]
    fn test_pipes_grow_over_ticks() {
        let settings = Settings {
            seed: Some(9),
            ..Settings::default()
        };
        let mut toy = PipesToy::new(Viewport::new(60, 24), &settings);
        assert_eq!(toy.pipes().pipes().len(), 1);
        toy.update(InputEvent::None, Tick::running(Duration::from_millis(150)));
        let grown = toy.pipes().pipes().iter().map(|p| p.trail.len()).max().unwrap_or(0);
        assert_eq!(grown, 2);
    }
}
