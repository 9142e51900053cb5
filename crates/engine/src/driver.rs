//! Fixed-interval game loop.
//!
//! One tick is: poll a key, handle quit and pause keys, update the toy, draw,
//! present, then sleep for whatever is left of the frame interval. An overrun
//! tick starts the next one immediately; there is no catch-up.

use std::thread;
use std::time::{Duration, Instant};

use crate::config::LoopConfig;
use crate::input::KeySource;
use crate::term::Screen;
use crate::toy::{DrawContext, Flow, LoopState, Tick, Toy};
use crate::types::InputEvent;

/// Summary of a finished run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    /// Ticks executed, including the one that terminated the loop.
    pub ticks: u64,
    pub final_state: LoopState,
}

pub struct Driver<K, S> {
    keys: K,
    screen: S,
}

impl<K: KeySource, S: Screen> Driver<K, S> {
    pub fn new(keys: K, screen: S) -> Self {
        Self { keys, screen }
    }

    pub fn screen(&self) -> &S {
        &self.screen
    }

    pub fn screen_mut(&mut self) -> &mut S {
        &mut self.screen
    }

    pub fn into_parts(self) -> (K, S) {
        (self.keys, self.screen)
    }

    /// Run `toy` until a quit key, an interrupt, or [`Flow::Done`].
    pub fn run<T: Toy + ?Sized>(&mut self, toy: &mut T) -> LoopReport {
        let cfg = toy.config();
        let span = tracing::info_span!(
            "toy_run",
            toy = toy.name(),
            mode = self.screen.mode().as_str(),
            interval_ms = cfg.frame_interval.as_millis() as u64,
        );
        let _enter = span.enter();

        let mut state = LoopState::Running;
        let mut ticks: u64 = 0;
        let mut prev_start: Option<Instant> = None;

        loop {
            let start = Instant::now();
            let elapsed = prev_start
                .map(|p| start.duration_since(p))
                .unwrap_or(cfg.frame_interval);
            prev_start = Some(start);
            let index = ticks;
            ticks += 1;

            let event = self.keys.poll_key();
            if is_quit(event, &cfg) {
                state = transition(state, LoopState::Terminated, index);
                break;
            }

            let forwarded = match event {
                InputEvent::Char(c) if cfg.is_pause_key(c) => {
                    let next = if state == LoopState::Paused {
                        LoopState::Running
                    } else {
                        LoopState::Paused
                    };
                    state = transition(state, next, index);
                    InputEvent::None
                }
                other => other,
            };

            let dt = if state == LoopState::Paused {
                Duration::ZERO
            } else {
                elapsed
            };
            let flow = toy.update(forwarded, Tick { dt, index, state });

            let ctx = DrawContext {
                state,
                ..DrawContext::new(self.screen.mode(), self.screen.viewport())
            };
            let frame = toy.draw(&ctx);
            self.screen.present(&frame);

            if flow == Flow::Done {
                state = transition(state, LoopState::Terminated, index);
                break;
            }

            let spent = start.elapsed();
            match cfg.frame_interval.checked_sub(spent) {
                Some(rest) if !rest.is_zero() => thread::sleep(rest),
                Some(_) => {}
                None => tracing::trace!(tick = index, spent_ms = spent.as_millis() as u64, "tick overrun"),
            }
        }

        tracing::debug!(ticks, "toy run finished");
        LoopReport {
            ticks,
            final_state: state,
        }
    }
}

fn is_quit(event: InputEvent, cfg: &LoopConfig) -> bool {
    match event {
        InputEvent::Quit => true,
        InputEvent::Char(c) => cfg.is_quit_key(c),
        _ => false,
    }
}

fn transition(from: LoopState, to: LoopState, tick: u64) -> LoopState {
    tracing::debug!(?from, ?to, tick, "loop state change");
    to
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedKeys;
    use crate::term::{CellStyle, FrameBuffer, Viewport};
    use crate::types::TerminalMode;

    #[derive(Default)]
    struct RecordingScreen {
        frames: Vec<String>,
        stamps: Vec<Instant>,
    }

    impl Screen for RecordingScreen {
        fn mode(&self) -> TerminalMode {
            TerminalMode::DegradedAscii
        }

        fn viewport(&self) -> Viewport {
            Viewport::new(10, 2)
        }

        fn present(&mut self, fb: &FrameBuffer) {
            self.frames.push(fb.to_text());
            self.stamps.push(Instant::now());
        }
    }

    struct Counter {
        cfg: LoopConfig,
        updates: Vec<(InputEvent, Tick)>,
        done_after: Option<u64>,
    }

    impl Counter {
        fn new(cfg: LoopConfig) -> Self {
            Self {
                cfg,
                updates: Vec::new(),
                done_after: None,
            }
        }
    }

    impl Toy for Counter {
        fn name(&self) -> &'static str {
            "counter"
        }

        fn config(&self) -> LoopConfig {
            self.cfg.clone()
        }

        fn update(&mut self, event: InputEvent, tick: Tick) -> Flow {
            self.updates.push((event, tick));
            match self.done_after {
                Some(n) if tick.index + 1 >= n => Flow::Done,
                _ => Flow::Continue,
            }
        }

        fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
            let mut fb = FrameBuffer::new(ctx.viewport.width, ctx.viewport.height);
            let label = if ctx.is_paused() { "paused" } else { "run" };
            fb.put_str(0, 0, label, CellStyle::default());
            fb.put_str(0, 1, &self.updates.len().to_string(), CellStyle::default());
            fb
        }
    }

    fn keys(events: &[InputEvent]) -> ScriptedKeys {
        ScriptedKeys::new(events.iter().copied())
    }

    #[test]
    fn quit_on_third_tick_runs_exactly_three_ticks() {
        let mut toy = Counter::new(LoopConfig::with_interval_ms(100).quit_keys(&['q']));
        let mut driver = Driver::new(
            keys(&[InputEvent::None, InputEvent::None, InputEvent::Char('q')]),
            RecordingScreen::default(),
        );

        let report = driver.run(&mut toy);

        assert_eq!(report.ticks, 3);
        assert_eq!(report.final_state, LoopState::Terminated);
        // The quit tick neither updates nor draws.
        assert_eq!(toy.updates.len(), 2);
        assert_eq!(driver.screen().frames.len(), 2);
    }

    #[test]
    fn interrupt_terminates_in_the_first_tick() {
        let mut toy = Counter::new(LoopConfig::with_interval_ms(10));
        let mut driver = Driver::new(keys(&[InputEvent::Quit]), RecordingScreen::default());

        let report = driver.run(&mut toy);

        assert_eq!(report.ticks, 1);
        assert!(toy.updates.is_empty());
    }

    #[test]
    fn renders_are_spaced_by_the_frame_interval() {
        let interval = Duration::from_millis(30);
        let mut toy = Counter::new(LoopConfig::default().frame_interval(interval));
        toy.done_after = Some(4);
        let mut driver = Driver::new(keys(&[]), RecordingScreen::default());

        driver.run(&mut toy);

        let stamps = &driver.screen().stamps;
        assert_eq!(stamps.len(), 4);
        let slack = Duration::from_millis(5);
        for pair in stamps.windows(2) {
            assert!(pair[1].duration_since(pair[0]) + slack >= interval);
        }
    }

    #[test]
    fn done_draws_the_final_frame() {
        let mut toy = Counter::new(LoopConfig::with_interval_ms(1));
        toy.done_after = Some(2);
        let mut driver = Driver::new(keys(&[]), RecordingScreen::default());

        let report = driver.run(&mut toy);

        assert_eq!(report.ticks, 2);
        assert_eq!(report.final_state, LoopState::Terminated);
        let frames = &driver.screen().frames;
        assert_eq!(frames.len(), 2);
        assert!(frames[1].contains('2'));
    }

    #[test]
    fn pause_key_toggles_and_is_swallowed() {
        let mut toy = Counter::new(LoopConfig::with_interval_ms(1).pause_keys(&['p']));
        let mut driver = Driver::new(
            keys(&[
                InputEvent::Char('p'),
                InputEvent::Char('x'),
                InputEvent::Char('p'),
                InputEvent::None,
                InputEvent::Char('q'),
            ]),
            RecordingScreen::default(),
        );

        let report = driver.run(&mut toy);

        assert_eq!(report.ticks, 5);
        let seen: Vec<_> = toy.updates.iter().map(|(e, t)| (*e, t.state)).collect();
        assert_eq!(
            seen,
            vec![
                (InputEvent::None, LoopState::Paused),
                (InputEvent::Char('x'), LoopState::Paused),
                (InputEvent::None, LoopState::Running),
                (InputEvent::None, LoopState::Running),
            ]
        );
        assert!(toy.updates[..2].iter().all(|(_, t)| t.dt.is_zero()));
        assert!(driver.screen().frames[0].starts_with("paused"));
    }

    #[test]
    fn tick_indices_are_sequential() {
        let mut toy = Counter::new(LoopConfig::with_interval_ms(1));
        toy.done_after = Some(3);
        let mut driver = Driver::new(keys(&[]), RecordingScreen::default());
        driver.run(&mut toy);

        let indices: Vec<_> = toy.updates.iter().map(|(_, t)| t.index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }
}
