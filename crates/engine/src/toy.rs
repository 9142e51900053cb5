//! The contract between the loop driver and a toy.

use std::time::Duration;

use crate::config::LoopConfig;
use crate::term::{FrameBuffer, Glyphs, Viewport};
use crate::types::{InputEvent, TerminalMode};

/// Loop driver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LoopState {
    Running,
    Paused,
    Terminated,
}

/// What a toy wants after an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Draw this tick's frame, then stop the loop.
    Done,
}

/// Timing information handed to [`Toy::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Time since the previous tick started. Zero while paused.
    pub dt: Duration,
    /// Zero-based tick counter.
    pub index: u64,
    pub state: LoopState,
}

impl Tick {
    /// A running tick with the given delta, mostly for driving toys directly.
    pub fn running(dt: Duration) -> Self {
        Self {
            dt,
            index: 0,
            state: LoopState::Running,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state == LoopState::Paused
    }
}

/// Everything a toy needs to lay out a frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawContext {
    pub mode: TerminalMode,
    pub glyphs: &'static Glyphs,
    pub viewport: Viewport,
    pub state: LoopState,
}

impl DrawContext {
    pub fn new(mode: TerminalMode, viewport: Viewport) -> Self {
        Self {
            mode,
            glyphs: Glyphs::for_mode(mode),
            viewport,
            state: LoopState::Running,
        }
    }

    pub fn is_paused(&self) -> bool {
        self.state == LoopState::Paused
    }
}

/// A terminal toy: state that updates on ticks and draws whole frames.
pub trait Toy {
    fn name(&self) -> &'static str;

    fn config(&self) -> LoopConfig {
        LoopConfig::default()
    }

    fn update(&mut self, event: InputEvent, tick: Tick) -> Flow;

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer;
}

impl<T: Toy + ?Sized> Toy for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn config(&self) -> LoopConfig {
        (**self).config()
    }

    fn update(&mut self, event: InputEvent, tick: Tick) -> Flow {
        (**self).update(event, tick)
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        (**self).draw(ctx)
    }
}
