//! Non-blocking key sources.
//!
//! [`KeySource`] is the one polymorphic seam of the input side. The backend is
//! picked once at startup: crossterm when the terminal accepted raw mode, a
//! silent source otherwise, and a scripted source for tests and demos.

use std::collections::VecDeque;
use std::time::Duration;

use crossterm::event;

use crate::map::map_event;
use crate::types::InputEvent;

/// Upper bound on events drained by one poll, so a flood of input cannot
/// stall a tick.
const MAX_DRAIN: usize = 64;

pub trait KeySource {
    /// Return the pending key, or `InputEvent::None` immediately.
    fn poll_key(&mut self) -> InputEvent;
}

impl<K: KeySource + ?Sized> KeySource for Box<K> {
    fn poll_key(&mut self) -> InputEvent {
        (**self).poll_key()
    }
}

/// Keyboard input through crossterm (console API on Windows, tty on Unix).
///
/// A poll drains everything pending and keeps the first meaningful key, which
/// stops keys pressed during a slow frame from piling up behind it. A pending
/// interrupt wins over any other key.
#[derive(Debug, Default)]
pub struct CrosstermKeys {
    _private: (),
}

impl CrosstermKeys {
    pub fn new() -> Self {
        Self { _private: () }
    }
}

impl KeySource for CrosstermKeys {
    fn poll_key(&mut self) -> InputEvent {
        let mut first = InputEvent::None;
        for _ in 0..MAX_DRAIN {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(err) => {
                    tracing::trace!(%err, "key poll failed");
                    break;
                }
            }
            let ev = match event::read() {
                Ok(ev) => map_event(ev),
                Err(err) => {
                    tracing::trace!(%err, "key read failed");
                    break;
                }
            };
            if ev == InputEvent::Quit {
                return ev;
            }
            if first.is_none() {
                first = ev;
            }
        }
        first
    }
}

/// Source for sessions without a usable keyboard (stdin is not a terminal).
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentKeys;

impl KeySource for SilentKeys {
    fn poll_key(&mut self) -> InputEvent {
        InputEvent::None
    }
}

/// Replays a fixed sequence of events, then reports no input forever.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    queue: VecDeque<InputEvent>,
}

impl ScriptedKeys {
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self {
            queue: events.into_iter().collect(),
        }
    }

    /// Script made of plain characters, e.g. `"  q"`.
    pub fn from_chars(chars: &str) -> Self {
        Self::new(chars.chars().map(InputEvent::Char))
    }

    pub fn push(&mut self, event: InputEvent) {
        self.queue.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl KeySource for ScriptedKeys {
    fn poll_key(&mut self) -> InputEvent {
        self.queue.pop_front().unwrap_or_default()
    }
}

/// Pick the key source for this session.
pub fn select_key_source(raw_mode: bool) -> Box<dyn KeySource> {
    if raw_mode {
        Box::new(CrosstermKeys::new())
    } else {
        tracing::info!("raw mode unavailable, keyboard input disabled");
        Box::new(SilentKeys)
    }
}
