//! Per-toy loop configuration.

use std::time::Duration;

use arrayvec::ArrayVec;

use crate::types::default_frame_interval;

/// Maximum number of quit or pause keys a toy can register.
pub const MAX_LOOP_KEYS: usize = 4;

pub type KeySet = ArrayVec<char, MAX_LOOP_KEYS>;

/// Frame interval plus the keys the driver handles itself.
///
/// The default is 50ms with `q`/`Q` as quit keys and no pause keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopConfig {
    pub frame_interval: Duration,
    pub quit_keys: KeySet,
    pub pause_keys: KeySet,
}

impl Default for LoopConfig {
    fn default() -> Self {
        let mut quit_keys = KeySet::new();
        quit_keys.push('q');
        quit_keys.push('Q');
        Self {
            frame_interval: default_frame_interval(),
            quit_keys,
            pause_keys: KeySet::new(),
        }
    }
}

impl LoopConfig {
    pub fn with_interval_ms(ms: u64) -> Self {
        Self::default().frame_interval(Duration::from_millis(ms))
    }

    pub fn frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    /// Replace the quit keys. Keys past capacity are ignored.
    pub fn quit_keys(mut self, keys: &[char]) -> Self {
        self.quit_keys = keys.iter().copied().take(MAX_LOOP_KEYS).collect();
        self
    }

    /// Replace the pause keys. Keys past capacity are ignored.
    pub fn pause_keys(mut self, keys: &[char]) -> Self {
        self.pause_keys = keys.iter().copied().take(MAX_LOOP_KEYS).collect();
        self
    }

    pub fn is_quit_key(&self, c: char) -> bool {
        self.quit_keys.contains(&c)
    }

    pub fn is_pause_key(&self, c: char) -> bool {
        self.pause_keys.contains(&c)
    }
}
