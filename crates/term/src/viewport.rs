//! Terminal viewport dimensions.

use terminal_toys_types::{MAX_COLS, MAX_ROWS, MIN_COLS, MIN_ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Size clamped to the range toys lay themselves out for
    /// (40..=120 columns, 20..=40 rows).
    pub fn clamped(self) -> Self {
        Self {
            width: self.width.clamp(MIN_COLS, MAX_COLS),
            height: self.height.clamp(MIN_ROWS, MAX_ROWS),
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(terminal_toys_types::FALLBACK_COLS, terminal_toys_types::FALLBACK_ROWS)
    }
}
