//! Shared types - terminal mode, input events and loop constants
//!
//! Everything here is plain data with no dependencies, so the capability layer,
//! the loop driver and the toy rules can all agree on one vocabulary.
//!
//! # Terminal Modes
//!
//! | Mode | Cursor addressing | Alternate screen | Glyphs |
//! |------|-------------------|------------------|--------|
//! | `NativeAnsi` | in-place overwrite from origin | supported | box drawing, blocks |
//! | `DegradedAscii` | full clear + reprint each frame | unsupported | plain ASCII |
//!
//! # Input
//!
//! A poll produces exactly one [`InputEvent`]. `Enter` arrives as `Char('\n')`,
//! `Escape` as `Char('\x1b')` and Ctrl+C as [`InputEvent::Quit`].
//!
//! # Examples
//!
//! ```
//! use terminal_toys_types::{Arrow, InputEvent, TerminalMode};
//!
//! let ev = InputEvent::Char('Q');
//! assert!(ev.is_char_ignore_case('q'));
//! assert_eq!(InputEvent::Arrow(Arrow::Up).arrow(), Some(Arrow::Up));
//! assert!(TerminalMode::NativeAnsi.supports_cursor_addressing());
//! ```

use std::time::Duration;

/// Default frame interval for toys that do not pick their own (50ms = 20 FPS).
pub const DEFAULT_FRAME_MS: u64 = 50;

/// Terminal size used when the real size cannot be queried.
pub const FALLBACK_COLS: u16 = 80;
pub const FALLBACK_ROWS: u16 = 24;

/// Clamp range applied to the terminal size before toys lay themselves out.
pub const MIN_COLS: u16 = 40;
pub const MAX_COLS: u16 = 120;
pub const MIN_ROWS: u16 = 20;
pub const MAX_ROWS: u16 = 40;

/// Default frame interval as a [`Duration`].
pub const fn default_frame_interval() -> Duration {
    Duration::from_millis(DEFAULT_FRAME_MS)
}

/// Rendering mode, decided once at startup and fixed for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalMode {
    /// Full ANSI: cursor addressing, alternate screen, Unicode glyphs.
    NativeAnsi,
    /// Constrained terminals: clear and reprint every frame, ASCII glyphs.
    DegradedAscii,
}

impl TerminalMode {
    pub fn supports_cursor_addressing(self) -> bool {
        matches!(self, TerminalMode::NativeAnsi)
    }

    pub fn supports_alt_buffer(self) -> bool {
        matches!(self, TerminalMode::NativeAnsi)
    }

    pub fn is_degraded(self) -> bool {
        matches!(self, TerminalMode::DegradedAscii)
    }

    /// Parse an override value (case-insensitive).
    ///
    /// ```
    /// use terminal_toys_types::TerminalMode;
    ///
    /// assert_eq!(TerminalMode::from_str("ascii"), Some(TerminalMode::DegradedAscii));
    /// assert_eq!(TerminalMode::from_str("Native"), Some(TerminalMode::NativeAnsi));
    /// assert_eq!(TerminalMode::from_str("vt52"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ascii" | "degraded" => Some(TerminalMode::DegradedAscii),
            "ansi" | "native" => Some(TerminalMode::NativeAnsi),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TerminalMode::NativeAnsi => "native-ansi",
            TerminalMode::DegradedAscii => "degraded-ascii",
        }
    }
}

/// Host platform family as seen by mode detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Windows,
    Posix,
}

impl Platform {
    /// Platform this binary was compiled for.
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }
}

/// Arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    /// Unit step `(dx, dy)` with y growing downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Arrow::Up => (0, -1),
            Arrow::Down => (0, 1),
            Arrow::Left => (-1, 0),
            Arrow::Right => (1, 0),
        }
    }
}

/// One polled input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputEvent {
    Char(char),
    Arrow(Arrow),
    /// Interrupt (Ctrl+C). Always terminates the loop.
    Quit,
    /// No key was pending.
    #[default]
    None,
}

impl InputEvent {
    pub fn is_none(&self) -> bool {
        matches!(self, InputEvent::None)
    }

    pub fn char(&self) -> Option<char> {
        match self {
            InputEvent::Char(c) => Some(*c),
            _ => None,
        }
    }

    pub fn arrow(&self) -> Option<Arrow> {
        match self {
            InputEvent::Arrow(a) => Some(*a),
            _ => None,
        }
    }

    pub fn is_char_ignore_case(&self, expected: char) -> bool {
        self.char()
            .map(|c| c.eq_ignore_ascii_case(&expected))
            .unwrap_or(false)
    }

    /// Arrow keys, with WASD accepted as a fallback.
    pub fn direction(&self) -> Option<Arrow> {
        match self {
            InputEvent::Arrow(a) => Some(*a),
            InputEvent::Char(c) => match c.to_ascii_lowercase() {
                'w' => Some(Arrow::Up),
                's' => Some(Arrow::Down),
                'a' => Some(Arrow::Left),
                'd' => Some(Arrow::Right),
                _ => None,
            },
            _ => None,
        }
    }

    /// Digit value for `'0'..='9'`.
    pub fn digit(&self) -> Option<u8> {
        self.char().and_then(|c| c.to_digit(10)).map(|d| d as u8)
    }
}
