//! Terminal capability layer and frame renderer.
//!
//! This is the console-facing half of the toy core:
//!
//! - [`caps`]: environment probe and pure mode detection
//! - [`terminal`]: the process-scoped [`Terminal`] context (cursor, clear,
//!   alternate screen, size) and the [`Screen`] seam the loop driver draws to
//! - [`renderer`]: full-frame encoding with a single flush per frame
//! - [`fb`] / [`glyphs`]: the framebuffer toys draw into and per-mode glyphs
//! - [`session`]: raw-mode guard
//!
//! Nothing in here is fatal once a session is running. Unsupported features
//! and failed writes degrade the picture and are logged at `debug`.

pub mod caps;
pub mod error;
pub mod fb;
pub mod glyphs;
pub mod renderer;
pub mod session;
pub mod terminal;
pub mod viewport;

pub use terminal_toys_types as types;

pub use caps::{detect_mode, EnvProbe, MODE_OVERRIDE_VAR};
pub use error::TermError;
pub use fb::{Cell, CellStyle, Color, FrameBuffer};
pub use glyphs::{BoxKind, Glyphs};
pub use renderer::{encode_degraded_into, encode_native_into, FrameRenderer};
pub use session::RawModeGuard;
pub use terminal::{Screen, Support, Terminal};
pub use viewport::Viewport;
