//! Terminal input module.
//!
//! Maps `crossterm` events into [`types::InputEvent`] and provides the
//! [`KeySource`] capability with its concrete backends. Every poll is
//! non-blocking and read failures surface as `InputEvent::None`.

pub mod map;
pub mod source;

pub use terminal_toys_types as types;

pub use map::{is_interrupt, map_event, map_key_event};
pub use source::{select_key_source, CrosstermKeys, KeySource, ScriptedKeys, SilentKeys};
