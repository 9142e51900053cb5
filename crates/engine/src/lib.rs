//! Game loop driver: runs a [`Toy`] at a fixed frame interval against a
//! [`term::Screen`] and a [`input::KeySource`].

pub mod config;
pub mod driver;
pub mod toy;

pub use terminal_toys_input as input;
pub use terminal_toys_term as term;
pub use terminal_toys_types as types;

pub use config::{KeySet, LoopConfig, MAX_LOOP_KEYS};
pub use driver::{Driver, LoopReport};
pub use toy::{DrawContext, Flow, LoopState, Tick, Toy};
