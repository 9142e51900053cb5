//! Terminal toys (workspace facade crate).
//!
//! The shared pieces live in dedicated crates under `crates/` and are
//! re-exported here under short names; this crate adds the toys themselves,
//! the launcher and the process-level setup (settings, logging, terminal
//! session).

pub use terminal_toys_core as core;
pub use terminal_toys_engine as engine;
pub use terminal_toys_input as input;
pub use terminal_toys_term as term;
pub use terminal_toys_types as types;

pub mod app;
pub mod config;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod toys;

pub use config::Settings;
pub use error::ToysError;
pub use launcher::{parse_choice, MenuChoice, ToyKind};
