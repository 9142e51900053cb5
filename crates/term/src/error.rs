use std::io;

use thiserror::Error;

/// Failures that stop a terminal session from starting.
///
/// Everything that happens once a session runs degrades instead of erroring.
#[derive(Debug, Error)]
pub enum TermError {
    #[error("could not switch the terminal to raw mode: {0}")]
    RawMode(#[source] io::Error),
}
