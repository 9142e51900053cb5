//! Raw-mode session guard.

use crossterm::terminal;

use crate::error::TermError;

/// Keeps the controlling terminal in raw mode until dropped.
///
/// Raw mode is what makes single-key, unbuffered reads possible. Dropping the
/// guard restores cooked mode even on early returns.
#[derive(Debug)]
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub fn enable() -> Result<Self, TermError> {
        terminal::enable_raw_mode().map_err(TermError::RawMode)?;
        tracing::debug!("raw mode enabled");
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = terminal::disable_raw_mode() {
            tracing::debug!(%err, "failed to restore cooked mode");
        }
    }
}
