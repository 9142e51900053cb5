//! Process settings, read once from the environment.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::core::SimpleRng;

pub const LOG_VAR: &str = "TERMINAL_TOYS_LOG";
pub const SEED_VAR: &str = "TERMINAL_TOYS_SEED";
pub const SAVE_VAR: &str = "TERMINAL_TOYS_SAVE";

pub const DEFAULT_SAVE_PATH: &str = "ascii_art.txt";

/// Settings shared by every toy in the process.
///
/// The terminal mode override is not here: mode detection reads it as part of
/// its own environment probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Log file; `None` disables logging.
    pub log_path: Option<PathBuf>,
    /// Fixed RNG seed; `None` seeds from the clock.
    pub seed: Option<u64>,
    /// Where the paint toy saves its canvas.
    pub save_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_path: None,
            seed: None,
            save_path: PathBuf::from(DEFAULT_SAVE_PATH),
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup. Unparseable values fall back
    /// to their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .and_then(|s| if s.is_empty() { None } else { Some(s) })
        };

        let log_path = non_empty(LOG_VAR).map(PathBuf::from);
        let seed = non_empty(SEED_VAR).and_then(|s| s.parse().ok());
        let save_path = non_empty(SAVE_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SAVE_PATH));

        Self {
            log_path,
            seed,
            save_path,
        }
    }

    /// Seed for this run: the configured one, or the current time.
    pub fn seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| {
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(1)
        })
    }

    pub fn rng(&self) -> SimpleRng {
        SimpleRng::from_u64(self.seed())
    }
}
