//! Terminal session around one toy run.

use std::io::Write;

use anyhow::{Context, Result};

use crate::config::Settings;
use crate::engine::{Driver, LoopReport, Toy};
use crate::input::{select_key_source, KeySource};
use crate::launcher::ToyKind;
use crate::logging;
use crate::term::{detect_mode, EnvProbe, RawModeGuard, Screen, Terminal, Viewport};
use crate::types::TerminalMode;

/// Run a toy on the real console.
///
/// Detects the terminal mode, switches to raw mode when the console allows
/// it, builds the toy for the current (clamped) size and drives it until it
/// quits. The terminal is restored before returning.
pub fn run_toy<T, F>(build: F) -> LoopReport
where
    T: Toy,
    F: FnOnce(Viewport, TerminalMode) -> T,
{
    let probe = EnvProbe::from_env();
    let mode = detect_mode(&probe);
    tracing::info!(mode = mode.as_str(), platform = ?probe.platform, "terminal mode detected");

    let raw = match RawModeGuard::enable() {
        Ok(guard) => Some(guard),
        Err(err) => {
            tracing::warn!(%err, "continuing without raw mode");
            None
        }
    };
    let keys = select_key_source(raw.is_some());
    let terminal = Terminal::stdout(mode);

    let mut toy = build(terminal.viewport().clamped(), mode);
    let (report, _terminal) = run_session(&mut toy, keys, terminal);
    drop(raw);
    report
}

/// Enter the toy screen, run the loop, restore the screen.
pub fn run_session<T, K, W>(toy: &mut T, keys: K, mut terminal: Terminal<W>) -> (LoopReport, Terminal<W>)
where
    T: Toy + ?Sized,
    K: KeySource,
    W: Write,
{
    terminal.enter();
    let mut driver = Driver::new(keys, terminal);
    let report = driver.run(toy);
    let (_keys, mut terminal) = driver.into_parts();
    terminal.restore();
    tracing::info!(toy = toy.name(), ticks = report.ticks, "toy finished");
    (report, terminal)
}

/// Run one toy picked from the launcher.
pub fn run_kind(kind: ToyKind, settings: &Settings) -> LoopReport {
    run_toy(|viewport, mode| kind.build(viewport, mode, settings))
}

/// Entry point of the single-toy binaries.
pub fn standalone(kind: ToyKind) -> Result<()> {
    let settings = Settings::from_env();
    logging::init(&settings).context("logging setup failed")?;
    let report = run_kind(kind, &settings);
    tracing::debug!(ticks = report.ticks, "exiting");
    Ok(())
}
