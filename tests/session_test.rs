//! Whole toy sessions against an in-memory terminal.

use std::time::{Duration, Instant};

use terminal_toys::app::run_session;
use terminal_toys::config::Settings;
use terminal_toys::engine::{DrawContext, Flow, LoopConfig, LoopState, Tick, Toy};
use terminal_toys::input::ScriptedKeys;
use terminal_toys::term::{CellStyle, FrameBuffer, Terminal, Viewport};
use terminal_toys::toys::{LifeToy, SnakeToy, TetrisToy};
use terminal_toys::types::{Arrow, InputEvent, TerminalMode};

const CLEAR: &str = "\x1b[2J";
const ALT_ON: &str = "\x1b[?1049h";
const ALT_OFF: &str = "\x1b[?1049l";
const SHOW_CURSOR: &str = "\x1b[?25h";

/// Counts its updates and draws one label per frame.
struct Ticker {
    interval_ms: u64,
    updates: u64,
}

impl Toy for Ticker {
    fn name(&self) -> &'static str {
        "ticker"
    }

    fn config(&self) -> LoopConfig {
        LoopConfig::with_interval_ms(self.interval_ms).quit_keys(&['q'])
    }

    fn update(&mut self, _event: InputEvent, _tick: Tick) -> Flow {
        self.updates += 1;
        Flow::Continue
    }

    fn draw(&mut self, ctx: &DrawContext) -> FrameBuffer {
        let mut fb = FrameBuffer::new(ctx.viewport.width, ctx.viewport.height);
        fb.put_str(0, 0, &format!("tick {}", self.updates), CellStyle::default());
        fb
    }
}

fn terminal(mode: TerminalMode) -> Terminal<Vec<u8>> {
    Terminal::new(Vec::new(), mode).with_fixed_size(40, 20)
}

fn output(t: Terminal<Vec<u8>>) -> String {
    String::from_utf8_lossy(&t.into_writer()).into_owned()
}

#[test]
fn test_quit_on_third_tick_at_100ms() {
    let mut toy = Ticker {
        interval_ms: 100,
        updates: 0,
    };
    let keys = ScriptedKeys::new([InputEvent::None, InputEvent::None, InputEvent::Char('q')]);
    let start = Instant::now();
    let (report, term) = run_session(&mut toy, keys, terminal(TerminalMode::DegradedAscii));

    assert_eq!(report.ticks, 3);
    assert_eq!(report.final_state, LoopState::Terminated);
    assert_eq!(toy.updates, 2);
    // Two full frames, each one interval apart from the next tick.
    assert!(start.elapsed() >= Duration::from_millis(195));

    let out = output(term);
    assert!(out.contains("tick 1"));
    assert!(out.contains("tick 2"));
    assert!(!out.contains("tick 3"));
}

#[test]
fn test_degraded_session_never_touches_the_alt_screen() {
    let mut toy = Ticker {
        interval_ms: 10,
        updates: 0,
    };
    let keys = ScriptedKeys::from_chars("  q");
    let (_, term) = run_session(&mut toy, keys, terminal(TerminalMode::DegradedAscii));
    let out = output(term);

    assert!(!out.contains(ALT_ON));
    assert!(!out.contains(ALT_OFF));
    // enter + two frames + restore
    assert_eq!(out.matches(CLEAR).count(), 4);
    assert!(out.contains(SHOW_CURSOR));
}

#[test]
fn test_native_session_enters_and_leaves_the_alt_screen() {
    let mut toy = Ticker {
        interval_ms: 10,
        updates: 0,
    };
    let keys = ScriptedKeys::from_chars(" q");
    let (_, term) = run_session(&mut toy, keys, terminal(TerminalMode::NativeAnsi));
    let out = output(term);

    let on = out.find(ALT_ON).expect("alt screen entered");
    let off = out.rfind(ALT_OFF).expect("alt screen left");
    assert!(on < off);
    assert!(out[on..off].contains("tick 1"));
}

#[test]
fn test_interrupt_ends_the_first_tick() {
    let mut toy = Ticker {
        interval_ms: 10,
        updates: 0,
    };
    let keys = ScriptedKeys::new([InputEvent::Quit]);
    let (report, _) = run_session(&mut toy, keys, terminal(TerminalMode::NativeAnsi));
    assert_eq!(report.ticks, 1);
    assert_eq!(toy.updates, 0);
}

#[test]
fn test_tetris_pause_key_freezes_moves() {
    let settings = Settings {
        seed: Some(8),
        ..Settings::default()
    };
    let mut toy = TetrisToy::new(&settings);
    let x0 = toy.game().current().x;
    let keys = ScriptedKeys::new([
        InputEvent::Char('p'),
        InputEvent::Arrow(Arrow::Left),
        InputEvent::Char('P'),
        InputEvent::Arrow(Arrow::Left),
        InputEvent::Char('q'),
    ]);
    let (report, term) = run_session(&mut toy, keys, terminal(TerminalMode::DegradedAscii));

    assert_eq!(report.ticks, 5);
    assert_eq!(toy.game().current().x, x0 - 1);
    assert!(output(term).contains("PAUSED"));
}

#[test]
fn test_life_session_with_pattern_keys() {
    let settings = Settings::default();
    let mut toy = LifeToy::new(Viewport::new(40, 20), &settings);
    let keys = ScriptedKeys::from_chars("5q");
    let (report, term) = run_session(&mut toy, keys, terminal(TerminalMode::NativeAnsi));

    assert_eq!(report.ticks, 2);
    assert_eq!(toy.life().population(), 48);
    assert!(output(term).contains("Population: 48"));
}

#[test]
fn test_snake_key_after_crash_finishes_the_run() {
    let settings = Settings {
        seed: Some(12),
        ..Settings::default()
    };
    let mut toy = SnakeToy::new(Viewport::new(40, 12), &settings);
    // Head starts mid-arena; steering up reaches the wall within a few steps.
    let mut script: Vec<InputEvent> = vec![InputEvent::Arrow(Arrow::Up)];
    script.extend(std::iter::repeat(InputEvent::None).take(60));
    script.push(InputEvent::Char('x'));
    let keys = ScriptedKeys::new(script);
    let (report, _) = run_session(&mut toy, keys, terminal(TerminalMode::DegradedAscii));

    assert!(toy.snake().is_game_over());
    assert_eq!(report.final_state, LoopState::Terminated);
    assert_eq!(report.ticks, 62);
}
