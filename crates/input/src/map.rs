//! Key mapping from terminal events to input events.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::types::{Arrow, InputEvent};

/// Map one keyboard event to an [`InputEvent`].
///
/// Release events and keys with no meaning to the toys map to `None`.
pub fn map_key_event(key: KeyEvent) -> InputEvent {
    if key.kind == KeyEventKind::Release {
        return InputEvent::None;
    }

    if is_interrupt(key) {
        return InputEvent::Quit;
    }

    match key.code {
        KeyCode::Up => InputEvent::Arrow(Arrow::Up),
        KeyCode::Down => InputEvent::Arrow(Arrow::Down),
        KeyCode::Left => InputEvent::Arrow(Arrow::Left),
        KeyCode::Right => InputEvent::Arrow(Arrow::Right),
        KeyCode::Enter => InputEvent::Char('\n'),
        KeyCode::Esc => InputEvent::Char('\x1b'),
        KeyCode::Tab => InputEvent::Char('\t'),
        KeyCode::Backspace => InputEvent::Char('\x08'),
        KeyCode::Char(c) => InputEvent::Char(c),
        _ => InputEvent::None,
    }
}

/// Map any terminal event; only key events carry input.
pub fn map_event(event: Event) -> InputEvent {
    match event {
        Event::Key(key) => map_key_event(key),
        _ => InputEvent::None,
    }
}

/// Ctrl+C, which raw mode delivers as a key instead of a signal.
pub fn is_interrupt(key: KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}
