//! Terminal: the process-scoped console context.
//!
//! One `Terminal` is created at startup and passed explicitly to everything
//! that touches the console. It owns the writer, the detected mode and the
//! cursor/alt-screen state. All operations are best effort: a failed write is
//! logged and otherwise ignored.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Attribute, ResetColor, SetAttribute},
    terminal::{self, Clear, ClearType},
    QueueableCommand,
};

use terminal_toys_types::{TerminalMode, FALLBACK_COLS, FALLBACK_ROWS};

use crate::fb::FrameBuffer;
use crate::renderer::FrameRenderer;
use crate::viewport::Viewport;

/// Outcome of a capability request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Support {
    Applied,
    Unsupported,
}

/// Where the loop driver sends finished frames.
pub trait Screen {
    fn mode(&self) -> TerminalMode;
    fn viewport(&self) -> Viewport;
    fn present(&mut self, fb: &FrameBuffer);
}

/// Source of the terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SizeSource {
    Query,
    Fixed(u16, u16),
}

pub struct Terminal<W: Write> {
    out: W,
    mode: TerminalMode,
    renderer: FrameRenderer,
    cursor_hidden: bool,
    alt_active: bool,
    size: SizeSource,
}

impl Terminal<io::Stdout> {
    pub fn stdout(mode: TerminalMode) -> Self {
        Self::new(io::stdout(), mode)
    }
}

impl<W: Write> Terminal<W> {
    /// Context over an arbitrary writer. The size is queried from the real
    /// terminal unless [`Terminal::with_fixed_size`] is used.
    pub fn new(out: W, mode: TerminalMode) -> Self {
        Self {
            out,
            mode,
            renderer: FrameRenderer::new(),
            cursor_hidden: false,
            alt_active: false,
            size: SizeSource::Query,
        }
    }

    /// Pin the reported size (tests, recordings).
    pub fn with_fixed_size(mut self, cols: u16, rows: u16) -> Self {
        self.size = SizeSource::Fixed(cols, rows);
        self
    }

    pub fn mode(&self) -> TerminalMode {
        self.mode
    }

    pub fn is_cursor_hidden(&self) -> bool {
        self.cursor_hidden
    }

    pub fn is_alt_active(&self) -> bool {
        self.alt_active
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// `(cols, rows)`, falling back to 80x24 when the query fails.
    pub fn size(&self) -> (u16, u16) {
        match self.size {
            SizeSource::Fixed(c, r) => (c, r),
            SizeSource::Query => terminal::size().unwrap_or((FALLBACK_COLS, FALLBACK_ROWS)),
        }
    }

    pub fn clear_screen(&mut self) {
        self.emit("clear_screen", |out| {
            out.queue(Clear(ClearType::All))?;
            out.queue(cursor::MoveTo(0, 0))?;
            Ok(())
        });
        self.renderer.invalidate();
    }

    pub fn hide_cursor(&mut self) {
        self.emit("hide_cursor", |out| out.queue(cursor::Hide).map(|_| ()));
        self.cursor_hidden = true;
    }

    pub fn show_cursor(&mut self) {
        self.emit("show_cursor", |out| out.queue(cursor::Show).map(|_| ()));
        self.cursor_hidden = false;
    }

    /// Move to 0-based `(x, y)`. Degraded terminals cannot address the cursor,
    /// so the request clears the screen instead, leaving the cursor at home.
    pub fn move_cursor(&mut self, x: u16, y: u16) -> Support {
        if !self.mode.supports_cursor_addressing() {
            self.clear_screen();
            return Support::Unsupported;
        }
        self.emit("move_cursor", |out| out.queue(cursor::MoveTo(x, y)).map(|_| ()));
        Support::Applied
    }

    pub fn enable_alt_buffer(&mut self) -> Support {
        if !self.mode.supports_alt_buffer() {
            tracing::debug!(mode = self.mode.as_str(), "alternate screen unsupported");
            return Support::Unsupported;
        }
        if !self.alt_active {
            self.emit("enable_alt_buffer", |out| {
                out.queue(terminal::EnterAlternateScreen)?;
                out.queue(terminal::DisableLineWrap)?;
                Ok(())
            });
            self.alt_active = true;
        }
        Support::Applied
    }

    pub fn disable_alt_buffer(&mut self) -> Support {
        if !self.mode.supports_alt_buffer() {
            return Support::Unsupported;
        }
        if self.alt_active {
            self.emit("disable_alt_buffer", |out| {
                out.queue(terminal::EnableLineWrap)?;
                out.queue(terminal::LeaveAlternateScreen)?;
                Ok(())
            });
            self.alt_active = false;
        }
        Support::Applied
    }

    /// Standard toy setup: alternate screen when available, hidden cursor, blank screen.
    pub fn enter(&mut self) {
        self.enable_alt_buffer();
        self.hide_cursor();
        self.clear_screen();
    }

    /// Undo [`Terminal::enter`]. Safe to call more than once.
    pub fn restore(&mut self) {
        self.emit("restore", |out| {
            out.queue(ResetColor)?;
            out.queue(SetAttribute(Attribute::Reset))?;
            Ok(())
        });
        self.show_cursor();
        self.disable_alt_buffer();
        self.clear_screen();
    }

    pub fn render(&mut self, fb: &FrameBuffer) {
        self.renderer.render(fb, self.mode, &mut self.out);
    }

    fn emit(&mut self, op: &'static str, f: impl FnOnce(&mut W) -> io::Result<()>) {
        let result = f(&mut self.out).and_then(|_| self.out.flush());
        if let Err(err) = result {
            tracing::debug!(op, %err, "terminal command failed");
        }
    }
}

impl<W: Write> Screen for Terminal<W> {
    fn mode(&self) -> TerminalMode {
        self.mode
    }

    fn viewport(&self) -> Viewport {
        let (cols, rows) = self.size();
        Viewport::new(cols, rows)
    }

    fn present(&mut self, fb: &FrameBuffer) {
        self.render(fb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(t: &Terminal<Vec<u8>>) -> String {
        String::from_utf8_lossy(t.writer()).into_owned()
    }

    #[test]
    fn degraded_alt_buffer_is_unsupported_and_silent() {
        let mut t = Terminal::new(Vec::new(), TerminalMode::DegradedAscii);
        assert_eq!(t.enable_alt_buffer(), Support::Unsupported);
        assert!(t.writer().is_empty());
        assert!(!t.is_alt_active());

        t.clear_screen();
        assert_eq!(written(&t), "\x1b[2J\x1b[1;1H");
        assert_eq!(t.disable_alt_buffer(), Support::Unsupported);
    }

    #[test]
    fn native_alt_buffer_is_entered_once() {
        let mut t = Terminal::new(Vec::new(), TerminalMode::NativeAnsi);
        assert_eq!(t.enable_alt_buffer(), Support::Applied);
        let after_first = t.writer().len();
        assert_eq!(t.enable_alt_buffer(), Support::Applied);
        assert_eq!(t.writer().len(), after_first);
        assert!(written(&t).contains("\x1b[?1049h"));

        assert_eq!(t.disable_alt_buffer(), Support::Applied);
        assert!(written(&t).contains("\x1b[?1049l"));
        assert!(!t.is_alt_active());
    }

    #[test]
    fn cursor_visibility_is_idempotent() {
        let mut t = Terminal::new(Vec::new(), TerminalMode::NativeAnsi);
        t.hide_cursor();
        t.hide_cursor();
        assert!(t.is_cursor_hidden());
        t.show_cursor();
        t.show_cursor();
        assert!(!t.is_cursor_hidden());
        assert_eq!(written(&t), "\x1b[?25l\x1b[?25l\x1b[?25h\x1b[?25h");
    }

    #[test]
    fn degraded_move_cursor_falls_back_to_clear() {
        let mut t = Terminal::new(Vec::new(), TerminalMode::DegradedAscii);
        assert_eq!(t.move_cursor(4, 2), Support::Unsupported);
        assert_eq!(written(&t), "\x1b[2J\x1b[1;1H");

        let mut t = Terminal::new(Vec::new(), TerminalMode::NativeAnsi);
        assert_eq!(t.move_cursor(4, 2), Support::Applied);
        assert_eq!(written(&t), "\x1b[3;5H");
    }

    #[test]
    fn fixed_size_feeds_the_viewport() {
        let t = Terminal::new(Vec::new(), TerminalMode::NativeAnsi).with_fixed_size(100, 30);
        assert_eq!(t.viewport(), Viewport::new(100, 30));
    }

    #[test]
    fn restore_after_enter_shows_cursor_and_leaves_alt() {
        let mut t = Terminal::new(Vec::new(), TerminalMode::NativeAnsi);
        t.enter();
        assert!(t.is_alt_active() && t.is_cursor_hidden());
        t.restore();
        assert!(!t.is_alt_active() && !t.is_cursor_hidden());
        t.restore();
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }
    }

    #[test]
    fn write_failures_are_swallowed() {
        let mut t = Terminal::new(FailingWriter, TerminalMode::NativeAnsi);
        t.enter();
        t.render(&FrameBuffer::new(5, 2));
        t.restore();
    }
}
