//! FrameRenderer: encodes a framebuffer and flushes it in one write.
//!
//! Every frame is a full redraw. Native mode overwrites in place from the
//! origin; degraded mode clears the screen and reprints, since cursor
//! addressing is what breaks on those terminals.

use std::io::{self, Write};

use crossterm::{
    cursor,
    style::{Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
    QueueableCommand,
};

use terminal_toys_types::TerminalMode;

use crate::fb::{CellStyle, Color, FrameBuffer};

pub struct FrameRenderer {
    buf: Vec<u8>,
    /// Height of the previous native frame, to wipe rows a shorter frame leaves behind.
    last_height: u16,
}

impl FrameRenderer {
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(64 * 1024),
            last_height: 0,
        }
    }

    /// Forget the previous frame, e.g. after the screen was cleared externally.
    pub fn invalidate(&mut self) {
        self.last_height = 0;
    }

    /// Encode `fb` for `mode` and write it to `out` with a single flush.
    ///
    /// Never fails: a terminal that rejects the write only loses this frame.
    pub fn render<W: Write>(&mut self, fb: &FrameBuffer, mode: TerminalMode, out: &mut W) {
        self.buf.clear();
        let encoded = match mode {
            TerminalMode::NativeAnsi => encode_native_into(fb, self.last_height, &mut self.buf),
            TerminalMode::DegradedAscii => encode_degraded_into(fb, &mut self.buf),
        };
        if let Err(err) = encoded {
            tracing::debug!(%err, "frame encode failed");
            return;
        }
        if let Err(err) = out.write_all(&self.buf).and_then(|_| out.flush()) {
            tracing::debug!(%err, bytes = self.buf.len(), "frame write failed");
        }
        self.last_height = fb.height();
    }

    /// Bytes of the most recently encoded frame.
    pub fn last_frame(&self) -> &[u8] {
        &self.buf
    }
}

impl Default for FrameRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode an in-place redraw starting at the origin.
///
/// Each row is cleared before it is printed so a narrower frame leaves no
/// residue; rows below a shorter frame are wiped individually.
pub fn encode_native_into(fb: &FrameBuffer, prev_height: u16, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    encode_rows(fb, out, true)?;

    for y in fb.height()..prev_height {
        out.queue(cursor::MoveTo(0, y))?;
        out.queue(Clear(ClearType::CurrentLine))?;
    }
    Ok(())
}

/// Encode a clear-and-reprint frame with no per-row cursor addressing.
pub fn encode_degraded_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> io::Result<()> {
    out.queue(Clear(ClearType::All))?;
    out.queue(cursor::MoveTo(0, 0))?;
    encode_rows(fb, out, false)
}

fn encode_rows(fb: &FrameBuffer, out: &mut Vec<u8>, clear_rows: bool) -> io::Result<()> {
    let mut current_style: Option<CellStyle> = None;
    for (y, row) in fb.rows().enumerate() {
        if y > 0 {
            out.queue(Print("\r\n"))?;
        }
        if clear_rows {
            if current_style.is_some() {
                out.queue(SetAttribute(Attribute::Reset))?;
                current_style = None;
            }
            out.queue(Clear(ClearType::UntilNewLine))?;
        }
        for cell in row {
            if current_style != Some(cell.style) {
                apply_style_into(out, cell.style)?;
                current_style = Some(cell.style);
            }
            out.queue(Print(cell.ch))?;
        }
    }

    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn apply_style_into(out: &mut Vec<u8>, style: CellStyle) -> io::Result<()> {
    // SGR 0 also resets colors, so it has to come first.
    out.queue(SetAttribute(Attribute::Reset))?;
    if style.fg != Color::Default {
        out.queue(SetForegroundColor(to_term_color(style.fg)))?;
    }
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    if style.reverse {
        out.queue(SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

fn to_term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::Gray => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    }
}
