//! Glyph tables for the two terminal modes.
//!
//! The renderer never translates characters. Toys pick their glyphs from the
//! table matching the active [`TerminalMode`], so a degraded terminal only ever
//! receives ASCII.

use terminal_toys_types::TerminalMode;

use crate::fb::{CellStyle, FrameBuffer};

/// Single or double box outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxKind {
    Single,
    Double,
}

/// Characters for a box outline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub single: BoxGlyphs,
    pub double: BoxGlyphs,
    pub tee_down: char,
    pub tee_up: char,
    pub tee_right: char,
    pub tee_left: char,
    pub cross: char,
    pub block: char,
    pub shade: char,
    pub dot: char,
    pub bullet: char,
    pub ring: char,
    pub diamond: char,
    pub degree: char,
}

pub const UNICODE: Glyphs = Glyphs {
    single: BoxGlyphs {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    },
    double: BoxGlyphs {
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        horizontal: '═',
        vertical: '║',
    },
    tee_down: '┬',
    tee_up: '┴',
    tee_right: '├',
    tee_left: '┤',
    cross: '┼',
    block: '█',
    shade: '▓',
    dot: '·',
    bullet: '●',
    ring: '○',
    diamond: '♦',
    degree: '°',
};

pub const ASCII: Glyphs = Glyphs {
    single: BoxGlyphs {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    },
    double: BoxGlyphs {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '=',
        vertical: '|',
    },
    tee_down: '+',
    tee_up: '+',
    tee_right: '+',
    tee_left: '+',
    cross: '+',
    block: '#',
    shade: '=',
    dot: '.',
    bullet: 'O',
    ring: 'o',
    diamond: '*',
    degree: 'o',
};

impl Glyphs {
    pub fn for_mode(mode: TerminalMode) -> &'static Glyphs {
        match mode {
            TerminalMode::NativeAnsi => &UNICODE,
            TerminalMode::DegradedAscii => &ASCII,
        }
    }

    pub fn boxed(&self, kind: BoxKind) -> &BoxGlyphs {
        match kind {
            BoxKind::Single => &self.single,
            BoxKind::Double => &self.double,
        }
    }

    /// Draw a `w`×`h` outline with its top-left corner at `(x, y)`.
    pub fn draw_box(
        &self,
        fb: &mut FrameBuffer,
        kind: BoxKind,
        x: u16,
        y: u16,
        w: u16,
        h: u16,
        style: CellStyle,
    ) {
        if w < 2 || h < 2 {
            return;
        }
        let b = self.boxed(kind);
        let right = x + w - 1;
        let bottom = y + h - 1;
        fb.put_char(x, y, b.top_left, style);
        fb.put_char(right, y, b.top_right, style);
        fb.put_char(x, bottom, b.bottom_left, style);
        fb.put_char(right, bottom, b.bottom_right, style);
        for cx in (x + 1)..right {
            fb.put_char(cx, y, b.horizontal, style);
            fb.put_char(cx, bottom, b.horizontal, style);
        }
        for cy in (y + 1)..bottom {
            fb.put_char(x, cy, b.vertical, style);
            fb.put_char(right, cy, b.vertical, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_chars(g: &Glyphs) -> Vec<char> {
        let mut v = Vec::new();
        for b in [g.single, g.double] {
            v.extend([
                b.top_left,
                b.top_right,
                b.bottom_left,
                b.bottom_right,
                b.horizontal,
                b.vertical,
            ]);
        }
        v.extend([
            g.tee_down, g.tee_up, g.tee_right, g.tee_left, g.cross, g.block, g.shade, g.dot,
            g.bullet, g.ring, g.diamond, g.degree,
        ]);
        v
    }

    #[test]
    fn degraded_table_is_pure_ascii() {
        let g = Glyphs::for_mode(TerminalMode::DegradedAscii);
        assert!(all_chars(g).iter().all(|c| c.is_ascii()));
    }

    #[test]
    fn box_outline_corners() {
        let mut fb = FrameBuffer::new(4, 3);
        UNICODE.draw_box(&mut fb, BoxKind::Single, 0, 0, 4, 3, CellStyle::default());
        assert_eq!(fb.to_text(), "┌──┐\n│  │\n└──┘");

        let mut fb = FrameBuffer::new(3, 2);
        ASCII.draw_box(&mut fb, BoxKind::Double, 0, 0, 3, 2, CellStyle::default());
        assert_eq!(fb.to_text(), "+=+\n+=+");
    }
}
