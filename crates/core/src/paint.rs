//! Canvas and tool state for the paint toy.

use std::collections::VecDeque;

use crate::types::Arrow;

/// Palette size; keys `1..=8` pick a colour.
pub const PALETTE_LEN: u8 = 8;
pub const PALETTE_NAMES: [&str; PALETTE_LEN as usize] =
    ["Red", "Green", "Yellow", "Blue", "Magenta", "Cyan", "White", "Gray"];
const DEFAULT_COLOR: u8 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brush {
    Block,
    Circle,
    Shade,
}

impl Brush {
    pub fn name(self) -> &'static str {
        match self {
            Brush::Block => "Block",
            Brush::Circle => "Circle",
            Brush::Shade => "Shade",
        }
    }
}

/// One painted cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Mark {
    pub color: u8,
    pub brush: Brush,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tool {
    Draw,
    /// Painting on every cursor move.
    Continuous,
    Erase,
    Line,
}

impl Tool {
    pub fn label(self) -> &'static str {
        match self {
            Tool::Draw => "DRAW",
            Tool::Continuous => "DRAW (Continuous)",
            Tool::Erase => "ERASE",
            Tool::Line => "LINE",
        }
    }
}

pub type Point = (i32, i32);

/// Cells of the Bresenham line from `a` to `b`, both ends included.
pub fn line_points(a: Point, b: Point) -> Vec<Point> {
    let (mut x, mut y) = a;
    let dx = (b.0 - x).abs();
    let dy = (b.1 - y).abs();
    let sx = if x < b.0 { 1 } else { -1 };
    let sy = if y < b.1 { 1 } else { -1 };
    let mut err = dx - dy;
    let mut out = Vec::with_capacity((dx.max(dy) + 1) as usize);
    loop {
        out.push((x, y));
        if (x, y) == b {
            break;
        }
        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
    out
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<Option<Mark>>,
    cursor: Point,
    color: u8,
    brush: Brush,
    continuous: bool,
    erasing: bool,
    line_mode: bool,
    line_start: Option<Point>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            cells: vec![None; width * height],
            cursor: ((width / 2) as i32, (height / 2) as i32),
            color: DEFAULT_COLOR,
            brush: Brush::Block,
            continuous: false,
            erasing: false,
            line_mode: false,
            line_start: None,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn line_start(&self) -> Option<Point> {
        self.line_start
    }

    pub fn tool(&self) -> Tool {
        if self.line_mode {
            Tool::Line
        } else if self.erasing {
            Tool::Erase
        } else if self.continuous {
            Tool::Continuous
        } else {
            Tool::Draw
        }
    }

    pub fn get(&self, (x, y): Point) -> Option<Mark> {
        self.index((x, y)).and_then(|i| self.cells[i])
    }

    fn index(&self, (x, y): Point) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            None
        } else {
            Some(y as usize * self.width + x as usize)
        }
    }

    fn current_mark(&self) -> Mark {
        Mark {
            color: self.color,
            brush: self.brush,
        }
    }

    /// Paint (or erase) one cell with the current settings.
    pub fn paint(&mut self, p: Point) {
        let mark = (!self.erasing).then(|| self.current_mark());
        if let Some(i) = self.index(p) {
            self.cells[i] = mark;
        }
    }

    pub fn move_cursor(&mut self, dir: Arrow) {
        let (dx, dy) = dir.delta();
        self.cursor = (
            (self.cursor.0 + dx).clamp(0, self.width as i32 - 1),
            (self.cursor.1 + dy).clamp(0, self.height as i32 - 1),
        );
        if self.continuous && !self.line_mode {
            self.paint(self.cursor);
        }
    }

    /// Space: set a line endpoint in line mode, otherwise toggle continuous
    /// drawing (painting the cursor cell when it starts).
    pub fn action(&mut self) {
        if self.line_mode {
            match self.line_start.take() {
                None => self.line_start = Some(self.cursor),
                Some(start) => {
                    for p in line_points(start, self.cursor) {
                        self.paint(p);
                    }
                }
            }
            return;
        }
        self.continuous = !self.continuous;
        if self.continuous {
            self.paint(self.cursor);
        }
    }

    pub fn cycle_color(&mut self) {
        self.color = (self.color + 1) % PALETTE_LEN;
        self.continuous = false;
    }

    /// Pick palette entry `index` (0-based); leaves erase mode.
    pub fn set_color(&mut self, index: u8) {
        if index < PALETTE_LEN {
            self.color = index;
            self.erasing = false;
        }
    }

    pub fn set_brush(&mut self, brush: Brush) {
        self.brush = brush;
    }

    pub fn toggle_erase(&mut self) {
        self.erasing = !self.erasing;
        self.continuous = false;
        if self.erasing {
            self.line_mode = false;
            self.line_start = None;
        }
    }

    pub fn toggle_line_mode(&mut self) {
        self.line_mode = !self.line_mode;
        self.line_start = None;
        self.continuous = false;
        if self.line_mode {
            self.erasing = false;
        }
    }

    /// 4-neighbour flood fill from the cursor with the current mark.
    ///
    /// Ignored in erase and line mode, and when the region already has the
    /// current mark.
    pub fn fill(&mut self) {
        self.continuous = false;
        if self.erasing || self.line_mode {
            return;
        }
        let Some(start) = self.index(self.cursor) else {
            return;
        };
        let target = self.cells[start];
        let mark = Some(self.current_mark());
        if target == mark {
            return;
        }

        let mut queue = VecDeque::new();
        queue.push_back(self.cursor);
        while let Some((x, y)) = queue.pop_front() {
            let Some(i) = self.index((x, y)) else {
                continue;
            };
            if self.cells[i] != target {
                continue;
            }
            self.cells[i] = mark;
            queue.extend([(x + 1, y), (x - 1, y), (x, y + 1), (x, y - 1)]);
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(None);
        self.line_start = None;
    }

    /// Plain-text grid, one line per row, each row ending in `\n`.
    pub fn to_text(&self, glyph: impl Fn(Brush) -> char) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.cells.chunks(self.width) {
            out.extend(row.iter().map(|c| c.map_or(' ', |m| glyph(m.brush))));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(b: Brush) -> char {
        match b {
            Brush::Block => '#',
            Brush::Circle => 'O',
            Brush::Shade => '=',
        }
    }

    #[test]
    fn test_bresenham_endpoints_and_shape() {
        assert_eq!(line_points((0, 0), (3, 0)), vec![(0, 0), (1, 0), (2, 0), (3, 0)]);
        assert_eq!(line_points((0, 0), (2, 2)), vec![(0, 0), (1, 1), (2, 2)]);
        let pts = line_points((5, 1), (0, 3));
        assert_eq!(pts.first(), Some(&(5, 1)));
        assert_eq!(pts.last(), Some(&(0, 3)));
        assert_eq!(pts.len(), 6);
        assert_eq!(line_points((2, 2), (2, 2)), vec![(2, 2)]);
    }

    #[test]
    fn test_line_mode_draws_between_two_points() {
        let mut c = Canvas::new(10, 5);
        c.toggle_line_mode();
        c.move_cursor(Arrow::Left);
        c.move_cursor(Arrow::Left);
        c.action();
        assert_eq!(c.line_start(), Some((3, 2)));
        for _ in 0..4 {
            c.move_cursor(Arrow::Right);
        }
        // Moving in line mode does not paint.
        assert_eq!(c.get((4, 2)), None);
        c.action();
        assert!((3..=7).all(|x| c.get((x, 2)).is_some()));
        assert_eq!(c.line_start(), None);
    }

    #[test]
    fn test_continuous_draw_follows_cursor() {
        let mut c = Canvas::new(6, 3);
        c.action();
        assert_eq!(c.tool(), Tool::Continuous);
        c.move_cursor(Arrow::Right);
        c.move_cursor(Arrow::Right);
        assert_eq!(c.to_text(glyph).lines().nth(1), Some("   ###"));
        c.action();
        c.move_cursor(Arrow::Left);
        c.move_cursor(Arrow::Left);
        c.move_cursor(Arrow::Left);
        assert_eq!(c.get((2, 1)), None);
    }

    #[test]
    fn test_flood_fill_stops_at_boundaries() {
        let mut c = Canvas::new(5, 5);
        c.set_brush(Brush::Shade);
        // Vertical wall at x = 1.
        for y in 0..5 {
            c.paint((1, y));
        }
        c.set_brush(Brush::Circle);
        c.fill();
        let text = c.to_text(glyph);
        for line in text.lines() {
            assert_eq!(line, " =OOO");
        }
    }

    #[test]
    fn test_fill_ignored_when_erasing() {
        let mut c = Canvas::new(3, 3);
        c.toggle_erase();
        c.fill();
        assert!(c.to_text(glyph).chars().all(|ch| ch == ' ' || ch == '\n'));
    }

    #[test]
    fn test_erase_removes_marks() {
        let mut c = Canvas::new(3, 3);
        c.action();
        assert!(c.get((1, 1)).is_some());
        c.toggle_erase();
        assert_eq!(c.tool(), Tool::Erase);
        c.paint((1, 1));
        assert_eq!(c.get((1, 1)), None);
        c.set_color(2);
        assert_eq!(c.tool(), Tool::Draw);
    }

    #[test]
    fn test_save_text_layout() {
        let mut c = Canvas::new(3, 2);
        c.paint((0, 0));
        c.set_brush(Brush::Circle);
        c.paint((2, 1));
        assert_eq!(c.to_text(glyph), "#  \n  O\n");
        c.clear();
        assert_eq!(c.to_text(glyph), "   \n   \n");
    }

    #[test]
    fn test_color_cycle_wraps() {
        let mut c = Canvas::new(3, 3);
        assert_eq!(PALETTE_NAMES[c.color() as usize], "White");
        c.cycle_color();
        c.cycle_color();
        assert_eq!(c.color(), 0);
        c.set_color(9);
        assert_eq!(c.color(), 0);
    }
}
