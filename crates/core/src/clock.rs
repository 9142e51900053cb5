//! Clock face geometry and seven-row digital glyphs.
//!
//! Everything here is a pure function of a [`ClockTime`]; reading the wall
//! clock is left to the caller.

pub const FACE_RADIUS: i32 = 10;
pub const DIGIT_ROWS: usize = 7;
pub const DIGIT_WIDTH: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    Analog,
    Digital,
    Both,
}

impl ClockMode {
    pub fn shows_analog(self) -> bool {
        matches!(self, ClockMode::Analog | ClockMode::Both)
    }

    pub fn shows_digital(self) -> bool {
        matches!(self, ClockMode::Digital | ClockMode::Both)
    }

    pub fn label(self) -> &'static str {
        match self {
            ClockMode::Analog => "ANALOG",
            ClockMode::Digital => "DIGITAL",
            ClockMode::Both => "BOTH",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

impl ClockTime {
    pub fn new(hour: u32, minute: u32, second: u32) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
            second: second % 60,
        }
    }

    /// `HH:MM:SS`.
    pub fn hms(&self) -> String {
        format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// What occupies one cell of the analog face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaceCell {
    Empty,
    Rim,
    /// Hour numeral 12, 3, 6 or 9, drawn from this cell rightwards.
    Numeral(u8),
    Marker,
    HourHand,
    MinuteHand,
    /// Second hand; `true` when the hand runs mostly vertically.
    SecondHand(bool),
    Center,
}

/// Analog face: `(2r+1)` rows by `2(2r+1)` columns, two columns per cell so
/// the circle looks round in a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Face {
    width: usize,
    height: usize,
    cells: Vec<FaceCell>,
}

impl Face {
    fn empty(radius: i32) -> Self {
        let d = (radius * 2 + 1) as usize;
        Self {
            width: d * 2,
            height: d,
            cells: vec![FaceCell::Empty; d * 2 * d],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> FaceCell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            FaceCell::Empty
        }
    }

    fn put(&mut self, x: i32, y: i32, cell: FaceCell) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = cell;
        }
    }

    /// Cell `r` units from the centre along `angle` (radians, 0 = 3 o'clock).
    fn polar(radius: i32, r: f64, angle: f64) -> (i32, i32) {
        let x = (radius as f64 + r * angle.cos()) as i32 * 2;
        let y = (radius as f64 + r * angle.sin()) as i32;
        (x, y)
    }

    fn hand(&mut self, radius: i32, length: f64, angle: f64, cell: FaceCell) {
        let steps = (radius as f64 * length) as i32;
        for r in 1..steps {
            let (x, y) = Self::polar(radius, r as f64, angle);
            self.put(x, y, cell);
        }
    }
}

/// Build the analog face for `t`.
pub fn analog_face(t: ClockTime, radius: i32) -> Face {
    let mut face = Face::empty(radius);
    let r = radius as f64;

    for deg in 0..360 {
        let (x, y) = Face::polar(radius, r, (deg as f64).to_radians());
        face.put(x, y, FaceCell::Rim);
    }

    for i in 0..12 {
        let angle = ((i * 30 - 90) as f64).to_radians();
        let (x, y) = Face::polar(radius, r - 1.0, angle);
        let cell = if i % 3 == 0 {
            FaceCell::Numeral(((i + 11) % 12 + 1) as u8)
        } else {
            FaceCell::Marker
        };
        face.put(x, y, cell);
    }

    let hour_angle = ((t.hour % 12) as f64 * 30.0 + t.minute as f64 * 0.5 - 90.0).to_radians();
    face.hand(radius, 0.5, hour_angle, FaceCell::HourHand);

    let minute_angle = (t.minute as f64 * 6.0 - 90.0).to_radians();
    face.hand(radius, 0.8, minute_angle, FaceCell::MinuteHand);

    // The second hand only draws over empty space and the rim.
    let second_angle = (t.second as f64 * 6.0 - 90.0).to_radians();
    let vertical = second_angle.sin().abs() > 0.5;
    for step in 1..(r * 0.9) as i32 {
        let (x, y) = Face::polar(radius, step as f64, second_angle);
        if x >= 0 && y >= 0 && matches!(face.get(x as usize, y as usize), FaceCell::Empty | FaceCell::Rim) {
            face.put(x, y, FaceCell::SecondHand(vertical));
        }
    }

    face.put(radius * 2, radius, FaceCell::Center);
    face
}

/// Seven-row glyph for a digit, `:` or space.
pub fn digit_glyph(ch: char) -> [&'static str; DIGIT_ROWS] {
    match ch {
        '0' => ["  ###  ", " #   # ", "#     #", "#     #", "#     #", " #   # ", "  ###  "],
        '1' => ["   #   ", "  ##   ", "   #   ", "   #   ", "   #   ", "   #   ", " ##### "],
        '2' => [" ##### ", "#     #", "      #", " ##### ", "#      ", "#      ", "#######"],
        '3' => [" ##### ", "#     #", "      #", " ##### ", "      #", "#     #", " ##### "],
        '4' => ["#      ", "#    # ", "#    # ", "#######", "     # ", "     # ", "     # "],
        '5' => ["#######", "#      ", "#      ", "###### ", "      #", "#     #", " ##### "],
        '6' => [" ##### ", "#     #", "#      ", "###### ", "#     #", "#     #", " ##### "],
        '7' => ["#######", "#     #", "     # ", "    #  ", "   #   ", "   #   ", "   #   "],
        '8' => [" ##### ", "#     #", "#     #", " ##### ", "#     #", "#     #", " ##### "],
        '9' => [" ##### ", "#     #", "#     #", " ######", "      #", "#     #", " ##### "],
        ':' => ["       ", "   ##  ", "   ##  ", "       ", "   ##  ", "   ##  ", "       "],
        _ => ["       "; DIGIT_ROWS],
    }
}

/// Rows of the big `HH:MM:SS` display; glyphs separated by one space.
pub fn digital_rows(t: ClockTime) -> [String; DIGIT_ROWS] {
    let mut rows: [String; DIGIT_ROWS] = Default::default();
    for ch in t.hms().chars() {
        let glyph = digit_glyph(ch);
        for (row, part) in rows.iter_mut().zip(glyph) {
            row.push_str(part);
            row.push(' ');
        }
    }
    rows
}
