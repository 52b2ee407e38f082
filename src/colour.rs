use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// A cell background colour as the Sheets API reports it: three channel
/// intensities in `[0.0, 1.0]`, no alpha.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "RawColour")]
pub struct Colour {
    red: f64,
    green: f64,
    blue: f64,
}

#[derive(Debug, Error, PartialEq)]
#[error("colour channel {channel} is {value}, expected a value in [0.0, 1.0]")]
pub struct InvalidColour {
    pub channel: &'static str,
    pub value: f64,
}

impl Colour {
    /// Constructor for literal colours. Panics if a channel is NaN or outside
    /// `[0.0, 1.0]`, which fails the build when used in a `const`.
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        assert!(
            in_unit_range(red) && in_unit_range(green) && in_unit_range(blue),
            "colour channels must lie in [0.0, 1.0]"
        );
        Self { red, green, blue }
    }

    pub fn new(red: f64, green: f64, blue: f64) -> Result<Self, InvalidColour> {
        for (channel, value) in [("red", red), ("green", green), ("blue", blue)] {
            if !in_unit_range(value) {
                return Err(InvalidColour { channel, value });
            }
        }
        Ok(Self { red, green, blue })
    }

    pub fn red(&self) -> f64 {
        self.red
    }

    pub fn green(&self) -> f64 {
        self.green
    }

    pub fn blue(&self) -> f64 {
        self.blue
    }

    /// Euclidean distance over the three channels.
    pub fn distance(&self, other: &Colour) -> f64 {
        let dr = self.red - other.red;
        let dg = self.green - other.green;
        let db = self.blue - other.blue;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

// NaN fails both comparisons.
const fn in_unit_range(value: f64) -> bool {
    value >= 0.0 && value <= 1.0
}

impl TryFrom<(f64, f64, f64)> for Colour {
    type Error = InvalidColour;

    fn try_from((red, green, blue): (f64, f64, f64)) -> Result<Self, Self::Error> {
        Colour::new(red, green, blue)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.red, self.green, self.blue)
    }
}

// The Sheets API leaves out channels that are zero.
#[derive(Deserialize)]
struct RawColour {
    #[serde(default)]
    red: f64,
    #[serde(default)]
    green: f64,
    #[serde(default)]
    blue: f64,
}

impl TryFrom<RawColour> for Colour {
    type Error = InvalidColour;

    fn try_from(raw: RawColour) -> Result<Self, Self::Error> {
        Colour::new(raw.red, raw.green, raw.blue)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ScreenNumber {
    One = 1,
    Two = 2,
    Three = 3,
}

/// What a timetable cell's background colour says about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ShiftCategory {
    Unassigned,
    Screen1,
    Screen2,
    Screen3,
}

impl ShiftCategory {
    pub const ALL: [ShiftCategory; 4] = [
        ShiftCategory::Unassigned,
        ShiftCategory::Screen1,
        ShiftCategory::Screen2,
        ShiftCategory::Screen3,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ShiftCategory::Unassigned => "unassigned",
            ShiftCategory::Screen1 => "screen-1",
            ShiftCategory::Screen2 => "screen-2",
            ShiftCategory::Screen3 => "screen-3",
        }
    }

    pub fn screen(&self) -> Option<ScreenNumber> {
        match self {
            ShiftCategory::Unassigned => None,
            ShiftCategory::Screen1 => Some(ScreenNumber::One),
            ShiftCategory::Screen2 => Some(ScreenNumber::Two),
            ShiftCategory::Screen3 => Some(ScreenNumber::Three),
        }
    }
}

impl fmt::Display for ShiftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown shift category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ShiftCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShiftCategory::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}
