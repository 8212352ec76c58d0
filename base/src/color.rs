//! 8-bit RGBA colors.
//!
//! Colors are written to settings stores as `#rrggbb` (or `#rrggbbaa` when not opaque)
//! and can be read back from that form, from the short `#rgb`/`#rgba` forms,
//! or from a small set of names.
use std::str::FromStr;
use std::{error, fmt};

/// An opaque or translucent color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorU8 {
    r: u8,
    g: u8,
    b: u8,
    a: u8,
}

/// Black
pub const BLACK: ColorU8 = ColorU8::from_rgb(0, 0, 0);
/// White
pub const WHITE: ColorU8 = ColorU8::from_rgb(255, 255, 255);
/// Gray
pub const GRAY: ColorU8 = ColorU8::from_rgb(128, 128, 128);
/// Dark gray
pub const DARKGRAY: ColorU8 = ColorU8::from_rgb(169, 169, 169);
/// Light gray
pub const LIGHTGRAY: ColorU8 = ColorU8::from_rgb(211, 211, 211);
/// Red
pub const RED: ColorU8 = ColorU8::from_rgb(255, 0, 0);
/// Green
pub const GREEN: ColorU8 = ColorU8::from_rgb(0, 128, 0);
/// Blue
pub const BLUE: ColorU8 = ColorU8::from_rgb(0, 0, 255);
/// Cyan
pub const CYAN: ColorU8 = ColorU8::from_rgb(0, 255, 255);
/// Magenta
pub const MAGENTA: ColorU8 = ColorU8::from_rgb(255, 0, 255);
/// Yellow
pub const YELLOW: ColorU8 = ColorU8::from_rgb(255, 255, 0);
/// Fully transparent black
pub const TRANSPARENT: ColorU8 = ColorU8::from_rgba(0, 0, 0, 0);

const NAMES: &[(&str, ColorU8)] = &[
    ("black", BLACK),
    ("white", WHITE),
    ("gray", GRAY),
    ("grey", GRAY),
    ("darkgray", DARKGRAY),
    ("darkgrey", DARKGRAY),
    ("lightgray", LIGHTGRAY),
    ("lightgrey", LIGHTGRAY),
    ("red", RED),
    ("green", GREEN),
    ("blue", BLUE),
    ("cyan", CYAN),
    ("magenta", MAGENTA),
    ("yellow", YELLOW),
    ("transparent", TRANSPARENT),
];

impl ColorU8 {
    /// Build an opaque color from its components
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        ColorU8 { r, g, b, a: 255 }
    }

    /// Build a color from its components, alpha included
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorU8 { r, g, b, a }
    }

    /// The red, green, blue and alpha components
    pub const fn rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// The alpha component
    pub const fn alpha(&self) -> u8 {
        self.a
    }

    /// The opacity in the range 0 to 1, or None if the color is opaque
    pub const fn opacity(&self) -> Option<f32> {
        if self.a == 255 {
            None
        } else {
            Some(self.a as f32 / 255.0)
        }
    }

    /// The color as `#rrggbb`, ignoring the alpha component
    pub fn html(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Writes `#rrggbb`, or `#rrggbbaa` for translucent colors
impl fmt::Display for ColorU8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

const fn hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

const fn hex_short(c: u8) -> Option<u8> {
    match hex_digit(c) {
        Some(d) => Some(d << 4 | d),
        None => None,
    }
}

const fn hex_pair(hi: u8, lo: u8) -> Option<u8> {
    match (hex_digit(hi), hex_digit(lo)) {
        (Some(hi), Some(lo)) => Some(hi << 4 | lo),
        _ => None,
    }
}

macro_rules! try_opt {
    ($e:expr) => {
        match $e {
            Some(v) => v,
            None => return None,
        }
    };
}

const fn parse_hex(hex: &[u8]) -> Option<ColorU8> {
    if hex.is_empty() || hex[0] != b'#' {
        return None;
    }
    match hex.len() {
        4 | 5 => {
            let r = try_opt!(hex_short(hex[1]));
            let g = try_opt!(hex_short(hex[2]));
            let b = try_opt!(hex_short(hex[3]));
            let a = if hex.len() == 5 {
                try_opt!(hex_short(hex[4]))
            } else {
                255
            };
            Some(ColorU8::from_rgba(r, g, b, a))
        }
        7 | 9 => {
            let r = try_opt!(hex_pair(hex[1], hex[2]));
            let g = try_opt!(hex_pair(hex[3], hex[4]));
            let b = try_opt!(hex_pair(hex[5], hex[6]));
            let a = if hex.len() == 9 {
                try_opt!(hex_pair(hex[7], hex[8]))
            } else {
                255
            };
            Some(ColorU8::from_rgba(r, g, b, a))
        }
        _ => None,
    }
}

/// Error returned when a string can't be parsed as [`ColorU8`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// The input is empty
    Empty,
    /// The input starts with `#` but is not a valid hex color
    InvalidHex,
    /// The input is not a known color name
    UnknownName,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Empty => write!(f, "empty color string"),
            ParseError::InvalidHex => write!(f, "invalid hex color"),
            ParseError::UnknownName => write!(f, "unknown color name"),
        }
    }
}

impl error::Error for ParseError {}

impl FromStr for ColorU8 {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.is_empty() {
            Err(ParseError::Empty)
        } else if raw.starts_with('#') {
            parse_hex(raw.as_bytes()).ok_or(ParseError::InvalidHex)
        } else {
            NAMES
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(raw))
                .map(|(_, c)| *c)
                .ok_or(ParseError::UnknownName)
        }
    }
}
