//! Fill colors for discs and background clears.
//!
//! Colors are parsed from the small CSS-like vocabulary the drawing surface speaks:
//! a handful of named colors, `rgb(r, g, b)` and `#rrggbb` / `#rgb` hex.

use crate::error::ColorParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// sRGB color with 8 bits per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED: &[(&str, Color)] = &[
    ("black", Color::BLACK),
    ("white", Color::WHITE),
    ("red", Color::RED),
    ("green", Color::rgb(0, 128, 0)),
    ("lime", Color::rgb(0, 255, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("orange", Color::rgb(255, 165, 0)),
    ("gold", Color::rgb(255, 215, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("magenta", Color::rgb(255, 0, 255)),
    ("fuchsia", Color::rgb(255, 0, 255)),
    ("cyan", Color::rgb(0, 255, 255)),
    ("aqua", Color::rgb(0, 255, 255)),
    ("pink", Color::rgb(255, 192, 203)),
    ("gray", Color::rgb(128, 128, 128)),
    ("grey", Color::rgb(128, 128, 128)),
];

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);

    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    fn parse_rgb_function(body: &str, input: &str) -> Result<Self, ColorParseError> {
        let channels = body
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ColorParseError::Malformed(input.to_string()))?;

        match channels.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            _ => Err(ColorParseError::Malformed(input.to_string())),
        }
    }

    fn parse_hex(digits: &str, input: &str) -> Result<Self, ColorParseError> {
        let malformed = || ColorParseError::Malformed(input.to_string());
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        match digits.len() {
            6 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16);
                Ok(Self::rgb(
                    channel(0).map_err(|_| malformed())?,
                    channel(2).map_err(|_| malformed())?,
                    channel(4).map_err(|_| malformed())?,
                ))
            }
            // #rgb shorthand: each nibble is doubled
            3 => {
                let channel = |i: usize| u8::from_str_radix(&digits[i..=i], 16).map(|v| v * 17);
                Ok(Self::rgb(
                    channel(0).map_err(|_| malformed())?,
                    channel(1).map_err(|_| malformed())?,
                    channel(2).map_err(|_| malformed())?,
                ))
            }
            _ => Err(malformed()),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::RED
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lower = trimmed.to_ascii_lowercase();

        if let Some(hex) = lower.strip_prefix('#') {
            return Self::parse_hex(hex, s);
        }

        if let Some(body) = lower
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return Self::parse_rgb_function(body, s);
        }

        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, color)| *color)
            .ok_or_else(|| ColorParseError::UnknownName(trimmed.to_string()))
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}
