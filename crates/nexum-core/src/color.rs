//! RGBA colors with straight (non-premultiplied) alpha.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid hex color `{0}`, expected #rgb, #rrggbb or #rrggbbaa")]
pub struct ParseColorError(pub String);

/// An sRGB color with an alpha channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0.0);
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with the alpha replaced (clamped to `0.0..=1.0`).
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Same color with the alpha multiplied by `k`.
    pub fn fade(self, k: f32) -> Self {
        self.with_alpha(self.a * k)
    }

    /// Linear interpolation of every channel, `t` clamped to `0.0..=1.0`.
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| -> u8 {
            (a as f32 + (b as f32 - a as f32) * t).round().clamp(0.0, 255.0) as u8
        };
        Rgba {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let err = || ParseColorError(hex.to_string());
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return Err(err());
        }
        let byte = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());

        match digits.len() {
            3 => {
                let nibble = |i: usize| byte(&digits[i..i + 1]).map(|v| v * 17);
                Ok(Rgba::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 | 8 => {
                let r = byte(&digits[0..2])?;
                let g = byte(&digits[2..4])?;
                let b = byte(&digits[4..6])?;
                let a = if digits.len() == 8 {
                    byte(&digits[6..8])? as f32 / 255.0
                } else {
                    1.0
                };
                Ok(Rgba::new(r, g, b, a))
            }
            _ => Err(err()),
        }
    }

    /// Terminal color for the RGB part; alpha is dropped.
    pub fn to_color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Rgba::TRANSPARENT
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a < 1.0 {
            write!(f, "{:02x}", (self.a * 255.0).round() as u8)?;
        }
        Ok(())
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgba::from_hex(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgba::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_string()
    }
}
