// Palette color, parsed from a 6 digit hex string and formatted as a CSS rgba() string

use std::fmt;
use thiserror::Error;

/// Returned by `hex_to_rgba` when its input cannot be parsed.
pub const TRANSPARENT: &str = "rgba(0,0,0,0)";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    #[error("expected 6 hex digits, got {0} characters")]
    BadLength(usize),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn from_u32(num: u32) -> Color {
        let r = (num >> 16) as u8;
        let g = (num >> 8) as u8;
        let b = num as u8;

        Color { r, g, b }
    }

    /// Parses `#rrggbb` or `rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Color, ColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 {
            return Err(ColorError::BadLength(digits.len()));
        }
        // from_str_radix alone would accept a leading '+'
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(hex.to_owned()));
        }
        let num =
            u32::from_str_radix(digits, 16).map_err(|_| ColorError::BadDigit(hex.to_owned()))?;
        Ok(Color::from_u32(num))
    }

    pub fn rgba(&self, alpha: f64) -> String {
        format!("rgba({},{},{},{})", self.r, self.g, self.b, alpha)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Converts a hex color plus alpha into an `rgba(r,g,b,a)` string.
///
/// Malformed input yields `TRANSPARENT` and a warning instead of an error.
pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    match Color::from_hex(hex) {
        Ok(color) => color.rgba(alpha),
        Err(e) => {
            log::warn!("falling back to transparent for {:?}: {}", hex, e);
            TRANSPARENT.to_owned()
        }
    }
}
