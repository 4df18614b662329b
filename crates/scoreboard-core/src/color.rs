//! `#RRGGBB` color handling
//!
//! Colors are stored as hex strings. Parsing is strict; resolution for
//! rendering never fails and substitutes a default instead.

use crate::errors::ScoreboardError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An opaque 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    pub const RED: Rgb = Rgb::new(0xFF, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ScoreboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex(s)
    }
}

/// Parse `#RRGGBB` (the leading `#` is optional)
///
/// # Errors
///
/// Returns `ScoreboardError::InvalidColor` unless the input is exactly six
/// hex digits after the optional `#`.
pub fn parse_hex(s: &str) -> Result<Rgb, ScoreboardError> {
    let invalid = || ScoreboardError::InvalidColor {
        field: "color".to_string(),
        value: s.to_string(),
    };

    let digits = s.strip_prefix('#').unwrap_or(s);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;
    Ok(Rgb::new(
        (value >> 16) as u8,
        ((value >> 8) & 0xFF) as u8,
        (value & 0xFF) as u8,
    ))
}

/// Resolve a stored color for rendering, falling back to `default` when the
/// value is empty or malformed.
pub fn resolve_or(s: &str, default: Rgb) -> Rgb {
    if s.trim().is_empty() {
        return default;
    }
    parse_hex(s.trim()).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_and_without_hash() {
        assert_eq!(parse_hex("#FF8000").unwrap(), Rgb::new(255, 128, 0));
        assert_eq!(parse_hex("ff8000").unwrap(), Rgb::new(255, 128, 0));
    }

    #[test]
    fn test_parse_rejects_wrong_length_and_digits() {
        assert!(parse_hex("#FFF").is_err());
        assert!(parse_hex("#FFFFFFF").is_err());
        assert!(parse_hex("#GG0000").is_err());
        assert!(parse_hex("").is_err());
        // u32 parsing would accept a sign; the digit check must not
        assert!(parse_hex("+FFFFF").is_err());
    }

    #[test]
    fn test_to_hex_is_upper_case() {
        assert_eq!(Rgb::new(0xab, 0x0c, 0xff).to_hex(), "#AB0CFF");
        assert_eq!(parse_hex("#ab0cff").unwrap().to_hex(), "#AB0CFF");
    }

    #[test]
    fn test_resolve_falls_back() {
        assert_eq!(resolve_or("", Rgb::WHITE), Rgb::WHITE);
        assert_eq!(resolve_or("not a color", Rgb::RED), Rgb::RED);
        assert_eq!(resolve_or(" #000000 ", Rgb::WHITE), Rgb::BLACK);
    }
}
