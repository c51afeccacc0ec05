//! Colour types for chat text.
//!
//! [`HexColor`] is the validated form of the `#RRGGBB` strings that
//! administrators supply. [`NamedColor`] covers the handful of fixed
//! colours used for system messages.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// An RGB colour parsed from `#RRGGBB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl HexColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses a colour of exactly the form `#RRGGBB` (hex digits in
    /// either case).
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidColor`] for anything else: a
    /// missing `#`, the wrong number of digits, or non-hex characters.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let invalid = || ProtocolError::InvalidColor(raw.to_string());

        let digits = raw
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.bytes().all(|b| b.is_ascii_hexdigit()))
            .ok_or_else(invalid)?;
        let value = u32::from_str_radix(digits, 16).map_err(|_| invalid())?;

        Ok(Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        })
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The fixed colours used for framework-generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NamedColor {
    White,
    Red,
    Green,
}

impl NamedColor {
    /// The legacy formatting code for this colour (the character after
    /// the section sign).
    pub fn legacy_code(self) -> char {
        match self {
            Self::White => 'f',
            Self::Red => 'c',
            Self::Green => 'a',
        }
    }
}

/// Either a named colour or an arbitrary RGB one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextColor {
    Named(NamedColor),
    Hex(HexColor),
}

impl From<NamedColor> for TextColor {
    fn from(color: NamedColor) -> Self {
        Self::Named(color)
    }
}

impl From<HexColor> for TextColor {
    fn from(color: HexColor) -> Self {
        Self::Hex(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_both_cases() {
        assert_eq!(HexColor::parse("#ff0000").unwrap(), HexColor::new(255, 0, 0));
        assert_eq!(HexColor::parse("#00FF7f").unwrap(), HexColor::new(0, 255, 127));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for raw in ["ff0000", "#fff", "#ff00000", "#gg0000", "", "#", "# ff000", "#ff00é"] {
            assert!(
                matches!(HexColor::parse(raw), Err(ProtocolError::InvalidColor(_))),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_is_lowercase() {
        assert_eq!(HexColor::parse("#ABCDEF").unwrap().to_string(), "#abcdef");
    }
}
