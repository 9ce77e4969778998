//! Paint colours.

use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;

/// An 8-bit RGB colour with a fractional alpha, as used by fill styles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    /// Opacity in `0.0..=1.0`.
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Channels as floats in the `0.0..=255.0` range.
    pub fn channels(&self) -> [f32; 3] {
        [f32::from(self.r), f32::from(self.g), f32::from(self.b)]
    }

    /// Convert to a terminal colour, ignoring alpha.
    pub fn color(self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Error returned when a colour string is not `#RGB` or `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid colour {0:?}, expected #RGB or #RRGGBB")]
pub struct ParseColorError(pub String);

impl FromStr for Rgba {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        match hex.len() {
            3 => {
                // #0F0 expands each digit: 0 -> 00, F -> FF
                let digit = |i: usize| {
                    u8::from_str_radix(&hex[i..=i], 16)
                        .map(|v| v * 17)
                        .map_err(|_| err())
                };
                Ok(Self::opaque(digit(0)?, digit(1)?, digit(2)?))
            }
            6 => {
                let byte =
                    |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| err());
                Ok(Self::opaque(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => Err(err()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_short_hex() {
        assert_eq!("#0F0".parse::<Rgba>(), Ok(Rgba::opaque(0, 255, 0)));
        assert_eq!("#abc".parse::<Rgba>(), Ok(Rgba::opaque(0xaa, 0xbb, 0xcc)));
    }

    #[test]
    fn test_parse_long_hex() {
        assert_eq!("#00ff41".parse::<Rgba>(), Ok(Rgba::opaque(0, 255, 0x41)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("00FF00".parse::<Rgba>().is_err());
        assert!("#00FF0".parse::<Rgba>().is_err());
        assert!("#GG0000".parse::<Rgba>().is_err());
        assert!("#ＦＦＦ".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Rgba::new(0, 0, 0, 0.05).to_string(), "rgba(0, 0, 0, 0.05)");
    }
}
