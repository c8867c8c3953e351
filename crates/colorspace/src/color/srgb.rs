//! sRGB color type
//!
//! sRGB is the encoding of every 8-bit raster this crate reads. Hex parsing
//! lives here too, so colors can be written in configuration files.

use std::str::FromStr;

use crate::error::ParseColorError;

/// A color in sRGB color space.
///
/// Values are in the range 0.0..=1.0 (mapping to 0..255 for 8-bit).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Srgb {
    /// Red channel (gamma-corrected, 0.0..=1.0)
    pub r: f32,
    /// Green channel (gamma-corrected, 0.0..=1.0)
    pub g: f32,
    /// Blue channel (gamma-corrected, 0.0..=1.0)
    pub b: f32,
}

impl Srgb {
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create an Srgb color from 8-bit unsigned integer values.
    ///
    /// # Example
    /// ```
    /// use colorspace::Srgb;
    /// let red = Srgb::from_u8(255, 0, 0);
    /// assert_eq!(red.r, 1.0);
    /// ```
    #[inline]
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    #[inline]
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array [R, G, B], rounding and clamping to 0..=255.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.g * 255.0).round().clamp(0.0, 255.0) as u8,
            (self.b * 255.0).round().clamp(0.0, 255.0) as u8,
        ]
    }
}

impl FromStr for Srgb {
    type Err = ParseColorError;

    /// Parse an sRGB color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive,
    /// surrounding whitespace trimmed.
    ///
    /// ```
    /// use colorspace::Srgb;
    ///
    /// let pink: Srgb = "#FFAFAF".parse().unwrap();
    /// assert_eq!(pink.to_bytes(), [255, 175, 175]);
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                // Shorthand: expand each digit by multiplying by 17 (0xF -> 0xFF)
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_round_trip_is_exact() {
        for i in 0..=255u8 {
            let bytes = [i, 255 - i, i / 2];
            assert_eq!(Srgb::from_bytes(bytes).to_bytes(), bytes);
        }
    }

    #[test]
    fn test_hex_parsing() {
        let white: Srgb = "#FFFFFF".parse().unwrap();
        assert_eq!(white, Srgb::WHITE);

        let red: Srgb = "f00".parse().unwrap();
        assert_eq!(red.to_bytes(), [255, 0, 0]);

        let color: Srgb = "  #AbC  ".parse().unwrap();
        assert_eq!(color, Srgb::from_u8(0xAA, 0xBB, 0xCC));
    }

    #[test]
    fn test_hex_parsing_errors() {
        assert!(matches!(
            "#GGG".parse::<Srgb>(),
            Err(ParseColorError::InvalidHex(_))
        ));
        assert_eq!("#FFFF".parse::<Srgb>(), Err(ParseColorError::InvalidLength));
        assert_eq!("".parse::<Srgb>(), Err(ParseColorError::InvalidLength));
        assert_eq!("#ééé".parse::<Srgb>(), Err(ParseColorError::InvalidLength));
    }
}
