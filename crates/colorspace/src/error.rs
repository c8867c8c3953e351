//! Error types for color parsing and raster conversion

use std::fmt;
use std::num::ParseIntError;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 characters after stripping '#')
    InvalidLength,
    /// Invalid hexadecimal character encountered
    InvalidHex(ParseIntError),
}

impl From<ParseIntError> for ParseColorError {
    fn from(err: ParseIntError) -> Self {
        ParseColorError::InvalidHex(err)
    }
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 3 or 6 characters)")
            }
            ParseColorError::InvalidHex(err) => {
                write!(f, "invalid hex character: {}", err)
            }
        }
    }
}

impl std::error::Error for ParseColorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseColorError::InvalidHex(err) => Some(err),
            _ => None,
        }
    }
}

/// Unknown color space name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorSpaceError(pub String);

impl fmt::Display for ParseColorSpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown color space '{}' (expected gray, cie-xyz, linear-rgb, photo-ycc or srgb)",
            self.0
        )
    }
}

impl std::error::Error for ParseColorSpaceError {}

/// Error returned when a pixel buffer does not match its declared size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::BufferSize {
                width,
                height,
                expected,
                actual,
            } => write!(
                f,
                "RGB buffer for {}x{} must be {} bytes, got {}",
                width, height, expected, actual
            ),
        }
    }
}

impl std::error::Error for ConvertError {}
