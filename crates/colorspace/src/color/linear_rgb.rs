//! Linear RGB color type
//!
//! Linear RGB is the color space where light addition is physically accurate.
//! Luminance and CIE XYZ are both linear combinations of these channels.

/// Rec. 709 / sRGB luminance weights applied to linear channels.
pub const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// A color in linear RGB color space.
///
/// Values are typically in the range 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearRgb {
    /// Red channel (linear light intensity)
    pub r: f32,
    /// Green channel (linear light intensity)
    pub g: f32,
    /// Blue channel (linear light intensity)
    pub b: f32,
}

impl LinearRgb {
    #[inline]
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Relative luminance (CIE Y) of this color.
    #[inline]
    pub fn luminance(self) -> f32 {
        LUMA_WEIGHTS[0] * self.r + LUMA_WEIGHTS[1] * self.g + LUMA_WEIGHTS[2] * self.b
    }
}
