//! Kodak PhotoYCC
//!
//! Luma and two chroma differences computed from gamma-encoded RGB, then
//! quantized with the Photo CD scaling so that a 100% white maps to luma
//! 182 and chroma sits near the middle of the 8-bit range.

use super::srgb::Srgb;

const LUMA_SCALE: f32 = 255.0 / 1.402;
const C1_SCALE: f32 = 111.40;
const C1_OFFSET: f32 = 156.0;
const C2_SCALE: f32 = 135.64;
const C2_OFFSET: f32 = 137.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhotoYcc {
    /// Luma, 0.0..=1.0 for in-gamut input
    pub y: f32,
    /// Blue difference B' - Y
    pub c1: f32,
    /// Red difference R' - Y
    pub c2: f32,
}

impl PhotoYcc {
    /// Quantize to the 8-bit Photo CD encoding.
    pub fn to_bytes(self) -> [u8; 3] {
        [
            quantize(self.y * LUMA_SCALE),
            quantize(C1_SCALE * self.c1 + C1_OFFSET),
            quantize(C2_SCALE * self.c2 + C2_OFFSET),
        ]
    }
}

#[inline]
fn quantize(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

impl From<Srgb> for PhotoYcc {
    fn from(c: Srgb) -> Self {
        let y = 0.299 * c.r + 0.587 * c.g + 0.114 * c.b;
        Self {
            y,
            c1: c.b - y,
            c2: c.r - y,
        }
    }
}
