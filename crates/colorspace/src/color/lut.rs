//! Gamma lookup table access
//!
//! The table is generated at compile time by build.rs.

include!(concat!(env!("OUT_DIR"), "/gamma_lut.rs"));

/// Decode an 8-bit sRGB code value to linear light (exact table lookup).
#[inline]
pub fn srgb8_to_linear(code: u8) -> f32 {
    SRGB8_TO_LINEAR[code as usize]
}
