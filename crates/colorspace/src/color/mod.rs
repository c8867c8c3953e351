//! Color types and conversion utilities
//!
//! - **sRGB**: storage encoding of every input raster.
//! - **LinearRgb**: linear light, the base for luminance and XYZ.
//! - **CieXyz**: device-independent tristimulus values (D65).
//! - **PhotoYcc**: Kodak Photo CD luma/chroma encoding.

mod linear_rgb;
mod lut;
mod srgb;
mod xyz;
mod ycc;

pub use linear_rgb::{LinearRgb, LUMA_WEIGHTS};
pub use lut::srgb8_to_linear;
pub use srgb::Srgb;
pub use xyz::{CieXyz, D65_WHITE};
pub use ycc::PhotoYcc;
