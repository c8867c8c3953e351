#![allow(clippy::excessive_precision)]

//! colorspace: per-pixel color space conversions for 8-bit sRGB rasters
//!
//! # Quick Start
//!
//! ```
//! use colorspace::ColorSpace;
//!
//! let rgb = vec![200u8, 120, 40, 10, 20, 30];
//! for cs in ColorSpace::ALL {
//!     let raster = cs.convert(&rgb, 2, 1).unwrap();
//!     assert_eq!(raster.data.len(), 2 * raster.layout.channels());
//! }
//! ```
//!
//! # Color Spaces
//!
//! - [`Srgb`]: gamma-encoded input/output values, parsed from hex strings
//! - [`LinearRgb`]: linear light, source of luminance and XYZ
//! - [`CieXyz`]: tristimulus values against the D65 white
//! - [`PhotoYcc`]: Photo CD luma/chroma
//!
//! Gamma decoding uses a table generated by `build.rs` from the exact
//! IEC 61966-2-1 decode formula, so results are bit-identical across runs.

pub mod color;
pub mod convert;
pub mod error;

pub use color::{CieXyz, LinearRgb, PhotoYcc, Srgb};
pub use convert::{ColorSpace, PixelLayout, Raster};
pub use error::{ConvertError, ParseColorError, ParseColorSpaceError};
