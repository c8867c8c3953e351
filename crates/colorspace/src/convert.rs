//! Whole-raster conversions from 8-bit sRGB into a named color space.
//!
//! Every conversion is a pure function of its input buffer: it never
//! touches the source and always allocates a fresh output raster.

use std::fmt;
use std::str::FromStr;

use crate::color::{srgb8_to_linear, CieXyz, LinearRgb, PhotoYcc, Srgb};
use crate::error::{ConvertError, ParseColorSpaceError};

/// Target color space of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorSpace {
    /// Linear-light luminance, one channel
    Gray,
    /// CIE XYZ normalized to the D65 white
    CieXyz,
    /// sRGB primaries without the transfer function
    LinearRgb,
    /// Kodak PhotoYCC
    PhotoYcc,
    /// sRGB itself (identity)
    Srgb,
}

/// Memory layout of a converted raster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    Gray8,
    Rgb8,
}

impl PixelLayout {
    pub fn channels(self) -> usize {
        match self {
            PixelLayout::Gray8 => 1,
            PixelLayout::Rgb8 => 3,
        }
    }
}

/// Output of a conversion. Row-major, tightly packed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub data: Vec<u8>,
}

impl ColorSpace {
    /// All conversions, in the order they are run by default.
    pub const ALL: [ColorSpace; 5] = [
        ColorSpace::Gray,
        ColorSpace::CieXyz,
        ColorSpace::LinearRgb,
        ColorSpace::PhotoYcc,
        ColorSpace::Srgb,
    ];

    /// Configuration name of this color space.
    pub fn name(self) -> &'static str {
        match self {
            ColorSpace::Gray => "gray",
            ColorSpace::CieXyz => "cie-xyz",
            ColorSpace::LinearRgb => "linear-rgb",
            ColorSpace::PhotoYcc => "photo-ycc",
            ColorSpace::Srgb => "srgb",
        }
    }

    /// File name suffix used for this conversion's output.
    pub fn suffix(self) -> &'static str {
        match self {
            ColorSpace::Gray => "toG",
            ColorSpace::CieXyz => "toC",
            ColorSpace::LinearRgb => "toL",
            ColorSpace::PhotoYcc => "toP",
            ColorSpace::Srgb => "toS",
        }
    }

    pub fn layout(self) -> PixelLayout {
        match self {
            ColorSpace::Gray => PixelLayout::Gray8,
            _ => PixelLayout::Rgb8,
        }
    }

    /// Convert a packed 8-bit RGB buffer into this color space.
    ///
    /// # Example
    /// ```
    /// use colorspace::{ColorSpace, PixelLayout};
    ///
    /// let raster = ColorSpace::Gray.convert(&[255, 255, 255], 1, 1).unwrap();
    /// assert_eq!(raster.layout, PixelLayout::Gray8);
    /// assert_eq!(raster.data, vec![255]);
    /// ```
    pub fn convert(self, rgb: &[u8], width: u32, height: u32) -> Result<Raster, ConvertError> {
        let expected = width as usize * height as usize * 3;
        if rgb.len() != expected {
            return Err(ConvertError::BufferSize {
                width,
                height,
                expected,
                actual: rgb.len(),
            });
        }

        let layout = self.layout();
        let mut data = Vec::with_capacity(width as usize * height as usize * layout.channels());
        for px in rgb.chunks_exact(3) {
            let px = [px[0], px[1], px[2]];
            match self {
                ColorSpace::Gray => data.push(unit_to_u8(decode(px).luminance())),
                _ => data.extend_from_slice(&self.convert_pixel(px)),
            }
        }

        Ok(Raster {
            width,
            height,
            layout,
            data,
        })
    }

    /// Convert one sRGB pixel into a three-channel encoding.
    ///
    /// Gray is returned replicated across the three channels.
    pub fn convert_pixel(self, px: [u8; 3]) -> [u8; 3] {
        match self {
            ColorSpace::Gray => {
                let y = unit_to_u8(decode(px).luminance());
                [y, y, y]
            }
            ColorSpace::CieXyz => CieXyz::from(decode(px)).normalized().map(unit_to_u8),
            ColorSpace::LinearRgb => {
                let lin = decode(px);
                [lin.r, lin.g, lin.b].map(unit_to_u8)
            }
            ColorSpace::PhotoYcc => PhotoYcc::from(Srgb::from_bytes(px)).to_bytes(),
            ColorSpace::Srgb => px,
        }
    }
}

#[inline]
fn decode(px: [u8; 3]) -> LinearRgb {
    LinearRgb::new(
        srgb8_to_linear(px[0]),
        srgb8_to_linear(px[1]),
        srgb8_to_linear(px[2]),
    )
}

#[inline]
fn unit_to_u8(v: f32) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = ParseColorSpaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ColorSpace::ALL
            .into_iter()
            .find(|cs| cs.name().eq_ignore_ascii_case(wanted) || cs.suffix() == wanted)
            .ok_or_else(|| ParseColorSpaceError(s.to_string()))
    }
}
