//! Lossy narrowing copies for formats that cannot hold the full raster.
//!
//! Nothing here mutates its input: each step returns a new buffer.

use colorspace::Srgb;
use image::{Rgb, RgbImage, RgbaImage};

/// Composite straight-alpha RGBA onto an opaque background, dropping alpha.
pub fn flatten_alpha(src: &RgbaImage, background: Srgb) -> RgbImage {
    let bg = background.to_bytes();
    RgbImage::from_fn(src.width(), src.height(), |x, y| {
        let [r, g, b, a] = src.get_pixel(x, y).0;
        let a = a as u32;
        let blend = |c: u8, bg: u8| ((c as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8;
        Rgb([blend(r, bg[0]), blend(g, bg[1]), blend(b, bg[2])])
    })
}

/// A 1-bit raster, rows packed MSB first and padded to whole bytes.
/// A set bit is white.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonoBitmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl MonoBitmap {
    /// All-black bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        let stride = (width as usize).div_ceil(8);
        Self {
            width,
            height,
            data: vec![0; stride * height as usize],
        }
    }

    /// Wrap packed row data; `None` if the length does not match.
    pub fn from_packed(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let stride = (width as usize).div_ceil(8);
        (data.len() == stride * height as usize).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Map each pixel to the nearer of black and white (no dithering).
    pub fn threshold(src: &RgbImage) -> Self {
        let mut bitmap = Self::new(src.width(), src.height());
        for (x, y, px) in src.enumerate_pixels() {
            let [r, g, b] = px.0.map(|c| c as i32);
            let to_black = r * r + g * g + b * b;
            let to_white = (255 - r).pow(2) + (255 - g).pow(2) + (255 - b).pow(2);
            // Ties go to black, the first palette entry
            if to_white < to_black {
                bitmap.set(x, y, true);
            }
        }
        bitmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per packed row.
    pub fn stride(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        let (index, mask) = self.locate(x, y);
        self.data[index] & mask != 0
    }

    pub fn set(&mut self, x: u32, y: u32, white: bool) {
        let (index, mask) = self.locate(x, y);
        if white {
            self.data[index] |= mask;
        } else {
            self.data[index] &= !mask;
        }
    }

    fn locate(&self, x: u32, y: u32) -> (usize, u8) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let index = y as usize * self.stride() + x as usize / 8;
        (index, 0x80 >> (x % 8))
    }
}
