use image::{DynamicImage, RgbImage};

use crate::assets::AssetLoader;
use crate::error::{PipelineError, SourceError};

/// JP2 container signature box
const JP2_SIGNATURE: [u8; 12] = [
    0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
];
/// Raw J2K codestream: SOC marker followed by SIZ
const J2K_SIGNATURE: [u8; 4] = [0xFF, 0x4F, 0xFF, 0x51];

/// The decoded source raster. Read-only once constructed; every
/// conversion works from its own copy of the pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceImage {
    pixels: RgbImage,
}

impl SourceImage {
    /// Read a bundled resource and decode it. The encoded bytes are dropped
    /// as soon as decoding finishes.
    pub fn load(loader: &AssetLoader, name: &str) -> Result<Self, PipelineError> {
        let bytes = loader.read_resource(name)?;
        let image = Self::decode(&bytes)?;
        tracing::info!(
            source = name,
            width = image.width(),
            height = image.height(),
            "Decoded source image"
        );
        Ok(image)
    }

    /// Decode JPEG 2000 (JP2 or raw codestream) or anything the `image`
    /// crate recognizes.
    pub fn decode(bytes: &[u8]) -> Result<Self, SourceError> {
        let decoded = if is_jpeg2000(bytes) {
            decode_jpeg2000(bytes)?
        } else {
            image::load_from_memory(bytes)?
        };
        Ok(Self::from_dynamic(&decoded))
    }

    /// Alpha, if any, is discarded.
    pub fn from_dynamic(image: &DynamicImage) -> Self {
        Self {
            pixels: image.to_rgb8(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn rgb(&self) -> &RgbImage {
        &self.pixels
    }
}

pub fn is_jpeg2000(bytes: &[u8]) -> bool {
    bytes.starts_with(&JP2_SIGNATURE) || bytes.starts_with(&J2K_SIGNATURE)
}

fn decode_jpeg2000(bytes: &[u8]) -> Result<DynamicImage, SourceError> {
    let j2k = jpeg2k::Image::from_bytes(bytes).map_err(|e| SourceError::Jpeg2000(e.to_string()))?;
    DynamicImage::try_from(&j2k).map_err(|e| SourceError::Jpeg2000(e.to_string()))
}
