//! Output encoders for the synthetic image.
//!
//! The canonical [`SyntheticImage`] is encoded as-is into TIFF, GIF, PNG and
//! an SVG wrapper. JPEG and BMP get an alpha-flattened copy, WBMP a 1-bit
//! copy of that flattened raster.

pub mod codecs;
pub mod narrow;
pub mod svg;
pub mod wbmp;

pub use codecs::encode_png;
pub use narrow::{flatten_alpha, MonoBitmap};

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::EncodeError;
use crate::models::OutputSpec;
use crate::rendering::SyntheticImage;

/// Every container the synthetic image is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Tiff,
    Gif,
    Png,
    Svg,
    Jpeg,
    Bmp,
    Wbmp,
}

impl OutputFormat {
    /// Write order: alpha-preserving first, then flattened, then 1-bit.
    pub const ALL: [OutputFormat; 7] = [
        OutputFormat::Tiff,
        OutputFormat::Gif,
        OutputFormat::Png,
        OutputFormat::Svg,
        OutputFormat::Jpeg,
        OutputFormat::Bmp,
        OutputFormat::Wbmp,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Tiff => "tiff",
            OutputFormat::Gif => "gif",
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Bmp => "bmp",
            OutputFormat::Wbmp => "wbmp",
        }
    }

    /// Whether the encoded file keeps the alpha channel.
    pub fn preserves_alpha(self) -> bool {
        matches!(
            self,
            OutputFormat::Tiff | OutputFormat::Gif | OutputFormat::Png | OutputFormat::Svg
        )
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A file written by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub bytes: usize,
}

/// Encodes one synthetic image into every [`OutputFormat`].
pub struct MultiFormatEncoder {
    spec: OutputSpec,
}

impl MultiFormatEncoder {
    pub fn new(spec: OutputSpec) -> Self {
        Self { spec }
    }

    /// Encode every format in memory, in [`OutputFormat::ALL`] order.
    pub fn encode_all(
        &self,
        image: &SyntheticImage,
    ) -> Result<Vec<(OutputFormat, Vec<u8>)>, EncodeError> {
        let rgba = image.rgba();
        let mut outputs = Vec::with_capacity(OutputFormat::ALL.len());

        // Handles transparency
        outputs.push((OutputFormat::Tiff, codecs::encode_tiff(rgba)?));
        outputs.push((OutputFormat::Gif, codecs::encode_gif(rgba, self.spec.gif_speed)?));
        outputs.push((OutputFormat::Png, codecs::encode_png_rgba(rgba)?));
        outputs.push((OutputFormat::Svg, svg::svg_document(rgba)?.into_bytes()));

        // Alpha flattened
        let flat = flatten_alpha(rgba, self.spec.flatten_background);
        outputs.push((
            OutputFormat::Jpeg,
            codecs::encode_jpeg(&flat, self.spec.jpeg_quality)?,
        ));
        outputs.push((OutputFormat::Bmp, codecs::encode_bmp(&flat)?));

        // Monochrome
        let mono = MonoBitmap::threshold(&flat);
        outputs.push((OutputFormat::Wbmp, wbmp::encode(&mono)?));

        Ok(outputs)
    }

    /// Encode every format and write `<prefix>.<ext>` files into `dir`.
    pub fn write_all(
        &self,
        image: &SyntheticImage,
        dir: &Path,
    ) -> Result<Vec<Artifact>, EncodeError> {
        self.encode_all(image)?
            .into_iter()
            .map(|(format, bytes)| {
                let name = format!("{}.{}", self.spec.prefix, format.extension());
                write_artifact(dir, &name, &bytes)
            })
            .collect()
    }
}

/// Write one output file, creating the directory if needed.
pub fn write_artifact(dir: &Path, name: &str, bytes: &[u8]) -> Result<Artifact, EncodeError> {
    let path = dir.join(name);
    let write_err = |source| EncodeError::Write {
        path: path.clone(),
        source,
    };
    fs::create_dir_all(dir).map_err(write_err)?;
    fs::write(&path, bytes).map_err(write_err)?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Wrote output");
    Ok(Artifact {
        bytes: bytes.len(),
        path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    fn half_transparent() -> SyntheticImage {
        let mut img = RgbaImage::from_pixel(16, 8, Rgba([255, 0, 0, 255]));
        img.put_pixel(3, 3, Rgba([0, 0, 255, 0]));
        SyntheticImage::from_rgba(img)
    }

    #[test]
    fn test_encode_all_in_declared_order() {
        let encoder = MultiFormatEncoder::new(OutputSpec::default());
        let formats: Vec<_> = encoder
            .encode_all(&half_transparent())
            .unwrap()
            .into_iter()
            .map(|(f, _)| f)
            .collect();
        assert_eq!(formats, OutputFormat::ALL.to_vec());
    }

    #[test]
    fn test_encoding_does_not_touch_canonical_image() {
        let image = half_transparent();
        let before = image.clone();
        MultiFormatEncoder::new(OutputSpec::default())
            .encode_all(&image)
            .unwrap();
        assert_eq!(image, before);
    }

    #[test]
    fn test_write_all_names_files_by_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let spec = OutputSpec {
            prefix: "frame".to_string(),
            ..OutputSpec::default()
        };
        let artifacts = MultiFormatEncoder::new(spec)
            .write_all(&half_transparent(), dir.path())
            .unwrap();

        let mut names: Vec<_> = artifacts
            .iter()
            .map(|a| a.path.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "frame.bmp",
                "frame.gif",
                "frame.jpg",
                "frame.png",
                "frame.svg",
                "frame.tiff",
                "frame.wbmp"
            ]
        );
        for artifact in &artifacts {
            assert_eq!(
                std::fs::metadata(&artifact.path).unwrap().len() as usize,
                artifact.bytes
            );
        }
    }

    #[test]
    fn test_write_into_file_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"").unwrap();
        let err = write_artifact(&blocker, "x.png", b"data").unwrap_err();
        assert!(matches!(err, EncodeError::Write { .. }));
    }
}
