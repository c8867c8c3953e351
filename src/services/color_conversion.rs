use colorspace::{ColorSpace, PixelLayout};
use std::path::{Path, PathBuf};

use crate::encoding::{encode_png, write_artifact, Artifact};
use crate::error::{PipelineError, SourceError};
use crate::services::SourceImage;

/// A conversion whose output could not be written.
#[derive(Debug)]
pub struct ConversionFailure {
    pub space: ColorSpace,
    pub path: PathBuf,
    pub error: String,
}

/// Outcome of a conversion batch. `written.len() + failed.len()` always
/// equals the number of conversions attempted.
#[derive(Debug, Default)]
pub struct ConversionReport {
    pub written: Vec<(ColorSpace, Artifact)>,
    pub failed: Vec<ConversionFailure>,
}

impl ConversionReport {
    pub fn attempted(&self) -> usize {
        self.written.len() + self.failed.len()
    }
}

/// Runs each configured color space conversion over the source image and
/// writes one PNG per conversion.
pub struct ColorConversionService {
    prefix: String,
    spaces: Vec<ColorSpace>,
}

impl ColorConversionService {
    pub fn new(prefix: impl Into<String>, spaces: Vec<ColorSpace>) -> Self {
        Self {
            prefix: prefix.into(),
            spaces,
        }
    }

    /// `<prefix>_<suffix>.png`
    pub fn output_name(&self, space: ColorSpace) -> String {
        format!("{}_{}.png", self.prefix, space.suffix())
    }

    /// Convert a copy of the source pixels and encode the result as PNG.
    pub fn encode(&self, space: ColorSpace, source: &SourceImage) -> Result<Vec<u8>, PipelineError> {
        let rgb = source.rgb();
        let raster = space
            .convert(rgb.as_raw(), rgb.width(), rgb.height())
            .map_err(SourceError::from)?;
        let color_type = match raster.layout {
            PixelLayout::Gray8 => png::ColorType::Grayscale,
            PixelLayout::Rgb8 => png::ColorType::Rgb,
        };
        Ok(encode_png(raster.width, raster.height, color_type, &raster.data)?)
    }

    /// Run every conversion into `dir`.
    ///
    /// A failed write is logged and recorded, and the batch moves on to the
    /// next conversion. Conversion and encoding errors are returned.
    pub fn run(&self, source: &SourceImage, dir: &Path) -> Result<ConversionReport, PipelineError> {
        let mut report = ConversionReport::default();

        for &space in &self.spaces {
            let png = self.encode(space, source)?;
            let name = self.output_name(space);
            match write_artifact(dir, &name, &png) {
                Ok(artifact) => report.written.push((space, artifact)),
                Err(e) => {
                    tracing::warn!(conversion = %space, %e, "Skipping conversion output");
                    report.failed.push(ConversionFailure {
                        space,
                        path: dir.join(&name),
                        error: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            written = report.written.len(),
            failed = report.failed.len(),
            "Color conversions finished"
        );
        Ok(report)
    }
}
