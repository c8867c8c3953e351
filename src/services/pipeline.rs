use std::path::Path;

use crate::assets::AssetLoader;
use crate::encoding::{Artifact, MultiFormatEncoder};
use crate::error::PipelineError;
use crate::models::AppConfig;
use crate::rendering::{FontRegistry, SceneRenderer, SyntheticImage};
use crate::services::{ColorConversionService, ConversionReport, SourceImage};

/// Which half of the pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Color space conversions of the source image
    Conversions,
    /// Synthetic image rendering and multi-format encoding
    Synthetic,
}

impl Stage {
    pub const ALL: [Stage; 2] = [Stage::Conversions, Stage::Synthetic];
}

/// Everything a run produced.
#[derive(Debug, Default)]
pub struct RunReport {
    pub conversions: Option<ConversionReport>,
    pub synthetic: Vec<Artifact>,
}

impl RunReport {
    pub fn files_written(&self) -> usize {
        self.synthetic.len()
            + self
                .conversions
                .as_ref()
                .map_or(0, |report| report.written.len())
    }

    pub fn conversions_failed(&self) -> usize {
        self.conversions
            .as_ref()
            .map_or(0, |report| report.failed.len())
    }
}

/// Runs the conversion batch, then the synthetic render, one after the other.
pub struct Pipeline {
    config: AppConfig,
    assets: AssetLoader,
}

impl Pipeline {
    pub fn new(config: AppConfig, assets: AssetLoader) -> Self {
        Self { config, assets }
    }

    pub fn run(&self, out_dir: &Path, stages: &[Stage]) -> Result<RunReport, PipelineError> {
        let mut report = RunReport::default();

        if stages.contains(&Stage::Conversions) {
            report.conversions = Some(self.run_conversions(out_dir)?);
        }
        if stages.contains(&Stage::Synthetic) {
            report.synthetic = self.run_synthetic(out_dir)?;
        }

        tracing::info!(
            files = report.files_written(),
            skipped = report.conversions_failed(),
            out_dir = %out_dir.display(),
            "Run complete"
        );
        Ok(report)
    }

    pub fn run_conversions(&self, out_dir: &Path) -> Result<ConversionReport, PipelineError> {
        let source = SourceImage::load(&self.assets, &self.config.source_image)?;
        let service = ColorConversionService::new(
            self.config.output.prefix.clone(),
            self.config.conversion_spaces()?,
        );
        service.run(&source, out_dir)
    }

    pub fn run_synthetic(&self, out_dir: &Path) -> Result<Vec<Artifact>, PipelineError> {
        let image = self.render_synthetic()?;
        let encoder = MultiFormatEncoder::new(self.config.output_spec()?);
        Ok(encoder.write_all(&image, out_dir)?)
    }

    /// Load the configured fonts and draw the synthetic image.
    pub fn render_synthetic(&self) -> Result<SyntheticImage, PipelineError> {
        let spec = self.config.scene_spec()?;
        let renderer = SceneRenderer::new(self.load_fonts()?);
        Ok(renderer.render(&spec)?)
    }

    /// Read every configured font file. Any missing or unusable font is fatal.
    fn load_fonts(&self) -> Result<FontRegistry, PipelineError> {
        let fonts = self
            .config
            .fonts
            .iter()
            .map(|font| -> Result<_, PipelineError> {
                Ok((font.file.clone(), self.assets.read_font(&font.file)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FontRegistry::load(fonts)?)
    }
}
