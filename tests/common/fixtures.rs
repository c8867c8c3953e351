//! Test fixtures: a throwaway resources/config/output layout.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use hopper::assets::AssetLoader;
use hopper::models::AppConfig;
use hopper::services::Pipeline;
use image::{ImageFormat, Rgb, RgbImage};
use tempfile::TempDir;

/// File name of the generated source image
pub const SOURCE_NAME: &str = "gradient.png";

/// Config that needs no bundled assets: a PNG source and no text labels.
pub const ASSET_FREE_CONFIG: &str = r##"
output:
  prefix: mytest
source_image: gradient.png
fonts: []
scene:
  labels: []
"##;

/// A small deterministic gradient, encoded as PNG.
pub fn gradient_source() -> RgbImage {
    RgbImage::from_fn(40, 24, |x, y| {
        Rgb([(x * 6) as u8, (y * 10) as u8, ((x + y) * 4) as u8])
    })
}

pub fn png_bytes(image: &RgbImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    image.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Temporary resources directory, config file and output directory.
pub struct Workspace {
    root: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self::with_config(ASSET_FREE_CONFIG)
    }

    pub fn with_config(config: &str) -> Self {
        let root = tempfile::tempdir().unwrap();
        let resources = root.path().join("resources");
        std::fs::create_dir_all(&resources).unwrap();
        std::fs::write(resources.join(SOURCE_NAME), png_bytes(&gradient_source())).unwrap();
        std::fs::write(root.path().join("config.yaml"), config).unwrap();
        Self { root }
    }

    pub fn loader(&self) -> AssetLoader {
        AssetLoader::new(
            Some(self.root.path().join("resources")),
            Some(self.root.path().join("fonts")),
            Some(self.root.path().join("config.yaml")),
        )
    }

    pub fn pipeline(&self) -> Pipeline {
        let loader = self.loader();
        let config = AppConfig::load_from_assets(&loader).unwrap();
        Pipeline::new(config, loader)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.path().join("out")
    }

    pub fn output(&self, name: &str) -> PathBuf {
        self.out_dir().join(name)
    }

    pub fn root(&self) -> &Path {
        self.root.path()
    }
}
