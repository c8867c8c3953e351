//! Asset loading with embedded fallbacks
//!
//! Source images, fonts and the default config are compiled into the binary.
//! Each category can be overridden from the filesystem:
//!
//! - If the override path is NOT set: use embedded assets only
//! - If it IS set and contains the requested file: read it from disk
//! - Otherwise fall back to the embedded copy

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::AssetError;

/// Embedded source images
#[derive(RustEmbed)]
#[folder = "resources/"]
#[include = "*.jp2"]
#[include = "*.j2k"]
#[include = "*.png"]
#[include = "*.jpg"]
#[include = "*.jpeg"]
struct EmbeddedResources;

/// Embedded font assets
#[derive(RustEmbed)]
#[folder = "fonts/"]
#[include = "*.ttf"]
#[include = "*.otf"]
struct EmbeddedFonts;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

/// Asset category for selective operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetCategory {
    Resources,
    Fonts,
    Config,
}

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem override
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External resources directory (from RESOURCES_DIR env var)
    resources_dir: Option<PathBuf>,
    /// External fonts directory (from FONTS_DIR env var)
    fonts_dir: Option<PathBuf>,
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
}

impl AssetLoader {
    /// Paths should be `Some` only if the corresponding override was given.
    pub fn new(
        resources_dir: Option<PathBuf>,
        fonts_dir: Option<PathBuf>,
        config_file: Option<PathBuf>,
    ) -> Self {
        Self {
            resources_dir,
            fonts_dir,
            config_file,
        }
    }

    /// Build a loader from `RESOURCES_DIR`, `FONTS_DIR` and `CONFIG_FILE`.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("RESOURCES_DIR").ok().map(PathBuf::from),
            std::env::var("FONTS_DIR").ok().map(PathBuf::from),
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
        )
    }

    /// Read a bundled source image by file name.
    pub fn read_resource(&self, name: &str) -> Result<Cow<'static, [u8]>, AssetError> {
        read_with_fallback::<EmbeddedResources>(self.resources_dir.as_deref(), name, "resource")
    }

    /// Read a font file by file name.
    pub fn read_font(&self, name: &str) -> Result<Cow<'static, [u8]>, AssetError> {
        read_with_fallback::<EmbeddedFonts>(self.fonts_dir.as_deref(), name, "font")
    }

    /// Read the config file
    ///
    /// An explicitly configured file must exist; otherwise the embedded
    /// default is used.
    pub fn read_config(&self) -> Result<Cow<'static, [u8]>, AssetError> {
        if let Some(ref path) = self.config_file {
            tracing::trace!(path = %path.display(), "Loading config from filesystem");
            return fs::read(path).map(Cow::Owned).map_err(|source| AssetError::Io {
                path: path.clone(),
                source,
            });
        }

        EmbeddedConfig::get("config.yaml")
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| AssetError::NotFound("config.yaml".to_string()))
    }

    /// Read config as a UTF-8 string
    pub fn read_config_string(&self) -> Result<String, AssetError> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned()).map_err(|e| AssetError::Io {
            path: self
                .config_file
                .clone()
                .unwrap_or_else(|| PathBuf::from("config.yaml")),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })
    }

    /// Where a category is read from, for status output.
    pub fn source_description(&self, category: AssetCategory) -> String {
        let path = match category {
            AssetCategory::Resources => self.resources_dir.as_deref(),
            AssetCategory::Fonts => self.fonts_dir.as_deref(),
            AssetCategory::Config => self.config_file.as_deref(),
        };
        match path {
            Some(p) if p.exists() => p.display().to_string(),
            Some(p) => format!("{} (missing, using embedded)", p.display()),
            None => "embedded".to_string(),
        }
    }

    /// Extract embedded assets to filesystem (init command)
    ///
    /// Uses the configured paths, or `./resources`, `./fonts` and
    /// `./config.yaml` when unset.
    pub fn init(&self, categories: &[AssetCategory], force: bool) -> Result<InitReport, AssetError> {
        let mut report = InitReport::default();

        for category in categories {
            match category {
                AssetCategory::Resources => {
                    let dir = self
                        .resources_dir
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./resources"));
                    extract_all::<EmbeddedResources>(&dir, force, &mut report)?;
                }
                AssetCategory::Fonts => {
                    let dir = self
                        .fonts_dir
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./fonts"));
                    extract_all::<EmbeddedFonts>(&dir, force, &mut report)?;
                }
                AssetCategory::Config => {
                    let path = self
                        .config_file
                        .clone()
                        .unwrap_or_else(|| PathBuf::from("./config.yaml"));
                    if !force && path.exists() {
                        report.skipped.push(path.display().to_string());
                        continue;
                    }
                    if let Some(data) = EmbeddedConfig::get("config.yaml") {
                        write_file(&path, &data.data)?;
                        report.written.push(path.display().to_string());
                    }
                }
            }
        }

        Ok(report)
    }

    /// List embedded assets by category (for display)
    pub fn list_embedded(category: AssetCategory) -> Vec<String> {
        let names: BTreeSet<String> = match category {
            AssetCategory::Resources => EmbeddedResources::iter().map(|s| s.to_string()).collect(),
            AssetCategory::Fonts => EmbeddedFonts::iter().map(|s| s.to_string()).collect(),
            AssetCategory::Config => EmbeddedConfig::iter().map(|s| s.to_string()).collect(),
        };
        names.into_iter().collect()
    }
}

fn read_with_fallback<E: RustEmbed>(
    dir: Option<&Path>,
    name: &str,
    kind: &str,
) -> Result<Cow<'static, [u8]>, AssetError> {
    if let Some(dir) = dir {
        let full_path = dir.join(name);
        if full_path.is_file() {
            tracing::trace!(path = %full_path.display(), "Loading {kind} from filesystem");
            return fs::read(&full_path)
                .map(Cow::Owned)
                .map_err(|source| AssetError::Io {
                    path: full_path,
                    source,
                });
        }
    }

    E::get(name)
        .map(|f| {
            tracing::trace!(name, "Loading {kind} from embedded assets");
            f.data
        })
        .ok_or_else(|| AssetError::NotFound(name.to_string()))
}

fn extract_all<E: RustEmbed>(
    dir: &Path,
    force: bool,
    report: &mut InitReport,
) -> Result<(), AssetError> {
    for file in E::iter() {
        let path = dir.join(file.as_ref());
        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            continue;
        }
        if let Some(data) = E::get(&file) {
            write_file(&path, &data.data)?;
            report.written.push(path.display().to_string());
        }
    }
    Ok(())
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), AssetError> {
    let io_err = |source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, data).map_err(io_err)
}
