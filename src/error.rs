use std::path::PathBuf;
use thiserror::Error;

/// Top-level error of a pipeline run. Every variant is fatal.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source image error: {0}")]
    Source(#[from] SourceError),

    #[error("Rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("Encode error: {0}")]
    Encode(#[from] EncodeError),
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(#[from] AssetError),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid color '{value}' for {field}: {source}")]
    Color {
        field: &'static str,
        value: String,
        #[source]
        source: colorspace::ParseColorError,
    },

    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("JPEG 2000 decode error: {0}")]
    Jpeg2000(String),

    #[error("Image decode error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Color conversion error: {0}")]
    Convert(#[from] colorspace::ConvertError),
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Unsupported dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("Failed to allocate pixmap")]
    PixmapAllocation,

    #[error("Font '{0}' contains no usable faces")]
    FontLoad(String),

    #[error("Font family '{0}' is not registered")]
    FontFamilyMissing(String),

    #[error("Label layout error: {0}")]
    Label(String),
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("PNG encode error: {0}")]
    Png(#[from] png::EncodingError),

    #[error("{format} encode error: {source}")]
    Image {
        format: &'static str,
        #[source]
        source: image::ImageError,
    },

    #[error("Unsupported WBMP dimensions: {width}x{height}")]
    WbmpDimensions { width: u32, height: u32 },

    #[error("Malformed WBMP data: {0}")]
    WbmpDecode(&'static str),

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
