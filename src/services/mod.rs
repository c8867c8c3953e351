pub mod color_conversion;
pub mod pipeline;
pub mod source;

pub use color_conversion::{ColorConversionService, ConversionFailure, ConversionReport};
pub use pipeline::{Pipeline, RunReport, Stage};
pub use source::SourceImage;
