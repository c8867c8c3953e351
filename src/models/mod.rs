pub mod config;
pub mod scene_spec;

pub use config::{AppConfig, FontConfig, OutputConfig, SceneConfig};
pub use scene_spec::{LabelSpec, OutputSpec, SceneSpec};
