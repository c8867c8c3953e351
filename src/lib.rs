//! Hopper
//!
//! Deterministic image generation: color space conversions of a bundled
//! source image, and one synthetic test image written in seven formats.
//! This library exposes modules for integration testing.

pub mod assets;
pub mod encoding;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
