//! Assertion helpers for tests.

use std::path::Path;

use image::{ColorType, DynamicImage};
use pretty_assertions::assert_eq;

/// Decode a written file with the `image` crate, failing with the path.
pub fn decode_file(path: &Path) -> DynamicImage {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected {} to exist: {e}", path.display()));
    image::load_from_memory(&bytes)
        .unwrap_or_else(|e| panic!("Expected {} to decode: {e}", path.display()))
}

/// Assert a file decodes with the given size and pixel layout
pub fn assert_image(path: &Path, width: u32, height: u32, color: ColorType) {
    let image = decode_file(path);
    assert_eq!(
        (image.width(), image.height()),
        (width, height),
        "Unexpected size for {}",
        path.display()
    );
    assert_eq!(
        image.color(),
        color,
        "Unexpected color type for {}",
        path.display()
    );
}

/// Assert a file starts with the given magic bytes
pub fn assert_magic(path: &Path, magic: &[u8]) {
    let bytes = std::fs::read(path).unwrap();
    assert!(
        bytes.starts_with(magic),
        "Expected {} to start with {:?}, got {:?}",
        path.display(),
        magic,
        &bytes[..magic.len().min(bytes.len())]
    );
}
