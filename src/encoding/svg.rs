use base64::Engine;
use image::RgbaImage;

use super::codecs::encode_png_rgba;
use crate::error::EncodeError;

const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Wrap a raster in an SVG document as a single full-size `<image>` element.
///
/// The pixels are embedded as a base64 PNG data URI; nothing is vectorized.
pub fn svg_document(image: &RgbaImage) -> Result<String, EncodeError> {
    let png = encode_png_rgba(image)?;
    let payload = base64::engine::general_purpose::STANDARD.encode(png);
    let (w, h) = image.dimensions();
    Ok(format!(
        concat!(
            r#"<svg xmlns:xlink="http://www.w3.org/1999/xlink" xmlns="http://www.w3.org/2000/svg" "#,
            r#"width="{w}" height="{h}" text-rendering="auto" shape-rendering="auto">"#,
            r#"<image preserveAspectRatio="none" xlink:href="{prefix}{payload}" "#,
            r#"x="0" y="0" width="{w}" height="{h}"/></svg>"#,
        ),
        w = w,
        h = h,
        prefix = DATA_URI_PREFIX,
        payload = payload,
    ))
}

/// Pull the embedded PNG back out of a document produced by [`svg_document`].
pub fn embedded_png(document: &str) -> Option<Vec<u8>> {
    let start = document.find(DATA_URI_PREFIX)? + DATA_URI_PREFIX.len();
    let len = document[start..].find('"')?;
    base64::engine::general_purpose::STANDARD
        .decode(&document[start..start + len])
        .ok()
}
