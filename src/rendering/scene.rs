use colorspace::Srgb;
use image::{Rgba, RgbaImage};
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use crate::error::RenderError;
use crate::models::SceneSpec;
use crate::rendering::FontRegistry;

/// The canonical synthetic raster. Every output format is encoded from this
/// one buffer; narrowing for alpha-less or 1-bit formats always copies.
#[derive(Debug, Clone, PartialEq)]
pub struct SyntheticImage {
    pixels: RgbaImage,
}

impl SyntheticImage {
    /// Wrap an existing straight-alpha RGBA buffer.
    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    /// Demultiply a rendered pixmap into straight alpha.
    pub fn from_pixmap(pixmap: &Pixmap) -> Self {
        let mut pixels = RgbaImage::new(pixmap.width(), pixmap.height());
        for (dst, src) in pixels.pixels_mut().zip(pixmap.pixels()) {
            let c = src.demultiply();
            *dst = Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
        }
        Self { pixels }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn rgba(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Draws the synthetic test image: background, rotated stripes,
/// translucent ellipse, then text labels.
pub struct SceneRenderer {
    fonts: FontRegistry,
}

impl SceneRenderer {
    pub fn new(fonts: FontRegistry) -> Self {
        Self { fonts }
    }

    pub fn render(&self, spec: &SceneSpec) -> Result<SyntheticImage, RenderError> {
        let mut pixmap = compose(spec)?;
        self.fonts.draw_labels(&mut pixmap, &spec.labels)?;

        tracing::debug!(
            width = pixmap.width(),
            height = pixmap.height(),
            stripes = spec.stripe_colors.len(),
            labels = spec.labels.len(),
            "Rendered synthetic image"
        );
        Ok(SyntheticImage::from_pixmap(&pixmap))
    }
}

/// Draw every shape of the scene except the text labels.
pub fn compose(spec: &SceneSpec) -> Result<Pixmap, RenderError> {
    let (width, height) = spec.dimensions()?;
    let bad_dimensions = || RenderError::UnsupportedDimensions { width, height };

    let mut pixmap = Pixmap::new(width, height).ok_or(RenderError::PixmapAllocation)?;
    pixmap.fill(skia_color(spec.background, 1.0));

    // Integer center, so odd sizes rotate about the same pixel corner every time
    let cx = (width / 2) as f32;
    let cy = (height / 2) as f32;
    let step = Transform::from_rotate_at(spec.rotation_degrees, cx, cy);

    // Stripe i is drawn under i compounded rotations; the transform is local,
    // so everything after the loop is back in identity space.
    let mut transform = Transform::identity();
    let stripe_width = spec.stripe_width as f32;
    for (i, color) in spec.stripe_colors.iter().enumerate() {
        let rect = Rect::from_xywh(i as f32 * stripe_width, 0.0, stripe_width, height as f32)
            .ok_or_else(bad_dimensions)?;
        pixmap.fill_rect(rect, &solid_paint(*color, 1.0), transform, None);
        transform = transform.pre_concat(step);
    }

    let oval = Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
        .and_then(PathBuilder::from_oval)
        .ok_or_else(bad_dimensions)?;
    // Source-over at reduced opacity; the paint is dropped right after, so
    // later drawing is opaque again.
    pixmap.fill_path(
        &oval,
        &solid_paint(spec.overlay_color, spec.overlay_alpha),
        FillRule::Winding,
        Transform::identity(),
        None,
    );

    Ok(pixmap)
}

fn solid_paint(color: Srgb, alpha: f32) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(skia_color(color, alpha));
    paint.anti_alias = true;
    paint
}

fn skia_color(color: Srgb, alpha: f32) -> Color {
    let [r, g, b] = color.to_bytes();
    let a = (alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::from_rgba8(r, g, b, a)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Rgba<u8>, expected: [u8; 4], tolerance: u8) {
        for (a, e) in actual.0.iter().zip(expected.iter()) {
            assert!(
                a.abs_diff(*e) <= tolerance,
                "pixel {:?} differs from {:?}",
                actual.0,
                expected
            );
        }
    }

    fn composed() -> SyntheticImage {
        SyntheticImage::from_pixmap(&compose(&SceneSpec::default()).unwrap())
    }

    #[test]
    fn test_canvas_is_stripe_count_times_width_by_height() {
        let image = composed();
        assert_eq!((image.width(), image.height()), (5 * 100, 500));
    }

    #[test]
    fn test_canvas_is_fully_opaque() {
        let image = composed();
        assert!(image.rgba().pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_unrotated_first_stripe_in_corner() {
        // Top-left corner: white stripe 0, outside the ellipse
        assert_close(*composed().rgba().get_pixel(2, 2), [255, 255, 255, 255], 0);
    }

    #[test]
    fn test_background_shows_where_stripes_rotated_away() {
        // Top-right corner: stripe 4 is rotated by 20 degrees and no longer covers it
        assert_close(*composed().rgba().get_pixel(498, 2), [255, 175, 175, 255], 0);
    }

    #[test]
    fn test_overlay_blends_half_magenta_over_center_stripe() {
        // Center: green stripe 2 under the 50% magenta ellipse
        assert_close(*composed().rgba().get_pixel(250, 250), [128, 127, 128, 255], 2);
    }

    #[test]
    fn test_compose_is_deterministic() {
        assert_eq!(composed(), composed());
    }

    #[test]
    fn test_render_without_labels_needs_no_fonts() {
        let spec = SceneSpec {
            labels: Vec::new(),
            ..SceneSpec::default()
        };
        let renderer = SceneRenderer::new(FontRegistry::empty());
        let image = renderer.render(&spec).unwrap();
        assert_eq!(image, composed());
    }

    #[test]
    fn test_render_with_unregistered_family_fails() {
        let renderer = SceneRenderer::new(FontRegistry::empty());
        let err = renderer.render(&SceneSpec::default()).unwrap_err();
        assert!(matches!(err, RenderError::FontFamilyMissing(f) if f == "DejaVu Sans Mono"));
    }
}
