use colorspace::Srgb;

use crate::error::RenderError;

/// Everything needed to draw the synthetic test image.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSpec {
    /// Stripe fill colors, left to right
    pub stripe_colors: Vec<Srgb>,
    pub stripe_width: u32,
    pub height: u32,
    pub background: Srgb,
    /// Rotation applied after each stripe, about the canvas center
    pub rotation_degrees: f32,
    pub overlay_color: Srgb,
    /// Overlay opacity, 0.0..=1.0
    pub overlay_alpha: f32,
    pub labels: Vec<LabelSpec>,
}

/// A text label drawn with a registered font family.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpec {
    pub text: String,
    pub family: String,
    pub size: f32,
    /// Left edge of the text
    pub x: f32,
    /// Baseline of the text
    pub y: f32,
    pub color: Srgb,
}

/// Encoder settings for the synthetic image outputs.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpec {
    /// File stem shared by all outputs (`<prefix>.png`, `<prefix>_toG.png`, ...)
    pub prefix: String,
    pub jpeg_quality: u8,
    pub gif_speed: i32,
    /// Opaque color that alpha is flattened onto for JPEG/BMP/WBMP
    pub flatten_background: Srgb,
}

impl SceneSpec {
    /// Canvas size: one stripe width per color, by the configured height.
    pub fn dimensions(&self) -> Result<(u32, u32), RenderError> {
        let width = (self.stripe_colors.len() as u32).saturating_mul(self.stripe_width);
        if width == 0 || self.height == 0 {
            return Err(RenderError::UnsupportedDimensions {
                width,
                height: self.height,
            });
        }
        Ok((width, self.height))
    }
}

impl Default for SceneSpec {
    /// White, red, green, blue and black stripes over pink, 100 px each.
    fn default() -> Self {
        Self {
            stripe_colors: vec![
                Srgb::WHITE,
                Srgb::from_u8(255, 0, 0),
                Srgb::from_u8(0, 255, 0),
                Srgb::from_u8(0, 0, 255),
                Srgb::BLACK,
            ],
            stripe_width: 100,
            height: 500,
            background: Srgb::from_u8(255, 175, 175),
            rotation_degrees: 5.0,
            overlay_color: Srgb::from_u8(255, 0, 255),
            overlay_alpha: 0.5,
            labels: vec![
                LabelSpec {
                    text: "Mandrel".to_string(),
                    family: "DejaVu Sans Mono".to_string(),
                    size: 15.0,
                    x: 20.0,
                    y: 20.0,
                    color: Srgb::BLACK,
                },
                LabelSpec {
                    text: "Mandrel".to_string(),
                    family: "DejaVu Serif".to_string(),
                    size: 15.0,
                    x: 20.0,
                    y: 60.0,
                    color: Srgb::BLACK,
                },
            ],
        }
    }
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            prefix: "mytest".to_string(),
            jpeg_quality: 75,
            gif_speed: 10,
            flatten_background: Srgb::BLACK,
        }
    }
}
