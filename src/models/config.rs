use crate::assets::AssetLoader;
use crate::error::ConfigError;
use crate::models::{LabelSpec, OutputSpec, SceneSpec};
use colorspace::{ColorSpace, Srgb};
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub output: OutputConfig,

    /// Source image file name, looked up through the asset loader
    #[serde(default = "default_source_image")]
    pub source_image: String,

    /// Conversions to run, by name (`gray`, `cie-xyz`, ...) or suffix (`toG`, ...)
    #[serde(default = "default_conversions")]
    pub conversions: Vec<String>,

    #[serde(default)]
    pub scene: SceneConfig,

    /// Fonts to register before labels are drawn
    #[serde(default = "default_fonts")]
    pub fonts: Vec<FontConfig>,
}

fn default_source_image() -> String {
    "testcard.jp2".to_string()
}

fn default_conversions() -> Vec<String> {
    ColorSpace::ALL.iter().map(|c| c.name().to_string()).collect()
}

fn default_fonts() -> Vec<FontConfig> {
    vec![
        FontConfig {
            file: "DejaVuSansMono.ttf".to_string(),
        },
        FontConfig {
            file: "DejaVuSerif.ttf".to_string(),
        },
    ]
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// NeuQuant sampling speed for GIF palettes (1 = best, 30 = fastest)
    #[serde(default = "default_gif_speed")]
    pub gif_speed: i32,

    #[serde(default = "default_flatten_background")]
    pub flatten_background: String,
}

fn default_prefix() -> String {
    "mytest".to_string()
}

fn default_jpeg_quality() -> u8 {
    75
}

fn default_gif_speed() -> i32 {
    10
}

fn default_flatten_background() -> String {
    "#000000".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            jpeg_quality: default_jpeg_quality(),
            gif_speed: default_gif_speed(),
            flatten_background: default_flatten_background(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct SceneConfig {
    #[serde(default = "default_stripe_colors")]
    pub stripe_colors: Vec<String>,

    #[serde(default = "default_stripe_width")]
    pub stripe_width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_background")]
    pub background: String,

    #[serde(default = "default_rotation")]
    pub rotation_degrees: f32,

    #[serde(default = "default_overlay_color")]
    pub overlay_color: String,

    #[serde(default = "default_overlay_alpha")]
    pub overlay_alpha: f32,

    #[serde(default = "default_labels")]
    pub labels: Vec<LabelConfig>,
}

fn default_stripe_colors() -> Vec<String> {
    ["#FFFFFF", "#FF0000", "#00FF00", "#0000FF", "#000000"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_stripe_width() -> u32 {
    100
}

fn default_height() -> u32 {
    500
}

fn default_background() -> String {
    "#FFAFAF".to_string()
}

fn default_rotation() -> f32 {
    5.0
}

fn default_overlay_color() -> String {
    "#FF00FF".to_string()
}

fn default_overlay_alpha() -> f32 {
    0.5
}

fn default_labels() -> Vec<LabelConfig> {
    vec![
        LabelConfig {
            text: "Mandrel".to_string(),
            family: "DejaVu Sans Mono".to_string(),
            size: 15.0,
            x: 20.0,
            y: 20.0,
            color: default_label_color(),
        },
        LabelConfig {
            text: "Mandrel".to_string(),
            family: "DejaVu Serif".to_string(),
            size: 15.0,
            x: 20.0,
            y: 60.0,
            color: default_label_color(),
        },
    ]
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            stripe_colors: default_stripe_colors(),
            stripe_width: default_stripe_width(),
            height: default_height(),
            background: default_background(),
            rotation_degrees: default_rotation(),
            overlay_color: default_overlay_color(),
            overlay_alpha: default_overlay_alpha(),
            labels: default_labels(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct LabelConfig {
    pub text: String,
    pub family: String,
    pub size: f32,
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_label_color")]
    pub color: String,
}

fn default_label_color() -> String {
    "#000000".to_string()
}

/// A font file to register, resolved through the asset loader
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FontConfig {
    pub file: String,
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    ///
    /// Unlike a long-running server there is nothing sensible to fall back
    /// to, so read and parse failures are returned to the caller.
    pub fn load_from_assets(loader: &AssetLoader) -> Result<Self, ConfigError> {
        let content = loader.read_config_string()?;
        let config = Self::from_yaml(&content)?;
        tracing::debug!(
            conversions = config.conversions.len(),
            fonts = config.fonts.len(),
            labels = config.scene.labels.len(),
            "Loaded configuration"
        );
        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(content)?;
        // Surface bad values at load time rather than halfway through a run
        config.conversion_spaces()?;
        config.scene_spec()?;
        config.output_spec()?;
        Ok(config)
    }

    /// Parsed conversion list, in configured order.
    pub fn conversion_spaces(&self) -> Result<Vec<ColorSpace>, ConfigError> {
        let mut spaces: Vec<ColorSpace> = Vec::with_capacity(self.conversions.len());
        for name in &self.conversions {
            let cs: ColorSpace = name.parse().map_err(|e: colorspace::ParseColorSpaceError| {
                ConfigError::Invalid {
                    field: "conversions",
                    reason: e.to_string(),
                }
            })?;
            if spaces.contains(&cs) {
                return Err(ConfigError::Invalid {
                    field: "conversions",
                    reason: format!("'{name}' listed twice"),
                });
            }
            spaces.push(cs);
        }
        Ok(spaces)
    }

    pub fn scene_spec(&self) -> Result<SceneSpec, ConfigError> {
        let scene = &self.scene;
        if scene.stripe_colors.is_empty() {
            return Err(ConfigError::Invalid {
                field: "scene.stripe_colors",
                reason: "at least one color is required".to_string(),
            });
        }
        if scene.stripe_width == 0 || scene.height == 0 {
            return Err(ConfigError::Invalid {
                field: "scene",
                reason: "stripe_width and height must be greater than zero".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&scene.overlay_alpha) {
            return Err(ConfigError::Invalid {
                field: "scene.overlay_alpha",
                reason: format!("{} is outside 0.0..=1.0", scene.overlay_alpha),
            });
        }

        let stripe_colors = scene
            .stripe_colors
            .iter()
            .map(|c| parse_color("scene.stripe_colors", c))
            .collect::<Result<Vec<_>, _>>()?;

        let labels = scene
            .labels
            .iter()
            .map(|l| {
                if l.size <= 0.0 {
                    return Err(ConfigError::Invalid {
                        field: "scene.labels.size",
                        reason: format!("{} must be positive", l.size),
                    });
                }
                Ok(LabelSpec {
                    text: l.text.clone(),
                    family: l.family.clone(),
                    size: l.size,
                    x: l.x,
                    y: l.y,
                    color: parse_color("scene.labels.color", &l.color)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(SceneSpec {
            stripe_colors,
            stripe_width: scene.stripe_width,
            height: scene.height,
            background: parse_color("scene.background", &scene.background)?,
            rotation_degrees: scene.rotation_degrees,
            overlay_color: parse_color("scene.overlay_color", &scene.overlay_color)?,
            overlay_alpha: scene.overlay_alpha,
            labels,
        })
    }

    pub fn output_spec(&self) -> Result<OutputSpec, ConfigError> {
        let out = &self.output;
        if out.prefix.is_empty() || out.prefix.contains(['/', '\\']) {
            return Err(ConfigError::Invalid {
                field: "output.prefix",
                reason: format!("'{}' is not a plain file stem", out.prefix),
            });
        }
        if !(1..=100).contains(&out.jpeg_quality) {
            return Err(ConfigError::Invalid {
                field: "output.jpeg_quality",
                reason: format!("{} is outside 1..=100", out.jpeg_quality),
            });
        }
        if !(1..=30).contains(&out.gif_speed) {
            return Err(ConfigError::Invalid {
                field: "output.gif_speed",
                reason: format!("{} is outside 1..=30", out.gif_speed),
            });
        }
        Ok(OutputSpec {
            prefix: out.prefix.clone(),
            jpeg_quality: out.jpeg_quality,
            gif_speed: out.gif_speed,
            flatten_background: parse_color("output.flatten_background", &out.flatten_background)?,
        })
    }
}

fn parse_color(field: &'static str, value: &str) -> Result<Srgb, ConfigError> {
    value.parse().map_err(|source| ConfigError::Color {
        field,
        value: value.to_string(),
        source,
    })
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output: OutputConfig::default(),
            source_image: default_source_image(),
            conversions: default_conversions(),
            scene: SceneConfig::default(),
            fonts: default_fonts(),
        }
    }
}
