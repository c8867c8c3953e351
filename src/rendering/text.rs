use crate::error::RenderError;
use crate::models::LabelSpec;
use resvg::usvg::{self, Transform};
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt::Write;
use std::sync::Arc;
use tiny_skia::Pixmap;

/// Fonts registered for label rendering.
///
/// Only explicitly loaded fonts are used. System fonts are never consulted,
/// so label output does not depend on the machine it runs on.
pub struct FontRegistry {
    fontdb: Arc<fontdb::Database>,
}

impl FontRegistry {
    /// A registry with no fonts; enough for scenes without labels.
    pub fn empty() -> Self {
        Self {
            fontdb: Arc::new(fontdb::Database::new()),
        }
    }

    /// Register every font, failing on the first one that yields no face.
    pub fn load(fonts: Vec<(String, Cow<'static, [u8]>)>) -> Result<Self, RenderError> {
        let mut fontdb = fontdb::Database::new();

        for (name, data) in fonts {
            let before = fontdb.len();
            fontdb.load_font_data(data.into_owned());
            if fontdb.len() == before {
                return Err(RenderError::FontLoad(name));
            }
            tracing::debug!(font = %name, faces = fontdb.len() - before, "Loaded font");
        }

        let registry = Self {
            fontdb: Arc::new(fontdb),
        };
        tracing::info!(
            font_count = registry.fontdb.len(),
            families = ?registry.families(),
            "Registered fonts for label rendering"
        );
        Ok(registry)
    }

    /// Primary family names of all registered faces.
    pub fn families(&self) -> BTreeSet<String> {
        self.fontdb
            .faces()
            .filter_map(|f| f.families.first().map(|(name, _)| name.clone()))
            .collect()
    }

    pub fn has_family(&self, family: &str) -> bool {
        let families = [fontdb::Family::Name(family)];
        self.fontdb
            .query(&fontdb::Query {
                families: &families,
                ..Default::default()
            })
            .is_some()
    }

    /// Draw labels on top of the pixmap contents.
    ///
    /// Text is laid out by usvg from a generated SVG fragment the size of the
    /// pixmap, then rasterized in place with resvg. Each label's `y` is its
    /// baseline.
    pub fn draw_labels(&self, pixmap: &mut Pixmap, labels: &[LabelSpec]) -> Result<(), RenderError> {
        if labels.is_empty() {
            return Ok(());
        }
        if let Some(label) = labels.iter().find(|l| !self.has_family(&l.family)) {
            return Err(RenderError::FontFamilyMissing(label.family.clone()));
        }

        let svg = labels_svg(pixmap.width(), pixmap.height(), labels);
        let options = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &options)
            .map_err(|e| RenderError::Label(e.to_string()))?;

        resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
        Ok(())
    }
}

impl Default for FontRegistry {
    fn default() -> Self {
        Self::empty()
    }
}

fn labels_svg(width: u32, height: u32, labels: &[LabelSpec]) -> String {
    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    );
    for label in labels {
        let [r, g, b] = label.color.to_bytes();
        let _ = write!(
            svg,
            r##"<text x="{}" y="{}" font-family="'{}'" font-size="{}" fill="#{r:02x}{g:02x}{b:02x}">{}</text>"##,
            label.x,
            label.y,
            escape_xml(&label.family),
            label.size,
            escape_xml(&label.text),
        );
    }
    svg.push_str("</svg>");
    svg
}

fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    Cow::Owned(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetLoader;
    use colorspace::Srgb;

    fn label(family: &str, text: &str) -> LabelSpec {
        LabelSpec {
            text: text.to_string(),
            family: family.to_string(),
            size: 15.0,
            x: 20.0,
            y: 20.0,
            color: Srgb::BLACK,
        }
    }

    #[test]
    fn test_garbage_font_data_is_fatal() {
        let fonts = vec![(
            "broken.ttf".to_string(),
            Cow::Owned(b"definitely not a font".to_vec()),
        )];
        match FontRegistry::load(fonts) {
            Err(RenderError::FontLoad(name)) => assert_eq!(name, "broken.ttf"),
            Err(other) => panic!("Expected FontLoad, got {other:?}"),
            Ok(_) => panic!("Expected FontLoad, got a registry"),
        }
    }

    #[test]
    fn test_missing_family_is_fatal() {
        let registry = FontRegistry::empty();
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        let err = registry
            .draw_labels(&mut pixmap, &[label("FreeSerif", "x")])
            .unwrap_err();
        assert!(matches!(err, RenderError::FontFamilyMissing(f) if f == "FreeSerif"));
    }

    #[test]
    fn test_no_labels_leaves_pixmap_untouched() {
        let registry = FontRegistry::empty();
        let mut pixmap = Pixmap::new(10, 10).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);
        let before = pixmap.clone();
        registry.draw_labels(&mut pixmap, &[]).unwrap();
        assert_eq!(pixmap.data(), before.data());
    }

    #[test]
    fn test_labels_svg_escapes_text() {
        let svg = labels_svg(100, 50, &[label("FreeMono", "a<b & \"c\"")]);
        assert!(svg.contains(">a&lt;b &amp; &quot;c&quot;</text>"));
        assert!(svg.contains(r#"font-family="'FreeMono'""#));
        assert!(svg.contains(r##"fill="#000000""##));
    }

    fn bundled_registry() -> FontRegistry {
        let loader = AssetLoader::default();
        let fonts = ["DejaVuSansMono.ttf", "DejaVuSerif.ttf"]
            .iter()
            .map(|name| (name.to_string(), loader.read_font(name).unwrap()))
            .collect();
        FontRegistry::load(fonts).unwrap()
    }

    #[test]
    fn test_bundled_fonts_register_two_families() {
        let registry = bundled_registry();
        assert!(registry.has_family("DejaVu Sans Mono"));
        assert!(registry.has_family("DejaVu Serif"));
        assert_eq!(registry.families().len(), 2);
    }

    #[test]
    fn test_bundled_fonts_draw_ink() {
        let registry = bundled_registry();
        let mut pixmap = Pixmap::new(200, 80).unwrap();
        pixmap.fill(tiny_skia::Color::WHITE);

        let mut serif = label("DejaVu Serif", "Mandrel");
        serif.y = 60.0;
        registry
            .draw_labels(&mut pixmap, &[label("DejaVu Sans Mono", "Mandrel"), serif])
            .unwrap();

        // Ink above each baseline, nothing in the gap between the two lines
        let dark_rows = |rows: std::ops::Range<u32>| {
            rows.flat_map(|y| (0..200).map(move |x| (x, y)))
                .filter(|&(x, y)| pixmap.pixel(x, y).is_some_and(|p| p.red() < 128))
                .count()
        };
        assert!(dark_rows(8..21) > 0, "no ink for the monospace label");
        assert!(dark_rows(48..61) > 0, "no ink for the serif label");
        assert_eq!(dark_rows(30..40), 0);
    }
}
