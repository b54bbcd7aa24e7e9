//! Static page chrome layered over the canvas.

use std::fmt::{self, Display};
use std::sync::OnceLock;

use fajr_core::{FajrError, Result, color};
use glam::Vec3;
use minijinja::{Environment, UndefinedBehavior};
use rust_embed::RustEmbed;
use serde::Serialize;

/// Blend mode of an overlay layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlendMode {
    Normal,
    Screen,
}

impl BlendMode {
    #[must_use]
    pub fn css(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Screen => "screen",
        }
    }
}

/// A color stop: sRGB color, alpha and position in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Vec3,
    pub alpha: f32,
    pub at: f32,
}

impl ColorStop {
    #[must_use]
    pub fn new(rgb: u32, alpha: f32, at: f32) -> Self {
        Self { color: color::hex(rgb), alpha, at }
    }

    /// Fully transparent stop.
    #[must_use]
    pub fn clear(at: f32) -> Self {
        Self { color: Vec3::ZERO, alpha: 0.0, at }
    }
}

impl Display for ColorStop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha == 0.0 && self.color == Vec3::ZERO {
            write!(f, "transparent {}%", self.at)
        } else {
            write!(f, "{} {}%", color::css_rgba(self.color, self.alpha), self.at)
        }
    }
}

/// CSS gradient image.
#[derive(Debug, Clone, PartialEq)]
pub enum Gradient {
    /// Circle centered at `(x%, y%)`.
    Radial { center: (f32, f32), stops: Vec<ColorStop> },
    /// `angle` in degrees, 180 runs top to bottom.
    Linear { angle: f32, stops: Vec<ColorStop> },
}

impl Display for Gradient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stops = match self {
            Self::Radial { center: (x, y), stops } => {
                write!(f, "radial-gradient(circle at {x}% {y}%")?;
                stops
            }
            Self::Linear { angle, stops } => {
                write!(f, "linear-gradient({angle}deg")?;
                stops
            }
        };
        for stop in stops {
            write!(f, ", {stop}")?;
        }
        f.write_str(")")
    }
}

/// One full-viewport gradient layer.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayLayer {
    pub gradient: Gradient,
    pub blend: BlendMode,
    pub opacity: f32,
}

impl OverlayLayer {
    /// Inline CSS declarations for this layer.
    #[must_use]
    pub fn style(&self) -> String {
        let mut css = format!("position:absolute;inset:0;pointer-events:none;background:{};", self.gradient);
        if self.blend != BlendMode::Normal {
            css.push_str("mix-blend-mode:");
            css.push_str(self.blend.css());
            css.push(';');
        }
        if self.opacity < 1.0 {
            css.push_str(&format!("opacity:{};", self.opacity));
        }
        css
    }
}

/// Page text and gradient layers drawn above the 3D viewport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overlay {
    pub title: String,
    pub description: String,
    pub heading: String,
    pub caption: String,
    pub font_family: String,
    pub font_weights: Vec<u16>,
    pub lang: String,
    #[serde(skip)]
    pub layers: Vec<OverlayLayer>,
}

impl Default for Overlay {
    fn default() -> Self {
        Self {
            title: "Fajr Serenity".into(),
            description: "A peaceful dawn scene capturing the spirit of Fajr prayer in the desert.".into(),
            heading: "Serenity at Fajr".into(),
            caption: "A tranquil moment of dawn prayer as the first light of day warms the desert horizon.".into(),
            font_family: "Playfair Display".into(),
            font_weights: vec![400, 500, 700],
            lang: "en".into(),
            layers: vec![
                OverlayLayer {
                    gradient: Gradient::Radial {
                        center: (25.0, 15.0),
                        stops: vec![ColorStop::new(0xffe2b1, 0.35, 0.0), ColorStop::clear(55.0)],
                    },
                    blend: BlendMode::Screen,
                    opacity: 0.9,
                },
                OverlayLayer {
                    gradient: Gradient::Linear {
                        angle: 180.0,
                        stops: vec![ColorStop::new(0x07111e, 0.0, 55.0), ColorStop::new(0x101d2e, 0.7, 100.0)],
                    },
                    blend: BlendMode::Normal,
                    opacity: 1.0,
                },
            ],
        }
    }
}

impl Overlay {
    /// Google Fonts stylesheet URL for the heading font.
    #[must_use]
    pub fn font_url(&self) -> String {
        let family = self.font_family.replace(' ', "+");
        let weights = self.font_weights.iter().map(u16::to_string).collect::<Vec<_>>().join(";");
        format!("https://fonts.googleapis.com/css2?family={family}:wght@{weights}&display=swap")
    }

    /// Standalone HTML document: the canvas host element plus the overlay.
    ///
    /// Rendered from the embedded `page.html` template with HTML
    /// auto-escaping.
    pub fn to_html(&self, background: Vec3) -> Result<String> {
        let context = PageContext {
            overlay: self,
            font_url: self.font_url(),
            background: color::to_hex_string(background),
            layers: self.layers.iter().map(OverlayLayer::style).collect(),
        };
        page_env()
            .get_template(PAGE_TEMPLATE)
            .and_then(|template| template.render(context))
            .map_err(|e| FajrError::TemplateError(e.to_string()))
    }
}

// ============================================================================
// Page template
// ============================================================================

const PAGE_TEMPLATE: &str = "page.html";

static PAGE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

#[derive(RustEmbed)]
#[folder = "templates"]
struct PageAssets;

#[derive(Serialize)]
struct PageContext<'a> {
    overlay: &'a Overlay,
    font_url: String,
    background: String,
    layers: Vec<String>,
}

fn page_env() -> &'static Environment<'static> {
    PAGE_ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_loader(page_loader);
        env.add_filter("css_string", css_string);
        env
    })
}

fn page_loader(name: &str) -> std::result::Result<Option<String>, minijinja::Error> {
    Ok(PageAssets::get(name).and_then(|file| std::str::from_utf8(file.data.as_ref()).ok().map(str::to_owned)))
}

/// Escapes a value for a single-quoted CSS string. HTML escaping still
/// applies on top.
fn css_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\a "),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradients_render_as_css() {
        let overlay = Overlay::default();
        assert_eq!(
            overlay.layers[0].gradient.to_string(),
            "radial-gradient(circle at 25% 15%, rgba(255, 226, 177, 0.35) 0%, transparent 55%)"
        );
        assert_eq!(
            overlay.layers[1].gradient.to_string(),
            "linear-gradient(180deg, rgba(7, 17, 30, 0) 55%, rgba(16, 29, 46, 0.7) 100%)"
        );
    }

    #[test]
    fn layer_style_includes_blend_and_opacity() {
        let style = Overlay::default().layers[0].style();
        assert!(style.contains("mix-blend-mode:screen;"));
        assert!(style.contains("opacity:0.9;"));
    }

    #[test]
    fn html_contains_text_and_escapes() {
        let overlay = Overlay { caption: "dawn <&> dusk".into(), ..Overlay::default() };
        let html = overlay.to_html(color::hex(0x0d1e2e)).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Fajr Serenity</title>"));
        assert!(html.contains("Serenity at Fajr"));
        assert!(html.contains("dawn &lt;&amp;&gt; dusk"));
        assert!(html.contains("background:#0d1e2e"));
        assert!(html.contains("family=Playfair+Display:wght@400;500;700"));
        assert_eq!(html.matches("<div style=").count(), 2);
    }

    #[test]
    fn font_family_quotes_stay_inside_css_string() {
        let overlay = Overlay { font_family: "O'Neil".into(), ..Overlay::default() };
        let html = overlay.to_html(Vec3::ZERO).unwrap();

        // The attribute value as a browser decodes it before parsing CSS.
        let decoded = html.replace("&#x27;", "'").replace("&#39;", "'");
        assert!(decoded.contains(r"font-family:'O\'Neil',serif;"));
        assert!(!decoded.contains("'O'Neil'"));
    }

    #[test]
    fn css_string_escapes_quotes_and_backslashes() {
        assert_eq!(css_string("Playfair Display"), "Playfair Display");
        assert_eq!(css_string(r"a'b\c"), r"a\'b\\c");
    }
}
