//! HUD text rendering with rusttype

use glam::Vec2;
use rusttype::{Font, Scale, point};

use super::canvas::Canvas;
use super::pixel::Rgba;

/// Bundled HUD font (DejaVu Sans, see assets/DejaVuSans-LICENSE.txt)
const EMBEDDED_FONT: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

/// A parsed TrueType font used for the on-screen counter
pub struct HudFont {
    font: Font<'static>,
}

impl HudFont {
    /// Parse font bytes; `None` if they are not a usable TrueType/OpenType font
    pub fn from_bytes(bytes: Vec<u8>) -> Option<Self> {
        Font::try_from_vec(bytes).map(|font| Self { font })
    }

    /// The font compiled into the binary
    pub fn embedded() -> Option<Self> {
        Font::try_from_bytes(EMBEDDED_FONT).map(|font| Self { font })
    }

    /// Rendered width of `text` in pixels
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let scale = Scale::uniform(size);
        self.font
            .layout(text, scale, point(0.0, 0.0))
            .last()
            .map_or(0.0, |g| {
                g.position().x + g.unpositioned().h_metrics().advance_width
            })
    }

    /// Draw `text` with the top of its line box at `top_left`
    pub fn draw(&self, canvas: &mut Canvas<'_>, text: &str, top_left: Vec2, size: f32, color: Rgba) {
        let scale = Scale::uniform(size);
        let ascent = self.font.v_metrics(scale).ascent;
        let origin = point(top_left.x, top_left.y + ascent);

        for glyph in self.font.layout(text, scale, origin) {
            let Some(bounds) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let alpha = (coverage * 255.0).clamp(0.0, 255.0) as u8;
                canvas.blend(bounds.min.x + gx as i32, bounds.min.y + gy as i32, color, alpha);
            });
        }
    }
}
