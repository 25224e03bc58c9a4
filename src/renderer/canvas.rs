//! Software rasterizer over an RGBA frame
//!
//! Shapes are tested per pixel center, clipped to the frame.

use glam::Vec2;

use super::RenderError;
use super::pixel::Rgba;
use crate::assets::Sprite;

/// Drawing surface borrowed from a frame buffer
pub struct Canvas<'a> {
    pixels: &'a mut [Rgba],
    width: u32,
    height: u32,
}

impl<'a> Canvas<'a> {
    /// Wrap a raw RGBA8 byte buffer of `width * height * 4` bytes
    pub fn from_bytes(frame: &'a mut [u8], width: u32, height: u32) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 4;
        let actual = frame.len();
        if actual != expected {
            return Err(RenderError::FrameSize { expected, actual });
        }
        let pixels = bytemuck::try_cast_slice_mut(frame)
            .map_err(|_| RenderError::FrameSize { expected, actual })?;
        Ok(Self {
            pixels,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| (y * self.width + x) as usize)
    }

    /// Overwrite one pixel; out-of-bounds writes are dropped
    pub fn put(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(i) = self.index(x as u32, y as u32) {
            self.pixels[i] = color;
        }
    }

    /// Blend one pixel with `alpha` coverage; out-of-bounds writes are dropped
    pub fn blend(&mut self, x: i32, y: i32, color: Rgba, alpha: u8) {
        if x < 0 || y < 0 || alpha == 0 {
            return;
        }
        if let Some(i) = self.index(x as u32, y as u32) {
            self.pixels[i] = self.pixels[i].blend(color, alpha);
        }
    }

    pub fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    /// Pixel rows/columns whose centers may lie within `reach` of `center`
    fn span(&self, center: Vec2, reach: f32) -> (i32, i32, i32, i32) {
        let x0 = ((center.x - reach).floor() as i32).max(0);
        let y0 = ((center.y - reach).floor() as i32).max(0);
        let x1 = ((center.x + reach).ceil() as i32).min(self.width as i32 - 1);
        let y1 = ((center.y + reach).ceil() as i32).min(self.height as i32 - 1);
        (x0, y0, x1, y1)
    }

    /// Filled disc
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.fill_ring(center, 0.0, radius, color);
    }

    /// Circle outline `width` pixels thick, drawn inward from `radius`
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Rgba) {
        self.fill_ring(center, (radius - width).max(0.0), radius, color);
    }

    fn fill_ring(&mut self, center: Vec2, inner: f32, outer: f32, color: Rgba) {
        if outer <= 0.0 {
            return;
        }
        let (x0, y0, x1, y1) = self.span(center, outer);
        let inner_sq = inner * inner;
        let outer_sq = outer * outer;

        for y in y0..=y1 {
            let dy = y as f32 + 0.5 - center.y;
            for x in x0..=x1 {
                let dx = x as f32 + 0.5 - center.x;
                let d_sq = dx * dx + dy * dy;
                if d_sq <= outer_sq && d_sq >= inner_sq {
                    self.put(x, y, color);
                }
            }
        }
    }

    /// Draw a sprite with its top-left corner at `top_left`, using its alpha
    pub fn blit(&mut self, sprite: &Sprite, top_left: Vec2) {
        let ox = top_left.x.round() as i32;
        let oy = top_left.y.round() as i32;

        for sy in 0..sprite.height() {
            for sx in 0..sprite.width() {
                let Some(src) = sprite.pixel(sx, sy) else {
                    continue;
                };
                self.blend(ox + sx as i32, oy + sy as i32, src, src.a);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::pixel::colors;

    const RED: Rgba = Rgba::new(255, 0, 0, 255);

    fn buffer(w: u32, h: u32) -> Vec<u8> {
        vec![0u8; (w * h * 4) as usize]
    }

    #[test]
    fn test_wrong_frame_size_rejected() {
        let mut bytes = vec![0u8; 10];
        assert!(matches!(
            Canvas::from_bytes(&mut bytes, 4, 4),
            Err(RenderError::FrameSize { expected: 64, actual: 10 })
        ));
    }

    #[test]
    fn test_clear_and_fill_circle() {
        let mut bytes = buffer(40, 40);
        let mut canvas = Canvas::from_bytes(&mut bytes, 40, 40).expect("canvas");
        canvas.clear(colors::BACKGROUND);
        canvas.fill_circle(Vec2::new(20.0, 20.0), 10.0, RED);

        assert_eq!(canvas.pixel(20, 20), Some(RED));
        assert_eq!(canvas.pixel(0, 0), Some(colors::BACKGROUND));
        // Just outside the radius along an axis
        assert_eq!(canvas.pixel(31, 20), Some(colors::BACKGROUND));
        assert_eq!(canvas.pixel(40, 20), None);
    }

    #[test]
    fn test_stroke_leaves_inside_untouched() {
        let mut bytes = buffer(40, 40);
        let mut canvas = Canvas::from_bytes(&mut bytes, 40, 40).expect("canvas");
        canvas.clear(colors::BACKGROUND);
        canvas.stroke_circle(Vec2::new(20.0, 20.0), 15.0, 2.0, colors::BOUNDARY);

        assert_eq!(canvas.pixel(20, 20), Some(colors::BACKGROUND));
        assert_eq!(canvas.pixel(34, 20), Some(colors::BOUNDARY));
        assert_eq!(canvas.pixel(20, 5), Some(colors::BOUNDARY));
    }

    #[test]
    fn test_shapes_clip_at_edges() {
        let mut bytes = buffer(16, 16);
        let mut canvas = Canvas::from_bytes(&mut bytes, 16, 16).expect("canvas");
        canvas.fill_circle(Vec2::new(-5.0, 8.0), 10.0, RED);
        canvas.fill_circle(Vec2::new(100.0, 100.0), 10.0, RED);
        canvas.stroke_circle(Vec2::new(8.0, 8.0), 30.0, 1.0, RED);
        assert_eq!(canvas.pixel(0, 8), Some(RED));
        assert_eq!(canvas.pixel(15, 15), Some(Rgba::default()));
    }

    #[test]
    fn test_blit_respects_alpha() {
        let mut bytes = buffer(8, 8);
        let mut canvas = Canvas::from_bytes(&mut bytes, 8, 8).expect("canvas");
        canvas.clear(colors::BACKGROUND);

        let opaque = Sprite::solid(2, 2, RED);
        canvas.blit(&opaque, Vec2::new(1.0, 1.0));
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(3, 3), Some(colors::BACKGROUND));

        let clear = Sprite::solid(2, 2, Rgba::new(0, 255, 0, 0));
        canvas.blit(&clear, Vec2::new(1.0, 1.0));
        assert_eq!(canvas.pixel(1, 1), Some(RED));

        // Partly off-canvas is fine
        canvas.blit(&opaque, Vec2::new(7.0, -1.0));
        assert_eq!(canvas.pixel(7, 0), Some(RED));
    }
}
