//! Pixel type for the RGBA frame buffer

use bytemuck::{Pod, Zeroable};

/// One RGBA8 pixel, laid out exactly like the bytes `pixels` hands us
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Mix `src` over `self` with `alpha` in 0-255
    pub fn blend(self, src: Rgba, alpha: u8) -> Rgba {
        let a = u16::from(alpha);
        let mix = |dst: u8, src: u8| ((u16::from(src) * a + u16::from(dst) * (255 - a)) / 255) as u8;
        Rgba::new(mix(self.r, src.r), mix(self.g, src.g), mix(self.b, src.b), 255)
    }
}

/// Colors for scene elements
pub mod colors {
    use super::Rgba;

    pub const BACKGROUND: Rgba = Rgba::new(0, 0, 0, 255);
    pub const BOUNDARY: Rgba = Rgba::new(255, 255, 255, 255);
    pub const HUD_TEXT: Rgba = Rgba::new(255, 255, 255, 255);
}
