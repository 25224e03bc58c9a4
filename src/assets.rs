//! Sprite and font loading
//!
//! The target sprite is required: a missing or broken image stops startup.
//! The HUD font is bundled; a configured font file overrides it.

use std::fs;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use thiserror::Error;

use crate::renderer::{HudFont, Rgba};

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} is not a usable font")]
    Font { path: PathBuf },
    #[error("bundled font is corrupt")]
    EmbeddedFont,
}

/// An RGBA image ready to be blitted
#[derive(Debug, Clone)]
pub struct Sprite {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Sprite {
    /// Load an image file and scale it to exactly `width` x `height`
    pub fn load_scaled(path: &Path, width: u32, height: u32) -> Result<Self, AssetError> {
        let image = image::open(path).map_err(|source| AssetError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        let scaled = imageops::resize(&image.to_rgba8(), width, height, FilterType::Triangle);
        log::info!(
            "Loaded sprite {} ({}x{} -> {}x{})",
            path.display(),
            image.width(),
            image.height(),
            width,
            height
        );
        Ok(Self {
            width,
            height,
            pixels: bytemuck::cast_slice(scaled.as_raw()).to_vec(),
        })
    }

    /// Single-color sprite
    pub fn solid(width: u32, height: u32, color: Rgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get((y * self.width + x) as usize).copied()
    }
}

/// Load a font from an explicit path
pub fn load_font(path: &Path) -> Result<HudFont, AssetError> {
    let bytes = fs::read(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    HudFont::from_bytes(bytes).ok_or_else(|| AssetError::Font {
        path: path.to_path_buf(),
    })
}

/// Load the configured font, falling back to the bundled one
pub fn hud_font(configured: Option<&Path>) -> Result<HudFont, AssetError> {
    if let Some(path) = configured {
        match load_font(path) {
            Ok(font) => {
                log::info!("Loaded HUD font {}", path.display());
                return Ok(font);
            }
            Err(e) => log::warn!("{e} - using the bundled font"),
        }
    }
    HudFont::embedded().ok_or(AssetError::EmbeddedFont)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_sprite_is_an_error() {
        let err = Sprite::load_scaled(Path::new("does/not/exist.png"), 50, 50).unwrap_err();
        assert!(matches!(err, AssetError::Image { .. }));
        assert!(err.to_string().contains("does/not/exist.png"));
    }

    #[test]
    fn test_sprite_load_scales_to_requested_size() {
        let dir = std::env::temp_dir().join(format!("circle-bounce-sprite-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("target.png");
        image::RgbaImage::from_pixel(8, 4, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .expect("write png");

        let sprite = Sprite::load_scaled(&path, 50, 50).expect("sprite");
        assert_eq!((sprite.width(), sprite.height()), (50, 50));
        assert_eq!(sprite.pixel(25, 25), Some(Rgba::new(10, 20, 30, 255)));
        assert_eq!(sprite.pixel(50, 0), None);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_bad_font_path_reported() {
        let err = load_font(Path::new("no-such-font.ttf")).err();
        assert!(matches!(err, Some(AssetError::Io { .. })));
    }

    #[test]
    fn test_hud_font_always_available() {
        assert!(hud_font(None).is_ok());
        // A broken override falls back instead of failing
        assert!(hud_font(Some(Path::new("no-such-font.ttf"))).is_ok());
    }
}
