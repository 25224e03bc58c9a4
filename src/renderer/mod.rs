//! Software rendering module
//!
//! Scenes are rasterized on the CPU into an RGBA frame that `pixels`
//! uploads and scales to the window.

pub mod canvas;
pub mod pixel;
pub mod scene;
pub mod surface;
pub mod text;

pub use canvas::Canvas;
pub use pixel::{Rgba, colors};
pub use scene::{counter_text, draw_halo, draw_spawner};
pub use surface::Surface;
pub use text::HudFont;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create pixel surface: {0}")]
    Surface(#[from] pixels::Error),
    #[error("failed to present frame: {0}")]
    Present(#[source] pixels::Error),
    #[error("failed to resize surface: {0}")]
    Resize(#[from] pixels::TextureError),
    #[error("frame buffer is {actual} bytes, expected {expected}")]
    FrameSize { expected: usize, actual: usize },
}
