//! Window and pixel surface
//!
//! `pixels` owns the GPU side; we only ever touch its RGBA frame.

use std::sync::Arc;

use pixels::{Pixels, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use super::RenderError;
use super::canvas::Canvas;

/// A fixed-size window with a frame buffer of the same logical size
pub struct Surface {
    window: Arc<Window>,
    pixels: Pixels<'static>,
    width: u32,
    height: u32,
}

impl Surface {
    /// Open a non-resizable `width` x `height` window titled `title`
    pub fn create(
        event_loop: &ActiveEventLoop,
        title: &str,
        width: u32,
        height: u32,
    ) -> Result<Self, RenderError> {
        let attrs = Window::default_attributes()
            .with_title(title)
            .with_inner_size(LogicalSize::new(width, height))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attrs)?);

        let size = window.inner_size();
        let texture = SurfaceTexture::new(size.width, size.height, Arc::clone(&window));
        let pixels = Pixels::new(width, height, texture)?;

        log::info!(
            "Window '{}': {}x{} logical, {}x{} physical, scale={}",
            title,
            width,
            height,
            size.width,
            size.height,
            window.scale_factor()
        );

        Ok(Self {
            window,
            pixels,
            width,
            height,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Drawable view of the next frame
    pub fn canvas(&mut self) -> Result<Canvas<'_>, RenderError> {
        Canvas::from_bytes(self.pixels.frame_mut(), self.width, self.height)
    }

    /// Upload the frame and show it
    pub fn present(&self) -> Result<(), RenderError> {
        self.pixels.render().map_err(RenderError::Present)
    }

    /// Track a new physical window size (e.g. a scale factor change)
    pub fn resize_surface(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Ok(());
        }
        self.pixels.resize_surface(width, height)?;
        Ok(())
    }
}
