//! winit-backed window

use std::sync::Arc;

use morph_platform::{Window, WindowConfig};
use winit::dpi::LogicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Fullscreen, Window as WinitWindow, WindowAttributes};

/// A winit window shared with the GPU surface
pub struct DesktopWindow {
    window: Arc<WinitWindow>,
}

fn attributes(config: &WindowConfig) -> WindowAttributes {
    let fullscreen = config.fullscreen.then_some(Fullscreen::Borderless(None));
    WindowAttributes::default()
        .with_title(config.title.as_str())
        .with_inner_size(LogicalSize::new(config.width, config.height))
        .with_resizable(config.resizable)
        .with_fullscreen(fullscreen)
}

impl DesktopWindow {
    pub fn new(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, winit::error::OsError> {
        let window = event_loop.create_window(attributes(config))?;
        tracing::debug!(
            "Opened window {:?} ({}x{} logical)",
            config.title,
            config.width,
            config.height
        );
        Ok(Self {
            window: Arc::new(window),
        })
    }

    /// Shared handle, for creating a surface that outlives this borrow
    pub fn winit_window_arc(&self) -> Arc<WinitWindow> {
        self.window.clone()
    }
}

impl Window for DesktopWindow {
    fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fullscreen_attribute() {
        let windowed = attributes(&WindowConfig::default());
        assert!(windowed.fullscreen.is_none());

        let full = attributes(&WindowConfig::default().fullscreen(true));
        assert!(matches!(full.fullscreen, Some(Fullscreen::Borderless(None))));
    }
}
