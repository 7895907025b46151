//! The morph window and how it opens

/// How the window opens
#[derive(Clone, Debug)]
pub struct WindowConfig {
    pub title: String,
    /// Logical pixels
    pub width: u32,
    /// Logical pixels
    pub height: u32,
    pub resizable: bool,
    /// Borderless fullscreen on the current monitor
    pub fullscreen: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Particle Morph".to_string(),
            width: 1280,
            height: 720,
            resizable: true,
            fullscreen: false,
        }
    }
}

impl WindowConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Initial size in logical pixels
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }
}

/// What the app needs from a native window
pub trait Window {
    /// Drawable size in physical pixels
    fn size(&self) -> (u32, u32);

    /// Schedule a [`Frame`](crate::Event::Frame)
    fn request_redraw(&self);
}
