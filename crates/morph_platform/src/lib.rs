//! Particle Morph Platform Abstraction Layer
//!
//! Platform-agnostic traits and types for windowing, input handling and the
//! host-side registrations a renderer makes while it is mounted.
//!
//! # Architecture
//!
//! - [`Platform`] - The top-level platform abstraction
//! - [`Window`] - Window management and properties
//! - [`EventLoop`] - Event handling and application lifecycle
//! - [`HostRegistry`] - Frame requests and resize listeners
//!
//! # Platform Implementations
//!
//! - `morph_platform_desktop` - Desktop platforms (macOS, Windows, Linux) using winit
//!
//! # Example
//!
//! ```ignore
//! use morph_platform::*;
//! use morph_platform_desktop::DesktopPlatform;
//!
//! fn main() -> Result<(), PlatformError> {
//!     let platform = DesktopPlatform::new()?;
//!     let event_loop = platform.create_event_loop(WindowConfig::default())?;
//!
//!     event_loop.run(|event, window| {
//!         match event {
//!             Event::Frame => {
//!                 // Render frame
//!             }
//!             Event::Window(WindowEvent::CloseRequested) => {
//!                 return ControlFlow::Exit;
//!             }
//!             _ => {}
//!         }
//!         ControlFlow::Continue
//!     })
//! }
//! ```

mod error;
mod event;
mod host;
mod input;
mod platform;
mod window;

// Re-export all public types
pub use error::{PlatformError, Result};
pub use event::{ControlFlow, Event, EventLoop, LifecycleEvent, WindowEvent};
pub use host::{
    FrameRequest, FrameRequestId, HostHandle, HostRegistry, ResizeListener, ResizeListenerId,
    SurfaceContainer,
};
pub use input::{key_event, scroll_event, InputEvent, Key, KeyState, KeyboardEvent};
pub use platform::Platform;
pub use window::{Window, WindowConfig};
