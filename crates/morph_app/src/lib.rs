//! Particle Morph
//!
//! A scroll-synchronized particle renderer: a point cloud rests on a sphere
//! and morphs into a scattered spread as the page scrolls through a pinned
//! range.
//!
//! # Example (Headless)
//!
//! ```ignore
//! use morph_animation::ProgressSignal;
//! use morph_app::{MorphConfig, ParticleMorph};
//! use morph_platform::HostRegistry;
//!
//! let host = HostRegistry::new(1280, 720);
//! let progress = ProgressSignal::new();
//! let mut morph = ParticleMorph::new(MorphConfig::default(), backend, progress.handle());
//!
//! morph.activate(&host)?;
//! progress.set(0.5);
//! morph.frame()?;
//! morph.deactivate();
//! ```
//!
//! # Example (Windowed Application)
//!
//! ```ignore
//! use morph_app::windowed::WindowedApp;
//! use morph_app::{MorphConfig, WindowConfig};
//!
//! fn main() -> morph_app::Result<()> {
//!     WindowedApp::run(MorphConfig::default(), WindowConfig::default())
//! }
//! ```

mod config;
mod error;
mod morph;
mod scroller;

#[cfg(all(feature = "windowed", not(any(target_os = "android", target_os = "ios"))))]
pub mod windowed;

pub use config::{MorphConfig, ParticlesConfig, SphereConfig, SpreadConfig};
pub use error::{ConfigError, MorphError, Result};
pub use morph::{FrameOutcome, LifecycleState, ParticleMorph};
pub use scroller::{PageScroller, LINE_STEP};

pub use morph_platform::WindowConfig;
