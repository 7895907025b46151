//! Morph Animation System
//!
//! Everything that turns scroll input and frame ticks into particle motion.
//!
//! # Features
//!
//! - **Easing**: Remapping curves for linear progress
//! - **Blending**: [`MorphInterpolator`] re-derives the live buffer from two formations
//! - **Rotation**: [`RotationDriver`] accumulates progress-weighted spin every frame
//! - **Progress**: A single-writer progress signal read by pull
//! - **Pinning**: [`PinTrigger`] maps scroll offsets to progress with scrub lag

pub mod easing;
pub mod morph;
pub mod progress;
pub mod rotation;
pub mod scroll_trigger;

pub use easing::Easing;
pub use morph::{blend, LiveBuffer, MorphInterpolator};
pub use progress::{ProgressHandle, ProgressSignal, ProgressSubscription};
pub use rotation::{RotationDriver, RotationRates, RotationState};
pub use scroll_trigger::{PinConfig, PinDistance, PinTrigger};
