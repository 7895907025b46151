//! Morph Core
//!
//! Data types shared by every layer of the particle morph renderer.
//!
//! # Features
//!
//! - **Formations**: Fibonacci-lattice sphere and randomized spread field
//! - **Palettes**: Warm HSL color distributions for the point cloud
//! - **Math**: Minimal `Vec3`/`Mat4` types with wgpu-friendly projections
//!
//! Everything in this crate is pure: no GPU access, no global state.

pub mod color;
pub mod formation;
pub mod math;
pub mod palette;

pub use color::Color;
pub use formation::{generate_sphere, generate_spread, Formation, SpreadParams};
pub use math::{Mat4, Vec3};
pub use palette::{generate_colors, ColorArray, PaletteConfig};
