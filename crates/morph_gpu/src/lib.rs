//! Morph GPU Renderer
//!
//! Point cloud rendering using wgpu.
//!
//! # Features
//!
//! - **Point sprites**: Camera-facing quads with a radial falloff, additively blended
//! - **Camera**: Perspective projection that follows the viewport
//! - **Backend seam**: [`RenderBackend`] and [`DrawSurface`] keep the render loop GPU-agnostic

pub mod backend;
pub mod camera;
pub mod error;
pub mod point_cloud;
pub mod renderer;
pub mod shaders;

pub use backend::{DrawSurface, RenderBackend};
pub use camera::{Camera, CameraConfig};
pub use error::{RendererError, ResizeError};
pub use point_cloud::{check_buffer_limits, FrameUniforms, PointCloudBuffer, PointStyle};
pub use renderer::{RendererConfig, WgpuBackend, WgpuSurface};
pub use shaders::POINT_SHADER;
