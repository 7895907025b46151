//! Rendering seam
//!
//! The render loop talks to the GPU only through these traits. The wgpu
//! implementation lives in [`crate::renderer`]; tests substitute a recording
//! backend.

use crate::error::{RendererError, ResizeError};
use crate::point_cloud::FrameUniforms;

/// Something that can hand out drawing surfaces
pub trait RenderBackend {
    type Surface: DrawSurface;

    /// Acquire a surface of `width` x `height` physical pixels
    ///
    /// Fails when the device cannot render; nothing stays allocated on error.
    fn acquire(&mut self, width: u32, height: u32) -> Result<Self::Surface, RendererError>;

    /// Detach a surface from its host and free it
    fn detach(&mut self, surface: Self::Surface);
}

/// A drawable surface and the point clouds uploaded to it
pub trait DrawSurface {
    type PointCloud;

    /// Current size in physical pixels
    fn size(&self) -> (u32, u32);

    /// Upload positions and colors, three floats per particle each
    fn create_point_cloud(
        &mut self,
        positions: &[f32],
        colors: &[f32],
    ) -> Result<Self::PointCloud, RendererError>;

    /// Replace all positions of `cloud`
    fn write_positions(&mut self, cloud: &Self::PointCloud, positions: &[f32]);

    fn resize(&mut self, width: u32, height: u32) -> Result<(), ResizeError>;

    /// Clear and draw `cloud` with `uniforms`
    ///
    /// Transient surface loss is handled internally by skipping the frame.
    fn draw(&mut self, cloud: &Self::PointCloud, uniforms: &FrameUniforms)
        -> Result<(), RendererError>;

    /// Free the buffers behind `cloud`
    fn release_point_cloud(&mut self, cloud: Self::PointCloud);
}
