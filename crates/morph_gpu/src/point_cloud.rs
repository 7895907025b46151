//! GPU point cloud
//!
//! Owns the position and color storage buffers for one cloud and the bind
//! group that ties them to the frame uniforms.

use bytemuck::{Pod, Zeroable};
use morph_core::Mat4;
use serde::{Deserialize, Serialize};

use crate::error::RendererError;

/// Smallest buffer we create, so empty clouds still bind
const MIN_BUFFER_SIZE: u64 = 16;

/// Sprite appearance
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointStyle {
    /// Sprite edge length in world units
    pub size: f32,
    /// Peak alpha at the sprite center
    pub opacity: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            size: 0.1,
            opacity: 0.9,
        }
    }
}

/// Per-frame uniforms
///
/// Must match the WGSL struct layout exactly
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    /// Model-view matrix (column-major)
    pub model_view: [[f32; 4]; 4],
    /// Projection matrix (column-major)
    pub projection: [[f32; 4]; 4],
    /// Point size (x) and opacity (y)
    pub params: [f32; 4],
}

impl FrameUniforms {
    pub fn new(model: &Mat4, view: &Mat4, projection: &Mat4, style: &PointStyle) -> Self {
        Self {
            model_view: view.mul(model).cols,
            projection: projection.cols,
            params: [style.size, style.opacity, 0.0, 0.0],
        }
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::new(
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
            &Mat4::IDENTITY,
            &PointStyle::default(),
        )
    }
}

/// Check that `positions` and `colors` describe the same whole number of particles
pub fn validate_point_data(positions: &[f32], colors: &[f32]) -> Result<usize, RendererError> {
    if positions.len() % 3 != 0 || positions.len() != colors.len() {
        return Err(RendererError::PointData {
            positions: positions.len(),
            colors: colors.len(),
        });
    }
    Ok(positions.len() / 3)
}

/// Check that a buffer of `floats` values can be created and bound as storage
pub fn check_buffer_limits(floats: usize, limits: &wgpu::Limits) -> Result<(), RendererError> {
    let bytes = (floats as u64).saturating_mul(std::mem::size_of::<f32>() as u64);
    let max = u64::from(limits.max_storage_buffer_binding_size).min(limits.max_buffer_size);
    if bytes > max {
        return Err(RendererError::Capability(format!(
            "point buffer of {} bytes exceeds the device limit of {} bytes ({} particles max)",
            bytes,
            max,
            max / (3 * std::mem::size_of::<f32>() as u64)
        )));
    }
    Ok(())
}

fn buffer_size(floats: usize) -> u64 {
    ((floats * std::mem::size_of::<f32>()) as u64).max(MIN_BUFFER_SIZE)
}

/// Position and color buffers for one point cloud
#[derive(Debug)]
pub struct PointCloudBuffer {
    position_buffer: wgpu::Buffer,
    color_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    count: u32,
}

impl PointCloudBuffer {
    /// Upload a point cloud
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        uniform_buffer: &wgpu::Buffer,
        positions: &[f32],
        colors: &[f32],
    ) -> Result<Self, RendererError> {
        let count = validate_point_data(positions, colors)?;
        let count = u32::try_from(count).map_err(|_| {
            RendererError::Capability(format!("{} particles exceed the draw instance range", count))
        })?;
        check_buffer_limits(positions.len(), &device.limits())?;

        let position_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Point Positions"),
            size: buffer_size(positions.len()),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let color_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Point Colors"),
            size: buffer_size(colors.len()),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        if !positions.is_empty() {
            queue.write_buffer(&position_buffer, 0, bytemuck::cast_slice(positions));
            queue.write_buffer(&color_buffer, 0, bytemuck::cast_slice(colors));
        }

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Point Cloud Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: position_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: color_buffer.as_entire_binding(),
                },
            ],
        });

        tracing::debug!("Uploaded point cloud with {} particles", count);

        Ok(Self {
            position_buffer,
            color_buffer,
            bind_group,
            count,
        })
    }

    /// Overwrite all positions
    ///
    /// The slice must hold exactly as many particles as the cloud was created with.
    pub fn write_positions(&self, queue: &wgpu::Queue, positions: &[f32]) {
        debug_assert_eq!(positions.len(), self.count as usize * 3);
        if positions.is_empty() {
            return;
        }
        queue.write_buffer(&self.position_buffer, 0, bytemuck::cast_slice(positions));
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }

    /// Free the GPU memory now rather than when the last reference drops
    pub fn destroy(self) {
        self.position_buffer.destroy();
        self.color_buffer.destroy();
    }
}
