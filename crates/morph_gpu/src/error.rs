//! Renderer errors

use thiserror::Error;

/// Errors raised while acquiring or drawing to a surface
#[derive(Error, Debug)]
pub enum RendererError {
    /// No adapter can present to the surface
    #[error("no suitable GPU adapter found")]
    AdapterNotFound,

    #[error("failed to request GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    /// The surface has no usable format or alpha mode
    #[error("surface capability error: {0}")]
    Capability(String),

    #[error("out of GPU memory")]
    OutOfMemory,

    /// Positions or colors do not describe whole particles
    #[error("point data length mismatch: {positions} position floats, {colors} color floats")]
    PointData { positions: usize, colors: usize },
}

/// Errors raised when a viewport size cannot be applied
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ResizeError {
    #[error("viewport has zero area ({width}x{height})")]
    ZeroSize { width: u32, height: u32 },

    #[error("invalid aspect ratio {0}")]
    InvalidAspect(f32),
}
