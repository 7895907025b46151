//! Error types for morph_app

use std::path::PathBuf;

use morph_gpu::{RendererError, ResizeError};
use morph_platform::PlatformError;
use thiserror::Error;

/// Errors loading or validating a [`MorphConfig`](crate::MorphConfig)
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range
    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Errors that can occur in the particle morph renderer
#[derive(Error, Debug)]
pub enum MorphError {
    /// The GPU backend could not provide a surface or buffers
    #[error("Renderer error: {0}")]
    Renderer(#[from] RendererError),

    /// The viewport cannot be rendered into
    #[error("Viewport error: {0}")]
    Viewport(#[from] ResizeError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Platform error (windowing, event loop)
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    #[error("Renderer is already active")]
    AlreadyActive,

    /// Disposed renderers cannot be re-activated
    #[error("Renderer has been disposed")]
    Disposed,
}

/// Result type for morph_app operations
pub type Result<T> = std::result::Result<T, MorphError>;
