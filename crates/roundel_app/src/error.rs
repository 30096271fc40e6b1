//! Error types for roundel_app

use std::path::PathBuf;

use roundel_gpu::RendererError;
use roundel_platform::PlatformError;
use roundel_text::TextError;
use thiserror::Error;

/// Errors that can occur in a Roundel application
#[derive(Error, Debug)]
pub enum AppError {
    /// Windowing or event loop failure
    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),

    /// GPU adapter, device, surface or shader failure
    #[error("Renderer error: {0}")]
    Renderer(String),

    /// Font loading failure
    #[error("Text error: {0}")]
    Text(#[from] TextError),

    /// A resource file exists but could not be read
    #[error("Failed to read resource {}: {source}", .path.display())]
    Resource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Frame acquisition failed in a way the loop cannot recover from
    #[error("Surface error: {0}")]
    Surface(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<RendererError> for AppError {
    fn from(err: RendererError) -> Self {
        AppError::Renderer(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Other(format!("{:#}", err))
    }
}

/// Result type for roundel_app operations
pub type Result<T> = std::result::Result<T, AppError>;
