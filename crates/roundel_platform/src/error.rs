//! Platform error types

use thiserror::Error;

/// Platform-related errors
#[derive(Error, Debug)]
pub enum PlatformError {
    /// Failed to create the event loop
    #[error("Failed to create event loop: {0}")]
    EventLoop(String),

    /// Failed to create the window
    #[error("Failed to create window: {0}")]
    WindowCreation(String),

    /// Platform not supported on this OS
    #[error("Platform not supported: {0}")]
    Unsupported(String),

    /// The application handler failed while starting up
    #[error("Application startup failed: {0}")]
    Startup(String),
}

/// Result type for platform operations
pub type Result<T> = std::result::Result<T, PlatformError>;
