//! Platform trait

use crate::error::PlatformError;
use crate::event::EventLoop;
use crate::window::{Window, WindowConfig};

/// Entry point of a windowing backend
pub trait Platform {
    /// The window type for this platform
    type Window: Window;
    /// The event loop type for this platform
    type EventLoop: EventLoop<Window = Self::Window>;

    /// Create a new platform instance
    fn new() -> Result<Self, PlatformError>
    where
        Self: Sized;

    /// Create an event loop that opens one window described by `config`
    fn create_event_loop_with_config(
        &self,
        config: WindowConfig,
    ) -> Result<Self::EventLoop, PlatformError>;

    /// Create an event loop with the default window
    fn create_event_loop(&self) -> Result<Self::EventLoop, PlatformError> {
        self.create_event_loop_with_config(WindowConfig::default())
    }

    /// Platform name, e.g. "desktop"
    fn name(&self) -> &'static str;
}
