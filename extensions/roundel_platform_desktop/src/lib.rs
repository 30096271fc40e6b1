//! Roundel Desktop Platform
//!
//! Windowing and input for macOS, Windows, and Linux using winit.
//!
//! # Example
//!
//! ```ignore
//! use roundel_platform::prelude::*;
//! use roundel_platform_desktop::DesktopPlatform;
//!
//! fn main() -> Result<()> {
//!     let platform = DesktopPlatform::new()?;
//!     let event_loop = platform.create_event_loop_with_config(WindowConfig::new("Demo"))?;
//!
//!     event_loop.run(|event, window| {
//!         if let Event::Frame = event {
//!             window.set_title(&format!("{:.1}s", window.elapsed()));
//!         }
//!         ControlFlow::Continue
//!     })
//! }
//! ```

pub mod event_loop;
pub mod input;
pub mod window;

pub use event_loop::DesktopEventLoop;
pub use window::DesktopWindow;

use roundel_platform::{Platform, PlatformError, WindowConfig};

/// Desktop platform implementation
pub struct DesktopPlatform;

impl Platform for DesktopPlatform {
    type Window = DesktopWindow;
    type EventLoop = DesktopEventLoop;

    fn new() -> Result<Self, PlatformError> {
        Ok(Self)
    }

    fn create_event_loop_with_config(
        &self,
        config: WindowConfig,
    ) -> Result<Self::EventLoop, PlatformError> {
        DesktopEventLoop::new(config)
    }

    fn name(&self) -> &'static str {
        "desktop"
    }
}
