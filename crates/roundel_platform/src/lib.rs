//! Roundel Platform Abstraction Layer
//!
//! Platform-agnostic traits and types for the window, its input and the
//! frame loop that drives rendering.
//!
//! # Architecture
//!
//! - [`Platform`] - creates event loops
//! - [`Window`] - window size, title and redraw requests
//! - [`EventLoop`] - delivers [`Event`]s to a handler until it asks to exit
//!
//! The desktop implementation (winit) lives in `roundel_platform_desktop`.
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
//!     event_loop.run(|event, _window| match event {
//!         Event::Window(WindowEvent::CloseRequested) => ControlFlow::Exit,
//!         _ => ControlFlow::Continue,
//!     })
//! }
//! ```

mod error;
mod event;
mod input;
mod platform;
mod window;

pub use error::{PlatformError, Result};
pub use event::{ControlFlow, Event, EventLoop, LifecycleEvent, WindowEvent};
pub use input::{InputEvent, Key, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent};
pub use platform::Platform;
pub use window::{Window, WindowConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::{PlatformError, Result};
    pub use crate::event::{ControlFlow, Event, EventLoop, LifecycleEvent, WindowEvent};
    pub use crate::input::{
        InputEvent, Key, KeyState, KeyboardEvent, Modifiers, MouseButton, MouseEvent,
    };
    pub use crate::platform::Platform;
    pub use crate::window::{Window, WindowConfig};
}
