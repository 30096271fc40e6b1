//! Event loop and platform events

use crate::error::PlatformError;
use crate::input::InputEvent;
use crate::window::Window;

/// Event loop abstraction
///
/// Platform event loops implement this to drive a Roundel application.
pub trait EventLoop {
    /// The window type handed to the handler
    type Window: Window;

    /// Run the event loop
    ///
    /// Blocks until the handler returns [`ControlFlow::Exit`] or the window
    /// goes away. The handler sees every event together with the window.
    fn run<F>(self, handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event, &Self::Window) -> ControlFlow + 'static;
}

/// Control flow after handling an event
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlFlow {
    /// Keep running
    #[default]
    Continue,
    /// Leave the event loop
    Exit,
}

/// Platform events
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// Window-related event
    Window(WindowEvent),
    /// Keyboard, character or cursor input
    Input(InputEvent),
    /// Application lifecycle event
    Lifecycle(LifecycleEvent),
    /// Time to render a frame
    ///
    /// Sent once per redraw; the desktop loop requests a redraw after every
    /// frame so this arrives continuously, paced by the surface's present mode.
    Frame,
}

/// Window events
#[derive(Clone, Debug, PartialEq)]
pub enum WindowEvent {
    /// The framebuffer was resized
    Resized {
        /// New width in physical pixels
        width: u32,
        /// New height in physical pixels
        height: u32,
    },
    /// The user asked to close the window
    CloseRequested,
    /// Focus gained (true) or lost (false)
    Focused(bool),
    /// The display scale factor changed
    ScaleFactorChanged {
        /// New scale factor
        scale_factor: f64,
    },
}

/// Application lifecycle events
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// The window exists and rendering may start
    Resumed,
    /// Rendering should pause
    Suspended,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_flow_defaults_to_continue() {
        assert_eq!(ControlFlow::default(), ControlFlow::Continue);
    }

    #[test]
    fn test_events_compare_by_payload() {
        let a = Event::Window(WindowEvent::Resized { width: 800, height: 600 });
        let b = Event::Window(WindowEvent::Resized { width: 800, height: 600 });
        assert_eq!(a, b);
        assert_ne!(a, Event::Frame);
    }
}
