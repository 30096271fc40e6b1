//! Application callbacks
//!
//! [`EventHandlers`] is a registry of boxed closures the host loop calls with
//! the scene and the window. Any number of handlers may be registered per
//! event; they run in registration order.

use roundel_platform::{Event, InputEvent, KeyboardEvent, MouseEvent, Window, WindowEvent};

use crate::scene::Scene;

/// Timing of the current frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameTime {
    /// Seconds since the window was created
    pub elapsed: f64,
    /// Seconds since the previous frame (0 on the first frame)
    pub delta: f32,
}

impl FrameTime {
    /// Instantaneous frames per second, 0 when unknown
    pub fn fps(&self) -> u32 {
        if self.delta > 0.0 {
            (1.0 / self.delta) as u32
        } else {
            0
        }
    }
}

/// Turns window timestamps into per-frame deltas
#[derive(Clone, Debug, Default)]
pub struct FrameClock {
    last: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick(&mut self, now: f64) -> FrameTime {
        let delta = self.last.map_or(0.0, |last| (now - last).max(0.0) as f32);
        self.last = Some(now);
        FrameTime {
            elapsed: now,
            delta,
        }
    }
}

type ResizeHandler = Box<dyn FnMut(&mut Scene, &dyn Window, u32, u32)>;
type KeyHandler = Box<dyn FnMut(&mut Scene, &dyn Window, &KeyboardEvent)>;
type CharHandler = Box<dyn FnMut(&mut Scene, &dyn Window, char)>;
type CursorHandler = Box<dyn FnMut(&mut Scene, &dyn Window, f32, f32)>;
type FrameHandler = Box<dyn FnMut(&mut Scene, &dyn Window, &FrameTime)>;

/// Registry of application callbacks
#[derive(Default)]
pub struct EventHandlers {
    resize: Vec<ResizeHandler>,
    key: Vec<KeyHandler>,
    char: Vec<CharHandler>,
    cursor: Vec<CursorHandler>,
    frame: Vec<FrameHandler>,
}

impl EventHandlers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Framebuffer resized, in physical pixels
    pub fn on_resize(
        mut self,
        handler: impl FnMut(&mut Scene, &dyn Window, u32, u32) + 'static,
    ) -> Self {
        self.resize.push(Box::new(handler));
        self
    }

    /// Key pressed, released or repeated
    pub fn on_key(
        mut self,
        handler: impl FnMut(&mut Scene, &dyn Window, &KeyboardEvent) + 'static,
    ) -> Self {
        self.key.push(Box::new(handler));
        self
    }

    /// Character typed
    pub fn on_char(mut self, handler: impl FnMut(&mut Scene, &dyn Window, char) + 'static) -> Self {
        self.char.push(Box::new(handler));
        self
    }

    /// Cursor moved, in physical pixels from the top-left corner
    pub fn on_cursor(
        mut self,
        handler: impl FnMut(&mut Scene, &dyn Window, f32, f32) + 'static,
    ) -> Self {
        self.cursor.push(Box::new(handler));
        self
    }

    /// Called before every frame is drawn
    pub fn on_frame(
        mut self,
        handler: impl FnMut(&mut Scene, &dyn Window, &FrameTime) + 'static,
    ) -> Self {
        self.frame.push(Box::new(handler));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.resize.is_empty()
            && self.key.is_empty()
            && self.char.is_empty()
            && self.cursor.is_empty()
            && self.frame.is_empty()
    }

    /// Route a platform event to the matching handlers
    ///
    /// Frame events are not handled here; see [`frame`](Self::frame).
    pub fn dispatch(&mut self, scene: &mut Scene, window: &dyn Window, event: &Event) {
        match event {
            Event::Window(WindowEvent::Resized { width, height }) => {
                for handler in &mut self.resize {
                    handler(scene, window, *width, *height);
                }
            }
            Event::Input(InputEvent::Keyboard(key)) => {
                for handler in &mut self.key {
                    handler(scene, window, key);
                }
            }
            Event::Input(InputEvent::Char(c)) => {
                for handler in &mut self.char {
                    handler(scene, window, *c);
                }
            }
            Event::Input(InputEvent::Mouse(MouseEvent::Moved { x, y })) => {
                for handler in &mut self.cursor {
                    handler(scene, window, *x, *y);
                }
            }
            _ => {}
        }
    }

    /// Run the frame handlers
    pub fn frame(&mut self, scene: &mut Scene, window: &dyn Window, time: &FrameTime) {
        for handler in &mut self.frame {
            handler(scene, window, time);
        }
    }
}

impl std::fmt::Debug for EventHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandlers")
            .field("resize", &self.resize.len())
            .field("key", &self.key.len())
            .field("char", &self.char.len())
            .field("cursor", &self.cursor.len())
            .field("frame", &self.frame.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_deltas() {
        let mut clock = FrameClock::new();
        let first = clock.tick(1.0);
        assert_eq!(first.delta, 0.0);
        assert_eq!(first.fps(), 0);

        let second = clock.tick(1.25);
        assert_eq!(second.elapsed, 1.25);
        assert!((second.delta - 0.25).abs() < 1e-6);
        assert_eq!(second.fps(), 4);

        // A clock going backwards never yields a negative delta
        assert_eq!(clock.tick(1.0).delta, 0.0);
    }
}
