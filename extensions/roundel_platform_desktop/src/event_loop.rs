//! Desktop event loop implementation using winit

use roundel_platform::{
    ControlFlow, Event, EventLoop, InputEvent, LifecycleEvent, MouseEvent, PlatformError, Window,
    WindowConfig, WindowEvent,
};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent as WinitWindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop as WinitEventLoop};
use winit::keyboard::ModifiersState;
use winit::window::WindowId;

use crate::input;
use crate::window::DesktopWindow;

/// Desktop event loop wrapping winit's event loop
pub struct DesktopEventLoop {
    event_loop: WinitEventLoop<()>,
    window_config: WindowConfig,
}

impl DesktopEventLoop {
    /// Create a new desktop event loop
    pub fn new(config: WindowConfig) -> Result<Self, PlatformError> {
        let event_loop =
            WinitEventLoop::new().map_err(|e| PlatformError::EventLoop(e.to_string()))?;

        Ok(Self {
            event_loop,
            window_config: config,
        })
    }
}

impl EventLoop for DesktopEventLoop {
    type Window = DesktopWindow;

    fn run<F>(self, handler: F) -> Result<(), PlatformError>
    where
        F: FnMut(Event, &Self::Window) -> ControlFlow + 'static,
    {
        let mut app = DesktopApp::new(self.window_config, handler);
        self.event_loop
            .run_app(&mut app)
            .map_err(|e| PlatformError::EventLoop(e.to_string()))?;

        match app.window_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Internal winit application handler
struct DesktopApp<F>
where
    F: FnMut(Event, &DesktopWindow) -> ControlFlow,
{
    window_config: WindowConfig,
    window: Option<DesktopWindow>,
    window_error: Option<PlatformError>,
    handler: F,
    modifiers: ModifiersState,
    should_exit: bool,
}

impl<F> DesktopApp<F>
where
    F: FnMut(Event, &DesktopWindow) -> ControlFlow,
{
    fn new(window_config: WindowConfig, handler: F) -> Self {
        Self {
            window_config,
            window: None,
            window_error: None,
            handler,
            modifiers: ModifiersState::empty(),
            should_exit: false,
        }
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(ref window) = self.window {
            if (self.handler)(event, window) == ControlFlow::Exit {
                self.should_exit = true;
            }
        }
    }
}

impl<F> ApplicationHandler for DesktopApp<F>
where
    F: FnMut(Event, &DesktopWindow) -> ControlFlow,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            match DesktopWindow::new(event_loop, &self.window_config) {
                Ok(window) => {
                    self.window = Some(window);
                }
                Err(e) => {
                    tracing::error!("Failed to create window: {}", e);
                    self.window_error = Some(PlatformError::WindowCreation(e.to_string()));
                    event_loop.exit();
                    return;
                }
            }
        }

        self.handle_event(Event::Lifecycle(LifecycleEvent::Resumed));
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
        if self.should_exit {
            event_loop.exit();
        }
    }

    fn suspended(&mut self, _event_loop: &ActiveEventLoop) {
        self.handle_event(Event::Lifecycle(LifecycleEvent::Suspended));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WinitWindowEvent,
    ) {
        match event {
            WinitWindowEvent::CloseRequested => {
                self.handle_event(Event::Window(WindowEvent::CloseRequested));
            }

            WinitWindowEvent::Resized(size) => {
                self.handle_event(Event::Window(WindowEvent::Resized {
                    width: size.width,
                    height: size.height,
                }));
            }

            WinitWindowEvent::Focused(focused) => {
                if let Some(ref window) = self.window {
                    window.set_focused(focused);
                }
                self.handle_event(Event::Window(WindowEvent::Focused(focused)));
            }

            WinitWindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.handle_event(Event::Window(WindowEvent::ScaleFactorChanged {
                    scale_factor,
                }));
            }

            WinitWindowEvent::RedrawRequested => {
                self.handle_event(Event::Frame);
                // Continuous rendering: the next frame is paced by presentation
                if let Some(ref window) = self.window {
                    window.request_redraw();
                }
            }

            WinitWindowEvent::ModifiersChanged(mods) => {
                self.modifiers = mods.state();
            }

            WinitWindowEvent::KeyboardInput { event, .. } => {
                for input_event in input::convert_key_event(&event, self.modifiers) {
                    self.handle_event(Event::Input(input_event));
                }
            }

            WinitWindowEvent::CursorMoved { position, .. } => {
                let (x, y) = (position.x as f32, position.y as f32);
                if let Some(ref window) = self.window {
                    window.set_cursor_position(x, y);
                }
                self.handle_event(Event::Input(input::mouse_moved(x, y)));
            }

            WinitWindowEvent::MouseInput { state, button, .. } => {
                let (x, y) = self
                    .window
                    .as_ref()
                    .map_or((0.0, 0.0), |w| w.cursor_position());
                self.handle_event(Event::Input(input::mouse_button(state, button, x, y)));
            }

            WinitWindowEvent::CursorEntered { .. } => {
                self.handle_event(Event::Input(InputEvent::Mouse(MouseEvent::Entered)));
            }

            WinitWindowEvent::CursorLeft { .. } => {
                self.handle_event(Event::Input(InputEvent::Mouse(MouseEvent::Left)));
            }

            _ => {}
        }

        if self.should_exit {
            event_loop.exit();
        }
    }
}
