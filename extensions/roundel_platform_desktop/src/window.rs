//! Desktop window implementation using winit

use std::cell::Cell;
use std::sync::Arc;
use std::time::Instant;

use roundel_platform::{Window, WindowConfig};
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window as WinitWindow, WindowAttributes};

/// Desktop window wrapping a winit window
pub struct DesktopWindow {
    window: Arc<WinitWindow>,
    focused: Cell<bool>,
    cursor: Cell<(f32, f32)>,
    created: Instant,
}

impl DesktopWindow {
    /// Create a new desktop window
    pub fn new(
        event_loop: &ActiveEventLoop,
        config: &WindowConfig,
    ) -> Result<Self, winit::error::OsError> {
        let attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(PhysicalSize::new(config.width, config.height))
            .with_resizable(config.resizable);

        let window = event_loop.create_window(attrs)?;
        tracing::debug!(
            "Created window {:?} ({}x{})",
            config.title,
            config.width,
            config.height
        );

        Ok(Self {
            window: Arc::new(window),
            focused: Cell::new(true),
            cursor: Cell::new((0.0, 0.0)),
            created: Instant::now(),
        })
    }

    /// Get the underlying winit window
    pub fn winit_window(&self) -> &WinitWindow {
        &self.window
    }

    /// Shared handle for surface creation
    pub fn winit_window_arc(&self) -> Arc<WinitWindow> {
        Arc::clone(&self.window)
    }

    pub(crate) fn set_focused(&self, focused: bool) {
        self.focused.set(focused);
    }

    pub(crate) fn set_cursor_position(&self, x: f32, y: f32) {
        self.cursor.set((x, y));
    }
}

impl Window for DesktopWindow {
    fn size(&self) -> (u32, u32) {
        let size = self.window.inner_size();
        (size.width, size.height)
    }

    fn set_size(&self, width: u32, height: u32) {
        // The Resized event follows if the platform honours the request
        let _ = self
            .window
            .request_inner_size(PhysicalSize::new(width, height));
    }

    fn scale_factor(&self) -> f64 {
        self.window.scale_factor()
    }

    fn title(&self) -> String {
        self.window.title()
    }

    fn set_title(&self, title: &str) {
        self.window.set_title(title);
    }

    fn cursor_position(&self) -> (f32, f32) {
        self.cursor.get()
    }

    fn elapsed(&self) -> f64 {
        self.created.elapsed().as_secs_f64()
    }

    fn request_redraw(&self) {
        self.window.request_redraw();
    }

    fn is_focused(&self) -> bool {
        self.focused.get()
    }
}
