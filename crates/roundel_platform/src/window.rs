//! Window abstraction and configuration

/// Window configuration
#[derive(Clone, Debug, PartialEq)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Initial width in physical pixels
    pub width: u32,
    /// Initial height in physical pixels
    pub height: u32,
    /// Whether the window can be resized
    pub resizable: bool,
    /// Whether frames wait for the display's vertical sync
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            width: 600,
            height: 600,
            resizable: true,
            vsync: true,
        }
    }
}

impl WindowConfig {
    /// Create a new window configuration with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the window title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the window size
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set whether the window is resizable
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    /// Set whether presentation waits for vsync
    pub fn vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }
}

/// Window abstraction trait
///
/// Implemented by platform-specific window types.
pub trait Window {
    /// Framebuffer size in physical pixels
    fn size(&self) -> (u32, u32);

    /// Request a new framebuffer size in physical pixels
    fn set_size(&self, width: u32, height: u32);

    /// Display scale factor (DPI scaling)
    fn scale_factor(&self) -> f64;

    /// Current title
    fn title(&self) -> String;

    /// Set the window title
    fn set_title(&self, title: &str);

    /// Last known cursor position in physical pixels, relative to the top-left
    fn cursor_position(&self) -> (f32, f32);

    /// Seconds since the window was created
    fn elapsed(&self) -> f64;

    /// Request a redraw
    fn request_redraw(&self);

    /// Whether the window has keyboard focus
    fn is_focused(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = WindowConfig::new("Rounded Quads")
            .size(1024, 768)
            .resizable(false)
            .vsync(false);

        assert_eq!(config.title, "Rounded Quads");
        assert_eq!((config.width, config.height), (1024, 768));
        assert!(!config.resizable);
        assert!(!config.vsync);
    }

    #[test]
    fn test_default_window_is_square() {
        let config = WindowConfig::default();
        assert_eq!((config.width, config.height), (600, 600));
        assert!(config.title.is_empty());
        assert!(config.vsync);
    }
}
