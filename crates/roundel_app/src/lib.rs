//! Roundel Application Framework
//!
//! Ties the pieces together: a [`Scene`] of rounded quads and text boxes,
//! the [`RenderContext`] that draws it, [`EventHandlers`] for application
//! callbacks and, with the `windowed` feature, the desktop runner.
//!
//! # Example
//!
//! ```ignore
//! use roundel_app::prelude::*;
//! use std::path::Path;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = AppConfig::load_or_default(Path::new("roundel.toml"))?;
//!     let mut scene = Scene::new();
//!     let card = scene.quads_mut().insert(
//!         Quad::new(Dim2::from_scale(0.5, 0.5), Dim2::from_scale(0.25, 0.25))
//!             .with_color(Color::RED)
//!             .with_border_radius(BorderRadius::circular_pixels(75.0)),
//!     );
//!
//!     let handlers = EventHandlers::new().on_frame(move |scene, _window, time| {
//!         if let Some(quad) = scene.quads_mut().get_mut(card) {
//!             quad.set_rotation(time.elapsed as f32);
//!         }
//!     });
//!
//!     WindowedApp::run(config, scene, handlers)?;
//!     Ok(())
//! }
//! ```

mod config;
mod context;
mod error;
mod handlers;
mod resources;
mod scene;

#[cfg(all(feature = "windowed", not(any(target_os = "android", target_os = "ios"))))]
pub mod windowed;

#[cfg(test)]
mod tests;

pub use config::{AppConfig, Backend, RendererSection, ResourcesSection, TextSection, WindowSection};
pub use context::RenderContext;
pub use error::{AppError, Result};
pub use handlers::{EventHandlers, FrameClock, FrameTime};
pub use resources::{ResourcePaths, QUAD_SHADER_FILE, TEXT_SHADER_FILE};
pub use scene::{Scene, TextId};

pub use roundel_platform::WindowConfig;

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::config::AppConfig;
    pub use crate::context::RenderContext;
    pub use crate::error::{AppError, Result};
    pub use crate::handlers::{EventHandlers, FrameTime};
    pub use crate::resources::ResourcePaths;
    pub use crate::scene::{Scene, TextId};

    #[cfg(all(feature = "windowed", not(any(target_os = "android", target_os = "ios"))))]
    pub use crate::windowed::WindowedApp;

    // Core types
    pub use roundel_core::{BorderRadius, Color, Dim, Dim2, Quad, QuadId, Radius, Vec2};

    // Text
    pub use roundel_text::{FontId, Text, TextAlignment};

    // Platform types
    pub use roundel_platform::{Key, KeyState, KeyboardEvent, Window, WindowConfig};
}
