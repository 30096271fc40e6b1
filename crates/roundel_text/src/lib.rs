//! Text support for the Roundel renderer
//!
//! This crate provides:
//! - Font loading and parsing (TTF/OTF via ttf-parser)
//! - Glyph rasterization of printable ASCII (swash)
//! - One glyph atlas per loaded font
//! - A font store with a path cache and explicit init/terminate lifecycle
//! - The line-breaking layout engine (wrapping, alignment, justification)
//! - The [`Text`] box model with lazy re-layout

pub mod atlas;
pub mod font;
pub mod layout;
pub mod metrics;
pub mod rasterizer;
pub mod store;
pub mod text;

pub use atlas::{AtlasRegion, GlyphAtlas};
pub use font::{FontFace, FontMetrics};
pub use layout::{break_lines, place_glyphs, Line, PositionedGlyph, TextAlignment};
pub use metrics::{Character, GlyphMetrics, CHARS_LEN, CHARS_START};
pub use rasterizer::{GlyphRasterizer, RasterizedGlyph};
pub use store::{FontId, FontStore, LoadedFont, DEFAULT_FONT_QUALITY};
pub use text::Text;

use thiserror::Error;

/// Text errors
#[derive(Error, Debug)]
pub enum TextError {
    #[error("Failed to load font: {0}")]
    FontLoadError(String),

    #[error("Failed to parse font: {0}")]
    FontParseError(String),

    #[error("Atlas is full, cannot allocate glyph")]
    AtlasFull,

    #[error("Invalid font data")]
    InvalidFontData,

    #[error("Font store is not initialized")]
    NotInitialized,

    #[error("Unknown font handle")]
    UnknownFont,
}

pub type Result<T> = std::result::Result<T, TextError>;
