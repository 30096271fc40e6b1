//! Glyph rasterization using swash
//!
//! Renders glyph outlines to 8-bit coverage bitmaps at a fixed pixel height.

use swash::scale::{Render, ScaleContext, Source, StrikeWith};
use swash::zeno::Format;

use crate::font::FontFace;
use crate::{Result, TextError};

/// Rasterized glyph bitmap with metrics, all in pixels
#[derive(Debug, Clone, Default)]
pub struct RasterizedGlyph {
    /// Coverage bitmap, one byte per pixel, row-major
    pub bitmap: Vec<u8>,
    pub width: u32,
    pub height: u32,
    /// Offset from the pen position to the bitmap's left edge
    pub bearing_x: i32,
    /// Offset from the baseline up to the bitmap's top edge
    pub bearing_y: i32,
    /// Horizontal advance to the next pen position
    pub advance: f32,
}

/// Glyph rasterizer using swash
pub struct GlyphRasterizer {
    scale_context: ScaleContext,
}

impl GlyphRasterizer {
    pub fn new() -> Self {
        Self {
            scale_context: ScaleContext::new(),
        }
    }

    /// Rasterize a glyph with the face scaled to `pixel_height` pixels per em
    pub fn rasterize(
        &mut self,
        font: &FontFace,
        glyph_id: u16,
        pixel_height: f32,
    ) -> Result<RasterizedGlyph> {
        let swash_font = swash::FontRef::from_index(font.data(), font.face_index() as usize)
            .ok_or(TextError::InvalidFontData)?;

        let mut scaler = self
            .scale_context
            .builder(swash_font)
            .size(pixel_height)
            .build();

        let units_per_em = swash_font.metrics(&[]).units_per_em as f32;
        let advance =
            swash_font.glyph_metrics(&[]).advance_width(glyph_id) * pixel_height / units_per_em;

        let mut render = Render::new(&[
            Source::ColorOutline(0),
            Source::ColorBitmap(StrikeWith::BestFit),
            Source::Outline,
        ]);
        render.format(Format::Alpha);

        // Whitespace renders nothing but still advances
        let glyph = match render.render(&mut scaler, glyph_id) {
            Some(img) => RasterizedGlyph {
                bitmap: img.data,
                width: img.placement.width,
                height: img.placement.height,
                bearing_x: img.placement.left,
                bearing_y: img.placement.top,
                advance: advance.round(),
            },
            None => RasterizedGlyph {
                advance: advance.round(),
                ..Default::default()
            },
        };
        Ok(glyph)
    }
}

impl Default for GlyphRasterizer {
    fn default() -> Self {
        Self::new()
    }
}
