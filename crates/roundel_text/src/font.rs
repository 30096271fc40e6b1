//! Font face parsing
//!
//! Parses TTF/OTF data via ttf-parser and keeps the raw bytes alive for the
//! rasterizer.

use std::path::Path;
use std::sync::Arc;

use crate::{Result, TextError};

/// Face-wide metrics in font units
#[derive(Debug, Clone, Copy)]
pub struct FontMetrics {
    /// Units per em (typically 1000 or 2048)
    pub units_per_em: u16,
    /// Distance from baseline to the top of the tallest glyph
    pub ascender: i16,
    /// Distance from baseline to the bottom (typically negative)
    pub descender: i16,
    pub line_gap: i16,
}

impl FontMetrics {
    /// Scale a value from font units to pixels
    pub fn scale(&self, value: i16, pixel_height: f32) -> f32 {
        value as f32 * pixel_height / self.units_per_em as f32
    }
}

/// A parsed font face
pub struct FontFace {
    /// Raw font data (kept alive for ttf-parser and swash)
    data: Arc<Vec<u8>>,
    /// Face index within the font file (for TTC files)
    face_index: u32,
    metrics: FontMetrics,
    family_name: String,
}

impl FontFace {
    /// Parse a font from raw TTF/OTF data (face index 0)
    pub fn from_data(data: Vec<u8>) -> Result<Self> {
        let data = Arc::new(data);

        let face = ttf_parser::Face::parse(&data, 0)
            .map_err(|e| TextError::FontParseError(format!("{:?}", e)))?;

        let metrics = FontMetrics {
            units_per_em: face.units_per_em(),
            ascender: face.ascender(),
            descender: face.descender(),
            line_gap: face.line_gap(),
        };

        let family_name = face
            .names()
            .into_iter()
            .find(|n| n.name_id == ttf_parser::name_id::FAMILY)
            .and_then(|n| n.to_string())
            .unwrap_or_else(|| "Unknown".to_string());

        Ok(Self {
            data,
            face_index: 0,
            metrics,
            family_name,
        })
    }

    /// Read and parse a font file
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path).map_err(|e| {
            TextError::FontLoadError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_data(data)
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    /// Glyph ID for a character, if the face maps it
    pub fn glyph_id(&self, c: char) -> Option<u16> {
        ttf_parser::Face::parse(&self.data, self.face_index)
            .ok()
            .and_then(|face| face.glyph_index(c))
            .map(|id| id.0)
    }
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace")
            .field("family_name", &self.family_name)
            .field("units_per_em", &self.metrics.units_per_em)
            .finish()
    }
}
