//! Per-font glyph atlas
//!
//! Every loaded font packs its printable-ASCII bitmaps into one single-channel
//! texture. Packing uses shelves: glyphs go left to right along the lowest
//! shelf tall enough to hold them, and a new shelf opens below the last one
//! when none fits.

use crate::{Result, TextError};

/// Region in the atlas texture
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AtlasRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl AtlasRegion {
    /// UV coordinates `[u_min, v_min, u_max, v_max]` for the given atlas size
    pub fn uv_bounds(&self, atlas_width: u32, atlas_height: u32) -> [f32; 4] {
        let u_min = self.x as f32 / atlas_width as f32;
        let v_min = self.y as f32 / atlas_height as f32;
        let u_max = (self.x + self.width) as f32 / atlas_width as f32;
        let v_max = (self.y + self.height) as f32 / atlas_height as f32;
        [u_min, v_min, u_max, v_max]
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[derive(Debug)]
struct Shelf {
    y: u32,
    height: u32,
    /// Next free x on this shelf
    x: u32,
}

/// Single-channel glyph atlas
pub struct GlyphAtlas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
    shelves: Vec<Shelf>,
    /// Gap between glyphs, keeps linear filtering from bleeding
    padding: u32,
    /// Modified since the last GPU upload
    dirty: bool,
}

impl GlyphAtlas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; (width * height) as usize],
            shelves: Vec::new(),
            padding: 2,
            dirty: true,
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark atlas as clean (after GPU upload)
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    fn allocate(&mut self, width: u32, height: u32) -> Result<AtlasRegion> {
        let padded_width = width + self.padding;
        let padded_height = height + self.padding;

        if padded_width > self.width {
            return Err(TextError::AtlasFull);
        }

        let atlas_width = self.width;
        let best = self
            .shelves
            .iter_mut()
            .filter(|s| s.height >= padded_height && s.x + padded_width <= atlas_width)
            .min_by_key(|s| s.y);

        if let Some(shelf) = best {
            let region = AtlasRegion {
                x: shelf.x,
                y: shelf.y,
                width,
                height,
            };
            shelf.x += padded_width;
            return Ok(region);
        }

        let new_y = self.shelves.last().map(|s| s.y + s.height).unwrap_or(0);
        if new_y + padded_height > self.height {
            return Err(TextError::AtlasFull);
        }

        self.shelves.push(Shelf {
            y: new_y,
            height: padded_height,
            x: padded_width,
        });

        Ok(AtlasRegion {
            x: 0,
            y: new_y,
            width,
            height,
        })
    }

    /// Copy a `width * height` coverage bitmap into the atlas
    ///
    /// Empty glyphs (whitespace) get an empty region and take no space.
    pub fn insert(&mut self, width: u32, height: u32, bitmap: &[u8]) -> Result<AtlasRegion> {
        if width == 0 || height == 0 {
            return Ok(AtlasRegion::default());
        }

        let region = self.allocate(width, height)?;

        for row in 0..height {
            let src = (row * width) as usize;
            let dst = ((region.y + row) * self.width + region.x) as usize;
            let len = width as usize;

            if src + len <= bitmap.len() && dst + len <= self.pixels.len() {
                self.pixels[dst..dst + len].copy_from_slice(&bitmap[src..src + len]);
            }
        }

        self.dirty = true;
        Ok(region)
    }

    /// Fraction of rows taken by shelves
    pub fn utilization(&self) -> f32 {
        let used_height = self.shelves.last().map(|s| s.y + s.height).unwrap_or(0);
        used_height as f32 / self.height as f32
    }
}

impl Default for GlyphAtlas {
    fn default() -> Self {
        Self::new(512, 512)
    }
}

impl std::fmt::Debug for GlyphAtlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlyphAtlas")
            .field("dimensions", &(self.width, self.height))
            .field("shelves", &self.shelves.len())
            .field(
                "utilization",
                &format!("{:.1}%", self.utilization() * 100.0),
            )
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyphs_share_a_shelf() {
        let mut atlas = GlyphAtlas::new(64, 64);
        let a = atlas.insert(10, 12, &[255; 120]).unwrap();
        let b = atlas.insert(8, 10, &[128; 80]).unwrap();

        assert_eq!(a, AtlasRegion { x: 0, y: 0, width: 10, height: 12 });
        assert_eq!(b, AtlasRegion { x: 12, y: 0, width: 8, height: 10 });
        assert_eq!(atlas.pixels()[0], 255);
        assert_eq!(atlas.pixels()[12], 128);
    }

    #[test]
    fn test_taller_glyph_opens_new_shelf() {
        let mut atlas = GlyphAtlas::new(64, 64);
        atlas.insert(10, 10, &[1; 100]).unwrap();
        let tall = atlas.insert(10, 20, &[1; 200]).unwrap();
        assert_eq!((tall.x, tall.y), (0, 12));
    }

    #[test]
    fn test_full_atlas_reports_error() {
        let mut atlas = GlyphAtlas::new(16, 16);
        atlas.insert(14, 14, &[1; 196]).unwrap();
        assert!(matches!(atlas.insert(4, 4, &[1; 16]), Err(TextError::AtlasFull)));
        assert!(matches!(atlas.insert(40, 1, &[1; 40]), Err(TextError::AtlasFull)));
    }

    #[test]
    fn test_whitespace_takes_no_space() {
        let mut atlas = GlyphAtlas::new(16, 16);
        let region = atlas.insert(0, 0, &[]).unwrap();
        assert!(region.is_empty());
        assert_eq!(atlas.utilization(), 0.0);
    }

    #[test]
    fn test_uv_bounds() {
        let region = AtlasRegion { x: 64, y: 128, width: 64, height: 32 };
        assert_eq!(region.uv_bounds(256, 256), [0.25, 0.5, 0.5, 0.625]);
    }
}
