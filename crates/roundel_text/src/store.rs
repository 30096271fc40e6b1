//! Font store
//!
//! Owns every loaded font and its glyph atlas. Fonts are addressed by
//! [`FontId`] handles, which are cheap to copy and share.
//!
//! Loading is cached by key (the file path, or a caller-chosen name for
//! in-memory data): the first load of a key rasterizes the glyphs, later loads
//! of the same key return the same handle, whatever quality they ask for.

use std::path::Path;

use rustc_hash::FxHashMap;
use slotmap::{new_key_type, SlotMap};
use tracing::{debug, info, warn};

use roundel_core::Vec2;

use crate::atlas::GlyphAtlas;
use crate::font::FontFace;
use crate::metrics::{char_index, extents, printable_chars, Character, GlyphMetrics, CHARS_LEN};
use crate::rasterizer::{GlyphRasterizer, RasterizedGlyph};
use crate::{Result, TextError};

new_key_type! {
    /// Handle to a font in a [`FontStore`]
    pub struct FontId;
}

/// Glyph pixel height used when none is configured
pub const DEFAULT_FONT_QUALITY: u32 = 48;

/// Atlas sizes tried in turn until all glyphs fit
const ATLAS_SIZES: [u32; 5] = [256, 512, 1024, 2048, 4096];

/// A font rasterized at a fixed pixel height
pub struct LoadedFont {
    key: String,
    loaded_height: f32,
    characters: Vec<Character>,
    max_char_height: f32,
    max_char_underflow: f32,
    atlas: GlyphAtlas,
}

impl LoadedFont {
    /// Build from an already packed glyph table
    ///
    /// `characters` is indexed like [`char_index`]; missing entries are empty.
    pub fn from_characters(
        key: impl Into<String>,
        loaded_height: f32,
        mut characters: Vec<Character>,
        atlas: GlyphAtlas,
    ) -> Self {
        characters.resize(CHARS_LEN, Character::default());
        let (max_char_height, max_char_underflow) = extents(&characters);
        Self {
            key: key.into(),
            loaded_height,
            characters,
            max_char_height,
            max_char_underflow,
            atlas,
        }
    }

    /// Rasterize the printable ASCII range of `face` at `quality` pixels
    pub fn rasterize(key: impl Into<String>, face: &FontFace, quality: u32) -> Result<Self> {
        let key = key.into();
        let mut rasterizer = GlyphRasterizer::new();
        let pixel_height = quality as f32;

        let glyphs: Vec<RasterizedGlyph> = printable_chars()
            .map(|c| {
                let glyph_id = face.glyph_id(c).unwrap_or(0);
                rasterizer
                    .rasterize(face, glyph_id, pixel_height)
                    .unwrap_or_else(|e| {
                        warn!("Failed to rasterize {:?} from {}: {}", c, key, e);
                        RasterizedGlyph::default()
                    })
            })
            .collect();

        let (atlas, characters) = pack(&glyphs)?;
        debug!(
            "Rasterized {} at {}px into {:?}",
            key, quality, atlas
        );
        Ok(Self::from_characters(key, pixel_height, characters, atlas))
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn atlas(&self) -> &GlyphAtlas {
        &self.atlas
    }

    pub fn atlas_mut(&mut self) -> &mut GlyphAtlas {
        &mut self.atlas
    }
}

fn pack(glyphs: &[RasterizedGlyph]) -> Result<(GlyphAtlas, Vec<Character>)> {
    'sizes: for size in ATLAS_SIZES {
        let mut atlas = GlyphAtlas::new(size, size);
        let mut characters = Vec::with_capacity(glyphs.len());

        for glyph in glyphs {
            let region = match atlas.insert(glyph.width, glyph.height, &glyph.bitmap) {
                Ok(region) => region,
                Err(TextError::AtlasFull) => continue 'sizes,
                Err(e) => return Err(e),
            };
            characters.push(Character {
                region,
                size: Vec2::new(glyph.width as f32, glyph.height as f32),
                bearing: Vec2::new(glyph.bearing_x as f32, glyph.bearing_y as f32),
                advance: glyph.advance,
            });
        }

        return Ok((atlas, characters));
    }
    Err(TextError::AtlasFull)
}

impl GlyphMetrics for LoadedFont {
    fn glyph(&self, c: char) -> Character {
        self.characters[char_index(c)]
    }

    fn loaded_height(&self) -> f32 {
        self.loaded_height
    }

    fn max_char_height(&self) -> f32 {
        self.max_char_height
    }

    fn max_char_underflow(&self) -> f32 {
        self.max_char_underflow
    }
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("key", &self.key)
            .field("loaded_height", &self.loaded_height)
            .field("atlas", &self.atlas)
            .finish()
    }
}

/// Owner of every loaded font
#[derive(Default)]
pub struct FontStore {
    initialized: bool,
    fonts: SlotMap<FontId, LoadedFont>,
    by_key: FxHashMap<String, FontId>,
}

impl FontStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare the store for loading; calling it again is harmless
    pub fn init(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        info!("Font store initialized");
    }

    /// Drop every font and its atlas
    ///
    /// Does nothing if the store was never initialized. Handles issued before
    /// stop resolving.
    pub fn terminate(&mut self) {
        if !self.initialized {
            return;
        }
        for (_, font) in self.fonts.drain() {
            debug!("Freeing font {}", font.key);
        }
        self.by_key.clear();
        self.initialized = false;
        info!("Font store terminated");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Load a font file, rasterized at `quality` pixels
    pub fn load(&mut self, path: impl AsRef<Path>, quality: u32) -> Result<FontId> {
        let path = path.as_ref();
        let key = path.to_string_lossy().into_owned();
        if let Some(id) = self.cached(&key)? {
            return Ok(id);
        }

        debug!("Font at {} not loaded yet, loading resources", key);
        let face = FontFace::from_file(path)?;
        let font = LoadedFont::rasterize(key, &face, quality)?;
        self.insert(font)
    }

    /// Load a font from memory under `key`
    pub fn load_data(&mut self, key: &str, data: Vec<u8>, quality: u32) -> Result<FontId> {
        if let Some(id) = self.cached(key)? {
            return Ok(id);
        }

        debug!("Font {} not loaded yet, parsing {} bytes", key, data.len());
        let face = FontFace::from_data(data)?;
        let font = LoadedFont::rasterize(key, &face, quality)?;
        self.insert(font)
    }

    /// Add an already rasterized font; an existing font with the same key wins
    pub fn insert(&mut self, font: LoadedFont) -> Result<FontId> {
        if let Some(id) = self.cached(&font.key)? {
            return Ok(id);
        }
        let key = font.key.clone();
        let id = self.fonts.insert(font);
        self.by_key.insert(key.clone(), id);
        info!("Loaded font {}", key);
        Ok(id)
    }

    fn cached(&self, key: &str) -> Result<Option<FontId>> {
        if !self.initialized {
            return Err(TextError::NotInitialized);
        }
        let id = self.by_key.get(key).copied();
        if id.is_some() {
            debug!("Font {} already loaded, using same resources", key);
        }
        Ok(id)
    }

    /// Handle of an already loaded font
    pub fn find(&self, key: &str) -> Option<FontId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: FontId) -> Option<&LoadedFont> {
        self.fonts.get(id)
    }

    pub fn get_mut(&mut self, id: FontId) -> Option<&mut LoadedFont> {
        self.fonts.get_mut(id)
    }

    /// Metrics of a font, failing for stale handles
    pub fn metrics(&self, id: FontId) -> Result<&LoadedFont> {
        self.fonts.get(id).ok_or(TextError::UnknownFont)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FontId, &LoadedFont)> {
        self.fonts.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (FontId, &mut LoadedFont)> {
        self.fonts.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

impl std::fmt::Debug for FontStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontStore")
            .field("initialized", &self.initialized)
            .field("fonts", &self.fonts.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic(key: &str, loaded_height: f32) -> LoadedFont {
        let characters = printable_chars()
            .map(|c| Character {
                size: Vec2::new(6.0, if c == 'g' { 12.0 } else { 9.0 }),
                bearing: Vec2::new(0.0, 9.0),
                advance: 7.0,
                ..Default::default()
            })
            .collect();
        LoadedFont::from_characters(key, loaded_height, characters, GlyphAtlas::new(16, 16))
    }

    #[test]
    fn test_init_is_idempotent() {
        let mut store = FontStore::new();
        store.init();
        let id = store.insert(synthetic("a", 16.0)).unwrap();
        store.init();
        assert!(store.is_initialized());
        assert_eq!(store.len(), 1);
        assert!(store.get(id).is_some());
    }

    #[test]
    fn test_terminate_without_init_is_noop() {
        let mut store = FontStore::new();
        store.terminate();
        assert!(!store.is_initialized());
        assert!(store.is_empty());
    }

    #[test]
    fn test_loading_requires_init() {
        let mut store = FontStore::new();
        assert!(matches!(
            store.insert(synthetic("a", 16.0)),
            Err(TextError::NotInitialized)
        ));
        assert!(matches!(
            store.load("resources/fonts/missing.ttf", DEFAULT_FONT_QUALITY),
            Err(TextError::NotInitialized)
        ));
    }

    #[test]
    fn test_first_loader_wins() {
        let mut store = FontStore::new();
        store.init();
        let first = store.insert(synthetic("mono", 16.0)).unwrap();
        let second = store.insert(synthetic("mono", 64.0)).unwrap();
        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
        assert_eq!(store.metrics(first).unwrap().loaded_height(), 16.0);
        assert_eq!(store.find("mono"), Some(first));
    }

    #[test]
    fn test_terminate_invalidates_handles() {
        let mut store = FontStore::new();
        store.init();
        let id = store.insert(synthetic("mono", 16.0)).unwrap();
        store.terminate();
        assert!(matches!(store.metrics(id), Err(TextError::UnknownFont)));
        assert_eq!(store.find("mono"), None);

        // Reinitializing starts from an empty store
        store.init();
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_file_fails_to_load() {
        let mut store = FontStore::new();
        store.init();
        let err = store.load("/no/such/font.ttf", DEFAULT_FONT_QUALITY).unwrap_err();
        assert!(matches!(err, TextError::FontLoadError(_)));
        assert!(store.is_empty());
    }

    #[test]
    fn test_loaded_font_metrics() {
        let font = synthetic("mono", 18.0);
        assert_eq!(font.max_char_height(), 9.0);
        assert_eq!(font.max_char_underflow(), 3.0);
        assert_eq!(font.glyph('\u{7f}'), font.glyph(' '));
        assert_eq!(font.text_width("abc", 36.0), 42.0);
    }
}
