//! Scene state
//!
//! Everything the application mutates between frames: the font store, the
//! quad tree and the text boxes. The scene is plain CPU data; turning it into
//! GPU instances is [`Scene::build_batch`].

use slotmap::{new_key_type, SlotMap};

use roundel_core::{QuadTree, Vec2};
use roundel_gpu::FrameBatch;
use roundel_text::{FontId, FontStore, Text};

use crate::error::Result;
use crate::resources::ResourcePaths;

new_key_type! {
    /// Handle to a text box in a [`Scene`]
    pub struct TextId;
}

/// Fonts, quads and text boxes of one window
pub struct Scene {
    fonts: FontStore,
    quads: QuadTree,
    texts: SlotMap<TextId, Text>,
    exit_requested: bool,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with an initialized font store
    pub fn new() -> Self {
        let mut fonts = FontStore::new();
        fonts.init();
        Self {
            fonts,
            quads: QuadTree::new(),
            texts: SlotMap::with_key(),
            exit_requested: false,
        }
    }

    pub fn fonts(&self) -> &FontStore {
        &self.fonts
    }

    pub fn fonts_mut(&mut self) -> &mut FontStore {
        &mut self.fonts
    }

    /// Load `resources/fonts/<name>` rasterized at `quality` pixels
    pub fn load_font(&mut self, paths: &ResourcePaths, name: &str, quality: u32) -> Result<FontId> {
        Ok(self.fonts.load(paths.font(name), quality)?)
    }

    pub fn quads(&self) -> &QuadTree {
        &self.quads
    }

    pub fn quads_mut(&mut self) -> &mut QuadTree {
        &mut self.quads
    }

    pub fn add_text(&mut self, text: Text) -> TextId {
        self.texts.insert(text)
    }

    pub fn text(&self, id: TextId) -> Option<&Text> {
        self.texts.get(id)
    }

    pub fn text_mut(&mut self, id: TextId) -> Option<&mut Text> {
        self.texts.get_mut(id)
    }

    pub fn remove_text(&mut self, id: TextId) -> Option<Text> {
        self.texts.remove(id)
    }

    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// Ask the host loop to close the window after the current event
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Fill `batch` with this frame's quads and glyphs
    ///
    /// Quads come first in tree order, text is drawn above them. Text boxes
    /// whose font is gone from the store are skipped.
    pub fn build_batch(&mut self, viewport: Vec2, batch: &mut FrameBatch) {
        batch.clear();
        batch.extend_quads(&self.quads.draw_list(viewport));

        for text in self.texts.values_mut() {
            let font = text.font();
            let metrics = match self.fonts.metrics(font) {
                Ok(metrics) => metrics,
                Err(e) => {
                    tracing::warn!("Skipping text {:?}: {}", text.text(), e);
                    continue;
                }
            };
            let glyphs = text.glyphs(metrics);
            batch.push_text(font, &glyphs, text.color(), metrics.atlas().dimensions());
        }
    }

    /// Drop every font, quad and text box
    pub fn clear(&mut self) {
        self.texts.clear();
        self.quads.clear();
        self.fonts.terminate();
    }
}
