//! Render context
//!
//! Owns the scene together with the GPU renderer that draws it.

use roundel_core::Vec2;
use roundel_gpu::{FrameBatch, GpuRenderer};

use crate::scene::Scene;

/// Scene plus the GPU state needed to draw it
pub struct RenderContext {
    scene: Scene,
    renderer: GpuRenderer,
    batch: FrameBatch,
}

impl RenderContext {
    pub fn new(scene: Scene, renderer: GpuRenderer) -> Self {
        Self {
            scene,
            renderer,
            batch: FrameBatch::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn renderer(&self) -> &GpuRenderer {
        &self.renderer
    }

    pub fn device(&self) -> &wgpu::Device {
        self.renderer.device()
    }

    pub fn texture_format(&self) -> wgpu::TextureFormat {
        self.renderer.texture_format()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.resize(width, height);
    }

    /// Bring the GPU copies of the glyph atlases in line with the font store
    fn sync_atlases(&mut self) {
        let fonts = self.scene.fonts_mut();
        self.renderer.retain_atlases(|id| fonts.get(id).is_some());
        for (id, font) in fonts.iter_mut() {
            self.renderer.upload_atlas(id, font.atlas_mut());
        }
    }

    /// Draw the scene into `target`
    pub fn render(&mut self, target: &wgpu::TextureView) {
        self.sync_atlases();

        let (width, height) = self.renderer.viewport_size();
        let viewport = Vec2::new(width as f32, height as f32);
        self.scene.build_batch(viewport, &mut self.batch);

        self.renderer.render(target, &self.batch);
    }

    /// Release fonts and their textures
    pub fn shutdown(&mut self) {
        self.scene.clear();
        self.renderer.clear_atlases();
        tracing::info!("Render context shut down");
    }
}
