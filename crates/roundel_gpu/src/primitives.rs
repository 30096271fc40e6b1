//! GPU instance data
//!
//! Structures here mirror the WGSL structs in [`crate::shaders`]. All are
//! `#[repr(C)]` and `bytemuck::Pod` so they can be copied straight into
//! storage and uniform buffers.

use std::ops::Range;

use roundel_core::{Color, Mat4, QuadDraw, Vec2};
use roundel_text::{FontId, PositionedGlyph};

/// A rounded quad instance (matches shader `Quad` struct)
///
/// Memory layout:
/// - model: `mat4x4<f32>`        (64 bytes)
/// - color: `vec4<f32>`          (16 bytes)
/// - radii_top: `vec4<f32>`      (16 bytes) - (TL.x, TL.y, TR.x, TR.y)
/// - radii_bottom: `vec4<f32>`   (16 bytes) - (BL.x, BL.y, BR.x, BR.y)
/// - inv_top: `vec4<f32>`        (16 bytes)
/// - inv_bottom: `vec4<f32>`     (16 bytes)
/// - active: `vec4<u32>`         (16 bytes) - (TL, TR, BL, BR)
/// Total: 160 bytes
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuQuad {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub radii_top: [f32; 4],
    pub radii_bottom: [f32; 4],
    pub inv_top: [f32; 4],
    pub inv_bottom: [f32; 4],
    pub active: [u32; 4],
}

impl Default for GpuQuad {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY.cols,
            color: Color::WHITE.to_array(),
            radii_top: [0.0; 4],
            radii_bottom: [0.0; 4],
            inv_top: [0.0; 4],
            inv_bottom: [0.0; 4],
            active: [0; 4],
        }
    }
}

fn pair(a: Vec2, b: Vec2) -> [f32; 4] {
    [a.x, a.y, b.x, b.y]
}

impl GpuQuad {
    /// Pack a resolved quad
    pub fn from_draw(draw: &QuadDraw) -> Self {
        let [tl, tr, bl, br] = draw.corners;
        Self {
            model: draw.model.cols,
            color: draw.color.to_array(),
            radii_top: pair(tl.radius, tr.radius),
            radii_bottom: pair(bl.radius, br.radius),
            inv_top: pair(tl.inv_radius_sq, tr.inv_radius_sq),
            inv_bottom: pair(bl.inv_radius_sq, br.inv_radius_sq),
            active: [
                tl.active as u32,
                tr.active as u32,
                bl.active as u32,
                br.active as u32,
            ],
        }
    }
}

/// A glyph instance (matches shader `GlyphInstance` struct)
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GpuGlyph {
    /// Position and size (x, y, width, height)
    pub bounds: [f32; 4],
    /// UV coordinates in atlas (u_min, v_min, u_max, v_max)
    pub uv_bounds: [f32; 4],
    /// Text color (RGBA)
    pub color: [f32; 4],
}

impl Default for GpuGlyph {
    fn default() -> Self {
        Self {
            bounds: [0.0; 4],
            uv_bounds: [0.0, 0.0, 1.0, 1.0],
            color: [0.0, 0.0, 0.0, 1.0],
        }
    }
}

impl GpuGlyph {
    pub fn from_positioned(glyph: &PositionedGlyph, color: Color, atlas_size: (u32, u32)) -> Self {
        Self {
            bounds: [glyph.position.x, glyph.position.y, glyph.size.x, glyph.size.y],
            uv_bounds: glyph.region.uv_bounds(atlas_size.0, atlas_size.1),
            color: color.to_array(),
        }
    }
}

/// Uniform buffer shared by both pipelines
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub projection: [[f32; 4]; 4],
    pub viewport_size: [f32; 2],
    pub _padding: [f32; 2],
}

impl Uniforms {
    /// Pixel-space projection with the origin at the top-left corner
    pub fn for_viewport(width: f32, height: f32) -> Self {
        Self {
            projection: Mat4::orthographic(0.0, width, height, 0.0, 0.0, 1.0).cols,
            viewport_size: [width, height],
            _padding: [0.0; 2],
        }
    }
}

/// Consecutive glyph instances sharing one font atlas
#[derive(Clone, Debug, PartialEq)]
pub struct GlyphRun {
    pub font: FontId,
    pub instances: Range<u32>,
}

/// Everything drawn in one frame, in draw order
#[derive(Clone, Debug, Default)]
pub struct FrameBatch {
    pub quads: Vec<GpuQuad>,
    pub glyphs: Vec<GpuGlyph>,
    pub runs: Vec<GlyphRun>,
}

impl FrameBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.quads.clear();
        self.glyphs.clear();
        self.runs.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty() && self.glyphs.is_empty()
    }

    pub fn push_quad(&mut self, draw: &QuadDraw) {
        self.quads.push(GpuQuad::from_draw(draw));
    }

    pub fn extend_quads<'a>(&mut self, draws: impl IntoIterator<Item = &'a QuadDraw>) {
        self.quads.extend(draws.into_iter().map(GpuQuad::from_draw));
    }

    /// Append glyphs of one text box; runs of the same font are merged
    pub fn push_text(
        &mut self,
        font: FontId,
        glyphs: &[PositionedGlyph],
        color: Color,
        atlas_size: (u32, u32),
    ) {
        if glyphs.is_empty() {
            return;
        }

        let start = self.glyphs.len() as u32;
        self.glyphs.extend(
            glyphs
                .iter()
                .map(|g| GpuGlyph::from_positioned(g, color, atlas_size)),
        );
        let end = self.glyphs.len() as u32;

        match self.runs.last_mut() {
            Some(run) if run.font == font && run.instances.end == start => {
                run.instances.end = end;
            }
            _ => self.runs.push(GlyphRun {
                font,
                instances: start..end,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundel_core::{BorderRadius, Dim2, Quad, QuadTree, Radius};
    use roundel_text::AtlasRegion;
    use slotmap::KeyData;

    fn font(n: u64) -> FontId {
        FontId::from(KeyData::from_ffi(n))
    }

    fn glyph(x: f32) -> PositionedGlyph {
        PositionedGlyph {
            ch: 'a',
            position: Vec2::new(x, 10.0),
            size: Vec2::new(8.0, 12.0),
            region: AtlasRegion { x: 16, y: 0, width: 8, height: 12 },
        }
    }

    #[test]
    fn test_layout_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<GpuQuad>(), 160);
        assert_eq!(std::mem::size_of::<GpuGlyph>(), 48);
        assert_eq!(std::mem::size_of::<Uniforms>(), 80);
    }

    #[test]
    fn test_from_draw_packs_corners() {
        let mut tree = QuadTree::new();
        tree.insert(
            Quad::new(Dim2::from_pixels(100.0, 100.0), Dim2::from_pixels(50.0, 20.0))
                .with_color(Color::RED)
                .with_border_radius(
                    BorderRadius::zero()
                        .with_top_left(Radius::circular_pixels(10.0))
                        .with_bottom_right(Radius::elliptical_pixels(25.0, 5.0)),
                ),
        );
        let draws = tree.draw_list(Vec2::new(800.0, 600.0));
        let gpu = GpuQuad::from_draw(&draws[0]);

        assert_eq!(gpu.color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(gpu.active, [1, 0, 0, 1]);
        // 10px on a (50, 20) half-extent
        assert!((gpu.radii_top[0] - 0.2).abs() < 1e-6);
        assert!((gpu.radii_top[1] - 0.5).abs() < 1e-6);
        assert!((gpu.inv_top[0] - 25.0).abs() < 1e-3);
        assert!((gpu.inv_top[1] - 4.0).abs() < 1e-3);
        assert_eq!(gpu.inv_top[2..], [0.0, 0.0]);
        assert!((gpu.radii_bottom[2] - 0.5).abs() < 1e-6);
        assert!((gpu.radii_bottom[3] - 0.25).abs() < 1e-6);
        assert_eq!(gpu.model, draws[0].model.cols);
    }

    #[test]
    fn test_glyph_uvs_normalized_by_atlas() {
        let g = GpuGlyph::from_positioned(&glyph(4.0), Color::WHITE, (64, 48));
        assert_eq!(g.bounds, [4.0, 10.0, 8.0, 12.0]);
        assert_eq!(g.uv_bounds, [0.25, 0.0, 0.375, 0.25]);
    }

    #[test]
    fn test_runs_merge_per_font() {
        let mut batch = FrameBatch::new();
        batch.push_text(font(1), &[glyph(0.0), glyph(10.0)], Color::WHITE, (64, 64));
        batch.push_text(font(1), &[glyph(20.0)], Color::BLACK, (64, 64));
        batch.push_text(font(2), &[glyph(0.0)], Color::WHITE, (64, 64));
        batch.push_text(font(1), &[], Color::WHITE, (64, 64));

        assert_eq!(batch.glyphs.len(), 4);
        assert_eq!(
            batch.runs,
            vec![
                GlyphRun { font: font(1), instances: 0..3 },
                GlyphRun { font: font(2), instances: 3..4 },
            ]
        );
        // Per-glyph color survives the merge
        assert_eq!(batch.glyphs[2].color, Color::BLACK.to_array());

        batch.clear();
        assert!(batch.is_empty());
        assert!(batch.runs.is_empty());
    }
}
