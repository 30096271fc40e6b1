//! Roundel GPU Renderer
//!
//! Instanced rendering of rounded quads and glyph runs using wgpu.
//!
//! # Features
//!
//! - **Rounded quads**: per-corner elliptical radii evaluated in the fragment
//!   shader, anti-aliased with screen-space derivatives
//! - **Text**: one alpha atlas texture per font, glyphs drawn as textured quads
//! - **Shader overrides**: WGSL sources can be replaced at startup

pub mod primitives;
pub mod renderer;
pub mod shaders;

pub use primitives::{FrameBatch, GlyphRun, GpuGlyph, GpuQuad, Uniforms};
pub use renderer::{BackendPreference, GpuRenderer, RendererConfig, RendererError, ShaderSources};
pub use shaders::{QUAD_SHADER, TEXT_SHADER};
