//! Application configuration
//!
//! Loaded from a TOML file such as `roundel.toml`. Every section and field is
//! optional:
//!
//! ```toml
//! [window]
//! title = "Rounded Quads"
//! width = 800
//! height = 600
//!
//! [renderer]
//! sample_count = 4
//! backend = "gl"
//!
//! [resources]
//! root = "."
//!
//! [text]
//! quality = 48
//! default_font = "Roboto-Regular.ttf"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use roundel_core::Color;
use roundel_gpu::{BackendPreference, RendererConfig, ShaderSources};
use roundel_platform::WindowConfig;
use roundel_text::DEFAULT_FONT_QUALITY;

use crate::resources::ResourcePaths;

/// Top-level configuration
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowSection,
    pub renderer: RendererSection,
    pub resources: ResourcesSection,
    pub text: TextSection,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowSection {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub resizable: bool,
    pub vsync: bool,
    /// Close the window when Escape is pressed
    pub exit_on_escape: bool,
}

impl Default for WindowSection {
    fn default() -> Self {
        let window = WindowConfig::default();
        Self {
            title: window.title,
            width: window.width,
            height: window.height,
            resizable: window.resizable,
            vsync: window.vsync,
            exit_on_escape: true,
        }
    }
}

/// Which wgpu backends to try
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Primary,
    Gl,
    All,
}

impl From<Backend> for BackendPreference {
    fn from(backend: Backend) -> Self {
        match backend {
            Backend::Primary => BackendPreference::Primary,
            Backend::Gl => BackendPreference::Gl,
            Backend::All => BackendPreference::All,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RendererSection {
    pub max_quads: usize,
    pub max_glyphs: usize,
    /// MSAA samples: 1, 2, 4 or 8
    pub sample_count: u32,
    pub backend: Backend,
    /// RGBA clear color
    pub clear_color: [f32; 4],
}

impl Default for RendererSection {
    fn default() -> Self {
        let renderer = RendererConfig::default();
        Self {
            max_quads: renderer.max_quads,
            max_glyphs: renderer.max_glyphs,
            sample_count: renderer.sample_count,
            backend: Backend::Primary,
            clear_color: renderer.clear_color.to_array(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ResourcesSection {
    /// Project root containing the `resources/` directory
    pub root: PathBuf,
}

impl Default for ResourcesSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TextSection {
    /// Pixel height glyphs are rasterized at
    pub quality: u32,
    /// Font file under `resources/fonts/` loaded at startup
    pub default_font: Option<String>,
}

impl Default for TextSection {
    fn default() -> Self {
        Self {
            quality: DEFAULT_FONT_QUALITY,
            default_font: None,
        }
    }
}

impl AppConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(content).context("Failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml_str(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Load configuration from a file, using defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    fn validate(&self) -> Result<()> {
        if !matches!(self.renderer.sample_count, 1 | 2 | 4 | 8) {
            anyhow::bail!(
                "renderer.sample_count must be 1, 2, 4 or 8, got {}",
                self.renderer.sample_count
            );
        }
        if self.text.quality == 0 {
            anyhow::bail!("text.quality must be positive");
        }
        if self.window.width == 0 || self.window.height == 0 {
            anyhow::bail!(
                "window size must be positive, got {}x{}",
                self.window.width,
                self.window.height
            );
        }
        Ok(())
    }

    pub fn window_config(&self) -> WindowConfig {
        WindowConfig::new(self.window.title.clone())
            .size(self.window.width, self.window.height)
            .resizable(self.window.resizable)
            .vsync(self.window.vsync)
    }

    pub fn resource_paths(&self) -> ResourcePaths {
        ResourcePaths::new(self.resources.root.clone())
    }

    pub fn renderer_config(&self, shaders: ShaderSources) -> RendererConfig {
        let [r, g, b, a] = self.renderer.clear_color;
        RendererConfig {
            max_quads: self.renderer.max_quads,
            max_glyphs: self.renderer.max_glyphs,
            sample_count: self.renderer.sample_count,
            backend: self.renderer.backend.into(),
            clear_color: Color::rgba(r, g, b, a),
            vsync: self.window.vsync,
            texture_format: None,
            shaders,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(AppConfig::from_toml_str("").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [window]
            title = "Rounded Quads"
            width = 1024

            [renderer]
            backend = "gl"
            sample_count = 4

            [text]
            default_font = "Mono.ttf"
            "#,
        )
        .unwrap();

        assert_eq!(config.window.title, "Rounded Quads");
        assert_eq!(config.window.width, 1024);
        assert_eq!(config.window.height, 600);
        assert!(config.window.exit_on_escape);
        assert_eq!(config.renderer.backend, Backend::Gl);
        assert_eq!(config.text.quality, DEFAULT_FONT_QUALITY);
        assert_eq!(config.text.default_font.as_deref(), Some("Mono.ttf"));

        let renderer = config.renderer_config(ShaderSources::default());
        assert_eq!(renderer.sample_count, 4);
        assert_eq!(renderer.backend, BackendPreference::Gl);

        let window = config.window_config();
        assert_eq!((window.width, window.height), (1024, 600));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(AppConfig::from_toml_str("[renderer]\nsample_count = 3").is_err());
        assert!(AppConfig::from_toml_str("[text]\nquality = 0").is_err());
        assert!(AppConfig::from_toml_str("[window]\nwidth = 0").is_err());
        assert!(AppConfig::from_toml_str("[renderer]\nbackend = \"metal\"").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load_or_default(Path::new("/no/such/roundel.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(AppConfig::load(Path::new("/no/such/roundel.toml")).is_err());
    }
}
