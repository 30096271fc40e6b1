//! Resource lookup
//!
//! Every resource lives under `<root>/resources/`: fonts in `fonts/`, WGSL
//! overrides in `shaders/`. There is no other search path.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use roundel_gpu::ShaderSources;

use crate::error::{AppError, Result};

/// File name of the rounded quad shader override
pub const QUAD_SHADER_FILE: &str = "quad.wgsl";
/// File name of the text shader override
pub const TEXT_SHADER_FILE: &str = "text.wgsl";

/// Paths of a project's resource directories
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePaths {
    root: PathBuf,
}

impl Default for ResourcePaths {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ResourcePaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Project root
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.root.join("resources")
    }

    pub fn fonts_dir(&self) -> PathBuf {
        self.resources_dir().join("fonts")
    }

    pub fn shaders_dir(&self) -> PathBuf {
        self.resources_dir().join("shaders")
    }

    /// Path of a font file, e.g. `font("Roboto.ttf")`
    pub fn font(&self, name: &str) -> PathBuf {
        self.fonts_dir().join(name)
    }

    /// Path of a shader file
    pub fn shader(&self, name: &str) -> PathBuf {
        self.shaders_dir().join(name)
    }

    /// Read a shader override, `None` if the file does not exist
    pub fn load_shader(&self, name: &str) -> Result<Option<String>> {
        let path = self.shader(name);
        match fs::read_to_string(&path) {
            Ok(source) => {
                tracing::info!("Using shader override {}", path.display());
                Ok(Some(source))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(AppError::Resource { path, source }),
        }
    }

    /// Built-in WGSL with any overrides found in the shaders directory applied
    pub fn shader_sources(&self) -> Result<ShaderSources> {
        let mut sources = ShaderSources::default();
        if let Some(quad) = self.load_shader(QUAD_SHADER_FILE)? {
            sources.quad = Cow::Owned(quad);
        }
        if let Some(text) = self.load_shader(TEXT_SHADER_FILE)? {
            sources.text = Cow::Owned(text);
        }
        Ok(sources)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roundel_gpu::{QUAD_SHADER, TEXT_SHADER};

    #[test]
    fn test_paths_join_resource_dirs() {
        let paths = ResourcePaths::new("/project");
        assert_eq!(
            paths.font("Mono.ttf"),
            Path::new("/project/resources/fonts/Mono.ttf")
        );
        assert_eq!(
            paths.shader(QUAD_SHADER_FILE),
            Path::new("/project/resources/shaders/quad.wgsl")
        );
    }

    #[test]
    fn test_missing_overrides_fall_back_to_builtin() {
        let paths = ResourcePaths::new("/definitely/not/a/project");
        assert_eq!(paths.load_shader(QUAD_SHADER_FILE).unwrap(), None);

        let sources = paths.shader_sources().unwrap();
        assert_eq!(sources.quad, QUAD_SHADER);
        assert_eq!(sources.text, TEXT_SHADER);
    }

    #[test]
    fn test_override_replaces_builtin() {
        let root = std::env::temp_dir().join(format!("roundel-resources-{}", std::process::id()));
        let shaders = ResourcePaths::new(&root).shaders_dir();
        fs::create_dir_all(&shaders).unwrap();
        fs::write(shaders.join(TEXT_SHADER_FILE), "// custom").unwrap();

        let sources = ResourcePaths::new(&root).shader_sources().unwrap();
        assert_eq!(sources.text, "// custom");
        assert_eq!(sources.quad, QUAD_SHADER);

        fs::remove_dir_all(&root).unwrap();
    }
}
