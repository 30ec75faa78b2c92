/// Scene configuration loaded from TOML
use crate::error::{Error, Result};
use crate::presets::{Preset, SpokeParams};
use crate::tree::AttachmentPolicy;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::path::Path;

/// Top-level scene settings. Every field has a default, so an empty file
/// yields the standard stage with a three-spoke tree growing from its center:
///
/// ```toml
/// [tree]
/// preset = "combinator"
/// policy = "even-spacing"
/// growth = [0.0, 6.0, 0.0]
///
/// [stage]
/// enabled = true
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub tree: TreeConfig,
    pub stage: StageConfig,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    pub preset: Preset,
    pub policy: AttachmentPolicy,
    pub origin: [f32; 3],
    pub growth: [f32; 3],
    pub spokes: SpokeParams,
}

impl TreeConfig {
    pub fn origin(&self) -> Point3<f32> {
        Point3::from(self.origin)
    }

    pub fn growth(&self) -> Vector3<f32> {
        Vector3::from(self.growth)
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            preset: Preset::default(),
            policy: AttachmentPolicy::default(),
            origin: [0.0, 0.0, 0.0],
            growth: [0.0, 5.0, 0.0],
            spokes: SpokeParams::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StageConfig {
    pub enabled: bool,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    pub diameter: f32,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            width: 10.0,
            depth: 10.0,
            height: 10.0,
            diameter: 0.2,
        }
    }
}

/// Terminal viewer settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub fps: u32,
    /// Continuous spin around y, radians per frame
    pub spin: f32,
    pub distance: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            fps: 30,
            spin: 0.015,
            distance: 30.0,
        }
    }
}

impl SceneConfig {
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded scene config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SceneConfig::from_toml_str("").unwrap();
        assert_eq!(config.tree.preset, Preset::Spokes);
        assert_eq!(config.tree.policy, AttachmentPolicy::EvenSpacing);
        assert_eq!(config.tree.growth(), Vector3::new(0.0, 5.0, 0.0));
        assert!(config.stage.enabled);
        assert_eq!(config.view.fps, 30);
    }

    #[test]
    fn test_partial_config() {
        let config = SceneConfig::from_toml_str(
            r#"
            [tree]
            preset = "combinator"
            policy = "fixed-height"
            origin = [1.0, 0.0, -1.0]

            [tree.spokes]
            count = 5

            [stage]
            enabled = false
            "#,
        )
        .unwrap();

        assert_eq!(config.tree.preset, Preset::Combinator);
        assert_eq!(config.tree.policy, AttachmentPolicy::FixedHeight);
        assert_eq!(config.tree.origin(), Point3::new(1.0, 0.0, -1.0));
        assert_eq!(config.tree.spokes.count, 5);
        assert_eq!(config.tree.spokes.depth, 3);
        assert!(!config.stage.enabled);
        assert_eq!(config.stage.width, 10.0);
    }

    #[test]
    fn test_bundled_scene_parses() {
        let config = SceneConfig::from_toml_str(include_str!("../../scenes/radial.toml")).unwrap();
        assert_eq!(config.tree.spokes.count, 5);
        assert_eq!(config.view.distance, 32.0);
    }

    #[test]
    fn test_bad_preset_is_rejected() {
        let err = SceneConfig::from_toml_str("[tree]\npreset = \"willow\"").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = SceneConfig::load("/nonexistent/twig.toml").unwrap_err();
        assert!(matches!(err, Error::ConfigIo { .. }));
    }
}
