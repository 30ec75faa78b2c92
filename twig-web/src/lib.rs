/// Twig Web - WASM handoff of a generated scene to a browser engine
///
/// The scene is generated once when `WebScene` is constructed. JavaScript
/// reads flat position buffers from it and builds its own line system and
/// stage meshes; nothing here runs per frame.
use twig_core::geometry::flatten_segments;
use twig_core::{AttachmentPolicy, Preset, Scene, SceneConfig};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WebScene {
    scene: Scene,
}

#[wasm_bindgen]
impl WebScene {
    /// Build a scene from a preset name and an attachment policy name
    #[wasm_bindgen(constructor)]
    pub fn new(preset: &str, policy: &str) -> Result<WebScene, JsValue> {
        let mut config = SceneConfig::default();
        config.tree.preset = preset.parse::<Preset>().map_err(to_js)?;
        config.tree.policy = policy.parse::<AttachmentPolicy>().map_err(to_js)?;
        Ok(Self::from_config(&config))
    }

    /// Build a scene from a TOML config string
    #[wasm_bindgen(js_name = fromToml)]
    pub fn from_toml(source: &str) -> Result<WebScene, JsValue> {
        let config = SceneConfig::from_toml_str(source).map_err(to_js)?;
        Ok(Self::from_config(&config))
    }

    #[wasm_bindgen(js_name = segmentCount)]
    pub fn segment_count(&self) -> usize {
        self.scene.tree_segments().len()
    }

    /// Tree segments as `[x0, y0, z0, x1, y1, z1, ...]`
    #[wasm_bindgen(js_name = linePositions)]
    pub fn line_positions(&self) -> Vec<f32> {
        self.scene.line_positions()
    }

    /// Stage pillar/beam axes, sphere marker and ground outline, same layout as `linePositions`
    #[wasm_bindgen(js_name = stagePositions)]
    pub fn stage_positions(&self) -> Vec<f32> {
        self.scene
            .stage()
            .map(|stage| flatten_segments(&stage.segments()))
            .unwrap_or_default()
    }
}

impl WebScene {
    fn from_config(config: &SceneConfig) -> Self {
        let scene = Scene::build(config);
        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(
            &format!(
                "twig: {} preset, {} segments",
                config.tree.preset,
                scene.tree_segments().len()
            )
            .into(),
        );
        Self { scene }
    }
}

fn to_js(err: twig_core::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffers_match_counts() {
        let scene = WebScene::new("static", "even").unwrap_or_else(|_| panic!("valid names"));
        assert_eq!(scene.segment_count(), 4);
        assert_eq!(scene.line_positions().len(), 4 * 6);
        assert_eq!(scene.stage_positions().len(), 15 * 6);
    }

    #[test]
    fn test_stage_can_be_disabled() {
        let scene = WebScene::from_toml("[stage]\nenabled = false")
            .unwrap_or_else(|_| panic!("valid config"));
        assert!(scene.stage_positions().is_empty());
    }
}
