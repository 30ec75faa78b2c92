/// Scene assembly: one generation pass plus the stage, under a single root
use crate::config::SceneConfig;
use crate::geometry::{flatten_segments, Segment};
use crate::stage::Stage;
use crate::tree::Generator;

/// Fully materialized scene; consumers read it, they never regenerate it
#[derive(Debug, Clone)]
pub struct Scene {
    tree: Vec<Segment>,
    stage: Option<Stage>,
}

impl Scene {
    pub fn build(config: &SceneConfig) -> Self {
        let spec = config.tree.preset.tree(&config.tree.spokes);
        let tree = Generator::new(config.tree.policy).generate(
            config.tree.origin(),
            config.tree.growth(),
            &spec,
        );

        let stage = config.stage.enabled.then(|| {
            Stage::new(
                config.stage.width,
                config.stage.depth,
                config.stage.height,
                config.stage.diameter,
            )
        });

        log::debug!(
            "built '{}' scene: {} tree segments, {} stage elements",
            config.tree.preset,
            tree.len(),
            stage.as_ref().map_or(0, |s| s.elements().len())
        );

        Self { tree, stage }
    }

    pub fn tree_segments(&self) -> &[Segment] {
        &self.tree
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.stage.as_ref()
    }

    /// Tree segments followed by the stage frame
    pub fn all_segments(&self) -> Vec<Segment> {
        let mut out = self.tree.clone();
        if let Some(stage) = &self.stage {
            out.extend(stage.segments());
        }
        out
    }

    /// Tree segments as a flat position buffer for line-list renderers
    pub fn line_positions(&self) -> Vec<f32> {
        flatten_segments(&self.tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presets::Preset;
    use crate::tree::AttachmentPolicy;
    use nalgebra::{Point3, Vector3};

    #[test]
    fn test_default_scene() {
        let scene = Scene::build(&SceneConfig::default());
        assert_eq!(scene.tree_segments().len(), 40);
        assert_eq!(scene.stage().unwrap().elements().len(), 10);
        assert_eq!(scene.all_segments().len(), 40 + 15);
        assert_eq!(scene.line_positions().len(), 40 * 6);
    }

    #[test]
    fn test_trunk_leads_and_stage_optional() {
        let mut config = SceneConfig::default();
        config.tree.preset = Preset::Static;
        config.tree.origin = [1.0, 0.0, 2.0];
        config.stage.enabled = false;

        let scene = Scene::build(&config);
        assert!(scene.stage().is_none());
        assert_eq!(scene.all_segments().len(), 4);

        let trunk = scene.tree_segments()[0];
        assert_eq!(trunk.start, Point3::new(1.0, 0.0, 2.0));
        assert_eq!(trunk.direction(), Vector3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_fixed_height_scene_climbs_trunk() {
        let mut config = SceneConfig::default();
        config.tree.preset = Preset::Static;
        config.tree.policy = AttachmentPolicy::FixedHeight;

        let scene = Scene::build(&config);
        let starts: Vec<Point3<f32>> = scene.tree_segments()[1..]
            .iter()
            .map(|s| s.start)
            .collect();

        assert_eq!(
            starts,
            vec![
                Point3::new(1.0, 3.0, 1.0),
                Point3::new(-1.0, 4.0, 0.0),
                Point3::new(0.0, 5.0, -1.0),
            ]
        );
    }

    #[test]
    fn test_fixed_height_presets_leave_trunk_base() {
        let mut config = SceneConfig::default();
        config.tree.policy = AttachmentPolicy::FixedHeight;
        for preset in Preset::ALL {
            config.tree.preset = preset;
            let scene = Scene::build(&config);
            let trunk = scene.tree_segments()[0];
            assert!(
                scene.tree_segments()[1..]
                    .iter()
                    .all(|s| s.start.y > trunk.start.y),
                "{preset}"
            );
        }
    }
}
