/// Example: summarize every tree preset under both attachment policies
///
/// Usage: cargo run --example presets
use twig_core::{AttachmentPolicy, Preset, Scene, SceneConfig};

fn main() {
    for preset in Preset::ALL {
        for policy in [AttachmentPolicy::EvenSpacing, AttachmentPolicy::FixedHeight] {
            let mut config = SceneConfig::default();
            config.tree.preset = preset;
            config.tree.policy = policy;
            let scene = Scene::build(&config);

            let segments = scene.tree_segments();
            let top = segments
                .iter()
                .map(|s| s.start.y.max(s.end.y))
                .fold(f32::NEG_INFINITY, f32::max);
            let total: f32 = segments.iter().map(|s| s.length()).sum();

            println!(
                "{:<12} {:<13} {:>3} segments, height {:>5.2}, total length {:>6.2}",
                preset.to_string(),
                policy.to_string(),
                segments.len(),
                top,
                total
            );
        }
    }
}
