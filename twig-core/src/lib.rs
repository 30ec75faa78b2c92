/// Twig Core Library - procedural tree skeletons and their stage
///
/// This library builds branching tree skeletons as flat lists of line
/// segments, the rectangular stage they stand on, and the camera math
/// used to view them.

pub mod config;
pub mod error;
pub mod geometry;
pub mod presets;
pub mod projection;
pub mod scene;
pub mod spokes;
pub mod stage;
pub mod transform;
pub mod tree;

// Re-export commonly used types
pub use config::SceneConfig;
pub use error::{Error, Result};
pub use geometry::{Mesh, Segment, Triangle, Vertex};
pub use presets::{Preset, SpokeParams};
pub use projection::Camera;
pub use scene::Scene;
pub use spokes::{Alternating, Spokes};
pub use stage::{Stage, StageElement};
pub use transform::{RotationState, Transform};
pub use tree::{branch, generate, leaf, tree, AttachmentPolicy, Branch, Generator, TreeSpec};
