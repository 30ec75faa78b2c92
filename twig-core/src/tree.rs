/// Tree-skeleton generation: rule trees as data, walked once into segments
use crate::geometry::Segment;
use nalgebra::{Point3, Vector3};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Growth scale applied at every recursion level
pub const GROWTH_DECAY: f32 = 0.5;

/// Where branches attach along their parent trunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttachmentPolicy {
    /// The i-th of k branches attaches at `origin + growth * i / (k + 1)`
    #[default]
    EvenSpacing,
    /// Each branch attaches at `origin + (0, height, 0)`
    FixedHeight,
}

impl FromStr for AttachmentPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "even" | "even-spacing" => Ok(Self::EvenSpacing),
            "fixed" | "fixed-height" => Ok(Self::FixedHeight),
            other => Err(crate::Error::UnknownPolicy(other.to_string())),
        }
    }
}

impl fmt::Display for AttachmentPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EvenSpacing => write!(f, "even-spacing"),
            Self::FixedHeight => write!(f, "fixed-height"),
        }
    }
}

/// A child rule: offset from its attachment point, optional fixed height and its own subtree
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    pub offset: Vector3<f32>,
    /// Only read under [`AttachmentPolicy::FixedHeight`]
    pub height: Option<f32>,
    pub tree: TreeSpec,
}

impl Branch {
    pub fn new(offset: Vector3<f32>, tree: TreeSpec) -> Self {
        Self {
            offset,
            height: None,
            tree,
        }
    }

    pub fn at_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }
}

/// One node of the rule tree. Every node emits exactly one trunk segment.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TreeSpec {
    pub branches: Vec<Branch>,
}

impl TreeSpec {
    pub fn new(branches: Vec<Branch>) -> Self {
        Self { branches }
    }

    /// Number of nodes, which is also the number of segments generated
    pub fn node_count(&self) -> usize {
        1 + self
            .branches
            .iter()
            .map(|b| b.tree.node_count())
            .sum::<usize>()
    }

    /// Levels below and including this node; a leaf has depth 1
    pub fn depth(&self) -> usize {
        1 + self
            .branches
            .iter()
            .map(|b| b.tree.depth())
            .max()
            .unwrap_or(0)
    }

    pub fn is_leaf(&self) -> bool {
        self.branches.is_empty()
    }
}

/// A node with branches
pub fn tree(branches: Vec<Branch>) -> TreeSpec {
    TreeSpec::new(branches)
}

/// A node with no branches
pub fn leaf() -> TreeSpec {
    TreeSpec::default()
}

pub fn branch(offset: Vector3<f32>, tree: TreeSpec) -> Branch {
    Branch::new(offset, tree)
}

/// Walks a [`TreeSpec`] into segments under one attachment policy.
///
/// Each node emits its trunk `(origin, origin + growth)` first, then each
/// branch's segments in list order. A branch's local origin is its
/// attachment point on the parent plus the branch offset, and its growth
/// is exactly the parent's growth times [`GROWTH_DECAY`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Generator {
    policy: AttachmentPolicy,
}

impl Generator {
    pub fn new(policy: AttachmentPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> AttachmentPolicy {
        self.policy
    }

    pub fn generate(
        &self,
        origin: Point3<f32>,
        growth: Vector3<f32>,
        spec: &TreeSpec,
    ) -> Vec<Segment> {
        let mut out = Vec::with_capacity(spec.node_count());
        self.emit(origin, growth, spec, &mut out);
        log::debug!(
            "generated {} segments ({} policy, depth {})",
            out.len(),
            self.policy,
            spec.depth()
        );
        out
    }

    fn emit(
        &self,
        origin: Point3<f32>,
        growth: Vector3<f32>,
        spec: &TreeSpec,
        out: &mut Vec<Segment>,
    ) {
        out.push(Segment::new(origin, origin + growth));

        let child_growth = growth * GROWTH_DECAY;
        let count = spec.branches.len();
        for (i, branch) in spec.branches.iter().enumerate() {
            let attach = self.attachment(origin, growth, branch, i, count);
            self.emit(attach + branch.offset, child_growth, &branch.tree, out);
        }
    }

    fn attachment(
        &self,
        origin: Point3<f32>,
        growth: Vector3<f32>,
        branch: &Branch,
        index: usize,
        count: usize,
    ) -> Point3<f32> {
        match self.policy {
            AttachmentPolicy::EvenSpacing => {
                origin + growth * ((index + 1) as f32 / (count + 1) as f32)
            }
            AttachmentPolicy::FixedHeight => {
                origin + Vector3::new(0.0, branch.height.unwrap_or(0.0), 0.0)
            }
        }
    }
}

/// Generate with the canonical even-spacing policy
pub fn generate(origin: Point3<f32>, growth: Vector3<f32>, spec: &TreeSpec) -> Vec<Segment> {
    Generator::default().generate(origin, growth, spec)
}
