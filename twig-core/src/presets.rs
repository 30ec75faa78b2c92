/// Named trees, one per generator revision: static, declarative, combinator and spokes
use crate::spokes::{Alternating, Spokes};
use crate::tree::{branch, leaf, tree, Branch, TreeSpec};
use nalgebra::Vector3;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    Static,
    Declarative,
    Combinator,
    #[default]
    Spokes,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::Static,
        Preset::Declarative,
        Preset::Combinator,
        Preset::Spokes,
    ];

    /// Build the preset's tree; `spokes` only affects [`Preset::Spokes`]
    pub fn tree(self, spokes: &SpokeParams) -> TreeSpec {
        match self {
            Preset::Static => static_tree(),
            Preset::Declarative => declarative_tree(),
            Preset::Combinator => combinator_tree(),
            Preset::Spokes => radial_tree(spokes),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Static => "static",
            Preset::Declarative => "declarative",
            Preset::Combinator => "combinator",
            Preset::Spokes => "spokes",
        }
    }
}

impl FromStr for Preset {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| crate::Error::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Radial distribution settings for [`Preset::Spokes`]
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SpokeParams {
    pub count: usize,
    pub phase: f32,
    pub vertical: f32,
    pub depth: usize,
}

impl Default for SpokeParams {
    fn default() -> Self {
        Self {
            count: 3,
            phase: 0.0,
            vertical: 1.0,
            depth: 3,
        }
    }
}

/// Fixed height of the first generated branch level; halves per level
const BASE_HEIGHT: f32 = 2.5;

/// Hand-authored branch list; heights climb the trunk
fn static_tree() -> TreeSpec {
    tree(vec![
        branch(Vector3::new(1.0, 1.0, 1.0), leaf()).at_height(2.0),
        branch(Vector3::new(-1.0, 1.0, 0.0), leaf()).at_height(3.0),
        branch(Vector3::new(0.0, 1.0, -1.0), leaf()).at_height(4.0),
    ])
}

fn declarative_tree() -> TreeSpec {
    let twig = || {
        tree(vec![
            branch(Vector3::new(0.5, 0.5, 0.0), leaf()).at_height(0.8),
            branch(Vector3::new(-0.5, 0.5, 0.0), leaf()).at_height(1.6),
        ])
    };
    tree(vec![
        branch(Vector3::new(1.0, 1.0, 1.0), twig()).at_height(1.5),
        branch(Vector3::new(-1.0, 1.0, 0.0), twig()).at_height(3.5),
    ])
}

/// Each level carries one mirrored pair of sub-branches at a shared height
fn pairs(depth: usize, height: f32) -> TreeSpec {
    if depth == 0 {
        return leaf();
    }
    let children: Vec<Branch> = Alternating::new(0.5, 0.5, -0.5)
        .take(2)
        .map(|offset| branch(offset, pairs(depth - 1, height * 0.5)).at_height(height))
        .collect();
    tree(children)
}

fn combinator_tree() -> TreeSpec {
    tree(vec![
        branch(Vector3::new(1.0, 1.0, 1.0), pairs(2, BASE_HEIGHT * 0.5)).at_height(1.5),
        branch(Vector3::new(-1.0, 1.0, 0.0), pairs(1, BASE_HEIGHT * 0.5)).at_height(3.5),
    ])
}

fn radial_tree(params: &SpokeParams) -> TreeSpec {
    radial_level(params, params.depth, BASE_HEIGHT)
}

/// Every spoke of a level shares one height: the midpoint of that level's trunk
fn radial_level(params: &SpokeParams, remaining: usize, height: f32) -> TreeSpec {
    if remaining == 0 {
        return leaf();
    }
    let children: Vec<Branch> = Spokes::new(params.count, params.phase, params.vertical)
        .take(params.count)
        .map(|offset| {
            branch(offset, radial_level(params, remaining - 1, height * 0.5)).at_height(height)
        })
        .collect();
    tree(children)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>().unwrap(), preset);
        }
        assert_eq!("SPOKES".parse::<Preset>().unwrap(), Preset::Spokes);
        assert!("willow".parse::<Preset>().is_err());
    }

    #[test]
    fn test_node_counts() {
        let params = SpokeParams::default();
        assert_eq!(Preset::Static.tree(&params).node_count(), 4);
        assert_eq!(Preset::Declarative.tree(&params).node_count(), 7);
        // pairs(2) = 7 nodes, pairs(1) = 3 nodes, plus the trunk.
        assert_eq!(Preset::Combinator.tree(&params).node_count(), 11);
        // 1 + 3 + 9 + 27
        assert_eq!(Preset::Spokes.tree(&params).node_count(), 40);
    }

    #[test]
    fn test_radial_depth_follows_params() {
        let params = SpokeParams {
            count: 4,
            depth: 2,
            ..SpokeParams::default()
        };
        let spec = Preset::Spokes.tree(&params);
        assert_eq!(spec.depth(), 3);
        assert_eq!(spec.branches.len(), 4);
        assert!(spec.branches.iter().all(|b| b.offset.y == 1.0));
    }

    fn all_branches_have_heights(spec: &TreeSpec) -> bool {
        spec.branches
            .iter()
            .all(|b| b.height.is_some() && all_branches_have_heights(&b.tree))
    }

    #[test]
    fn test_every_preset_sets_heights() {
        let params = SpokeParams::default();
        for preset in Preset::ALL {
            assert!(all_branches_have_heights(&preset.tree(&params)), "{preset}");
        }
    }

    #[test]
    fn test_static_heights_climb_trunk() {
        let spec = Preset::Static.tree(&SpokeParams::default());
        let heights: Vec<f32> = spec.branches.iter().filter_map(|b| b.height).collect();
        assert_eq!(heights, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_combinator_pairs_mirror() {
        let spec = Preset::Combinator.tree(&SpokeParams::default());
        let pair = &spec.branches[0].tree.branches;
        assert_eq!(pair[0].offset.x, -pair[1].offset.x);
        assert_eq!(pair[0].offset.z, -pair[1].offset.z);
        assert_eq!(pair[0].offset.y, pair[1].offset.y);
    }
}
