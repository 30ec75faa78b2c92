/// The rectangular stage framing the tree: ground, corner pillars and top beams
use crate::geometry::{Mesh, Segment};
use crate::transform::{Axis, Transform};
use nalgebra::{Matrix4, Point3, Vector3};
use std::f32::consts::FRAC_PI_2;

const MARKER_DIAMETER: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Ground,
    Pillar,
    Beam,
    /// Sphere hovering at the stage center, a scale reference for the tree
    Marker,
}

/// One placed stage piece. Pillars and beams are cylinders of `length`
/// along their local y axis, centered on the origin before placement.
#[derive(Debug, Clone)]
pub struct StageElement {
    pub name: &'static str,
    pub kind: ElementKind,
    pub length: f32,
    pub diameter: f32,
    pub placement: Matrix4<f32>,
}

impl StageElement {
    pub fn center(&self) -> Point3<f32> {
        self.placement.transform_point(&Point3::origin())
    }

    /// Cylinder axis in world space; `None` for the ground and the marker
    pub fn centerline(&self) -> Option<Segment> {
        if matches!(self.kind, ElementKind::Ground | ElementKind::Marker) {
            return None;
        }
        let half = self.length / 2.0;
        Some(Segment::new(
            self.placement.transform_point(&Point3::new(0.0, -half, 0.0)),
            self.placement.transform_point(&Point3::new(0.0, half, 0.0)),
        ))
    }
}

#[derive(Debug, Clone)]
pub struct Stage {
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    elements: Vec<StageElement>,
}

impl Stage {
    /// 10 x 10 ground, 10-high pillars of diameter 0.2
    pub fn standard() -> Self {
        Self::new(10.0, 10.0, 10.0, 0.2)
    }

    pub fn new(width: f32, depth: f32, height: f32, diameter: f32) -> Self {
        let hw = width / 2.0;
        let hd = depth / 2.0;
        let mid = height / 2.0;

        let pillar = |name, x, z| StageElement {
            name,
            kind: ElementKind::Pillar,
            length: height,
            diameter,
            placement: Transform::instance(Point3::new(x, mid, z), Axis::X, 0.0),
        };
        let beam = |name, position, axis, length| StageElement {
            name,
            kind: ElementKind::Beam,
            length,
            diameter,
            placement: Transform::instance(position, axis, FRAC_PI_2),
        };

        let elements = vec![
            StageElement {
                name: "ground",
                kind: ElementKind::Ground,
                length: 0.0,
                diameter: 0.0,
                placement: Matrix4::identity(),
            },
            pillar("back right pillar", -hw, -hd),
            pillar("back left pillar", hw, -hd),
            pillar("front right pillar", -hw, hd),
            pillar("front left pillar", hw, hd),
            beam("front beam", Point3::new(0.0, height, hd), Axis::Z, width),
            beam("back beam", Point3::new(0.0, height, -hd), Axis::Z, width),
            beam("right beam", Point3::new(-hw, height, 0.0), Axis::X, depth),
            beam("left beam", Point3::new(hw, height, 0.0), Axis::X, depth),
            StageElement {
                name: "sphere",
                kind: ElementKind::Marker,
                length: 0.0,
                diameter: MARKER_DIAMETER,
                placement: Matrix4::new_translation(&Vector3::new(0.0, mid, 0.0)),
            },
        ];

        Self {
            width,
            depth,
            height,
            elements,
        }
    }

    pub fn elements(&self) -> &[StageElement] {
        &self.elements
    }

    pub fn ground_mesh(&self) -> Mesh {
        Mesh::ground(Point3::origin(), self.width, self.depth)
    }

    /// Pillar and beam axes, a three-axis cross through the marker, then
    /// the ground outline
    pub fn segments(&self) -> Vec<Segment> {
        let mut out: Vec<Segment> = self
            .elements
            .iter()
            .filter_map(StageElement::centerline)
            .collect();

        for marker in self.elements.iter().filter(|e| e.kind == ElementKind::Marker) {
            let center = marker.center();
            let r = marker.diameter / 2.0;
            for axis in [Vector3::x(), Vector3::y(), Vector3::z()] {
                out.push(Segment::new(center - axis * r, center + axis * r));
            }
        }

        let hw = self.width / 2.0;
        let hd = self.depth / 2.0;
        let corners = [
            Point3::new(-hw, 0.0, -hd),
            Point3::new(hw, 0.0, -hd),
            Point3::new(hw, 0.0, hd),
            Point3::new(-hw, 0.0, hd),
        ];
        for i in 0..corners.len() {
            out.push(Segment::new(corners[i], corners[(i + 1) % corners.len()]));
        }
        out
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::standard()
    }
}
