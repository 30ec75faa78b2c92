/// Geometry primitives shared by the tree generator and the stage
use nalgebra::{Point3, Vector3};

/// One rendered line, from `start` to `end`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point3<f32>,
    pub end: Point3<f32>,
}

impl Segment {
    pub fn new(start: Point3<f32>, end: Point3<f32>) -> Self {
        Self { start, end }
    }

    /// Vector from `start` to `end`
    pub fn direction(&self) -> Vector3<f32> {
        self.end - self.start
    }

    pub fn length(&self) -> f32 {
        self.direction().norm()
    }

    /// Point at fraction `t` along the segment (0 = start, 1 = end)
    pub fn lerp(&self, t: f32) -> Point3<f32> {
        self.start + self.direction() * t
    }
}

/// Flatten segments into `[x0, y0, z0, x1, y1, z1, ...]` for line-list consumers
pub fn flatten_segments(segments: &[Segment]) -> Vec<f32> {
    let mut out = Vec::with_capacity(segments.len() * 6);
    for segment in segments {
        out.extend_from_slice(&[segment.start.x, segment.start.y, segment.start.z]);
        out.extend_from_slice(&[segment.end.x, segment.end.y, segment.end.z]);
    }
    out
}

/// A 3D vertex with position and normal
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
}

impl Vertex {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self { position, normal }
    }
}

/// A triangle face defined by three vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
        }
    }

    /// Face normal from winding order, zero for degenerate triangles
    pub fn calculate_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].position;
        let v1 = self.vertices[1].position;
        let v2 = self.vertices[2].position;

        (v1 - v0)
            .cross(&(v2 - v0))
            .try_normalize(1e-12)
            .unwrap_or_else(Vector3::zeros)
    }
}

/// A triangle mesh, used for the stage's ground plane
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
}

impl Mesh {
    pub fn new() -> Self {
        Self {
            triangles: Vec::new(),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    /// Horizontal rectangle of `width` (x) by `depth` (z) centered on `center`, facing +y
    pub fn ground(center: Point3<f32>, width: f32, depth: f32) -> Self {
        let hw = width / 2.0;
        let hd = depth / 2.0;
        let up = Vector3::y();
        let corner = |dx: f32, dz: f32| Vertex::new(center + Vector3::new(dx, 0.0, dz), up);

        let mut mesh = Self::new();
        mesh.add_triangle(Triangle::new(corner(-hw, -hd), corner(-hw, hd), corner(hw, hd)));
        mesh.add_triangle(Triangle::new(corner(-hw, -hd), corner(hw, hd), corner(hw, -hd)));
        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_segment_measures() {
        let s = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(0.0, 3.0, 4.0));
        assert_relative_eq!(s.length(), 5.0);
        assert_eq!(s.lerp(0.5), Point3::new(0.0, 1.5, 2.0));
    }

    #[test]
    fn test_flatten_order() {
        let s = Segment::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0));
        assert_eq!(flatten_segments(&[s]), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn test_ground_faces_up() {
        let mesh = Mesh::ground(Point3::origin(), 10.0, 10.0);
        assert_eq!(mesh.triangles.len(), 2);
        for triangle in &mesh.triangles {
            assert_relative_eq!(triangle.calculate_normal(), Vector3::y(), epsilon = 1e-6);
            for v in &triangle.vertices {
                assert_relative_eq!(v.position.x.abs(), 5.0);
                assert_relative_eq!(v.position.z.abs(), 5.0);
            }
        }
    }
}
