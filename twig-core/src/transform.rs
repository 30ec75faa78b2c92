/// Placement matrices for stage elements and the viewer's model rotation
use nalgebra::{Matrix4, Point3, Unit, Vector3};

/// Viewer rotation around the three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Rotate by delta amounts (in radians)
    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Principal axes an instance can be turned about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub fn unit(self) -> Unit<Vector3<f32>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }
}

pub struct Transform;

impl Transform {
    /// Rotation applied in order Z, Y, X about a pivot
    pub fn rotation_matrix(rotation: &RotationState, pivot: &Point3<f32>) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(rotation.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, rotation.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, rotation.z));

        let to_pivot = Matrix4::new_translation(&pivot.coords);
        let from_pivot = Matrix4::new_translation(&-pivot.coords);
        to_pivot * rz * ry * rx * from_pivot
    }

    pub fn translation_matrix(offset: &Vector3<f32>) -> Matrix4<f32> {
        Matrix4::new_translation(offset)
    }

    pub fn axis_rotation(axis: Axis, angle: f32) -> Matrix4<f32> {
        Matrix4::from_axis_angle(&axis.unit(), angle)
    }

    /// Local rotation about `axis`, then placement at `position`
    pub fn instance(position: Point3<f32>, axis: Axis, angle: f32) -> Matrix4<f32> {
        Self::translation_matrix(&position.coords) * Self::axis_rotation(axis, angle)
    }
}
