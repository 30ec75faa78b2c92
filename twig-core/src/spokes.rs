/// Endless offset cursors for placing branches around a trunk
use nalgebra::Vector3;
use std::f32::consts::TAU;

/// Offsets evenly distributed around the vertical axis.
///
/// Each call yields `(sin θ, vertical, cos θ)` and advances θ by
/// `2π / count`, wrapping back into `[0, 2π)` after a full turn. Never
/// returns `None`; take exactly as many offsets as there are branches.
#[derive(Debug, Clone)]
pub struct Spokes {
    angle: f32,
    step: f32,
    vertical: f32,
}

impl Spokes {
    /// `count == 0` behaves like a single spoke.
    pub fn new(count: usize, phase: f32, vertical: f32) -> Self {
        Self {
            angle: phase.rem_euclid(TAU),
            step: TAU / count.max(1) as f32,
            vertical,
        }
    }

    /// Current angle in radians, always within `[0, 2π)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }
}

impl Iterator for Spokes {
    type Item = Vector3<f32>;

    fn next(&mut self) -> Option<Self::Item> {
        let theta = self.angle;
        self.angle = (self.angle + self.step).rem_euclid(TAU);
        // Float drift can land exactly on TAU.
        if self.angle >= TAU {
            self.angle = 0.0;
        }
        Some(Vector3::new(theta.sin(), self.vertical, theta.cos()))
    }
}

/// Left/right mirrored offsets: `(x, y, z)`, then `(-x, y, -z)`, forever.
#[derive(Debug, Clone)]
pub struct Alternating {
    offset: Vector3<f32>,
    mirrored: bool,
}

impl Alternating {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            offset: Vector3::new(x, y, z),
            mirrored: false,
        }
    }
}

impl Iterator for Alternating {
    type Item = Vector3<f32>;

    fn next(&mut self) -> Option<Self::Item> {
        let out = if self.mirrored {
            Vector3::new(-self.offset.x, self.offset.y, -self.offset.z)
        } else {
            self.offset
        };
        self.mirrored = !self.mirrored;
        Some(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f32::consts::PI;

    #[test]
    fn test_three_spokes_cycle() {
        let mut spokes = Spokes::new(3, 0.0, 0.0);
        let a = spokes.next().unwrap();
        let b = spokes.next().unwrap();
        let c = spokes.next().unwrap();
        let d = spokes.next().unwrap();

        assert_relative_eq!(a, Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
        let third = 2.0 * PI / 3.0;
        assert_relative_eq!(b, Vector3::new(third.sin(), 0.0, third.cos()), epsilon = 1e-6);
        let two_thirds = 4.0 * PI / 3.0;
        assert_relative_eq!(
            c,
            Vector3::new(two_thirds.sin(), 0.0, two_thirds.cos()),
            epsilon = 1e-6
        );
        assert_relative_eq!(d, a, epsilon = 1e-5);
    }

    #[test]
    fn test_spokes_keep_vertical_and_unit_radius() {
        for offset in Spokes::new(7, 1.3, 0.75).take(20) {
            assert_relative_eq!(offset.y, 0.75);
            assert_relative_eq!(offset.x.hypot(offset.z), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_spoke_angle_stays_in_range() {
        let mut spokes = Spokes::new(5, 10.0 * PI, 0.0);
        for _ in 0..50 {
            assert!(spokes.angle() >= 0.0 && spokes.angle() < TAU);
            spokes.next();
        }
    }

    #[test]
    fn test_zero_count_is_single_spoke() {
        let mut spokes = Spokes::new(0, 0.5, 1.0);
        let first = spokes.next().unwrap();
        assert_relative_eq!(spokes.next().unwrap(), first, epsilon = 1e-5);
    }

    #[test]
    fn test_alternating_pairs() {
        let offsets: Vec<_> = Alternating::new(0.5, 0.5, -0.5).take(4).collect();
        assert_eq!(offsets[0], Vector3::new(0.5, 0.5, -0.5));
        assert_eq!(offsets[1], Vector3::new(-0.5, 0.5, 0.5));
        assert_eq!(offsets[2], offsets[0]);
        assert_eq!(offsets[3], offsets[1]);
    }
}
