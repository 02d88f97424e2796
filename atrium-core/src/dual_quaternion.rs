use glam::{Quat, Vec3};

use crate::transform::Transform;

/// A rigid transform (rotation + translation, no scale) encoded as a unit
/// dual quaternion, which blends better than separate components.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DualQuaternion {
    pub real: Quat,
    pub dual: Quat,
}

impl Default for DualQuaternion {
    fn default() -> DualQuaternion {
        DualQuaternion {
            real: Quat::IDENTITY,
            dual: Quat::from_xyzw(0.0, 0.0, 0.0, 0.0),
        }
    }
}

impl DualQuaternion {
    pub fn identity() -> DualQuaternion {
        DualQuaternion::default()
    }

    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> DualQuaternion {
        let t = Quat::from_xyzw(translation.x, translation.y, translation.z, 0.0);
        DualQuaternion {
            real: rotation,
            dual: (t * rotation) * 0.5,
        }
    }

    /// The rigid part of a transform; scale is ignored.
    pub fn from_transform(transform: &Transform) -> DualQuaternion {
        DualQuaternion::from_rotation_translation(transform.rotation, transform.translation)
    }

    pub fn rotation(&self) -> Quat {
        self.real
    }

    pub fn translation(&self) -> Vec3 {
        let t = (self.dual * 2.0) * self.real.conjugate();
        Vec3::new(t.x, t.y, t.z)
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation() * point + self.translation()
    }

    pub fn dot(&self, rhs: &DualQuaternion) -> f32 {
        self.real.dot(rhs.real)
    }

    /// Inverse of a unit dual quaternion.
    pub fn inverse(&self) -> DualQuaternion {
        DualQuaternion {
            real: self.real.conjugate(),
            dual: self.dual.conjugate(),
        }
    }

    pub fn normalize(&self) -> DualQuaternion {
        let inv_len = 1.0 / self.real.length();
        DualQuaternion {
            real: self.real * inv_len,
            dual: self.dual * inv_len,
        }
    }

    /// Blend toward `rhs`, flipping its sign first when the two lie on
    /// opposite hemispheres so the blend takes the short way around.
    pub fn lerp(&self, rhs: &DualQuaternion, alpha: f32) -> DualQuaternion {
        let sign = if self.dot(rhs) < 0.0 { -1.0 } else { 1.0 };
        DualQuaternion {
            real: self.real * (1.0 - alpha) + rhs.real * (sign * alpha),
            dual: self.dual * (1.0 - alpha) + rhs.dual * (sign * alpha),
        }
        .normalize()
    }
}

impl std::ops::Mul for DualQuaternion {
    type Output = DualQuaternion;

    fn mul(self, rhs: DualQuaternion) -> DualQuaternion {
        DualQuaternion {
            real: self.real * rhs.real,
            dual: self.real * rhs.dual + self.dual * rhs.real,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_rotation_and_translation() {
        let rotation = Quat::from_rotation_y(0.8);
        let translation = Vec3::new(1.0, -2.0, 3.0);
        let dq = DualQuaternion::from_rotation_translation(rotation, translation);
        assert!(dq.rotation().abs_diff_eq(rotation, 0.001));
        assert!(dq.translation().abs_diff_eq(translation, 0.001));
    }

    #[test]
    fn test_transform_point_matches_transform() {
        let transform = Transform::new(
            Vec3::new(0.5, 1.0, -2.0),
            Quat::from_rotation_z(1.1),
            Vec3::ONE,
        );
        let dq = DualQuaternion::from_transform(&transform);
        let point = Vec3::new(2.0, 0.0, 1.0);
        assert!(dq
            .transform_point(point)
            .abs_diff_eq(transform.transform_point(point), 0.001));
    }

    #[test]
    fn test_multiplication_composes() {
        let a = DualQuaternion::from_rotation_translation(
            Quat::from_rotation_y(0.5),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let b = DualQuaternion::from_rotation_translation(
            Quat::from_rotation_x(-0.3),
            Vec3::new(0.0, 2.0, 0.0),
        );
        let point = Vec3::new(0.1, 0.2, 0.3);
        assert!((a * b)
            .transform_point(point)
            .abs_diff_eq(a.transform_point(b.transform_point(point)), 0.001));
        assert!((a * DualQuaternion::identity())
            .transform_point(point)
            .abs_diff_eq(a.transform_point(point), 0.001));
    }

    #[test]
    fn test_inverse() {
        let dq = DualQuaternion::from_rotation_translation(
            Quat::from_rotation_x(0.7),
            Vec3::new(-1.0, 4.0, 2.0),
        );
        let point = Vec3::new(3.0, 2.0, 1.0);
        assert!(dq
            .inverse()
            .transform_point(dq.transform_point(point))
            .abs_diff_eq(point, 0.001));
    }

    #[test]
    fn test_lerp_midpoint_and_hemispheres() {
        let a = DualQuaternion::from_rotation_translation(Quat::IDENTITY, Vec3::ZERO);
        let b = DualQuaternion::from_rotation_translation(Quat::IDENTITY, Vec3::new(2.0, 0.0, 0.0));
        let mid = a.lerp(&b, 0.5);
        assert!(mid.translation().abs_diff_eq(Vec3::new(1.0, 0.0, 0.0), 0.001));

        // a negated representation is the same pose, and lerp must agree
        let c = DualQuaternion::from_rotation_translation(Quat::from_rotation_y(0.4), Vec3::ONE);
        let negated = DualQuaternion {
            real: -c.real,
            dual: -c.dual,
        };
        let toward = a.lerp(&c, 0.25);
        let toward_negated = a.lerp(&negated, 0.25);
        let point = Vec3::new(1.0, 2.0, 3.0);
        assert!(toward
            .transform_point(point)
            .abs_diff_eq(toward_negated.transform_point(point), 0.001));
    }
}
