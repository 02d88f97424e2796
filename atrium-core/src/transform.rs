use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::EPSILON;

/// A scale-then-rotate-then-translate transform. Composition and inversion
/// are exact for uniform scale; per-axis scale works as long as no step
/// introduces shear.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Transform {
        Transform {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new(translation: Vec3, rotation: Quat, scale: Vec3) -> Transform {
        Transform {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: Vec3) -> Transform {
        Transform {
            translation,
            ..Default::default()
        }
    }

    pub fn from_rotation(rotation: Quat) -> Transform {
        Transform {
            rotation,
            ..Default::default()
        }
    }

    pub fn from_uniform_scale(scale: f32) -> Transform {
        Transform {
            scale: Vec3::splat(scale),
            ..Default::default()
        }
    }

    pub fn is_identity(&self) -> bool {
        self.translation.abs_diff_eq(Vec3::ZERO, EPSILON)
            && self.rotation.abs_diff_eq(Quat::IDENTITY, EPSILON)
            && self.scale.abs_diff_eq(Vec3::ONE, EPSILON)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// Decompose a matrix back into a transform. Singular matrices carry no
    /// usable rotation and are rejected.
    pub fn from_matrix(matrix: &Mat4) -> Option<Transform> {
        if matrix.determinant().abs() < EPSILON {
            return None;
        }
        let (scale, rotation, translation) = matrix.to_scale_rotation_translation();
        Some(Transform {
            translation,
            rotation,
            scale,
        })
    }

    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * (point * self.scale) + self.translation
    }

    /// Directions see only the rotation part.
    pub fn transform_direction(&self, direction: Vec3) -> Vec3 {
        self.rotation * direction
    }

    pub fn inverse(&self) -> Transform {
        let inv_scale = self.scale.recip();
        let inv_rotation = self.rotation.inverse();
        Transform {
            translation: -((inv_rotation * self.translation) * inv_scale),
            rotation: inv_rotation,
            scale: inv_scale,
        }
    }

    /// The transform that carries `base` onto `target`, so that
    /// `base * relative == target`.
    pub fn relative_transform(base: &Transform, target: &Transform) -> Transform {
        base.inverse() * *target
    }
}

impl std::ops::Mul for Transform {
    type Output = Transform;

    // parent * child: the child transform applies first
    fn mul(self, child: Transform) -> Transform {
        Transform {
            translation: self.transform_point(child.translation),
            rotation: self.rotation * child.rotation,
            scale: self.scale * child.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_transform() -> Transform {
        Transform::new(
            Vec3::new(1.0, 2.0, 3.0),
            Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            Vec3::splat(2.0),
        )
    }

    #[test]
    fn test_transform_point_order() {
        let transform = example_transform();
        // (1,0,0) doubles to (2,0,0), quarter-turns about y to (0,0,-2),
        // then translates
        let point = transform.transform_point(Vec3::X);
        assert!(point.abs_diff_eq(Vec3::new(1.0, 2.0, 1.0), 0.001));
        // directions only rotate
        let direction = transform.transform_direction(Vec3::X);
        assert!(direction.abs_diff_eq(-Vec3::Z, 0.001));
    }

    #[test]
    fn test_matrix_round_trip() {
        let transform = example_transform();
        let matrix = transform.matrix();
        let point = Vec3::new(0.3, -0.7, 2.0);
        assert!(matrix
            .transform_point3(point)
            .abs_diff_eq(transform.transform_point(point), 0.001));

        let recovered = Transform::from_matrix(&matrix).unwrap();
        assert!(recovered.translation.abs_diff_eq(transform.translation, 0.001));
        assert!(recovered.scale.abs_diff_eq(transform.scale, 0.001));

        // a flattened matrix has no usable decomposition
        assert!(Transform::from_matrix(&Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0))).is_none());
    }

    #[test]
    fn test_composition_matches_nesting() {
        let parent = example_transform();
        let child = Transform::from_translation(Vec3::new(0.0, 1.0, 0.0));
        let combined = parent * child;
        let point = Vec3::new(0.5, 0.5, 0.5);
        assert!(combined
            .transform_point(point)
            .abs_diff_eq(parent.transform_point(child.transform_point(point)), 0.001));
    }

    #[test]
    fn test_inverse_round_trip() {
        let transform = example_transform();
        let inverse = transform.inverse();
        let point = Vec3::new(4.0, -1.0, 0.5);
        assert!(inverse
            .transform_point(transform.transform_point(point))
            .abs_diff_eq(point, 0.001));
        assert!((transform * inverse).is_identity());
    }

    #[test]
    fn test_relative_transform() {
        let base = example_transform();
        let target = Transform::new(
            Vec3::new(-2.0, 0.0, 1.0),
            Quat::from_rotation_z(0.4),
            Vec3::splat(0.5),
        );
        let relative = Transform::relative_transform(&base, &target);
        let recombined = base * relative;
        let point = Vec3::new(1.0, 1.0, 1.0);
        assert!(recombined
            .transform_point(point)
            .abs_diff_eq(target.transform_point(point), 0.001));
    }
}
