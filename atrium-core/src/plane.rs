use glam::{Vec3, Vec4};

use crate::EPSILON;

/// An infinite plane in normal/d-coefficient form: dot(normal, p) + d = 0.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub d: f32,
}

impl Default for Plane {
    fn default() -> Self {
        Plane {
            normal: Vec3::Y,
            d: 0.0,
        }
    }
}

impl Plane {
    pub fn new(normal: Vec3, d: f32) -> Plane {
        Plane { normal, d }
    }

    pub fn from_normal_and_point(normal: Vec3, point: Vec3) -> Plane {
        let normal = normal.normalize();
        Plane {
            normal,
            d: -normal.dot(point),
        }
    }

    // the three points are given in counter clockwise order as seen from the
    // side the normal ends up pointing toward
    pub fn from_points(v1: Vec3, v2: Vec3, v3: Vec3) -> Plane {
        let normal = (v2 - v1).cross(v3 - v1).normalize();
        Plane {
            normal,
            d: -normal.dot(v1),
        }
    }

    pub fn from_coefficients(coefficients: Vec4) -> Plane {
        Plane {
            normal: coefficients.truncate(),
            d: coefficients.w,
        }
    }

    pub fn coefficients(&self) -> Vec4 {
        self.normal.extend(self.d)
    }

    /// Signed distance from the point to the plane, positive on the normal side.
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    pub fn is_point_on_plane(&self, point: Vec3) -> bool {
        self.distance(point).abs() < EPSILON
    }

    pub fn project(&self, point: Vec3) -> Vec3 {
        point - self.normal * self.distance(point)
    }

    pub fn inverted(&self) -> Plane {
        Plane {
            normal: -self.normal,
            d: -self.d,
        }
    }

    // zero normal plus a hugely negative d makes every distance test fail
    pub fn invalidate(&mut self) {
        self.normal = Vec3::ZERO;
        self.d = f32::MIN;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_and_projection() {
        let plane = Plane::from_normal_and_point(Vec3::Y, Vec3::new(0.0, 2.0, 0.0));
        assert!((plane.distance(Vec3::new(5.0, 6.0, -3.0)) - 4.0).abs() < 0.001);
        assert!((plane.distance(Vec3::new(5.0, -1.0, -3.0)) + 3.0).abs() < 0.001);
        assert!(plane
            .project(Vec3::new(5.0, 6.0, -3.0))
            .abs_diff_eq(Vec3::new(5.0, 2.0, -3.0), 0.001));
        assert!(plane.is_point_on_plane(Vec3::new(100.0, 2.0, 7.0)));
    }

    #[test]
    fn test_from_points_winding() {
        // counter clockwise in the xz plane seen from above gives an upward normal
        let plane = Plane::from_points(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, -1.0),
        );
        assert!(plane.normal.abs_diff_eq(Vec3::Y, 0.001));
        assert!((plane.d + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_invalidated_plane_rejects_everything() {
        let mut plane = Plane::default();
        plane.invalidate();
        assert!(plane.distance(Vec3::ZERO) < 0.0);
        assert!(plane.distance(Vec3::splat(1.0e9)) < 0.0);
    }
}
