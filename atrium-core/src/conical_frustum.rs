use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::aabox::AABox;
use crate::aabox::BoxVertex::{BottomLeftFar, BottomRightFar, TopLeftFar, TopRightFar};
use crate::aacube::AACube;
use crate::util;
use crate::view_frustum::{ViewFrustum, IDENTITY_FORWARD};

const SQRT_THREE: f32 = 1.732_050_8;

pub const DEFAULT_VIEW_ANGLE: f32 = 1.0;
pub const DEFAULT_VIEW_RADIUS: f32 = 10.0;
pub const DEFAULT_VIEW_FAR_CLIP: f32 = 100.0;

/// Half-angle the sphere of the given radius subtends at the given distance,
/// a cheap key for level-of-detail and sort-priority decisions.
pub fn angular_size(distance: f32, radius: f32) -> f32 {
    const AVOID_DIVIDE_BY_ZERO: f32 = 0.001;
    radius / (distance + AVOID_DIVIDE_BY_ZERO)
}

/// A cone plus a central sphere, the cheap stand-in for a full ViewFrustum
/// when all that is needed is "roughly in view". The cone always contains
/// the pyramidal frustum it was built from, so this test never culls
/// something the precise test would keep.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "WireConicalFrustum", into = "WireConicalFrustum")]
pub struct ConicalViewFrustum {
    position: Vec3,
    direction: Vec3,
    angle: f32,
    far_clip: f32,
    radius: f32,
    // cached by calculate()
    sin_angle: f32,
    cos_angle: f32,
}

impl Default for ConicalViewFrustum {
    fn default() -> Self {
        let mut frustum = ConicalViewFrustum {
            position: Vec3::ZERO,
            direction: IDENTITY_FORWARD,
            angle: DEFAULT_VIEW_ANGLE,
            far_clip: DEFAULT_VIEW_FAR_CLIP,
            radius: DEFAULT_VIEW_RADIUS,
            sin_angle: 0.0,
            cos_angle: 0.0,
        };
        frustum.calculate();
        frustum
    }
}

impl ConicalViewFrustum {
    /// The widest angle from the view direction to any far corner, so the
    /// cone contains the whole pyramid.
    pub fn from_view_frustum(view_frustum: &ViewFrustum) -> ConicalViewFrustum {
        let position = view_frustum.position();
        let direction = view_frustum.direction();

        let mut angle = 0.0_f32;
        for corner in [TopLeftFar, TopRightFar, BottomLeftFar, BottomRightFar] {
            let to_corner = view_frustum.world_corner(corner) - position;
            angle = angle.max(util::angle_between(direction, to_corner));
        }

        let mut frustum = ConicalViewFrustum {
            position,
            direction,
            angle,
            far_clip: view_frustum.far_clip(),
            radius: view_frustum.center_sphere_radius(),
            sin_angle: 0.0,
            cos_angle: 0.0,
        };
        frustum.calculate();
        frustum
    }

    fn calculate(&mut self) {
        self.cos_angle = self.angle.cos();
        self.sin_angle = (1.0 - self.cos_angle * self.cos_angle).sqrt();
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn far_clip(&self) -> f32 {
        self.far_clip
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Does a sphere at `relative_position` (already relative to the cone
    /// apex, with `distance` its length) touch the cone or the central
    /// sphere?
    pub fn intersects(&self, relative_position: Vec3, distance: f32, radius: f32) -> bool {
        if distance < self.radius + radius {
            // inside the central sphere
            return true;
        }
        if distance > self.far_clip + radius {
            // past the far clip
            return false;
        }
        // spheres included in the cone satisfy
        //   dot(p, d) > sqrt(|p|^2 - r^2) cos(a) - r sin(a)
        relative_position.dot(self.direction)
            > (distance * distance - radius * radius).sqrt() * self.cos_angle
                - radius * self.sin_angle
    }

    pub fn intersects_aacube(&self, cube: &AACube) -> bool {
        // bounding sphere of the cube
        let radius = 0.5 * SQRT_THREE * cube.scale;
        let relative_position = cube.center() - self.position;
        let distance = relative_position.length();
        self.intersects(relative_position, distance, radius)
    }

    pub fn intersects_aabox(&self, aabox: &AABox) -> bool {
        // bounding sphere of the box
        let radius = 0.5 * aabox.scale.length();
        let relative_position = aabox.center() - self.position;
        let distance = relative_position.length();
        self.intersects(relative_position, distance, radius)
    }

    pub fn is_very_similar(&self, other: &ConicalViewFrustum) -> bool {
        const MIN_POSITION_SLOP_SQUARED: f32 = 0.01; // 10 centimeters squared
        const MIN_ANGLE_BETWEEN: f32 = 0.174533; // 10 degrees in radians
        const MIN_RELATIVE_ERROR: f32 = 0.01; // 1%

        self.position.distance_squared(other.position) < MIN_POSITION_SLOP_SQUARED
            && util::angle_between(self.direction, other.direction) < MIN_ANGLE_BETWEEN
            && util::close_enough(self.angle, other.angle, MIN_RELATIVE_ERROR)
            && util::close_enough(self.far_clip, other.far_clip, MIN_RELATIVE_ERROR)
            && util::close_enough(self.radius, other.radius, MIN_RELATIVE_ERROR)
    }
}

// the cached sin/cos stay off the wire and get rebuilt on arrival
#[derive(Serialize, Deserialize)]
struct WireConicalFrustum {
    position: Vec3,
    direction: Vec3,
    angle: f32,
    far_clip: f32,
    radius: f32,
}

impl From<WireConicalFrustum> for ConicalViewFrustum {
    fn from(wire: WireConicalFrustum) -> ConicalViewFrustum {
        let mut frustum = ConicalViewFrustum {
            position: wire.position,
            direction: wire.direction,
            angle: wire.angle,
            far_clip: wire.far_clip,
            radius: wire.radius,
            sin_angle: 0.0,
            cos_angle: 0.0,
        };
        frustum.calculate();
        frustum
    }
}

impl From<ConicalViewFrustum> for WireConicalFrustum {
    fn from(frustum: ConicalViewFrustum) -> WireConicalFrustum {
        WireConicalFrustum {
            position: frustum.position,
            direction: frustum.direction,
            angle: frustum.angle,
            far_clip: frustum.far_clip,
            radius: frustum.radius,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Quat;

    fn cone_down_z() -> ConicalViewFrustum {
        let mut frustum = ViewFrustum::new();
        frustum.set_position(Vec3::ZERO);
        frustum.set_orientation(Quat::IDENTITY);
        frustum.set_perspective(45.0, 1.0, 0.1, 100.0);
        frustum.calculate();
        ConicalViewFrustum::from_view_frustum(&frustum)
    }

    #[test]
    fn test_cone_contains_far_corners() {
        let cone = cone_down_z();
        // the diagonal half angle of a square 45 degree frustum is
        // atan(sqrt(2) * tan(22.5 degrees))
        let expected = (2.0_f32.sqrt() * 22.5_f32.to_radians().tan()).atan();
        assert!((cone.angle() - expected).abs() < 0.01);
        assert!((cone.far_clip() - 100.0).abs() < 0.1);
        assert!((cone.radius() - 3.0).abs() < 0.001);
        assert!(cone.direction().abs_diff_eq(-Vec3::Z, 0.001));
    }

    #[test]
    fn test_sphere_intersections() {
        let cone = cone_down_z();

        // behind the viewer but inside the central sphere
        let relative = Vec3::new(0.0, 0.0, 2.0);
        assert!(cone.intersects(relative, relative.length(), 0.5));

        // straight ahead
        let relative = Vec3::new(0.0, 0.0, -50.0);
        assert!(cone.intersects(relative, relative.length(), 1.0));

        // far off axis
        let relative = Vec3::new(50.0, 0.0, -10.0);
        assert!(!cone.intersects(relative, relative.length(), 1.0));

        // past the far clip
        let relative = Vec3::new(0.0, 0.0, -150.0);
        assert!(!cone.intersects(relative, relative.length(), 1.0));
    }

    #[test]
    fn test_cone_never_culls_what_the_frustum_keeps() {
        let mut frustum = ViewFrustum::new();
        frustum.set_position(Vec3::ZERO);
        frustum.set_orientation(Quat::IDENTITY);
        frustum.set_perspective(45.0, 1.0, 0.1, 100.0);
        frustum.calculate();
        let cone = ConicalViewFrustum::from_view_frustum(&frustum);

        let visible = AACube::new(Vec3::new(-0.5, -0.5, -10.5), 1.0);
        let straddling = AACube::new(Vec3::new(-5.0, -0.5, -10.5), 1.0);
        assert!(cone.intersects_aacube(&visible));
        assert!(cone.intersects_aacube(&straddling));
        assert!(cone.intersects_aabox(&straddling.bounds()));

        let outside = AACube::new(Vec3::new(-20.0, -0.5, -10.5), 1.0);
        assert!(!cone.intersects_aacube(&outside));
    }

    #[test]
    fn test_is_very_similar() {
        let cone = cone_down_z();
        let mut nudged = cone;
        nudged.position += Vec3::splat(0.05);
        assert!(cone.is_very_similar(&nudged));

        let mut moved = cone;
        moved.position += Vec3::new(1.0, 0.0, 0.0);
        assert!(!cone.is_very_similar(&moved));

        let mut widened = cone;
        widened.angle *= 1.1;
        widened.calculate();
        assert!(!cone.is_very_similar(&widened));
    }

    #[test]
    fn test_serde_rebuilds_cached_trig() {
        let cone = cone_down_z();
        let encoded = serde_json::to_string(&cone).unwrap();
        let decoded: ConicalViewFrustum = serde_json::from_str(&encoded).unwrap();
        assert_eq!(cone, decoded);
        // the cached terms came back through calculate, not the wire
        let relative = Vec3::new(0.0, 0.0, -50.0);
        assert!(decoded.intersects(relative, relative.length(), 1.0));
    }
}
