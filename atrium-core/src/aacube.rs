use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::aabox::{AABox, BoxFace, BoxVertex};

/// Axis-aligned cube: minimum corner plus a single scalar edge length. The
/// octree element shape; most queries delegate to the equivalent box.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AACube {
    pub corner: Vec3,
    pub scale: f32,
}

impl Default for AACube {
    fn default() -> Self {
        AACube {
            corner: Vec3::splat(f32::INFINITY),
            scale: 0.0,
        }
    }
}

impl AACube {
    pub fn new(corner: Vec3, scale: f32) -> AACube {
        AACube { corner, scale }
    }

    /// The smallest cube sharing the box's center that contains it.
    pub fn containing(box_: &AABox) -> AACube {
        box_.bounding_cube()
    }

    pub fn is_invalid(&self) -> bool {
        self.corner.x == f32::INFINITY
    }

    pub fn bounds(&self) -> AABox {
        AABox::new(self.corner, Vec3::splat(self.scale))
    }

    pub fn center(&self) -> Vec3 {
        self.corner + Vec3::splat(self.scale * 0.5)
    }

    pub fn minimum(&self) -> Vec3 {
        self.corner
    }

    pub fn maximum(&self) -> Vec3 {
        self.corner + Vec3::splat(self.scale)
    }

    pub fn dimensions(&self) -> Vec3 {
        Vec3::splat(self.scale)
    }

    pub fn vertex(&self, vertex: BoxVertex) -> Vec3 {
        self.bounds().vertex(vertex)
    }

    pub fn farthest_vertex(&self, direction: Vec3) -> Vec3 {
        self.bounds().farthest_vertex(direction)
    }

    pub fn nearest_vertex(&self, direction: Vec3) -> Vec3 {
        self.bounds().nearest_vertex(direction)
    }

    pub fn contains(&self, point: Vec3) -> bool {
        self.bounds().contains(point)
    }

    pub fn contains_cube(&self, other: &AACube) -> bool {
        self.bounds().contains_box(&other.bounds())
    }

    pub fn contains_box(&self, other: &AABox) -> bool {
        self.bounds().contains_box(other)
    }

    pub fn touches_cube(&self, other: &AACube) -> bool {
        self.bounds().touches(&other.bounds())
    }

    pub fn touches_box(&self, other: &AABox) -> bool {
        self.bounds().touches(other)
    }

    pub fn expanded_contains(&self, point: Vec3, expansion: f32) -> bool {
        self.bounds().expanded_contains(point, expansion)
    }

    pub fn expanded_intersects_segment(&self, start: Vec3, end: Vec3, expansion: f32) -> bool {
        self.bounds().expanded_intersects_segment(start, end, expansion)
    }

    pub fn find_ray_intersection(
        &self,
        origin: Vec3,
        direction: Vec3,
    ) -> Option<(f32, BoxFace, Vec3)> {
        self.bounds().find_ray_intersection(origin, direction)
    }

    pub fn touches_sphere(&self, center: Vec3, radius: f32) -> bool {
        self.bounds().touches_sphere(center, radius)
    }

    pub fn find_sphere_penetration(&self, center: Vec3, radius: f32) -> Option<Vec3> {
        self.bounds().find_sphere_penetration(center, radius)
    }

    pub fn find_capsule_penetration(&self, start: Vec3, end: Vec3, radius: f32) -> Option<Vec3> {
        self.bounds().find_capsule_penetration(start, end, radius)
    }

    pub fn face_plane(&self, face: BoxFace) -> Vec4 {
        self.bounds().face_plane(face)
    }
}

impl From<AABox> for AACube {
    fn from(box_: AABox) -> AACube {
        box_.bounding_cube()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_containing_cube_of_box() {
        let long_box = AABox::new(Vec3::ZERO, Vec3::new(4.0, 1.0, 2.0));
        let cube = AACube::containing(&long_box);
        assert!((cube.scale - 4.0).abs() < 0.001);
        assert!(cube.center().abs_diff_eq(long_box.center(), 0.001));
        assert!(cube.contains_box(&long_box));
    }

    #[test]
    fn test_cube_queries_match_box_queries() {
        let cube = AACube::new(Vec3::splat(-1.0), 2.0);
        assert!(cube.contains(Vec3::ZERO));
        assert!(cube.touches_sphere(Vec3::new(2.0, 0.0, 0.0), 1.0));

        let (distance, face, _) = cube
            .find_ray_intersection(Vec3::new(-3.0, 0.0, 0.0), Vec3::X)
            .unwrap();
        assert!((distance - 2.0).abs() < 0.001);
        assert_eq!(face, BoxFace::MinX);
    }

    #[test]
    fn test_default_is_invalid() {
        assert!(AACube::default().is_invalid());
        assert!(!AACube::new(Vec3::ZERO, 1.0).is_invalid());
    }
}
