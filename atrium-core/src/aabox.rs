use glam::{Mat4, Quat, Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::aacube::AACube;
use crate::geometry;
use crate::transform::Transform;
use crate::EPSILON;

pub const FACE_COUNT: usize = 6;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoxFace {
    MinX,
    MaxX,
    MinY,
    MaxY,
    MinZ,
    MaxZ,
}

impl BoxFace {
    pub fn index(&self) -> usize {
        *self as usize
    }

    // faces are paired per axis: 2 * axis for min, 2 * axis + 1 for max
    pub fn from_index(index: usize) -> BoxFace {
        match index {
            0 => BoxFace::MinX,
            1 => BoxFace::MaxX,
            2 => BoxFace::MinY,
            3 => BoxFace::MaxY,
            4 => BoxFace::MinZ,
            _ => BoxFace::MaxZ,
        }
    }

    pub fn opposite(&self) -> BoxFace {
        match self {
            BoxFace::MinX => BoxFace::MaxX,
            BoxFace::MaxX => BoxFace::MinX,
            BoxFace::MinY => BoxFace::MaxY,
            BoxFace::MaxY => BoxFace::MinY,
            BoxFace::MinZ => BoxFace::MaxZ,
            BoxFace::MaxZ => BoxFace::MinZ,
        }
    }
}

// corner offsets named from a camera at negative z: near is the low z face,
// right is the low x side
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BoxVertex {
    BottomLeftNear = 0,
    BottomRightNear = 1,
    TopRightNear = 2,
    TopLeftNear = 3,
    BottomLeftFar = 4,
    BottomRightFar = 5,
    TopRightFar = 6,
    TopLeftFar = 7,
}

pub const BOX_VERTICES: [BoxVertex; 8] = [
    BoxVertex::BottomLeftNear,
    BoxVertex::BottomRightNear,
    BoxVertex::TopRightNear,
    BoxVertex::TopLeftNear,
    BoxVertex::BottomLeftFar,
    BoxVertex::BottomRightFar,
    BoxVertex::TopRightFar,
    BoxVertex::TopLeftFar,
];

/// Axis-aligned box stored as its minimum corner plus per-axis dimensions.
/// The default box is invalid (corner at infinity, zero scale), so that
/// accumulating points into it starts from nothing.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AABox {
    pub corner: Vec3,
    pub scale: Vec3,
}

impl Default for AABox {
    fn default() -> Self {
        AABox {
            corner: Vec3::splat(f32::INFINITY),
            scale: Vec3::ZERO,
        }
    }
}

fn is_within(value: f32, corner: f32, size: f32) -> bool {
    value >= corner && value <= corner + size
}

// intersection of a ray with the facing plane on one axis
fn find_intersection(origin: f32, direction: f32, corner: f32, size: f32) -> Option<f32> {
    if direction > EPSILON {
        Some((corner - origin) / direction)
    } else if direction < -EPSILON {
        Some((corner + size - origin) / direction)
    } else {
        None
    }
}

// intersection of a ray with the inside facing plane on one axis
fn find_inside_out_intersection(origin: f32, direction: f32, corner: f32, size: f32) -> Option<f32> {
    if direction > EPSILON {
        Some((corner + size - origin) / direction)
    } else if direction < -EPSILON {
        Some((corner - origin) / direction)
    } else {
        None
    }
}

impl AABox {
    pub fn new(corner: Vec3, dimensions: Vec3) -> AABox {
        AABox {
            corner,
            scale: dimensions,
        }
    }

    pub fn from_corner_and_size(corner: Vec3, size: f32) -> AABox {
        AABox {
            corner,
            scale: Vec3::splat(size),
        }
    }

    pub fn from_sphere(center: Vec3, radius: f32) -> AABox {
        AABox {
            corner: center - Vec3::splat(radius),
            scale: Vec3::splat(radius * 2.0),
        }
    }

    pub fn is_invalid(&self) -> bool {
        self.corner.x == f32::INFINITY
    }

    pub fn center(&self) -> Vec3 {
        self.corner + self.scale * 0.5
    }

    pub fn minimum(&self) -> Vec3 {
        self.corner
    }

    pub fn maximum(&self) -> Vec3 {
        self.corner + self.scale
    }

    pub fn dimensions(&self) -> Vec3 {
        self.scale
    }

    pub fn largest_dimension(&self) -> f32 {
        self.scale.max_element()
    }

    pub fn vertex(&self, vertex: BoxVertex) -> Vec3 {
        let s = self.scale;
        self.corner
            + match vertex {
                BoxVertex::BottomLeftNear => Vec3::new(s.x, 0.0, 0.0),
                BoxVertex::BottomRightNear => Vec3::ZERO,
                BoxVertex::TopRightNear => Vec3::new(0.0, s.y, 0.0),
                BoxVertex::TopLeftNear => Vec3::new(s.x, s.y, 0.0),
                BoxVertex::BottomLeftFar => Vec3::new(s.x, 0.0, s.z),
                BoxVertex::BottomRightFar => Vec3::new(0.0, 0.0, s.z),
                BoxVertex::TopRightFar => Vec3::new(0.0, s.y, s.z),
                BoxVertex::TopLeftFar => s,
            }
    }

    pub fn vertices(&self) -> [Vec3; 8] {
        BOX_VERTICES.map(|v| self.vertex(v))
    }

    /// Support point: the vertex farthest along the given direction.
    pub fn farthest_vertex(&self, direction: Vec3) -> Vec3 {
        let mut result = self.corner;
        if direction.x > 0.0 {
            result.x += self.scale.x;
        }
        if direction.y > 0.0 {
            result.y += self.scale.y;
        }
        if direction.z > 0.0 {
            result.z += self.scale.z;
        }
        result
    }

    /// Support point: the vertex nearest along the given direction.
    pub fn nearest_vertex(&self, direction: Vec3) -> Vec3 {
        let mut result = self.corner;
        if direction.x < 0.0 {
            result.x += self.scale.x;
        }
        if direction.y < 0.0 {
            result.y += self.scale.y;
        }
        if direction.z < 0.0 {
            result.z += self.scale.z;
        }
        result
    }

    pub fn contains(&self, point: Vec3) -> bool {
        is_within(point.x, self.corner.x, self.scale.x)
            && is_within(point.y, self.corner.y, self.scale.y)
            && is_within(point.z, self.corner.z, self.scale.z)
    }

    pub fn contains_box(&self, other: &AABox) -> bool {
        self.contains(other.minimum()) && self.contains(other.maximum())
    }

    pub fn expanded_contains(&self, point: Vec3, expansion: f32) -> bool {
        is_within(point.x, self.corner.x - expansion, self.scale.x + expansion * 2.0)
            && is_within(point.y, self.corner.y - expansion, self.scale.y + expansion * 2.0)
            && is_within(point.z, self.corner.z - expansion, self.scale.z + expansion * 2.0)
    }

    /// Closed-interval overlap test; boxes sharing a face count as touching.
    pub fn touches(&self, other: &AABox) -> bool {
        let relative_center = self.corner - other.corner + (self.scale - other.scale) * 0.5;
        let total_half_scale = (self.scale + other.scale) * 0.5;
        relative_center.x.abs() <= total_half_scale.x
            && relative_center.y.abs() <= total_half_scale.y
            && relative_center.z.abs() <= total_half_scale.z
    }

    pub fn expanded_intersects_segment(&self, start: Vec3, end: Vec3, expansion: f32) -> bool {
        // trivial cases, where the expanded box contains an endpoint
        if self.expanded_contains(start, expansion) || self.expanded_contains(end, expansion) {
            return true;
        }
        let corner = self.corner - Vec3::splat(expansion);
        let size = self.scale + Vec3::splat(expansion) * 2.0;
        let direction = end - start;

        let test_axis = |axis: usize, other1: usize, other2: usize| -> bool {
            match find_intersection(start[axis], direction[axis], corner[axis], size[axis]) {
                Some(t) => {
                    (0.0..=1.0).contains(&t)
                        && is_within(start[other1] + t * direction[other1], corner[other1], size[other1])
                        && is_within(start[other2] + t * direction[other2], corner[other2], size[other2])
                }
                None => false,
            }
        };
        test_axis(0, 1, 2) || test_axis(1, 0, 2) || test_axis(2, 1, 0)
    }

    /// Ray vs box. Starting inside reports the exit face and a normal that
    /// points along the ray's travel, so callers can treat the hit as the
    /// surface being looked at from within.
    pub fn find_ray_intersection(
        &self,
        origin: Vec3,
        direction: Vec3,
    ) -> Option<(f32, BoxFace, Vec3)> {
        if self.contains(origin) {
            // still report the distance out to the inside face
            for axis in 0..3 {
                let (other1, other2) = ((axis + 1) % 3, (axis + 2) % 3);
                if let Some(t) = find_inside_out_intersection(
                    origin[axis],
                    direction[axis],
                    self.corner[axis],
                    self.scale[axis],
                ) {
                    if t >= 0.0
                        && is_within(
                            origin[other1] + t * direction[other1],
                            self.corner[other1],
                            self.scale[other1],
                        )
                        && is_within(
                            origin[other2] + t * direction[other2],
                            self.corner[other2],
                            self.scale[other2],
                        )
                    {
                        let positive = direction[axis] > 0.0;
                        let face = BoxFace::from_index(2 * axis + positive as usize);
                        let mut normal = Vec3::ZERO;
                        normal[axis] = if positive { 1.0 } else { -1.0 };
                        return Some((t, face, normal));
                    }
                }
            }
            // unexpected, but a contained origin always counts as a hit
            return Some((0.0, BoxFace::MinX, Vec3::ZERO));
        }

        for axis in 0..3 {
            let (other1, other2) = ((axis + 1) % 3, (axis + 2) % 3);
            if let Some(t) = find_intersection(
                origin[axis],
                direction[axis],
                self.corner[axis],
                self.scale[axis],
            ) {
                if t >= 0.0
                    && is_within(
                        origin[other1] + t * direction[other1],
                        self.corner[other1],
                        self.scale[other1],
                    )
                    && is_within(
                        origin[other2] + t * direction[other2],
                        self.corner[other2],
                        self.scale[other2],
                    )
                {
                    let positive = direction[axis] > 0.0;
                    let face = BoxFace::from_index(2 * axis + !positive as usize);
                    let mut normal = Vec3::ZERO;
                    normal[axis] = if positive { -1.0 } else { 1.0 };
                    return Some((t, face, normal));
                }
            }
        }
        None
    }

    pub fn touches_sphere(&self, center: Vec3, radius: f32) -> bool {
        // Arvo's algorithm: https://www.mrtc.mdh.se/projects/3Dgraphics/paperF.pdf
        let e = (self.corner - center).max(Vec3::ZERO)
            + (center - self.corner - self.scale).max(Vec3::ZERO);
        e.length_squared() <= radius * radius
    }

    pub fn find_sphere_penetration(&self, center: Vec3, radius: f32) -> Option<Vec3> {
        let mut min_penetration_length = f32::MAX;
        let mut penetration = Vec3::ZERO;
        for i in 0..FACE_COUNT {
            let face = BoxFace::from_index(i);
            let face_plane = self.face_plane(face);
            let vector = self.closest_point_on_face(center, face) - center;
            if face_plane.dot(center.extend(1.0)) >= 0.0 {
                // outside this face, so use the vector to the closest point
                return geometry::sphere_penetration(vector, -face_plane.truncate(), radius);
            }
            let vector_length = vector.length();
            if vector_length < min_penetration_length {
                // remember the smallest penetration in case we are inside all faces
                penetration = if vector_length < EPSILON {
                    -face_plane.truncate() * radius
                } else {
                    vector * ((vector_length + radius) / -vector_length)
                };
                min_penetration_length = vector_length;
            }
        }
        Some(penetration)
    }

    pub fn find_capsule_penetration(&self, start: Vec3, end: Vec3, radius: f32) -> Option<Vec3> {
        let start_to_end = end - start;
        let mut min_penetration_length = f32::MAX;
        let mut penetration = Vec3::ZERO;
        for i in 0..FACE_COUNT {
            let face = BoxFace::from_index(i);
            let face_plane = self.face_plane(face);
            // vector from the segment to the closest point on the face, starting from the deeper end
            let closest = if face_plane.dot(start.extend(1.0)) <= face_plane.dot(end.extend(1.0)) {
                self.closest_point_on_face_toward(start, start_to_end, face)
            } else {
                self.closest_point_on_face_toward(end, -start_to_end, face)
            };
            let vector = -geometry::point_to_segment_vector(closest, start, end);
            if vector.dot(face_plane.truncate()) < 0.0 {
                // outside this face, so use the vector to the closest point
                return geometry::sphere_penetration(vector, -face_plane.truncate(), radius);
            }
            let vector_length = vector.length();
            if vector_length < min_penetration_length {
                penetration = if vector_length < EPSILON {
                    -face_plane.truncate() * radius
                } else {
                    vector * ((vector_length + radius) / -vector_length)
                };
                min_penetration_length = vector_length;
            }
        }
        Some(penetration)
    }

    pub fn closest_point_on_face(&self, point: Vec3, face: BoxFace) -> Vec3 {
        let min = self.minimum();
        let max = self.maximum();
        let (face_min, face_max) = match face {
            BoxFace::MinX => (min, Vec3::new(min.x, max.y, max.z)),
            BoxFace::MaxX => (Vec3::new(max.x, min.y, min.z), max),
            BoxFace::MinY => (min, Vec3::new(max.x, min.y, max.z)),
            BoxFace::MaxY => (Vec3::new(min.x, max.y, min.z), max),
            BoxFace::MinZ => (min, Vec3::new(max.x, max.y, min.z)),
            BoxFace::MaxZ => (Vec3::new(min.x, min.y, max.z), max),
        };
        point.clamp(face_min, face_max)
    }

    // closest point on the face toward a segment (origin plus sweep), used by
    // the capsule test to pick a representative point on the border
    fn closest_point_on_face_toward(&self, origin: Vec3, direction: Vec3, face: BoxFace) -> Vec3 {
        let origin4 = origin.extend(1.0);
        let direction4 = direction.extend(0.0);
        let opposite = face.opposite();
        let mut any_outside = false;
        'candidates: for i in 0..FACE_COUNT {
            let i_face = BoxFace::from_index(i);
            if i_face == face || i_face == opposite {
                continue;
            }
            let i_plane = self.face_plane(i_face);
            let origin_distance = origin4.dot(i_plane);
            if origin_distance < 0.0 {
                continue; // inside this border
            }
            any_outside = true;
            let divisor = direction4.dot(i_plane);
            if divisor.abs() < EPSILON {
                continue; // segment is parallel to the border plane
            }
            // find the intersection and make sure it lies within the face bounds
            let directional_distance = -origin_distance / divisor;
            let intersection = origin4 + direction4 * directional_distance;
            let i_opposite = i_face.opposite();
            for j in 0..FACE_COUNT {
                let j_face = BoxFace::from_index(j);
                if j_face == face || j_face == opposite || j_face == i_face || j_face == i_opposite
                {
                    continue;
                }
                if intersection.dot(self.face_plane(j_face)) > 0.0 {
                    continue 'candidates; // out of bounds
                }
            }
            return self.closest_point_on_face(intersection.truncate(), face);
        }

        if any_outside {
            // outside some side, so check against the face diagonals
            let face_axis = face.index() / 2;
            let second_axis = (face_axis + 1) % 3;
            let third_axis = (face_axis + 2) % 3;

            let second_min = self.face_plane(BoxFace::from_index(second_axis * 2));
            let second_max = self.face_plane(BoxFace::from_index(second_axis * 2 + 1));
            let third_max = self.face_plane(BoxFace::from_index(third_axis * 2 + 1));

            let offset = Vec4::new(
                0.0,
                0.0,
                0.0,
                (second_max + third_max).truncate().dot(self.scale) * 0.5,
            );
            let diagonals = [
                second_min + third_max + offset,
                second_max + third_max + offset,
            ];

            let mut min_distance = f32::MAX;
            for diagonal in diagonals {
                let divisor = direction4.dot(diagonal);
                if divisor.abs() < EPSILON {
                    continue;
                }
                min_distance = (-origin4.dot(diagonal) / divisor).min(min_distance);
            }
            if min_distance != f32::MAX {
                return self
                    .closest_point_on_face((origin4 + direction4 * min_distance).truncate(), face);
            }
        }

        // all inside, or nothing better: clamp the origin to the face
        self.closest_point_on_face(origin, face)
    }

    /// Face plane as coefficients with the unit normal pointing out of the box.
    pub fn face_plane(&self, face: BoxFace) -> Vec4 {
        let min = self.minimum();
        let max = self.maximum();
        match face {
            BoxFace::MinX => Vec4::new(-1.0, 0.0, 0.0, min.x),
            BoxFace::MaxX => Vec4::new(1.0, 0.0, 0.0, -max.x),
            BoxFace::MinY => Vec4::new(0.0, -1.0, 0.0, min.y),
            BoxFace::MaxY => Vec4::new(0.0, 1.0, 0.0, -max.y),
            BoxFace::MinZ => Vec4::new(0.0, 0.0, -1.0, min.z),
            BoxFace::MaxZ => Vec4::new(0.0, 0.0, 1.0, -max.z),
        }
    }

    pub fn clamp_to(&self, min: Vec3, max: Vec3) -> AABox {
        let clamped_corner = self.corner.clamp(min, max);
        let clamped_top = self.maximum().clamp(min, max);
        AABox {
            corner: clamped_corner,
            scale: clamped_top - clamped_corner,
        }
    }

    /// Multiply the scale by `factor`, pulling the corner back by half the
    /// original scale times `factor`, so the old corner sits at the center
    /// of the grown box.
    pub fn embiggen(&mut self, factor: f32) {
        self.corner += factor * (-0.5 * self.scale);
        self.scale *= factor;
    }

    pub fn embiggen_by(&mut self, factor: Vec3) {
        self.corner += factor * (-0.5 * self.scale);
        self.scale *= factor;
    }

    pub fn scale_by(&mut self, scale: Vec3) {
        self.corner *= scale;
        self.scale *= scale;
    }

    /// Replace the box with the axis-aligned bounds of its rotated corners.
    pub fn rotate(&mut self, rotation: Quat) {
        let mut minimum = Vec3::splat(f32::MAX);
        let mut maximum = Vec3::splat(f32::MIN);
        for vertex in self.vertices() {
            let rotated = rotation * vertex;
            minimum = minimum.min(rotated);
            maximum = maximum.max(rotated);
        }
        self.corner = minimum;
        self.scale = maximum - minimum;
    }

    pub fn translate(&mut self, translation: Vec3) {
        self.corner += translation;
    }

    // scale, then rotate, then translate
    pub fn transform(&mut self, transform: &Transform) {
        self.scale_by(transform.scale);
        self.rotate(transform.rotation);
        self.translate(transform.translation);
    }

    pub fn transform_by_matrix(&mut self, matrix: &Mat4) {
        let mut minimum = Vec3::splat(f32::MAX);
        let mut maximum = Vec3::splat(f32::MIN);
        for vertex in self.vertices() {
            let transformed = matrix.transform_point3(vertex);
            minimum = minimum.min(transformed);
            maximum = maximum.max(transformed);
        }
        self.corner = minimum;
        self.scale = maximum - minimum;
    }

    pub fn add_point(&mut self, point: Vec3) {
        if self.is_invalid() {
            self.corner = self.corner.min(point);
        } else {
            let maximum = self.maximum().max(point);
            self.corner = self.corner.min(point);
            self.scale = maximum - self.corner;
        }
    }

    pub fn add_box(&mut self, other: &AABox) {
        if !other.is_invalid() {
            self.add_point(other.minimum());
            self.add_point(other.maximum());
        }
    }

    /// Smallest cube sharing the box's center and containing it.
    pub fn bounding_cube(&self) -> AACube {
        let size = self.largest_dimension();
        AACube::new(self.center() - Vec3::splat(size * 0.5), size)
    }
}

impl From<AACube> for AABox {
    fn from(cube: AACube) -> AABox {
        AABox {
            corner: cube.corner,
            scale: Vec3::splat(cube.scale),
        }
    }
}

impl std::ops::AddAssign<Vec3> for AABox {
    fn add_assign(&mut self, point: Vec3) {
        self.add_point(point);
    }
}

impl std::ops::AddAssign<AABox> for AABox {
    fn add_assign(&mut self, other: AABox) {
        self.add_box(&other);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_box() -> AABox {
        AABox::new(Vec3::ZERO, Vec3::ONE)
    }

    #[test]
    fn test_accumulation_from_invalid() {
        let mut bounds = AABox::default();
        assert!(bounds.is_invalid());

        bounds += Vec3::new(1.0, 2.0, 3.0);
        assert!(!bounds.is_invalid());
        assert!(bounds.corner.abs_diff_eq(Vec3::new(1.0, 2.0, 3.0), 0.001));
        assert!(bounds.scale.abs_diff_eq(Vec3::ZERO, 0.001));

        bounds += Vec3::new(-1.0, 0.0, 5.0);
        assert!(bounds.corner.abs_diff_eq(Vec3::new(-1.0, 0.0, 3.0), 0.001));
        assert!(bounds.maximum().abs_diff_eq(Vec3::new(1.0, 2.0, 5.0), 0.001));

        // merging an invalid box changes nothing
        bounds += AABox::default();
        assert!(bounds.maximum().abs_diff_eq(Vec3::new(1.0, 2.0, 5.0), 0.001));
    }

    #[test]
    fn test_contains_and_touches() {
        let a = unit_box();
        assert!(a.contains(Vec3::splat(0.5)));
        assert!(a.contains(Vec3::ZERO)); // closed interval
        assert!(!a.contains(Vec3::new(0.5, 1.5, 0.5)));

        let b = AABox::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ONE);
        assert!(a.touches(&b)); // shared face counts
        let c = AABox::new(Vec3::new(1.1, 0.0, 0.0), Vec3::ONE);
        assert!(!a.touches(&c));

        assert!(a.contains_box(&AABox::new(Vec3::splat(0.25), Vec3::splat(0.5))));
        assert!(!a.contains_box(&b));
    }

    #[test]
    fn test_expanded_contains_segment() {
        let a = unit_box();
        // passes through the middle
        assert!(a.expanded_intersects_segment(
            Vec3::new(-1.0, 0.5, 0.5),
            Vec3::new(2.0, 0.5, 0.5),
            0.0
        ));
        // fully inside
        assert!(a.expanded_intersects_segment(Vec3::splat(0.25), Vec3::splat(0.75), 0.0));
        // passes near but outside, until expanded
        let start = Vec3::new(-1.0, 1.25, 0.5);
        let end = Vec3::new(2.0, 1.25, 0.5);
        assert!(!a.expanded_intersects_segment(start, end, 0.0));
        assert!(a.expanded_intersects_segment(start, end, 0.5));
    }

    #[test]
    fn test_ray_intersection_outside_in() {
        let a = unit_box();
        let (distance, face, normal) = a
            .find_ray_intersection(Vec3::new(-2.0, 0.5, 0.5), Vec3::X)
            .unwrap();
        assert!((distance - 2.0).abs() < 0.001);
        assert_eq!(face, BoxFace::MinX);
        assert!(normal.abs_diff_eq(-Vec3::X, 0.001));

        // miss
        assert!(a
            .find_ray_intersection(Vec3::new(-2.0, 5.0, 0.5), Vec3::X)
            .is_none());
        // pointing away
        assert!(a
            .find_ray_intersection(Vec3::new(-2.0, 0.5, 0.5), -Vec3::X)
            .is_none());
    }

    #[test]
    fn test_ray_intersection_inside_out() {
        let a = unit_box();
        let (distance, face, normal) = a
            .find_ray_intersection(Vec3::splat(0.5), Vec3::X)
            .unwrap();
        assert!((distance - 0.5).abs() < 0.001);
        assert_eq!(face, BoxFace::MaxX);
        assert!(normal.abs_diff_eq(Vec3::X, 0.001));
    }

    #[test]
    fn test_touches_sphere() {
        let a = unit_box();
        assert!(a.touches_sphere(Vec3::splat(0.5), 0.1)); // inside
        assert!(a.touches_sphere(Vec3::new(2.0, 0.5, 0.5), 1.0)); // tangent
        assert!(!a.touches_sphere(Vec3::new(2.0, 0.5, 0.5), 0.9));
    }

    #[test]
    fn test_sphere_penetration() {
        let a = unit_box();
        // sphere poking through the max x face from outside; the result moves
        // the surface point out of the sphere
        let penetration = a
            .find_sphere_penetration(Vec3::new(1.4, 0.5, 0.5), 0.5)
            .unwrap();
        assert!(penetration.abs_diff_eq(Vec3::new(-0.1, 0.0, 0.0), 0.001));

        // far away sphere does not penetrate
        assert!(a
            .find_sphere_penetration(Vec3::new(5.0, 0.5, 0.5), 0.5)
            .is_none());
    }

    #[test]
    fn test_capsule_penetration() {
        let a = unit_box();
        let penetration = a
            .find_capsule_penetration(
                Vec3::new(1.4, -1.0, 0.5),
                Vec3::new(1.4, 2.0, 0.5),
                0.5,
            )
            .unwrap();
        assert!(penetration.abs_diff_eq(Vec3::new(-0.1, 0.0, 0.0), 0.001));
    }

    #[test]
    fn test_face_geometry() {
        let a = AABox::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(2.0, 2.0, 2.0));
        let plane = a.face_plane(BoxFace::MaxX);
        // a point on the face sits at zero distance
        assert!((plane.dot(Vec4::new(3.0, 3.0, 4.0, 1.0))).abs() < 0.001);
        assert_eq!(BoxFace::MaxX.opposite(), BoxFace::MinX);

        let closest = a.closest_point_on_face(Vec3::new(10.0, 10.0, 4.0), BoxFace::MaxX);
        assert!(closest.abs_diff_eq(Vec3::new(3.0, 4.0, 4.0), 0.001));
    }

    #[test]
    fn test_support_vertices() {
        let a = unit_box();
        assert!(a
            .farthest_vertex(Vec3::new(1.0, 1.0, -1.0))
            .abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 0.001));
        assert!(a
            .nearest_vertex(Vec3::new(1.0, 1.0, -1.0))
            .abs_diff_eq(Vec3::new(0.0, 0.0, 1.0), 0.001));
    }

    #[test]
    fn test_geometry_edits() {
        let mut a = AABox::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::splat(2.0));
        a.embiggen(2.0);
        // the corner moves back by factor * scale / 2 and becomes the center
        assert!(a.corner.abs_diff_eq(Vec3::splat(-3.0), 0.001));
        assert!(a.scale.abs_diff_eq(Vec3::splat(4.0), 0.001));
        assert!(a.center().abs_diff_eq(Vec3::splat(-1.0), 0.001));

        let clamped = a.clamp_to(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!(clamped.corner.abs_diff_eq(Vec3::splat(-1.0), 0.001));
        assert!(clamped.scale.abs_diff_eq(Vec3::splat(2.0), 0.001));

        // a quarter turn about y leaves an axis-aligned cube's bounds alone
        let mut b = AABox::new(Vec3::splat(-1.0), Vec3::splat(2.0));
        b.rotate(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
        assert!(b.corner.abs_diff_eq(Vec3::splat(-1.0), 0.001));
        assert!(b.scale.abs_diff_eq(Vec3::splat(2.0), 0.001));
    }

    #[test]
    fn test_transform_order() {
        // scale then rotate then translate
        let mut a = AABox::new(Vec3::ZERO, Vec3::ONE);
        let transform = Transform {
            translation: Vec3::new(10.0, 0.0, 0.0),
            rotation: Quat::from_rotation_z(std::f32::consts::PI),
            scale: Vec3::splat(2.0),
        };
        a.transform(&transform);
        assert!(a.corner.abs_diff_eq(Vec3::new(8.0, -2.0, 0.0), 0.001));
        assert!(a.scale.abs_diff_eq(Vec3::new(2.0, 2.0, 2.0), 0.001));
    }
}
