use glam::Vec3;

use crate::aabox::AABox;
use crate::geometry::{self, Triangle};

const MAX_DEPTH: usize = 4;
const MAX_CHILDREN: usize = 8;

/// Nearest triangle hit along a ray.
#[derive(Copy, Clone, Debug)]
pub struct TriangleHit {
    pub distance: f32,
    pub normal: Vec3,
    pub triangle_index: usize,
}

// child index bits select the high half per axis: 1 = x, 2 = y, 4 = z
fn octree_child(bounds: &AABox, index: usize) -> AABox {
    let half = bounds.scale * 0.5;
    let mut corner = bounds.corner;
    if index & 1 != 0 {
        corner.x += half.x;
    }
    if index & 2 != 0 {
        corner.y += half.y;
    }
    if index & 4 != 0 {
        corner.z += half.z;
    }
    AABox::new(corner, half)
}

fn contains_triangle(bounds: &AABox, triangle: &Triangle) -> bool {
    bounds.contains(triangle.v0) && bounds.contains(triangle.v1) && bounds.contains(triangle.v2)
}

#[derive(Debug, Default)]
struct TriangleOctreeCell {
    bounds: AABox,
    depth: usize,
    // triangles in this cell or any child, for early outs
    population: usize,
    triangle_indices: Vec<usize>,
    children: [Option<Box<TriangleOctreeCell>>; MAX_CHILDREN],
}

impl TriangleOctreeCell {
    fn new(bounds: AABox, depth: usize) -> TriangleOctreeCell {
        TriangleOctreeCell {
            bounds,
            depth,
            ..Default::default()
        }
    }

    fn reset(&mut self, bounds: AABox) {
        self.bounds = bounds;
        self.depth = 0;
        self.population = 0;
        self.triangle_indices.clear();
        self.children = Default::default();
    }

    fn insert(&mut self, triangles: &[Triangle], triangle_index: usize) {
        let triangle = &triangles[triangle_index];
        self.population += 1;
        if self.depth < MAX_DEPTH {
            let next_depth = self.depth + 1;
            for child in 0..MAX_CHILDREN {
                let child_bounds = octree_child(&self.bounds, child);
                if contains_triangle(&child_bounds, triangle) {
                    self.children[child]
                        .get_or_insert_with(|| {
                            Box::new(TriangleOctreeCell::new(child_bounds, next_depth))
                        })
                        .insert(triangles, triangle_index);
                    return;
                }
            }
        }
        // at max depth, or the triangle straddles every child
        self.triangle_indices.push(triangle_index);
    }

    fn find_ray_intersection(
        &self,
        triangles: &[Triangle],
        origin: Vec3,
        direction: Vec3,
        inv_direction: Vec3,
        allow_backface: bool,
        best: &mut Option<TriangleHit>,
    ) {
        if self.population < 1 {
            return;
        }
        // entry distance into this cell, zero when the ray starts inside it
        let box_distance = if self.bounds.contains(origin) {
            0.0
        } else {
            match geometry::ray_aabox_intersection(
                origin,
                direction,
                inv_direction,
                self.bounds.corner,
                self.bounds.scale,
            ) {
                Some((distance, _, _)) => distance,
                None => return,
            }
        };
        // nothing below here can beat an already closer hit
        if let Some(hit) = best {
            if box_distance > hit.distance {
                return;
            }
        }

        for &index in &self.triangle_indices {
            if let Some(distance) =
                triangles[index].find_ray_intersection(origin, direction, allow_backface)
            {
                let closer = match best {
                    Some(hit) => distance < hit.distance,
                    None => true,
                };
                if closer {
                    *best = Some(TriangleHit {
                        distance,
                        normal: triangles[index].normal(),
                        triangle_index: index,
                    });
                }
            }
        }
        for child in self.children.iter().flatten() {
            child.find_ray_intersection(
                triangles,
                origin,
                direction,
                inv_direction,
                allow_backface,
                best,
            );
        }
    }
}

/// A triangle soup with a lazily built octree over it for picking. Inserts
/// mark the octree stale; the next ray query rebalances it.
#[derive(Debug, Default)]
pub struct TriangleSet {
    triangles: Vec<Triangle>,
    bounds: AABox,
    octree: TriangleOctreeCell,
    is_balanced: bool,
}

impl TriangleSet {
    pub fn new() -> TriangleSet {
        TriangleSet::default()
    }

    pub fn insert(&mut self, triangle: Triangle) {
        self.is_balanced = false;
        self.bounds += triangle.v0;
        self.bounds += triangle.v1;
        self.bounds += triangle.v2;
        self.triangles.push(triangle);
    }

    pub fn reserve(&mut self, size: usize) {
        self.triangles.reserve(size);
    }

    pub fn clear(&mut self) {
        self.triangles.clear();
        self.bounds = AABox::default();
        self.octree.reset(AABox::default());
        self.is_balanced = false;
    }

    pub fn size(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn triangle(&self, index: usize) -> &Triangle {
        &self.triangles[index]
    }

    pub fn bounds(&self) -> &AABox {
        &self.bounds
    }

    /// Rebuild the octree: each triangle lands in the deepest cell that
    /// fully contains it, straddlers stay at the parent.
    pub fn balance(&mut self) {
        self.octree.reset(self.bounds);
        for index in 0..self.triangles.len() {
            self.octree.insert(&self.triangles, index);
        }
        self.is_balanced = true;
    }

    /// True when the point is behind every triangle's plane. Only meaningful
    /// when the set is a closed convex hull with outward windings.
    pub fn convex_hull_contains(&self, point: Vec3) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        self.triangles.iter().all(|triangle| {
            let normal = (triangle.v1 - triangle.v0).cross(triangle.v2 - triangle.v0);
            normal.dot(point - triangle.v0) < 0.0
        })
    }

    pub fn find_ray_intersection(
        &mut self,
        origin: Vec3,
        direction: Vec3,
        allow_backface: bool,
    ) -> Option<TriangleHit> {
        if !self.is_balanced {
            self.balance();
        }
        let inv_direction = direction.recip();
        let mut best = None;
        self.octree.find_ray_intersection(
            &self.triangles,
            origin,
            direction,
            inv_direction,
            allow_backface,
            &mut best,
        );
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // a wall in the z = depth plane with its front toward +z
    fn facing_wall(depth: f32, size: f32) -> Triangle {
        Triangle::new(
            Vec3::new(0.0, 0.0, depth),
            Vec3::new(size, 0.0, depth),
            Vec3::new(0.0, size, depth),
        )
    }

    fn unit_tetrahedron() -> TriangleSet {
        let a = Vec3::ZERO;
        let b = Vec3::X;
        let c = Vec3::Y;
        let d = Vec3::Z;
        let mut set = TriangleSet::new();
        set.insert(Triangle::new(a, c, b));
        set.insert(Triangle::new(a, b, d));
        set.insert(Triangle::new(a, d, c));
        set.insert(Triangle::new(b, c, d));
        set
    }

    #[test]
    fn test_insert_grows_bounds() {
        let mut set = TriangleSet::new();
        assert!(set.is_empty());

        set.insert(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y));
        assert_eq!(set.size(), 1);
        assert!(set.bounds().minimum().abs_diff_eq(Vec3::ZERO, 0.001));
        assert!(set.bounds().maximum().abs_diff_eq(Vec3::new(1.0, 1.0, 0.0), 0.001));

        set.insert(Triangle::new(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 4.0)));
        assert!(set.bounds().maximum().abs_diff_eq(Vec3::new(1.0, 1.0, 4.0), 0.001));
    }

    #[test]
    fn test_ray_hits_nearest_triangle() {
        let mut set = TriangleSet::new();
        set.insert(facing_wall(-4.0, 2.0));
        set.insert(facing_wall(-1.0, 2.0));

        let hit = set
            .find_ray_intersection(Vec3::new(0.5, 0.5, 0.0), -Vec3::Z, false)
            .unwrap();
        assert!((hit.distance - 1.0).abs() < 0.001);
        assert_eq!(hit.triangle_index, 1);
        assert!(hit.normal.abs_diff_eq(Vec3::Z, 0.001));

        assert!(set
            .find_ray_intersection(Vec3::new(0.5, 0.5, 0.0), Vec3::Z, false)
            .is_none());
    }

    #[test]
    fn test_backface_culling() {
        let mut set = TriangleSet::new();
        set.insert(facing_wall(-2.0, 2.0));

        // approaching from behind the wall
        let origin = Vec3::new(0.5, 0.5, -5.0);
        assert!(set.find_ray_intersection(origin, Vec3::Z, false).is_none());
        let hit = set.find_ray_intersection(origin, Vec3::Z, true).unwrap();
        assert!((hit.distance - 3.0).abs() < 0.001);
    }

    #[test]
    fn test_insert_after_query_rebalances() {
        let mut set = TriangleSet::new();
        set.insert(facing_wall(-4.0, 2.0));
        let hit = set
            .find_ray_intersection(Vec3::new(0.5, 0.5, 0.0), -Vec3::Z, false)
            .unwrap();
        assert!((hit.distance - 4.0).abs() < 0.001);

        set.insert(facing_wall(-1.0, 2.0));
        let hit = set
            .find_ray_intersection(Vec3::new(0.5, 0.5, 0.0), -Vec3::Z, false)
            .unwrap();
        assert!((hit.distance - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_octree_traversal_over_many_triangles() {
        // a 10 x 10 floor of small upward facing tiles
        let mut set = TriangleSet::new();
        set.reserve(200);
        for i in 0..10 {
            for j in 0..10 {
                let x = i as f32;
                let z = j as f32;
                set.insert(Triangle::new(
                    Vec3::new(x, 0.0, z),
                    Vec3::new(x, 0.0, z + 1.0),
                    Vec3::new(x + 1.0, 0.0, z),
                ));
                set.insert(Triangle::new(
                    Vec3::new(x + 1.0, 0.0, z + 1.0),
                    Vec3::new(x + 1.0, 0.0, z),
                    Vec3::new(x, 0.0, z + 1.0),
                ));
            }
        }
        assert_eq!(set.size(), 200);

        let hit = set
            .find_ray_intersection(Vec3::new(3.25, 5.0, 4.25), -Vec3::Y, false)
            .unwrap();
        assert!((hit.distance - 5.0).abs() < 0.001);
        assert!(hit.normal.abs_diff_eq(Vec3::Y, 0.001));
        // the first triangle of tile (3, 4)
        assert_eq!(hit.triangle_index, 2 * (3 * 10 + 4));

        // off the edge of the floor
        assert!(set
            .find_ray_intersection(Vec3::new(20.0, 5.0, 4.25), -Vec3::Y, false)
            .is_none());
    }

    #[test]
    fn test_convex_hull_contains() {
        let set = unit_tetrahedron();
        assert!(set.convex_hull_contains(Vec3::splat(0.1)));
        assert!(!set.convex_hull_contains(Vec3::splat(0.9)));
        assert!(!set.convex_hull_contains(Vec3::new(-0.5, 0.0, 0.0)));
    }

    #[test]
    fn test_clear() {
        let mut set = unit_tetrahedron();
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.size(), 0);
        assert!(set
            .find_ray_intersection(Vec3::new(0.1, 0.1, 5.0), -Vec3::Z, false)
            .is_none());
    }
}
