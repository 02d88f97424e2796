use glam::{Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

use crate::aabox::BoxVertex::{self, *};
use crate::aabox::AABox;
use crate::aacube::AACube;
use crate::plane::Plane;
use crate::projected_polygon::CubeProjectedPolygon;
use crate::util;
use crate::EPSILON;

pub const IDENTITY_RIGHT: Vec3 = glam::const_vec3!([1.0, 0.0, 0.0]);
pub const IDENTITY_UP: Vec3 = glam::const_vec3!([0.0, 1.0, 0.0]);
pub const IDENTITY_FORWARD: Vec3 = glam::const_vec3!([0.0, 0.0, -1.0]);

pub const DEFAULT_CENTER_SPHERE_RADIUS: f32 = 3.0;
pub const DEFAULT_FIELD_OF_VIEW_DEGREES: f32 = 45.0;
pub const DEFAULT_ASPECT_RATIO: f32 = 1.0;
pub const DEFAULT_NEAR_CLIP: f32 = 0.1;
pub const DEFAULT_FAR_CLIP: f32 = 16384.0;
pub const DEFAULT_FOCAL_LENGTH: f32 = 0.25;

const NUM_FRUSTUM_CORNERS: usize = 8;
const NUM_FRUSTUM_PLANES: usize = 6;

const TOP_PLANE: usize = 0;
const BOTTOM_PLANE: usize = 1;
const LEFT_PLANE: usize = 2;
const RIGHT_PLANE: usize = 3;
const NEAR_PLANE: usize = 4;
const FAR_PLANE: usize = 5;

// order corresponds to the order defined in the BoxVertex enum
const NDC_VALUES: [Vec4; NUM_FRUSTUM_CORNERS] = [
    glam::const_vec4!([-1.0, -1.0, -1.0, 1.0]),
    glam::const_vec4!([1.0, -1.0, -1.0, 1.0]),
    glam::const_vec4!([1.0, 1.0, -1.0, 1.0]),
    glam::const_vec4!([-1.0, 1.0, -1.0, 1.0]),
    glam::const_vec4!([-1.0, -1.0, 1.0, 1.0]),
    glam::const_vec4!([1.0, -1.0, 1.0, 1.0]),
    glam::const_vec4!([1.0, 1.0, 1.0, 1.0]),
    glam::const_vec4!([-1.0, 1.0, 1.0, 1.0]),
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Intersection {
    Outside,
    Intersect,
    Inside,
}

fn nearly(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}

/// The four corners of the frustum cross-section at some depth.
#[derive(Copy, Clone, Debug)]
pub struct FrustumCorners {
    pub top_left: Vec3,
    pub top_right: Vec3,
    pub bottom_left: Vec3,
    pub bottom_right: Vec3,
}

/// Extents of an asymmetric frustum at the near plane.
#[derive(Copy, Clone, Debug)]
pub struct OffAxisFrustum {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
    pub near: f32,
    pub far: f32,
}

/// A view volume with six planes plus a "keyhole": a sphere around the view
/// position that is considered visible regardless of the planes, so nearby
/// content stays loaded when the viewer spins around.
///
/// Setters only store state; call `calculate()` after changing the position,
/// orientation, or projection and before running any queries.
#[derive(Clone, Debug)]
pub struct ViewFrustum {
    position: Vec3,
    orientation: Quat,
    // derived from the orientation
    direction: Vec3,
    up: Vec3,
    right: Vec3,
    projection: Mat4,
    focal_length: f32,
    center_sphere_radius: f32,
    // derived from the projection: view-space corners and lens parameters
    corners: [Vec4; NUM_FRUSTUM_CORNERS],
    near_clip: f32,
    far_clip: f32,
    aspect_ratio: f32,
    field_of_view: f32,
    // derived by calculate()
    corners_world: [Vec3; NUM_FRUSTUM_CORNERS],
    planes: [Plane; NUM_FRUSTUM_PLANES],
    view_projection: Mat4,
}

impl Default for ViewFrustum {
    fn default() -> ViewFrustum {
        ViewFrustum {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            direction: IDENTITY_FORWARD,
            up: IDENTITY_UP,
            right: IDENTITY_RIGHT,
            projection: Mat4::IDENTITY,
            focal_length: DEFAULT_FOCAL_LENGTH,
            center_sphere_radius: DEFAULT_CENTER_SPHERE_RADIUS,
            corners: [Vec4::ZERO; NUM_FRUSTUM_CORNERS],
            near_clip: DEFAULT_NEAR_CLIP,
            far_clip: DEFAULT_FAR_CLIP,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            field_of_view: DEFAULT_FIELD_OF_VIEW_DEGREES,
            corners_world: [Vec3::ZERO; NUM_FRUSTUM_CORNERS],
            planes: [Plane::default(); NUM_FRUSTUM_PLANES],
            view_projection: Mat4::IDENTITY,
        }
    }
}

impl ViewFrustum {
    pub fn new() -> ViewFrustum {
        ViewFrustum::default()
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
        self.right = orientation * IDENTITY_RIGHT;
        self.up = orientation * IDENTITY_UP;
        self.direction = orientation * IDENTITY_FORWARD;
    }

    /// Adopt a projection matrix and derive the view-space corners plus the
    /// lens parameters from it. Expects a GL-style projection (NDC z runs
    /// -1..1).
    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
        let inverse = projection.inverse();

        for (corner, ndc) in self.corners.iter_mut().zip(NDC_VALUES) {
            let v = inverse * ndc;
            *corner = v / v.w;
        }
        self.near_clip = -self.corners[BottomLeftNear as usize].z;
        self.far_clip = -self.corners[BottomLeftFar as usize].z;
        self.aspect_ratio = (self.corners[TopRightNear as usize].x
            - self.corners[BottomLeftNear as usize].x)
            / (self.corners[TopRightNear as usize].y - self.corners[BottomLeftNear as usize].y);

        // recover the vertical field of view from the unprojected top point
        let top = inverse * Vec4::new(0.0, 1.0, -1.0, 1.0);
        let top = top / top.w;
        self.field_of_view =
            (2.0 * util::angle_between(IDENTITY_FORWARD, top.truncate()).abs()).to_degrees().abs();
    }

    pub fn set_perspective(&mut self, fov_degrees: f32, aspect_ratio: f32, near_clip: f32, far_clip: f32) {
        self.set_projection(Mat4::perspective_rh_gl(
            fov_degrees.to_radians(),
            aspect_ratio,
            near_clip,
            far_clip,
        ));
    }

    pub fn set_center_sphere_radius(&mut self, radius: f32) {
        self.center_sphere_radius = radius;
    }

    pub fn set_focal_length(&mut self, focal_length: f32) {
        self.focal_length = focal_length;
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn right(&self) -> Vec3 {
        self.right
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.view_projection
    }

    pub fn near_clip(&self) -> f32 {
        self.near_clip
    }

    pub fn far_clip(&self) -> f32 {
        self.far_clip
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    pub fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    pub fn focal_length(&self) -> f32 {
        self.focal_length
    }

    pub fn center_sphere_radius(&self) -> f32 {
        self.center_sphere_radius
    }

    /// World-space frustum corner, valid after calculate().
    pub fn world_corner(&self, vertex: BoxVertex) -> Vec3 {
        self.corners_world[vertex as usize]
    }

    /// Rebuild the world-space corners, the six planes, and the cached
    /// view-projection matrix.
    ///
    /// Notes on how/why this works:
    /// http://www.lighthouse3d.com/tutorials/view-frustum-culling/view-frustums-shape/
    pub fn calculate(&mut self) {
        // push the view-space corners out to world space
        let world_matrix = Mat4::from_translation(self.position)
            * Mat4::from_mat3(Mat3::from_cols(self.right, self.up, -self.direction));
        for i in 0..NUM_FRUSTUM_CORNERS {
            let v = world_matrix * self.corners[i];
            self.corners_world[i] = (v / v.w).truncate();
        }

        // The planes are defined such that the normal points towards the inside
        // of the view frustum. Start with any point on the plane and go counter
        // clockwise, as seen from inside, for three consecutive points.
        let cw = self.corners_world;
        self.planes[TOP_PLANE] = Plane::from_points(
            cw[TopRightNear as usize],
            cw[TopLeftNear as usize],
            cw[TopLeftFar as usize],
        );
        self.planes[BOTTOM_PLANE] = Plane::from_points(
            cw[BottomLeftNear as usize],
            cw[BottomRightNear as usize],
            cw[BottomRightFar as usize],
        );
        self.planes[LEFT_PLANE] = Plane::from_points(
            cw[BottomLeftNear as usize],
            cw[BottomLeftFar as usize],
            cw[TopLeftFar as usize],
        );
        self.planes[RIGHT_PLANE] = Plane::from_points(
            cw[BottomRightFar as usize],
            cw[BottomRightNear as usize],
            cw[TopRightFar as usize],
        );
        self.planes[NEAR_PLANE] = Plane::from_points(
            cw[BottomRightNear as usize],
            cw[BottomLeftNear as usize],
            cw[TopLeftNear as usize],
        );
        self.planes[FAR_PLANE] = Plane::from_points(
            cw[BottomLeftFar as usize],
            cw[BottomRightFar as usize],
            cw[TopRightFar as usize],
        );

        // cache the combined matrix for projecting points (model is identity)
        let view = Mat4::look_at_rh(self.position, self.position + self.direction, self.up);
        self.view_projection = self.projection * view;
    }

    pub fn point_intersects_frustum(&self, point: Vec3) -> bool {
        self.planes.iter().all(|plane| plane.distance(point) >= 0.0)
    }

    pub fn sphere_intersects_frustum(&self, center: Vec3, radius: f32) -> bool {
        self.planes.iter().all(|plane| plane.distance(center) >= -radius)
    }

    pub fn box_intersects_frustum(&self, aabox: &AABox) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.distance(aabox.farthest_vertex(plane.normal)) >= 0.0)
    }

    pub fn cube_frustum_intersection(&self, cube: &AACube) -> Intersection {
        let mut result = Intersection::Inside;
        for plane in &self.planes {
            let normal = plane.normal;
            if plane.distance(cube.farthest_vertex(normal)) < 0.0 {
                return Intersection::Outside;
            }
            if plane.distance(cube.nearest_vertex(normal)) < 0.0 {
                // the cube straddles this plane
                result = Intersection::Intersect;
            }
        }
        result
    }

    pub fn cube_keyhole_intersection(&self, cube: &AACube) -> Intersection {
        const HALF_SQRT_THREE: f32 = 0.8660254;

        let mut sphere_result = Intersection::Intersect;
        let cube_offset = cube.center() - self.position;
        let distance = cube_offset.length();
        if distance > EPSILON {
            let vertex = cube.farthest_vertex(cube_offset) - self.position;
            if vertex.dot(cube_offset) < self.center_sphere_radius * distance {
                // the most outward cube vertex is inside the central sphere
                return Intersection::Inside;
            }
            if !self.touches_center_sphere_cube(cube) {
                sphere_result = Intersection::Outside;
            }
        } else if self.center_sphere_radius > HALF_SQRT_THREE * cube.scale {
            // the cube sits at the sphere center and its bounding radius fits
            return Intersection::Inside;
        }

        let frustum_result = self.cube_frustum_intersection(cube);
        if frustum_result == Intersection::Outside {
            sphere_result
        } else {
            frustum_result
        }
    }

    pub fn sphere_intersects_keyhole(&self, center: Vec3, radius: f32) -> bool {
        // positive touch against the central sphere
        if (center - self.position).length() <= radius + self.center_sphere_radius {
            return true;
        }
        // negative touches against the frustum planes
        self.planes.iter().all(|plane| plane.distance(center) >= -radius)
    }

    pub fn cube_intersects_keyhole(&self, cube: &AACube) -> bool {
        if self.touches_center_sphere_cube(cube) {
            return true;
        }
        self.planes
            .iter()
            .all(|plane| plane.distance(cube.farthest_vertex(plane.normal)) >= 0.0)
    }

    pub fn box_intersects_keyhole(&self, aabox: &AABox) -> bool {
        if self.center_sphere_radius >= 0.0 && aabox.touches_sphere(self.position, self.center_sphere_radius) {
            return true;
        }
        self.planes
            .iter()
            .all(|plane| plane.distance(aabox.farthest_vertex(plane.normal)) >= 0.0)
    }

    // an invalidated frustum stores a negative keyhole radius, which would
    // slip through the squared-radius touch test
    fn touches_center_sphere_cube(&self, cube: &AACube) -> bool {
        self.center_sphere_radius >= 0.0 && cube.touches_sphere(self.position, self.center_sphere_radius)
    }

    /// Strict comparison of pose and lens, within EPSILON.
    pub fn matches(&self, other: &ViewFrustum) -> bool {
        other.position.abs_diff_eq(self.position, EPSILON)
            && other.direction.abs_diff_eq(self.direction, EPSILON)
            && other.up.abs_diff_eq(self.up, EPSILON)
            && other.right.abs_diff_eq(self.right, EPSILON)
            && nearly(other.field_of_view, self.field_of_view)
            && nearly(other.aspect_ratio, self.aspect_ratio)
            && nearly(other.near_clip, self.near_clip)
            && nearly(other.far_clip, self.far_clip)
            && nearly(other.focal_length, self.focal_length)
    }

    /// Loose comparison: the same lens, pointed about the same way from
    /// about the same place.
    pub fn is_very_similar(&self, other: &ViewFrustum) -> bool {
        const POSITION_SIMILAR_ENOUGH: f32 = 5.0; // meters
        const ORIENTATION_SIMILAR_ENOUGH: f32 = 10.0; // degrees in any direction

        let position_distance = self.position.distance(other.position);
        let angle_orientation = self.orientation.angle_between(other.orientation).to_degrees();

        position_distance <= POSITION_SIMILAR_ENOUGH
            && angle_orientation <= ORIENTATION_SIMILAR_ENOUGH
            && nearly(other.field_of_view, self.field_of_view)
            && nearly(other.aspect_ratio, self.aspect_ratio)
            && nearly(other.near_clip, self.near_clip)
            && nearly(other.far_clip, self.far_clip)
            && nearly(other.focal_length, self.focal_length)
    }

    /// Ray through the near rectangle at (x, y), both in 0..1 with the
    /// origin at the top left of the view.
    pub fn compute_pick_ray(&self, x: f32, y: f32) -> (Vec3, Vec3) {
        let top_left = self.corners_world[TopLeftNear as usize];
        let origin = top_left
            + x * (self.corners_world[TopRightNear as usize] - top_left)
            + y * (self.corners_world[BottomLeftNear as usize] - top_left);
        let direction = (origin - self.position).normalize();
        (origin, direction)
    }

    /// The tightest symmetric description of this frustum's corner rays,
    /// mixed toward the focal plane, for building shadow or mirror
    /// projections.
    pub fn compute_off_axis_frustum(&self) -> OffAxisFrustum {
        // the near and far clip distances bound every corner
        let mut near = f32::MAX;
        let mut far = -f32::MAX;
        for corner in &self.corners {
            near = near.min(-corner.z);
            far = far.max(-corner.z);
        }

        // make sure the near clip isn't too small to be valid
        const MIN_NEAR: f32 = 0.01;
        near = near.max(MIN_NEAR);

        // compute the focal proportion (zero is near clip, one is far clip)
        let focal_proportion = (self.focal_length - self.near_clip) / (self.far_clip - self.near_clip);

        // get the extents at z = -near
        let mut left = f32::MAX;
        let mut right = -f32::MAX;
        let mut bottom = f32::MAX;
        let mut top = -f32::MAX;
        for i in 0..4 {
            let corner = self.corners[i].lerp(self.corners[i + 4], focal_proportion);
            let intersection = corner * (-near / corner.z);
            left = left.min(intersection.x);
            right = right.max(intersection.x);
            bottom = bottom.min(intersection.y);
            top = top.max(intersection.y);
        }

        OffAxisFrustum {
            left,
            right,
            bottom,
            top,
            near,
            far,
        }
    }

    /// Project a world point into clip space. Points at or behind the
    /// camera plane have no projection.
    pub fn project_point(&self, point: Vec3) -> Option<Vec2> {
        let (projected, in_view) = self.project_point_with_flip(point);
        if in_view {
            Some(projected)
        } else {
            None
        }
    }

    // If the w result is negative then the point is behind the viewer and the
    // projected x and y flip signs, which the silhouette path relies on.
    fn project_point_with_flip(&self, point: Vec3) -> (Vec2, bool) {
        let projected = self.view_projection * point.extend(1.0);
        let in_view = projected.w > 0.0;
        let flip = if in_view { 1.0 } else { -1.0 };
        (
            Vec2::new(
                flip * projected.x / projected.w,
                flip * projected.y / projected.w,
            ),
            in_view,
        )
    }

    /// Silhouette of a cube as seen from the view position: the number of
    /// hull vertices and their cube-vertex indices for each of the 43
    /// reachable camera-position codes.
    ///
    /// The code classifies the camera against the six face slabs of the
    /// cube; rows marked n/a are unreachable combinations (e.g. both left
    /// and right of the cube at once).
    pub fn projected_polygon(&self, cube: &AACube) -> CubeProjectedPolygon {
        const HULL_VERTEX_LOOKUP: [&[BoxVertex]; 43] = [
            &[],                                                                            // 0: inside
            &[BottomRightNear, BottomRightFar, TopRightFar, TopRightNear],                  // 1: right
            &[BottomLeftFar, BottomLeftNear, TopLeftNear, TopLeftFar],                      // 2: left
            &[],                                                                            // 3: n/a
            &[BottomRightNear, BottomLeftNear, BottomLeftFar, BottomRightFar],              // 4: bottom
            &[BottomRightNear, BottomLeftNear, BottomLeftFar, BottomRightFar, TopRightFar, TopRightNear], // 5: bottom, right
            &[BottomRightNear, BottomLeftNear, TopLeftNear, TopLeftFar, BottomLeftFar, BottomRightFar], // 6: bottom, left
            &[],                                                                            // 7: n/a
            &[TopRightNear, TopRightFar, TopLeftFar, TopLeftNear],                          // 8: top
            &[TopRightNear, BottomRightNear, BottomRightFar, TopRightFar, TopLeftFar, TopLeftNear], // 9: top, right
            &[TopRightNear, TopRightFar, TopLeftFar, BottomLeftFar, BottomLeftNear, TopLeftNear], // 10: top, left
            &[],                                                                            // 11: n/a
            &[],                                                                            // 12: n/a
            &[],                                                                            // 13: n/a
            &[],                                                                            // 14: n/a
            &[],                                                                            // 15: n/a
            &[BottomLeftNear, BottomRightNear, TopRightNear, TopLeftNear],                  // 16: near
            &[BottomLeftNear, BottomRightNear, BottomRightFar, TopRightFar, TopRightNear, TopLeftNear], // 17: near, right
            &[BottomLeftFar, BottomLeftNear, BottomRightNear, TopRightNear, TopLeftNear, TopLeftFar], // 18: near, left
            &[],                                                                            // 19: n/a
            &[BottomLeftNear, BottomLeftFar, BottomRightFar, BottomRightNear, TopRightNear, TopLeftNear], // 20: near, bottom
            &[BottomLeftNear, BottomLeftFar, BottomRightFar, TopRightFar, TopRightNear, TopLeftNear], // 21: near, bottom, right
            &[BottomLeftFar, BottomRightFar, BottomRightNear, TopRightNear, TopLeftNear, TopLeftFar], // 22: near, bottom, left
            &[],                                                                            // 23: n/a
            &[BottomLeftNear, BottomRightNear, TopRightNear, TopRightFar, TopLeftFar, TopLeftNear], // 24: near, top
            &[BottomLeftNear, BottomRightNear, BottomRightFar, TopRightFar, TopLeftFar, TopLeftNear], // 25: near, top, right
            &[BottomLeftFar, BottomLeftNear, BottomRightNear, TopRightNear, TopRightFar, TopLeftFar], // 26: near, top, left
            &[],                                                                            // 27: n/a
            &[],                                                                            // 28: n/a
            &[],                                                                            // 29: n/a
            &[],                                                                            // 30: n/a
            &[],                                                                            // 31: n/a
            &[BottomRightFar, BottomLeftFar, TopLeftFar, TopRightFar],                      // 32: far
            &[BottomRightNear, BottomRightFar, BottomLeftFar, TopLeftFar, TopRightFar, TopRightNear], // 33: far, right
            &[BottomRightFar, BottomLeftFar, BottomLeftNear, TopLeftNear, TopLeftFar, TopRightFar], // 34: far, left
            &[],                                                                            // 35: n/a
            &[BottomRightNear, BottomLeftNear, BottomLeftFar, TopLeftFar, TopRightFar, BottomRightFar], // 36: far, bottom
            &[BottomRightNear, BottomLeftNear, BottomLeftFar, TopLeftFar, TopRightFar, TopRightNear], // 37: far, bottom, right
            &[BottomRightNear, BottomLeftNear, TopLeftNear, TopLeftFar, TopRightFar, BottomRightFar], // 38: far, bottom, left
            &[],                                                                            // 39: n/a
            &[BottomRightFar, BottomLeftFar, TopLeftFar, TopLeftNear, TopRightNear, TopRightFar], // 40: far, top
            &[BottomRightNear, BottomRightFar, BottomLeftFar, TopLeftFar, TopLeftNear, TopRightNear], // 41: far, top, right
            &[TopRightNear, TopRightFar, BottomRightFar, BottomLeftFar, BottomLeftNear, TopLeftNear], // 42: far, top, left
        ];

        let minimum = cube.minimum();
        let maximum = cube.maximum();
        let look_up = usize::from(self.position.x < minimum.x)
            + (usize::from(self.position.x > maximum.x) << 1)
            + (usize::from(self.position.y < minimum.y) << 2)
            + (usize::from(self.position.y > maximum.y) << 3)
            + (usize::from(self.position.z < minimum.z) << 4)
            + (usize::from(self.position.z > maximum.z) << 5);

        let hull_vertices = HULL_VERTEX_LOOKUP[look_up];
        let mut polygon = CubeProjectedPolygon::new(hull_vertices.len());

        let mut all_points_in_view = false;
        let mut any_points_in_view = false;
        if !hull_vertices.is_empty() {
            all_points_in_view = true;
            for (i, vertex) in hull_vertices.iter().enumerate() {
                let (projected, in_view) = self.project_point_with_flip(cube.vertex(*vertex));
                all_points_in_view = all_points_in_view && in_view;
                any_points_in_view = any_points_in_view || in_view;
                polygon.set_vertex(i, projected);
            }
        }

        polygon.distance = self.position.distance(cube.center());
        polygon.any_in_view = any_points_in_view;
        polygon.all_in_view = all_points_in_view;
        polygon.projection_type = look_up as u8;
        polygon
    }

    /// Which cube vertex is furthest from the view position, by comparing
    /// against the cube center on each axis. No squares or square roots.
    pub fn furthest_point_from_camera(&self, cube: &AACube) -> Vec3 {
        let corner = cube.minimum();
        let scale = cube.scale;
        let half_scale = scale * 0.5;
        Vec3::new(
            if self.position.x < corner.x + half_scale {
                corner.x + scale
            } else {
                corner.x
            },
            if self.position.y < corner.y + half_scale {
                corner.y + scale
            } else {
                corner.y
            },
            if self.position.z < corner.z + half_scale {
                corner.z + scale
            } else {
                corner.z
            },
        )
    }

    /// Corners of the cross-section `depth` forward of the view position.
    pub fn corners_at(&self, depth: f32) -> FrustumCorners {
        let normal = self.direction.normalize();
        let corner_at = |near_corner: BoxVertex, far_corner: BoxVertex| {
            let dir = (self.corners_world[near_corner as usize]
                - self.corners_world[far_corner as usize])
                .normalize();
            let factor = depth / dir.dot(normal);
            self.position + factor * dir
        };
        FrustumCorners {
            top_left: corner_at(TopLeftNear, TopLeftFar),
            top_right: corner_at(TopRightNear, TopRightFar),
            bottom_left: corner_at(BottomLeftNear, BottomLeftFar),
            bottom_right: corner_at(BottomRightNear, BottomRightFar),
        }
    }

    /// This frustum's projection, restricted to a depth range.
    pub fn evaluate_projection_range(&self, range_near: f32, range_far: f32) -> Mat4 {
        debug_assert!(range_near > 0.0);
        debug_assert!(range_far > range_near);

        let mut range_projection = self.projection;
        range_projection.z_axis.z = -(range_far + range_near) / (range_far - range_near);
        range_projection.w_axis.z = -2.0 * range_far * range_near / (range_far - range_near);
        range_projection
    }

    /// Make nearly all intersection tests fail until the next calculate().
    pub fn invalidate(&mut self) {
        for plane in &mut self.planes {
            plane.invalidate();
        }
        self.center_sphere_radius = -1.0e6; // negative enough
    }
}
