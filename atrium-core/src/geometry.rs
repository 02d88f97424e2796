use glam::{Mat4, Quat, Vec2, Vec3, Vec4};

use crate::aabox::BoxFace;
use crate::plane::Plane;
use crate::EPSILON;

/// Vector from the point to the nearest point on the segment.
pub fn point_to_segment_vector(point: Vec3, start: Vec3, end: Vec3) -> Vec3 {
    let segment = end - start;
    let length_squared = segment.dot(segment);
    if length_squared < EPSILON {
        return start - point; // start and end are the same
    }
    let proj = (point - start).dot(segment) / length_squared;
    if proj <= 0.0 {
        start - point
    } else if proj >= 1.0 {
        end - point
    } else {
        start + segment * proj - point
    }
}

/// Penetration of a point into a sphere centered at the origin: the vector
/// that would move the point back outside. The default direction is used
/// when the point sits exactly at the center.
pub fn sphere_penetration(point: Vec3, default_direction: Vec3, sphere_radius: f32) -> Option<Vec3> {
    let vector_length = point.length();
    if vector_length < EPSILON {
        return Some(default_direction * sphere_radius);
    }
    let distance = vector_length - sphere_radius;
    if distance < 0.0 {
        Some(point * (-distance / vector_length))
    } else {
        None
    }
}

pub fn sphere_point_penetration(sphere_center: Vec3, sphere_radius: f32, point: Vec3) -> Option<Vec3> {
    sphere_penetration(point - sphere_center, Vec3::new(0.0, -1.0, 0.0), sphere_radius)
}

pub fn point_sphere_penetration(point: Vec3, sphere_center: Vec3, sphere_radius: f32) -> Option<Vec3> {
    sphere_penetration(sphere_center - point, Vec3::new(0.0, -1.0, 0.0), sphere_radius)
}

pub fn sphere_sphere_penetration(
    first_center: Vec3,
    first_radius: f32,
    second_center: Vec3,
    second_radius: f32,
) -> Option<Vec3> {
    sphere_point_penetration(first_center, first_radius + second_radius, second_center)
}

pub fn sphere_segment_penetration(
    sphere_center: Vec3,
    sphere_radius: f32,
    start: Vec3,
    end: Vec3,
) -> Option<Vec3> {
    sphere_penetration(
        point_to_segment_vector(sphere_center, start, end),
        Vec3::new(0.0, -1.0, 0.0),
        sphere_radius,
    )
}

pub fn sphere_capsule_penetration(
    sphere_center: Vec3,
    sphere_radius: f32,
    capsule_start: Vec3,
    capsule_end: Vec3,
    capsule_radius: f32,
) -> Option<Vec3> {
    sphere_segment_penetration(sphere_center, sphere_radius + capsule_radius, capsule_start, capsule_end)
}

pub fn point_capsule_penetration(
    point: Vec3,
    capsule_start: Vec3,
    capsule_end: Vec3,
    capsule_radius: f32,
) -> Option<Vec3> {
    let segment = capsule_end - capsule_start;
    let length_squared = segment.dot(segment);
    if length_squared < EPSILON {
        // start and end are the same
        return point_sphere_penetration(point, capsule_start, capsule_radius);
    }
    let proj = ((point - capsule_start).dot(segment) / length_squared).clamp(0.0, 1.0);
    point_sphere_penetration(point, capsule_start + segment * proj, capsule_radius)
}

pub fn capsule_sphere_penetration(
    capsule_start: Vec3,
    capsule_end: Vec3,
    capsule_radius: f32,
    sphere_center: Vec3,
    sphere_radius: f32,
) -> Option<Vec3> {
    sphere_capsule_penetration(sphere_center, sphere_radius, capsule_start, capsule_end, capsule_radius)
        .map(|penetration| -penetration)
}

// closest points between two segments, after Ericson's Real-Time Collision
// Detection 5.1.9
fn closest_points_on_segments(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> (Vec3, Vec3) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.dot(d1);
    let e = d2.dot(d2);
    let f = d2.dot(r);

    let (s, t) = if a < EPSILON && e < EPSILON {
        (0.0, 0.0) // both segments degenerate to points
    } else if a < EPSILON {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e < EPSILON {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            let mut s = if denom != 0.0 {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0 // parallel, pick an end of the first segment
            };
            let t = (b * s + f) / e;
            let t = if t < 0.0 {
                s = (-c / a).clamp(0.0, 1.0);
                0.0
            } else if t > 1.0 {
                s = ((b - c) / a).clamp(0.0, 1.0);
                1.0
            } else {
                t
            };
            (s, t)
        }
    };
    (p1 + d1 * s, p2 + d2 * t)
}

pub fn capsule_capsule_penetration(
    first_start: Vec3,
    first_end: Vec3,
    first_radius: f32,
    second_start: Vec3,
    second_end: Vec3,
    second_radius: f32,
) -> Option<Vec3> {
    let (first_point, second_point) =
        closest_points_on_segments(first_start, first_end, second_start, second_end);
    sphere_sphere_penetration(first_point, first_radius, second_point, second_radius)
}

/// Plane given as coefficients with dot(normal, p) + w = 0.
pub fn sphere_plane_penetration(sphere_center: Vec3, sphere_radius: f32, plane: Vec4) -> Option<Vec3> {
    let distance = plane.dot(sphere_center.extend(1.0)) - sphere_radius;
    if distance < 0.0 {
        Some(plane.truncate() * distance)
    } else {
        None
    }
}

pub fn capsule_plane_penetration(
    capsule_start: Vec3,
    capsule_end: Vec3,
    capsule_radius: f32,
    plane: Vec4,
) -> Option<Vec3> {
    let distance = plane
        .dot(capsule_start.extend(1.0))
        .min(plane.dot(capsule_end.extend(1.0)))
        - capsule_radius;
    if distance < 0.0 {
        Some(plane.truncate() * distance)
    } else {
        None
    }
}

/// Sphere against a disk of the given radius, thickness, and normal. Edge
/// hits are ignored.
pub fn sphere_disk_penetration(
    sphere_center: Vec3,
    sphere_radius: f32,
    disk_center: Vec3,
    disk_radius: f32,
    disk_thickness: f32,
    disk_normal: Vec3,
) -> Option<Vec3> {
    let local_center = sphere_center - disk_center;
    let axial_distance = local_center.dot(disk_normal);
    if axial_distance.abs() < sphere_radius + 0.5 * disk_thickness {
        let axial_offset = axial_distance * disk_normal;
        if (local_center - axial_offset).length() < disk_radius {
            let mut penetration =
                (axial_distance.abs() - (sphere_radius + 0.5 * disk_thickness)) * disk_normal;
            if axial_distance < 0.0 {
                // hit the backside of the disk
                penetration = -penetration;
            }
            return Some(penetration);
        }
    }
    None
}

/// Combine two penetration vectors without double-counting their shared
/// directional component.
pub fn add_penetrations(current: Vec3, new: Vec3) -> Vec3 {
    let current_length = current.length();
    if current_length == 0.0 {
        return new;
    }
    let current_direction = current / current_length;
    let directional_component = new.dot(current_direction);

    // orthogonal or opposed components simply add
    if directional_component <= 0.0 {
        return current + new;
    }
    current_direction * directional_component.max(current_length) + new
        - current_direction * directional_component
}

// slab method: https://tavianator.com/fast-branchless-raybounding-box-intersections/
pub fn ray_aabox_intersection(
    origin: Vec3,
    direction: Vec3,
    inv_direction: Vec3,
    corner: Vec3,
    scale: Vec3,
) -> Option<(f32, BoxFace, Vec3)> {
    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;
    let mut min_axis = 0;
    let mut max_axis = 0;

    for i in 0..3 {
        let t1 = (corner[i] - origin[i]) * inv_direction[i];
        let t2 = (corner[i] + scale[i] - origin[i]) * inv_direction[i];
        let new_tmin = t1.min(t2);
        let new_tmax = t1.max(t2);
        if new_tmin > tmin {
            min_axis = i;
        }
        tmin = tmin.max(new_tmin);
        if new_tmax < tmax {
            max_axis = i;
        }
        tmax = tmax.min(new_tmax);
    }

    if tmax >= tmin.max(0.0) {
        if tmin < 0.0 {
            let positive = direction[max_axis] > 0.0;
            let mut normal = Vec3::ZERO;
            normal[max_axis] = if positive { -1.0 } else { 1.0 };
            let face = BoxFace::from_index(2 * max_axis + positive as usize);
            Some((tmax, face, normal))
        } else {
            let positive = direction[min_axis] > 0.0;
            let mut normal = Vec3::ZERO;
            normal[min_axis] = if positive { -1.0 } else { 1.0 };
            let face = BoxFace::from_index(2 * min_axis + !positive as usize);
            Some((tmin, face, normal))
        }
    } else {
        None
    }
}

pub fn ray_sphere_intersection(origin: Vec3, direction: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let relative_origin = origin - center;
    let c = relative_origin.dot(relative_origin) - radius * radius;
    if c < 0.0 {
        return Some(0.0); // starts inside the sphere
    }
    let b = 2.0 * direction.dot(relative_origin);
    let a = direction.dot(direction);
    let radicand = b * b - 4.0 * a * c;
    if radicand < 0.0 {
        return None;
    }
    let t = 0.5 * (-b - radicand.sqrt()) / a;
    if t < 0.0 {
        None
    } else {
        Some(t)
    }
}

pub fn point_in_sphere(point: Vec3, center: Vec3, radius: f32) -> bool {
    let relative = point - center;
    relative.dot(relative) - radius * radius <= 0.0
}

pub fn point_in_capsule(point: Vec3, start: Vec3, end: Vec3, radius: f32) -> bool {
    let relative_point = point - start;
    let mut relative_end = end - start;
    let capsule_length = relative_end.length();
    if capsule_length < EPSILON {
        return point_in_sphere(point, start, radius);
    }
    relative_end /= capsule_length;
    let projection = relative_end.dot(relative_point);
    let constant = relative_point - relative_end * projection;
    if constant.dot(constant) - radius * radius < 0.0 {
        if projection < 0.0 {
            return point_in_sphere(point, start, radius);
        } else if projection > capsule_length {
            return point_in_sphere(point, end, radius);
        }
        return true;
    }
    false
}

pub fn ray_capsule_intersection(
    origin: Vec3,
    direction: Vec3,
    start: Vec3,
    end: Vec3,
    radius: f32,
) -> Option<f32> {
    if start == end {
        return ray_sphere_intersection(origin, direction, start, radius); // degenerate capsule
    }
    let relative_origin = origin - start;
    let mut relative_end = end - start;
    let capsule_length = relative_end.length();
    relative_end /= capsule_length;
    let origin_projection = relative_end.dot(relative_origin);
    let constant = relative_origin - relative_end * origin_projection;
    let c = constant.dot(constant) - radius * radius;
    if c < 0.0 {
        // starts inside the enclosing cylinder
        if origin_projection < 0.0 {
            return ray_sphere_intersection(origin, direction, start, radius); // below start
        } else if origin_projection > capsule_length {
            return ray_sphere_intersection(origin, direction, end, radius); // above end
        }
        return Some(0.0);
    }
    let coefficient = direction - relative_end * relative_end.dot(direction);
    let a = coefficient.dot(coefficient);
    if a == 0.0 {
        return None; // parallel to the enclosing cylinder
    }
    let b = 2.0 * constant.dot(coefficient);
    let radicand = b * b - 4.0 * a * c;
    if radicand < 0.0 {
        return None;
    }
    let t = (-b - radicand.sqrt()) / (2.0 * a);
    if t < 0.0 {
        return None;
    }
    let intersection = relative_origin + direction * t;
    let intersection_projection = relative_end.dot(intersection);
    if intersection_projection < 0.0 {
        ray_sphere_intersection(origin, direction, start, radius)
    } else if intersection_projection > capsule_length {
        ray_sphere_intersection(origin, direction, end, radius)
    } else {
        Some(t)
    }
}

// https://en.wikipedia.org/wiki/M%C3%B6ller%E2%80%93Trumbore_intersection_algorithm
pub fn ray_triangle_intersection(
    origin: Vec3,
    direction: Vec3,
    v0: Vec3,
    v1: Vec3,
    v2: Vec3,
    allow_backface: bool,
) -> Option<f32> {
    let first_side = v1 - v0;
    let second_side = v2 - v0;
    let p = direction.cross(second_side);
    let det = first_side.dot(p);
    if !allow_backface && det < EPSILON {
        return None;
    } else if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let t_vec = origin - v0;
    let u = t_vec.dot(p) * inv_det;
    if u < 0.0 || u > 1.0 {
        return None;
    }

    let q = t_vec.cross(first_side);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = second_side.dot(q) * inv_det;
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Ray against a rotated rectangle centered at position, facing its local -z.
pub fn ray_rectangle_intersection(
    origin: Vec3,
    direction: Vec3,
    rotation: Quat,
    position: Vec3,
    dimensions: Vec2,
) -> Option<f32> {
    let unrotated_normal = Vec3::new(0.0, 0.0, -1.0);
    let normal = rotation * unrotated_normal;

    let mut maybe_intersects = false;
    let denominator = normal.dot(direction);
    let offset = origin - position;
    let norm_dot_offset = offset.dot(normal);
    let mut d = 0.0;
    if denominator.abs() < EPSILON {
        // ray is parallel to the plane
        if norm_dot_offset.abs() < EPSILON {
            // and starts on it: closest approach to the rectangle center
            maybe_intersects = true;
            d = (-offset.dot(direction)).max(0.0);
        }
    } else {
        d = -norm_dot_offset / denominator;
        if d > 0.0 {
            maybe_intersects = true;
        }
    }

    if maybe_intersects {
        let hit_position = origin + d * direction;
        let local_hit = rotation.inverse() * (hit_position - position);
        let half = 0.5 * dimensions;
        if local_hit.x.abs() < half.x && local_hit.y.abs() < half.y {
            return Some(d);
        }
    }
    None
}

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Triangle {
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Triangle {
        Triangle { v0, v1, v2 }
    }

    pub fn normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0).normalize()
    }

    pub fn area(&self) -> f32 {
        0.5 * (self.v1 - self.v0).cross(self.v2 - self.v0).length()
    }

    pub fn transformed(&self, matrix: &Mat4) -> Triangle {
        Triangle {
            v0: matrix.transform_point3(self.v0),
            v1: matrix.transform_point3(self.v1),
            v2: matrix.transform_point3(self.v2),
        }
    }

    pub fn find_ray_intersection(&self, origin: Vec3, direction: Vec3, allow_backface: bool) -> Option<f32> {
        ray_triangle_intersection(origin, direction, self.v0, self.v1, self.v2, allow_backface)
    }
}

// intersection points on the two edges running from the vertex on one side
// of the plane to the two on the other side
fn triangle_plane_crossings(
    vertices: &[Vec3; 3],
    distances: &[f32; 3],
    lone_index: usize,
    pair_indices: [usize; 2],
) -> [Vec3; 2] {
    let lone = vertices[lone_index];
    let lone_distance = distances[lone_index];
    pair_indices.map(|i| {
        let kept = vertices[i];
        let ratio = lone_distance / (lone_distance - distances[i]);
        lone + (kept - lone) * ratio
    })
}

/// Clip a triangle to the positive side of a plane, producing zero, one, or
/// two triangles that keep the input winding.
pub fn clip_triangle_with_plane(triangle: &Triangle, plane: &Plane) -> Vec<Triangle> {
    let vertices = [triangle.v0, triangle.v1, triangle.v2];
    let distances = [
        plane.distance(triangle.v0),
        plane.distance(triangle.v1),
        plane.distance(triangle.v2),
    ];
    let clipped = [distances[0] < 0.0, distances[1] < 0.0, distances[2] < 0.0];

    match clipped.iter().filter(|c| **c).count() {
        0 => vec![*triangle],
        1 => {
            // one vertex clipped leaves a quad, split into two triangles
            let (lone, kept) = if clipped[0] {
                (0, [2, 1])
            } else if clipped[1] {
                (1, [0, 2])
            } else {
                (2, [0, 1])
            };
            let new_vertices = triangle_plane_crossings(&vertices, &distances, lone, kept);
            vec![
                Triangle::new(vertices[kept[0]], vertices[kept[1]], new_vertices[1]),
                Triangle::new(vertices[kept[0]], new_vertices[0], new_vertices[1]),
            ]
        }
        2 => {
            let (lone, pair) = if !clipped[0] {
                (0, [2, 1])
            } else if !clipped[1] {
                (1, [0, 2])
            } else {
                (2, [0, 1])
            };
            let new_vertices = triangle_plane_crossings(&vertices, &distances, lone, pair);
            vec![Triangle::new(vertices[lone], new_vertices[0], new_vertices[1])]
        }
        _ => Vec::new(),
    }
}

pub fn clip_triangle_with_planes(triangle: &Triangle, planes: &[Plane]) -> Vec<Triangle> {
    let mut triangles = vec![*triangle];
    for plane in planes {
        let mut next = Vec::with_capacity(triangles.len() * 2);
        for t in &triangles {
            next.extend(clip_triangle_with_plane(t, plane));
        }
        triangles = next;
        if triangles.is_empty() {
            break;
        }
    }
    triangles
}

fn compute_direction(xi: f32, yi: f32, xj: f32, yj: f32, xk: f32, yk: f32) -> i32 {
    let a = (xk - xi) * (yj - yi);
    let b = (xj - xi) * (yk - yi);
    if a < b {
        -1
    } else if a > b {
        1
    } else {
        0
    }
}

fn is_on_segment(xi: f32, yi: f32, xj: f32, yj: f32, xk: f32, yk: f32) -> bool {
    (xi <= xk || xj <= xk)
        && (xk <= xi || xk <= xj)
        && (yi <= yk || yj <= yk)
        && (yk <= yi || yk <= yj)
}

// http://ptspts.blogspot.com/2010/06/how-to-determine-if-two-line-segments.html
pub fn segments_intersect(r1p1: Vec2, r1p2: Vec2, r2p1: Vec2, r2p2: Vec2) -> bool {
    let d1 = compute_direction(r2p1.x, r2p1.y, r2p2.x, r2p2.y, r1p1.x, r1p1.y);
    let d2 = compute_direction(r2p1.x, r2p1.y, r2p2.x, r2p2.y, r1p2.x, r1p2.y);
    let d3 = compute_direction(r1p1.x, r1p1.y, r1p2.x, r1p2.y, r2p1.x, r2p1.y);
    let d4 = compute_direction(r1p1.x, r1p1.y, r1p2.x, r1p2.y, r2p2.x, r2p2.y);
    (((d1 > 0 && d2 < 0) || (d1 < 0 && d2 > 0)) && ((d3 > 0 && d4 < 0) || (d3 < 0 && d4 > 0)))
        || (d1 == 0 && is_on_segment(r2p1.x, r2p1.y, r2p2.x, r2p2.y, r1p1.x, r1p1.y))
        || (d2 == 0 && is_on_segment(r2p1.x, r2p1.y, r2p2.x, r2p2.y, r1p2.x, r1p2.y))
        || (d3 == 0 && is_on_segment(r1p1.x, r1p1.y, r1p2.x, r1p2.y, r2p1.x, r2p1.y))
        || (d4 == 0 && is_on_segment(r1p1.x, r1p1.y, r1p2.x, r1p2.y, r2p2.x, r2p2.y))
}

// https://en.wikipedia.org/wiki/Skew_lines#Nearest_points
pub fn closest_approach_of_lines(p1: Vec3, d1: Vec3, p2: Vec3, d2: Vec3) -> Option<(f32, f32)> {
    let n1 = d1.cross(d2.cross(d1));
    let n2 = d2.cross(d1.cross(d2));

    let denom1 = d1.dot(n2);
    let denom2 = d2.dot(n1);

    if denom1 != 0.0 && denom2 != 0.0 {
        let t1 = (p2 - p1).dot(n2) / denom1;
        let t2 = (p1 - p2).dot(n1) / denom2;
        Some((t1, t2))
    } else {
        None
    }
}

pub const TOP_OF_CLIPPING_WINDOW: f32 = 1.0;
pub const BOTTOM_OF_CLIPPING_WINDOW: f32 = -1.0;
pub const LEFT_OF_CLIPPING_WINDOW: f32 = -1.0;
pub const RIGHT_OF_CLIPPING_WINDOW: f32 = 1.0;

fn point_inside_boundary(vertex: Vec2, boundary: [Vec2; 2]) -> bool {
    // each window edge keeps one half plane, identified by its direction
    if boundary[1].x > boundary[0].x && vertex.y >= boundary[0].y {
        return true; // bottom edge
    }
    if boundary[1].x < boundary[0].x && vertex.y <= boundary[0].y {
        return true; // top edge
    }
    if boundary[1].y > boundary[0].y && vertex.x <= boundary[1].x {
        return true; // right edge
    }
    if boundary[1].y < boundary[0].y && vertex.x >= boundary[1].x {
        return true; // left edge
    }
    false
}

fn segment_boundary_intersection(first: Vec2, second: Vec2, boundary: [Vec2; 2]) -> Vec2 {
    if boundary[0].y == boundary[1].y {
        // horizontal boundary
        let y = boundary[0].y;
        Vec2::new(first.x + (y - first.y) * (second.x - first.x) / (second.y - first.y), y)
    } else {
        let x = boundary[0].x;
        Vec2::new(x, first.y + (x - first.x) * (second.y - first.y) / (second.x - first.x))
    }
}

fn sutherland_hodgman_clip(input: &[Vec2], boundary: [Vec2; 2]) -> Vec<Vec2> {
    let mut output = Vec::with_capacity(input.len() + 1);
    if input.is_empty() {
        return output;
    }
    let mut start = input[input.len() - 1];
    for &end in input {
        if point_inside_boundary(end, boundary) {
            if !point_inside_boundary(start, boundary) {
                output.push(segment_boundary_intersection(start, end, boundary));
            }
            output.push(end);
        } else if point_inside_boundary(start, boundary) {
            output.push(segment_boundary_intersection(start, end, boundary));
        }
        start = end;
    }
    output
}

// lines come back from the clipper with a duplicated vertex; collapse them
// so a clipped 2-vertex input stays a 2-vertex output
fn clean_clipped(input_len: usize, clipped: Vec<Vec2>) -> Vec<Vec2> {
    if input_len == 2 && clipped.len() == 3 {
        if clipped[0].x == clipped[1].x {
            vec![clipped[0], clipped[2]]
        } else {
            vec![clipped[0], clipped[1]]
        }
    } else {
        clipped
    }
}

/// Sutherland-Hodgman clip of a convex polygon to the -1..1 screen window.
pub fn clip_polygon_to_screen(vertices: &[Vec2]) -> Vec<Vec2> {
    let top_left = Vec2::new(LEFT_OF_CLIPPING_WINDOW, TOP_OF_CLIPPING_WINDOW);
    let top_right = Vec2::new(RIGHT_OF_CLIPPING_WINDOW, TOP_OF_CLIPPING_WINDOW);
    let bottom_left = Vec2::new(LEFT_OF_CLIPPING_WINDOW, BOTTOM_OF_CLIPPING_WINDOW);
    let bottom_right = Vec2::new(RIGHT_OF_CLIPPING_WINDOW, BOTTOM_OF_CLIPPING_WINDOW);

    let mut result = vertices.to_vec();
    for boundary in [
        [top_left, bottom_left],     // left
        [bottom_left, bottom_right], // bottom
        [bottom_right, top_right],   // right
        [top_right, top_left],       // top
    ] {
        let input_len = result.len();
        result = clean_clipped(input_len, sutherland_hodgman_clip(&result, boundary));
    }
    result
}

/// Split a rotation into its swing and twist parts about the given
/// normalized direction, with rotation = swing * twist.
pub fn swing_twist_decomposition(rotation: Quat, direction: Vec3) -> (Quat, Quat) {
    let axis_of_rotation = Vec3::new(rotation.x, rotation.y, rotation.z);
    let twist_imaginary = direction.dot(axis_of_rotation) * direction;
    let twist = Quat::from_xyzw(
        twist_imaginary.x,
        twist_imaginary.y,
        twist_imaginary.z,
        rotation.w,
    )
    .normalize();
    let swing = rotation * twist.inverse();
    (swing, twist)
}

/// Minimum angle between the cone axis and any point of the sphere.
pub fn cone_sphere_angle(cone_center: Vec3, cone_direction: Vec3, sphere_center: Vec3, sphere_radius: f32) -> f32 {
    let d = sphere_center - cone_center;
    let d_len = d.length();
    let theta = (d.dot(cone_direction) / d_len).acos();
    let phi = (sphere_radius / d_len).atan();
    (theta - phi).max(0.0)
}

// best fit plane through a point cloud: http://www.ilikebigbits.com/blog/2015/3/2/plane-from-points
pub fn plane_from_points(points: &[Vec3]) -> Option<Plane> {
    if points.len() < 3 {
        return None;
    }
    let sum: Vec3 = points.iter().sum();
    let centroid = sum * (1.0 / points.len() as f32);

    let (mut xx, mut xy, mut xz) = (0.0f32, 0.0f32, 0.0f32);
    let (mut yy, mut yz, mut zz) = (0.0f32, 0.0f32, 0.0f32);
    for point in points {
        let r = *point - centroid;
        xx += r.x * r.x;
        xy += r.x * r.y;
        xz += r.x * r.z;
        yy += r.y * r.y;
        yz += r.y * r.z;
        zz += r.z * r.z;
    }

    let det_x = yy * zz - yz * yz;
    let det_y = xx * zz - xz * xz;
    let det_z = xx * yy - xy * xy;
    let det_max = det_x.max(det_y).max(det_z);
    if det_max == 0.0 {
        return None; // the points do not span a plane
    }

    let dir = if det_max == det_x {
        Vec3::new(1.0, (xz * yz - xy * zz) / det_x, (xy * yz - xz * yy) / det_x)
    } else if det_max == det_y {
        Vec3::new((yz * xz - xy * zz) / det_y, 1.0, (xy * xz - yz * xx) / det_y)
    } else {
        Vec3::new((yz * xy - xz * yy) / det_z, (xz * xy - yz * xx) / det_z, 1.0)
    };
    Some(Plane::from_normal_and_point(dir.normalize(), centroid))
}

/// Intersection point of three planes given as (normal, dot(normal, point))
/// coefficient vectors. Note the w convention differs from [`Plane`]'s
/// d coefficient by sign.
pub fn three_plane_intersection(plane_a: Vec4, plane_b: Vec4, plane_c: Vec4) -> Option<Vec3> {
    let normal_a = plane_a.truncate();
    let normal_b = plane_b.truncate();
    let normal_c = plane_c.truncate();
    let u = normal_b.cross(normal_c);
    let denom = normal_a.dot(u);
    if denom.abs() < EPSILON {
        return None; // the planes do not meet at a single point
    }
    Some((plane_a.w * u + normal_a.cross(plane_c.w * normal_b - plane_b.w * normal_c)) / denom)
}
