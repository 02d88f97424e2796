use std::f32::consts::FRAC_PI_2;

use glam::{Quat, Vec3};
use rand::{Rng, SeedableRng};

use crate::aabox::AABox;
use crate::aacube::AACube;
use crate::conical_frustum::ConicalViewFrustum;
use crate::dual_quaternion::DualQuaternion;
use crate::geometry::Triangle;
use crate::transform::Transform;
use crate::triangle_set::TriangleSet;
use crate::view_frustum::{Intersection, ViewFrustum};

fn tiled_floor() -> TriangleSet {
    // a 10 x 10 floor of upward facing tiles at y = 0
    let mut floor = TriangleSet::new();
    floor.reserve(200);
    for i in 0..10 {
        for j in 0..10 {
            let x = i as f32;
            let z = j as f32;
            floor.insert(Triangle::new(
                Vec3::new(x, 0.0, z),
                Vec3::new(x, 0.0, z + 1.0),
                Vec3::new(x + 1.0, 0.0, z),
            ));
            floor.insert(Triangle::new(
                Vec3::new(x + 1.0, 0.0, z + 1.0),
                Vec3::new(x + 1.0, 0.0, z),
                Vec3::new(x, 0.0, z + 1.0),
            ));
        }
    }
    floor
}

fn standard_frustum() -> ViewFrustum {
    let mut frustum = ViewFrustum::new();
    frustum.set_position(Vec3::ZERO);
    frustum.set_orientation(Quat::IDENTITY);
    frustum.set_perspective(45.0, 1.0, 0.1, 100.0);
    frustum.calculate();
    frustum
}

#[test]
fn test_pick_ray_from_camera_hits_the_floor() {
    let mut floor = tiled_floor();

    // camera 10 above the floor, looking straight down
    let mut frustum = ViewFrustum::new();
    frustum.set_position(Vec3::new(5.25, 10.0, 5.25));
    frustum.set_orientation(Quat::from_rotation_x(-FRAC_PI_2));
    frustum.set_perspective(45.0, 1.0, 0.1, 100.0);
    frustum.calculate();

    let (origin, direction) = frustum.compute_pick_ray(0.5, 0.5);
    assert!(direction.abs_diff_eq(-Vec3::Y, 0.001));

    // the ray starts on the near plane, a tenth of the way down
    let hit = floor.find_ray_intersection(origin, direction, false).unwrap();
    assert!((hit.distance - 9.9).abs() < 0.001);
    assert!(hit.normal.abs_diff_eq(Vec3::Y, 0.001));
    // the first triangle of tile (5, 5)
    assert_eq!(hit.triangle_index, 2 * (5 * 10 + 5));

    // the picked point is in view
    let picked = origin + hit.distance * direction;
    assert!(frustum.point_intersects_frustum(picked));
}

#[test]
fn test_conical_approximation_is_conservative() {
    let frustum = standard_frustum();
    let cone = ConicalViewFrustum::from_view_frustum(&frustum);

    // anything the precise frustum or keyhole keeps, the cone must keep too
    for ix in (-15..=15).step_by(5) {
        for iz in (-15..=15).step_by(5) {
            let center = Vec3::new(ix as f32, 0.0, iz as f32);
            let cube = AACube::new(center - Vec3::splat(0.5), 1.0);
            if frustum.cube_keyhole_intersection(&cube) != Intersection::Outside {
                assert!(
                    cone.intersects_aacube(&cube),
                    "cone culled a visible cube at {:?}",
                    center
                );
            }
        }
    }
}

#[test]
fn test_keyhole_keeps_nearby_entities_behind_the_camera() {
    let mut frustum = standard_frustum();
    frustum.set_center_sphere_radius(6.0);

    // a cube behind the camera but within the center sphere
    let cube = AACube::new(Vec3::new(-0.5, -0.5, 4.5), 1.0);
    assert_eq!(frustum.cube_frustum_intersection(&cube), Intersection::Outside);
    assert!(!frustum.point_intersects_frustum(cube.center()));

    assert_eq!(frustum.cube_keyhole_intersection(&cube), Intersection::Inside);
    assert!(frustum.cube_intersects_keyhole(&cube));
    assert!(frustum.sphere_intersects_keyhole(cube.center(), 0.5));
}

#[test]
fn test_near_silhouette_occludes_far_silhouette() {
    let frustum = standard_frustum();

    let near_cube = AACube::new(Vec3::new(-1.0, -1.0, -11.0), 2.0);
    let far_cube = AACube::new(Vec3::new(-0.5, -0.5, -20.5), 1.0);
    let side_cube = AACube::new(Vec3::new(3.5, -0.5, -20.5), 1.0);

    let near_polygon = frustum.projected_polygon(&near_cube);
    let far_polygon = frustum.projected_polygon(&far_cube);
    let side_polygon = frustum.projected_polygon(&side_cube);

    assert!(near_polygon.all_in_view);
    assert!(near_polygon.occludes(&far_polygon));
    assert!(!far_polygon.occludes(&near_polygon));

    // off to the side there is no overlap at all
    assert!(!near_polygon.occludes(&side_polygon));
    assert!(!near_polygon.intersects(&side_polygon));

    // the depth keys order the polygons for front to back processing
    assert!(near_polygon.distance < far_polygon.distance);
}

#[test]
fn test_transform_and_dual_quaternion_agree_on_rigid_motion() {
    let rotation = Quat::from_rotation_y(FRAC_PI_2);
    let translation = Vec3::new(1.0, 2.0, 3.0);

    let transform = Transform::new(translation, rotation, Vec3::ONE);
    let dual_quaternion = DualQuaternion::from_rotation_translation(rotation, translation);

    for point in [Vec3::X, Vec3::new(-2.0, 0.5, 4.0), Vec3::ZERO] {
        let via_transform = transform.transform_point(point);
        let via_dual_quaternion = dual_quaternion.transform_point(point);
        let via_matrix = transform.matrix().transform_point3(point);
        assert!(via_transform.abs_diff_eq(via_dual_quaternion, 0.001));
        assert!(via_transform.abs_diff_eq(via_matrix, 0.001));
    }

    assert!(transform
        .transform_point(Vec3::X)
        .abs_diff_eq(Vec3::new(1.0, 2.0, 2.0), 0.001));
}

#[test]
fn test_accumulated_bounds_contain_rotated_cloud() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(9);
    let points: Vec<Vec3> = (0..200)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
                rng.gen_range(-20.0..20.0),
            )
        })
        .collect();

    let mut bounds = AABox::default();
    assert!(bounds.is_invalid());
    for point in &points {
        bounds.add_point(*point);
    }
    assert!(!bounds.is_invalid());
    // scale = maximum - corner loses ULPs, so allow a hair of slack
    for point in &points {
        assert!(
            bounds.expanded_contains(*point, 0.001),
            "lost point {:?}",
            point
        );
    }

    // rotating the bounds must keep covering the rotated cloud
    let rotation = Quat::from_axis_angle(Vec3::new(1.0, 1.0, 0.3).normalize(), 1.2);
    bounds.rotate(rotation);
    for point in &points {
        assert!(bounds.expanded_contains(rotation * *point, 0.001));
    }
}

#[test]
fn test_box_bounds_follow_transform() {
    let transform = Transform::new(
        Vec3::new(10.0, 0.0, 0.0),
        Quat::from_rotation_y(FRAC_PI_2),
        Vec3::splat(2.0),
    );

    let mut bounds = AABox::new(Vec3::ZERO, Vec3::ONE);
    let center = bounds.center();
    bounds.transform(&transform);

    assert!(bounds.corner.abs_diff_eq(Vec3::new(10.0, 0.0, -2.0), 0.001));
    assert!(bounds.scale.abs_diff_eq(Vec3::splat(2.0), 0.001));
    // the box center moves exactly like any other point
    assert!(bounds
        .center()
        .abs_diff_eq(transform.transform_point(center), 0.001));
}
