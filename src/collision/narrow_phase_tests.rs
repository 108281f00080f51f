use std::f64::consts::FRAC_PI_4;

use crate::assert_float_eq;
use crate::collision::{
    box_vs_plane, intersection_unimplemented, separating_axis_test, sphere_vs_plane,
    sphere_vs_sphere,
};
use crate::math::{Matrix4, Quaternion, Vector3};
use crate::models::Shape;

fn at(position: Vector3) -> Matrix4 {
    Matrix4::from_translation(position)
}

#[test]
fn test_sphere_vs_sphere_overlap() {
    let a = Shape::new_sphere(1.0).unwrap();
    let b = Shape::new_sphere(1.0).unwrap();

    let info = sphere_vs_sphere(
        &a,
        &at(Vector3::ZERO),
        &b,
        &at(Vector3::new(1.5, 0.0, 0.0)),
    )
    .unwrap();

    assert_float_eq(info.penetration, 0.5, 1e-12, None);
    assert_float_eq(info.normal.x, 1.0, 1e-12, None);
    assert_float_eq(info.normal.y, 0.0, 1e-12, None);
}

#[test]
fn test_sphere_vs_sphere_separated() {
    let a = Shape::new_sphere(1.0).unwrap();
    let b = Shape::new_sphere(1.0).unwrap();
    let result = sphere_vs_sphere(
        &a,
        &at(Vector3::ZERO),
        &b,
        &at(Vector3::new(2.5, 0.0, 0.0)),
    );
    assert!(result.is_none());
}

#[test]
fn test_sphere_vs_sphere_touching_is_not_a_collision() {
    let a = Shape::new_sphere(1.0).unwrap();
    let b = Shape::new_sphere(1.0).unwrap();
    let result = sphere_vs_sphere(
        &a,
        &at(Vector3::ZERO),
        &b,
        &at(Vector3::new(2.0, 0.0, 0.0)),
    );
    assert!(result.is_none());
}

#[test]
fn test_sphere_vs_sphere_coincident_centers() {
    let a = Shape::new_sphere(1.0).unwrap();
    let b = Shape::new_sphere(1.0).unwrap();
    let info = sphere_vs_sphere(&a, &at(Vector3::ZERO), &b, &at(Vector3::ZERO)).unwrap();
    assert_float_eq(info.penetration, 2.0, 1e-12, None);
    assert!(info.normal.is_finite());
    assert_float_eq(info.normal.magnitude(), 1.0, 1e-12, None);
}

#[test]
fn test_sphere_vs_plane_clear_of_the_plane() {
    // Center 0.5 above the plane with radius 0.3 leaves a 0.2 gap.
    let sphere = Shape::new_sphere(0.3).unwrap();
    let plane = Shape::new_plane(Vector3::ZERO, Vector3::Y).unwrap();
    let result = sphere_vs_plane(
        &sphere,
        &at(Vector3::new(0.0, 0.5, 0.0)),
        &plane,
        &at(Vector3::ZERO),
    );
    assert!(result.is_none());
}

#[test]
fn test_sphere_vs_plane_penetrating() {
    let sphere = Shape::new_sphere(0.3).unwrap();
    let plane = Shape::new_plane(Vector3::ZERO, Vector3::Y).unwrap();
    let info = sphere_vs_plane(
        &sphere,
        &at(Vector3::new(0.0, 0.25, 0.0)),
        &plane,
        &at(Vector3::ZERO),
    )
    .unwrap();

    assert_float_eq(info.penetration, 0.05, 1e-12, None);
    assert_float_eq(info.normal.y, 1.0, 1e-12, None);
    assert_float_eq(info.point.y, 0.0, 1e-12, None);
}

#[test]
fn test_sphere_vs_plane_is_order_insensitive() {
    let sphere = Shape::new_sphere(0.3).unwrap();
    let plane = Shape::new_plane(Vector3::ZERO, Vector3::Y).unwrap();
    let sphere_transform = at(Vector3::new(0.0, 0.25, 0.0));
    let plane_transform = at(Vector3::ZERO);

    let forward = sphere_vs_plane(&sphere, &sphere_transform, &plane, &plane_transform).unwrap();
    let reversed = sphere_vs_plane(&plane, &plane_transform, &sphere, &sphere_transform).unwrap();
    assert_eq!(forward, reversed);
}

#[test]
fn test_sphere_below_plane_flips_the_normal() {
    let sphere = Shape::new_sphere(0.3).unwrap();
    let plane = Shape::new_plane(Vector3::ZERO, Vector3::Y).unwrap();
    let info = sphere_vs_plane(
        &sphere,
        &at(Vector3::new(0.0, -0.25, 0.0)),
        &plane,
        &at(Vector3::ZERO),
    )
    .unwrap();
    assert_float_eq(info.normal.y, -1.0, 1e-12, None);
    assert_float_eq(info.penetration, 0.05, 1e-12, None);
}

#[test]
fn test_box_vs_plane_penetrating() {
    let cube = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let plane = Shape::new_plane(Vector3::ZERO, Vector3::Y).unwrap();
    let info = box_vs_plane(
        &cube,
        &at(Vector3::new(0.0, 0.45, 0.0)),
        &plane,
        &at(Vector3::ZERO),
    )
    .unwrap();

    assert_float_eq(info.penetration, 0.05, 1e-12, None);
    assert_float_eq(info.normal.y, 1.0, 1e-12, None);
}

#[test]
fn test_box_vs_plane_is_order_insensitive() {
    let cube = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let plane = Shape::new_plane(Vector3::ZERO, Vector3::Y).unwrap();
    let cube_transform = at(Vector3::new(0.0, 0.45, 0.0));
    let plane_transform = at(Vector3::ZERO);

    let forward = box_vs_plane(&cube, &cube_transform, &plane, &plane_transform).unwrap();
    let reversed = box_vs_plane(&plane, &plane_transform, &cube, &cube_transform).unwrap();
    assert_eq!(forward, reversed);
}

#[test]
fn test_tilted_box_vs_plane_uses_projected_extent() {
    // A unit cube rotated 45 degrees about Z projects sqrt(2)/2 onto Y.
    let cube = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let plane = Shape::new_plane(Vector3::ZERO, Vector3::Y).unwrap();

    let rotation = Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_4);
    let mut transform = Matrix4::from_quaternion(rotation);
    transform.set_translation(Vector3::new(0.0, 0.6, 0.0));

    // An upright cube at 0.6 clears the plane, a tilted one does not.
    let info = box_vs_plane(&cube, &transform, &plane, &at(Vector3::ZERO)).unwrap();
    let expected_penetration = 2.0_f64.sqrt() / 2.0 - 0.6;
    assert_float_eq(info.penetration, expected_penetration, 1e-10, None);
}

#[test]
fn test_box_vs_box_axis_aligned_overlap() {
    let a = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let b = Shape::new_box(1.0, 1.0, 1.0).unwrap();

    let info = separating_axis_test(
        &a,
        &at(Vector3::ZERO),
        &b,
        &at(Vector3::new(0.9, 0.0, 0.0)),
    )
    .unwrap();

    assert_float_eq(info.penetration, 0.1, 1e-12, None);
    assert_float_eq(info.normal.x, 1.0, 1e-12, None);
    assert_float_eq(info.point.x, 0.45, 1e-12, None);
}

#[test]
fn test_box_vs_box_separated() {
    let a = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let b = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let result = separating_axis_test(
        &a,
        &at(Vector3::ZERO),
        &b,
        &at(Vector3::new(2.1, 0.0, 0.0)),
    );
    assert!(result.is_none());
}

#[test]
fn test_box_vs_box_diagonal_separation() {
    // Overlapping on each coordinate axis but separated along the diagonal
    // would be a false positive without the cross-product axes; here the face
    // normals already separate, the rotated case below needs the full set.
    let a = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let b = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let result = separating_axis_test(
        &a,
        &at(Vector3::ZERO),
        &b,
        &at(Vector3::new(1.2, 1.2, 0.0)),
    );
    assert!(result.is_none());
}

#[test]
fn test_box_vs_box_rotated_overlap() {
    let a = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let b = Shape::new_box(1.0, 1.0, 1.0).unwrap();

    let rotation = Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_4);
    let mut transform_b = Matrix4::from_quaternion(rotation);
    transform_b.set_translation(Vector3::new(1.2, 0.0, 0.0));

    let info = separating_axis_test(&a, &at(Vector3::ZERO), &b, &transform_b).unwrap();

    // Minimum overlap is along A's X face normal: 0.5 + sqrt(2)/2 - 1.2.
    let expected = 0.5 + 2.0_f64.sqrt() / 2.0 - 1.2;
    assert_float_eq(info.penetration, expected, 1e-10, None);
    assert_float_eq(info.normal.x, 1.0, 1e-10, None);
}

#[test]
fn test_box_vs_box_normal_points_from_first_to_second() {
    let a = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let b = Shape::new_box(1.0, 1.0, 1.0).unwrap();

    let info = separating_axis_test(
        &a,
        &at(Vector3::new(0.9, 0.0, 0.0)),
        &b,
        &at(Vector3::ZERO),
    )
    .unwrap();
    assert_float_eq(info.normal.x, -1.0, 1e-12, None);
}

#[test]
fn test_unimplemented_pair_reports_no_collision() {
    let plane = Shape::new_plane(Vector3::ZERO, Vector3::Y).unwrap();
    let result = intersection_unimplemented(&plane, &at(Vector3::ZERO), &plane, &at(Vector3::Y));
    assert!(result.is_none());
}
