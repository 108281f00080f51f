use crate::assert_float_eq;
use crate::collision::DispatchTable;
use crate::math::{Matrix4, Vector3};
use crate::models::Shape;

fn at(position: Vector3) -> Matrix4 {
    Matrix4::from_translation(position)
}

#[test]
fn test_dispatch_routes_sphere_vs_sphere() {
    let table = DispatchTable::new();
    let a = Shape::new_sphere(1.0).unwrap();
    let b = Shape::new_sphere(1.0).unwrap();

    let info = table
        .test(&a, &at(Vector3::ZERO), &b, &at(Vector3::new(1.5, 0.0, 0.0)))
        .unwrap();
    assert_float_eq(info.penetration, 0.5, 1e-12, None);
}

#[test]
fn test_dispatch_routes_box_vs_box() {
    let table = DispatchTable::new();
    let a = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let b = Shape::new_box(1.0, 1.0, 1.0).unwrap();

    let info = table
        .test(&a, &at(Vector3::ZERO), &b, &at(Vector3::new(0.9, 0.0, 0.0)))
        .unwrap();
    assert_float_eq(info.penetration, 0.1, 1e-12, None);
}

#[test]
fn test_dispatch_handles_both_argument_orders() {
    let table = DispatchTable::new();
    let sphere = Shape::new_sphere(0.3).unwrap();
    let plane = Shape::new_plane(Vector3::ZERO, Vector3::Y).unwrap();
    let sphere_transform = at(Vector3::new(0.0, 0.25, 0.0));
    let plane_transform = at(Vector3::ZERO);

    let forward = table
        .test(&sphere, &sphere_transform, &plane, &plane_transform)
        .unwrap();
    let reversed = table
        .test(&plane, &plane_transform, &sphere, &sphere_transform)
        .unwrap();
    assert_eq!(forward, reversed);
    assert_float_eq(forward.penetration, 0.05, 1e-12, None);

    let cube = Shape::new_box(1.0, 1.0, 1.0).unwrap();
    let cube_transform = at(Vector3::new(0.0, 0.45, 0.0));
    let forward = table
        .test(&cube, &cube_transform, &plane, &plane_transform)
        .unwrap();
    let reversed = table
        .test(&plane, &plane_transform, &cube, &cube_transform)
        .unwrap();
    assert_eq!(forward, reversed);
}

#[test]
fn test_unregistered_pair_falls_back_to_the_stub() {
    let table = DispatchTable::new();
    let a = Shape::new_plane(Vector3::ZERO, Vector3::Y).unwrap();
    let b = Shape::new_plane(Vector3::ZERO, Vector3::X).unwrap();
    // No plane/plane test is registered; overlap is reported as no collision.
    assert!(table.test(&a, &at(Vector3::ZERO), &b, &at(Vector3::ZERO)).is_none());
}

#[test]
fn test_default_matches_new() {
    let table = DispatchTable::default();
    let a = Shape::new_sphere(1.0).unwrap();
    let b = Shape::new_sphere(1.0).unwrap();
    assert!(table
        .test(&a, &at(Vector3::ZERO), &b, &at(Vector3::new(0.5, 0.0, 0.0)))
        .is_some());
}
