use std::f64::consts::{FRAC_PI_2, PI};

use crate::assert_float_eq;
use crate::math::{Quaternion, Vector3};

#[test]
fn test_identity_rotation_leaves_vectors_unchanged() {
    let v = Vector3::new(1.0, -2.0, 3.0);
    let rotated = Quaternion::identity().rotate_vector(v);
    assert_float_eq(rotated.x, v.x, 1e-12, None);
    assert_float_eq(rotated.y, v.y, 1e-12, None);
    assert_float_eq(rotated.z, v.z, 1e-12, None);
}

#[test]
fn test_from_axis_angle_quarter_turn() {
    let q = Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_2);
    let rotated = q.rotate_vector(Vector3::X);
    assert_float_eq(rotated.x, 0.0, 1e-10, None);
    assert_float_eq(rotated.y, 1.0, 1e-10, None);
    assert_float_eq(rotated.z, 0.0, 1e-10, None);
}

#[test]
fn test_from_axis_angle_normalizes_the_axis() {
    let unit = Quaternion::from_axis_angle(Vector3::Y, 1.0);
    let scaled = Quaternion::from_axis_angle(Vector3::Y * 25.0, 1.0);
    assert_float_eq(unit.w, scaled.w, 1e-12, None);
    assert_float_eq(unit.y, scaled.y, 1e-12, None);
}

#[test]
fn test_from_axis_angle_degenerate_axis_is_identity() {
    let q = Quaternion::from_axis_angle(Vector3::ZERO, 1.3);
    assert_eq!(q, Quaternion::identity());
}

#[test]
fn test_multiplication_composes_rotations() {
    let quarter = Quaternion::from_axis_angle(Vector3::Z, FRAC_PI_2);
    let half = quarter * quarter;
    let expected = Quaternion::from_axis_angle(Vector3::Z, PI);

    let a = half.rotate_vector(Vector3::X);
    let b = expected.rotate_vector(Vector3::X);
    assert_float_eq(a.x, b.x, 1e-10, None);
    assert_float_eq(a.y, b.y, 1e-10, None);
    assert_float_eq(a.x, -1.0, 1e-10, None);
}

#[test]
fn test_normalized_produces_unit_magnitude() {
    let q = Quaternion::new(2.0, -3.0, 1.0, 0.5).normalized();
    assert_float_eq(q.magnitude(), 1.0, 1e-12, None);
}

#[test]
fn test_conjugate_undoes_rotation() {
    let q = Quaternion::from_axis_angle(Vector3::new(1.0, 1.0, 0.0), 0.8);
    let v = Vector3::new(3.0, -1.0, 2.0);
    let round_trip = q.conjugate().rotate_vector(q.rotate_vector(v));
    assert_float_eq(round_trip.x, v.x, 1e-10, None);
    assert_float_eq(round_trip.y, v.y, 1e-10, None);
    assert_float_eq(round_trip.z, v.z, 1e-10, None);
}

#[test]
fn test_integration_style_update_stays_normalized() {
    // The angular step advances orientation as q += 0.5 * dt * (w_quat * q).
    let angular_velocity = Vector3::new(0.0, 3.0, 0.0);
    let dt = 0.016;

    let mut orientation = Quaternion::identity();
    for _ in 0..100 {
        let spin = Quaternion::pure(angular_velocity);
        orientation = (orientation + (spin * orientation).scale(0.5 * dt)).normalized();
    }
    assert_float_eq(orientation.magnitude(), 1.0, 1e-12, None);
    // Spinning about Y keeps the axis component in Y only.
    assert_float_eq(orientation.x, 0.0, 1e-12, None);
    assert_float_eq(orientation.z, 0.0, 1e-12, None);
}

#[test]
fn test_pure_quaternion_has_zero_scalar() {
    let q = Quaternion::pure(Vector3::new(1.0, 2.0, 3.0));
    assert_float_eq(q.w, 0.0, 1e-12, None);
    assert_float_eq(q.x, 1.0, 1e-12, None);
}
