use log::debug;

use crate::math::{Matrix4, Vector3};
use crate::models::Shape;

/// Contact information produced by a positive narrow-phase test.
///
/// Transient: consumed by the resolver and discarded, never persisted
/// across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInfo {
    /// Approximate contact point in world space.
    pub point: Vector3,
    /// Contact normal. For ordered pairs it points from the first body
    /// toward the second; for shape/plane pairs it is the plane normal
    /// oriented toward the other shape.
    pub normal: Vector3,
    /// Overlap depth along the normal.
    pub penetration: f64,
}

/// Narrow-phase test signature shared by every dispatch table entry.
pub type IntersectionFn =
    fn(&Shape, &Matrix4, &Shape, &Matrix4) -> Option<CollisionInfo>;

/// Stub for shape pairs without a registered test.
///
/// Reports no collision instead of failing: an unhandled pair is a
/// configuration gap, and bodies passing through each other is the signal
/// to look for in testing.
pub fn intersection_unimplemented(
    shape_a: &Shape,
    _transform_a: &Matrix4,
    shape_b: &Shape,
    _transform_b: &Matrix4,
) -> Option<CollisionInfo> {
    debug!(
        "no narrow-phase test registered for shape pair {:?}/{:?}",
        shape_a.kind(),
        shape_b.kind()
    );
    None
}

/// Sphere vs. sphere: compares center distance against summed radii.
pub fn sphere_vs_sphere(
    shape_a: &Shape,
    transform_a: &Matrix4,
    shape_b: &Shape,
    transform_b: &Matrix4,
) -> Option<CollisionInfo> {
    let (radius_a, radius_b) = match (shape_a, shape_b) {
        (Shape::Sphere { radius: ra }, Shape::Sphere { radius: rb }) => (*ra, *rb),
        _ => return None,
    };

    let center_a = transform_a.translation();
    let center_b = transform_b.translation();

    let delta = center_b - center_a;
    let combined = radius_a + radius_b;
    let dist_sq = delta.magnitude_squared();
    if dist_sq >= combined * combined {
        return None;
    }

    let dist = dist_sq.sqrt();
    // Coincident centers leave the separation direction undefined; pick one.
    let normal = if dist > 1e-9 {
        delta * (1.0 / dist)
    } else {
        Vector3::Y
    };
    let penetration = combined - dist;

    Some(CollisionInfo {
        point: center_a + normal * (radius_a - penetration * 0.5),
        normal,
        penetration,
    })
}

/// Sphere vs. plane, order-insensitive over its arguments.
///
/// Collides when the sphere center's distance to the plane is smaller than
/// the radius. The contact normal is the plane normal oriented toward the
/// sphere, so both argument orders report the identical contact.
pub fn sphere_vs_plane(
    shape_a: &Shape,
    transform_a: &Matrix4,
    shape_b: &Shape,
    transform_b: &Matrix4,
) -> Option<CollisionInfo> {
    let (radius, sphere_transform, plane_point, plane_normal, plane_transform) =
        match (shape_a, shape_b) {
            (Shape::Sphere { radius }, Shape::Plane { point, normal }) => {
                (*radius, transform_a, *point, *normal, transform_b)
            }
            (Shape::Plane { point, normal }, Shape::Sphere { radius }) => {
                (*radius, transform_b, *point, *normal, transform_a)
            }
            _ => return None,
        };

    let world_point = plane_transform.transform_point(plane_point);
    let world_normal = plane_transform.transform_vector(plane_normal).normalized();
    let center = sphere_transform.translation();

    let signed_dist = (center - world_point).dot(world_normal);
    if signed_dist.abs() >= radius {
        return None;
    }

    let normal = if signed_dist >= 0.0 {
        world_normal
    } else {
        -world_normal
    };

    Some(CollisionInfo {
        point: center - world_normal * signed_dist,
        normal,
        penetration: radius - signed_dist.abs(),
    })
}

/// Oriented box vs. plane, order-insensitive over its arguments.
///
/// Projects the box's three world-space half-extent vectors onto the plane
/// normal and compares the projection radius with the center distance.
pub fn box_vs_plane(
    shape_a: &Shape,
    transform_a: &Matrix4,
    shape_b: &Shape,
    transform_b: &Matrix4,
) -> Option<CollisionInfo> {
    let (half_extents, box_transform, plane_point, plane_normal, plane_transform) =
        match (shape_a, shape_b) {
            (Shape::OrientedBox { half_extents }, Shape::Plane { point, normal }) => {
                (half_extents, transform_a, *point, *normal, transform_b)
            }
            (Shape::Plane { point, normal }, Shape::OrientedBox { half_extents }) => {
                (half_extents, transform_b, *point, *normal, transform_a)
            }
            _ => return None,
        };

    let world_point = plane_transform.transform_point(plane_point);
    let world_normal = plane_transform.transform_vector(plane_normal).normalized();
    let center = box_transform.translation();

    let projection_radius: f64 = half_extents
        .iter()
        .map(|axis| box_transform.transform_vector(*axis).dot(world_normal).abs())
        .sum();

    let signed_dist = (center - world_point).dot(world_normal);
    if signed_dist.abs() >= projection_radius {
        return None;
    }

    let normal = if signed_dist >= 0.0 {
        world_normal
    } else {
        -world_normal
    };

    Some(CollisionInfo {
        point: center - world_normal * signed_dist,
        normal,
        penetration: projection_radius - signed_dist.abs(),
    })
}

/// Box vs. box separating-axis test.
///
/// Tests the 15 candidate axes (three face normals per box plus the nine
/// edge-edge cross products). The minimum-overlap axis becomes the contact
/// normal, oriented from the first box toward the second.
pub fn separating_axis_test(
    shape_a: &Shape,
    transform_a: &Matrix4,
    shape_b: &Shape,
    transform_b: &Matrix4,
) -> Option<CollisionInfo> {
    let (half_a, half_b) = match (shape_a, shape_b) {
        (
            Shape::OrientedBox { half_extents: ha },
            Shape::OrientedBox { half_extents: hb },
        ) => (ha, hb),
        _ => return None,
    };

    let center_a = transform_a.translation();
    let center_b = transform_b.translation();
    let t = center_b - center_a;

    // World-space half-extent vectors; their lengths carry the extents.
    let ext_a: Vec<Vector3> = half_a
        .iter()
        .map(|axis| transform_a.transform_vector(*axis))
        .collect();
    let ext_b: Vec<Vector3> = half_b
        .iter()
        .map(|axis| transform_b.transform_vector(*axis))
        .collect();

    let mut min_overlap = f64::MAX;
    let mut best_axis = Vector3::ZERO;

    let mut test_axis = |axis: Vector3| -> bool {
        let len_sq = axis.magnitude_squared();
        if len_sq < 1e-12 {
            // Degenerate axis (parallel edges); not a separating candidate.
            return true;
        }
        let axis = axis * (1.0 / len_sq.sqrt());

        let project = |extents: &[Vector3]| -> f64 {
            extents.iter().map(|e| e.dot(axis).abs()).sum()
        };
        let overlap = project(&ext_a) + project(&ext_b) - t.dot(axis).abs();
        if overlap <= 0.0 {
            return false;
        }
        if overlap < min_overlap {
            min_overlap = overlap;
            best_axis = axis;
        }
        true
    };

    for e in &ext_a {
        if !test_axis(*e) {
            return None;
        }
    }
    for e in &ext_b {
        if !test_axis(*e) {
            return None;
        }
    }
    for ea in &ext_a {
        for eb in &ext_b {
            if !test_axis(ea.cross(*eb)) {
                return None;
            }
        }
    }

    // Orient the contact normal from A toward B.
    let normal = if best_axis.dot(t) < 0.0 {
        -best_axis
    } else {
        best_axis
    };

    Some(CollisionInfo {
        point: (center_a + center_b) * 0.5,
        normal,
        penetration: min_overlap,
    })
}
