use crate::collision::{
    box_vs_plane, intersection_unimplemented, separating_axis_test, sphere_vs_plane,
    sphere_vs_sphere, CollisionInfo, IntersectionFn,
};
use crate::math::Matrix4;
use crate::models::{Shape, ShapeKind};

/// Fixed-size narrow-phase lookup indexed by `(ShapeKind, ShapeKind)`.
///
/// Owned by the physics world and populated once at construction; every
/// entry defaults to the unimplemented stub, and the handled pairs are
/// registered in both argument orders. The table is read-only during
/// simulation, so concurrent lookups need no locking.
pub struct DispatchTable {
    table: [[IntersectionFn; ShapeKind::COUNT]; ShapeKind::COUNT],
}

impl DispatchTable {
    pub fn new() -> Self {
        let mut table =
            [[intersection_unimplemented as IntersectionFn; ShapeKind::COUNT]; ShapeKind::COUNT];

        table[ShapeKind::Sphere as usize][ShapeKind::Sphere as usize] = sphere_vs_sphere;
        table[ShapeKind::OrientedBox as usize][ShapeKind::OrientedBox as usize] =
            separating_axis_test;
        table[ShapeKind::OrientedBox as usize][ShapeKind::Plane as usize] = box_vs_plane;
        table[ShapeKind::Plane as usize][ShapeKind::OrientedBox as usize] = box_vs_plane;
        table[ShapeKind::Sphere as usize][ShapeKind::Plane as usize] = sphere_vs_plane;
        table[ShapeKind::Plane as usize][ShapeKind::Sphere as usize] = sphere_vs_plane;

        DispatchTable { table }
    }

    /// Runs the narrow-phase test registered for the pair of shape kinds.
    ///
    /// `None` means no collision, including the unhandled-pair case.
    pub fn test(
        &self,
        shape_a: &Shape,
        transform_a: &Matrix4,
        shape_b: &Shape,
        transform_b: &Matrix4,
    ) -> Option<CollisionInfo> {
        let func = self.table[shape_a.kind() as usize][shape_b.kind() as usize];
        func(shape_a, transform_a, shape_b, transform_b)
    }
}

impl Default for DispatchTable {
    fn default() -> Self {
        DispatchTable::new()
    }
}
