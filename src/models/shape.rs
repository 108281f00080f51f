use crate::errors::PhysicsError;
use crate::math::{Matrix4, Vector3};

/// Shape type tag used to index the collision dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(usize)]
pub enum ShapeKind {
    Sphere = 0,
    OrientedBox = 1,
    Plane = 2,
}

impl ShapeKind {
    /// Number of shape kinds; the dispatch table is `COUNT × COUNT`.
    pub const COUNT: usize = 3;
}

/// Geometric primitive carried by a rigid body.
///
/// Immutable once attached to a body. Shape parameters are expressed in the
/// body's local space; the body's transform places them in the world.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Sphere with a radius.
    Sphere { radius: f64 },
    /// Oriented box described by three half-extent axis vectors.
    OrientedBox { half_extents: [Vector3; 3] },
    /// Infinite plane through a point with a unit normal.
    Plane { point: Vector3, normal: Vector3 },
}

impl Shape {
    /// Creates a new sphere with the given radius.
    ///
    /// # Errors
    /// Returns `PhysicsError::InvalidRadius` if the radius is not positive and finite.
    pub fn new_sphere(radius: f64) -> Result<Self, PhysicsError> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(PhysicsError::InvalidRadius);
        }
        Ok(Shape::Sphere { radius })
    }

    /// Creates a new oriented box from three half-extent axis vectors.
    ///
    /// Each vector points along one local box axis with length equal to half
    /// the box's extent along that axis.
    ///
    /// # Errors
    /// Returns `PhysicsError::InvalidHalfExtents` if any axis vector is
    /// zero-length or non-finite.
    pub fn new_oriented_box(half_extents: [Vector3; 3]) -> Result<Self, PhysicsError> {
        for axis in &half_extents {
            if !axis.is_finite() || axis.magnitude_squared() < 1e-24 {
                return Err(PhysicsError::InvalidHalfExtents);
            }
        }
        Ok(Shape::OrientedBox { half_extents })
    }

    /// Creates a new axis-aligned box with the given full dimensions.
    ///
    /// # Errors
    /// Returns `PhysicsError::InvalidHalfExtents` for non-positive dimensions.
    pub fn new_box(width: f64, height: f64, depth: f64) -> Result<Self, PhysicsError> {
        Shape::new_oriented_box([
            Vector3::X * (width / 2.0),
            Vector3::Y * (height / 2.0),
            Vector3::Z * (depth / 2.0),
        ])
    }

    /// Creates a new plane through `point` with the given normal.
    ///
    /// The normal is normalized on construction.
    ///
    /// # Errors
    /// Returns `PhysicsError::DegenerateNormal` for a zero-length normal.
    pub fn new_plane(point: Vector3, normal: Vector3) -> Result<Self, PhysicsError> {
        if !normal.is_finite() || normal.magnitude_squared() < 1e-24 {
            return Err(PhysicsError::DegenerateNormal);
        }
        Ok(Shape::Plane {
            point,
            normal: normal.normalized(),
        })
    }

    /// Returns the type tag used for dispatch table lookup.
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Sphere { .. } => ShapeKind::Sphere,
            Shape::OrientedBox { .. } => ShapeKind::OrientedBox,
            Shape::Plane { .. } => ShapeKind::Plane,
        }
    }

    /// Returns the moment of inertia tensor for the shape around its center of mass.
    ///
    /// Planes are static geometry; their tensor is identity so the inverse
    /// transform stays well-defined even if one is misconfigured as dynamic.
    pub fn moment_of_inertia(&self, mass: f64) -> Matrix4 {
        match self {
            Shape::Sphere { radius } => {
                // Solid sphere: (2/5) * m * r²
                let i = (2.0 / 5.0) * mass * radius * radius;
                Matrix4::from_diagonal(Vector3::new(i, i, i))
            }
            Shape::OrientedBox { half_extents } => {
                let w = 2.0 * half_extents[0].magnitude();
                let h = 2.0 * half_extents[1].magnitude();
                let d = 2.0 * half_extents[2].magnitude();
                let ixx = (1.0 / 12.0) * mass * (h * h + d * d);
                let iyy = (1.0 / 12.0) * mass * (w * w + d * d);
                let izz = (1.0 / 12.0) * mass * (w * w + h * h);
                Matrix4::from_diagonal(Vector3::new(ixx, iyy, izz))
            }
            Shape::Plane { .. } => Matrix4::identity(),
        }
    }
}
