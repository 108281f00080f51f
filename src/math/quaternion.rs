use std::ops::{Add, Mul};

use crate::math::Vector3;

/// Quaternion representation for 3D rotations to avoid gimbal lock.
///
/// Orientation quaternions are kept normalized; `normalized` is called after
/// every angular integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub w: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Quaternion {
    /// Creates a new identity quaternion (no rotation).
    pub fn identity() -> Self {
        Self {
            w: 1.0,
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Self { w, x, y, z }
    }

    /// Creates a pure (zero-scalar) quaternion from a vector.
    ///
    /// Used to fold an angular velocity into an orientation update.
    pub fn pure(v: Vector3) -> Self {
        Self { w: 0.0, x: v.x, y: v.y, z: v.z }
    }

    /// Creates a quaternion from axis-angle representation.
    pub fn from_axis_angle(axis: Vector3, angle: f64) -> Self {
        let half_angle = angle / 2.0;
        let sin_half = half_angle.sin();
        let magnitude = axis.magnitude();

        if magnitude < 1e-10 {
            return Quaternion::identity();
        }

        let n = axis * (1.0 / magnitude);

        Quaternion {
            w: half_angle.cos(),
            x: n.x * sin_half,
            y: n.y * sin_half,
            z: n.z * sin_half,
        }
    }

    /// Returns the length/magnitude of the quaternion.
    pub fn magnitude(&self) -> f64 {
        (self.w * self.w + self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Returns a normalized version of the quaternion.
    pub fn normalized(&self) -> Self {
        let mag = self.magnitude();
        if mag < 1e-10 {
            return Quaternion::identity();
        }
        Quaternion {
            w: self.w / mag,
            x: self.x / mag,
            y: self.y / mag,
            z: self.z / mag,
        }
    }

    /// Multiplies two quaternions (composition of rotations).
    pub fn multiply(&self, other: &Quaternion) -> Quaternion {
        Quaternion {
            w: self.w * other.w - self.x * other.x - self.y * other.y - self.z * other.z,
            x: self.w * other.x + self.x * other.w + self.y * other.z - self.z * other.y,
            y: self.w * other.y - self.x * other.z + self.y * other.w + self.z * other.x,
            z: self.w * other.z + self.x * other.y - self.y * other.x + self.z * other.w,
        }
    }

    /// Returns the conjugate of the quaternion.
    pub fn conjugate(&self) -> Quaternion {
        Quaternion {
            w: self.w,
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }

    /// Uniformly scales all four components.
    pub fn scale(&self, factor: f64) -> Quaternion {
        Quaternion {
            w: self.w * factor,
            x: self.x * factor,
            y: self.y * factor,
            z: self.z * factor,
        }
    }

    /// Rotates a vector by this quaternion: q * v * q⁻¹.
    pub fn rotate_vector(&self, v: Vector3) -> Vector3 {
        let q = self.normalized();
        let rotated = q.multiply(&Quaternion::pure(v)).multiply(&q.conjugate());
        Vector3::new(rotated.x, rotated.y, rotated.z)
    }
}

impl Add for Quaternion {
    type Output = Quaternion;

    fn add(self, other: Quaternion) -> Quaternion {
        Quaternion {
            w: self.w + other.w,
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Mul for Quaternion {
    type Output = Quaternion;

    fn mul(self, other: Quaternion) -> Quaternion {
        self.multiply(&other)
    }
}
