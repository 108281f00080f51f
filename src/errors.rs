use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building or mutating the physics world.
#[derive(Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Indicates an invalid mass value for a dynamic body (e.g., negative, zero, or non-finite mass).
    InvalidMass,
    /// Indicates an invalid sphere radius (e.g., negative, zero, or non-finite radius).
    InvalidRadius,
    /// Indicates degenerate box half-extents (zero-length or non-finite axis vectors).
    InvalidHalfExtents,
    /// Indicates a zero-length (or non-finite) direction where a normal vector is required.
    DegenerateNormal,
    /// Indicates an invalid restitution coefficient (negative or non-finite).
    InvalidRestitution,
    /// Indicates a body handle that is stale or was never issued by this world.
    UnknownBody,
}

impl fmt::Display for PhysicsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PhysicsError::InvalidMass => write!(f, "Invalid mass value"),
            PhysicsError::InvalidRadius => write!(f, "Invalid sphere radius"),
            PhysicsError::InvalidHalfExtents => write!(f, "Invalid box half-extents"),
            PhysicsError::DegenerateNormal => write!(f, "Normal vector has zero length"),
            PhysicsError::InvalidRestitution => write!(f, "Invalid restitution coefficient"),
            PhysicsError::UnknownBody => write!(f, "Unknown or stale rigid body handle"),
        }
    }
}

impl Error for PhysicsError {}
