use std::ops::BitOr;

use crate::errors::PhysicsError;
use crate::math::{Matrix4, Quaternion, Vector3};
use crate::models::Shape;

/// Mask-based flag set describing how the world treats a body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BodyFlags(u32);

impl BodyFlags {
    /// No flags set; a regular dynamic body.
    pub const NONE: BodyFlags = BodyFlags(0);
    /// The body never integrates and never receives positional correction.
    pub const STATIC: BodyFlags = BodyFlags(1);
    /// The body skips gravity accumulation but is otherwise fully simulated.
    pub const WEIGHTLESS: BodyFlags = BodyFlags(1 << 1);

    pub fn contains(&self, other: BodyFlags) -> bool {
        (self.0 & other.0) == other.0
    }

    pub fn insert(&mut self, other: BodyFlags) {
        self.0 |= other.0;
    }

    pub fn remove(&mut self, other: BodyFlags) {
        self.0 &= !other.0;
    }
}

impl BitOr for BodyFlags {
    type Output = BodyFlags;

    fn bitor(self, other: BodyFlags) -> BodyFlags {
        BodyFlags(self.0 | other.0)
    }
}

/// Default coefficient of restitution for newly constructed bodies.
pub const DEFAULT_RESTITUTION: f64 = 0.5;

/// Dynamic state of a simulated body.
///
/// The body owns its `Shape` by value; the transform is the authoritative
/// pose. `forces` and `torques` are per-frame accumulators drained by the
/// world on every step.
#[derive(Debug, Clone)]
pub struct RigidBody {
    pub transform: Matrix4,
    pub orientation: Quaternion,
    pub velocity: Vector3,
    pub angular_velocity: Vector3,
    pub angular_momentum: Vector3,
    pub forces: Vec<Vector3>,
    pub torques: Vec<Vector3>,
    pub mass: f64,
    pub inertia_tensor: Matrix4,
    pub coefficient_of_restitution: f64,
    pub flags: BodyFlags,
    pub shape: Shape,
}

impl RigidBody {
    /// Creates a new dynamic body with the given shape and mass.
    ///
    /// The inertia tensor is derived from the shape; restitution defaults to
    /// [`DEFAULT_RESTITUTION`].
    ///
    /// # Errors
    /// Returns `PhysicsError::InvalidMass` if the mass is not positive and
    /// finite. Dynamic bodies must carry positive mass so that the impulse
    /// solver's inverse-mass terms stay well-defined.
    pub fn new(shape: Shape, mass: f64) -> Result<Self, PhysicsError> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(PhysicsError::InvalidMass);
        }
        let inertia_tensor = shape.moment_of_inertia(mass);
        Ok(RigidBody {
            transform: Matrix4::identity(),
            orientation: Quaternion::identity(),
            velocity: Vector3::ZERO,
            angular_velocity: Vector3::ZERO,
            angular_momentum: Vector3::ZERO,
            forces: Vec::new(),
            torques: Vec::new(),
            mass,
            inertia_tensor,
            coefficient_of_restitution: DEFAULT_RESTITUTION,
            flags: BodyFlags::NONE,
            shape,
        })
    }

    /// Creates a new static body. Static bodies never integrate, never
    /// translate during resolution, and their mass is irrelevant.
    pub fn new_static(shape: Shape) -> Self {
        let inertia_tensor = shape.moment_of_inertia(1.0);
        RigidBody {
            transform: Matrix4::identity(),
            orientation: Quaternion::identity(),
            velocity: Vector3::ZERO,
            angular_velocity: Vector3::ZERO,
            angular_momentum: Vector3::ZERO,
            forces: Vec::new(),
            torques: Vec::new(),
            mass: 1.0,
            inertia_tensor,
            coefficient_of_restitution: DEFAULT_RESTITUTION,
            flags: BodyFlags::STATIC,
            shape,
        }
    }

    pub fn with_position(mut self, position: Vector3) -> Self {
        self.transform.set_translation(position);
        self
    }

    pub fn with_velocity(mut self, velocity: Vector3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the coefficient of restitution.
    ///
    /// # Errors
    /// Returns `PhysicsError::InvalidRestitution` for negative or non-finite values.
    pub fn with_restitution(self, restitution: f64) -> Result<Self, PhysicsError> {
        if !restitution.is_finite() || restitution < 0.0 {
            return Err(PhysicsError::InvalidRestitution);
        }
        Ok(RigidBody {
            coefficient_of_restitution: restitution,
            ..self
        })
    }

    pub fn with_flags(mut self, flags: BodyFlags) -> Self {
        self.flags.insert(flags);
        self
    }

    pub fn position(&self) -> Vector3 {
        self.transform.translation()
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(BodyFlags::STATIC)
    }

    pub fn is_weightless(&self) -> bool {
        self.flags.contains(BodyFlags::WEIGHTLESS)
    }

    /// Queues a force for the next step. The accumulator is drained every step.
    pub fn apply_force(&mut self, force: Vector3) {
        self.forces.push(force);
    }

    /// Queues a torque for the next step. The accumulator is drained every step.
    pub fn apply_torque(&mut self, torque: Vector3) {
        self.torques.push(torque);
    }
}
