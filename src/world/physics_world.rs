use std::sync::{Mutex, PoisonError};

use log::warn;
use rayon::prelude::*;

use crate::collision::{CollisionInfo, DispatchTable};
use crate::math::{Matrix4, Quaternion, Vector3};
use crate::models::{FrameParams, RigidBody};
use crate::world::{BodyHandle, BodySet};
use crate::errors::PhysicsError;

/// Earth's gravitational acceleration, the default for new worlds.
pub const EARTH_GRAVITY: Vector3 = Vector3 {
    x: 0.0,
    y: -9.807,
    z: 0.0,
};

/// Extra corrective displacement applied on top of the penetration split, so
/// separated bodies do not immediately re-trigger the same contact.
const COLLISION_NUDGE: f64 = 0.001;

/// The physics world: owns the active rigid bodies, the collision dispatch
/// table, and global gravity, and advances the simulation one frame at a
/// time.
///
/// The body set is guarded by a mutex; `add_rigid_body`, `remove_rigid_body`,
/// and `step` are mutually exclusive, so entity spawn/despawn from other
/// threads cannot race a step in progress. Within one step, pair testing is
/// exhaustive (O(n²), there is no broad phase, so this scales to scenes in
/// the hundreds of bodies) and resolution runs sequentially.
pub struct PhysicsWorld {
    bodies: Mutex<BodySet>,
    gravity: Vector3,
    dispatch: DispatchTable,
}

impl PhysicsWorld {
    /// Creates a world with Earth gravity.
    pub fn new() -> Self {
        Self::with_gravity(EARTH_GRAVITY)
    }

    /// Creates a world with the given gravity vector.
    pub fn with_gravity(gravity: Vector3) -> Self {
        PhysicsWorld {
            bodies: Mutex::new(BodySet::new()),
            gravity,
            dispatch: DispatchTable::new(),
        }
    }

    pub fn gravity(&self) -> Vector3 {
        self.gravity
    }

    fn lock_bodies(&self) -> std::sync::MutexGuard<'_, BodySet> {
        // A panic while holding the lock leaves the body set consistent
        // enough to keep serving; recover instead of propagating the poison.
        self.bodies.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers a body with the world and returns a handle to it.
    pub fn add_rigid_body(&self, body: RigidBody) -> BodyHandle {
        self.lock_bodies().insert(body)
    }

    /// Unregisters a body, returning ownership to the caller. The handle is
    /// invalidated; the body will never be stepped again.
    ///
    /// # Errors
    /// Returns `PhysicsError::UnknownBody` for a stale or foreign handle.
    pub fn remove_rigid_body(&self, handle: BodyHandle) -> Result<RigidBody, PhysicsError> {
        self.lock_bodies().remove(handle)
    }

    /// Returns a snapshot of a body's current state.
    pub fn body(&self, handle: BodyHandle) -> Option<RigidBody> {
        self.lock_bodies().get(handle).cloned()
    }

    /// Mutates a body in place under the world's exclusive guard.
    ///
    /// # Errors
    /// Returns `PhysicsError::UnknownBody` for a stale or foreign handle.
    pub fn update_body<F>(&self, handle: BodyHandle, f: F) -> Result<(), PhysicsError>
    where
        F: FnOnce(&mut RigidBody),
    {
        let mut bodies = self.lock_bodies();
        match bodies.get_mut(handle) {
            Some(body) => {
                f(body);
                Ok(())
            }
            None => Err(PhysicsError::UnknownBody),
        }
    }

    pub fn body_count(&self) -> usize {
        self.lock_bodies().len()
    }

    /// Advances the simulation by one frame.
    ///
    /// For every non-static body: gravity is accumulated (unless the body is
    /// weightless), then linear and angular dynamics are integrated. After
    /// integration, every unordered body pair is narrow-phase tested exactly
    /// once and detected contacts are resolved, unless the frame is paused
    /// (`delta_time <= 0`) without the single-step flag.
    pub fn step(&self, params: &FrameParams) {
        let mut bodies = self.lock_bodies();

        let gravity = self.gravity;
        let dt = params.delta_time;
        bodies.par_iter_mut().for_each(|body| {
            if body.is_static() {
                return;
            }
            if !body.is_weightless() {
                body.forces.push(gravity);
            }
            step_linear_dynamics(dt, body);
            step_angular_dynamics(dt, body);
        });

        self.test_intersections(&mut bodies, params);
    }

    /// Exhaustive pairwise narrow-phase testing over the current body set.
    ///
    /// Detection is read-only and runs in parallel over the pair list;
    /// resolution mutates bodies and runs sequentially in pair order.
    fn test_intersections(&self, bodies: &mut BodySet, params: &FrameParams) {
        let indices: Vec<usize> = bodies.iter().map(|(index, _)| index).collect();

        let mut pairs = Vec::with_capacity(indices.len().saturating_sub(1) * indices.len() / 2);
        for (n, &first) in indices.iter().enumerate() {
            for &second in &indices[n + 1..] {
                pairs.push((first, second));
            }
        }

        let contacts: Vec<(usize, usize, CollisionInfo)> = {
            let bodies: &BodySet = bodies;
            pairs
                .par_iter()
                .filter_map(|&(first, second)| {
                    let body_a = bodies.at(first)?;
                    let body_b = bodies.at(second)?;
                    self.dispatch
                        .test(
                            &body_a.shape,
                            &body_a.transform,
                            &body_b.shape,
                            &body_b.transform,
                        )
                        .map(|info| (first, second, info))
                })
                .collect()
        };

        // While paused (and not single-stepping) a standing contact must not
        // be resolved again, or velocities would change on a frozen frame.
        if !params.should_resolve() {
            return;
        }

        for (first, second, info) in contacts {
            if let Some((body_a, body_b)) = bodies.pair_mut(first, second) {
                resolve_collision(body_a, body_b, &info);
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        PhysicsWorld::new()
    }
}

impl Drop for PhysicsWorld {
    /// A world must be empty when it goes away; a leftover body means some
    /// collider outlived its entity and was never unregistered.
    fn drop(&mut self) {
        if std::thread::panicking() {
            return;
        }
        let bodies = self
            .bodies
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        assert!(
            bodies.is_empty(),
            "physics world dropped with {} rigid bodies still registered",
            bodies.len()
        );
    }
}

/// Advances a body's position and velocity by one timestep.
///
/// Queued forces are summed and drained; the accumulator is empty when this
/// returns. The position update uses 4th order Runge-Kutta stage weighting.
/// Force is held constant across the stages, so the stage velocities
/// coincide and the velocity update reduces to a single force * dt term.
/// The resolver is tuned against that collapsed form; keep it as is.
fn step_linear_dynamics(dt: f64, body: &mut RigidBody) {
    let mut overall_force = Vector3::ZERO;
    while let Some(force) = body.forces.pop() {
        overall_force += force;
    }

    let position = body.transform.translation();
    let v1 = body.velocity;
    let v2 = body.velocity + overall_force * (0.5 * dt);
    let v3 = body.velocity + overall_force * (0.5 * dt);
    let v4 = body.velocity + overall_force * (0.5 * dt);

    let new_position = position + (v1 + v2 * 2.0 + v3 * 2.0 + v4) * (dt / 6.0);
    let new_velocity = body.velocity + overall_force * dt;

    body.velocity = new_velocity;
    body.transform.set_translation(new_position);
}

/// Advances a body's orientation by one timestep.
///
/// Torques drain into angular momentum, angular velocity follows from the
/// inverse inertia transform, and the orientation quaternion is advanced by
/// `q += 0.5 · dt · (ω_quat * q)` and renormalized. The rotation part of the
/// transform is rebuilt from the quaternion; translation is saved and
/// restored around the rebuild so angular integration never moves the body.
fn step_angular_dynamics(dt: f64, body: &mut RigidBody) {
    let translation = body.transform.translation();

    let mut overall_torque = Vector3::ZERO;
    while let Some(torque) = body.torques.pop() {
        overall_torque += torque;
    }

    body.angular_momentum += overall_torque * dt;

    let inverse_inertia = match body.inertia_tensor.inverse() {
        Some(matrix) => matrix,
        None => {
            warn!("singular inertia tensor; skipping angular update for this step");
            return;
        }
    };
    body.angular_velocity = inverse_inertia.transform_vector(body.angular_momentum);

    let spin = Quaternion::pure(body.angular_velocity);
    body.orientation = (body.orientation + (spin * body.orientation).scale(0.5 * dt)).normalized();

    body.transform = Matrix4::from_quaternion(body.orientation);
    body.transform.set_translation(translation);
}

/// Corrects interpenetration and exchanges a normal impulse between two
/// colliding bodies.
///
/// Positional correction splits the penetration depth in proportion to each
/// body's share of the pair's combined speed; static bodies keep a zero
/// share, and a zero-velocity body is left untouched (its correction
/// direction is undefined). Velocity resolution reflects against a static
/// body using that body's own restitution, and otherwise solves the single
/// scalar impulse from the relative normal velocity and both inverse masses
/// (averaged restitution), applied to the pair in opposite directions.
fn resolve_collision(body_a: &mut RigidBody, body_b: &mut RigidBody, info: &CollisionInfo) {
    if body_a.is_static() && body_b.is_static() {
        return;
    }

    let speed_a = body_a.velocity.magnitude();
    let speed_b = body_b.velocity.magnitude();
    let total_speed = speed_a + speed_b;

    if total_speed > 0.0 {
        let percentage_a = if body_a.is_static() {
            0.0
        } else {
            speed_a / total_speed
        };
        let percentage_b = if body_b.is_static() {
            0.0
        } else {
            speed_b / total_speed
        };

        if !body_a.is_static() && body_a.velocity.magnitude_squared() > 0.0 {
            let correction = info.penetration * percentage_a + COLLISION_NUDGE;
            let position = body_a.position() - body_a.velocity.normalized() * correction;
            body_a.transform.set_translation(position);
        }
        if !body_b.is_static() && body_b.velocity.magnitude_squared() > 0.0 {
            let correction = info.penetration * percentage_b + COLLISION_NUDGE;
            let position = body_b.position() - body_b.velocity.normalized() * correction;
            body_b.transform.set_translation(position);
        }
    }

    let normal = info.normal;

    if body_a.is_static() {
        let velocity = body_b.velocity;
        body_b.velocity = velocity
            - normal * (velocity.dot(normal) * (body_b.coefficient_of_restitution + 1.0));
    } else if body_b.is_static() {
        let velocity = body_a.velocity;
        body_a.velocity = velocity
            - normal * (velocity.dot(normal) * (body_a.coefficient_of_restitution + 1.0));
    } else {
        let cor_average =
            (body_a.coefficient_of_restitution + body_b.coefficient_of_restitution) / 2.0;
        // Construction rejects non-positive dynamic mass, so the combined
        // inverse mass cannot reach zero here.
        let inverse_mass = 1.0 / body_a.mass + 1.0 / body_b.mass;
        let relative_normal_speed = (body_a.velocity - body_b.velocity).dot(normal);
        let impulse = -(cor_average + 1.0) * relative_normal_speed / inverse_mass;

        body_a.velocity += normal * (impulse / body_a.mass);
        body_b.velocity -= normal * (impulse / body_b.mass);
    }
}
