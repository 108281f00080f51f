use rayon::prelude::*;

use crate::errors::PhysicsError;
use crate::models::RigidBody;

/// Opaque handle to a rigid body owned by a [`BodySet`].
///
/// Handles are invalidated by removal (the slot generation is bumped), so a
/// stale handle can never reach a different body that later reuses the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle {
    index: usize,
    generation: u64,
}

#[derive(Debug)]
struct Slot {
    generation: u64,
    body: Option<RigidBody>,
}

/// Generational arena owning the world's rigid bodies by value.
///
/// Order is irrelevant; iteration yields occupied slots only. The arena
/// itself is not synchronized; the physics world wraps it in a mutex.
#[derive(Debug, Default)]
pub struct BodySet {
    slots: Vec<Slot>,
    free: Vec<usize>,
    len: usize,
}

impl BodySet {
    pub fn new() -> Self {
        BodySet::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Takes ownership of a body and returns a handle to it.
    pub fn insert(&mut self, body: RigidBody) -> BodyHandle {
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index];
            slot.body = Some(body);
            BodyHandle {
                index,
                generation: slot.generation,
            }
        } else {
            self.slots.push(Slot {
                generation: 0,
                body: Some(body),
            });
            BodyHandle {
                index: self.slots.len() - 1,
                generation: 0,
            }
        }
    }

    /// Removes a body, returning ownership to the caller.
    ///
    /// # Errors
    /// Returns `PhysicsError::UnknownBody` for a stale or foreign handle.
    pub fn remove(&mut self, handle: BodyHandle) -> Result<RigidBody, PhysicsError> {
        let slot = self
            .slots
            .get_mut(handle.index)
            .ok_or(PhysicsError::UnknownBody)?;
        if slot.generation != handle.generation || slot.body.is_none() {
            return Err(PhysicsError::UnknownBody);
        }
        let body = slot.body.take().ok_or(PhysicsError::UnknownBody)?;
        slot.generation += 1;
        self.free.push(handle.index);
        self.len -= 1;
        Ok(body)
    }

    pub fn get(&self, handle: BodyHandle) -> Option<&RigidBody> {
        let slot = self.slots.get(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_ref()
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        let slot = self.slots.get_mut(handle.index)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.body.as_mut()
    }

    /// Borrows the body stored at a raw slot index, if occupied.
    pub(crate) fn at(&self, index: usize) -> Option<&RigidBody> {
        self.slots.get(index).and_then(|slot| slot.body.as_ref())
    }

    /// Iterates occupied slots as `(slot index, body)`.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &RigidBody)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.body.as_ref().map(|body| (index, body)))
    }

    /// Parallel mutable iteration over occupied slots.
    ///
    /// Bodies are independent during integration, so the world runs the
    /// per-body step over this iterator.
    pub fn par_iter_mut(&mut self) -> impl ParallelIterator<Item = &mut RigidBody> + '_ {
        self.slots
            .par_iter_mut()
            .filter_map(|slot| slot.body.as_mut())
    }

    /// Mutably borrows two distinct occupied slots at once.
    pub(crate) fn pair_mut(
        &mut self,
        first: usize,
        second: usize,
    ) -> Option<(&mut RigidBody, &mut RigidBody)> {
        if first == second {
            return None;
        }
        let (lo, hi) = if first < second {
            (first, second)
        } else {
            (second, first)
        };
        if hi >= self.slots.len() {
            return None;
        }
        let (left, right) = self.slots.split_at_mut(hi);
        let lo_body = left[lo].body.as_mut()?;
        let hi_body = right[0].body.as_mut()?;
        if first < second {
            Some((lo_body, hi_body))
        } else {
            Some((hi_body, lo_body))
        }
    }
}
