use std::fmt;

use crate::error::{PhysicsError, Result};

use super::body::Body;

/// A stable handle to a body in the registry.
///
/// The generation changes every time a slot is vacated, so a handle held past
/// `remove` never aliases the body that later reuses its slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    /// Invalid/null body handle
    pub const INVALID: Self = Self {
        index: u32::MAX,
        generation: u32::MAX,
    };

    /// Creates a new body handle
    pub fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the slot index of this handle
    pub fn index(self) -> usize {
        self.index as usize
    }

    /// Returns the slot generation of this handle
    pub fn generation(self) -> u32 {
        self.generation
    }
}

impl Default for BodyHandle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}v{}", self.index, self.generation)
    }
}

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    body: Option<Body>,
}

/// Arena owning the authoritative state of every body.
///
/// Iteration follows slot order, which makes contact generation order (and
/// therefore the simulation) deterministic for a given sequence of
/// insertions and removals.
#[derive(Debug, Clone, Default)]
pub struct BodyRegistry {
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
    len: usize,
}

impl BodyRegistry {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a body and returns its handle
    pub fn insert(&mut self, body: Body) -> BodyHandle {
        self.len += 1;
        if let Some(index) = self.free_slots.pop() {
            let slot = &mut self.slots[index as usize];
            slot.body = Some(body);
            return BodyHandle::new(index, slot.generation);
        }

        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            body: Some(body),
        });
        BodyHandle::new(index, 0)
    }

    /// Removes a body, invalidating its handle
    pub fn remove(&mut self, handle: BodyHandle) -> Result<Body> {
        let slot = self
            .slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation && slot.body.is_some())
            .ok_or(PhysicsError::BodyNotFound(handle))?;

        let body = slot.body.take().ok_or(PhysicsError::BodyNotFound(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_slots.push(handle.index);
        self.len -= 1;
        Ok(body)
    }

    /// Removes every body; all outstanding handles become stale
    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.body.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free_slots.push(index as u32);
            }
        }
        self.len = 0;
    }

    /// Gets a reference to a body
    pub fn get(&self, handle: BodyHandle) -> Result<&Body> {
        self.slots
            .get(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_ref())
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Gets a mutable reference to a body
    pub fn get_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.slots
            .get_mut(handle.index())
            .filter(|slot| slot.generation == handle.generation)
            .and_then(|slot| slot.body.as_mut())
            .ok_or(PhysicsError::BodyNotFound(handle))
    }

    /// Gets mutable references to two distinct bodies
    pub fn pair_mut(&mut self, a: BodyHandle, b: BodyHandle) -> Result<(&mut Body, &mut Body)> {
        // Validate both handles before splitting the slot storage.
        self.get(a)?;
        self.get(b)?;
        if a.index == b.index {
            return Err(PhysicsError::invalid_state(format!(
                "body {a} cannot be paired with itself"
            )));
        }

        let (low, high) = (a.index().min(b.index()), a.index().max(b.index()));
        let (before, after) = self.slots.split_at_mut(high);
        let low_body = before[low].body.as_mut();
        let high_body = after[0].body.as_mut();

        match (low_body, high_body) {
            (Some(low_body), Some(high_body)) => {
                if a.index() < b.index() {
                    Ok((low_body, high_body))
                } else {
                    Ok((high_body, low_body))
                }
            }
            _ => Err(PhysicsError::BodyNotFound(a)),
        }
    }

    /// Returns true if the handle refers to a live body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_ok()
    }

    /// Returns the number of live bodies
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the registry holds no bodies
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Iterates over live bodies in slot order
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> + '_ {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            slot.body
                .as_ref()
                .map(|body| (BodyHandle::new(index as u32, slot.generation), body))
        })
    }

    /// Iterates mutably over live bodies in slot order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut Body)> + '_ {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let generation = slot.generation;
            slot.body
                .as_mut()
                .map(|body| (BodyHandle::new(index as u32, generation), body))
        })
    }

    /// Iterates over live handles in slot order
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.iter().map(|(handle, _)| handle)
    }
}
