use std::collections::{BTreeSet, HashMap};

use tracing::{debug, trace, warn};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::collision::{
    contact_between, detect_contacts, CollisionPair, ContactEvent, ContactListener,
    ContactManifold, ContactPhase,
};
use crate::dynamics::{
    check_unit_interval, integrate_semi_implicit_euler, Body, BodyDesc, BodyHandle, BodyRegistry,
};
use crate::error::{PhysicsError, Result};
use crate::geometry::Collider;
use crate::math::consts::EPSILON;
use crate::math::utils::is_finite;
use crate::math::Vec3;

/// Configuration for the physics world
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct WorldConfig {
    /// Gravitational acceleration
    pub gravity: Vec3,
    /// Fixed simulation increment in seconds
    pub substep_duration: f32,
    /// Maximum substeps per `step` call; carried time beyond this is dropped
    pub max_substeps: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            substep_duration: 1.0 / 50.0,
            max_substeps: 8,
        }
    }
}

impl WorldConfig {
    /// Sets the gravitational acceleration
    #[must_use]
    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    /// Sets the fixed substep duration
    #[must_use]
    pub fn with_substep_duration(mut self, substep_duration: f32) -> Self {
        self.substep_duration = substep_duration;
        self
    }

    /// Sets the substep cap
    #[must_use]
    pub fn with_max_substeps(mut self, max_substeps: usize) -> Self {
        self.max_substeps = max_substeps;
        self
    }

    /// Checks that the configuration can drive a simulation
    pub fn validate(&self) -> Result<()> {
        if !self.substep_duration.is_finite() || self.substep_duration <= 0.0 {
            return Err(PhysicsError::InvalidTimestep(self.substep_duration));
        }
        if self.max_substeps == 0 {
            return Err(PhysicsError::invalid_config("max_substeps must be at least 1"));
        }
        if !is_finite(self.gravity) {
            return Err(PhysicsError::invalid_config("gravity must be finite"));
        }
        Ok(())
    }
}

/// The physics world: body storage, the fixed-substep loop and host queries.
///
/// Bodies are advanced in fixed increments of `substep_duration`; the time
/// passed to [`World::step`] is accumulated and drained whole substeps at a
/// time, so any split of the same total elapsed time produces the same state.
pub struct World {
    config: WorldConfig,
    bodies: BodyRegistry,
    /// Per-body contact listeners
    listeners: HashMap<BodyHandle, Box<dyn ContactListener>>,
    /// Pairs in contact during the last substep
    active_pairs: BTreeSet<CollisionPair>,
    /// Frame time not yet consumed by a substep
    carried_time: f32,
    /// Simulated time
    time: f32,
}

impl Default for World {
    fn default() -> Self {
        Self::with_valid_config(WorldConfig::default())
    }
}

impl World {
    /// Creates a new physics world with the given configuration
    pub fn new(config: WorldConfig) -> Result<Self> {
        config.validate()?;
        debug!(
            substep = config.substep_duration,
            max_substeps = config.max_substeps,
            "world created"
        );
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: WorldConfig) -> Self {
        Self {
            config,
            bodies: BodyRegistry::new(),
            listeners: HashMap::new(),
            active_pairs: BTreeSet::new(),
            carried_time: 0.0,
            time: 0.0,
        }
    }

    /// Registers a body and returns its handle
    pub fn add(&mut self, desc: BodyDesc) -> Result<BodyHandle> {
        let body = desc.build()?;
        let kind = body.collider.kind();
        let handle = self.bodies.insert(body);
        debug!(%handle, ?kind, "body added");
        Ok(handle)
    }

    /// Removes a body and returns its final state.
    ///
    /// The handle becomes stale; its listener is dropped and no `Ended`
    /// events are emitted for the contacts it was part of.
    pub fn remove(&mut self, handle: BodyHandle) -> Result<Body> {
        let body = self.bodies.remove(handle)?;
        self.listeners.remove(&handle);
        self.active_pairs
            .retain(|pair| pair.body_a != handle && pair.body_b != handle);
        debug!(%handle, "body removed");
        Ok(body)
    }

    /// Removes every body and listener
    pub fn clear(&mut self) {
        let removed = self.bodies.len();
        self.bodies.clear();
        self.listeners.clear();
        self.active_pairs.clear();
        debug!(removed, "world cleared");
    }

    /// Gets a reference to a body
    pub fn body(&self, handle: BodyHandle) -> Result<&Body> {
        self.bodies.get(handle)
    }

    /// Returns true if the handle refers to a live body
    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.bodies.contains(handle)
    }

    /// Returns the number of bodies in the world
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns true if the world has no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Returns an iterator over all body handles
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.bodies.handles()
    }

    /// Gets the position of a body
    pub fn position(&self, handle: BodyHandle) -> Result<Vec3> {
        Ok(self.bodies.get(handle)?.position)
    }

    /// Sets the position of a body
    pub fn set_position(&mut self, handle: BodyHandle, position: Vec3) -> Result<()> {
        ensure_finite("position", position)?;
        self.bodies.get_mut(handle)?.position = position;
        Ok(())
    }

    /// Gets the linear velocity of a body
    pub fn velocity(&self, handle: BodyHandle) -> Result<Vec3> {
        Ok(self.bodies.get(handle)?.velocity)
    }

    /// Sets the linear velocity of a body
    pub fn set_velocity(&mut self, handle: BodyHandle, velocity: Vec3) -> Result<()> {
        ensure_finite("velocity", velocity)?;
        self.bodies.get_mut(handle)?.velocity = velocity;
        Ok(())
    }

    /// Adds a force for the next substep; ignored by immovable bodies
    pub fn add_force(&mut self, handle: BodyHandle, force: Vec3) -> Result<()> {
        ensure_finite("force", force)?;
        self.bodies.get_mut(handle)?.apply_force(force);
        Ok(())
    }

    /// Gets the collider of a body
    pub fn collider(&self, handle: BodyHandle) -> Result<Collider> {
        Ok(self.bodies.get(handle)?.collider)
    }

    /// Replaces the collider geometry of a body.
    ///
    /// Plane normals are normalized; negative radii and zero normals are rejected.
    pub fn set_collider(&mut self, handle: BodyHandle, collider: Collider) -> Result<()> {
        let collider = collider.validated()?;
        self.bodies.get_mut(handle)?.collider = collider;
        Ok(())
    }

    /// Sets the mass of a body, making it movable
    pub fn set_mass(&mut self, handle: BodyHandle, mass: f32) -> Result<()> {
        self.bodies.get_mut(handle)?.set_mass(mass)
    }

    /// Gives a body infinite mass
    pub fn make_static(&mut self, handle: BodyHandle) -> Result<()> {
        self.bodies.get_mut(handle)?.make_static();
        Ok(())
    }

    /// Sets the friction and restitution of a body
    pub fn set_material(&mut self, handle: BodyHandle, friction: f32, restitution: f32) -> Result<()> {
        check_unit_interval("friction", friction)?;
        check_unit_interval("restitution", restitution)?;
        let body = self.bodies.get_mut(handle)?;
        body.friction = friction;
        body.restitution = restitution;
        Ok(())
    }

    /// Sets the gravity multiplier of a body
    pub fn set_gravity_scale(&mut self, handle: BodyHandle, gravity_scale: f32) -> Result<()> {
        if !gravity_scale.is_finite() {
            return Err(PhysicsError::invalid_config("gravity_scale must be finite"));
        }
        self.bodies.get_mut(handle)?.gravity_scale = gravity_scale;
        Ok(())
    }

    /// Sets the per-second velocity retention of a body
    pub fn set_damping(&mut self, handle: BodyHandle, damping: f32) -> Result<()> {
        check_unit_interval("damping", damping)?;
        self.bodies.get_mut(handle)?.damping = damping;
        Ok(())
    }

    /// Gets the gravity
    pub fn gravity(&self) -> Vec3 {
        self.config.gravity
    }

    /// Sets the gravity
    pub fn set_gravity(&mut self, gravity: Vec3) -> Result<()> {
        if !is_finite(gravity) {
            return Err(PhysicsError::invalid_config("gravity must be finite"));
        }
        self.config.gravity = gravity;
        Ok(())
    }

    /// Returns the world configuration
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Returns the simulated time in seconds
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Returns the frame time carried over to the next `step` call
    pub fn carried_time(&self) -> f32 {
        self.carried_time
    }

    /// Registers the contact listener of a body, replacing any previous one
    pub fn set_contact_listener<L>(&mut self, handle: BodyHandle, listener: L) -> Result<()>
    where
        L: ContactListener + 'static,
    {
        self.bodies.get(handle)?;
        self.listeners.insert(handle, Box::new(listener));
        Ok(())
    }

    /// Removes the contact listener of a body, returning whether one was registered
    pub fn clear_contact_listener(&mut self, handle: BodyHandle) -> Result<bool> {
        self.bodies.get(handle)?;
        Ok(self.listeners.remove(&handle).is_some())
    }

    /// Advances the simulation by a frame delta and returns the number of substeps run.
    ///
    /// Whole substeps are drained from the accumulated time. When more than
    /// `max_substeps` are pending, the excess is discarded so a long frame
    /// cannot stall the caller.
    pub fn step(&mut self, frame_delta: f32) -> Result<usize> {
        if !frame_delta.is_finite() || frame_delta < 0.0 {
            return Err(PhysicsError::InvalidTimestep(frame_delta));
        }

        let dt = self.config.substep_duration;
        self.carried_time += frame_delta;

        let mut substeps = 0;
        while self.carried_time >= dt - EPSILON {
            if substeps == self.config.max_substeps {
                let dropped = self.carried_time - self.carried_time % dt;
                warn!(
                    max_substeps = self.config.max_substeps,
                    dropped, "substep cap reached, discarding carried time"
                );
                self.carried_time %= dt;
                break;
            }
            self.carried_time -= dt;
            self.substep(dt)?;
            substeps += 1;
        }
        self.carried_time = self.carried_time.max(0.0);

        Ok(substeps)
    }

    /// Performs a single simulation substep
    fn substep(&mut self, dt: f32) -> Result<()> {
        let gravity = self.config.gravity;
        for (_, body) in self.bodies.iter_mut() {
            integrate_semi_implicit_euler(body, gravity, dt);
        }

        let contacts = detect_contacts(&self.bodies);
        trace!(contacts = contacts.len(), time = self.time, "substep");

        self.dispatch_events(&contacts);

        for manifold in &contacts {
            crate::solver::resolve_velocity(manifold, &mut self.bodies)?;
            crate::solver::resolve_penetration(manifold, &mut self.bodies)?;
        }

        self.time += dt;
        Ok(())
    }

    /// Notifies listeners of the contacts found this substep and of those that ended
    fn dispatch_events(&mut self, contacts: &[ContactManifold]) {
        let current: BTreeSet<CollisionPair> = contacts.iter().map(ContactManifold::pair).collect();

        if !self.listeners.is_empty() {
            for manifold in contacts {
                let phase = if self.active_pairs.contains(&manifold.pair()) {
                    ContactPhase::Persisted
                } else {
                    ContactPhase::Started
                };
                for (body, other, normal) in [
                    (manifold.body_a, manifold.body_b, manifold.normal),
                    (manifold.body_b, manifold.body_a, -manifold.normal),
                ] {
                    self.notify(ContactEvent {
                        body,
                        other,
                        phase,
                        normal,
                        depth: manifold.depth,
                    });
                }
            }

            let ended: Vec<CollisionPair> =
                self.active_pairs.difference(&current).copied().collect();
            for pair in ended {
                for (body, other) in [(pair.body_a, pair.body_b), (pair.body_b, pair.body_a)] {
                    self.notify(ContactEvent {
                        body,
                        other,
                        phase: ContactPhase::Ended,
                        normal: Vec3::zeros(),
                        depth: 0.0,
                    });
                }
            }
        }

        self.active_pairs = current;
    }

    fn notify(&mut self, event: ContactEvent) {
        if let Some(listener) = self.listeners.get_mut(&event.body) {
            listener.on_contact(&event);
        }
    }

    /// Detects contacts over the current state.
    ///
    /// The result reflects positions after the last solver pass, so resolved
    /// pairs usually show up as touching with a depth near zero.
    pub fn contacts(&self) -> Vec<ContactManifold> {
        detect_contacts(&self.bodies)
    }

    /// Returns true if the body currently overlaps or touches any other body
    pub fn is_colliding(&self, handle: BodyHandle) -> Result<bool> {
        let body = self.bodies.get(handle)?;
        Ok(self
            .bodies
            .iter()
            .filter(|&(other, _)| other != handle)
            .any(|(other, other_body)| contact_between(handle, body, other, other_body).is_some()))
    }
}

fn ensure_finite(name: &str, value: Vec3) -> Result<()> {
    if is_finite(value) {
        Ok(())
    } else {
        Err(PhysicsError::invalid_state(format!("{name} must be finite")))
    }
}
