use crate::error::{PhysicsError, Result};
use crate::geometry::Collider;
use crate::math::utils::is_finite;
use crate::math::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point-mass body with a volumetric collider.
///
/// Bodies carry no orientation or angular state. A body with
/// `inverse_mass == 0` is immovable: the contact solver never displaces it
/// or changes its velocity, although it still integrates any velocity the
/// host gives it (kinematic motion).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Body {
    /// Position of the reference point in world space
    pub position: Vec3,
    /// Linear velocity
    pub velocity: Vec3,
    /// Inverse mass (0 for infinite mass)
    pub inverse_mass: f32,
    /// Accumulated force, reset at the end of every substep
    pub force: Vec3,
    /// Multiplier on world gravity; 0 disables gravity for this body
    pub gravity_scale: f32,
    /// Per-second velocity retention in `[0, 1]`; 1 means no damping
    pub damping: f32,
    /// Friction coefficient in `[0, 1]`
    pub friction: f32,
    /// Restitution in `[0, 1]`
    pub restitution: f32,
    /// Collision shape
    pub collider: Collider,
}

impl Body {
    /// Returns the mass (infinity for immovable bodies)
    pub fn mass(&self) -> f32 {
        if self.inverse_mass > 0.0 {
            1.0 / self.inverse_mass
        } else {
            f32::INFINITY
        }
    }

    /// Returns true if the solver may move this body
    #[inline]
    pub fn is_movable(&self) -> bool {
        self.inverse_mass > 0.0
    }

    /// Adds a force at the reference point
    pub fn apply_force(&mut self, force: Vec3) {
        if self.is_movable() {
            self.force += force;
        }
    }

    /// Applies an instantaneous impulse
    pub fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass;
    }

    /// Clears accumulated forces
    pub fn clear_forces(&mut self) {
        self.force = Vec3::zeros();
    }

    /// Sets the mass of a movable body
    pub fn set_mass(&mut self, mass: f32) -> Result<()> {
        self.inverse_mass = inverse_mass_of(mass)?;
        Ok(())
    }

    /// Gives the body infinite mass
    pub fn make_static(&mut self) {
        self.inverse_mass = 0.0;
        self.force = Vec3::zeros();
    }

    /// Kinetic energy of the linear motion (0 for immovable bodies)
    pub fn kinetic_energy(&self) -> f32 {
        if self.is_movable() {
            0.5 * self.mass() * self.velocity.norm_squared()
        } else {
            0.0
        }
    }
}

/// Description for creating a body
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyDesc {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Mass of a dynamic body, ignored when `fixed` is set
    pub mass: f32,
    /// Infinite mass
    pub fixed: bool,
    pub gravity_scale: f32,
    pub damping: f32,
    pub friction: f32,
    pub restitution: f32,
    pub collider: Collider,
}

impl Default for BodyDesc {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            velocity: Vec3::zeros(),
            mass: 1.0,
            fixed: false,
            gravity_scale: 1.0,
            damping: 1.0,
            friction: 0.5,
            restitution: 0.5,
            collider: Collider::default(),
        }
    }
}

impl BodyDesc {
    /// Creates a dynamic body description with the given collider
    pub fn dynamic(collider: Collider) -> Self {
        Self {
            collider,
            ..Self::default()
        }
    }

    /// Creates an infinite-mass body description that ignores gravity
    pub fn fixed(collider: Collider) -> Self {
        Self {
            collider,
            fixed: true,
            gravity_scale: 0.0,
            ..Self::default()
        }
    }

    /// Sets the position
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the initial velocity
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Sets the mass
    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Sets the gravity scale
    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    /// Sets damping
    pub fn with_damping(mut self, damping: f32) -> Self {
        self.damping = damping;
        self
    }

    /// Sets friction
    pub fn with_friction(mut self, friction: f32) -> Self {
        self.friction = friction;
        self
    }

    /// Sets restitution
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Sets the collider
    pub fn with_collider(mut self, collider: Collider) -> Self {
        self.collider = collider;
        self
    }

    /// Validates the description and builds the body state
    pub fn build(&self) -> Result<Body> {
        if !is_finite(self.position) || !is_finite(self.velocity) {
            return Err(PhysicsError::invalid_state(
                "initial position and velocity must be finite",
            ));
        }
        if !self.gravity_scale.is_finite() {
            return Err(PhysicsError::invalid_config(format!(
                "gravity scale {} is not finite",
                self.gravity_scale
            )));
        }
        check_unit_interval("damping", self.damping)?;
        check_unit_interval("friction", self.friction)?;
        check_unit_interval("restitution", self.restitution)?;

        let inverse_mass = if self.fixed {
            0.0
        } else {
            inverse_mass_of(self.mass)?
        };

        Ok(Body {
            position: self.position,
            velocity: self.velocity,
            inverse_mass,
            force: Vec3::zeros(),
            gravity_scale: self.gravity_scale,
            damping: self.damping,
            friction: self.friction,
            restitution: self.restitution,
            collider: self.collider.validated()?,
        })
    }
}

/// Inverse of a dynamic body's mass; both the mass and its inverse must be finite and positive
fn inverse_mass_of(mass: f32) -> Result<f32> {
    let inverse_mass = 1.0 / mass;
    if mass.is_finite() && mass > 0.0 && inverse_mass.is_finite() && inverse_mass > 0.0 {
        Ok(inverse_mass)
    } else {
        Err(PhysicsError::InvalidMass(mass))
    }
}

pub(crate) fn check_unit_interval(name: &str, value: f32) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(PhysicsError::invalid_config(format!(
            "{name} {value} is outside [0, 1]"
        )))
    }
}
