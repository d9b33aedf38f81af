//! # SpherePhys
//!
//! A small impulse-based physics core for point-mass bodies with sphere and
//! infinite-plane colliders.
//!
//! ## Features
//!
//! - **Point-Mass Dynamics**: semi-implicit Euler integration with gravity, forces and damping
//! - **Collision Detection**: exhaustive pair scan with exact sphere/sphere and sphere/plane tests
//! - **Contact Solver**: restitution and Coulomb friction impulses followed by penetration correction
//! - **Fixed Substeps**: frame time is accumulated and drained in fixed increments
//! - **Contact Events**: per-body listeners notified when contacts start, persist and end
//!
//! Bodies have no orientation or angular state. There is no continuous
//! collision detection, so fast small bodies can tunnel through each other.
//!
//! ## Quick Start
//!
//! ```rust
//! use spherephys::prelude::*;
//!
//! # fn main() -> spherephys::Result<()> {
//! // Create a physics world (gravity -9.81 on Y, 50 Hz substeps)
//! let mut world = World::default();
//!
//! // Create a static floor
//! let floor = world.add(BodyDesc::fixed(Collider::plane(Vec3::y())?))?;
//!
//! // Create a dynamic ball
//! let ball = world.add(
//!     BodyDesc::dynamic(Collider::sphere(0.5)?)
//!         .with_position(Vec3::new(0.0, 5.0, 0.0))
//!         .with_restitution(0.0),
//! )?;
//!
//! // Simulation loop
//! let dt = 1.0 / 60.0;
//! for _ in 0..600 {
//!     world.step(dt)?;
//! }
//!
//! let pos = world.position(ball)?;
//! assert!(pos.y > 0.4 && pos.y < 0.6);
//! assert_eq!(world.position(floor)?, Vec3::zeros());
//! # Ok(())
//! # }
//! ```

pub mod collision;
pub mod dynamics;
pub mod error;
pub mod geometry;
pub mod math;
pub mod solver;
mod world;

pub use error::{PhysicsError, Result};
pub use world::{World, WorldConfig};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::collision::{ContactEvent, ContactListener, ContactManifold, ContactPhase};
    pub use crate::dynamics::{Body, BodyDesc, BodyHandle};
    pub use crate::error::{PhysicsError, Result};
    pub use crate::geometry::{Collider, ColliderKind};
    pub use crate::math::Vec3;
    pub use crate::world::{World, WorldConfig};
}
