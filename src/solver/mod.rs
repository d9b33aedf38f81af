//! Contact resolution.
//!
//! Each manifold is resolved in two passes run back to back: an impulse pass
//! that fixes the approach velocity, then a positional pass that removes the
//! overlap.

mod impulse;
mod position;

pub use impulse::{resolve_velocity, separation_velocity, ContactImpulse};
pub use position::resolve_penetration;
