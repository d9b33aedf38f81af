//! Error types for world and body operations.

use thiserror::Error;

use crate::dynamics::BodyHandle;

/// Errors returned at the mutation boundary of the physics world.
///
/// Runtime geometric degeneracies (coincident sphere centres, zero sliding
/// direction) are handled inside the solver and never surface here.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PhysicsError {
    /// The handle is unknown, was removed, or belongs to a previous occupant of its slot.
    #[error("body not found: {0}")]
    BodyNotFound(BodyHandle),

    /// Sphere radius is negative or not finite.
    #[error("invalid sphere radius: {0} (must be finite and >= 0)")]
    InvalidRadius(f32),

    /// Plane normal has no direction.
    #[error("invalid plane normal: length {length} cannot be normalized")]
    InvalidNormal {
        /// Length of the rejected normal.
        length: f32,
    },

    /// Mass is zero, negative, or not finite.
    #[error("invalid mass: {0} (must be finite and > 0)")]
    InvalidMass(f32),

    /// Frame delta or substep duration is negative or not finite.
    #[error("invalid timestep: {0} (must be finite and >= 0)")]
    InvalidTimestep(f32),

    /// Invalid configuration.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// Non-finite kinematic state handed to a setter.
    #[error("invalid body state: {reason}")]
    InvalidState {
        /// Description of what's wrong.
        reason: String,
    },
}

impl PhysicsError {
    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create an invalid state error.
    #[must_use]
    pub fn invalid_state(reason: impl Into<String>) -> Self {
        Self::InvalidState {
            reason: reason.into(),
        }
    }

    /// Check if this is an unknown-handle error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::BodyNotFound(_))
    }

    /// Check if this is a configuration error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfig { .. }
                | Self::InvalidRadius(_)
                | Self::InvalidNormal { .. }
                | Self::InvalidMass(_)
                | Self::InvalidTimestep(_)
        )
    }
}

/// Result type for physics operations.
pub type Result<T> = std::result::Result<T, PhysicsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PhysicsError::InvalidMass(-2.0);
        assert!(err.to_string().contains("-2"));

        let err = PhysicsError::BodyNotFound(BodyHandle::new(3, 1));
        assert!(err.to_string().contains("3v1"));

        let err = PhysicsError::invalid_config("max_substeps must be at least 1");
        assert!(err.to_string().contains("max_substeps"));
    }

    #[test]
    fn test_error_predicates() {
        let err = PhysicsError::BodyNotFound(BodyHandle::new(0, 0));
        assert!(err.is_not_found());
        assert!(!err.is_config_error());

        let err = PhysicsError::InvalidRadius(-1.0);
        assert!(err.is_config_error());
        assert!(!err.is_not_found());

        let err = PhysicsError::invalid_state("NaN position");
        assert!(!err.is_config_error());
    }
}
