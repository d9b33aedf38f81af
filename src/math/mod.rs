/// 3D vector used for positions, velocities, forces and normals.
pub type Vec3 = nalgebra::Vector3<f32>;

/// Common math constants and utilities
pub mod consts {
    /// A small epsilon value for floating point comparisons
    pub const EPSILON: f32 = 1e-6;

    /// Squared length below which a vector is treated as zero
    pub const EPSILON_SQUARED: f32 = 1e-10;
}

/// Utility functions
pub mod utils {
    use super::consts::EPSILON_SQUARED;
    use super::Vec3;

    /// Returns true if two floats are approximately equal
    #[inline]
    pub fn approx_eq(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }

    /// Returns true if every component of the vector is finite
    #[inline]
    pub fn is_finite(v: Vec3) -> bool {
        v.iter().all(|c| c.is_finite())
    }

    /// Normalizes `v`, returning `None` if it is too short to have a direction
    #[inline]
    pub fn try_normalize(v: Vec3) -> Option<Vec3> {
        if !is_finite(v) || v.norm_squared() <= EPSILON_SQUARED {
            None
        } else {
            Some(v / v.norm())
        }
    }
}
