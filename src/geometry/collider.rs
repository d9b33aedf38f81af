use crate::error::{PhysicsError, Result};
use crate::math::utils::try_normalize;
use crate::math::Vec3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of collision shape, without its parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColliderKind {
    Sphere,
    Plane,
}

/// A collision shape attached to a body.
///
/// The shape is positioned by its owning body: a sphere is centred on the
/// body's position, and a plane passes through it. Planes are infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Collider {
    /// A sphere defined by its radius
    Sphere {
        /// Radius, `>= 0`
        radius: f32,
    },
    /// An infinite plane defined by its unit normal
    Plane {
        /// Unit normal; the side it points to is "outside"
        normal: Vec3,
    },
}

impl Collider {
    /// Creates a validated sphere collider
    pub fn sphere(radius: f32) -> Result<Self> {
        Self::Sphere { radius }.validated()
    }

    /// Creates a validated plane collider, normalizing `normal`
    pub fn plane(normal: Vec3) -> Result<Self> {
        Self::Plane { normal }.validated()
    }

    /// Returns the collider kind
    #[inline]
    pub fn kind(&self) -> ColliderKind {
        match self {
            Collider::Sphere { .. } => ColliderKind::Sphere,
            Collider::Plane { .. } => ColliderKind::Plane,
        }
    }

    /// Returns the sphere radius, if this is a sphere
    #[inline]
    pub fn radius(&self) -> Option<f32> {
        match *self {
            Collider::Sphere { radius } => Some(radius),
            Collider::Plane { .. } => None,
        }
    }

    /// Returns the plane normal, if this is a plane
    #[inline]
    pub fn normal(&self) -> Option<Vec3> {
        match *self {
            Collider::Sphere { .. } => None,
            Collider::Plane { normal } => Some(normal),
        }
    }

    /// Checks the shape invariants and returns the canonical form.
    ///
    /// Radii must be finite and non-negative. Plane normals are rescaled to
    /// unit length; a normal with no direction is rejected.
    pub fn validated(self) -> Result<Self> {
        match self {
            Collider::Sphere { radius } => {
                if !radius.is_finite() || radius < 0.0 {
                    return Err(PhysicsError::InvalidRadius(radius));
                }
                Ok(self)
            }
            Collider::Plane { normal } => try_normalize(normal)
                .map(|normal| Collider::Plane { normal })
                .ok_or(PhysicsError::InvalidNormal {
                    length: normal.norm(),
                }),
        }
    }
}

impl Default for Collider {
    fn default() -> Self {
        Self::Sphere { radius: 0.5 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_validation() {
        assert!(Collider::sphere(1.0).is_ok());
        assert!(Collider::sphere(0.0).is_ok());
        assert_eq!(
            Collider::sphere(-0.5),
            Err(PhysicsError::InvalidRadius(-0.5))
        );
        assert!(Collider::sphere(f32::NAN).is_err());
    }

    #[test]
    fn test_plane_normalizes() {
        let plane = Collider::plane(Vec3::new(0.0, 2.0, 0.0)).unwrap();
        assert_relative_eq!(plane.normal().unwrap(), Vec3::y());
    }

    #[test]
    fn test_zero_normal_rejected() {
        let err = Collider::plane(Vec3::zeros()).unwrap_err();
        assert!(matches!(err, PhysicsError::InvalidNormal { .. }));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_kind_and_accessors() {
        let sphere = Collider::Sphere { radius: 2.0 };
        assert_eq!(sphere.kind(), ColliderKind::Sphere);
        assert_eq!(sphere.radius(), Some(2.0));
        assert_eq!(sphere.normal(), None);

        let plane = Collider::Plane { normal: Vec3::x() };
        assert_eq!(plane.kind(), ColliderKind::Plane);
        assert_eq!(plane.radius(), None);
    }
}
