//! Exact intersection tests between collider pairs.
//!
//! Every test uses a non-strict comparison: shapes that exactly touch are
//! reported as colliding with a depth of zero.

use crate::geometry::Collider;
use crate::math::consts::EPSILON_SQUARED;
use crate::math::Vec3;

/// Axis used when two sphere centres coincide and no separating direction exists
#[inline]
pub fn degenerate_normal() -> Vec3 {
    Vec3::y()
}

/// Minimum translation vector separating two overlapping shapes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mtv {
    /// Unit direction pointing from shape B toward shape A
    pub normal: Vec3,
    /// Overlap along `normal`, `>= 0`
    pub depth: f32,
}

impl Mtv {
    /// The translation that moves A out of B
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.normal * self.depth
    }

    /// The same overlap seen from the other shape
    #[inline]
    pub fn flipped(self) -> Self {
        Self {
            normal: -self.normal,
            depth: self.depth,
        }
    }
}

/// Tests two positioned colliders for overlap.
///
/// The returned normal points from B toward A. Plane pairs never collide.
pub fn intersect(
    collider_a: &Collider,
    position_a: Vec3,
    collider_b: &Collider,
    position_b: Vec3,
) -> Option<Mtv> {
    match (*collider_a, *collider_b) {
        (Collider::Sphere { radius: ra }, Collider::Sphere { radius: rb }) => {
            sphere_sphere(position_a, ra, position_b, rb)
        }
        (Collider::Sphere { radius }, Collider::Plane { normal }) => {
            sphere_plane(position_a, radius, position_b, normal)
        }
        (Collider::Plane { normal }, Collider::Sphere { radius }) => {
            sphere_plane(position_b, radius, position_a, normal).map(Mtv::flipped)
        }
        (Collider::Plane { .. }, Collider::Plane { .. }) => None,
    }
}

/// Tests two spheres. The normal points from sphere B's centre to sphere A's.
pub fn sphere_sphere(
    position_a: Vec3,
    radius_a: f32,
    position_b: Vec3,
    radius_b: f32,
) -> Option<Mtv> {
    let direction = position_a - position_b;
    let distance_squared = direction.norm_squared();
    let radii_sum = radius_a + radius_b;

    if distance_squared > radii_sum * radii_sum {
        return None;
    }

    let distance = distance_squared.sqrt();
    let normal = if distance_squared > EPSILON_SQUARED {
        direction / distance
    } else {
        degenerate_normal()
    };

    Some(Mtv {
        normal,
        depth: (radii_sum - distance).max(0.0),
    })
}

/// Tests a sphere against an infinite plane through `plane_position`.
///
/// The normal is the plane normal. A sphere whose centre is behind the plane
/// is still pushed out along the normal, with a depth larger than its radius.
pub fn sphere_plane(
    sphere_position: Vec3,
    sphere_radius: f32,
    plane_position: Vec3,
    plane_normal: Vec3,
) -> Option<Mtv> {
    let distance = (sphere_position - plane_position).dot(&plane_normal);
    if distance > sphere_radius {
        return None;
    }

    Some(Mtv {
        normal: plane_normal,
        depth: (sphere_radius - distance).max(0.0),
    })
}
