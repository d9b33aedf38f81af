use crate::dynamics::BodyHandle;
use crate::math::Vec3;

use super::narrow_phase::Mtv;

/// A contact between two overlapping bodies.
///
/// Manifolds are rebuilt from scratch every detection pass. When exactly one
/// body is movable it is always `body_a`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactManifold {
    /// First body, movable whenever the pair has a movable member
    pub body_a: BodyHandle,
    /// Second body
    pub body_b: BodyHandle,
    /// Contact normal (pointing from B to A)
    pub normal: Vec3,
    /// Penetration depth along the normal, `>= 0`
    pub depth: f32,
}

impl ContactManifold {
    /// Creates a manifold from a narrow-phase result for the ordered pair `(a, b)`
    pub fn new(body_a: BodyHandle, body_b: BodyHandle, mtv: Mtv) -> Self {
        Self {
            body_a,
            body_b,
            normal: mtv.normal,
            depth: mtv.depth,
        }
    }

    /// Returns the minimum translation vector of this contact
    pub fn mtv(&self) -> Mtv {
        Mtv {
            normal: self.normal,
            depth: self.depth,
        }
    }

    /// Returns true if the body takes part in this contact
    pub fn involves(&self, handle: BodyHandle) -> bool {
        self.body_a == handle || self.body_b == handle
    }

    /// Returns the partner of `handle`, if `handle` takes part in this contact
    pub fn other(&self, handle: BodyHandle) -> Option<BodyHandle> {
        if handle == self.body_a {
            Some(self.body_b)
        } else if handle == self.body_b {
            Some(self.body_a)
        } else {
            None
        }
    }

    /// Returns the contact normal oriented to push `handle` away from its partner
    pub fn normal_for(&self, handle: BodyHandle) -> Option<Vec3> {
        if handle == self.body_a {
            Some(self.normal)
        } else if handle == self.body_b {
            Some(-self.normal)
        } else {
            None
        }
    }

    /// Returns the unordered pair identifier of this contact
    pub fn pair(&self) -> CollisionPair {
        CollisionPair::new(self.body_a, self.body_b)
    }
}

/// A collision pair identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollisionPair {
    /// First body (always has smaller handle)
    pub body_a: BodyHandle,
    /// Second body (always has larger handle)
    pub body_b: BodyHandle,
}

impl CollisionPair {
    /// Creates a new collision pair, ensuring consistent ordering
    pub fn new(a: BodyHandle, b: BodyHandle) -> Self {
        if a <= b {
            Self { body_a: a, body_b: b }
        } else {
            Self { body_a: b, body_b: a }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifold() -> ContactManifold {
        ContactManifold::new(
            BodyHandle::new(4, 0),
            BodyHandle::new(1, 2),
            Mtv {
                normal: Vec3::y(),
                depth: 0.1,
            },
        )
    }

    #[test]
    fn test_partner_lookup() {
        let m = manifold();
        assert_eq!(m.other(BodyHandle::new(4, 0)), Some(BodyHandle::new(1, 2)));
        assert_eq!(m.other(BodyHandle::new(1, 2)), Some(BodyHandle::new(4, 0)));
        assert_eq!(m.other(BodyHandle::new(1, 0)), None);
        assert!(!m.involves(BodyHandle::new(1, 0)));
    }

    #[test]
    fn test_normal_orientation() {
        let m = manifold();
        assert_eq!(m.normal_for(BodyHandle::new(4, 0)), Some(Vec3::y()));
        assert_eq!(m.normal_for(BodyHandle::new(1, 2)), Some(-Vec3::y()));
        assert_eq!(m.mtv().translation(), Vec3::y() * 0.1);
    }

    #[test]
    fn test_collision_pair_ordering() {
        let pair1 = CollisionPair::new(BodyHandle::new(1, 0), BodyHandle::new(2, 0));
        let pair2 = CollisionPair::new(BodyHandle::new(2, 0), BodyHandle::new(1, 0));

        assert_eq!(pair1, pair2);
        assert_eq!(pair1.body_a.index(), 1);
        assert_eq!(pair1.body_b.index(), 2);
        assert_eq!(manifold().pair(), CollisionPair::new(BodyHandle::new(1, 2), BodyHandle::new(4, 0)));
    }
}
