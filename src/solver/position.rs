use crate::collision::ContactManifold;
use crate::dynamics::BodyRegistry;
use crate::error::Result;

/// Pushes the pair apart along the contact normal by the full penetration depth.
///
/// The correction is shared equally when both bodies are movable and given
/// entirely to the movable one otherwise. Immovable bodies never move, and
/// velocities are left untouched.
pub fn resolve_penetration(manifold: &ContactManifold, bodies: &mut BodyRegistry) -> Result<()> {
    let (body_a, body_b) = bodies.pair_mut(manifold.body_a, manifold.body_b)?;
    let correction = manifold.normal * manifold.depth;

    match (body_a.is_movable(), body_b.is_movable()) {
        (true, true) => {
            body_a.position += correction * 0.5;
            body_b.position -= correction * 0.5;
        }
        (true, false) => body_a.position += correction,
        (false, true) => body_b.position -= correction,
        (false, false) => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::{detect_contacts, intersect, Mtv};
    use crate::dynamics::{BodyDesc, BodyHandle};
    use crate::geometry::Collider;
    use crate::math::Vec3;
    use approx::assert_relative_eq;

    fn sphere(registry: &mut BodyRegistry, x: f32, fixed: bool) -> BodyHandle {
        let desc = if fixed {
            BodyDesc::fixed(Collider::Sphere { radius: 0.5 })
        } else {
            BodyDesc::dynamic(Collider::Sphere { radius: 0.5 })
        };
        registry.insert(desc.with_position(Vec3::new(x, 0.0, 0.0)).build().unwrap())
    }

    fn depth_between(registry: &BodyRegistry, a: BodyHandle, b: BodyHandle) -> f32 {
        let a = registry.get(a).unwrap();
        let b = registry.get(b).unwrap();
        intersect(&a.collider, a.position, &b.collider, b.position)
            .map(|mtv| mtv.depth)
            .unwrap_or(0.0)
    }

    #[test]
    fn test_split_between_movable_bodies() {
        let mut registry = BodyRegistry::new();
        let a = sphere(&mut registry, -0.4, false);
        let b = sphere(&mut registry, 0.4, false);

        let manifold = detect_contacts(&registry)[0];
        assert_relative_eq!(manifold.depth, 0.2, epsilon = 1e-6);
        resolve_penetration(&manifold, &mut registry).unwrap();

        assert_relative_eq!(registry.get(a).unwrap().position.x, -0.5, epsilon = 1e-6);
        assert_relative_eq!(registry.get(b).unwrap().position.x, 0.5, epsilon = 1e-6);
        assert_relative_eq!(depth_between(&registry, a, b), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_full_correction_to_movable_body() {
        let mut registry = BodyRegistry::new();
        let ball = registry.insert(
            BodyDesc::dynamic(Collider::Sphere { radius: 0.5 })
                .with_position(Vec3::new(0.0, 0.3, 0.0))
                .build()
                .unwrap(),
        );
        let floor = registry.insert(
            BodyDesc::fixed(Collider::Plane { normal: Vec3::y() })
                .build()
                .unwrap(),
        );

        let manifold = detect_contacts(&registry)[0];
        resolve_penetration(&manifold, &mut registry).unwrap();

        assert_relative_eq!(registry.get(ball).unwrap().position.y, 0.5, epsilon = 1e-6);
        assert_eq!(registry.get(floor).unwrap().position, Vec3::zeros());
        assert_relative_eq!(depth_between(&registry, ball, floor), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_immovable_first_still_respected() {
        let mut registry = BodyRegistry::new();
        let wall = sphere(&mut registry, 0.0, true);
        let ball = sphere(&mut registry, 0.9, false);

        // Deliberately keep the immovable body first.
        let manifold = ContactManifold::new(
            wall,
            ball,
            Mtv {
                normal: -Vec3::x(),
                depth: 0.1,
            },
        );
        resolve_penetration(&manifold, &mut registry).unwrap();

        assert_eq!(registry.get(wall).unwrap().position, Vec3::zeros());
        assert_relative_eq!(registry.get(ball).unwrap().position.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_static_pair_no_op() {
        let mut registry = BodyRegistry::new();
        let a = sphere(&mut registry, 0.0, true);
        let b = sphere(&mut registry, 0.5, true);

        let manifold = detect_contacts(&registry)[0];
        resolve_penetration(&manifold, &mut registry).unwrap();

        assert_eq!(registry.get(a).unwrap().position, Vec3::zeros());
        assert_eq!(registry.get(b).unwrap().position, Vec3::new(0.5, 0.0, 0.0));
    }

    #[test]
    fn test_velocity_untouched() {
        let mut registry = BodyRegistry::new();
        let a = registry.insert(
            BodyDesc::dynamic(Collider::Sphere { radius: 0.5 })
                .with_velocity(Vec3::new(1.0, 0.0, 0.0))
                .build()
                .unwrap(),
        );
        sphere(&mut registry, 0.8, false);

        let manifold = detect_contacts(&registry)[0];
        resolve_penetration(&manifold, &mut registry).unwrap();

        assert_eq!(registry.get(a).unwrap().velocity, Vec3::new(1.0, 0.0, 0.0));
    }
}
