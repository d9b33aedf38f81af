use crate::math::Vec3;

use super::body::Body;

/// Integrates velocity from gravity and accumulated force, then applies damping.
///
/// `gravity` is an acceleration, so every movable body falls at the same rate
/// whatever its mass. Immovable bodies ignore both gravity and forces. Damping
/// is applied as `damping^dt` so the decay per second is the same regardless
/// of the substep length.
pub fn integrate_velocity(body: &mut Body, gravity: Vec3, dt: f32) {
    if body.is_movable() {
        let acceleration = gravity * body.gravity_scale + body.force * body.inverse_mass;
        body.velocity += acceleration * dt;
    }
    if body.damping < 1.0 {
        body.velocity *= body.damping.powf(dt);
    }
}

/// Integrates position from velocity.
///
/// Runs for immovable bodies too, so a host-driven velocity moves them
/// kinematically.
pub fn integrate_position(body: &mut Body, dt: f32) {
    body.position += body.velocity * dt;
}

/// Performs a full semi-implicit Euler step and clears the force accumulator
pub fn integrate_semi_implicit_euler(body: &mut Body, gravity: Vec3, dt: f32) {
    integrate_velocity(body, gravity, dt);
    integrate_position(body, dt);
    body.clear_forces();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dynamics::BodyDesc;
    use crate::geometry::Collider;
    use approx::assert_relative_eq;

    fn gravity() -> Vec3 {
        Vec3::new(0.0, -9.81, 0.0)
    }

    #[test]
    fn test_gravity_integration() {
        let mut body = BodyDesc::default().build().unwrap();
        let dt = 1.0 / 50.0;

        integrate_semi_implicit_euler(&mut body, gravity(), dt);

        assert_relative_eq!(body.velocity.y, -9.81 * dt);
        // Semi-implicit: position uses the updated velocity.
        assert_relative_eq!(body.position.y, -9.81 * dt * dt);
        assert_eq!(body.force, Vec3::zeros());
    }

    #[test]
    fn test_fall_rate_is_mass_independent() {
        let mut light = BodyDesc::default().with_mass(1.0).build().unwrap();
        let mut heavy = BodyDesc::default().with_mass(50.0).build().unwrap();

        for _ in 0..10 {
            integrate_semi_implicit_euler(&mut light, gravity(), 0.01);
            integrate_semi_implicit_euler(&mut heavy, gravity(), 0.01);
        }

        assert_relative_eq!(light.velocity, heavy.velocity, epsilon = 1e-5);
    }

    #[test]
    fn test_gravity_scale() {
        let mut floating = BodyDesc::default().with_gravity_scale(0.0).build().unwrap();
        let mut half = BodyDesc::default().with_gravity_scale(0.5).build().unwrap();

        integrate_semi_implicit_euler(&mut floating, gravity(), 0.1);
        integrate_semi_implicit_euler(&mut half, gravity(), 0.1);

        assert_eq!(floating.velocity, Vec3::zeros());
        assert_relative_eq!(half.velocity.y, -0.4905, epsilon = 1e-6);
    }

    #[test]
    fn test_static_body_no_integration() {
        let mut body = BodyDesc::fixed(Collider::Plane { normal: Vec3::y() })
            .with_gravity_scale(1.0)
            .build()
            .unwrap();

        integrate_semi_implicit_euler(&mut body, gravity(), 1.0 / 60.0);

        assert_eq!(body.position, Vec3::zeros());
        assert_eq!(body.velocity, Vec3::zeros());
    }

    #[test]
    fn test_kinematic_motion() {
        let mut body = BodyDesc::fixed(Collider::default())
            .with_velocity(Vec3::new(2.0, 0.0, 0.0))
            .build()
            .unwrap();

        integrate_semi_implicit_euler(&mut body, gravity(), 0.5);

        assert_relative_eq!(body.position, Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(body.velocity, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_damping_is_step_independent() {
        let mut coarse = BodyDesc::default()
            .with_damping(0.5)
            .with_velocity(Vec3::new(10.0, 0.0, 0.0))
            .build()
            .unwrap();
        let mut fine = coarse.clone();

        integrate_velocity(&mut coarse, Vec3::zeros(), 1.0);
        for _ in 0..4 {
            integrate_velocity(&mut fine, Vec3::zeros(), 0.25);
        }

        assert_relative_eq!(coarse.velocity.x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(fine.velocity.x, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_applied_force() {
        let mut body = BodyDesc::default()
            .with_mass(2.0)
            .with_gravity_scale(0.0)
            .build()
            .unwrap();
        body.apply_force(Vec3::new(4.0, 0.0, 0.0));

        integrate_semi_implicit_euler(&mut body, gravity(), 0.5);

        assert_relative_eq!(body.velocity, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(body.force, Vec3::zeros());
    }

    #[test]
    fn test_extreme_masses_stay_finite() {
        for mass in [1e38, f32::MAX, 1e-30] {
            let mut body = BodyDesc::default().with_mass(mass).build().unwrap();
            for _ in 0..50 {
                integrate_semi_implicit_euler(&mut body, gravity(), 0.02);
            }

            assert!(body.velocity.iter().all(|c| c.is_finite()), "mass {mass}");
            assert_relative_eq!(body.velocity.y, -9.81, epsilon = 1e-3);
        }
    }
}
