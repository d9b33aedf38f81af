use crate::collision::ContactManifold;
use crate::dynamics::BodyRegistry;
use crate::error::Result;
use crate::math::utils::try_normalize;
use crate::math::Vec3;

/// Impulses applied while resolving one contact.
///
/// Magnitudes may overflow to infinity for near-infinite masses; the
/// velocity changes they describe stay finite.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContactImpulse {
    /// Impulse magnitude along the contact normal
    pub normal: f32,
    /// Friction impulse magnitude along `tangent`
    pub tangent: f32,
    /// Sliding direction, zero when there was none
    pub tangent_dir: Vec3,
}

/// Relative velocity of the pair along the contact normal.
///
/// Negative values mean the bodies are approaching.
pub fn separation_velocity(manifold: &ContactManifold, bodies: &BodyRegistry) -> Result<f32> {
    let body_a = bodies.get(manifold.body_a)?;
    let body_b = bodies.get(manifold.body_b)?;
    Ok((body_a.velocity - body_b.velocity).dot(&manifold.normal))
}

/// Resolves the velocity of one contact with a single restitution impulse
/// followed by a Coulomb-clamped friction impulse.
///
/// No-ops when both bodies have infinite mass or when they are already
/// separating along the normal. This is a single sequential-impulse pass, so
/// chains of contacts only converge over several substeps.
pub fn resolve_velocity(
    manifold: &ContactManifold,
    bodies: &mut BodyRegistry,
) -> Result<ContactImpulse> {
    let (body_a, body_b) = bodies.pair_mut(manifold.body_a, manifold.body_b)?;

    let inv_mass_sum = body_a.inverse_mass + body_b.inverse_mass;
    if inv_mass_sum <= 0.0 {
        return Ok(ContactImpulse::default());
    }

    let normal = manifold.normal;
    let relative_velocity = body_a.velocity - body_b.velocity;
    let normal_velocity = relative_velocity.dot(&normal);
    if normal_velocity > 0.0 {
        return Ok(ContactImpulse::default());
    }

    // Share of each velocity change taken by each body; keeps huge masses finite.
    let weight_a = body_a.inverse_mass / inv_mass_sum;
    let weight_b = body_b.inverse_mass / inv_mass_sum;

    // Normal impulse
    let restitution = body_a.restitution.min(body_b.restitution);
    let normal_change = -(1.0 + restitution) * normal_velocity;
    body_a.velocity += normal * (normal_change * weight_a);
    body_b.velocity -= normal * (normal_change * weight_b);
    let j = normal_change / inv_mass_sum;

    // Friction, from the pre-impulse sliding velocity
    let Some(tangent) = try_normalize(relative_velocity - normal * normal_velocity) else {
        return Ok(ContactImpulse {
            normal: j,
            ..ContactImpulse::default()
        });
    };

    let mu = (body_a.friction * body_b.friction).sqrt();
    let max_change = normal_change * mu;
    let tangent_change = (-relative_velocity.dot(&tangent)).clamp(-max_change, max_change);
    body_a.velocity += tangent * (tangent_change * weight_a);
    body_b.velocity -= tangent * (tangent_change * weight_b);

    Ok(ContactImpulse {
        normal: j,
        tangent: tangent_change / inv_mass_sum,
        tangent_dir: tangent,
    })
}
