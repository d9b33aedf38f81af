//! Pair enumeration and contact generation.
//!
//! The scan is exhaustive over unique unordered pairs, O(n²) in the number of
//! bodies. There is no spatial acceleration structure.

use crate::dynamics::{Body, BodyHandle, BodyRegistry};

use super::contact::ContactManifold;
use super::narrow_phase::intersect;

/// Detects every overlapping pair in the registry.
///
/// Pairs are visited in slot order (`i < j`). When only the second body of a
/// pair is movable the roles are swapped and the normal negated, so that
/// `body_a` is movable whenever either body is and the normal still points
/// from `body_b` toward `body_a`. Pairs of two immovable bodies are reported
/// too; the solver leaves them untouched.
pub fn detect_contacts(bodies: &BodyRegistry) -> Vec<ContactManifold> {
    let entries: Vec<(BodyHandle, &Body)> = bodies.iter().collect();
    let mut contacts = Vec::new();

    for (i, &(handle_a, body_a)) in entries.iter().enumerate() {
        for &(handle_b, body_b) in &entries[i + 1..] {
            if let Some(manifold) = contact_between(handle_a, body_a, handle_b, body_b) {
                contacts.push(manifold);
            }
        }
    }

    contacts
}

/// Runs the narrow phase on one pair and orients the result.
pub fn contact_between(
    handle_a: BodyHandle,
    body_a: &Body,
    handle_b: BodyHandle,
    body_b: &Body,
) -> Option<ContactManifold> {
    let mtv = intersect(&body_a.collider, body_a.position, &body_b.collider, body_b.position)?;

    if !body_a.is_movable() && body_b.is_movable() {
        Some(ContactManifold::new(handle_b, handle_a, mtv.flipped()))
    } else {
        Some(ContactManifold::new(handle_a, handle_b, mtv))
    }
}
