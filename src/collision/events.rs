use crate::dynamics::BodyHandle;
use crate::math::Vec3;

/// Where a contact is in its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    /// The pair was not in contact during the previous substep
    Started,
    /// The pair was already in contact during the previous substep
    Persisted,
    /// The pair was in contact during the previous substep and no longer is
    Ended,
}

/// A contact notification delivered to one participant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    /// The body whose listener receives this event
    pub body: BodyHandle,
    /// The other participant
    pub other: BodyHandle,
    /// Lifetime stage of the contact
    pub phase: ContactPhase,
    /// Contact normal pointing toward `body` (zero for `Ended`)
    pub normal: Vec3,
    /// Penetration depth at detection time (zero for `Ended`)
    pub depth: f32,
}

/// A per-body contact notification capability registered by the host.
///
/// Listeners run synchronously inside `World::step`, right after contact
/// detection and before the solver touches any body.
pub trait ContactListener {
    /// Called once per participant for every contact event
    fn on_contact(&mut self, event: &ContactEvent);
}

impl<F> ContactListener for F
where
    F: FnMut(&ContactEvent),
{
    fn on_contact(&mut self, event: &ContactEvent) {
        self(event)
    }
}
