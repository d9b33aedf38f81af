pub mod broad_phase;
pub mod contact;
pub mod events;
pub mod narrow_phase;

pub use broad_phase::{contact_between, detect_contacts};
pub use contact::{CollisionPair, ContactManifold};
pub use events::{ContactEvent, ContactListener, ContactPhase};
pub use narrow_phase::{intersect, sphere_plane, sphere_sphere, Mtv};
