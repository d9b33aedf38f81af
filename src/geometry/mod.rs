mod collider;

pub use collider::{Collider, ColliderKind};
