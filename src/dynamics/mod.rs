mod body;
mod integrator;
mod registry;

pub use body::{Body, BodyDesc};
pub(crate) use body::check_unit_interval;
pub use integrator::{integrate_position, integrate_semi_implicit_euler, integrate_velocity};
pub use registry::{BodyHandle, BodyRegistry};
