//! Asteroid field simulation
//!
//! A fixed-capacity set of spinning bodies, advanced one tick per frame and
//! queried with a laser ray. The simulation knows nothing about the scene:
//! it pushes transforms through [`Presentation`](field_engine::scene::Presentation)
//! using the opaque node handle each body carries.

mod body;
mod ray;
mod simulator;

pub use body::{Body, BodyId};
pub use ray::{hits_sphere, sphere_discriminant};
pub use simulator::AsteroidField;

/// Asteroid field errors
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldError {
    /// No body occupies this slot
    #[error("no body {0} in the field")]
    UnknownBody(BodyId),

    /// The field has already been created with scene nodes
    #[error("asteroid field already created with {0} bodies")]
    AlreadyCreated(usize),
}
