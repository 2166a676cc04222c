//! PhysicsBody - a velocity/mass integrator with its own drag, gravity and
//! collision response.
//!
//! Per step a body runs drag, gravity and collision drag, then snapshots its
//! velocity as the cached velocity every collision formula reads.

mod body;
mod contact;

pub use body::{
    BodyId, BodyKind, PhysicsBody, BASE_VELOCITY_RESET_DELAY, BASE_VELOCITY_RESET_RATE,
    BASE_VELOCITY_SNAP_SQ,
};
pub use contact::{BodySnapshot, ContactListener, ContactPartner};
