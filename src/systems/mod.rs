//! Simulation systems
//!
//! - `gravity`: world gravity field and named directions
//! - `drag`: quadratic and quick drag, medium overrides
//! - `body`: the physics body and its contact response
//! - `body_system`: id-keyed body storage with (parallel) integration
//! - `collision`: velocity response formulas
//! - `moving_with`: carriers handing motion to riders
//! - `oscillators`: platforms, pendulums and springs
//! - `trajectory`: throw prediction

pub mod body;
pub mod body_system;
pub mod collision;
pub mod drag;
pub mod gravity;
pub mod moving_with;
pub mod oscillators;
pub mod trajectory;
