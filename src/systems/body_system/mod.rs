//! BodySystem - registry of all simulated bodies
//!
//! Bodies are stored in a flat Vec and addressed by id. The world drives the
//! two per-step passes (integration, then positions) through it.

mod system;

pub use system::BodySystem;
