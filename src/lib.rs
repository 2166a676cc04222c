//! Gravitas Engine - gravity-body physics core for 2D gravity-switching platformers
//!
//! Architecture:
//! - core/          - Vec2 and fail-fast guard macros
//! - domain/        - Media table, configuration, errors
//! - systems/       - Gravity, drag, bodies, collision response, carriers, oscillators
//! - simulation/    - World orchestration and the wasm facade
//!
//! Collision detection is not part of the engine: the host reports contacts
//! and trigger volumes, the engine resolves them.

// Guard macros are exported from core, keep it first
#[macro_use]
pub mod core;
pub mod domain;
pub mod systems;
pub mod simulation;

use wasm_bindgen::prelude::*;

// Thread pool setup for the parallel integration pass in the browser
#[cfg(all(feature = "parallel", target_arch = "wasm32"))]
pub use wasm_bindgen_rayon::init_thread_pool;

// Better error messages in debug mode
#[cfg(feature = "console_error_panic_hook")]
pub fn set_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Initialize the engine
#[wasm_bindgen]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();

    web_sys::console::log_1(&"Gravitas engine initialized".into());
}

/// Get engine version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Gravity magnitude applied along any non-zero direction.
#[wasm_bindgen]
pub fn gravity_acceleration() -> f32 {
    systems::gravity::GRAVITY_ACCELERATION
}

// Re-export main types
pub use crate::core::Vec2;
pub use domain::{BodyConfig, EngineError, SceneConfig};
pub use simulation::{ContactPhase, SceneHandles, TriggerPhase, World, WorldCore};
pub use systems::body::{BodyId, BodyKind, PhysicsBody};
pub use systems::gravity::{GravityDirection, GravityField};
