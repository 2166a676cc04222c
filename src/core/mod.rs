//! Core primitives shared by every system.

#[macro_use]
pub mod utils;
mod vec2;

pub use vec2::Vec2;
