//! Domain data: media, configuration and the error type.

pub mod config;
pub mod error;
pub mod media;

pub use config::{BodyConfig, SceneConfig};
pub use error::EngineError;
