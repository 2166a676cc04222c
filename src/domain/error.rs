use thiserror::Error;

/// Errors surfaced while loading scene configuration.
///
/// Simulation calls never return these: invalid ids or NaN inputs panic instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("Duplicate body name: {0}")]
    DuplicateBody(String),

    #[error("Unknown body name: {0}")]
    UnknownBody(String),
}

impl EngineError {
    pub(crate) fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
