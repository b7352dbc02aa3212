//! Crate error type
//!
//! Stepping the simulation never fails; errors only come out of building an
//! arena or loading its configuration.

/// Errors raised while configuring or constructing an arena
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Precondition violated: {0}")]
    PreconditionViolation(&'static str),
    #[error("Config read failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config parse failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl SimError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        SimError::InvalidConfiguration(msg.into())
    }
}
