//! Error types for the flocking engine.

use thiserror::Error;

/// Errors returned by the engine. None of them leave partial state behind.
#[derive(Debug, Error)]
pub enum FlockError {
    /// Non-positive domain size, or a population that is not a whole number
    /// in `1..=MAX_POPULATION`
    #[error("invalid domain: width={width}, height={height}, count={count}")]
    InvalidDomain { width: f64, height: f64, count: f64 },

    /// Negative or non-finite parameter
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Frame requested before a successful init
    #[error("engine not initialised; call init first")]
    NotInitialized,

    #[error("invalid time step: {0} (must be finite and non-negative)")]
    InvalidTimeStep(f64),

    #[error("debug index {index} out of range for {count} boids")]
    InvalidDebugIndex { index: usize, count: usize },

    /// Host request could not be decoded or the snapshot encoded
    #[error("malformed request: {0}")]
    InvalidRequest(#[from] serde_json::Error),
}

impl FlockError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, FlockError>;
