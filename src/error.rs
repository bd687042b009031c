//! Error taxonomy for the projection engines
//!
//! Both variants are raised before any simulation step runs; a schedule or
//! cash-flow sequence is either complete or absent, never partial.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Malformed or out-of-range input, rejected before simulation
    #[error("invalid input: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Degenerate schedule configuration detected during setup
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),

    /// Persisted payload could not be decoded in any supported shape
    #[error("malformed persisted payload: {0}")]
    Parse(String),
}

impl EngineError {
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        EngineError::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EngineError {
    fn from(e: serde_json::Error) -> Self {
        EngineError::Parse(e.to_string())
    }
}

/// Standard result type for all engine operations
pub type EngineResult<T> = Result<T, EngineError>;
