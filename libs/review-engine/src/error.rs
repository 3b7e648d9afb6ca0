//! Error types for the review engine.

use review_core::EvaluateError;
use thiserror::Error;

/// Result type alias using EngineError.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Closed error taxonomy of the engine.
///
/// Scoring and scheduling never partially fail: every operation either
/// fully succeeds or returns one of these before mutating state.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Required input was empty or malformed. Not retriable.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The addressed item or owner does not exist in the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// Backing storage could not be reached or timed out. Retriable with
    /// backoff; the computations are idempotent given the same inputs.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),
}

impl From<EvaluateError> for EngineError {
    fn from(err: EvaluateError) -> Self {
        Self::InvalidInput(err.to_string())
    }
}
