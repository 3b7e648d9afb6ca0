//! Error types for review-core.

use thiserror::Error;

/// Result type alias using EvaluateError.
pub type Result<T> = std::result::Result<T, EvaluateError>;

/// Errors that can occur while evaluating an attempt.
///
/// A low score is a normal result, never an error; this only covers
/// input that cannot be evaluated at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvaluateError {
    #[error("expected text is empty")]
    EmptyExpectedText,
}
