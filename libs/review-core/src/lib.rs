//! Core review engine library shared by service and tooling crates.
//!
//! Provides:
//! - Similarity scoring between expected and recognized text (edit distance)
//! - Fluency analysis over timed speech tokens
//! - Attempt evaluation producing a weighted quality score and feedback
//! - SM-2 style spaced repetition scheduling with urgency tiers

pub mod error;
pub mod evaluation;
pub mod fluency;
pub mod scheduler;
pub mod similarity;
pub mod types;

pub use error::{EvaluateError, Result};
pub use evaluation::{
    evaluate, ACCURACY_WEIGHT, FLUENCY_WEIGHT, PRONUNCIATION_WEIGHT, TOKEN_PASS_THRESHOLD,
};
pub use fluency::{fluency, fluency_with, FluencyConfig};
pub use scheduler::{Priority, QualityGrade, Scheduler, SchedulingResult, SchedulingState};
pub use similarity::accuracy;
pub use types::{EvaluationResult, Feedback, FeedbackLevel, TimedToken, TokenScore};
