//! Shared types for attempt evaluation.

use serde::{Deserialize, Serialize};

/// One recognized token with timing offsets from the utterance start.
///
/// Produced by the upstream transcription collaborator; `confidence` is
/// carried through but does not participate in any scoring formula.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimedToken {
    pub text: String,
    /// Start offset in seconds.
    pub start: f64,
    /// End offset in seconds.
    pub end: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl TimedToken {
    pub fn new(text: impl Into<String>, start: f64, end: f64) -> Self {
        Self {
            text: text.into(),
            start,
            end,
            confidence: None,
        }
    }
}

/// Similarity result for one expected/recognized token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenScore {
    /// Token from the reference text (empty when the learner said extra words).
    pub expected: String,
    /// Token from the recognition (empty when a word was missed).
    pub recognized: String,
    /// Similarity score 0-100.
    pub score: u8,
    /// Whether the score reached the pass threshold.
    pub passed: bool,
}

/// Qualitative feedback tier derived from the total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackLevel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl FeedbackLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

/// Qualitative feedback bundle. All lists preserve insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: String,
    pub positives: Vec<String>,
    pub improvements: Vec<String>,
    pub advice: Vec<String>,
}

/// Output of one scoring pass. Transient; not persisted by this crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Weighted total score 0-100.
    pub total_score: u8,
    pub accuracy_score: u8,
    pub fluency_score: u8,
    pub pronunciation_score: u8,
    pub token_scores: Vec<TokenScore>,
    pub expected_text: String,
    pub recognized_text: String,
    pub feedback: Feedback,
}
