//! Attempt evaluation: combines accuracy, fluency and per-token
//! pronunciation into a single weighted quality score with feedback.

use crate::error::{EvaluateError, Result};
use crate::fluency::fluency;
use crate::similarity::accuracy;
use crate::types::{EvaluationResult, Feedback, FeedbackLevel, TimedToken, TokenScore};

/// Weight of the whole-text accuracy score, in percent.
pub const ACCURACY_WEIGHT: u32 = 40;
/// Weight of the fluency score, in percent.
pub const FLUENCY_WEIGHT: u32 = 30;
/// Weight of the per-token pronunciation score, in percent.
pub const PRONUNCIATION_WEIGHT: u32 = 30;

/// Minimum per-token score for the token to count as passed.
pub const TOKEN_PASS_THRESHOLD: u8 = 80;

/// Synthetic timing window assigned to each expected token, in seconds.
const SYNTHETIC_TOKEN_SECONDS: f64 = 0.5;

const ACCURACY_ADVICE_THRESHOLD: u8 = 80;
const FLUENCY_ADVICE_THRESHOLD: u8 = 70;
const PRONUNCIATION_ADVICE_THRESHOLD: u8 = 75;

/// Evaluate one attempt against the reference text.
///
/// `recognized_tokens` and `duration` come from the upstream transcription;
/// the expected text is tokenized here with synthetic timing windows so
/// per-token comparison works without reference timing.
pub fn evaluate(
    expected_text: &str,
    recognized_text: &str,
    recognized_tokens: &[TimedToken],
    duration: f64,
) -> Result<EvaluationResult> {
    if expected_text.trim().is_empty() {
        return Err(EvaluateError::EmptyExpectedText);
    }

    let expected_tokens = tokenize_expected(expected_text);

    let accuracy_score = accuracy(expected_text, recognized_text);
    let fluency_score = fluency(recognized_tokens, duration);

    let token_scores = score_tokens(&expected_tokens, recognized_tokens);
    let pronunciation_score = if expected_tokens.is_empty() {
        0
    } else {
        let sum: u32 = token_scores.iter().map(|t| t.score as u32).sum();
        (sum as f64 / token_scores.len() as f64).round() as u8
    };

    let total_score = ((accuracy_score as u32 * ACCURACY_WEIGHT
        + fluency_score as u32 * FLUENCY_WEIGHT
        + pronunciation_score as u32 * PRONUNCIATION_WEIGHT) as f64
        / 100.0)
        .round() as u8;

    let feedback = build_feedback(
        total_score,
        accuracy_score,
        fluency_score,
        pronunciation_score,
        &token_scores,
    );

    Ok(EvaluationResult {
        total_score,
        accuracy_score,
        fluency_score,
        pronunciation_score,
        token_scores,
        expected_text: expected_text.to_string(),
        recognized_text: recognized_text.to_string(),
        feedback,
    })
}

/// Split the reference text on whitespace, assigning each token an
/// evenly-spaced synthetic timing window at `index * 0.5s`.
fn tokenize_expected(text: &str) -> Vec<TimedToken> {
    text.split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            let start = i as f64 * SYNTHETIC_TOKEN_SECONDS;
            TimedToken::new(word, start, start + SYNTHETIC_TOKEN_SECONDS)
        })
        .collect()
}

/// Pair the i-th expected and recognized tokens over the longer of the
/// two sequences; a missing counterpart is treated as the empty string.
fn score_tokens(expected: &[TimedToken], recognized: &[TimedToken]) -> Vec<TokenScore> {
    let count = expected.len().max(recognized.len());
    (0..count)
        .map(|i| {
            let expected_word = expected.get(i).map(|t| t.text.as_str()).unwrap_or("");
            let recognized_word = recognized.get(i).map(|t| t.text.as_str()).unwrap_or("");
            let score = accuracy(expected_word, recognized_word);
            TokenScore {
                expected: expected_word.to_string(),
                recognized: recognized_word.to_string(),
                score,
                passed: score >= TOKEN_PASS_THRESHOLD,
            }
        })
        .collect()
}

fn build_feedback(
    total: u8,
    accuracy_score: u8,
    fluency_score: u8,
    pronunciation_score: u8,
    token_scores: &[TokenScore],
) -> Feedback {
    let level = if total >= 90 {
        FeedbackLevel::Excellent
    } else if total >= 75 {
        FeedbackLevel::Good
    } else if total >= 45 {
        FeedbackLevel::Fair
    } else {
        FeedbackLevel::Poor
    };

    let mut positives = Vec::new();
    let mut improvements = Vec::new();

    let message = match level {
        FeedbackLevel::Excellent => {
            positives.push("Accurate and natural delivery.".to_string());
            "Excellent! You nailed this one.".to_string()
        }
        FeedbackLevel::Good => {
            positives.push("Most of the phrase came through clearly.".to_string());
            improvements.push("A little polish will make it perfect.".to_string());
            "Good job, nearly there.".to_string()
        }
        FeedbackLevel::Fair => {
            improvements.push("Several parts did not match the reference.".to_string());
            "Fair attempt, keep practicing.".to_string()
        }
        FeedbackLevel::Poor => {
            improvements.push("The attempt was hard to match to the reference.".to_string());
            "Let's try this one again.".to_string()
        }
    };

    let mut advice = Vec::new();
    if accuracy_score < ACCURACY_ADVICE_THRESHOLD {
        advice.push("Read the text again slowly and check each word.".to_string());
    }
    if fluency_score < FLUENCY_ADVICE_THRESHOLD {
        advice.push("Try to keep a steady pace without long pauses.".to_string());
    }
    if pronunciation_score < PRONUNCIATION_ADVICE_THRESHOLD {
        advice.push("Practice each word on its own before the full phrase.".to_string());
    }
    for token in token_scores.iter().filter(|t| !t.passed) {
        advice.push(token_advice(token));
    }

    Feedback {
        level,
        message,
        positives,
        improvements,
        advice,
    }
}

fn token_advice(token: &TokenScore) -> String {
    if token.recognized.is_empty() {
        format!("The word \"{}\" was not recognized.", token.expected)
    } else if token.expected.is_empty() {
        format!("Extra word \"{}\" was recognized.", token.recognized)
    } else {
        format!(
            "Expected \"{}\" but heard \"{}\".",
            token.expected, token.recognized
        )
    }
}
