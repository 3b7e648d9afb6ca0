//! Fluency analysis over timed speech tokens.

use crate::types::TimedToken;

/// Tuning constants for the fluency score.
///
/// The defaults mirror the historical behavior and should not be changed
/// silently; recalibrate only with empirical data.
#[derive(Debug, Clone)]
pub struct FluencyConfig {
    /// Ideal speaking pace in seconds per token.
    pub ideal_seconds_per_token: f64,
    /// Penalty per second of deviation from the ideal pace.
    pub pace_penalty: f64,
    /// Penalty per unit of inter-token gap variance.
    pub gap_variance_penalty: f64,
}

impl Default for FluencyConfig {
    fn default() -> Self {
        Self {
            ideal_seconds_per_token: 0.5,
            pace_penalty: 100.0,
            gap_variance_penalty: 200.0,
        }
    }
}

/// Fluency score 0-100 with default tuning.
pub fn fluency(tokens: &[TimedToken], total_duration: f64) -> u8 {
    fluency_with(&FluencyConfig::default(), tokens, total_duration)
}

/// Fluency score 0-100.
///
/// The unweighted mean of a speed sub-score (deviation of the average
/// seconds-per-token from the ideal pace) and a stability sub-score
/// (variance of the gaps between consecutive tokens), each linearly
/// penalized and floored at 0. No tokens or a non-positive duration
/// score 0.
pub fn fluency_with(config: &FluencyConfig, tokens: &[TimedToken], total_duration: f64) -> u8 {
    if tokens.is_empty() || total_duration <= 0.0 {
        return 0;
    }

    let avg_seconds = total_duration / tokens.len() as f64;
    let pace_diff = (avg_seconds - config.ideal_seconds_per_token).abs();
    let speed = (100.0 - pace_diff * config.pace_penalty).max(0.0);

    let gaps: Vec<f64> = tokens.windows(2).map(|w| w[1].start - w[0].end).collect();
    let variance = if gaps.is_empty() {
        0.0
    } else {
        let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
        gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64
    };
    let stability = (100.0 - variance * config.gap_variance_penalty).max(0.0);

    ((speed + stability) / 2.0).round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(start: f64, end: f64) -> TimedToken {
        TimedToken::new("w", start, end)
    }

    #[test]
    fn no_tokens_scores_zero() {
        assert_eq!(fluency(&[], 2.0), 0);
    }

    #[test]
    fn non_positive_duration_scores_zero() {
        assert_eq!(fluency(&[token(0.0, 0.5)], 0.0), 0);
        assert_eq!(fluency(&[token(0.0, 0.5)], -1.0), 0);
    }

    #[test]
    fn ideal_pace_with_even_gaps_scores_100() {
        // Two tokens over 1.0s: 0.5 s/token, a single gap has zero variance.
        let tokens = vec![token(0.0, 0.4), token(0.5, 0.9)];
        assert_eq!(fluency(&tokens, 1.0), 100);
    }

    #[test]
    fn single_token_has_no_gap_penalty() {
        // Speed: |1.0 - 0.5| * 100 = 50 penalty; stability stays 100.
        assert_eq!(fluency(&[token(0.0, 1.0)], 1.0), 75);
    }

    #[test]
    fn erratic_gaps_score_below_steady_gaps() {
        let steady = vec![token(0.0, 0.4), token(0.5, 0.9), token(1.0, 1.4)];
        let erratic = vec![token(0.0, 0.4), token(1.3, 1.5), token(1.55, 1.9)];
        assert!(fluency(&erratic, 1.5) < fluency(&steady, 1.5));
    }

    #[test]
    fn very_slow_pace_floors_speed_subscore() {
        // 10 s/token: speed floors at 0, stability 100 with one even gap.
        let tokens = vec![token(0.0, 9.0), token(10.0, 19.0)];
        assert_eq!(fluency(&tokens, 20.0), 50);
    }

    #[test]
    fn custom_config_changes_tuning() {
        let config = FluencyConfig {
            ideal_seconds_per_token: 1.0,
            ..FluencyConfig::default()
        };
        let tokens = vec![token(0.0, 0.9), token(1.0, 1.9)];
        assert_eq!(fluency_with(&config, &tokens, 2.0), 100);
    }
}
