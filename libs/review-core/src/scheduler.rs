//! SM-2 style spaced repetition scheduling driven by quality scores.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Discrete quality grade mapped from a continuous 0-100 score.
///
/// There is intentionally no grade 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityGrade {
    Failed,
    Hard,
    Fair,
    Good,
    Perfect,
}

impl QualityGrade {
    /// Map a 0-100 quality score onto a grade.
    pub fn from_score(score: u8) -> Self {
        match score {
            90..=u8::MAX => Self::Perfect,
            70..=89 => Self::Good,
            50..=69 => Self::Fair,
            30..=49 => Self::Hard,
            _ => Self::Failed,
        }
    }

    /// Numeric grade value used by the ease formula.
    pub fn to_value(self) -> u8 {
        match self {
            Self::Failed => 0,
            Self::Hard => 2,
            Self::Fair => 3,
            Self::Good => 4,
            Self::Perfect => 5,
        }
    }

    /// Grades below 3 reset the review interval.
    pub fn is_passing(self) -> bool {
        self.to_value() >= 3
    }
}

/// Urgency tier derived from time until the next review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Urgent,
    Recommended,
    Relaxed,
}

impl Priority {
    /// Triage an item by its next-review timestamp.
    ///
    /// Overdue or due within 24 hours is urgent, within 48 hours is
    /// recommended, anything later is relaxed. Both boundaries are
    /// inclusive.
    pub fn from_next_review(next_review_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let until = next_review_at - now;
        if until <= Duration::hours(24) {
            Self::Urgent
        } else if until <= Duration::hours(48) {
            Self::Recommended
        } else {
            Self::Relaxed
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Recommended => "recommended",
            Self::Relaxed => "relaxed",
        }
    }
}

/// Prior scheduling state of one review item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingState {
    pub ease_factor: f64,
    pub interval_days: u32,
}

impl Default for SchedulingState {
    fn default() -> Self {
        Self {
            ease_factor: 2.5,
            interval_days: 0,
        }
    }
}

/// Next scheduling state after recording an attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulingResult {
    pub ease_factor: f64,
    pub interval_days: u32,
    pub next_review_at: DateTime<Utc>,
    pub priority: Priority,
}

/// SM-2 scheduler with configurable bounds.
#[derive(Debug, Clone)]
pub struct Scheduler {
    /// Lower bound of the ease factor.
    pub minimum_ease: f64,
    /// Interval in days after the first successful review.
    pub first_interval: u32,
    /// Interval in days after the second successful review.
    pub second_interval: u32,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            minimum_ease: 1.3,
            first_interval: 1,
            second_interval: 6,
        }
    }
}

impl Scheduler {
    /// Compute the next scheduling state from a 0-100 quality score.
    ///
    /// Pure: persistence is the store's responsibility. A failing grade
    /// resets the interval to one day but still applies the ease update.
    pub fn schedule(
        &self,
        state: &SchedulingState,
        quality_score: u8,
        now: DateTime<Utc>,
    ) -> SchedulingResult {
        let grade = QualityGrade::from_score(quality_score);
        let q = grade.to_value() as f64;

        let delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
        let ease_factor = (state.ease_factor + delta).max(self.minimum_ease);

        let interval_days = if !grade.is_passing() {
            1
        } else {
            match state.interval_days {
                0 => self.first_interval,
                1 => self.second_interval,
                n => (n as f64 * ease_factor).round() as u32,
            }
        };

        let next_review_at = now + Duration::days(interval_days as i64);

        SchedulingResult {
            ease_factor,
            interval_days,
            next_review_at,
            priority: Priority::from_next_review(next_review_at, now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn now() -> DateTime<Utc> {
        Utc::now()
    }

    fn state(ease_factor: f64, interval_days: u32) -> SchedulingState {
        SchedulingState {
            ease_factor,
            interval_days,
        }
    }

    #[test]
    fn grade_thresholds() {
        assert_eq!(QualityGrade::from_score(100), QualityGrade::Perfect);
        assert_eq!(QualityGrade::from_score(90), QualityGrade::Perfect);
        assert_eq!(QualityGrade::from_score(89), QualityGrade::Good);
        assert_eq!(QualityGrade::from_score(70), QualityGrade::Good);
        assert_eq!(QualityGrade::from_score(69), QualityGrade::Fair);
        assert_eq!(QualityGrade::from_score(50), QualityGrade::Fair);
        assert_eq!(QualityGrade::from_score(49), QualityGrade::Hard);
        assert_eq!(QualityGrade::from_score(30), QualityGrade::Hard);
        assert_eq!(QualityGrade::from_score(29), QualityGrade::Failed);
        assert_eq!(QualityGrade::from_score(0), QualityGrade::Failed);
    }

    #[test]
    fn ease_factor_never_below_minimum() {
        let scheduler = Scheduler::default();
        for score in [0, 30, 50, 70, 90] {
            let result = scheduler.schedule(&state(1.3, 10), score, now());
            assert!(result.ease_factor >= scheduler.minimum_ease);
        }
    }

    #[test]
    fn perfect_grade_raises_ease_by_a_tenth() {
        let result = Scheduler::default().schedule(&state(2.5, 6), 95, now());
        assert!((result.ease_factor - 2.6).abs() < 1e-9);
    }

    #[test]
    fn failing_grade_resets_interval_but_updates_ease() {
        let scheduler = Scheduler::default();
        let result = scheduler.schedule(&state(2.5, 6), 20, now());
        assert_eq!(result.interval_days, 1);
        // Grade 0: delta is 0.1 - 5 * (0.08 + 0.10) = -0.8.
        assert!((result.ease_factor - 1.7).abs() < 1e-9);
        assert_eq!(result.priority, Priority::Urgent);
    }

    #[test]
    fn hard_grade_also_resets_interval() {
        let result = Scheduler::default().schedule(&state(2.5, 30), 35, now());
        assert_eq!(result.interval_days, 1);
    }

    #[test]
    fn interval_progression_from_new_item() {
        let scheduler = Scheduler::default();
        let t = now();

        let first = scheduler.schedule(&state(2.5, 0), 95, t);
        assert_eq!(first.interval_days, 1);

        let second = scheduler.schedule(
            &state(first.ease_factor, first.interval_days),
            95,
            t,
        );
        assert_eq!(second.interval_days, 6);

        let third = scheduler.schedule(
            &state(second.ease_factor, second.interval_days),
            95,
            t,
        );
        assert_eq!(
            third.interval_days,
            (6.0 * third.ease_factor).round() as u32
        );
        assert!(third.interval_days > second.interval_days);
    }

    #[test]
    fn mature_item_with_high_score_is_relaxed() {
        let t = now();
        let result = Scheduler::default().schedule(&state(2.5, 6), 95, t);
        assert!((result.ease_factor - 2.6).abs() < 1e-9);
        assert_eq!(result.interval_days, 16);
        assert_eq!(result.next_review_at, t + Duration::days(16));
        assert_eq!(result.priority, Priority::Relaxed);
    }

    #[test]
    fn priority_boundaries_are_inclusive() {
        let t = now();
        assert_eq!(
            Priority::from_next_review(t + Duration::hours(24), t),
            Priority::Urgent
        );
        assert_eq!(
            Priority::from_next_review(t + Duration::hours(25), t),
            Priority::Recommended
        );
        assert_eq!(
            Priority::from_next_review(t + Duration::hours(48), t),
            Priority::Recommended
        );
        assert_eq!(
            Priority::from_next_review(t + Duration::hours(49), t),
            Priority::Relaxed
        );
    }

    #[test]
    fn overdue_items_are_urgent() {
        let t = now();
        assert_eq!(
            Priority::from_next_review(t - Duration::hours(5), t),
            Priority::Urgent
        );
        assert_eq!(Priority::from_next_review(t, t), Priority::Urgent);
    }
}
