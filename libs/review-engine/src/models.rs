//! Persistent models owned by the review item store.

use chrono::{DateTime, Utc};
use review_core::{Priority, SchedulingState};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, Result};

/// Kind of a learnable unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    Word,
    Phrase,
}

impl ItemKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Word => "word",
            Self::Phrase => "phrase",
        }
    }
}

/// One learnable unit owned by a learner within a source document.
///
/// Scheduling fields are mutated exclusively through the service's
/// record-attempt path; items are tombstoned rather than deleted while
/// history references them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewItem {
    pub id: Uuid,
    pub owner_id: String,
    pub document_id: String,
    pub page: u32,
    pub kind: ItemKind,
    /// Target-language text, the reference for evaluation.
    pub text: String,
    pub translation: String,
    /// BCP 47 language code of `text`.
    pub language: String,
    /// Derived, informational mastery percentage 0-100.
    pub mastery: u8,
    pub ease_factor: f64,
    pub interval_days: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review_at: Option<DateTime<Utc>>,
    pub review_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl ReviewItem {
    /// Scheduling state consumed by the scheduler.
    pub fn scheduling_state(&self) -> SchedulingState {
        SchedulingState {
            ease_factor: self.ease_factor,
            interval_days: self.interval_days,
        }
    }

    /// Urgency tier, or `None` for an item never scheduled.
    pub fn priority(&self, now: DateTime<Utc>) -> Option<Priority> {
        self.next_review_at
            .map(|due| Priority::from_next_review(due, now))
    }

    pub fn is_archived(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Input for creating a review item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReviewItem {
    pub owner_id: String,
    pub document_id: String,
    pub page: u32,
    pub kind: ItemKind,
    pub text: String,
    pub translation: String,
    pub language: String,
}

impl NewReviewItem {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.owner_id.trim().is_empty() {
            return Err(EngineError::InvalidInput("owner id is empty".to_string()));
        }
        if self.text.trim().is_empty() {
            return Err(EngineError::InvalidInput("item text is empty".to_string()));
        }
        Ok(())
    }

    pub(crate) fn into_item(self, now: DateTime<Utc>) -> ReviewItem {
        let state = SchedulingState::default();
        ReviewItem {
            id: Uuid::new_v4(),
            owner_id: self.owner_id,
            document_id: self.document_id,
            page: self.page,
            kind: self.kind,
            text: self.text,
            translation: self.translation,
            language: self.language,
            mastery: 0,
            ease_factor: state.ease_factor,
            interval_days: state.interval_days,
            last_reviewed_at: None,
            next_review_at: None,
            review_count: 0,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

/// Immutable record of one completed review attempt. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewHistory {
    pub id: Uuid,
    pub item_id: Uuid,
    pub owner_id: String,
    pub quality_score: u8,
    pub time_spent_secs: f64,
    pub reviewed_at: DateTime<Utc>,
}

/// Per-owner counts for the stats operation.
///
/// `total` counts every live item; the buckets only cover items with a
/// next-review timestamp.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerStats {
    pub total: usize,
    pub urgent: usize,
    pub recommended: usize,
    pub relaxed: usize,
}

/// Due count plus priority-bucketed items, consumed by push reminders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DueDigest {
    pub due_count: usize,
    pub urgent: Vec<ReviewItem>,
    pub recommended: Vec<ReviewItem>,
    pub relaxed: Vec<ReviewItem>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn new_item() -> NewReviewItem {
        NewReviewItem {
            owner_id: "learner-1".to_string(),
            document_id: "book-1".to_string(),
            page: 12,
            kind: ItemKind::Word,
            text: "bonjour".to_string(),
            translation: "hello".to_string(),
            language: "fr".to_string(),
        }
    }

    #[test]
    fn empty_owner_is_invalid() {
        let mut item = new_item();
        item.owner_id = "  ".to_string();
        assert!(matches!(
            item.validate(),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn empty_text_is_invalid() {
        let mut item = new_item();
        item.text = String::new();
        assert!(matches!(
            item.validate(),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[test]
    fn fresh_item_starts_unscheduled() {
        let now = Utc::now();
        let item = new_item().into_item(now);
        assert_eq!(item.review_count, 0);
        assert_eq!(item.interval_days, 0);
        assert!((item.ease_factor - 2.5).abs() < 1e-9);
        assert_eq!(item.next_review_at, None);
        assert_eq!(item.priority(now), None);
    }

    #[test]
    fn item_serializes_without_null_timestamps() {
        let item = new_item().into_item(Utc::now());
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("next_review_at").is_none());
        assert!(json.get("deleted_at").is_none());
        assert_eq!(json["kind"], "word");
    }
}
