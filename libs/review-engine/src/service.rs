//! Orchestration of the evaluate-then-schedule control flow.

use std::future::Future;
use std::time::Duration;

use chrono::{DateTime, Utc};
use review_core::{evaluate, EvaluationResult, Priority, Scheduler, TimedToken};
use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::models::{DueDigest, NewReviewItem, OwnerStats, ReviewHistory, ReviewItem};
use crate::store::ReviewItemStore;

/// One attempt as delivered by the transcription collaborator.
#[derive(Debug, Clone)]
pub struct AttemptInput {
    pub recognized_text: String,
    pub tokens: Vec<TimedToken>,
    /// Total utterance duration in seconds.
    pub duration_secs: f64,
    /// Wall-clock time the learner spent, recorded into history.
    pub time_spent_secs: f64,
}

/// Result of recording one attempt.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub evaluation: EvaluationResult,
    /// The item after the scheduling mutation.
    pub item: ReviewItem,
    pub next_review_at: DateTime<Utc>,
    pub priority: Priority,
}

/// Review service gluing scorer, scheduler and store together.
///
/// All scoring runs outside the item lock; only the read-modify-write of
/// the scheduling fields happens under it, so concurrent attempts on the
/// same item linearize without lost updates.
#[derive(Debug)]
pub struct ReviewService<S> {
    store: S,
    scheduler: Scheduler,
    store_timeout: Option<Duration>,
}

impl<S: ReviewItemStore> ReviewService<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            scheduler: Scheduler::default(),
            store_timeout: None,
        }
    }

    pub fn with_scheduler(mut self, scheduler: Scheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Bound every store call with a deadline; an elapsed deadline
    /// surfaces as `StoreUnavailable`.
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = Some(timeout);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a review item for a learner.
    pub async fn create_item(&self, item: NewReviewItem, now: DateTime<Utc>) -> Result<ReviewItem> {
        self.bound(self.store.create(item, now)).await
    }

    pub async fn item(&self, id: Uuid) -> Result<ReviewItem> {
        self.bound(self.store.get_by_id(id)).await
    }

    pub async fn items_for(&self, owner_id: &str) -> Result<Vec<ReviewItem>> {
        self.bound(self.store.get_by_owner(owner_id)).await
    }

    pub async fn due_items(&self, owner_id: &str, as_of: DateTime<Utc>) -> Result<Vec<ReviewItem>> {
        self.bound(self.store.get_due(owner_id, as_of)).await
    }

    pub async fn stats(&self, owner_id: &str, as_of: DateTime<Utc>) -> Result<OwnerStats> {
        self.bound(self.store.stats(owner_id, as_of)).await
    }

    pub async fn history(&self, item_id: Uuid) -> Result<Vec<ReviewHistory>> {
        self.bound(self.store.history_for(item_id)).await
    }

    pub async fn archive_item(&self, id: Uuid, now: DateTime<Utc>) -> Result<()> {
        self.bound(self.store.archive(id, now)).await
    }

    /// Evaluate one attempt against the item's reference text, reschedule
    /// the item and append a history record.
    ///
    /// The evaluation and scheduling are pure; only the store mutation has
    /// effects, and a failure before it leaves the item untouched.
    pub async fn record_attempt(
        &self,
        item_id: Uuid,
        attempt: AttemptInput,
        now: DateTime<Utc>,
    ) -> Result<AttemptOutcome> {
        let item = self.bound(self.store.get_by_id(item_id)).await?;

        let evaluation = evaluate(
            &item.text,
            &attempt.recognized_text,
            &attempt.tokens,
            attempt.duration_secs,
        )?;
        let quality = evaluation.total_score;

        let scheduler = self.scheduler.clone();
        let (item, scheduling) = self
            .bound(self.store.update_with(item_id, move |item| {
                let result = scheduler.schedule(&item.scheduling_state(), quality, now);
                let reviews = item.review_count;
                item.mastery = ((item.mastery as f64 * reviews as f64 + quality as f64)
                    / (reviews + 1) as f64)
                    .round() as u8;
                item.ease_factor = result.ease_factor;
                item.interval_days = result.interval_days;
                item.last_reviewed_at = Some(now);
                item.next_review_at = Some(result.next_review_at);
                item.review_count = reviews + 1;
                item.updated_at = now;
                result
            }))
            .await?;

        let record = ReviewHistory {
            id: Uuid::new_v4(),
            item_id,
            owner_id: item.owner_id.clone(),
            quality_score: quality,
            time_spent_secs: attempt.time_spent_secs,
            reviewed_at: now,
        };
        self.bound(self.store.append_history(record)).await?;

        tracing::debug!(
            %item_id,
            total_score = quality,
            interval_days = scheduling.interval_days,
            priority = scheduling.priority.as_str(),
            "recorded review attempt"
        );

        Ok(AttemptOutcome {
            evaluation,
            item,
            next_review_at: scheduling.next_review_at,
            priority: scheduling.priority,
        })
    }

    /// Due count plus priority-bucketed item lists for push reminders.
    pub async fn due_digest(&self, owner_id: &str, now: DateTime<Utc>) -> Result<DueDigest> {
        let items = self.bound(self.store.get_by_owner(owner_id)).await?;

        let mut digest = DueDigest {
            due_count: 0,
            urgent: Vec::new(),
            recommended: Vec::new(),
            relaxed: Vec::new(),
        };
        for item in items {
            if item.next_review_at.is_some_and(|at| at <= now) {
                digest.due_count += 1;
            }
            match item.priority(now) {
                Some(Priority::Urgent) => digest.urgent.push(item),
                Some(Priority::Recommended) => digest.recommended.push(item),
                Some(Priority::Relaxed) => digest.relaxed.push(item),
                None => {}
            }
        }
        Ok(digest)
    }

    async fn bound<F, T>(&self, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.store_timeout {
            Some(limit) => tokio::time::timeout(limit, call)
                .await
                .map_err(|_| EngineError::StoreUnavailable(format!("store call exceeded {limit:?}")))?,
            None => call.await,
        }
    }
}
