//! Review item store contract.

pub mod memory;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{NewReviewItem, OwnerStats, ReviewHistory, ReviewItem};

/// Concurrent key-value contract over review items and their history.
///
/// Implementations must serialize writes to a single item (the
/// read-modify-write in [`update_with`](Self::update_with) is atomic per
/// item) while letting reads and writes to different items proceed
/// concurrently. History is append-only. A failed update leaves the item
/// in its pre-call state.
#[allow(async_fn_in_trait)]
pub trait ReviewItemStore: Send + Sync {
    /// Create a new item. Fails with `InvalidInput` on empty owner or text.
    async fn create(&self, item: NewReviewItem, now: DateTime<Utc>) -> Result<ReviewItem>;

    /// Fetch one item. Fails with `NotFound` on an unknown or archived id.
    async fn get_by_id(&self, id: Uuid) -> Result<ReviewItem>;

    /// All live items of one owner.
    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<ReviewItem>>;

    /// Items due at or before `as_of`, earliest first. The boundary is
    /// inclusive: an item due exactly at `as_of` is returned.
    async fn get_due(&self, owner_id: &str, as_of: DateTime<Utc>) -> Result<Vec<ReviewItem>>;

    /// Replace a stored item. Fails with `NotFound` on an unknown id.
    async fn update(&self, item: ReviewItem) -> Result<ReviewItem>;

    /// Atomically mutate one item under its write lock and return the
    /// updated item along with the closure's value.
    async fn update_with<F, T>(&self, id: Uuid, mutate: F) -> Result<(ReviewItem, T)>
    where
        F: FnOnce(&mut ReviewItem) -> T + Send,
        T: Send;

    /// Append one history record. Concurrent appends may land in any
    /// order between different items.
    async fn append_history(&self, record: ReviewHistory) -> Result<()>;

    /// History records of one item, oldest first.
    async fn history_for(&self, item_id: Uuid) -> Result<Vec<ReviewHistory>>;

    /// Per-owner totals and urgency buckets as of `as_of`.
    async fn stats(&self, owner_id: &str, as_of: DateTime<Utc>) -> Result<OwnerStats>;

    /// Tombstone an item. It disappears from queries but keeps its history.
    async fn archive(&self, id: Uuid, now: DateTime<Utc>) -> Result<()>;

    /// Physically remove archived items that no history references.
    /// Returns the number of items removed.
    async fn purge_archived(&self) -> Result<usize>;
}
