//! In-memory review item store.
//!
//! Items live behind per-item locks inside a shared map, so reads and
//! writes to different items proceed without contention while writes to
//! the same item are serialized. Suitable as the quick-start persistence
//! shim and for tests; a database-backed store satisfies the same trait.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{EngineError, Result};
use crate::models::{NewReviewItem, OwnerStats, ReviewHistory, ReviewItem};
use crate::store::ReviewItemStore;
use review_core::Priority;

type ItemSlot = Arc<RwLock<ReviewItem>>;

/// Concurrent in-memory store with per-item locking.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<Uuid, ItemSlot>>,
    history: RwLock<HashMap<Uuid, Vec<ReviewHistory>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn slot(&self, id: Uuid) -> Result<ItemSlot> {
        self.items
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(format!("review item {id}")))
    }

    /// Snapshot every live item of one owner.
    async fn owner_snapshot(&self, owner_id: &str) -> Vec<ReviewItem> {
        let slots: Vec<ItemSlot> = self.items.read().await.values().cloned().collect();
        let mut items = Vec::new();
        for slot in slots {
            let item = slot.read().await;
            if item.owner_id == owner_id && !item.is_archived() {
                items.push(item.clone());
            }
        }
        items
    }
}

impl ReviewItemStore for MemoryStore {
    async fn create(&self, item: NewReviewItem, now: DateTime<Utc>) -> Result<ReviewItem> {
        item.validate()?;
        let item = item.into_item(now);
        self.items
            .write()
            .await
            .insert(item.id, Arc::new(RwLock::new(item.clone())));
        Ok(item)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<ReviewItem> {
        let slot = self.slot(id).await?;
        let item = slot.read().await;
        if item.is_archived() {
            return Err(EngineError::NotFound(format!("review item {id}")));
        }
        Ok(item.clone())
    }

    async fn get_by_owner(&self, owner_id: &str) -> Result<Vec<ReviewItem>> {
        let mut items = self.owner_snapshot(owner_id).await;
        items.sort_by_key(|item| item.created_at);
        Ok(items)
    }

    async fn get_due(&self, owner_id: &str, as_of: DateTime<Utc>) -> Result<Vec<ReviewItem>> {
        let mut due: Vec<ReviewItem> = self
            .owner_snapshot(owner_id)
            .await
            .into_iter()
            .filter(|item| item.next_review_at.is_some_and(|at| at <= as_of))
            .collect();
        due.sort_by_key(|item| item.next_review_at);
        Ok(due)
    }

    async fn update(&self, item: ReviewItem) -> Result<ReviewItem> {
        let slot = self.slot(item.id).await?;
        let mut stored = slot.write().await;
        if stored.is_archived() {
            return Err(EngineError::NotFound(format!("review item {}", item.id)));
        }
        *stored = item.clone();
        Ok(item)
    }

    async fn update_with<F, T>(&self, id: Uuid, mutate: F) -> Result<(ReviewItem, T)>
    where
        F: FnOnce(&mut ReviewItem) -> T + Send,
        T: Send,
    {
        let slot = self.slot(id).await?;
        let mut item = slot.write().await;
        if item.is_archived() {
            return Err(EngineError::NotFound(format!("review item {id}")));
        }
        let value = mutate(&mut item);
        Ok((item.clone(), value))
    }

    async fn append_history(&self, record: ReviewHistory) -> Result<()> {
        self.history
            .write()
            .await
            .entry(record.item_id)
            .or_default()
            .push(record);
        Ok(())
    }

    async fn history_for(&self, item_id: Uuid) -> Result<Vec<ReviewHistory>> {
        Ok(self
            .history
            .read()
            .await
            .get(&item_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn stats(&self, owner_id: &str, as_of: DateTime<Utc>) -> Result<OwnerStats> {
        let mut stats = OwnerStats::default();
        for item in self.owner_snapshot(owner_id).await {
            stats.total += 1;
            match item.priority(as_of) {
                Some(Priority::Urgent) => stats.urgent += 1,
                Some(Priority::Recommended) => stats.recommended += 1,
                Some(Priority::Relaxed) => stats.relaxed += 1,
                None => {}
            }
        }
        Ok(stats)
    }

    async fn archive(&self, id: Uuid, now: DateTime<Utc>) -> Result<()> {
        let slot = self.slot(id).await?;
        let mut item = slot.write().await;
        if item.deleted_at.is_none() {
            item.deleted_at = Some(now);
            item.updated_at = now;
        }
        Ok(())
    }

    async fn purge_archived(&self) -> Result<usize> {
        let mut items = self.items.write().await;
        let history = self.history.read().await;

        let mut removable = Vec::new();
        for (id, slot) in items.iter() {
            let has_history = history.get(id).is_some_and(|h| !h.is_empty());
            if !has_history && slot.read().await.is_archived() {
                removable.push(*id);
            }
        }
        for id in &removable {
            items.remove(id);
        }
        Ok(removable.len())
    }
}
