//! Periodic store maintenance.
//!
//! The sweep only reclaims tombstoned items that no history references;
//! correctness never depends on it running.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::store::ReviewItemStore;

/// Run the purge sweep until the shutdown channel flips to `true` or is
/// dropped. Callers spawn this on their runtime.
pub async fn purge_sweep<S>(store: Arc<S>, period: Duration, mut shutdown: watch::Receiver<bool>)
where
    S: ReviewItemStore,
{
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = ticker.tick() => match store.purge_archived().await {
                Ok(0) => {}
                Ok(removed) => tracing::debug!(removed, "purged archived review items"),
                Err(err) => tracing::warn!(error = %err, "purge sweep failed"),
            },
            changed = shutdown.changed() => {
                if changed.is_err() || *shutdown.borrow() {
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemKind, NewReviewItem};
    use crate::store::memory::MemoryStore;
    use chrono::Utc;

    fn new_item(text: &str) -> NewReviewItem {
        NewReviewItem {
            owner_id: "learner-1".to_string(),
            document_id: "doc-1".to_string(),
            page: 1,
            kind: ItemKind::Word,
            text: text.to_string(),
            translation: "t".to_string(),
            language: "fr".to_string(),
        }
    }

    #[tokio::test]
    async fn sweep_purges_archived_items_and_stops_on_shutdown() {
        let store = Arc::new(MemoryStore::new());
        let now = Utc::now();
        let item = store.create(new_item("orphan"), now).await.unwrap();
        store.archive(item.id, now).await.unwrap();

        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(purge_sweep(
            Arc::clone(&store),
            Duration::from_millis(5),
            rx,
        ));

        tokio::time::sleep(Duration::from_millis(50)).await;
        tx.send(true).unwrap();
        handle.await.unwrap();

        assert!(store.get_by_owner("learner-1").await.unwrap().is_empty());
        assert_eq!(store.purge_archived().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn sweep_exits_when_sender_is_dropped() {
        let store = Arc::new(MemoryStore::new());
        let (tx, rx) = watch::channel(false);
        let handle = tokio::spawn(purge_sweep(store, Duration::from_secs(3600), rx));

        drop(tx);
        handle.await.unwrap();
    }
}
