// src/crawl/table.rs
// =============================================================================
// The dedup table: one slot per URL seen during a crawl session.
//
// A slot is claimed under the table lock the first time any branch looks a
// URL up. The fetch itself runs later, outside the lock, through the slot's
// OnceCell: the first branch to reach it runs the fetch and every other
// branch that claimed the same slot waits for that result instead of
// fetching again. Slots are never removed or overwritten.
// =============================================================================

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, OnceCell};

use crate::fetch::FetchResult;

/// Shared, write-once cell holding the fetch result for one URL.
pub type Slot = Arc<OnceCell<FetchResult>>;

/// Counters describing how a session used its table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TableStats {
    /// Distinct URLs claimed
    pub urls: usize,
    /// Fetches actually issued
    pub fetches: usize,
    /// Lookups that found an existing slot
    pub hits: usize,
}

#[derive(Debug, Default)]
pub struct DedupTable {
    slots: Mutex<HashMap<String, Slot>>,
    fetches: AtomicUsize,
    hits: AtomicUsize,
}

impl DedupTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot for `url`, inserting an empty one if this is the
    /// first time the URL has been seen.
    pub async fn claim(&self, url: &str) -> Slot {
        let mut slots = self.slots.lock().await;

        if let Some(slot) = slots.get(url) {
            log::debug!("reusing slot for {}", url);
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(slot);
        }

        let slot = Slot::default();
        slots.insert(url.to_string(), Arc::clone(&slot));
        slot
    }

    /// Resolves a slot, running `fetch` only if nobody has filled it yet.
    ///
    /// Concurrent callers on the same slot wait for the one fetch in flight.
    pub async fn resolve<'a, F, Fut>(&self, slot: &'a Slot, fetch: F) -> &'a FetchResult
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = FetchResult>,
    {
        slot.get_or_init(|| {
            self.fetches.fetch_add(1, Ordering::Relaxed);
            fetch()
        })
        .await
    }

    /// The stored result for `url`, if it has been fetched.
    pub async fn get(&self, url: &str) -> Option<FetchResult> {
        let slots = self.slots.lock().await;
        slots.get(url).and_then(|slot| slot.get().cloned())
    }

    pub async fn len(&self) -> usize {
        self.slots.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub async fn stats(&self) -> TableStats {
        TableStats {
            urls: self.len().await,
            fetches: self.fetches.load(Ordering::Relaxed),
            hits: self.hits.load(Ordering::Relaxed),
        }
    }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a OnceCell per URL instead of storing the page directly?
//    - The slot exists before the fetch finishes, so a second branch can find
//      it and wait rather than start its own fetch
//    - get_or_init runs the closure at most once per successful fill; if the
//      fetch panics the cell stays empty and the next caller tries again
//
// 2. Why tokio::sync::Mutex?
//    - Branches await the lock instead of blocking a worker thread
//    - The lock only guards the HashMap; it's never held during a fetch
//
// 3. Why atomics for the counters?
//    - They're bumped from many tasks at once and only read for reporting,
//      so Relaxed ordering is enough
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;
    use crate::fetch::Page;

    #[tokio::test]
    async fn test_claim_returns_same_slot() {
        let table = DedupTable::new();
        let first = table.claim("a").await;
        let second = table.claim("a").await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(table.len().await, 1);
        assert_eq!(table.stats().await.hits, 1);
    }

    #[tokio::test]
    async fn test_first_result_wins() {
        let table = DedupTable::new();
        let slot = table.claim("a").await;

        let first = table
            .resolve(&slot, || async { Ok(Page::new("first", vec![])) })
            .await;
        assert_eq!(first.as_ref().unwrap().body, "first");

        let again = table.claim("a").await;
        let second = table
            .resolve(&again, || async { Err(FetchError::not_found("a")) })
            .await;
        assert_eq!(second.as_ref().unwrap().body, "first");

        let stats = table.stats().await;
        assert_eq!(stats.fetches, 1);
        assert_eq!(stats.urls, 1);
    }

    #[tokio::test]
    async fn test_failures_are_stored() {
        let table = DedupTable::new();
        let slot = table.claim("gone").await;
        table
            .resolve(&slot, || async { Err(FetchError::not_found("gone")) })
            .await;

        assert_eq!(
            table.get("gone").await,
            Some(Err(FetchError::not_found("gone")))
        );
        assert_eq!(table.get("never-seen").await, None);
    }

    #[tokio::test]
    async fn test_claimed_but_unresolved_has_no_result() {
        let table = DedupTable::new();
        let _slot = table.claim("pending").await;
        assert!(!table.is_empty().await);
        assert_eq!(table.get("pending").await, None);
    }
}
