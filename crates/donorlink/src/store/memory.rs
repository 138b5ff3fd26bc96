//! Process-local record store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use tracing::debug;

use super::{Collection, RecordStore, StoredRecord};
use crate::error::{Error, Result};
use crate::record::RecordId;

/// A record store held entirely in memory.
///
/// Can be switched into an unavailable state, in which every operation
/// fails the way an unreachable remote store would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<Collection, Vec<StoredRecord>>>,
    next_id: AtomicU64,
    unavailable: AtomicBool,
}

impl MemoryStore {
    /// Create an empty, reachable store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the store becoming unreachable (or reachable again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of records currently held in a collection.
    #[must_use]
    pub fn len(&self, collection: Collection) -> usize {
        self.collections
            .lock()
            .map(|c| c.get(&collection).map_or(0, Vec::len))
            .unwrap_or_default()
    }

    /// Check whether both collections are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Collection::ALL.iter().all(|c| self.len(*c) == 0)
    }

    fn guard(
        &self,
        operation: &'static str,
    ) -> Result<MutexGuard<'_, HashMap<Collection, Vec<StoredRecord>>>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(Error::store_unavailable(operation, "store is offline"));
        }
        self.collections
            .lock()
            .map_err(|_| Error::store_unavailable(operation, "store lock poisoned"))
    }
}

#[async_trait::async_trait]
impl RecordStore for MemoryStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn fetch_collection(&self, collection: Collection) -> Result<Vec<StoredRecord>> {
        let collections = self.guard("fetch")?;
        Ok(collections.get(&collection).cloned().unwrap_or_default())
    }

    async fn append_record(
        &self,
        collection: Collection,
        body: &serde_json::Value,
    ) -> Result<RecordId> {
        let mut collections = self.guard("append")?;
        let n = self.next_id.fetch_add(1, Ordering::Relaxed);
        let id = RecordId::new(format!("mem-{n}"));

        collections.entry(collection).or_default().push(StoredRecord {
            id: id.clone(),
            body: body.clone(),
        });
        debug!(%collection, %id, "Appended record");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_append_and_fetch() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let id = store
            .append_record(Collection::LivingDonors, &json!({"name": "x"}))
            .await
            .unwrap();

        let records = store.fetch_collection(Collection::LivingDonors).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        assert_eq!(store.len(Collection::LivingDonors), 1);
        assert_eq!(store.len(Collection::DeceasedDonors), 0);
    }

    #[tokio::test]
    async fn test_ids_unique() {
        let store = MemoryStore::new();
        let a = store
            .append_record(Collection::LivingDonors, &json!({}))
            .await
            .unwrap();
        let b = store
            .append_record(Collection::DeceasedDonors, &json!({}))
            .await
            .unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_unavailable_fails_every_operation() {
        let store = MemoryStore::new();
        store.set_unavailable(true);

        let err = store
            .fetch_collection(Collection::LivingDonors)
            .await
            .unwrap_err();
        assert!(err.is_store_unavailable());

        let err = store
            .append_record(Collection::LivingDonors, &json!({}))
            .await
            .unwrap_err();
        assert!(err.is_store_unavailable());
        assert!(store.is_empty());

        store.set_unavailable(false);
        assert!(store
            .fetch_collection(Collection::LivingDonors)
            .await
            .is_ok());
    }
}
