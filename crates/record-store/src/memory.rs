use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    Result,
    store::{Record, RecordStore, RecordStream},
};

/// In-memory record store.
///
/// Records live in a `BTreeMap`, so scans come out in ascending key order.
/// Clones share the same underlying map, which makes the store usable as an
/// injected fake in tests. `scan_all` copies the map under the read lock and
/// therefore always sees a consistent snapshot.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl InMemoryRecordStore {
    /// Creates a new empty in-memory record store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored records.
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    /// Removes every record.
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.records.read().await.contains_key(key))
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.records.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn scan_all(&self) -> Result<RecordStream> {
        use futures_util::stream;

        let snapshot: Vec<Record> = self
            .records
            .read()
            .await
            .iter()
            .map(|(key, value)| Record::new(key.clone(), value.clone()))
            .collect();

        let stream = stream::iter(snapshot.into_iter().map(Ok));
        Ok(Box::pin(stream))
    }
}
