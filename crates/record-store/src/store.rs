use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use futures_core::Stream;

use crate::Result;

/// A single stored key and its raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// The store key.
    pub key: String,

    /// The raw bytes stored under the key.
    pub value: Vec<u8>,
}

impl Record {
    /// Creates a record from a key and its value.
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A stream of records produced by a full scan.
pub type RecordStream = Pin<Box<dyn Stream<Item = Result<Record>> + Send>>;

/// Core trait for keyed byte-value stores.
///
/// Implementations must keep `exists` and `get` consistent: `exists` returns
/// true iff `get` would return `Some`. A write or delete is visible to every
/// call on the same key issued after it returns. All implementations must be
/// thread-safe (Send + Sync).
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Returns true if a value is stored under `key`.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Returns the value stored under `key`, or None if the key is absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any previous value.
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Removes `key`. Deleting an absent key is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Streams every stored record in ascending byte-wise key order.
    ///
    /// The stream is finite. Whether it observes writes made while it is being
    /// consumed depends on the backend; see the backend docs.
    async fn scan_all(&self) -> Result<RecordStream>;
}

/// Extension trait providing convenience methods for record stores.
#[async_trait]
pub trait RecordStoreExt: RecordStore {
    /// Scans the whole store into memory, stopping at the first error.
    async fn collect_all(&self) -> Result<Vec<Record>> {
        use futures_util::TryStreamExt;

        self.scan_all().await?.try_collect().await
    }
}

// Blanket implementation for all RecordStore implementations
impl<T: RecordStore + ?Sized> RecordStoreExt for T {}

#[async_trait]
impl<T: RecordStore + ?Sized> RecordStore for Arc<T> {
    async fn exists(&self, key: &str) -> Result<bool> {
        (**self).exists(key).await
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        (**self).put(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        (**self).delete(key).await
    }

    async fn scan_all(&self) -> Result<RecordStream> {
        (**self).scan_all().await
    }
}
