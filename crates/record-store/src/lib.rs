//! Record store adapter for the food supply order tracker.
//!
//! A [`RecordStore`] is a narrow view over an external keyed, byte-value
//! store: existence check, point read, point write, point delete and a full
//! scan in ascending key order. Two backends are provided:
//! - [`InMemoryRecordStore`] for tests and embedding
//! - [`PostgresRecordStore`] backed by a single `records` table

pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use config::{StoreBackend, StoreConfig};
pub use error::{Result, StoreError};
pub use memory::InMemoryRecordStore;
pub use postgres::PostgresRecordStore;
pub use store::{Record, RecordStore, RecordStoreExt, RecordStream};
