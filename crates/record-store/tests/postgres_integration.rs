//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container and need a running Docker
//! daemon, so they are ignored by default. Run with:
//!
//! ```bash
//! cargo test -p record-store --test postgres_integration -- --ignored --test-threads=1
//! ```

use std::sync::Arc;

use futures_util::StreamExt;
use record_store::{PostgresRecordStore, RecordStore, RecordStoreExt};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            let store = PostgresRecordStore::connect(&connection_string, 1)
                .await
                .unwrap();
            store.run_migrations().await.unwrap();
            store.pool().close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and an empty table
async fn get_test_store() -> PostgresRecordStore {
    let info = get_container_info().await;

    let store = PostgresRecordStore::connect(&info.connection_string, 5)
        .await
        .unwrap();

    sqlx::query("TRUNCATE TABLE records")
        .execute(store.pool())
        .await
        .unwrap();

    store
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn put_and_get_record() {
    let store = get_test_store().await;

    store.put("order-1", b"{\"a\":1}".to_vec()).await.unwrap();

    let value = store.get("order-1").await.unwrap();
    assert_eq!(value, Some(b"{\"a\":1}".to_vec()));
    assert!(store.exists("order-1").await.unwrap());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn missing_key_is_absent() {
    let store = get_test_store().await;

    assert!(!store.exists("missing").await.unwrap());
    assert!(store.get("missing").await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn put_overwrites_existing_value() {
    let store = get_test_store().await;

    store.put("order-1", b"v1".to_vec()).await.unwrap();
    store.put("order-1", b"v2".to_vec()).await.unwrap();

    assert_eq!(store.get("order-1").await.unwrap(), Some(b"v2".to_vec()));
    assert_eq!(store.collect_all().await.unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn delete_removes_record() {
    let store = get_test_store().await;

    store.put("order-1", b"v1".to_vec()).await.unwrap();
    store.delete("order-1").await.unwrap();

    assert!(!store.exists("order-1").await.unwrap());
    // Deleting again is not an error
    store.delete("order-1").await.unwrap();
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn scan_all_is_bytewise_ordered() {
    let store = get_test_store().await;

    for key in ["b", "a", "B", "order-10", "order-2"] {
        store.put(key, key.as_bytes().to_vec()).await.unwrap();
    }

    let keys: Vec<_> = store
        .collect_all()
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.key)
        .collect();

    assert_eq!(keys, vec!["B", "a", "b", "order-10", "order-2"]);
}

#[tokio::test]
#[ignore = "requires Docker"]
async fn scan_all_spans_multiple_pages() {
    let store = get_test_store().await;

    for i in 0..600 {
        let key = format!("order-{i:04}");
        store.put(&key, key.as_bytes().to_vec()).await.unwrap();
    }

    let mut stream = store.scan_all().await.unwrap();
    let mut count = 0;
    let mut last: Option<String> = None;
    while let Some(record) = stream.next().await {
        let record = record.unwrap();
        if let Some(prev) = &last {
            assert!(prev < &record.key);
        }
        last = Some(record.key);
        count += 1;
    }

    assert_eq!(count, 600);
}
