use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};

use crate::{
    Result,
    store::{Record, RecordStore, RecordStream},
};

/// Number of rows fetched per round trip by `scan_all`.
const SCAN_BATCH_SIZE: i64 = 256;

/// PostgreSQL-backed record store.
///
/// Records live in a single `records(key, value)` table whose key column uses
/// the "C" collation, so `ORDER BY key` is a byte-wise ascending scan.
///
/// `scan_all` pages through the table by key. Each page is its own READ
/// COMMITTED statement, so a long scan is not a point-in-time snapshot: every
/// key is yielded at most once and in order, but writes committed while the
/// scan runs may or may not be observed.
#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Creates a new PostgreSQL record store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool to `database_url`.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_record(row: PgRow) -> Result<Record> {
        Ok(Record {
            key: row.try_get("key")?,
            value: row.try_get("value")?,
        })
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn exists(&self, key: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM records WHERE key = $1)")
                .bind(key)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let value: Option<Vec<u8>> = sqlx::query_scalar("SELECT value FROM records WHERE key = $1")
            .bind(key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(value)
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO records (key, value)
            VALUES ($1, $2)
            ON CONFLICT (key) DO UPDATE SET value = EXCLUDED.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        sqlx::query("DELETE FROM records WHERE key = $1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn scan_all(&self) -> Result<RecordStream> {
        let state = ScanState {
            pool: self.pool.clone(),
            after: None,
            buffered: Vec::new().into_iter(),
            exhausted: false,
        };

        Ok(Box::pin(futures_util::stream::try_unfold(
            state,
            ScanState::next_record,
        )))
    }
}

/// Cursor state for a keyset-paginated scan.
struct ScanState {
    pool: PgPool,
    after: Option<String>,
    buffered: std::vec::IntoIter<Record>,
    exhausted: bool,
}

impl ScanState {
    async fn next_record(mut self) -> Result<Option<(Record, ScanState)>> {
        loop {
            if let Some(record) = self.buffered.next() {
                self.after = Some(record.key.clone());
                return Ok(Some((record, self)));
            }

            if self.exhausted {
                return Ok(None);
            }

            let rows = sqlx::query(
                r#"
                SELECT key, value
                FROM records
                WHERE $1::TEXT IS NULL OR key > $1
                ORDER BY key ASC
                LIMIT $2
                "#,
            )
            .bind(self.after.as_deref())
            .bind(SCAN_BATCH_SIZE)
            .fetch_all(&self.pool)
            .await?;

            self.exhausted = (rows.len() as i64) < SCAN_BATCH_SIZE;
            self.buffered = rows
                .into_iter()
                .map(PostgresRecordStore::row_to_record)
                .collect::<Result<Vec<_>>>()?
                .into_iter();
        }
    }
}
