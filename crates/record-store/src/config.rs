//! Record store configuration loaded from environment variables.

use std::str::FromStr;
use std::sync::Arc;

use crate::{InMemoryRecordStore, PostgresRecordStore, RecordStore, Result, StoreError};

/// Which backend a [`StoreConfig`] opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    /// Process-local map, lost on restart.
    #[default]
    Memory,

    /// PostgreSQL `records` table.
    Postgres,
}

impl StoreBackend {
    /// Returns the backend name as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Postgres => "postgres",
        }
    }
}

impl std::fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for StoreBackend {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            other => Err(StoreError::Configuration(format!(
                "unknown record store backend: {other}"
            ))),
        }
    }
}

/// Record store configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `RECORD_STORE_BACKEND`: `memory` or `postgres` (default: `memory`)
/// - `DATABASE_URL`: connection string, required for `postgres`
/// - `DATABASE_MAX_CONNECTIONS`: pool size (default: `5`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl StoreConfig {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let backend = match lookup("RECORD_STORE_BACKEND") {
            Some(value) => value.parse()?,
            None => StoreBackend::default(),
        };

        Ok(Self {
            backend,
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            max_connections: lookup("DATABASE_MAX_CONNECTIONS")
                .and_then(|n| n.parse().ok())
                .unwrap_or(5),
        })
    }

    /// Opens the configured backend.
    ///
    /// For `postgres` this connects a pool and runs the migrations.
    pub async fn open(&self) -> Result<Arc<dyn RecordStore>> {
        tracing::info!(backend = %self.backend, "opening record store");

        match self.backend {
            StoreBackend::Memory => Ok(Arc::new(InMemoryRecordStore::new())),
            StoreBackend::Postgres => {
                let url = self.database_url.as_deref().ok_or_else(|| {
                    StoreError::Configuration(
                        "DATABASE_URL is required for the postgres backend".to_string(),
                    )
                })?;

                let store = PostgresRecordStore::connect(url, self.max_connections).await?;
                store.run_migrations().await?;
                Ok(Arc::new(store))
            }
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Memory,
            database_url: None,
            max_connections: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_default_values() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, StoreBackend::Memory);
        assert_eq!(config.database_url, None);
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let config = StoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_postgres_backend() {
        let config = StoreConfig::from_lookup(lookup_from(&[
            ("RECORD_STORE_BACKEND", "Postgres"),
            ("DATABASE_URL", "postgres://localhost/orders"),
            ("DATABASE_MAX_CONNECTIONS", "12"),
        ]))
        .unwrap();

        assert_eq!(config.backend, StoreBackend::Postgres);
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/orders")
        );
        assert_eq!(config.max_connections, 12);
    }

    #[test]
    fn test_unparseable_pool_size_falls_back() {
        let config =
            StoreConfig::from_lookup(lookup_from(&[("DATABASE_MAX_CONNECTIONS", "many")])).unwrap();
        assert_eq!(config.max_connections, 5);
    }

    #[test]
    fn test_unknown_backend_is_rejected() {
        let result = StoreConfig::from_lookup(lookup_from(&[("RECORD_STORE_BACKEND", "redis")]));
        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }

    #[tokio::test]
    async fn test_open_memory_backend() {
        let store = StoreConfig::default().open().await.unwrap();
        store.put("order-1", b"1".to_vec()).await.unwrap();
        assert!(store.exists("order-1").await.unwrap());
    }

    #[tokio::test]
    async fn test_open_postgres_requires_url() {
        let config = StoreConfig {
            backend: StoreBackend::Postgres,
            ..StoreConfig::default()
        };

        let result = config.open().await;
        assert!(matches!(result, Err(StoreError::Configuration(_))));
    }
}
