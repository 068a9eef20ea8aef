use thiserror::Error;

/// Errors raised by a record store backend.
///
/// Every variant means the store could not complete the call. Callers do not
/// retry; retry policy belongs to whoever invoked the operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// The backend is unreachable or refused the call.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The store configuration is invalid.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
