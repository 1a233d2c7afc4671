//! Storage-specific error type wrapping sqlx errors.

use pantrybot_domain::error::PantryError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Could not open the connection pool.
    #[error("failed to open database connection")]
    Connection(#[source] sqlx::Error),

    /// A query failed or a row refused to decode.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for PantryError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
