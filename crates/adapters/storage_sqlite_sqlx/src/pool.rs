//! `SQLite` connection pool setup and migration runner.

use std::str::FromStr;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use tracing::info;

use crate::error::StorageError;

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:pantrybot.db` or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `PANTRYBOT_DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            database_url: std::env::var("PANTRYBOT_DATABASE_URL")?,
        })
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool, creates the database file if missing,
    /// and runs all pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection or migrations fail. The
    /// hosting process decides whether that is fatal.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url).await
    }
}

/// Holds the `SQLite` connection pool and provides access to it.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations.
    async fn initialize(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(StorageError::Connection)?
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(options)
            .await
            .map_err(StorageError::Connection)?;

        let before = Self::applied_version(&pool).await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        let after = Self::applied_version(&pool).await?;

        if before == after {
            info!(
                version = after.unwrap_or(0),
                "database schema already up to date"
            );
        } else {
            info!(version = after.unwrap_or(0), "database migrations applied");
        }

        Ok(Self { pool })
    }

    /// Highest migration version recorded so far, or `None` on a fresh
    /// database where the bookkeeping table does not exist yet.
    async fn applied_version(pool: &SqlitePool) -> Result<Option<i64>, StorageError> {
        let bookkeeping: Option<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = '_sqlx_migrations'",
        )
        .fetch_optional(pool)
        .await?;

        if bookkeeping.is_none() {
            return Ok(None);
        }

        let row: (Option<i64>,) = sqlx::query_as("SELECT MAX(version) FROM _sqlx_migrations")
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
