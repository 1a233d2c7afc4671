//! `SQLite` implementation of [`ProductRepository`].
//!
//! Rows keep the legacy flag columns (`inlist`, `infridge`, `alreadyused`,
//! `intrash`); encoding always writes exactly one flag from
//! [`ProductState`], and decoding rejects rows that violate the partition.

use chrono::Duration;
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row, SqlitePool};

use pantrybot_app::ports::ProductRepository;
use pantrybot_domain::error::{NotFoundError, PantryError};
use pantrybot_domain::product::{ListView, Product, ProductEntry, ProductState, StateFlags};
use pantrybot_domain::scope::Scope;
use pantrybot_domain::time::{self, Timestamp};

use crate::error::StorageError;

/// Wrapper for converting database rows into domain types without
/// polluting domain structs with database concerns.
struct Wrapper(Product);

impl Wrapper {
    fn maybe(value: Option<Self>) -> Option<Product> {
        value.map(|w| w.0)
    }
}

impl<'r> FromRow<'r, SqliteRow> for Wrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let user_id: i64 = row.try_get("telegram_user_id")?;
        let chat_id: i64 = row.try_get("telegram_chat_id")?;
        let name: String = row.try_get("name")?;
        let weight: f64 = row.try_get("weight")?;
        let flags = StateFlags {
            in_list: row.try_get("inlist")?,
            in_fridge: row.try_get("infridge")?,
            already_used: row.try_get("alreadyused")?,
            in_trash: row.try_get("intrash")?,
        };
        let timer_enabled: bool = row.try_get("timerenable")?;
        let created_at: String = row.try_get("created_at")?;
        let finished_at: String = row.try_get("finished_at")?;
        let rest_seconds: i64 = row.try_get("rest_time")?;

        let state =
            ProductState::from_flags(flags).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;

        Ok(Self(Product {
            id: Some(id),
            scope: Scope::new(user_id, chat_id),
            name,
            weight,
            state,
            timer_enabled,
            created_at: parse_timestamp(&created_at)?,
            finished_at: parse_timestamp(&finished_at)?,
            rest_time: Duration::seconds(rest_seconds),
        }))
    }
}

/// Wrapper for listing rows; the shopping view does not select
/// `rest_time`, so that column is allowed to be absent.
struct EntryWrapper(ProductEntry);

impl<'r> FromRow<'r, SqliteRow> for EntryWrapper {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        let id: i64 = row.try_get("id")?;
        let name: String = row.try_get("name")?;
        let weight: f64 = row.try_get("weight")?;
        let timer_enabled: bool = row.try_get("timerenable")?;
        let rest_time = match row.try_get::<i64, _>("rest_time") {
            Ok(seconds) => Some(Duration::seconds(seconds)),
            Err(sqlx::Error::ColumnNotFound(_)) => None,
            Err(err) => return Err(err),
        };

        Ok(Self(ProductEntry {
            id,
            name,
            weight,
            timer_enabled,
            rest_time,
        }))
    }
}

fn parse_timestamp(raw: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|ts| ts.to_utc())
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

const INSERT: &str = r"
    INSERT INTO products
        (telegram_user_id, telegram_chat_id, name, weight, inlist, infridge, alreadyused, intrash, timerenable, created_at, finished_at, rest_time)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
";

const SELECT_BY_NAME: &str = r"
    SELECT * FROM products
    WHERE telegram_user_id = ? AND telegram_chat_id = ? AND name = ?
";

const SELECT_ID_BY_NAME: &str =
    "SELECT id FROM products WHERE telegram_user_id = ? AND telegram_chat_id = ? AND name = ?";

const LIST_SHOPPING: &str = r"
    SELECT id, name, weight, timerenable FROM products
    WHERE telegram_user_id = ? AND telegram_chat_id = ? AND inlist = TRUE
    ORDER BY name ASC
";

const LIST_FRIDGE: &str = r"
    SELECT id, name, weight, timerenable, rest_time FROM products
    WHERE telegram_user_id = ? AND telegram_chat_id = ? AND infridge = TRUE
    ORDER BY rest_time ASC
";

const LIST_USED: &str = r"
    SELECT id, name, weight, timerenable, rest_time FROM products
    WHERE telegram_user_id = ? AND telegram_chat_id = ? AND alreadyused = TRUE
    ORDER BY rest_time ASC
";

const SET_STATE_WITH_WINDOW: &str = r"
    UPDATE products
    SET inlist = ?, infridge = ?, alreadyused = ?, intrash = ?, timerenable = ?, created_at = ?, finished_at = ?
    WHERE telegram_user_id = ? AND telegram_chat_id = ? AND name = ?
";

const SET_STATE: &str = r"
    UPDATE products
    SET inlist = ?, infridge = ?, alreadyused = ?, intrash = ?, timerenable = ?
    WHERE telegram_user_id = ? AND telegram_chat_id = ? AND name = ?
";

const SELECT_TIMERS: &str =
    "SELECT id, finished_at FROM products WHERE telegram_user_id = ? AND telegram_chat_id = ?";

const UPDATE_REST_TIME: &str =
    "UPDATE products SET rest_time = ? WHERE telegram_user_id = ? AND telegram_chat_id = ? AND id = ?";

/// `SQLite`-backed product repository.
pub struct SqliteProductRepository {
    pool: SqlitePool,
}

impl SqliteProductRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Existence probe, countdown refresh, and state overwrite shared by
    /// the three transition methods. The probe runs first so a missing
    /// product leaves the scope untouched.
    async fn transition(
        &self,
        scope: Scope,
        name: &str,
        state: ProductState,
        timer_enabled: bool,
        window: Option<(Timestamp, Timestamp)>,
    ) -> Result<(), PantryError> {
        let exists: Option<(i64,)> = sqlx::query_as(SELECT_ID_BY_NAME)
            .bind(scope.user_id)
            .bind(scope.chat_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        if exists.is_none() {
            return Err(NotFoundError {
                entity: "product",
                key: name.to_string(),
            }
            .into());
        }

        self.refresh(scope).await?;

        let flags = state.to_flags();
        let query = match window {
            Some((from, until)) => sqlx::query(SET_STATE_WITH_WINDOW)
                .bind(flags.in_list)
                .bind(flags.in_fridge)
                .bind(flags.already_used)
                .bind(flags.in_trash)
                .bind(timer_enabled)
                .bind(from.to_rfc3339())
                .bind(until.to_rfc3339()),
            None => sqlx::query(SET_STATE)
                .bind(flags.in_list)
                .bind(flags.in_fridge)
                .bind(flags.already_used)
                .bind(flags.in_trash)
                .bind(timer_enabled),
        };

        query
            .bind(scope.user_id)
            .bind(scope.chat_id)
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }

    /// Recompute `rest_time` for every product in the scope: one batched
    /// read, then one write per row. Scopes hold few products, so the
    /// per-row writes stay cheap.
    async fn refresh(&self, scope: Scope) -> Result<(), PantryError> {
        let rows: Vec<(i64, String)> = sqlx::query_as(SELECT_TIMERS)
            .bind(scope.user_id)
            .bind(scope.chat_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let at = time::now();
        for (id, finished_at) in rows {
            let finished_at = parse_timestamp(&finished_at).map_err(StorageError::from)?;
            let remaining = time::rest_time(finished_at, at);

            sqlx::query(UPDATE_REST_TIME)
                .bind(remaining.num_seconds())
                .bind(scope.user_id)
                .bind(scope.chat_id)
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(StorageError::from)?;
        }

        Ok(())
    }
}

impl ProductRepository for SqliteProductRepository {
    async fn add(&self, product: Product) -> Result<Product, PantryError> {
        let flags = product.state.to_flags();
        let result = sqlx::query(INSERT)
            .bind(product.scope.user_id)
            .bind(product.scope.chat_id)
            .bind(&product.name)
            .bind(product.weight)
            .bind(flags.in_list)
            .bind(flags.in_fridge)
            .bind(flags.already_used)
            .bind(flags.in_trash)
            .bind(product.timer_enabled)
            .bind(product.created_at.to_rfc3339())
            .bind(product.finished_at.to_rfc3339())
            .bind(product.rest_time.num_seconds())
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        let id = result.last_insert_rowid();
        self.refresh(product.scope).await?;

        Ok(Product {
            id: Some(id),
            ..product
        })
    }

    async fn list(&self, scope: Scope, view: ListView) -> Result<Vec<ProductEntry>, PantryError> {
        self.refresh(scope).await?;

        let query = match view {
            ListView::Shopping => LIST_SHOPPING,
            ListView::Fridge => LIST_FRIDGE,
            ListView::Used => LIST_USED,
        };
        let rows: Vec<EntryWrapper> = sqlx::query_as(query)
            .bind(scope.user_id)
            .bind(scope.chat_id)
            .fetch_all(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(rows.into_iter().map(|w| w.0).collect())
    }

    async fn find_by_name(&self, scope: Scope, name: &str) -> Result<Option<Product>, PantryError> {
        let row: Option<Wrapper> = sqlx::query_as(SELECT_BY_NAME)
            .bind(scope.user_id)
            .bind(scope.chat_id)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(Wrapper::maybe(row))
    }

    async fn move_to_fridge(
        &self,
        scope: Scope,
        name: &str,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<(), PantryError> {
        self.transition(scope, name, ProductState::InFridge, true, Some((from, until)))
            .await
    }

    async fn move_to_trash(&self, scope: Scope, name: &str) -> Result<(), PantryError> {
        self.transition(scope, name, ProductState::Trashed, false, None)
            .await
    }

    async fn mark_used(
        &self,
        scope: Scope,
        name: &str,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<(), PantryError> {
        self.transition(scope, name, ProductState::Used, true, Some((from, until)))
            .await
    }

    async fn refresh_rest_times(&self, scope: Scope) -> Result<(), PantryError> {
        self.refresh(scope).await
    }
}
