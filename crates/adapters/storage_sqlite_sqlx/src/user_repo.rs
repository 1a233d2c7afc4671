//! `SQLite` implementation of [`UserRepository`].

use sqlx::SqlitePool;

use pantrybot_app::ports::UserRepository;
use pantrybot_domain::error::PantryError;
use pantrybot_domain::scope::Scope;
use pantrybot_domain::user::User;

use crate::error::StorageError;

const INSERT: &str = r"
    INSERT INTO users (telegram_user_nickname, telegram_user_name, telegram_user_id, telegram_chat_id, user_status)
    VALUES (?, ?, ?, ?, ?)
";

const SELECT_STATUS: &str =
    "SELECT user_status FROM users WHERE telegram_user_id = ? AND telegram_chat_id = ?";

const UPDATE_STATUS: &str =
    "UPDATE users SET user_status = ? WHERE telegram_user_id = ? AND telegram_chat_id = ?";

/// `SQLite`-backed user repository.
pub struct SqliteUserRepository {
    pool: SqlitePool,
}

impl SqliteUserRepository {
    /// Create a new repository using the given connection pool.
    #[must_use]
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl UserRepository for SqliteUserRepository {
    async fn create(&self, user: User) -> Result<User, PantryError> {
        let result = sqlx::query(INSERT)
            .bind(&user.nickname)
            .bind(&user.name)
            .bind(user.scope.user_id)
            .bind(user.scope.chat_id)
            .bind(user.status)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(user),
            Err(err) if is_unique_violation(&err) => Err(PantryError::AlreadyRegistered),
            Err(err) => Err(StorageError::from(err).into()),
        }
    }

    async fn status(&self, scope: Scope) -> Result<Option<i64>, PantryError> {
        let row: Option<(i64,)> = sqlx::query_as(SELECT_STATUS)
            .bind(scope.user_id)
            .bind(scope.chat_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(row.map(|(status,)| status))
    }

    async fn set_status(&self, scope: Scope, status: i64) -> Result<(), PantryError> {
        sqlx::query(UPDATE_STATUS)
            .bind(status)
            .bind(scope.user_id)
            .bind(scope.chat_id)
            .execute(&self.pool)
            .await
            .map_err(StorageError::from)?;

        Ok(())
    }
}

/// Structural unique-constraint classification; never matches on the
/// driver's message text.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
