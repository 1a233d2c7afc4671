//! Registration service — user sign-up and status handling.
//!
//! The bot front end renders plain reply strings; this service owns the
//! mapping from storage outcomes to those strings so the transport layer
//! never branches on error kinds.

use pantrybot_domain::error::PantryError;
use pantrybot_domain::scope::Scope;
use pantrybot_domain::user::User;

use crate::ports::UserRepository;

/// Reply when a registration attempt hits an unexpected failure.
const MSG_UNKNOWN_ERROR: &str = "Unknown error. Please contact the developer.";

/// Application service for registration and conversation status.
pub struct RegistrationService<U> {
    users: U,
}

impl<U: UserRepository> RegistrationService<U> {
    /// Create a new service backed by the given repository.
    pub fn new(users: U) -> Self {
        Self { users }
    }

    /// Register a user and produce the reply text for the bot.
    ///
    /// A duplicate registration gets its own reply; any other failure is
    /// logged here and collapsed into a generic fallback, because the
    /// transport contract is a plain string, not an error.
    pub async fn register(&self, nickname: &str, name: &str, scope: Scope) -> String {
        let user = User::new(scope, nickname, name);
        match self.users.create(user).await {
            Ok(_) => format!("You can now use the bot, {name}!"),
            Err(PantryError::AlreadyRegistered) => {
                format!("{name}, you are already registered!")
            }
            Err(err) => {
                tracing::error!(
                    error = %err,
                    user_id = scope.user_id,
                    chat_id = scope.chat_id,
                    "registration failed"
                );
                MSG_UNKNOWN_ERROR.to_string()
            }
        }
    }

    /// Status code for the scope; users that never registered read as 0.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn status(&self, scope: Scope) -> Result<i64, PantryError> {
        Ok(self.users.status(scope).await?.unwrap_or(0))
    }

    /// Overwrite the status code.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn set_status(&self, scope: Scope, status: i64) -> Result<(), PantryError> {
        self.users.set_status(scope, status).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::future::Future;
    use std::sync::Mutex;

    struct InMemoryUserRepo {
        store: Mutex<HashMap<Scope, User>>,
    }

    impl Default for InMemoryUserRepo {
        fn default() -> Self {
            Self {
                store: Mutex::new(HashMap::new()),
            }
        }
    }

    impl UserRepository for InMemoryUserRepo {
        fn create(&self, user: User) -> impl Future<Output = Result<User, PantryError>> + Send {
            let mut store = self.store.lock().unwrap();
            let result = if store.contains_key(&user.scope) {
                Err(PantryError::AlreadyRegistered)
            } else {
                store.insert(user.scope, user.clone());
                Ok(user)
            };
            async { result }
        }

        fn status(
            &self,
            scope: Scope,
        ) -> impl Future<Output = Result<Option<i64>, PantryError>> + Send {
            let store = self.store.lock().unwrap();
            let result = store.get(&scope).map(|user| user.status);
            async move { Ok(result) }
        }

        fn set_status(
            &self,
            scope: Scope,
            status: i64,
        ) -> impl Future<Output = Result<(), PantryError>> + Send {
            let mut store = self.store.lock().unwrap();
            if let Some(user) = store.get_mut(&scope) {
                user.status = status;
            }
            async { Ok(()) }
        }
    }

    fn make_service() -> RegistrationService<InMemoryUserRepo> {
        RegistrationService::new(InMemoryUserRepo::default())
    }

    #[tokio::test]
    async fn should_greet_by_name_on_first_registration() {
        let svc = make_service();
        let reply = svc.register("alice", "Alice", Scope::new(1, 100)).await;
        assert_eq!(reply, "You can now use the bot, Alice!");
    }

    #[tokio::test]
    async fn should_reply_with_duplicate_message_on_second_registration() {
        let svc = make_service();
        let first = svc.register("alice", "Alice", Scope::new(1, 100)).await;
        let second = svc.register("alice", "Alice", Scope::new(1, 100)).await;

        assert!(!first.contains("already registered"));
        assert_eq!(second, "Alice, you are already registered!");
    }

    #[tokio::test]
    async fn should_allow_same_user_in_another_chat() {
        let svc = make_service();
        svc.register("alice", "Alice", Scope::new(1, 100)).await;
        let reply = svc.register("alice", "Alice", Scope::new(1, 200)).await;
        assert_eq!(reply, "You can now use the bot, Alice!");
    }

    #[tokio::test]
    async fn should_read_zero_status_for_unregistered_user() {
        let svc = make_service();
        let status = svc.status(Scope::new(9, 900)).await.unwrap();
        assert_eq!(status, 0);
    }

    #[tokio::test]
    async fn should_roundtrip_status_for_registered_user() {
        let svc = make_service();
        let scope = Scope::new(1, 100);
        svc.register("alice", "Alice", scope).await;

        svc.set_status(scope, 3).await.unwrap();
        assert_eq!(svc.status(scope).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn should_ignore_status_update_for_unregistered_user() {
        let svc = make_service();
        let scope = Scope::new(9, 900);
        svc.set_status(scope, 3).await.unwrap();
        assert_eq!(svc.status(scope).await.unwrap(), 0);
    }
}
