//! User — one registered chat member.

use serde::{Deserialize, Serialize};

use crate::scope::Scope;

/// A registered bot user within a single chat.
///
/// Identity is the [`Scope`]; users are created on registration and never
/// deleted by this layer. `status` is a conversation-state code owned by
/// the front end — the storage side only reads and writes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Owning (user, chat) pair.
    pub scope: Scope,
    /// Telegram handle, without the leading `@`.
    pub nickname: String,
    /// Display name used in bot replies.
    pub name: String,
    /// Front-end conversation status code.
    pub status: i64,
}

impl User {
    /// Create a user in the initial (zero) status.
    #[must_use]
    pub fn new(scope: Scope, nickname: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            scope,
            nickname: nickname.into(),
            name: name.into(),
            status: 0,
        }
    }
}
