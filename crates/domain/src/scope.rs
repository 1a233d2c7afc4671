//! Scope — the (user, chat) pair that owns a slice of data.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one user's data within one chat.
///
/// Every user row and product row belongs to exactly one scope, and all
/// queries filter on it. The same person talking to the bot from two chats
/// owns two independent scopes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    /// Telegram user identifier.
    pub user_id: i64,
    /// Telegram chat identifier.
    pub chat_id: i64,
}

impl Scope {
    /// Build a scope from the raw identifiers the transport hands over.
    #[must_use]
    pub fn new(user_id: i64, chat_id: i64) -> Self {
        Self { user_id, chat_id }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "user {} in chat {}", self.user_id, self.chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_compare_equal_for_same_pair() {
        assert_eq!(Scope::new(1, 100), Scope::new(1, 100));
    }

    #[test]
    fn should_differ_when_chat_differs() {
        assert_ne!(Scope::new(1, 100), Scope::new(1, 200));
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let scope = Scope::new(42, -1001);
        let json = serde_json::to_string(&scope).unwrap();
        let parsed: Scope = serde_json::from_str(&json).unwrap();
        assert_eq!(scope, parsed);
    }
}
