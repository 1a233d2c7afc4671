//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`PantryError`] via `#[from]`; no string sentinels, no substring
//! matching on driver messages.

use thiserror::Error;

/// Top-level error returned by every fallible operation.
#[derive(Debug, Error)]
pub enum PantryError {
    /// A domain invariant failed before any IO happened.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The requested record does not exist.
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// The (user, chat) pair is already registered.
    #[error("user is already registered in this chat")]
    AlreadyRegistered,

    /// The storage layer failed; the source carries the detail.
    #[error("storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A lookup that found nothing.
#[derive(Debug, Error)]
#[error("{entity} not found: {key}")]
pub struct NotFoundError {
    /// What kind of record was looked up.
    pub entity: &'static str,
    /// The key that missed.
    pub key: String,
}

/// Invariant violations caught while building domain values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A product was built without an owning scope.
    #[error("product requires a scope")]
    MissingScope,
    /// Product names key lookups and transitions; empty is never valid.
    #[error("product name must not be empty")]
    EmptyName,
}
