//! Storage port — repository traits for persistence.

use std::future::Future;

use pantrybot_domain::error::PantryError;
use pantrybot_domain::product::{ListView, Product, ProductEntry};
use pantrybot_domain::scope::Scope;
use pantrybot_domain::time::Timestamp;
use pantrybot_domain::user::User;

/// Repository for registered chat users.
pub trait UserRepository {
    /// Insert a new user row.
    ///
    /// Fails with [`PantryError::AlreadyRegistered`] when the scope is
    /// already taken.
    fn create(&self, user: User) -> impl Future<Output = Result<User, PantryError>> + Send;

    /// Current status code for the scope, or `None` when the user never
    /// registered.
    fn status(
        &self,
        scope: Scope,
    ) -> impl Future<Output = Result<Option<i64>, PantryError>> + Send;

    /// Overwrite the status code. Updating an absent scope changes nothing
    /// and is not an error.
    fn set_status(
        &self,
        scope: Scope,
        status: i64,
    ) -> impl Future<Output = Result<(), PantryError>> + Send;
}

/// Repository for tracked products.
///
/// Listings and transitions refresh the cached countdowns for the scope
/// before touching rows, so callers always observe current rest times.
/// Products are never deleted; adding an existing name again inserts a
/// second row.
pub trait ProductRepository {
    /// Insert a product and return it with its store-assigned id.
    fn add(&self, product: Product) -> impl Future<Output = Result<Product, PantryError>> + Send;

    /// The rows of one listing view.
    fn list(
        &self,
        scope: Scope,
        view: ListView,
    ) -> impl Future<Output = Result<Vec<ProductEntry>, PantryError>> + Send;

    /// Full record for a product name, or `None`.
    fn find_by_name(
        &self,
        scope: Scope,
        name: &str,
    ) -> impl Future<Output = Result<Option<Product>, PantryError>> + Send;

    /// Move a product into the fridge and start its countdown window.
    ///
    /// Fails with [`PantryError::NotFound`] when no product carries the
    /// name in this scope; nothing is mutated in that case.
    fn move_to_fridge(
        &self,
        scope: Scope,
        name: &str,
        from: Timestamp,
        until: Timestamp,
    ) -> impl Future<Output = Result<(), PantryError>> + Send;

    /// Move a product to the trash and stop its countdown. The previous
    /// countdown window is left untouched.
    ///
    /// Fails with [`PantryError::NotFound`] when no product carries the
    /// name in this scope; nothing is mutated in that case.
    fn move_to_trash(
        &self,
        scope: Scope,
        name: &str,
    ) -> impl Future<Output = Result<(), PantryError>> + Send;

    /// Mark a product as used over the given window.
    ///
    /// Fails with [`PantryError::NotFound`] when no product carries the
    /// name in this scope; nothing is mutated in that case.
    fn mark_used(
        &self,
        scope: Scope,
        name: &str,
        from: Timestamp,
        until: Timestamp,
    ) -> impl Future<Output = Result<(), PantryError>> + Send;

    /// Recompute and persist `rest_time` for every product in the scope.
    fn refresh_rest_times(
        &self,
        scope: Scope,
    ) -> impl Future<Output = Result<(), PantryError>> + Send;
}
