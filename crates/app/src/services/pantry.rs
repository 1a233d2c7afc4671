//! Pantry service — use-cases for product records and listings.

use pantrybot_domain::error::PantryError;
use pantrybot_domain::product::{ListView, Product, ProductEntry};
use pantrybot_domain::scope::Scope;
use pantrybot_domain::time::Timestamp;

use crate::ports::ProductRepository;

/// Application service for product tracking.
pub struct PantryService<P> {
    products: P,
}

impl<P: ProductRepository> PantryService<P> {
    /// Create a new service backed by the given repository.
    pub fn new(products: P) -> Self {
        Self { products }
    }

    /// Add a product record.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn add(&self, product: Product) -> Result<Product, PantryError> {
        self.products.add(product).await
    }

    /// Listing for a raw protocol code.
    ///
    /// Codes outside the known views produce an empty listing, not an
    /// error; the bot renders that as "nothing here yet".
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn list(&self, scope: Scope, code: i64) -> Result<Vec<ProductEntry>, PantryError> {
        match ListView::from_code(code) {
            Some(view) => self.products.list(scope, view).await,
            None => Ok(Vec::new()),
        }
    }

    /// Look up one product by name.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the repository.
    pub async fn find(&self, scope: Scope, name: &str) -> Result<Option<Product>, PantryError> {
        self.products.find_by_name(scope, name).await
    }

    /// Move a product into the fridge with a fresh countdown window.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::NotFound`] when the product does not exist,
    /// or a storage error from the repository.
    pub async fn move_to_fridge(
        &self,
        scope: Scope,
        name: &str,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<(), PantryError> {
        self.products.move_to_fridge(scope, name, from, until).await
    }

    /// Move a product to the trash.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::NotFound`] when the product does not exist,
    /// or a storage error from the repository.
    pub async fn move_to_trash(&self, scope: Scope, name: &str) -> Result<(), PantryError> {
        self.products.move_to_trash(scope, name).await
    }

    /// Mark a product as used over the given window.
    ///
    /// # Errors
    ///
    /// Returns [`PantryError::NotFound`] when the product does not exist,
    /// or a storage error from the repository.
    pub async fn mark_used(
        &self,
        scope: Scope,
        name: &str,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<(), PantryError> {
        self.products.mark_used(scope, name, from, until).await
    }
}
