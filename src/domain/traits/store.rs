use crate::application::errors::StoreError;
use crate::domain::entities::{Currency, Product, ProductSeed, Session};

/// Catalog trait - read access to products plus atomic full reloads
///
/// Listings are in ascending id order so menus and tests are deterministic.
pub trait Catalog: Send + Sync {
    fn lookup(&self, product_id: i64) -> Result<Option<Product>, StoreError>;

    fn list_by_category(&self, category: &str) -> Result<Vec<Product>, StoreError>;

    /// Distinct category keys in first-seen id order
    fn categories(&self) -> Result<Vec<String>, StoreError>;

    /// Replace the whole catalog in one transaction
    ///
    /// Either every row loads or the prior catalog stays visible; a
    /// malformed row fails the load with a descriptive error.
    fn replace_all(&self, seed: &[ProductSeed]) -> Result<usize, StoreError>;

    fn product_count(&self) -> Result<usize, StoreError>;
}

/// Session store trait - per-user record access
///
/// Every mutation touches a single user's row, so cross-user operations
/// need no coordination.
pub trait SessionStore: Send + Sync {
    /// Get-or-create: absent users receive a default session with an empty
    /// cart and the base currency. Idempotent.
    fn session(&self, user_id: i64) -> Result<Session, StoreError>;

    fn set_currency(&self, user_id: i64, currency: Currency) -> Result<(), StoreError>;

    /// Increment the product's quantity by one, returning the new quantity
    fn add_item(&self, user_id: i64, product_id: i64) -> Result<u32, StoreError>;

    /// Empty the cart, leaving the currency untouched
    fn clear_cart(&self, user_id: i64) -> Result<(), StoreError>;
}
