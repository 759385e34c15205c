//! Persistence for shopping lists and items.
//!
//! Handlers talk to storage only through the [`ShoppingRepository`] trait.
//! Two backends implement it:
//!
//! - [`PgShoppingRepository`] - `PostgreSQL` via sqlx (production)
//! - [`MemoryShoppingRepository`] - process-local store (tests, local demos)
//!
//! # Tables
//!
//! - `shopping.shopping_list` - Named lists
//! - `shopping.shopping_item` - Items, `ON DELETE CASCADE` from their list
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p shopping-list-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use shopping_list_core::{Name, ShoppingItemId, ShoppingListId};

use crate::models::{
    NewShoppingItem, ShoppingItem, ShoppingItemChanges, ShoppingList, ShoppingListChanges,
};

pub use memory::MemoryShoppingRepository;
pub use postgres::PgShoppingRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,
}

/// Storage operations for shopping lists and their items.
///
/// Lookups return `Ok(None)` for unknown IDs; writes that target an unknown
/// list or item return [`RepositoryError::NotFound`]. Item operations are
/// always scoped to the owning list, so an item ID paired with the wrong
/// list is treated as unknown.
#[async_trait]
pub trait ShoppingRepository: Send + Sync {
    /// Check that storage is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;

    /// All lists in creation order.
    async fn list_shopping_lists(&self) -> Result<Vec<ShoppingList>, RepositoryError>;

    /// Create a list.
    async fn create_shopping_list(&self, name: Name) -> Result<ShoppingList, RepositoryError>;

    /// Get a list by ID.
    async fn get_shopping_list(
        &self,
        id: ShoppingListId,
    ) -> Result<Option<ShoppingList>, RepositoryError>;

    /// Apply changes to a list and return the stored result.
    async fn update_shopping_list(
        &self,
        id: ShoppingListId,
        changes: ShoppingListChanges,
    ) -> Result<ShoppingList, RepositoryError>;

    /// Delete a list together with all of its items.
    async fn delete_shopping_list(&self, id: ShoppingListId) -> Result<(), RepositoryError>;

    /// Items owned by a list, in creation order.
    async fn list_shopping_items(
        &self,
        list_id: ShoppingListId,
    ) -> Result<Vec<ShoppingItem>, RepositoryError>;

    /// Create an item under an existing list.
    async fn create_shopping_item(
        &self,
        list_id: ShoppingListId,
        item: NewShoppingItem,
    ) -> Result<ShoppingItem, RepositoryError>;

    /// Get an item owned by the given list.
    async fn get_shopping_item(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
    ) -> Result<Option<ShoppingItem>, RepositoryError>;

    /// Apply changes to an item and return the stored result.
    async fn update_shopping_item(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
        changes: ShoppingItemChanges,
    ) -> Result<ShoppingItem, RepositoryError>;

    /// Delete a single item.
    async fn delete_shopping_item(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
    ) -> Result<(), RepositoryError>;
}

/// Shared handle to whichever backend the server was configured with.
pub type DynShoppingRepository = Arc<dyn ShoppingRepository>;

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
