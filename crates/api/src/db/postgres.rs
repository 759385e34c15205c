//! `PostgreSQL` repository for shopping lists and items.
//!
//! Queries are built at runtime (`sqlx::query_as`) so the crate compiles
//! without a live database. Ordering by `id` gives creation order since IDs
//! come from a `SERIAL` sequence.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use shopping_list_core::{Name, ShoppingItemId, ShoppingListId};

use super::{RepositoryError, ShoppingRepository};
use crate::models::{
    NewShoppingItem, ShoppingItem, ShoppingItemChanges, ShoppingList, ShoppingListChanges,
};

/// Repository backed by a `PostgreSQL` connection pool.
#[derive(Debug, Clone)]
pub struct PgShoppingRepository {
    pool: PgPool,
}

impl PgShoppingRepository {
    /// Create a new repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a foreign key violation (list deleted mid-request) to `NotFound`.
fn missing_list_is_not_found(e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_foreign_key_violation()
    {
        return RepositoryError::NotFound;
    }
    RepositoryError::Database(e)
}

#[async_trait]
impl ShoppingRepository for PgShoppingRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_shopping_lists(&self) -> Result<Vec<ShoppingList>, RepositoryError> {
        let lists = sqlx::query_as::<_, ShoppingList>(
            r"
            SELECT id, name, created_at
            FROM shopping.shopping_list
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(lists)
    }

    #[instrument(skip(self), fields(name = %name))]
    async fn create_shopping_list(&self, name: Name) -> Result<ShoppingList, RepositoryError> {
        let list = sqlx::query_as::<_, ShoppingList>(
            r"
            INSERT INTO shopping.shopping_list (name)
            VALUES ($1)
            RETURNING id, name, created_at
            ",
        )
        .bind(&name)
        .fetch_one(&self.pool)
        .await?;

        Ok(list)
    }

    #[instrument(skip(self))]
    async fn get_shopping_list(
        &self,
        id: ShoppingListId,
    ) -> Result<Option<ShoppingList>, RepositoryError> {
        let list = sqlx::query_as::<_, ShoppingList>(
            r"
            SELECT id, name, created_at
            FROM shopping.shopping_list
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(list)
    }

    #[instrument(skip(self))]
    async fn update_shopping_list(
        &self,
        id: ShoppingListId,
        changes: ShoppingListChanges,
    ) -> Result<ShoppingList, RepositoryError> {
        let list = sqlx::query_as::<_, ShoppingList>(
            r"
            UPDATE shopping.shopping_list
            SET name = COALESCE($2, name)
            WHERE id = $1
            RETURNING id, name, created_at
            ",
        )
        .bind(id)
        .bind(changes.name)
        .fetch_optional(&self.pool)
        .await?;

        list.ok_or(RepositoryError::NotFound)
    }

    #[instrument(skip(self))]
    async fn delete_shopping_list(&self, id: ShoppingListId) -> Result<(), RepositoryError> {
        // Items go with the list via ON DELETE CASCADE
        let result = sqlx::query(
            r"
            DELETE FROM shopping.shopping_list
            WHERE id = $1
            ",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_shopping_items(
        &self,
        list_id: ShoppingListId,
    ) -> Result<Vec<ShoppingItem>, RepositoryError> {
        let items = sqlx::query_as::<_, ShoppingItem>(
            r"
            SELECT id, shopping_list_id, name, purchased, created_at
            FROM shopping.shopping_item
            WHERE shopping_list_id = $1
            ORDER BY id ASC
            ",
        )
        .bind(list_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    #[instrument(skip(self, item), fields(name = %item.name))]
    async fn create_shopping_item(
        &self,
        list_id: ShoppingListId,
        item: NewShoppingItem,
    ) -> Result<ShoppingItem, RepositoryError> {
        // Inserting through a SELECT on the list yields no row when the list
        // does not exist, instead of a separate existence check.
        let created = sqlx::query_as::<_, ShoppingItem>(
            r"
            INSERT INTO shopping.shopping_item (shopping_list_id, name, purchased)
            SELECT l.id, $2::text, $3::boolean
            FROM shopping.shopping_list l
            WHERE l.id = $1
            RETURNING id, shopping_list_id, name, purchased, created_at
            ",
        )
        .bind(list_id)
        .bind(&item.name)
        .bind(item.purchased)
        .fetch_optional(&self.pool)
        .await
        .map_err(missing_list_is_not_found)?;

        created.ok_or(RepositoryError::NotFound)
    }

    #[instrument(skip(self))]
    async fn get_shopping_item(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
    ) -> Result<Option<ShoppingItem>, RepositoryError> {
        let item = sqlx::query_as::<_, ShoppingItem>(
            r"
            SELECT id, shopping_list_id, name, purchased, created_at
            FROM shopping.shopping_item
            WHERE id = $1 AND shopping_list_id = $2
            ",
        )
        .bind(item_id)
        .bind(list_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    #[instrument(skip(self))]
    async fn update_shopping_item(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
        changes: ShoppingItemChanges,
    ) -> Result<ShoppingItem, RepositoryError> {
        let item = sqlx::query_as::<_, ShoppingItem>(
            r"
            UPDATE shopping.shopping_item
            SET name = COALESCE($3, name),
                purchased = COALESCE($4, purchased)
            WHERE id = $1 AND shopping_list_id = $2
            RETURNING id, shopping_list_id, name, purchased, created_at
            ",
        )
        .bind(item_id)
        .bind(list_id)
        .bind(changes.name)
        .bind(changes.purchased)
        .fetch_optional(&self.pool)
        .await?;

        item.ok_or(RepositoryError::NotFound)
    }

    #[instrument(skip(self))]
    async fn delete_shopping_item(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r"
            DELETE FROM shopping.shopping_item
            WHERE id = $1 AND shopping_list_id = $2
            ",
        )
        .bind(item_id)
        .bind(list_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
