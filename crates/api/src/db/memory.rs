//! In-memory repository.
//!
//! Keeps lists and items in insertion-ordered vectors behind a single
//! `RwLock`, so every write is serialized and readers see a consistent
//! snapshot. IDs start at 1 and are never reused, like a database sequence.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use shopping_list_core::{Name, ShoppingItemId, ShoppingListId};

use super::{RepositoryError, ShoppingRepository};
use crate::models::{
    NewShoppingItem, ShoppingItem, ShoppingItemChanges, ShoppingList, ShoppingListChanges,
};

/// Repository that stores everything in process memory.
#[derive(Debug, Default)]
pub struct MemoryShoppingRepository {
    store: RwLock<Store>,
}

#[derive(Debug, Default)]
struct Store {
    lists: Vec<ShoppingList>,
    items: Vec<ShoppingItem>,
    last_list_id: i32,
    last_item_id: i32,
}

impl Store {
    fn list_mut(&mut self, id: ShoppingListId) -> Option<&mut ShoppingList> {
        self.lists.iter_mut().find(|list| list.id == id)
    }

    fn item_mut(
        &mut self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
    ) -> Option<&mut ShoppingItem> {
        self.items
            .iter_mut()
            .find(|item| item.id == item_id && item.shopping_list_id == list_id)
    }
}

impl MemoryShoppingRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of stored items across all lists.
    pub async fn item_count(&self) -> usize {
        self.store.read().await.items.len()
    }
}

#[async_trait]
impl ShoppingRepository for MemoryShoppingRepository {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    async fn list_shopping_lists(&self) -> Result<Vec<ShoppingList>, RepositoryError> {
        Ok(self.store.read().await.lists.clone())
    }

    async fn create_shopping_list(&self, name: Name) -> Result<ShoppingList, RepositoryError> {
        let mut store = self.store.write().await;
        store.last_list_id += 1;

        let list = ShoppingList {
            id: ShoppingListId::new(store.last_list_id),
            name,
            created_at: Utc::now(),
        };
        store.lists.push(list.clone());

        Ok(list)
    }

    async fn get_shopping_list(
        &self,
        id: ShoppingListId,
    ) -> Result<Option<ShoppingList>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store.lists.iter().find(|list| list.id == id).cloned())
    }

    async fn update_shopping_list(
        &self,
        id: ShoppingListId,
        changes: ShoppingListChanges,
    ) -> Result<ShoppingList, RepositoryError> {
        let mut store = self.store.write().await;
        let list = store.list_mut(id).ok_or(RepositoryError::NotFound)?;
        changes.apply(list);
        Ok(list.clone())
    }

    async fn delete_shopping_list(&self, id: ShoppingListId) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        let before = store.lists.len();
        store.lists.retain(|list| list.id != id);
        if store.lists.len() == before {
            return Err(RepositoryError::NotFound);
        }

        store.items.retain(|item| item.shopping_list_id != id);
        Ok(())
    }

    async fn list_shopping_items(
        &self,
        list_id: ShoppingListId,
    ) -> Result<Vec<ShoppingItem>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .items
            .iter()
            .filter(|item| item.shopping_list_id == list_id)
            .cloned()
            .collect())
    }

    async fn create_shopping_item(
        &self,
        list_id: ShoppingListId,
        item: NewShoppingItem,
    ) -> Result<ShoppingItem, RepositoryError> {
        let mut store = self.store.write().await;
        if store.list_mut(list_id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        store.last_item_id += 1;

        let created = ShoppingItem {
            id: ShoppingItemId::new(store.last_item_id),
            shopping_list_id: list_id,
            name: item.name,
            purchased: item.purchased,
            created_at: Utc::now(),
        };
        store.items.push(created.clone());

        Ok(created)
    }

    async fn get_shopping_item(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
    ) -> Result<Option<ShoppingItem>, RepositoryError> {
        let store = self.store.read().await;
        Ok(store
            .items
            .iter()
            .find(|item| item.id == item_id && item.shopping_list_id == list_id)
            .cloned())
    }

    async fn update_shopping_item(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
        changes: ShoppingItemChanges,
    ) -> Result<ShoppingItem, RepositoryError> {
        let mut store = self.store.write().await;
        let item = store
            .item_mut(list_id, item_id)
            .ok_or(RepositoryError::NotFound)?;
        changes.apply(item);
        Ok(item.clone())
    }

    async fn delete_shopping_item(
        &self,
        list_id: ShoppingListId,
        item_id: ShoppingItemId,
    ) -> Result<(), RepositoryError> {
        let mut store = self.store.write().await;
        let before = store.items.len();
        store
            .items
            .retain(|item| !(item.id == item_id && item.shopping_list_id == list_id));
        if store.items.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
