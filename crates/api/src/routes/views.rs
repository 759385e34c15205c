//! JSON representations returned by the API.

use serde::{Deserialize, Serialize};

use shopping_list_core::{ShoppingItemId, ShoppingListId};

use crate::models::{ShoppingItem, ShoppingList};

/// Summary form of a list, used by the collection endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListView {
    pub id: ShoppingListId,
    pub name: String,
}

/// Full form of a list with its items in creation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListDetailView {
    pub id: ShoppingListId,
    pub name: String,
    pub shopping_items: Vec<ShoppingItemView>,
}

/// A single item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingItemView {
    pub id: ShoppingItemId,
    pub name: String,
    pub purchased: bool,
}

impl From<ShoppingList> for ShoppingListView {
    fn from(list: ShoppingList) -> Self {
        Self {
            id: list.id,
            name: list.name.into_inner(),
        }
    }
}

impl ShoppingListDetailView {
    /// Combine a list with the items it owns.
    #[must_use]
    pub fn new(list: ShoppingList, items: Vec<ShoppingItem>) -> Self {
        Self {
            id: list.id,
            name: list.name.into_inner(),
            shopping_items: items.into_iter().map(ShoppingItemView::from).collect(),
        }
    }
}

impl From<ShoppingItem> for ShoppingItemView {
    fn from(item: ShoppingItem) -> Self {
        Self {
            id: item.id,
            name: item.name.into_inner(),
            purchased: item.purchased,
        }
    }
}
