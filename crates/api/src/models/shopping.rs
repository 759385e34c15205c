//! Shopping list and shopping item domain types.

use chrono::{DateTime, Utc};

use shopping_list_core::{Name, ShoppingItemId, ShoppingListId};

/// A named collection of shopping items.
///
/// Items are not embedded; they are loaded separately and ordered by
/// creation when a list is shown in full.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShoppingList {
    /// Unique list ID.
    pub id: ShoppingListId,
    /// Display name.
    pub name: Name,
    /// When the list was created.
    pub created_at: DateTime<Utc>,
}

/// A purchasable entry owned by exactly one shopping list.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct ShoppingItem {
    /// Unique item ID.
    pub id: ShoppingItemId,
    /// List that owns this item.
    pub shopping_list_id: ShoppingListId,
    /// Display name.
    pub name: Name,
    /// Whether the item has been bought.
    pub purchased: bool,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

/// Validated input for a new shopping item.
///
/// The owning list comes from the request path, never from the body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShoppingItem {
    pub name: Name,
    pub purchased: bool,
}

/// Validated changes to a shopping list. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingListChanges {
    pub name: Option<Name>,
}

impl ShoppingListChanges {
    /// Returns `true` if applying these changes would modify nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
    }

    /// Apply the changes to a list in place.
    pub fn apply(self, list: &mut ShoppingList) {
        if let Some(name) = self.name {
            list.name = name;
        }
    }
}

/// Validated changes to a shopping item. `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShoppingItemChanges {
    pub name: Option<Name>,
    pub purchased: Option<bool>,
}

impl ShoppingItemChanges {
    /// Returns `true` if applying these changes would modify nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.purchased.is_none()
    }

    /// Apply the changes to an item in place.
    pub fn apply(self, item: &mut ShoppingItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(purchased) = self.purchased {
            item.purchased = purchased;
        }
    }
}
