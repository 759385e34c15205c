//! Domain models for the shopping list API.
//!
//! These are the stored shapes of lists and items plus the validated change
//! sets the handlers pass to the repository. Wire representations live in
//! [`crate::routes::views`].

pub mod shopping;

pub use shopping::{
    NewShoppingItem, ShoppingItem, ShoppingItemChanges, ShoppingList, ShoppingListChanges,
};
