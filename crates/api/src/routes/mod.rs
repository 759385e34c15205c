//! HTTP route handlers for the shopping list API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                                   - Liveness check
//! GET    /health/ready                             - Readiness check (storage)
//!
//! # Shopping lists
//! GET    /shopping-lists/                          - All lists (summary form)
//! POST   /shopping-lists/                          - Create list
//! GET    /shopping-lists/{id}/                     - List with items
//! PUT    /shopping-lists/{id}/                     - Replace list
//! PATCH  /shopping-lists/{id}/                     - Partially update list
//! DELETE /shopping-lists/{id}/                     - Delete list and its items
//!
//! # Shopping items (scoped to their list)
//! POST   /shopping-lists/{id}/items/               - Add item
//! GET    /shopping-lists/{id}/items/{item_id}/     - Item detail
//! PUT    /shopping-lists/{id}/items/{item_id}/     - Replace item
//! PATCH  /shopping-lists/{id}/items/{item_id}/     - Partially update item
//! DELETE /shopping-lists/{id}/items/{item_id}/     - Delete item
//! ```
//!
//! Paths keep their trailing slash; `/shopping-lists` without it is a 404.

pub mod extract;
pub mod forms;
pub mod health;
pub mod shopping_items;
pub mod shopping_lists;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the shopping list and item routes.
pub fn shopping_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shopping-lists/",
            get(shopping_lists::index).post(shopping_lists::create),
        )
        .route(
            "/shopping-lists/{id}/",
            get(shopping_lists::show)
                .put(shopping_lists::replace)
                .patch(shopping_lists::patch)
                .delete(shopping_lists::destroy),
        )
        .route(
            "/shopping-lists/{id}/items/",
            post(shopping_items::create),
        )
        .route(
            "/shopping-lists/{id}/items/{item_id}/",
            get(shopping_items::show)
                .put(shopping_items::replace)
                .patch(shopping_items::patch)
                .delete(shopping_items::destroy),
        )
}

/// Create the health check routes.
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
}

/// Create the complete router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(shopping_routes())
        .fallback(not_found)
}

/// JSON 404 for paths that match no route.
async fn not_found() -> AppError {
    AppError::NotFound
}
