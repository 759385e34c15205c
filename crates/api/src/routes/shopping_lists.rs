//! Shopping list route handlers.

use axum::{Json, extract::State, http::StatusCode};
use tracing::instrument;

use shopping_list_core::ShoppingListId;

use super::extract::{JsonObject, ResourcePath};
use super::forms::{self, WriteMode};
use super::views::{ShoppingListDetailView, ShoppingListView};
use crate::db::ShoppingRepository;
use crate::error::{AppError, Result};
use crate::models::ShoppingList;
use crate::state::AppState;

/// List every shopping list in creation order.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ShoppingListView>>> {
    let lists = state.repository().list_shopping_lists().await?;
    Ok(Json(lists.into_iter().map(ShoppingListView::from).collect()))
}

/// Create a shopping list.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<ShoppingListView>)> {
    let name = forms::new_shopping_list(&body)?;
    let list = state.repository().create_shopping_list(name).await?;

    tracing::info!(list_id = %list.id, "Shopping list created");
    Ok((StatusCode::CREATED, Json(list.into())))
}

/// Show a shopping list with its items.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ResourcePath(id): ResourcePath<ShoppingListId>,
) -> Result<Json<ShoppingListDetailView>> {
    let repository = state.repository();
    let list = find_list(repository.as_ref(), id).await?;
    detail(repository.as_ref(), list).await.map(Json)
}

/// Replace a shopping list's fields (PUT).
#[instrument(skip(state, body))]
pub async fn replace(
    State(state): State<AppState>,
    ResourcePath(id): ResourcePath<ShoppingListId>,
    JsonObject(body): JsonObject,
) -> Result<Json<ShoppingListDetailView>> {
    update(&state, id, &body, WriteMode::Full).await.map(Json)
}

/// Update some of a shopping list's fields (PATCH).
#[instrument(skip(state, body))]
pub async fn patch(
    State(state): State<AppState>,
    ResourcePath(id): ResourcePath<ShoppingListId>,
    JsonObject(body): JsonObject,
) -> Result<Json<ShoppingListDetailView>> {
    update(&state, id, &body, WriteMode::Partial).await.map(Json)
}

/// Delete a shopping list and every item on it.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    ResourcePath(id): ResourcePath<ShoppingListId>,
) -> Result<StatusCode> {
    state.repository().delete_shopping_list(id).await?;

    tracing::info!(list_id = %id, "Shopping list deleted");
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Helpers
// =============================================================================

/// Fetch a list or fail with 404.
pub(super) async fn find_list(
    repository: &dyn ShoppingRepository,
    id: ShoppingListId,
) -> Result<ShoppingList> {
    repository
        .get_shopping_list(id)
        .await?
        .ok_or(AppError::NotFound)
}

async fn detail(
    repository: &dyn ShoppingRepository,
    list: ShoppingList,
) -> Result<ShoppingListDetailView> {
    let items = repository.list_shopping_items(list.id).await?;
    Ok(ShoppingListDetailView::new(list, items))
}

/// Shared body of PUT and PATCH.
///
/// The list must exist before the body is validated, so an unknown ID is a
/// 404 even when the body is also invalid.
async fn update(
    state: &AppState,
    id: ShoppingListId,
    body: &serde_json::Map<String, serde_json::Value>,
    mode: WriteMode,
) -> Result<ShoppingListDetailView> {
    let repository = state.repository().as_ref();
    let existing = find_list(repository, id).await?;

    let changes = forms::shopping_list_changes(body, mode)?;
    let list = if changes.is_empty() {
        existing
    } else {
        repository.update_shopping_list(id, changes).await?
    };

    detail(repository, list).await
}
