//! Shopping item route handlers.
//!
//! Items are always addressed through their owning list. An item that exists
//! under a different list is reported as not found.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Map, Value};
use tracing::instrument;

use shopping_list_core::{ShoppingItemId, ShoppingListId};

use super::extract::{JsonObject, ResourcePath};
use super::forms::{self, WriteMode};
use super::shopping_lists::find_list;
use super::views::ShoppingItemView;
use crate::db::ShoppingRepository;
use crate::error::{AppError, Result};
use crate::models::ShoppingItem;
use crate::state::AppState;

/// Add an item to a shopping list.
///
/// The owning list comes from the path; any `shopping_list` key in the body
/// is ignored.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    ResourcePath(list_id): ResourcePath<ShoppingListId>,
    JsonObject(body): JsonObject,
) -> Result<(StatusCode, Json<ShoppingItemView>)> {
    let repository = state.repository().as_ref();
    find_list(repository, list_id).await?;

    let new_item = forms::new_shopping_item(&body)?;
    let item = repository.create_shopping_item(list_id, new_item).await?;

    tracing::info!(%list_id, item_id = %item.id, "Shopping item created");
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Show one item of a list.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    ResourcePath((list_id, item_id)): ResourcePath<(ShoppingListId, ShoppingItemId)>,
) -> Result<Json<ShoppingItemView>> {
    let item = find_item(state.repository().as_ref(), list_id, item_id).await?;
    Ok(Json(item.into()))
}

/// Replace an item's fields (PUT).
#[instrument(skip(state, body))]
pub async fn replace(
    State(state): State<AppState>,
    ResourcePath((list_id, item_id)): ResourcePath<(ShoppingListId, ShoppingItemId)>,
    JsonObject(body): JsonObject,
) -> Result<Json<ShoppingItemView>> {
    update(&state, list_id, item_id, &body, WriteMode::Full)
        .await
        .map(Json)
}

/// Update some of an item's fields (PATCH).
#[instrument(skip(state, body))]
pub async fn patch(
    State(state): State<AppState>,
    ResourcePath((list_id, item_id)): ResourcePath<(ShoppingListId, ShoppingItemId)>,
    JsonObject(body): JsonObject,
) -> Result<Json<ShoppingItemView>> {
    update(&state, list_id, item_id, &body, WriteMode::Partial)
        .await
        .map(Json)
}

/// Delete an item from a list.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    ResourcePath((list_id, item_id)): ResourcePath<(ShoppingListId, ShoppingItemId)>,
) -> Result<StatusCode> {
    state
        .repository()
        .delete_shopping_item(list_id, item_id)
        .await?;

    tracing::info!(%list_id, %item_id, "Shopping item deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn find_item(
    repository: &dyn ShoppingRepository,
    list_id: ShoppingListId,
    item_id: ShoppingItemId,
) -> Result<ShoppingItem> {
    repository
        .get_shopping_item(list_id, item_id)
        .await?
        .ok_or(AppError::NotFound)
}

async fn update(
    state: &AppState,
    list_id: ShoppingListId,
    item_id: ShoppingItemId,
    body: &Map<String, Value>,
    mode: WriteMode,
) -> Result<ShoppingItemView> {
    let repository = state.repository().as_ref();
    let existing = find_item(repository, list_id, item_id).await?;

    let changes = forms::shopping_item_changes(body, mode)?;
    let item = if changes.is_empty() {
        existing
    } else {
        repository
            .update_shopping_item(list_id, item_id, changes)
            .await?
    };

    Ok(item.into())
}
