//! Tests for the `PostgreSQL` repository.
//!
//! These need a reachable database and are ignored by default. Migrations are
//! applied before each test; every test creates its own lists, so they can
//! share one database.
//!
//! ```bash
//! SHOPPING_DATABASE_URL=postgres://localhost/shopping_test \
//!     cargo test -p shopping-list-integration-tests --test postgres_repository -- --ignored
//! ```

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::{
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use secrecy::SecretString;
use serde_json::{Value, json};
use tower::ServiceExt;

use shopping_list_api::db::{PgShoppingRepository, RepositoryError, ShoppingRepository, create_pool};
use shopping_list_api::models::{NewShoppingItem, ShoppingItemChanges, ShoppingListChanges};
use shopping_list_api::state::AppState;
use shopping_list_core::{Name, ShoppingItemId, ShoppingListId};
use shopping_list_integration_tests::{add_item_url, item_url, list_url};

async fn repository() -> PgShoppingRepository {
    let url = std::env::var("SHOPPING_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("SHOPPING_DATABASE_URL or DATABASE_URL must be set");
    let pool = create_pool(&SecretString::from(url), 2)
        .await
        .expect("Failed to connect to PostgreSQL");
    sqlx::migrate!("../api/migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");
    PgShoppingRepository::new(pool)
}

fn name(value: &str) -> Name {
    Name::parse(value).unwrap()
}

fn new_item(value: &str, purchased: bool) -> NewShoppingItem {
    NewShoppingItem {
        name: name(value),
        purchased,
    }
}

// ============================================================================
// Lists
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_list_round_trip_and_partial_update() {
    let repo = repository().await;

    let list = repo.create_shopping_list(name("Dairy")).await.unwrap();
    let fetched = repo.get_shopping_list(list.id).await.unwrap().unwrap();
    assert_eq!(fetched.name.as_str(), "Dairy");

    let all = repo.list_shopping_lists().await.unwrap();
    assert!(all.iter().any(|l| l.id == list.id));

    let unchanged = repo
        .update_shopping_list(list.id, ShoppingListChanges::default())
        .await
        .unwrap();
    assert_eq!(unchanged.name.as_str(), "Dairy");

    let renamed = repo
        .update_shopping_list(
            list.id,
            ShoppingListChanges {
                name: Some(name("Cheese")),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name.as_str(), "Cheese");
    assert_eq!(renamed.created_at, list.created_at);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_unknown_list_operations() {
    let repo = repository().await;
    let missing = ShoppingListId::new(i32::MAX);

    assert!(repo.get_shopping_list(missing).await.unwrap().is_none());
    assert!(matches!(
        repo.update_shopping_list(missing, ShoppingListChanges::default())
            .await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete_shopping_list(missing).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.create_shopping_item(missing, new_item("Milk", false))
            .await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_deleting_list_cascades_to_items() {
    let repo = repository().await;
    let list = repo.create_shopping_list(name("Drinks")).await.unwrap();
    let other = repo.create_shopping_list(name("Games")).await.unwrap();
    let soda = repo
        .create_shopping_item(list.id, new_item("Soda", false))
        .await
        .unwrap();
    let game = repo
        .create_shopping_item(other.id, new_item("GTA", false))
        .await
        .unwrap();

    repo.delete_shopping_list(list.id).await.unwrap();

    assert!(repo.get_shopping_list(list.id).await.unwrap().is_none());
    assert!(repo.list_shopping_items(list.id).await.unwrap().is_empty());
    assert!(repo.get_shopping_item(list.id, soda.id).await.unwrap().is_none());
    assert!(repo.get_shopping_item(other.id, game.id).await.unwrap().is_some());
}

// ============================================================================
// Items
// ============================================================================

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_items_are_scoped_to_their_list() {
    let repo = repository().await;
    let list = repo.create_shopping_list(name("Sweets")).await.unwrap();
    let other = repo.create_shopping_list(name("Other")).await.unwrap();
    let first = repo
        .create_shopping_item(list.id, new_item("Chocolate", false))
        .await
        .unwrap();
    let second = repo
        .create_shopping_item(list.id, new_item("Candy", true))
        .await
        .unwrap();

    let items = repo.list_shopping_items(list.id).await.unwrap();
    let ids: Vec<ShoppingItemId> = items.iter().map(|i| i.id).collect();
    assert_eq!(ids, [first.id, second.id]);
    assert_eq!(items[0].shopping_list_id, list.id);

    assert!(repo.get_shopping_item(other.id, first.id).await.unwrap().is_none());
    assert!(matches!(
        repo.update_shopping_item(other.id, first.id, ShoppingItemChanges::default())
            .await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.delete_shopping_item(other.id, first.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(repo.get_shopping_item(list.id, first.id).await.unwrap().is_some());
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_item_partial_update_keeps_unsupplied_fields() {
    let repo = repository().await;
    let list = repo.create_shopping_list(name("Dairy")).await.unwrap();
    let item = repo
        .create_shopping_item(list.id, new_item("Milk", false))
        .await
        .unwrap();

    let purchased = repo
        .update_shopping_item(
            list.id,
            item.id,
            ShoppingItemChanges {
                name: None,
                purchased: Some(true),
            },
        )
        .await
        .unwrap();
    assert_eq!(purchased.name.as_str(), "Milk");
    assert!(purchased.purchased);

    let renamed = repo
        .update_shopping_item(
            list.id,
            item.id,
            ShoppingItemChanges {
                name: Some(name("Oat Milk")),
                purchased: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name.as_str(), "Oat Milk");
    assert!(renamed.purchased);
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_deleting_item_leaves_siblings() {
    let repo = repository().await;
    let list = repo.create_shopping_list(name("Dairy")).await.unwrap();
    let milk = repo
        .create_shopping_item(list.id, new_item("Milk", false))
        .await
        .unwrap();
    let butter = repo
        .create_shopping_item(list.id, new_item("Butter", true))
        .await
        .unwrap();

    repo.delete_shopping_item(list.id, milk.id).await.unwrap();

    let items = repo.list_shopping_items(list.id).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, butter.id);
    assert!(matches!(
        repo.delete_shopping_item(list.id, milk.id).await,
        Err(RepositoryError::NotFound)
    ));
}

// ============================================================================
// HTTP
// ============================================================================

async fn send(
    router: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = body.map(|b| b.to_string()).unwrap_or_default();
    let response = router
        .clone()
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
#[ignore = "Requires PostgreSQL"]
async fn test_http_flow_against_postgres() {
    let router = shopping_list_api::app(AppState::new(Arc::new(repository().await)));

    let (status, list) = send(
        &router,
        Method::POST,
        "/shopping-lists/",
        Some(json!({"name": "Meat"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let list_id = list["id"].as_i64().unwrap();

    let (status, item) = send(
        &router,
        Method::POST,
        &add_item_url(list_id),
        Some(json!({"name": "steak", "purchased": false})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let item_id = item["id"].as_i64().unwrap();

    let (status, detail) = send(&router, Method::GET, &list_url(list_id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        detail["shopping_items"],
        json!([{"id": item_id, "name": "steak", "purchased": false}])
    );

    let (status, _) = send(&router, Method::DELETE, &list_url(list_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&router, Method::GET, &item_url(list_id, item_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Not found."}));
}
