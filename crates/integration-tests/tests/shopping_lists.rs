//! Integration tests for the shopping list endpoints.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use shopping_list_api::db::ShoppingRepository;
use shopping_list_api::routes::views::{ShoppingListDetailView, ShoppingListView};
use shopping_list_integration_tests::{LISTS, TestApp, item_url, list_url};

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_valid_shopping_list_created() {
    let app = TestApp::new();

    let resp = app.post_json(LISTS, &json!({"name": "Dairy"})).await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["name"], "Dairy");
    assert!(resp.body["id"].is_i64());
    assert!(resp.body.get("shopping_items").is_none());

    let lists = app.repository().list_shopping_lists().await.unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].name.as_str(), "Dairy");
}

#[tokio::test]
async fn test_shopping_list_name_missing_returns_bad_request() {
    let app = TestApp::new();

    let resp = app.post_json(LISTS, &json!({"somethingelse": "foobar"})).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, json!({"name": ["This field is required."]}));
    assert!(app.repository().list_shopping_lists().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_blank_and_null_names_are_rejected() {
    let app = TestApp::new();

    let blank = app.post_json(LISTS, &json!({"name": "   "})).await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.body, json!({"name": ["This field may not be blank."]}));

    let null = app.post_json(LISTS, &json!({"name": null})).await;
    assert_eq!(null.status, StatusCode::BAD_REQUEST);
    assert_eq!(null.body, json!({"name": ["This field may not be null."]}));

    assert!(app.repository().list_shopping_lists().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_name_with_null_character_is_rejected() {
    let app = TestApp::new();
    let list = app.given_list("Dairy").await;

    let create = app.post_json(LISTS, &json!({"name": "Da\u{0}iry"})).await;
    assert_eq!(create.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        create.body,
        json!({"name": ["Null characters are not allowed."]})
    );

    let rename = app
        .patch_json(&list_url(list.id), &json!({"name": "Milk\u{0}"}))
        .await;
    assert_eq!(rename.status, StatusCode::BAD_REQUEST);

    let lists = app.repository().list_shopping_lists().await.unwrap();
    assert_eq!(lists.len(), 1);
    assert_eq!(lists[0].name.as_str(), "Dairy");
}

#[tokio::test]
async fn test_client_supplied_id_is_ignored() {
    let app = TestApp::new();

    let resp = app.post_json(LISTS, &json!({"id": 999, "name": "Toys"})).await;

    assert_eq!(resp.status, StatusCode::CREATED);
    assert_eq!(resp.body["id"], 1);
}

#[tokio::test]
async fn test_ids_are_unique_and_not_reused() {
    let app = TestApp::new();

    let first = app.post_json(LISTS, &json!({"name": "A"})).await;
    let second = app.post_json(LISTS, &json!({"name": "B"})).await;
    assert_ne!(first.body["id"], second.body["id"]);

    app.delete(&list_url(&second.body["id"])).await;
    let third = app.post_json(LISTS, &json!({"name": "C"})).await;
    assert_ne!(third.body["id"], second.body["id"]);
}

// ============================================================================
// List & Retrieve
// ============================================================================

#[tokio::test]
async fn test_all_shopping_lists_are_listed() {
    let app = TestApp::new();
    app.given_list("Dairy").await;
    app.given_list("Toys").await;

    let resp = app.get(LISTS).await;

    assert_eq!(resp.status, StatusCode::OK);
    let lists: Vec<ShoppingListView> = serde_json::from_value(resp.body).unwrap();
    assert_eq!(lists.len(), 2);
    assert_eq!(lists[0].name, "Dairy");
    assert_eq!(lists[1].name, "Toys");
}

#[tokio::test]
async fn test_empty_collection_is_empty_array() {
    let app = TestApp::new();

    let resp = app.get(LISTS).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, json!([]));
}

#[tokio::test]
async fn test_shopping_list_retrieved_by_id() {
    let app = TestApp::new();
    let list = app.given_list("Food").await;

    let resp = app.get(&list_url(list.id)).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.body,
        json!({"id": list.id.as_i32(), "name": "Food", "shopping_items": []})
    );
}

#[tokio::test]
async fn test_shopping_list_includes_only_corresponding_items() {
    let app = TestApp::new();
    let drinks = app.given_list("Drinks").await;
    let games = app.given_list("Games").await;
    app.given_item(drinks.id, "Soda", false).await;
    app.given_item(drinks.id, "Coconut Water", false).await;
    app.given_item(games.id, "GTA", false).await;

    let resp = app.get(&list_url(drinks.id)).await;

    assert_eq!(resp.status, StatusCode::OK);
    let detail: ShoppingListDetailView = serde_json::from_value(resp.body).unwrap();
    assert_eq!(detail.shopping_items.len(), 2);
    assert_eq!(detail.shopping_items[0].name, "Soda");
    assert_eq!(detail.shopping_items[1].name, "Coconut Water");
}

#[tokio::test]
async fn test_unknown_list_is_not_found() {
    let app = TestApp::new();

    let resp = app.get(&list_url(42)).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, json!({"detail": "Not found."}));
}

#[tokio::test]
async fn test_non_numeric_list_id_is_not_found() {
    let app = TestApp::new();

    let resp = app.get(&list_url("abc")).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, json!({"detail": "Not found."}));
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_shopping_list_name_is_changed() {
    let app = TestApp::new();
    let list = app.given_list("Toys").await;

    let resp = app.put_json(&list_url(list.id), &json!({"name": "Drinks"})).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["name"], "Drinks");
    assert_eq!(resp.body["shopping_items"], json!([]));

    let stored = app.repository().get_shopping_list(list.id).await.unwrap().unwrap();
    assert_eq!(stored.name.as_str(), "Drinks");
}

#[tokio::test]
async fn test_shopping_list_not_changed_because_name_missing() {
    let app = TestApp::new();
    let list = app.given_list("Cloth").await;

    let resp = app
        .put_json(&list_url(list.id), &json!({"not_a_name": "something"}))
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, json!({"name": ["This field is required."]}));

    let stored = app.repository().get_shopping_list(list.id).await.unwrap().unwrap();
    assert_eq!(stored.name.as_str(), "Cloth");
}

#[tokio::test]
async fn test_shopping_list_name_changed_with_partial_update() {
    let app = TestApp::new();
    let list = app.given_list("Electrical appliances").await;

    let resp = app.patch_json(&list_url(list.id), &json!({"name": "Glass"})).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["name"], "Glass");
}

#[tokio::test]
async fn test_partial_update_without_known_fields_has_no_effect() {
    let app = TestApp::new();
    let list = app.given_list("Groceries").await;
    app.given_item(list.id, "Bread", false).await;

    let resp = app
        .patch_json(&list_url(list.id), &json!({"somethingelse": "notaname"}))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body["name"], "Groceries");
    assert_eq!(resp.body["shopping_items"][0]["name"], "Bread");
}

#[tokio::test]
async fn test_update_of_unknown_list_is_not_found() {
    let app = TestApp::new();

    let put = app.put_json(&list_url(7), &json!({"name": "Nope"})).await;
    assert_eq!(put.status, StatusCode::NOT_FOUND);

    // An invalid body does not hide the missing list
    let patch = app.patch_json(&list_url(7), &json!({"name": ""})).await;
    assert_eq!(patch.status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_shopping_list_is_deleted() {
    let app = TestApp::new();
    let list = app.given_list("Dairy").await;

    let resp = app.delete(&list_url(list.id)).await;

    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert!(resp.text.is_empty());
    assert_eq!(app.get(&list_url(list.id)).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_list_cascades_to_items() {
    let app = TestApp::new();
    let list = app.given_list("Drinks").await;
    let other = app.given_list("Games").await;
    let soda = app.given_item(list.id, "Soda", false).await;
    let juice = app.given_item(list.id, "Juice", true).await;
    let game = app.given_item(other.id, "GTA", false).await;

    let resp = app.delete(&list_url(list.id)).await;

    assert_eq!(resp.status, StatusCode::NO_CONTENT);
    assert_eq!(app.repository().item_count().await, 1);
    for item in [soda, juice] {
        assert_eq!(
            app.get(&item_url(list.id, item.id)).await.status,
            StatusCode::NOT_FOUND
        );
    }
    assert_eq!(
        app.get(&item_url(other.id, game.id)).await.status,
        StatusCode::OK
    );
}

#[tokio::test]
async fn test_delete_of_unknown_list_is_not_found() {
    let app = TestApp::new();

    let resp = app.delete(&list_url(3)).await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}
