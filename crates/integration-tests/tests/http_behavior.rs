//! Integration tests for request handling shared by every endpoint.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use serde_json::json;

use shopping_list_api::db::ShoppingRepository;
use shopping_list_api::middleware::REQUEST_ID_HEADER;
use shopping_list_integration_tests::{LISTS, TestApp, add_item_url, list_url};

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let live = app.get("/health").await;
    assert_eq!(live.status, StatusCode::OK);
    assert_eq!(live.text, "ok");

    let ready = app.get("/health/ready").await;
    assert_eq!(ready.status, StatusCode::OK);
}

#[tokio::test]
async fn test_every_response_has_request_id() {
    let app = TestApp::new();

    let ok = app.get(LISTS).await;
    assert!(ok.headers.contains_key(REQUEST_ID_HEADER));

    let missing = app.get(&list_url(5)).await;
    assert!(missing.headers.contains_key(REQUEST_ID_HEADER));
}

#[tokio::test]
async fn test_request_id_is_propagated() {
    let app = TestApp::new();

    let resp = app
        .send_raw(Method::GET, LISTS, None, "", &[(REQUEST_ID_HEADER, "trace-abc")])
        .await;

    assert_eq!(resp.headers.get(REQUEST_ID_HEADER).unwrap(), "trace-abc");
}

#[tokio::test]
async fn test_non_object_body_is_rejected() {
    let app = TestApp::new();

    let resp = app.post_json(LISTS, &json!(["Dairy"])).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        resp.body,
        json!({"non_field_errors": ["Invalid data. Expected a dictionary, but got list."]})
    );
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let resp = app
        .send_raw(Method::POST, LISTS, Some("application/json"), "{\"name\":", &[])
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert!(resp.body["detail"].is_string());
}

#[tokio::test]
async fn test_body_without_json_content_type_is_unsupported() {
    let app = TestApp::new();

    let resp = app
        .send_raw(Method::POST, LISTS, Some("text/plain"), "{\"name\":\"Dairy\"}", &[])
        .await;

    assert_eq!(resp.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(resp.body["detail"].is_string());
}

#[tokio::test]
async fn test_empty_body_reads_as_empty_object() {
    let app = TestApp::new();

    let resp = app.send_raw(Method::POST, LISTS, None, "", &[]).await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, json!({"name": ["This field is required."]}));
}

#[tokio::test]
async fn test_unknown_path_is_json_not_found() {
    let app = TestApp::new();

    let resp = app.get("/shopping-items/").await;

    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, json!({"detail": "Not found."}));
}

#[tokio::test]
async fn test_unsupported_method_is_rejected() {
    let app = TestApp::new();

    let resp = app.delete(LISTS).await;
    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);

    let resp = app.get(&add_item_url(1)).await;
    assert_eq!(resp.status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_oversized_body_is_payload_too_large() {
    let app = TestApp::new();
    let body = format!(r#"{{"name": "{}"}}"#, "a".repeat(3 * 1024 * 1024));

    let resp = app
        .send_raw(Method::POST, LISTS, Some("application/json"), body, &[])
        .await;

    assert_eq!(resp.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(resp.body["detail"].is_string());
    assert!(app.repository().list_shopping_lists().await.unwrap().is_empty());
}
