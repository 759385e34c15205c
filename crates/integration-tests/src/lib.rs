//! Integration tests for the shopping list API.
//!
//! Tests drive the full axum router in-process with
//! `tower::ServiceExt::oneshot`, backed by the in-memory repository, so no
//! database or running server is needed.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopping-list-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Method, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

use shopping_list_api::db::{MemoryShoppingRepository, ShoppingRepository};
use shopping_list_api::models::{NewShoppingItem, ShoppingItem, ShoppingList};
use shopping_list_api::state::AppState;
use shopping_list_core::{Name, ShoppingListId};

/// A response with its body decoded.
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Raw body text.
    pub text: String,
    /// Body parsed as JSON, or `Value::Null` if empty or not JSON.
    pub body: Value,
}

/// The API router wired to a fresh in-memory repository.
pub struct TestApp {
    router: Router,
    repository: Arc<MemoryShoppingRepository>,
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

impl TestApp {
    /// Create an app with empty storage.
    #[must_use]
    pub fn new() -> Self {
        let repository = Arc::new(MemoryShoppingRepository::new());
        let state = AppState::new(repository.clone());
        Self {
            router: shopping_list_api::app(state),
            repository,
        }
    }

    /// Direct access to storage, for arranging data and checking effects.
    #[must_use]
    pub fn repository(&self) -> &MemoryShoppingRepository {
        &self.repository
    }

    /// Insert a list without going through HTTP.
    pub async fn given_list(&self, name: &str) -> ShoppingList {
        self.repository
            .create_shopping_list(Name::parse(name).expect("valid list name"))
            .await
            .expect("Failed to create list")
    }

    /// Insert an item without going through HTTP.
    pub async fn given_item(
        &self,
        list_id: ShoppingListId,
        name: &str,
        purchased: bool,
    ) -> ShoppingItem {
        let item = NewShoppingItem {
            name: Name::parse(name).expect("valid item name"),
            purchased,
        };
        self.repository
            .create_shopping_item(list_id, item)
            .await
            .expect("Failed to create item")
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn patch_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(Method::PATCH, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    async fn send(&self, method: Method, uri: &str, body: Option<&Value>) -> TestResponse {
        let content_type = body.map(|_| "application/json");
        let body = body.map(Value::to_string).unwrap_or_default();
        self.send_raw(method, uri, content_type, body, &[]).await
    }

    /// Send a request with an arbitrary body, content type and extra headers.
    pub async fn send_raw(
        &self,
        method: Method,
        uri: &str,
        content_type: Option<&str>,
        body: impl Into<String>,
        extra_headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        for (name, value) in extra_headers {
            builder = builder.header(*name, *value);
        }
        let request = builder
            .body(Body::from(body.into()))
            .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router is infallible");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read response body");
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }
}

/// Path of the list collection.
pub const LISTS: &str = "/shopping-lists/";

/// Path of one list.
#[must_use]
pub fn list_url(id: impl std::fmt::Display) -> String {
    format!("/shopping-lists/{id}/")
}

/// Path for adding items to a list.
#[must_use]
pub fn add_item_url(list_id: impl std::fmt::Display) -> String {
    format!("/shopping-lists/{list_id}/items/")
}

/// Path of one item within a list.
#[must_use]
pub fn item_url(list_id: impl std::fmt::Display, item_id: impl std::fmt::Display) -> String {
    format!("/shopping-lists/{list_id}/items/{item_id}/")
}
