//! Request extractors that reject with API-shaped errors.

use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{HeaderMap, StatusCode, header, request::Parts},
};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use shopping_list_core::ValidationErrors;

use crate::error::AppError;

/// A request body that must be a JSON object.
///
/// - An empty body reads as `{}`.
/// - A body over the router's size limit is rejected with 413.
/// - A non-empty body without a JSON content type is rejected with 415.
/// - Malformed JSON is rejected with 400 `{"detail": ...}`.
/// - Any JSON value other than an object is rejected with 400
///   `{"non_field_errors": [...]}`.
#[derive(Debug, Clone, Default)]
pub struct JsonObject(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| {
                if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                    AppError::PayloadTooLarge(rejection.body_text())
                } else {
                    AppError::BadRequest(rejection.body_text())
                }
            })?;

        if bytes.is_empty() {
            return Ok(Self::default());
        }

        if !is_json {
            return Err(AppError::UnsupportedMediaType(
                "Expected request with `Content-Type: application/json`".to_string(),
            ));
        }

        let value: Value = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("JSON parse error - {e}")))?;

        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ValidationErrors::non_field(format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(&other)
            ))
            .into()),
        }
    }
}

/// `application/json`, with or without parameters, or any `+json` suffix type.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

const fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}

/// Path parameters that answer 404 instead of 400 when they fail to parse.
///
/// `/shopping-lists/abc/` names no resource, so it is reported the same way
/// as an unknown numeric ID.
#[derive(Debug, Clone, Copy)]
pub struct ResourcePath<T>(pub T);

impl<T, S> FromRequestParts<S> for ResourcePath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(%rejection, "Unresolvable resource path");
                Err(AppError::NotFound)
            }
        }
    }
}
