//! Field-level validation errors.
//!
//! Errors are keyed by field name and serialize as
//! `{"name": ["This field is required."]}`. Problems that do not belong to a
//! single field are reported under [`NON_FIELD_ERRORS`].

use std::collections::BTreeMap;

use serde::Serialize;

/// Key used for errors that are not tied to a specific field.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

/// Message for a required field that was not supplied.
pub const FIELD_REQUIRED: &str = "This field is required.";

/// Message for a field sent as `null`.
pub const FIELD_NULL: &str = "This field may not be null.";

/// Message for a text field holding a non-text value.
pub const INVALID_STRING: &str = "Not a valid string.";

/// Message for a boolean field holding a non-boolean value.
pub const INVALID_BOOLEAN: &str = "Must be a valid boolean.";

/// Collected validation failures for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("{}", summarize(.0))]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Create an empty error set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error set holding a single non-field error.
    #[must_use]
    pub fn non_field(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(NON_FIELD_ERRORS, message);
        errors
    }

    /// Record an error message against a field.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    /// Returns `true` if no errors have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded against a field, if any.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Iterate over `(field, messages)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Returns `Ok(value)` if no errors were recorded, otherwise `Err(self)`.
    ///
    /// # Errors
    ///
    /// Returns `self` when at least one error was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

/// `field: message` pairs joined with `; `.
fn summarize(errors: &BTreeMap<String, Vec<String>>) -> String {
    errors
        .iter()
        .flat_map(|(field, messages)| messages.iter().map(move |m| format!("{field}: {m}")))
        .collect::<Vec<_>>()
        .join("; ")
}
