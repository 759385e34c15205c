//! Request body validation.
//!
//! Bodies arrive as a JSON object (see [`JsonObject`](super::extract::JsonObject))
//! and are checked field by field so that every problem in a request is
//! reported at once. Unknown keys, including `id` and `shopping_list`, are
//! ignored.
//!
//! | Field value      | Create / full update      | Partial update            |
//! |------------------|---------------------------|---------------------------|
//! | absent           | "This field is required." | kept                      |
//! | `null`           | "This field may not be null." | same                  |
//! | blank name       | "This field may not be blank." | same                 |
//! | name with `\0`   | "Null characters are not allowed." | same             |
//! | wrong type       | type error                | same                      |

use serde_json::{Map, Value};

use shopping_list_core::validation::{FIELD_NULL, FIELD_REQUIRED, INVALID_BOOLEAN, INVALID_STRING};
use shopping_list_core::{Name, Patch, ValidationErrors};

use crate::models::{NewShoppingItem, ShoppingItemChanges, ShoppingListChanges};

/// Whether absent fields are an error (`Full`) or left unchanged (`Partial`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Full,
    Partial,
}

/// Validate the body of a list creation.
///
/// # Errors
///
/// Returns field errors if `name` is missing, null, blank or not text.
pub fn new_shopping_list(body: &Map<String, Value>) -> Result<Name, ValidationErrors> {
    let mut form = FormReader::new(body, WriteMode::Full);
    let name = form.name("name");
    form.finish_required(name)
}

/// Validate the body of a list update.
///
/// # Errors
///
/// Returns field errors for invalid fields, or for absent ones in `Full` mode.
pub fn shopping_list_changes(
    body: &Map<String, Value>,
    mode: WriteMode,
) -> Result<ShoppingListChanges, ValidationErrors> {
    let mut form = FormReader::new(body, mode);
    let name = form.name("name");
    form.finish(ShoppingListChanges { name })
}

/// Validate the body of an item creation.
///
/// # Errors
///
/// Returns field errors unless both `name` and `purchased` are valid.
pub fn new_shopping_item(body: &Map<String, Value>) -> Result<NewShoppingItem, ValidationErrors> {
    let mut form = FormReader::new(body, WriteMode::Full);
    let name = form.name("name");
    let purchased = form.boolean("purchased");

    let item = name
        .zip(purchased)
        .map(|(name, purchased)| NewShoppingItem { name, purchased });
    form.finish_required(item)
}

/// Validate the body of an item update.
///
/// # Errors
///
/// Returns field errors for invalid fields, or for absent ones in `Full` mode.
pub fn shopping_item_changes(
    body: &Map<String, Value>,
    mode: WriteMode,
) -> Result<ShoppingItemChanges, ValidationErrors> {
    let mut form = FormReader::new(body, mode);
    let name = form.name("name");
    let purchased = form.boolean("purchased");
    form.finish(ShoppingItemChanges { name, purchased })
}

// =============================================================================
// Field Parsing
// =============================================================================

/// Reads typed fields out of a body, collecting errors as it goes.
struct FormReader<'a> {
    body: &'a Map<String, Value>,
    mode: WriteMode,
    errors: ValidationErrors,
}

impl<'a> FormReader<'a> {
    fn new(body: &'a Map<String, Value>, mode: WriteMode) -> Self {
        Self {
            body,
            mode,
            errors: ValidationErrors::new(),
        }
    }

    fn name(&mut self, key: &str) -> Option<Name> {
        self.read(key, |value| {
            let text = text_value(value)?;
            Name::parse(&text).map_err(|e| e.to_string())
        })
    }

    fn boolean(&mut self, key: &str) -> Option<bool> {
        self.read(key, boolean_value)
    }

    fn read<T>(&mut self, key: &str, parse: impl FnOnce(&Value) -> Result<T, String>) -> Option<T> {
        match field(self.body, key).try_map(parse) {
            Ok(Patch::Value(value)) => Some(value),
            Ok(Patch::Null) => {
                self.errors.add(key, FIELD_NULL);
                None
            }
            Ok(Patch::Unset) => {
                if self.mode == WriteMode::Full {
                    self.errors.add(key, FIELD_REQUIRED);
                }
                None
            }
            Err(message) => {
                self.errors.add(key, message);
                None
            }
        }
    }

    fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        self.errors.into_result(value)
    }

    /// Like `finish`, for values that only exist when every field was valid.
    fn finish_required<T>(self, value: Option<T>) -> Result<T, ValidationErrors> {
        match value {
            Some(value) => self.finish(value),
            None => Err(self.errors),
        }
    }
}

/// Look up a field, keeping absent and `null` apart.
fn field<'a>(body: &'a Map<String, Value>, key: &str) -> Patch<&'a Value> {
    match body.get(key) {
        None => Patch::Unset,
        Some(Value::Null) => Patch::Null,
        Some(value) => Patch::Value(value),
    }
}

/// Text fields accept strings and numbers; numbers keep their JSON spelling.
fn text_value(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(INVALID_STRING.to_string()),
    }
}

/// Boolean fields accept JSON booleans, 0/1 and the usual yes/no spellings.
fn boolean_value(value: &Value) -> Result<bool, String> {
    let parsed = match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Some(true),
            Some(0) => Some(false),
            _ => None,
        },
        Value::String(s) => match s.to_ascii_lowercase().as_str() {
            "true" | "t" | "yes" | "y" | "on" | "1" => Some(true),
            "false" | "f" | "no" | "n" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    };
    parsed.ok_or_else(|| INVALID_BOOLEAN.to_string())
}
