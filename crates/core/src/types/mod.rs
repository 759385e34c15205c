//! Core types for the shopping list domain.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod name;
pub mod patch;
pub mod validation;

pub use id::*;
pub use name::{Name, NameError};
pub use patch::Patch;
pub use validation::{NON_FIELD_ERRORS, ValidationErrors};
