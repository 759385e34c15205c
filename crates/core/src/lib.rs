//! Shopping List Core - Shared domain types.
//!
//! This crate provides the types shared by the API server, the CLI and the
//! integration tests:
//! - `api` - HTTP/JSON service for shopping lists and their items
//! - `cli` - Migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and validation rules - no I/O, no
//! database access, no HTTP. Database encoding for IDs and names is available
//! behind the `postgres` feature.
//!
//! # Modules
//!
//! - [`types`] - Typed IDs, validated names, tri-state patches and field errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
