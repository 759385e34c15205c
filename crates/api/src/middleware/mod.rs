//! HTTP middleware stack for the API.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (`http_request` span with status and latency)
//! 3. Request ID (read or generate `x-request-id`, echo it on the response)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
