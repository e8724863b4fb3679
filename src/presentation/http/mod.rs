//! HTTP API
//!
//! Router, handlers and request extractors for the `/v1` REST API.

pub mod extractors;
pub mod handlers;
pub mod routes;
