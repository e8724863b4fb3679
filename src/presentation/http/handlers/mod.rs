//! HTTP Handlers
//!
//! Request handlers for all HTTP endpoints.

pub mod health;
pub mod person;
pub mod pet;
