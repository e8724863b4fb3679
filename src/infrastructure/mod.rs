//! Infrastructure Layer
//!
//! Contains implementations for external concerns:
//! - PostgreSQL pool and migrations
//! - Repository implementations (PostgreSQL and in-memory)
//! - Prometheus metrics

pub mod database;
pub mod metrics;
pub mod repositories;
