//! # Pet Registry Library
//!
//! A registry of people and the pets they own, served as a JSON HTTP API:
//! - Person registration, search by name and address changes
//! - Pet registration with owner validation
//! - HTTP Basic authentication for administrator-only operations
//! - PostgreSQL storage with an in-memory alternative for tests
//!
//! ## Architecture
//!
//! - **Domain Layer**: Entities and repository traits
//! - **Application Layer**: Services, DTOs and the mapping between them
//! - **Infrastructure Layer**: Database, repositories and metrics
//! - **Presentation Layer**: HTTP handlers and middleware
//!
//! ## Module Structure
//!
//! ```text
//! pet_registry/
//! +-- config/         Configuration management
//! +-- domain/         Entities and repository traits
//! +-- application/    Services, DTOs, mapper
//! +-- infrastructure/ PostgreSQL, in-memory store, metrics
//! +-- presentation/   HTTP routes, handlers, middleware
//! +-- shared/         Errors and validation helpers
//! ```

pub mod config;

pub mod domain;

pub mod application;

pub mod infrastructure;

pub mod presentation;

pub mod shared;

pub mod startup;

pub mod telemetry;
