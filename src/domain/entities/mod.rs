//! # Domain Entities
//!
//! Core domain entities of the registry.
//! All entities map directly to their corresponding database tables.
//!
//! - **Person**: A registered person with a postal address
//! - **Pet**: A pet, optionally owned by a person
//! - **User**: An operator account for the HTTP API
//!
//! ## Repository Traits
//!
//! Each entity has an associated repository trait defining data access operations.
//! These traits are implemented in the infrastructure layer, following the
//! dependency inversion principle.

mod person;
mod pet;
mod user;

pub use person::{Person, PersonRepository};
pub use pet::{Pet, PetRepository};
pub use user::{Role, User, UserRepository};
