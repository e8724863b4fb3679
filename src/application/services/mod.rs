//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **PersonService**: Person registration, search and address changes
//! - **PetService**: Pet registration with owner validation
//! - **AuthService**: HTTP Basic credential checks and admin bootstrap

pub mod auth_service;
pub mod person_service;
pub mod pet_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl};
pub use person_service::{PersonError, PersonService, PersonServiceImpl};
pub use pet_service::{PetError, PetService, PetServiceImpl};
