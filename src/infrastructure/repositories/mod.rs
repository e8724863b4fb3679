//! Repository Implementations
//!
//! Concrete implementations of the repository traits defined in the domain
//! layer.
//!
//! ## Available Repositories
//!
//! - **PgPersonRepository** - `persons` table, unique on full name
//! - **PgPetRepository** - `pets` table, owner enforced by foreign key
//! - **PgUserRepository** - `users` table for API credentials
//! - **memory** - process-local stores with the same constraints, used by
//!   tests through `AppState::in_memory`
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::{PgPersonRepository, PgPetRepository};
//!
//! async fn setup_repositories(pool: PgPool) {
//!     let person_repo = PgPersonRepository::new(pool.clone());
//!     let pet_repo = PgPetRepository::new(pool);
//! }
//! ```

pub mod memory;
pub mod person_repository;
pub mod pet_repository;
pub mod user_repository;

pub use memory::{InMemoryPersonRepository, InMemoryPetRepository, InMemoryStore, InMemoryUserRepository};
pub use person_repository::PgPersonRepository;
pub use pet_repository::PgPetRepository;
pub use user_repository::PgUserRepository;
