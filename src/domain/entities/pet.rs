//! Pet entity and repository trait.
//!
//! Maps to the `pets` table in the database schema.

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A registered pet, optionally owned by a person.
///
/// Maps to the `pets` table:
/// - id: UUID PRIMARY KEY
/// - name: TEXT NOT NULL
/// - age: INTEGER NOT NULL
/// - person_id: UUID NULL REFERENCES persons(id)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    /// Assigned by the store on first persistence
    pub id: Option<Uuid>,

    pub name: String,
    pub age: i32,

    /// Owning person; `None` means unowned
    pub person_id: Option<Uuid>,
}

/// Repository trait for Pet data access operations.
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, AppError>;

    fn find_all(&self) -> BoxStream<'_, Result<Pet, AppError>>;

    /// Stream the pets owned by a person.
    fn find_by_person_id(&self, person_id: Uuid) -> BoxStream<'_, Result<Pet, AppError>>;

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError>;

    /// Insert a new pet, assigning an id when it has none.
    ///
    /// Fails with `AppError::BadRequest` when the owner does not exist.
    async fn create(&self, pet: &Pet) -> Result<Pet, AppError>;

    async fn update(&self, pet: &Pet) -> Result<Pet, AppError>;

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError>;

    async fn delete_all(&self) -> Result<(), AppError>;
}
