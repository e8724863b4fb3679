//! Pet Service
//!
//! Registration and maintenance of pets. A pet may only be registered to a
//! person that exists at the time of registration.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use uuid::Uuid;

use crate::application::dto::{PetRequest, PetResponse};
use crate::application::mapper;
use crate::domain::{PersonRepository, PetRepository};
use crate::shared::error::AppError;

/// Pet service trait
#[async_trait]
pub trait PetService: Send + Sync {
    /// Register a pet and return the assigned id
    async fn create_pet(&self, request: PetRequest) -> Result<Uuid, PetError>;

    /// Remove a pet
    async fn delete_pet_by_id(&self, id: Uuid) -> Result<(), PetError>;

    /// Stream every registered pet
    fn get_all_pets(&self) -> BoxStream<'_, Result<PetResponse, PetError>>;

    /// Get a pet by id
    async fn get_pet_by_id(&self, id: Uuid) -> Result<PetResponse, PetError>;

    /// Stream the pets owned by a person; empty when there are none
    fn get_pets_by_person_id(&self, person_id: Uuid) -> BoxStream<'_, Result<PetResponse, PetError>>;

    /// Replace name and age of a pet
    async fn update_pet(&self, id: Uuid, request: PetRequest) -> Result<(), PetError>;
}

/// Pet service errors
#[derive(Debug, thiserror::Error)]
pub enum PetError {
    #[error("{0}")]
    InvalidReference(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl PetError {
    fn unknown_owner(person_id: Uuid) -> Self {
        Self::InvalidReference(format!(
            "No person with ID {} is registered; cannot register a pet to a non-existent person",
            person_id
        ))
    }

    fn not_found_by_id(id: Uuid) -> Self {
        Self::NotFound(format!("No pet found with ID {}", id))
    }
}

impl From<PetError> for AppError {
    fn from(err: PetError) -> Self {
        match err {
            PetError::InvalidReference(msg) => AppError::BadRequest(msg),
            PetError::NotFound(msg) => AppError::NotFound(msg),
            PetError::Store(e) => e,
        }
    }
}

/// PetService implementation
pub struct PetServiceImpl<T, P>
where
    T: PetRepository,
    P: PersonRepository,
{
    pet_repo: Arc<T>,
    person_repo: Arc<P>,
}

impl<T, P> PetServiceImpl<T, P>
where
    T: PetRepository,
    P: PersonRepository,
{
    pub fn new(pet_repo: Arc<T>, person_repo: Arc<P>) -> Self {
        Self {
            pet_repo,
            person_repo,
        }
    }
}

#[async_trait]
impl<T, P> PetService for PetServiceImpl<T, P>
where
    T: PetRepository + 'static,
    P: PersonRepository + 'static,
{
    async fn create_pet(&self, request: PetRequest) -> Result<Uuid, PetError> {
        if let Some(person_id) = request.person_id {
            if !self.person_repo.exists_by_id(person_id).await? {
                tracing::debug!(%person_id, "Rejected pet for unknown owner");
                return Err(PetError::unknown_owner(person_id));
            }
        }

        let owner = request.person_id;
        let pet = self
            .pet_repo
            .create(&mapper::to_pet(request))
            .await
            .map_err(|e| match (e, owner) {
                // Owner removed between the check and the insert
                (AppError::BadRequest(_), Some(person_id)) => PetError::unknown_owner(person_id),
                (e, _) => PetError::Store(e),
            })?;

        pet.id
            .ok_or_else(|| AppError::Internal("Store returned a pet without an id".into()).into())
    }

    async fn delete_pet_by_id(&self, id: Uuid) -> Result<(), PetError> {
        if !self.pet_repo.exists_by_id(id).await? {
            return Err(PetError::not_found_by_id(id));
        }

        self.pet_repo.delete_by_id(id).await?;
        Ok(())
    }

    fn get_all_pets(&self) -> BoxStream<'_, Result<PetResponse, PetError>> {
        self.pet_repo
            .find_all()
            .map_ok(mapper::to_pet_response)
            .map_err(PetError::from)
            .boxed()
    }

    async fn get_pet_by_id(&self, id: Uuid) -> Result<PetResponse, PetError> {
        self.pet_repo
            .find_by_id(id)
            .await?
            .map(mapper::to_pet_response)
            .ok_or_else(|| PetError::not_found_by_id(id))
    }

    fn get_pets_by_person_id(&self, person_id: Uuid) -> BoxStream<'_, Result<PetResponse, PetError>> {
        self.pet_repo
            .find_by_person_id(person_id)
            .map_ok(mapper::to_pet_response)
            .map_err(PetError::from)
            .boxed()
    }

    async fn update_pet(&self, id: Uuid, request: PetRequest) -> Result<(), PetError> {
        let pet = self
            .pet_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| PetError::not_found_by_id(id))?;

        // Ownership is intentionally not re-validated: only name and age change
        self.pet_repo
            .update(&mapper::apply_pet_update(pet, request))
            .await?;

        Ok(())
    }
}
