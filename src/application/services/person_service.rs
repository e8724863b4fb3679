//! Person Service
//!
//! Registration, lookup and address changes for people. Enforces that no two
//! people share the same first and last name.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use uuid::Uuid;

use crate::application::dto::{PersonRequest, PersonResponse, UpdateAddressRequest};
use crate::application::mapper;
use crate::domain::PersonRepository;
use crate::shared::error::AppError;

pub const DUPLICATE_FULL_NAME: &str = "Another person with the same full name is already registered";
pub const NAME_REQUIRED: &str = "firstName and lastName can't both be empty.";

/// Person service trait
#[async_trait]
pub trait PersonService: Send + Sync {
    /// Register a new person and return the assigned id
    async fn create_person(&self, request: PersonRequest) -> Result<Uuid, PersonError>;

    /// Find a person by first name, last name, or both
    async fn find_person_by_name(
        &self,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<PersonResponse, PersonError>;

    /// Stream every registered person
    fn get_all_people(&self) -> BoxStream<'_, Result<PersonResponse, PersonError>>;

    /// Get a person by id
    async fn get_person_by_id(&self, id: Uuid) -> Result<PersonResponse, PersonError>;

    /// Replace the address of a person
    async fn update_person_address(
        &self,
        id: Uuid,
        request: UpdateAddressRequest,
    ) -> Result<(), PersonError>;
}

/// Person service errors
#[derive(Debug, thiserror::Error)]
pub enum PersonError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{0}")]
    DuplicateResource(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Store(#[from] AppError),
}

impl PersonError {
    fn not_found_by_id(id: Uuid) -> Self {
        Self::NotFound(format!("No person found with ID {}", id))
    }
}

impl From<PersonError> for AppError {
    fn from(err: PersonError) -> Self {
        match err {
            PersonError::InvalidArgument(msg) | PersonError::DuplicateResource(msg) => {
                AppError::BadRequest(msg)
            }
            PersonError::NotFound(msg) => AppError::NotFound(msg),
            PersonError::Store(e) => e,
        }
    }
}

/// PersonService implementation
pub struct PersonServiceImpl<P>
where
    P: PersonRepository,
{
    person_repo: Arc<P>,
}

impl<P> PersonServiceImpl<P>
where
    P: PersonRepository,
{
    pub fn new(person_repo: Arc<P>) -> Self {
        Self { person_repo }
    }
}

#[async_trait]
impl<P> PersonService for PersonServiceImpl<P>
where
    P: PersonRepository + 'static,
{
    async fn create_person(&self, request: PersonRequest) -> Result<Uuid, PersonError> {
        let exists = self
            .person_repo
            .exists_by_full_name(&request.first_name, &request.last_name)
            .await?;

        if exists {
            tracing::debug!(
                first_name = %request.first_name,
                last_name = %request.last_name,
                "Rejected duplicate person"
            );
            return Err(PersonError::DuplicateResource(DUPLICATE_FULL_NAME.into()));
        }

        // The unique constraint catches a concurrent insert that slipped past the check
        let person = self
            .person_repo
            .create(&mapper::to_person(request))
            .await
            .map_err(|e| match e {
                AppError::Conflict(_) => PersonError::DuplicateResource(DUPLICATE_FULL_NAME.into()),
                e => PersonError::Store(e),
            })?;

        person
            .id
            .ok_or_else(|| AppError::Internal("Store returned a person without an id".into()).into())
    }

    async fn find_person_by_name(
        &self,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<PersonResponse, PersonError> {
        let person = match (first_name, last_name) {
            (None, None) => return Err(PersonError::InvalidArgument(NAME_REQUIRED.into())),
            (Some(first), Some(last)) => self.person_repo.find_by_full_name(first, last).await?,
            (Some(first), None) => self.person_repo.find_first_by_first_name(first).await?,
            (None, Some(last)) => self.person_repo.find_first_by_last_name(last).await?,
        };

        person.map(mapper::to_person_response).ok_or_else(|| {
            PersonError::NotFound(format!(
                "No person found with name: {} {}",
                first_name.unwrap_or("null"),
                last_name.unwrap_or("null")
            ))
        })
    }

    fn get_all_people(&self) -> BoxStream<'_, Result<PersonResponse, PersonError>> {
        self.person_repo
            .find_all()
            .map_ok(mapper::to_person_response)
            .map_err(PersonError::from)
            .boxed()
    }

    async fn get_person_by_id(&self, id: Uuid) -> Result<PersonResponse, PersonError> {
        self.person_repo
            .find_by_id(id)
            .await?
            .map(mapper::to_person_response)
            .ok_or_else(|| PersonError::not_found_by_id(id))
    }

    async fn update_person_address(
        &self,
        id: Uuid,
        request: UpdateAddressRequest,
    ) -> Result<(), PersonError> {
        let person = self
            .person_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| PersonError::not_found_by_id(id))?;

        self.person_repo
            .update(&mapper::apply_address_update(person, request))
            .await?;

        Ok(())
    }
}
