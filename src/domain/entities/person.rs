//! Person entity and repository trait.
//!
//! Maps to the `persons` table in the database schema.

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::BoxStream;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// A registered person.
///
/// Maps to the `persons` table:
/// - id: UUID PRIMARY KEY
/// - first_name, last_name: TEXT NOT NULL, UNIQUE together
/// - date_of_birth: DATE NOT NULL
/// - street: TEXT NOT NULL
/// - house_number: INTEGER NOT NULL
/// - house_number_additions: TEXT NULL
/// - postal_code, city, country: TEXT NOT NULL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Assigned by the store on first persistence
    pub id: Option<Uuid>,

    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub street: String,
    pub house_number: i32,
    pub house_number_additions: Option<String>,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Repository trait for Person data access operations.
#[async_trait]
pub trait PersonRepository: Send + Sync {
    /// Find a person by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, AppError>;

    /// Stream every stored person in store order.
    fn find_all(&self) -> BoxStream<'_, Result<Person, AppError>>;

    /// Find the person with exactly this first and last name.
    async fn find_by_full_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Person>, AppError>;

    /// Find the first person with this first name.
    async fn find_first_by_first_name(&self, first_name: &str) -> Result<Option<Person>, AppError>;

    /// Find the first person with this last name.
    async fn find_first_by_last_name(&self, last_name: &str) -> Result<Option<Person>, AppError>;

    /// Check whether a person with this full name exists.
    async fn exists_by_full_name(&self, first_name: &str, last_name: &str) -> Result<bool, AppError>;

    /// Check whether a person with this id exists.
    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError>;

    /// Insert a new person, assigning an id when it has none.
    ///
    /// Fails with `AppError::Conflict` when the full name is already taken.
    async fn create(&self, person: &Person) -> Result<Person, AppError>;

    /// Overwrite an existing person.
    async fn update(&self, person: &Person) -> Result<Person, AppError>;

    /// Delete a person by id.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError>;

    /// Delete every person along with the pets they own. Unowned pets stay.
    async fn delete_all(&self) -> Result<(), AppError>;
}
