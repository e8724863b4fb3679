//! In-Memory Repository Implementations
//!
//! Process-local stores backing the repository traits. They enforce the same
//! constraints as the PostgreSQL schema (unique full name, existing owner,
//! unique username) and keep insertion order, so services behave the same
//! against either backend.

use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};
use parking_lot::RwLock;
use uuid::Uuid;

use crate::domain::{Person, PersonRepository, Pet, PetRepository, User, UserRepository};
use crate::shared::error::AppError;

#[derive(Debug, Default)]
struct Tables {
    persons: Vec<Person>,
    pets: Vec<Pet>,
    users: Vec<User>,
}

/// Shared handle to one set of in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person_count(&self) -> usize {
        self.tables.read().persons.len()
    }

    pub fn pet_count(&self) -> usize {
        self.tables.read().pets.len()
    }
}

/// In-memory person repository.
#[derive(Debug, Clone)]
pub struct InMemoryPersonRepository {
    store: InMemoryStore,
}

impl InMemoryPersonRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    fn find_first<F>(&self, predicate: F) -> Option<Person>
    where
        F: Fn(&Person) -> bool,
    {
        self.store.tables.read().persons.iter().find(|p| predicate(p)).cloned()
    }
}

#[async_trait]
impl PersonRepository for InMemoryPersonRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, AppError> {
        Ok(self.find_first(|p| p.id == Some(id)))
    }

    fn find_all(&self) -> BoxStream<'_, Result<Person, AppError>> {
        let snapshot = self.store.tables.read().persons.clone();
        stream::iter(snapshot.into_iter().map(Ok)).boxed()
    }

    async fn find_by_full_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Person>, AppError> {
        Ok(self.find_first(|p| p.first_name == first_name && p.last_name == last_name))
    }

    async fn find_first_by_first_name(&self, first_name: &str) -> Result<Option<Person>, AppError> {
        Ok(self.find_first(|p| p.first_name == first_name))
    }

    async fn find_first_by_last_name(&self, last_name: &str) -> Result<Option<Person>, AppError> {
        Ok(self.find_first(|p| p.last_name == last_name))
    }

    async fn exists_by_full_name(&self, first_name: &str, last_name: &str) -> Result<bool, AppError> {
        Ok(self
            .find_first(|p| p.first_name == first_name && p.last_name == last_name)
            .is_some())
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.find_first(|p| p.id == Some(id)).is_some())
    }

    async fn create(&self, person: &Person) -> Result<Person, AppError> {
        let mut tables = self.store.tables.write();

        let taken = tables
            .persons
            .iter()
            .any(|p| p.first_name == person.first_name && p.last_name == person.last_name);
        if taken {
            return Err(AppError::Conflict(format!(
                "A person named {} is already registered",
                person.full_name()
            )));
        }

        let stored = Person {
            id: Some(person.id.unwrap_or_else(Uuid::new_v4)),
            ..person.clone()
        };
        tables.persons.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, person: &Person) -> Result<Person, AppError> {
        let id = person
            .id
            .ok_or_else(|| AppError::Internal("Cannot update a person that was never stored".into()))?;

        let mut tables = self.store.tables.write();
        let slot = tables
            .persons
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))?;
        *slot = person.clone();
        Ok(person.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.store.tables.write();
        let before = tables.persons.len();
        tables.persons.retain(|p| p.id != Some(id));

        if tables.persons.len() == before {
            return Err(AppError::NotFound(format!("Person with id {} not found", id)));
        }
        Ok(())
    }

    /// Removes every person together with the pets they own.
    async fn delete_all(&self) -> Result<(), AppError> {
        let mut tables = self.store.tables.write();
        tables.pets.retain(|p| p.person_id.is_none());
        tables.persons.clear();
        Ok(())
    }
}

/// In-memory pet repository.
#[derive(Debug, Clone)]
pub struct InMemoryPetRepository {
    store: InMemoryStore,
}

impl InMemoryPetRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }

    fn snapshot<F>(&self, predicate: F) -> Vec<Pet>
    where
        F: Fn(&Pet) -> bool,
    {
        self.store
            .tables
            .read()
            .pets
            .iter()
            .filter(|p| predicate(p))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, AppError> {
        Ok(self.snapshot(|p| p.id == Some(id)).into_iter().next())
    }

    fn find_all(&self) -> BoxStream<'_, Result<Pet, AppError>> {
        stream::iter(self.snapshot(|_| true).into_iter().map(Ok)).boxed()
    }

    fn find_by_person_id(&self, person_id: Uuid) -> BoxStream<'_, Result<Pet, AppError>> {
        let pets = self.snapshot(|p| p.person_id == Some(person_id));
        stream::iter(pets.into_iter().map(Ok)).boxed()
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        Ok(self.store.tables.read().pets.iter().any(|p| p.id == Some(id)))
    }

    async fn create(&self, pet: &Pet) -> Result<Pet, AppError> {
        let mut tables = self.store.tables.write();

        if let Some(owner) = pet.person_id {
            if !tables.persons.iter().any(|p| p.id == Some(owner)) {
                return Err(AppError::BadRequest(format!("Owner {} does not exist", owner)));
            }
        }

        let stored = Pet {
            id: Some(pet.id.unwrap_or_else(Uuid::new_v4)),
            ..pet.clone()
        };
        tables.pets.push(stored.clone());
        Ok(stored)
    }

    async fn update(&self, pet: &Pet) -> Result<Pet, AppError> {
        let id = pet
            .id
            .ok_or_else(|| AppError::Internal("Cannot update a pet that was never stored".into()))?;

        let mut tables = self.store.tables.write();
        let slot = tables
            .pets
            .iter_mut()
            .find(|p| p.id == Some(id))
            .ok_or_else(|| AppError::NotFound(format!("Pet with id {} not found", id)))?;
        *slot = pet.clone();
        Ok(pet.clone())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        let mut tables = self.store.tables.write();
        let before = tables.pets.len();
        tables.pets.retain(|p| p.id != Some(id));

        if tables.pets.len() == before {
            return Err(AppError::NotFound(format!("Pet with id {} not found", id)));
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), AppError> {
        self.store.tables.write().pets.clear();
        Ok(())
    }
}

/// In-memory user repository.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: InMemoryStore,
}

impl InMemoryUserRepository {
    pub fn new(store: InMemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .store
            .tables
            .read()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let mut tables = self.store.tables.write();
        if tables.users.iter().any(|u| u.username == user.username) {
            return Err(AppError::Conflict("User with this username already exists".to_string()));
        }
        tables.users.push(user.clone());
        Ok(user.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use futures::TryStreamExt;

    fn person(first: &str, last: &str) -> Person {
        Person {
            id: None,
            first_name: first.into(),
            last_name: last.into(),
            date_of_birth: NaiveDate::from_ymd_opt(1985, 1, 1).unwrap(),
            street: "Croeselaan".into(),
            house_number: 18,
            house_number_additions: None,
            postal_code: "3521CB".into(),
            city: "Utrecht".into(),
            country: "Netherlands".into(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = InMemoryPersonRepository::new(InMemoryStore::new());
        let stored = repo.create(&person("Harm", "van der Wal")).await.unwrap();

        assert!(stored.id.is_some());
        assert_eq!(repo.find_by_id(stored.id.unwrap()).await.unwrap(), Some(stored));
    }

    #[tokio::test]
    async fn test_duplicate_full_name_conflicts() {
        let store = InMemoryStore::new();
        let repo = InMemoryPersonRepository::new(store.clone());
        repo.create(&person("Harm", "van der Wal")).await.unwrap();

        let result = repo.create(&person("Harm", "van der Wal")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
        assert_eq!(store.person_count(), 1);
    }

    #[tokio::test]
    async fn test_find_first_keeps_insertion_order() {
        let repo = InMemoryPersonRepository::new(InMemoryStore::new());
        let first = repo.create(&person("Harm", "van der Wal")).await.unwrap();
        repo.create(&person("Harm", "de Vries")).await.unwrap();

        let found = repo.find_first_by_first_name("Harm").await.unwrap();
        assert_eq!(found, Some(first));
    }

    #[tokio::test]
    async fn test_pet_with_unknown_owner_is_rejected() {
        let store = InMemoryStore::new();
        let repo = InMemoryPetRepository::new(store.clone());
        let pet = Pet {
            id: None,
            name: "Dog".into(),
            age: 3,
            person_id: Some(Uuid::new_v4()),
        };

        assert!(matches!(repo.create(&pet).await, Err(AppError::BadRequest(_))));
        assert_eq!(store.pet_count(), 0);
    }

    #[tokio::test]
    async fn test_find_by_person_id_filters() {
        let store = InMemoryStore::new();
        let persons = InMemoryPersonRepository::new(store.clone());
        let pets = InMemoryPetRepository::new(store);
        let owner = persons.create(&person("Harm", "van der Wal")).await.unwrap().id;

        for (name, person_id) in [("Dog", owner), ("Cat", None), ("Fish", owner)] {
            pets.create(&Pet { id: None, name: name.into(), age: 1, person_id })
                .await
                .unwrap();
        }

        let owned: Vec<Pet> = pets.find_by_person_id(owner.unwrap()).try_collect().await.unwrap();
        let names: Vec<&str> = owned.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Dog", "Fish"]);
    }

    #[tokio::test]
    async fn test_delete_missing_pet_is_not_found() {
        let repo = InMemoryPetRepository::new(InMemoryStore::new());
        assert!(matches!(
            repo.delete_by_id(Uuid::new_v4()).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_all_people_removes_their_pets() {
        let store = InMemoryStore::new();
        let persons = InMemoryPersonRepository::new(store.clone());
        let pets = InMemoryPetRepository::new(store.clone());
        let owner = persons.create(&person("Harm", "van der Wal")).await.unwrap().id;
        persons.create(&person("Anna", "de Vries")).await.unwrap();

        for (name, person_id) in [("Dog", owner), ("Cat", None)] {
            pets.create(&Pet { id: None, name: name.into(), age: 1, person_id })
                .await
                .unwrap();
        }

        persons.delete_all().await.unwrap();

        assert_eq!(store.person_count(), 0);
        let left: Vec<Pet> = pets.find_all().try_collect().await.unwrap();
        let names: Vec<&str> = left.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cat"]);
    }
}
