//! Pet Repository Implementation
//!
//! PostgreSQL implementation of the PetRepository trait.

use async_trait::async_trait;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Pet, PetRepository};
use crate::shared::error::AppError;

/// Database row representation of the pets table.
#[derive(Debug, sqlx::FromRow)]
struct PetRow {
    id: Uuid,
    name: String,
    age: i32,
    person_id: Option<Uuid>,
}

impl PetRow {
    fn into_pet(self) -> Pet {
        Pet {
            id: Some(self.id),
            name: self.name,
            age: self.age,
            person_id: self.person_id,
        }
    }
}

/// PostgreSQL pet repository implementation.
#[derive(Clone)]
pub struct PgPetRepository {
    pool: PgPool,
}

impl PgPetRepository {
    /// Create a new PgPetRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PetRepository for PgPetRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, AppError> {
        let row = sqlx::query_as::<_, PetRow>("SELECT id, name, age, person_id FROM pets WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PetRow::into_pet))
    }

    fn find_all(&self) -> BoxStream<'_, Result<Pet, AppError>> {
        sqlx::query_as::<_, PetRow>("SELECT id, name, age, person_id FROM pets ORDER BY created_at, id")
            .fetch(&self.pool)
            .map_ok(PetRow::into_pet)
            .map_err(AppError::from)
            .boxed()
    }

    fn find_by_person_id(&self, person_id: Uuid) -> BoxStream<'_, Result<Pet, AppError>> {
        sqlx::query_as::<_, PetRow>(
            r#"
            SELECT id, name, age, person_id
            FROM pets
            WHERE person_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(person_id)
        .fetch(&self.pool)
        .map_ok(PetRow::into_pet)
        .map_err(AppError::from)
        .boxed()
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM pets WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn create(&self, pet: &Pet) -> Result<Pet, AppError> {
        let id = pet.id.unwrap_or_else(Uuid::new_v4);

        let row = sqlx::query_as::<_, PetRow>(
            r#"
            INSERT INTO pets (id, name, age, person_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, age, person_id
            "#,
        )
        .bind(id)
        .bind(&pet.name)
        .bind(pet.age)
        .bind(pet.person_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::BadRequest(format!(
                    "Owner {} does not exist",
                    pet.person_id.map(|p| p.to_string()).unwrap_or_default()
                ))
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_pet())
    }

    async fn update(&self, pet: &Pet) -> Result<Pet, AppError> {
        let id = pet
            .id
            .ok_or_else(|| AppError::Internal("Cannot update a pet that was never stored".into()))?;

        let row = sqlx::query_as::<_, PetRow>(
            r#"
            UPDATE pets
            SET name = $2,
                age = $3,
                person_id = $4
            WHERE id = $1
            RETURNING id, name, age, person_id
            "#,
        )
        .bind(id)
        .bind(&pet.name)
        .bind(pet.age)
        .bind(pet.person_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Pet with id {} not found", id)))?;

        Ok(row.into_pet())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM pets WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Pet with id {} not found", id)));
        }

        Ok(())
    }

    async fn delete_all(&self) -> Result<(), AppError> {
        sqlx::query("DELETE FROM pets").execute(&self.pool).await?;
        Ok(())
    }
}
