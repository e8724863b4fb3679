//! Person Repository Implementation
//!
//! PostgreSQL implementation of the PersonRepository trait.

use async_trait::async_trait;
use chrono::NaiveDate;
use futures::stream::{BoxStream, StreamExt, TryStreamExt};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Person, PersonRepository};
use crate::shared::error::AppError;

/// Database row representation of the persons table.
#[derive(Debug, sqlx::FromRow)]
struct PersonRow {
    id: Uuid,
    first_name: String,
    last_name: String,
    date_of_birth: NaiveDate,
    street: String,
    house_number: i32,
    house_number_additions: Option<String>,
    postal_code: String,
    city: String,
    country: String,
}

impl PersonRow {
    fn into_person(self) -> Person {
        Person {
            id: Some(self.id),
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            street: self.street,
            house_number: self.house_number,
            house_number_additions: self.house_number_additions,
            postal_code: self.postal_code,
            city: self.city,
            country: self.country,
        }
    }
}

const PERSON_COLUMNS: &str = "id, first_name, last_name, date_of_birth, street, house_number, \
                              house_number_additions, postal_code, city, country";

/// PostgreSQL person repository implementation.
#[derive(Clone)]
pub struct PgPersonRepository {
    pool: PgPool,
}

impl PgPersonRepository {
    /// Create a new PgPersonRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, predicate: &str, values: &[&str]) -> Result<Option<Person>, AppError> {
        let sql = format!(
            "SELECT {} FROM persons WHERE {} ORDER BY created_at, id LIMIT 1",
            PERSON_COLUMNS, predicate
        );
        let mut query = sqlx::query_as::<_, PersonRow>(&sql);
        for value in values {
            query = query.bind(*value);
        }

        let row = query.fetch_optional(&self.pool).await?;
        Ok(row.map(PersonRow::into_person))
    }
}

#[async_trait]
impl PersonRepository for PgPersonRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Person>, AppError> {
        let row = sqlx::query_as::<_, PersonRow>(&format!(
            "SELECT {} FROM persons WHERE id = $1",
            PERSON_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PersonRow::into_person))
    }

    fn find_all(&self) -> BoxStream<'_, Result<Person, AppError>> {
        sqlx::query_as::<_, PersonRow>(
            r#"
            SELECT id, first_name, last_name, date_of_birth, street, house_number,
                   house_number_additions, postal_code, city, country
            FROM persons
            ORDER BY created_at, id
            "#,
        )
        .fetch(&self.pool)
        .map_ok(PersonRow::into_person)
        .map_err(AppError::from)
        .boxed()
    }

    async fn find_by_full_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<Person>, AppError> {
        self.find_one("first_name = $1 AND last_name = $2", &[first_name, last_name])
            .await
    }

    async fn find_first_by_first_name(&self, first_name: &str) -> Result<Option<Person>, AppError> {
        self.find_one("first_name = $1", &[first_name]).await
    }

    async fn find_first_by_last_name(&self, last_name: &str) -> Result<Option<Person>, AppError> {
        self.find_one("last_name = $1", &[last_name]).await
    }

    async fn exists_by_full_name(&self, first_name: &str, last_name: &str) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM persons WHERE first_name = $1 AND last_name = $2)",
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists_by_id(&self, id: Uuid) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM persons WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn create(&self, person: &Person) -> Result<Person, AppError> {
        let id = person.id.unwrap_or_else(Uuid::new_v4);

        let row = sqlx::query_as::<_, PersonRow>(&format!(
            r#"
            INSERT INTO persons (id, first_name, last_name, date_of_birth, street, house_number,
                                 house_number_additions, postal_code, city, country)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING {}
            "#,
            PERSON_COLUMNS
        ))
        .bind(id)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(person.date_of_birth)
        .bind(&person.street)
        .bind(person.house_number)
        .bind(&person.house_number_additions)
        .bind(&person.postal_code)
        .bind(&person.city)
        .bind(&person.country)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => AppError::Conflict(
                format!("A person named {} is already registered", person.full_name()),
            ),
            _ => AppError::Database(e),
        })?;

        Ok(row.into_person())
    }

    async fn update(&self, person: &Person) -> Result<Person, AppError> {
        let id = person
            .id
            .ok_or_else(|| AppError::Internal("Cannot update a person that was never stored".into()))?;

        let row = sqlx::query_as::<_, PersonRow>(&format!(
            r#"
            UPDATE persons
            SET first_name = $2,
                last_name = $3,
                date_of_birth = $4,
                street = $5,
                house_number = $6,
                house_number_additions = $7,
                postal_code = $8,
                city = $9,
                country = $10
            WHERE id = $1
            RETURNING {}
            "#,
            PERSON_COLUMNS
        ))
        .bind(id)
        .bind(&person.first_name)
        .bind(&person.last_name)
        .bind(person.date_of_birth)
        .bind(&person.street)
        .bind(person.house_number)
        .bind(&person.house_number_additions)
        .bind(&person.postal_code)
        .bind(&person.city)
        .bind(&person.country)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Person with id {} not found", id)))?;

        Ok(row.into_person())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM persons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Person with id {} not found", id)));
        }

        Ok(())
    }

    /// Removes every person together with the pets they own.
    async fn delete_all(&self) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM pets WHERE person_id IS NOT NULL")
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM persons").execute(&mut *tx).await?;

        tx.commit().await?;
        Ok(())
    }
}
