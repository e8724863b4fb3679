//! User Repository Implementation
//!
//! PostgreSQL implementation of the UserRepository trait.
//! Maps between the database schema and domain User entity.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{Role, User, UserRepository};
use crate::shared::error::AppError;

/// Database row representation matching the users table schema.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    password_hash: String,
    roles: Vec<String>,
    enabled: bool,
    locked: bool,
}

impl UserRow {
    /// Convert database row to domain User entity.
    fn into_user(self) -> User {
        User {
            id: self.id,
            username: self.username,
            password_hash: self.password_hash,
            roles: self.roles.iter().map(|r| Role::from_str(r)).collect(),
            enabled: self.enabled,
            locked: self.locked,
        }
    }
}

/// PostgreSQL user repository implementation.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash, roles, enabled, locked
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| r.into_user()))
    }

    async fn create(&self, user: &User) -> Result<User, AppError> {
        let roles: Vec<String> = user.roles.iter().map(|r| r.as_str().to_string()).collect();

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash, roles, enabled, locked)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, password_hash, roles, enabled, locked
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.password_hash)
        .bind(&roles)
        .bind(user.enabled)
        .bind(user.locked)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("User with this username already exists".to_string())
            }
            _ => AppError::Database(e),
        })?;

        Ok(row.into_user())
    }
}
