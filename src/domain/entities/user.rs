//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema. Users are operator
//! accounts for the HTTP API, not registered people.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Role granted to an API user, stored as `ROLE_*` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    /// Convert from database string representation.
    ///
    /// Unknown values fall back to the least privileged role.
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "ROLE_ADMIN" | "ADMIN" => Self::Admin,
            _ => Self::User,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Admin => "ROLE_ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An API user account.
///
/// Maps to the `users` table:
/// - id: UUID PRIMARY KEY
/// - username: TEXT NOT NULL UNIQUE
/// - password_hash: TEXT NOT NULL
/// - roles: TEXT[] NOT NULL
/// - enabled: BOOLEAN NOT NULL
/// - locked: BOOLEAN NOT NULL
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub username: String,

    /// Argon2 password hash
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub roles: Vec<Role>,

    pub enabled: bool,

    pub locked: bool,
}

impl User {
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Whether the account may authenticate at all.
    pub fn is_active(&self) -> bool {
        self.enabled && !self.locked
    }
}

/// Repository trait for User data access operations.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Create a new user.
    async fn create(&self, user: &User) -> Result<User, AppError>;
}
