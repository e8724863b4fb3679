//! Authentication Service
//!
//! Verifies HTTP Basic credentials against stored users and bootstraps the
//! administrator account.

use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Role, User, UserRepository};
use crate::shared::error::AppError;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate user with credentials
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Create an administrator unless a user with that name exists.
    ///
    /// Returns whether a user was created.
    async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, AuthError>;
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Account disabled or locked")]
    AccountInactive,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::AccountInactive => {
                AppError::Unauthorized(err.to_string())
            }
            AuthError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// AuthService implementation
pub struct AuthServiceImpl<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> AuthServiceImpl<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }
}

/// Hash a password using Argon2id
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[async_trait]
impl<U> AuthService for AuthServiceImpl<U>
where
    U: UserRepository + 'static,
{
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        if !user.is_active() {
            return Err(AuthError::AccountInactive);
        }

        Ok(user)
    }

    async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        let existing = self
            .user_repo
            .find_by_username(username)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        if existing.is_some() {
            return Ok(false);
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: hash_password(password)?,
            roles: vec![Role::User, Role::Admin],
            enabled: true,
            locked: false,
        };

        self.user_repo
            .create(&user)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(username = %username, "Administrator account created");
        Ok(true)
    }
}
