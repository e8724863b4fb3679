//! Custom Extractors
//!
//! Axum extractors for request parsing and validation.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;
use validator::Validate;

use crate::shared::error::AppError;
use crate::shared::validation::validation_error;

/// JSON body that has been deserialized and passed its validation rules.
///
/// Malformed bodies and rule violations are both rejected with 400.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        value.validate().map_err(validation_error)?;

        Ok(ValidatedJson(value))
    }
}

/// Entity id taken from the last path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityId(pub Uuid);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::BadRequest("Missing id in path".into()))?;

        parse_uuid(&raw).map(EntityId)
    }
}

/// Parse a UUID supplied by a client, rejecting malformed input with 400.
pub fn parse_uuid(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::BadRequest(format!("Invalid UUID: {}", raw)))
}
