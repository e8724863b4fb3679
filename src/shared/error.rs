//! Application Error Types
//!
//! Centralized error handling with Axum integration.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Realm advertised in `WWW-Authenticate` challenges.
pub const AUTH_REALM: &str = "Basic realm=\"pet-registry\"";

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {}", .0.join(", "))]
    Validation(Vec<String>),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub error: String,
    pub messages: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, messages: Vec<String>) -> Self {
        Self {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or_default().to_string(),
            messages,
            timestamp: Utc::now(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, messages) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, vec![msg]),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, vec![msg]),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, vec![msg]),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, vec![msg]),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, vec![msg]),
            AppError::Validation(msgs) => (StatusCode::BAD_REQUEST, msgs),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, vec!["Internal server error".into()])
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, vec!["Internal server error".into()])
            }
        };

        let mut response = (status, Json(ErrorResponse::new(status, messages))).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(AUTH_REALM));
        }
        response
    }
}
