//! Authentication Middleware
//!
//! HTTP Basic authentication for administrator-only routes.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};
use uuid::Uuid;

use crate::domain::Role;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Authenticated user extension
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Require valid Basic credentials of a user holding the admin role.
///
/// Rejects with 401 when credentials are missing or wrong and with 403 when
/// the user lacks the role.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let Authorization(basic) = request
        .headers()
        .typed_get::<Authorization<Basic>>()
        .ok_or_else(|| AppError::Unauthorized("Full authentication is required".into()))?;

    let user = state
        .auth_service
        .authenticate(basic.username(), basic.password())
        .await
        .map_err(|e| {
            tracing::debug!(username = %basic.username(), error = %e, "Authentication failed");
            AppError::from(e)
        })?;

    if !user.has_role(Role::Admin) {
        tracing::warn!(username = %user.username, path = %request.uri().path(), "Access denied");
        return Err(AppError::Forbidden("Access is denied".into()));
    }

    request.extensions_mut().insert(AuthUser {
        user_id: user.id,
        username: user.username,
    });

    Ok(next.run(request).await)
}
