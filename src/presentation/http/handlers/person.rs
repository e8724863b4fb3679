//! Person Handlers

use axum::{
    extract::{Extension, Query, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use futures::TryStreamExt;

use crate::application::dto::{PersonRequest, PersonResponse, PersonSearchParams, UpdateAddressRequest};
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::{EntityId, ValidatedJson};
use crate::presentation::middleware::AuthUser;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Register a new person
pub async fn create_person(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<PersonRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(request = ?body, "Create person");

    let id = state.person_service.create_person(body).await?;
    metrics::record_registration("person");

    Ok((StatusCode::CREATED, [(LOCATION, format!("/v1/person/{}", id))]))
}

/// List every registered person
pub async fn get_all_people(
    State(state): State<AppState>,
) -> Result<Json<Vec<PersonResponse>>, AppError> {
    tracing::debug!("Get all people");

    let people = state
        .person_service
        .get_all_people()
        .map_err(AppError::from)
        .try_collect()
        .await?;

    Ok(Json(people))
}

/// Find a person by first and/or last name
pub async fn search_person(
    State(state): State<AppState>,
    Query(params): Query<PersonSearchParams>,
) -> Result<Json<PersonResponse>, AppError> {
    tracing::debug!(
        first_name = ?params.first_name,
        last_name = ?params.last_name,
        "Search person by name"
    );

    let person = state
        .person_service
        .find_person_by_name(params.first_name.as_deref(), params.last_name.as_deref())
        .await?;

    Ok(Json(person))
}

/// Get person by ID
pub async fn get_person(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<PersonResponse>, AppError> {
    tracing::debug!(person_id = %id, "Get person");

    Ok(Json(state.person_service.get_person_by_id(id).await?))
}

/// Replace a person's address
pub async fn update_person_address(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthUser>,
    EntityId(id): EntityId,
    ValidatedJson(body): ValidatedJson<UpdateAddressRequest>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(
        person_id = %id,
        admin_id = %auth.user_id,
        admin = %auth.username,
        request = ?body,
        "Update person address"
    );

    state.person_service.update_person_address(id, body).await?;

    Ok(StatusCode::OK)
}
