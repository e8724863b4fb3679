//! Pet Handlers

use axum::{
    extract::{Query, State},
    http::{header::LOCATION, StatusCode},
    response::IntoResponse,
    Json,
};
use futures::TryStreamExt;

use crate::application::dto::{PetQueryParams, PetRequest, PetResponse};
use crate::infrastructure::metrics;
use crate::presentation::http::extractors::{parse_uuid, EntityId, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Register a new pet
pub async fn create_pet(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<PetRequest>,
) -> Result<impl IntoResponse, AppError> {
    tracing::debug!(request = ?body, "Create pet");

    let id = state.pet_service.create_pet(body).await?;
    metrics::record_registration("pet");

    Ok((StatusCode::CREATED, [(LOCATION, format!("/v1/pet/{}", id))]))
}

/// List pets, optionally only those of one owner
pub async fn get_pets(
    State(state): State<AppState>,
    Query(params): Query<PetQueryParams>,
) -> Result<Json<Vec<PetResponse>>, AppError> {
    let pets = match params.person_id.as_deref() {
        Some(raw) => {
            let person_id = parse_uuid(raw)?;
            tracing::debug!(person_id = %person_id, "Get pets of person");
            state
                .pet_service
                .get_pets_by_person_id(person_id)
                .map_err(AppError::from)
                .try_collect()
                .await?
        }
        None => {
            tracing::debug!("Get all pets");
            state
                .pet_service
                .get_all_pets()
                .map_err(AppError::from)
                .try_collect()
                .await?
        }
    };

    Ok(Json(pets))
}

/// Get pet by ID
pub async fn get_pet(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<PetResponse>, AppError> {
    tracing::debug!(pet_id = %id, "Get pet");

    Ok(Json(state.pet_service.get_pet_by_id(id).await?))
}

/// Change a pet's name and age
pub async fn update_pet(
    State(state): State<AppState>,
    EntityId(id): EntityId,
    ValidatedJson(body): ValidatedJson<PetRequest>,
) -> Result<StatusCode, AppError> {
    tracing::debug!(pet_id = %id, request = ?body, "Update pet");

    state.pet_service.update_pet(id, body).await?;

    Ok(StatusCode::OK)
}

/// Delete pet by ID
pub async fn delete_pet(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<StatusCode, AppError> {
    tracing::debug!(pet_id = %id, "Delete pet");

    state.pet_service.delete_pet_by_id(id).await?;

    Ok(StatusCode::OK)
}
