//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    handler::Handler,
    http::header::CONTENT_TYPE,
    middleware,
    response::IntoResponse,
    routing::get,
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::presentation::middleware::{require_admin, track_metrics};
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/v1/person", person_routes(state.clone()))
        .nest("/v1/pet", pet_routes())
        .route("/health", get(handlers::health::health_check))
        .route("/health/ready", get(handlers::health::readiness))
        .route("/metrics", get(metrics_handler))
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    (
        [(CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        metrics::gather_metrics(),
    )
}

/// Person routes. Changing an address requires an administrator.
fn person_routes(state: AppState) -> Router<AppState> {
    let update_address = handlers::person::update_person_address
        .layer(middleware::from_fn_with_state(state, require_admin));

    Router::new()
        .route(
            "/",
            get(handlers::person::get_all_people).post(handlers::person::create_person),
        )
        .route("/search", get(handlers::person::search_person))
        .route(
            "/{id}",
            get(handlers::person::get_person).put(update_address),
        )
}

fn pet_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::pet::get_pets).post(handlers::pet::create_pet))
        .route(
            "/{id}",
            get(handlers::pet::get_pet)
                .put(handlers::pet::update_pet)
                .delete(handlers::pet::delete_pet),
        )
}
