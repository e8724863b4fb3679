//! CORS Middleware Configuration

use std::time::Duration;

use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};

use crate::config::CorsSettings;

/// Create CORS layer from settings.
///
/// With no configured origins every origin is allowed.
pub fn create_cors_layer(settings: &CorsSettings) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

    let origins: Vec<HeaderValue> = settings
        .allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    let layer = CorsLayer::new().allow_methods(methods).allow_headers(Any);

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins).max_age(Duration::from_secs(3600))
    }
}
