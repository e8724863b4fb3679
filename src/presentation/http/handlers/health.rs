//! Health Check Handlers
//!
//! # Endpoints
//! - `GET /health` - Liveness check
//! - `GET /health/ready` - Readiness probe (can the store be reached?)

use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::infrastructure::database;
use crate::startup::AppState;

static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);

/// Pin the uptime origin to process start rather than the first probe.
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub store: StoreHealth,
}

#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub kind: &'static str,
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Readiness probe. Returns 503 when the database cannot be reached.
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let store = check_store(&state).await;

    let status_code = match store.status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    let response = ReadinessResponse {
        status: store.status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        store,
    };

    (status_code, Json(response))
}

async fn check_store(state: &AppState) -> StoreHealth {
    let Some(pool) = &state.db else {
        return StoreHealth {
            kind: "memory",
            status: HealthStatus::Healthy,
            latency_ms: None,
            message: None,
        };
    };

    let start = Instant::now();
    match database::ping(pool).await {
        Ok(()) => {
            let latency = start.elapsed().as_millis() as u64;
            StoreHealth {
                kind: "postgres",
                status: classify_latency(latency),
                latency_ms: Some(latency),
                message: None,
            }
        }
        Err(e) => StoreHealth {
            kind: "postgres",
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            message: Some(format!("Database connection failed: {}", e)),
        },
    }
}

fn classify_latency(latency_ms: u64) -> HealthStatus {
    if latency_ms < 100 {
        HealthStatus::Healthy
    } else {
        HealthStatus::Degraded
    }
}
