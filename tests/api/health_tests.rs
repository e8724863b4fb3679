//! Health and metrics endpoint tests

use axum::http::{
    header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN},
    HeaderValue,
};
use serde_json::Value;

use crate::common::TestApp;

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::new().await;

    let response = app.server.get("/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_readiness_reports_memory_store() {
    let app = TestApp::new().await;

    let body: Value = app.server.get("/health/ready").await.json();

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"]["kind"], "memory");
}

#[tokio::test]
async fn test_metrics_use_route_templates() {
    let app = TestApp::new().await;
    let id = app.create_pet("Dog", 3, None).await;
    app.server.get(&format!("/v1/pet/{}", id)).await.assert_status_ok();

    let metrics = app.server.get("/metrics").await.text();

    assert!(metrics.contains("pet_registry_http_requests_total"));
    assert!(metrics.contains("path=\"/v1/pet/{id}\""));
    assert!(!metrics.contains(&id.to_string()));
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/health")
        .add_header(ORIGIN, HeaderValue::from_static("https://example.org"))
        .await;

    response.assert_status_ok();
    assert_eq!(
        response.header(ACCESS_CONTROL_ALLOW_ORIGIN).to_str().unwrap(),
        "*"
    );
}
