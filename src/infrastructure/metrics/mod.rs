//! Prometheus Metrics Module
//!
//! # Metrics Collected
//! - HTTP request counts by method, matched route and status
//! - HTTP request latency histograms
//! - Registrations of people and pets
//! - Database pool connection gauges

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, GaugeVec, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

const NAMESPACE: &str = "pet_registry";

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("http_requests_total", "Total number of HTTP requests").namespace(NAMESPACE),
        &["method", "path", "status"],
    )
    .expect("Failed to create HTTP_REQUESTS_TOTAL metric")
});

pub static HTTP_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];
    HistogramVec::new(
        HistogramOpts::new(
            "http_request_duration_seconds",
            "HTTP request latency in seconds",
        )
        .namespace(NAMESPACE)
        .buckets(buckets),
        &["method", "path"],
    )
    .expect("Failed to create HTTP_REQUEST_DURATION_SECONDS metric")
});

/// Successful registrations, labelled `person` or `pet`
pub static REGISTRATIONS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("registrations_total", "Number of registered records").namespace(NAMESPACE),
        &["entity"],
    )
    .expect("Failed to create REGISTRATIONS_TOTAL metric")
});

pub static DB_POOL_CONNECTIONS: Lazy<GaugeVec> = Lazy::new(|| {
    GaugeVec::new(
        Opts::new("db_pool_connections", "Database connection pool statistics")
            .namespace(NAMESPACE),
        &["state"], // "idle", "active", "max"
    )
    .expect("Failed to create DB_POOL_CONNECTIONS metric")
});

fn register_metrics(registry: &Registry) {
    let collectors: [Box<dyn prometheus::core::Collector>; 4] = [
        Box::new(HTTP_REQUESTS_TOTAL.clone()),
        Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()),
        Box::new(REGISTRATIONS_TOTAL.clone()),
        Box::new(DB_POOL_CONNECTIONS.clone()),
    ];

    for collector in collectors {
        if let Err(e) = registry.register(collector) {
            tracing::warn!(error = %e, "Failed to register metric");
        }
    }
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();

    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }

    String::from_utf8(buffer).unwrap_or_default()
}

pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn record_registration(entity: &str) {
    REGISTRATIONS_TOTAL.with_label_values(&[entity]).inc();
}

pub fn update_db_pool_stats(idle: u32, active: u32, max: u32) {
    for (state, value) in [("idle", idle), ("active", active), ("max", max)] {
        DB_POOL_CONNECTIONS
            .with_label_values(&[state])
            .set(value as f64);
    }
}
