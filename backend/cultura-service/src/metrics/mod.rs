//! Prometheus metrics for cultura-service.
//!
//! Collectors register with the default registry; `/metrics` renders them.

use actix_web::HttpResponse;
use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder,
    HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};

lazy_static! {
    /// Content API operations by operation and outcome (ok, invalid, not_found, error).
    pub static ref CULTURA_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "cultura_operations_total",
        "Content API operations segmented by operation and outcome",
        &["operation", "outcome"]
    )
    .expect("failed to register cultura_operations_total");

    /// Bytes written to the upload root.
    pub static ref UPLOAD_BYTES_TOTAL: IntCounter = register_int_counter!(
        "cultura_upload_bytes_total",
        "Total bytes of uploaded images stored"
    )
    .expect("failed to register cultura_upload_bytes_total");

    /// Chat proxy round trips by outcome (ok, upstream_error, timeout, unavailable).
    pub static ref CHAT_PROXY_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "chat_proxy_requests_total",
        "Chat proxy requests segmented by outcome",
        &["outcome"]
    )
    .expect("failed to register chat_proxy_requests_total");

    pub static ref CHAT_PROXY_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "chat_proxy_duration_seconds",
        "Upstream chat completion latency",
        &["outcome"],
        vec![0.25, 0.5, 1.0, 2.0, 5.0, 10.0, 30.0, 60.0]
    )
    .expect("failed to register chat_proxy_duration_seconds");
}

pub fn record_operation(operation: &str, outcome: &str) {
    CULTURA_OPERATIONS_TOTAL
        .with_label_values(&[operation, outcome])
        .inc();
}

/// Actix handler that renders Prometheus metrics in text format.
pub async fn serve_metrics() -> HttpResponse {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();

    let mut buffer = Vec::new();
    if let Err(err) = encoder.encode(&metric_families, &mut buffer) {
        return HttpResponse::InternalServerError().body(err.to_string());
    }

    HttpResponse::Ok()
        .content_type(encoder.format_type())
        .body(buffer)
}
