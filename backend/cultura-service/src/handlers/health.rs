use crate::AppState;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
enum ComponentStatus {
    Healthy,
    Unhealthy,
}

#[derive(Serialize)]
struct ComponentCheck {
    status: ComponentStatus,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    latency_ms: Option<u64>,
}

#[derive(Serialize)]
struct ReadinessResponse {
    ready: bool,
    status: ComponentStatus,
    version: &'static str,
    storage_backend: &'static str,
    checks: HashMap<String, ComponentCheck>,
    timestamp: String,
}

/// Liveness probe: the process is up and serving
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness probe
///
/// Checks:
/// - Store: repository round trip
/// - Uploads: upload root exists and is a directory
/// - Chat: upstream key configured (informational, does not fail readiness)
///
/// Returns 200 when store and uploads are healthy, 503 otherwise.
pub async fn readiness(state: web::Data<AppState>) -> HttpResponse {
    let mut checks = HashMap::new();
    let mut overall = ComponentStatus::Healthy;

    let start = Instant::now();
    let store_check = match state.culturas.repository().ping().await {
        Ok(()) => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: format!("{} store reachable", state.storage_backend),
            latency_ms: Some(start.elapsed().as_millis() as u64),
        },
        Err(e) => {
            overall = ComponentStatus::Unhealthy;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("{} store check failed: {}", state.storage_backend, e),
                latency_ms: None,
            }
        }
    };
    checks.insert("store".to_string(), store_check);

    let uploads_check = match tokio::fs::metadata(state.uploads.root()).await {
        Ok(meta) if meta.is_dir() => ComponentCheck {
            status: ComponentStatus::Healthy,
            message: "upload directory present".to_string(),
            latency_ms: None,
        },
        Ok(_) => {
            overall = ComponentStatus::Unhealthy;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: "upload path is not a directory".to_string(),
                latency_ms: None,
            }
        }
        Err(e) => {
            overall = ComponentStatus::Unhealthy;
            ComponentCheck {
                status: ComponentStatus::Unhealthy,
                message: format!("upload directory unavailable: {}", e),
                latency_ms: None,
            }
        }
    };
    checks.insert("uploads".to_string(), uploads_check);

    checks.insert(
        "chat".to_string(),
        ComponentCheck {
            status: ComponentStatus::Healthy,
            message: if state.chat.is_configured() {
                format!("upstream configured (model {})", state.chat.model())
            } else {
                "upstream key not configured; /api/chat answers 503".to_string()
            },
            latency_ms: None,
        },
    );

    let ready = overall == ComponentStatus::Healthy;
    let body = ReadinessResponse {
        ready,
        status: overall,
        version: env!("CARGO_PKG_VERSION"),
        storage_backend: state.storage_backend.as_str(),
        checks,
        timestamp: Utc::now().to_rfc3339(),
    };

    if ready {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
