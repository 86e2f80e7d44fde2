/// HTTP handlers for cultura-service
///
/// - Culturas: create, list, read, update, delete posts (multipart bodies)
/// - Chat: proxy to the upstream chat-completion API
/// - Uploads: serve stored images
/// - Health: liveness and readiness
pub mod chat;
pub mod culturas;
pub mod health;
pub mod uploads;

use crate::error::AppError;
use crate::metrics::serve_metrics;
use actix_web::{error::JsonPayloadError, web, HttpRequest, HttpResponse};
use api_envelope::ApiResponse;

pub use chat::chat_completion;
pub use culturas::{create_cultura, delete_cultura, get_cultura, list_culturas, update_cultura};
pub use health::{liveness, readiness};
pub use uploads::serve_upload;

const JSON_LIMIT_BYTES: usize = 256 * 1024;

/// Register every route of the service
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/metrics", web::get().to(serve_metrics))
        .route("/uploads/{filename}", web::get().to(serve_upload))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(readiness))
                .route("/health/live", web::get().to(liveness))
                .route("/chat", web::post().to(chat_completion))
                .service(
                    web::resource("/culturas")
                        .route(web::get().to(list_culturas))
                        .route(web::post().to(create_cultura)),
                )
                .service(
                    web::resource("/culturas/{id}")
                        .route(web::get().to(get_cultura))
                        .route(web::put().to(update_cultura))
                        .route(web::delete().to(delete_cultura)),
                ),
        );
}

/// Malformed JSON bodies are answered with the failure envelope
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT_BYTES)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            let app_err = match err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    AppError::PayloadTooLarge("corpo JSON muito grande".to_string())
                }
                other => AppError::Validation(format!("JSON inválido: {}", other)),
            };
            app_err.into()
        })
}

/// Fallback for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::<()>::failure("Rota não encontrada"))
}
