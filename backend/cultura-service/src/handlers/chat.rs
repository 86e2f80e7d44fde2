/// Chat proxy endpoint
///
/// POST /api/chat - forward a chat completion to the configured upstream
use crate::error::Result;
use crate::AppState;
use actix_web::{web, HttpResponse};
use api_envelope::ChatCompletionRequest;
use tracing::info;

/// POST /api/chat
///
/// Answers with the upstream `{choices: [{message: {content}}]}` body so the
/// app can read `choices[0].message.content` directly.
pub async fn chat_completion(
    state: web::Data<AppState>,
    req: web::Json<ChatCompletionRequest>,
) -> Result<HttpResponse> {
    info!(messages = req.messages.len(), "POST /api/chat");

    let completion = state.chat.complete(req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(completion))
}
