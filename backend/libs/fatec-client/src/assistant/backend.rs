/// Transport for chat completions
use crate::config::ClientConfig;
use crate::error::UpstreamError;
use api_envelope::{ChatCompletionRequest, ChatCompletionResponse};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Anything that can turn a completion request into the assistant's reply
#[async_trait]
pub trait ChatBackend: Send + Sync {
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String, UpstreamError>;
}

/// Posts to the backend's `/api/chat` proxy; the upstream key never leaves
/// the server
#[derive(Debug, Clone)]
pub struct HttpChatBackend {
    http: reqwest::Client,
    url: String,
}

impl HttpChatBackend {
    pub fn new(config: &ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.chat_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build chat client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            http,
            url: format!("{}/chat", config.api_base_url()),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn complete(&self, request: ChatCompletionRequest) -> Result<String, UpstreamError> {
        let response = self.http.post(&self.url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), body = %body, "Erro da API de chat");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        match completion.first_content() {
            Some(content) => {
                debug!(chars = content.len(), "Chat reply received");
                Ok(content.to_string())
            }
            None => {
                warn!("Resposta inesperada da API de chat");
                Err(UpstreamError::MalformedResponse)
            }
        }
    }
}
