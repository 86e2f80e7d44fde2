/// Chat completion proxy
///
/// Forwards `{messages, temperature, max_tokens}` to
/// `{CHAT_API_BASE_URL}/chat/completions`, keeping the upstream key on the
/// server. The configured model always wins over anything the caller sent.
use crate::config::ChatConfig;
use crate::error::{AppError, Result};
use crate::metrics::{CHAT_PROXY_DURATION_SECONDS, CHAT_PROXY_REQUESTS_TOTAL};
use api_envelope::{ChatCompletionRequest, ChatCompletionResponse};
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

pub struct ChatProxy {
    client: reqwest::Client,
    config: ChatConfig,
}

impl ChatProxy {
    pub fn new(config: ChatConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("failed to build chat client: {}", e)))?;

        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        !self.config.api_key.is_empty()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    pub async fn complete(
        &self,
        mut request: ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse> {
        if request.messages.is_empty() {
            return Err(AppError::Validation(
                "A lista de mensagens não pode estar vazia".to_string(),
            ));
        }

        if !self.is_configured() {
            warn!("Chat API key not configured");
            observe("unavailable", None);
            return Err(AppError::ServiceUnavailable(
                "Assistente indisponível: chave da API de chat não configurada".to_string(),
            ));
        }

        request.model = Some(self.config.model.clone());
        let started = Instant::now();

        info!(
            model = %self.config.model,
            messages = request.messages.len(),
            "Forwarding chat completion"
        );

        let response = match self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .header("X-Title", &self.config.app_title)
            .json(&request)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                warn!(timeout_secs = self.config.timeout_secs, "Chat upstream timed out");
                observe("timeout", Some(started));
                return Err(AppError::UpstreamTimeout(self.config.timeout_secs));
            }
            Err(e) => {
                error!("Failed to call chat upstream: {}", e);
                observe("upstream_error", Some(started));
                return Err(AppError::Upstream(
                    "Falha ao conectar ao serviço de IA".to_string(),
                ));
            }
        };

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), details = %details, "Chat upstream error");
            observe("upstream_error", Some(started));
            return Err(AppError::Upstream(format!(
                "Serviço de IA respondeu {}",
                status.as_u16()
            )));
        }

        let completion = match response.json::<ChatCompletionResponse>().await {
            Ok(completion) => completion,
            Err(e) if e.is_timeout() => {
                observe("timeout", Some(started));
                return Err(AppError::UpstreamTimeout(self.config.timeout_secs));
            }
            Err(e) => {
                error!("Failed to parse chat upstream response: {}", e);
                observe("upstream_error", Some(started));
                return Err(AppError::Upstream(
                    "Resposta inválida do serviço de IA".to_string(),
                ));
            }
        };

        if completion.first_content().is_none() {
            error!("No content in chat upstream response");
            observe("upstream_error", Some(started));
            return Err(AppError::Upstream(
                "Resposta sem conteúdo do serviço de IA".to_string(),
            ));
        }

        observe("ok", Some(started));
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Chat completion generated"
        );
        Ok(completion)
    }
}

fn observe(outcome: &str, started: Option<Instant>) {
    CHAT_PROXY_REQUESTS_TOTAL.with_label_values(&[outcome]).inc();
    if let Some(started) = started {
        CHAT_PROXY_DURATION_SECONDS
            .with_label_values(&[outcome])
            .observe(started.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_envelope::WireMessage;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config(base_url: String, api_key: &str, timeout_secs: u64) -> ChatConfig {
        ChatConfig {
            base_url,
            api_key: api_key.to_string(),
            model: "test-model".to_string(),
            timeout_secs,
            app_title: "EduAssist App".to_string(),
        }
    }

    fn request() -> ChatCompletionRequest {
        ChatCompletionRequest::new(vec![
            WireMessage::system("Você é o EduAssist"),
            WireMessage::user("Quais cursos existem?"),
        ])
    }

    #[tokio::test]
    async fn forwards_with_key_model_and_title() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(header("x-title", "EduAssist App"))
            .and(body_partial_json(json!({"model": "test-model"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "cmpl-1",
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "Temos seis cursos."}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let proxy = ChatProxy::new(config(server.uri(), "sk-test", 5)).unwrap();
        let completion = proxy.complete(request()).await.unwrap();
        assert_eq!(completion.first_content(), Some("Temos seis cursos."));
    }

    #[tokio::test]
    async fn upstream_error_maps_to_bad_gateway() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let proxy = ChatProxy::new(config(server.uri(), "sk-test", 5)).unwrap();
        let err = proxy.complete(request()).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn missing_content_is_an_upstream_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let proxy = ChatProxy::new(config(server.uri(), "sk-test", 5)).unwrap();
        let err = proxy.complete(request()).await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"choices": []}))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;

        let proxy = ChatProxy::new(config(server.uri(), "sk-test", 1)).unwrap();
        let err = proxy.complete(request()).await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamTimeout(1)));
    }

    #[tokio::test]
    async fn missing_key_is_unavailable_without_network() {
        let proxy = ChatProxy::new(config("http://127.0.0.1:9".to_string(), "", 5)).unwrap();
        let err = proxy.complete(request()).await.unwrap_err();
        assert!(matches!(err, AppError::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn empty_messages_are_rejected() {
        let proxy = ChatProxy::new(config("http://127.0.0.1:9".to_string(), "sk", 5)).unwrap();
        let err = proxy
            .complete(ChatCompletionRequest::new(Vec::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
