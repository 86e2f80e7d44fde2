/// HTTP client for the FATEC backend
///
/// Every call resolves to an [`ApiResponse`]: transport failures, non-JSON
/// bodies and error statuses come back as `success: false` with a message in
/// `error`, so screens only ever branch on `success`.
pub mod culturas;

pub use culturas::{CulturaDraft, CulturasApi, ImageFile};

use crate::config::ClientConfig;
use crate::error::ClientError;
use api_envelope::ApiResponse;
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_host: String,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout, using defaults: {}", e);
                reqwest::Client::new()
            });

        Self {
            http,
            api_host: config.api_host.clone(),
            base_url: config.api_base_url(),
        }
    }

    /// Host the API and `/uploads` are served from
    pub fn api_host(&self) -> &str {
        &self.api_host
    }

    /// `{base_url}/{path}`
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn culturas(&self) -> CulturasApi<'_> {
        CulturasApi::new(self)
    }

    /// Send a request and decode the standard envelope
    pub async fn request<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ApiResponse<T> {
        match send_and_decode(builder).await {
            Ok(envelope) => envelope,
            Err(err) => failure(err),
        }
    }

    /// GET an auxiliary endpoint whose body shape is not guaranteed. Failures
    /// come back as `{"success": false, "error": ...}`; pair with
    /// [`api_envelope::legacy::extract_data`].
    pub async fn get_json(&self, path: &str) -> Value {
        let result: Result<Value, ClientError> = async {
            let response = self.http.get(self.url(path)).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(ClientError::Status {
                    status: status.as_u16(),
                });
            }
            Ok::<Value, ClientError>(response.json::<Value>().await?)
        }
        .await;

        match result {
            Ok(value) => value,
            Err(err) => {
                warn!(path, error = %err, "Erro na requisição");
                json!({"success": false, "error": err.to_string()})
            }
        }
    }
}

/// Log and render a client failure as an envelope
pub(crate) fn failure<T>(err: ClientError) -> ApiResponse<T> {
    warn!(error = %err, "Erro na requisição");
    ApiResponse::failure(err.to_string())
}

async fn send_and_decode<T: DeserializeOwned>(
    builder: RequestBuilder,
) -> Result<ApiResponse<T>, ClientError> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.bytes().await?;
    debug!(status = status.as_u16(), bytes = body.len(), "API response");

    match serde_json::from_slice::<ApiResponse<T>>(&body) {
        // Error statuses still carry the failure envelope; pass it through.
        Ok(envelope) if status.is_success() || !envelope.success => Ok(envelope),
        Ok(_) => Err(ClientError::Status {
            status: status.as_u16(),
        }),
        Err(e) if status.is_success() => Err(ClientError::Decode(e.to_string())),
        Err(_) => Err(ClientError::Status {
            status: status.as_u16(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use api_envelope::legacy::extract_data;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> ApiClient {
        ApiClient::new(&ClientConfig::new(server.uri()))
    }

    #[tokio::test]
    async fn unreachable_server_yields_failure_envelope() {
        // Nothing listens on port 9 (discard) in test environments.
        let client = ApiClient::new(&ClientConfig::new("http://127.0.0.1:9"));
        let resp = client.culturas().list().await;
        assert!(!resp.success);
        assert!(resp.data.is_none());
        assert!(resp.error.is_some());
    }

    #[tokio::test]
    async fn error_status_passes_envelope_through() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/culturas"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "success": false,
                "error": "Erro interno do servidor"
            })))
            .mount(&server)
            .await;

        let resp = client_for(&server).culturas().list().await;
        assert!(!resp.success);
        assert_eq!(resp.error_message(), "Erro interno do servidor");
    }

    #[tokio::test]
    async fn non_json_error_body_reports_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>"))
            .mount(&server)
            .await;

        let resp = client_for(&server).culturas().list().await;
        assert!(!resp.success);
        assert!(resp.error_message().contains("503"));
    }

    #[tokio::test]
    async fn get_json_feeds_legacy_extraction() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/empregos"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "titulo": "Estágio em TI"},
                {"id": 2, "titulo": "Analista Jr."}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server);
        assert_eq!(extract_data(&client.get_json("/empregos").await).len(), 2);
        // Unmocked path: 404 becomes a failure object, which extracts to nothing.
        assert!(extract_data(&client.get_json("seguranca").await).is_empty());
    }
}
