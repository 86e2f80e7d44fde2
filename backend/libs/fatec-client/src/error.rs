/// Error types for the client crate
use thiserror::Error;

/// Failure of a single API request. Never crosses the [`ApiClient`] boundary;
/// it is rendered into a failure envelope there.
///
/// [`ApiClient`]: crate::api::ApiClient
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("falha de conexão: {0}")]
    Transport(String),

    #[error("tempo de resposta esgotado")]
    Timeout,

    #[error("servidor respondeu {status}")]
    Status { status: u16 },

    #[error("resposta inválida: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Status {
                status: status.as_u16(),
            }
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

/// Failure talking to the chat endpoint
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Erro na API: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("tempo de resposta do assistente esgotado")]
    Timeout,

    #[error("falha de conexão com o assistente: {0}")]
    Transport(String),

    #[error("Resposta inesperada da API")]
    MalformedResponse,
}

impl UpstreamError {
    pub fn status(&self) -> Option<u16> {
        match self {
            UpstreamError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_decode() {
            UpstreamError::MalformedResponse
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

/// Reading or writing the persisted theme preference
#[derive(Debug, Error)]
pub enum ThemeStoreError {
    #[error("theme store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("theme store is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}
