/// Client configuration
///
/// The API host is resolved once at startup: `FATEC_API_HOST` wins, then a
/// per-platform default on port 3300.
use std::time::Duration;

pub const API_PORT: u16 = 3300;
pub const ANDROID_EMULATOR_HOST: &str = "10.0.2.2";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;
const DEFAULT_CHAT_TIMEOUT_SECS: u64 = 30;

/// Where the app is running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Platform {
    /// Browser build; carries the page hostname when one is known
    Web { hostname: Option<String> },
    /// Android emulator, which reaches the host machine through 10.0.2.2
    Android,
    Ios,
    Desktop,
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Scheme, host and port, without a trailing slash
    pub api_host: String,
    pub request_timeout: Duration,
    pub chat_timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_host: impl Into<String>) -> Self {
        Self {
            api_host: api_host.into().trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            chat_timeout: Duration::from_secs(DEFAULT_CHAT_TIMEOUT_SECS),
        }
    }

    /// Load from environment variables, falling back to platform defaults
    pub fn from_env(platform: &Platform) -> Self {
        let override_host = std::env::var("FATEC_API_HOST").ok();
        let mut config = Self::new(resolve_api_host(platform, override_host.as_deref()));
        config.request_timeout = Duration::from_secs(env_secs(
            "FATEC_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        ));
        config.chat_timeout =
            Duration::from_secs(env_secs("FATEC_CHAT_TIMEOUT_SECS", DEFAULT_CHAT_TIMEOUT_SECS));

        tracing::info!(api_base_url = %config.api_base_url(), "API configured");
        config
    }

    /// `{api_host}/api`
    pub fn api_base_url(&self) -> String {
        format!("{}/api", self.api_host)
    }
}

/// Pick the API host for `platform`; a non-blank override always wins
pub fn resolve_api_host(platform: &Platform, override_host: Option<&str>) -> String {
    if let Some(host) = override_host.map(str::trim).filter(|host| !host.is_empty()) {
        return host.trim_end_matches('/').to_string();
    }

    match platform {
        Platform::Web { hostname } => {
            let hostname = hostname
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or("localhost");
            format!("http://{}:{}", hostname, API_PORT)
        }
        Platform::Android => format!("http://{}:{}", ANDROID_EMULATOR_HOST, API_PORT),
        Platform::Ios | Platform::Desktop => format!("http://localhost:{}", API_PORT),
    }
}

fn env_secs(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Invalid timeout, using default");
            default
        }),
        Err(_) => default,
    }
}
