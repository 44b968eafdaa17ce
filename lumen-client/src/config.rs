//! Client configuration

/// Catalog client configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | CATALOG_BASE_URL | http://localhost:8000/api | Catalog service root |
/// | REQUEST_TIMEOUT_MS | 30000 | Request timeout (milliseconds) |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Catalog service root, without trailing slash
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl ClientConfig {
    /// Load configuration from the environment (reading `.env` if present),
    /// falling back to defaults for anything unset
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self {
            base_url: std::env::var("CATALOG_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:8000/api".into()),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30_000),
        }
    }

    /// Configuration pointing at a specific service root; used by tests
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            request_timeout_ms: 30_000,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
