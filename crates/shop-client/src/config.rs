//! Client configuration.

use std::env;
use std::time::Duration;

/// Environment variable holding the server base URL.
pub const API_URL_ENV: &str = "SHOP_API_URL";

/// Used when `SHOP_API_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Where and how patiently to reach the users server.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use shop_client::ClientConfig;
///
/// let config = ClientConfig::new("http://10.0.2.2:8000/")
///     .request_timeout(Duration::from_secs(10));
///
/// assert_eq!(config.base_url, "http://10.0.2.2:8000");
/// assert_eq!(config.connect_timeout, Duration::from_secs(5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server root, without a trailing slash
    pub base_url: String,

    /// Time allowed to establish a connection.
    /// Default: 5 seconds
    pub connect_timeout: Duration,

    /// Time allowed for a whole request.
    /// Default: 30 seconds
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        ClientConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(30),
        }
    }

    /// Reads `SHOP_API_URL`, falling back to `http://localhost:8000`.
    pub fn from_env() -> Self {
        let base_url = env::var(API_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        ClientConfig::new(base_url)
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Absolute URL for a path starting with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::new(DEFAULT_BASE_URL)
    }
}
