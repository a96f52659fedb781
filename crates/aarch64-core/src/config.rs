//! Configuration structures for console clients.
//!
//! [`ConsoleConfig`] is the serializable, validated description of how to reach the
//! console API. It can be loaded from any serde format and turned into the HTTP
//! settings used by the transport.

use crate::client::ClientConfig;
use crate::{Error, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Configuration for a console client instance.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct ConsoleConfig {
    /// API base URL (including the `/api` prefix)
    #[validate(url)]
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent in the `Authorization` header
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Optional path to custom CA certificate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_ca_cert: Option<PathBuf>,

    /// Request timeout in seconds (unbounded when absent)
    #[validate(range(min = 1, max = 300))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_tls_verify() -> bool {
    true
}

impl ConsoleConfig {
    /// Create a new configuration for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the URL is invalid.
    pub fn new(base_url: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            base_url: base_url.into(),
            ..Self::default()
        };
        config.validate()?;

        Ok(config)
    }

    /// Set the API key for authentication.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set custom CA certificate path.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = Some(seconds);
        self
    }

    /// Get the request timeout as a Duration, if one is configured.
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// The configured API key, or an empty string for unauthenticated use.
    #[must_use]
    pub fn api_key(&self) -> &str {
        self.api_key.as_deref().unwrap_or_default()
    }

    /// Parse the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_base_url(&self) -> Result<Url, Error> {
        Url::parse(&self.base_url).map_err(|e| Error::ConfigError(format!("Invalid base URL: {e}")))
    }

    /// Derive the HTTP transport settings from this configuration.
    #[must_use]
    pub fn http_config(&self) -> ClientConfig {
        let mut config = ClientConfig::new().with_tls_verify(self.tls_verify);
        if let Some(timeout) = self.timeout() {
            config = config.with_timeout(timeout);
        }
        if let Some(path) = &self.tls_ca_cert {
            config = config.with_ca_cert(path.clone());
        }
        config
    }
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            tls_verify: default_tls_verify(),
            tls_ca_cert: None,
            request_timeout_secs: None,
        }
    }
}

impl fmt::Debug for ConsoleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("tls_verify", &self.tls_verify)
            .field("tls_ca_cert", &self.tls_ca_cert)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}
