//! HTTP client configuration and the transport seam.
//!
//! Service clients build a complete [`reqwest::Request`] and hand it to a
//! [`Transport`]. The default [`ReqwestTransport`] owns a single pooled
//! [`reqwest::Client`] that is reused for every call.

use crate::error::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Request, StatusCode};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

// Connection pool settings

/// Default idle timeout for connection pools (seconds)
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// HTTP client configuration.
///
/// No request timeout is set by default; a request can take as long as the server
/// and the network allow unless one is configured here.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Overall request timeout
    pub timeout: Option<Duration>,

    /// Connection establishment timeout
    pub connect_timeout: Option<Duration>,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response compression
    pub enable_compression: bool,

    /// Verify TLS certificates
    pub tls_verify: bool,

    /// Additional PEM root certificate to trust
    pub tls_ca_cert: Option<PathBuf>,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: None,
            connect_timeout: None,
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
            tls_verify: true,
            tls_ca_cert: None,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set connect timeout.
    #[must_use]
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }

    /// Enable or disable TLS certificate verification.
    #[must_use]
    pub fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Trust an additional PEM encoded root certificate.
    #[must_use]
    pub fn with_ca_cert(mut self, path: PathBuf) -> Self {
        self.tls_ca_cert = Some(path);
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Status and raw body of an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Response body bytes
    pub body: Vec<u8>,
}

/// Executes fully built HTTP requests.
///
/// Implementations must be safe to share between tasks; a client holds one
/// transport for its whole lifetime.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and read the whole response body.
    async fn execute(&self, request: Request) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a pooled [`reqwest::Client`].
#[derive(Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Build the underlying HTTP client from the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the CA certificate cannot be loaded or the
    /// HTTP client cannot be built.
    pub fn new(config: &ClientConfig, user_agent: &str) -> Result<Self> {
        let mut builder = ClientBuilder::new()
            .user_agent(user_agent)
            .pool_idle_timeout(config.pool_idle_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(timeout) = config.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }

        if !config.enable_compression {
            builder = builder.no_gzip();
        }

        if !config.tls_verify {
            warn!("TLS verification disabled for console client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(ca_cert) = &config.tls_ca_cert {
            debug!("loading CA certificate from {}", ca_cert.display());
            let bytes = std::fs::read(ca_cert).map_err(|err| {
                Error::ConfigError(format!(
                    "Failed to read CA certificate {}: {err}",
                    ca_cert.display()
                ))
            })?;
            let cert = reqwest::Certificate::from_pem(&bytes)
                .map_err(|err| Error::ConfigError(format!("Invalid CA certificate: {err}")))?;
            builder = builder.add_root_certificate(cert);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http })
    }

    /// Wrap an HTTP client that was configured elsewhere.
    #[must_use]
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

impl fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReqwestTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: Request) -> Result<TransportResponse> {
        let response = self.http.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        Ok(TransportResponse { status, body })
    }
}
