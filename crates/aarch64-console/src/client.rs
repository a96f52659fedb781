//! Asynchronous console API client implementation.

use crate::models::{
    AddUserRequest, ApiResponse, CreateProjectRequest, CreateVmRequest, Credentials,
    DeleteVmRequest, ProjectsResponse,
};
use crate::Result;
use aarch64_core::client::{ClientConfig, ReqwestTransport, Transport};
use aarch64_core::config::ConsoleConfig;
use aarch64_core::ids::{ProjectId, VmId};
use aarch64_core::{Error, DEFAULT_BASE_URL};
use reqwest::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, Request};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;
use validator::Validate;

const USER_AGENT: &str = concat!("aarch64-console/", env!("CARGO_PKG_VERSION"));

/// Builder for [`ConsoleClient`].
pub struct ConsoleClientBuilder {
    base_url: String,
    api_key: String,
    http_config: ClientConfig,
    transport: Option<Arc<dyn Transport>>,
}

impl ConsoleClientBuilder {
    /// Create a builder targeting the hosted console API.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            http_config: ClientConfig::new(),
            transport: None,
        }
    }

    /// Override the API base URL (including any path prefix such as `/api`).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the API key. An empty key means requests are sent unauthenticated.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Set a request timeout (none by default).
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http_config = self.http_config.with_timeout(timeout);
        self
    }

    /// Send requests through an already configured reqwest client.
    #[must_use]
    pub fn with_http_client(self, http: reqwest::Client) -> Self {
        self.with_transport(Arc::new(ReqwestTransport::from_client(http)))
    }

    /// Use a custom transport instead of building one from the HTTP configuration.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the base URL is invalid or the HTTP client
    /// cannot be built.
    pub fn build(self) -> Result<ConsoleClient> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|err| {
            Error::ConfigError(format!("Invalid console base URL `{base_url}`: {err}"))
        })?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&self.http_config, USER_AGENT)?),
        };

        let api_key = if self.api_key.is_empty() {
            None
        } else {
            Some(SecretString::from(self.api_key))
        };

        Ok(ConsoleClient {
            inner: Arc::new(ClientInner {
                base_url,
                api_key,
                transport,
            }),
        })
    }
}

impl Default for ConsoleClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConsoleClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleClientBuilder")
            .field("base_url", &self.base_url)
            .field("authenticated", &!self.api_key.is_empty())
            .field("http_config", &self.http_config)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

/// Asynchronous console API client.
///
/// Cloning is cheap: clones share the API key and the underlying transport, so one
/// connection pool serves every call.
#[derive(Clone)]
pub struct ConsoleClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    base_url: String,
    api_key: Option<SecretString>,
    transport: Arc<dyn Transport>,
}

impl ConsoleClient {
    /// Construct a client for the hosted API with the given key (may be empty).
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the HTTP client cannot be built.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        ConsoleClientBuilder::new().with_api_key(api_key).build()
    }

    /// Start a builder.
    #[must_use]
    pub fn builder() -> ConsoleClientBuilder {
        ConsoleClientBuilder::new()
    }

    /// Construct a client from a [`ConsoleConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ValidationError`] if the configuration fails validation, or
    /// [`Error::ConfigError`] if the base URL or HTTP client is unusable.
    pub fn from_config(config: &ConsoleConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.parse_base_url()?;

        ConsoleClientBuilder::new()
            .with_base_url(base_url.as_str())
            .with_api_key(config.api_key())
            .with_http_config(config.http_config())
            .build()
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns true if requests carry an `Authorization` header.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.api_key.is_some()
    }

    /// List the projects visible to the API key.
    pub async fn projects(&self) -> Result<ProjectsResponse> {
        self.request::<(), _>(Method::GET, "/projects", None).await
    }

    /// Create a project.
    pub async fn create_project(&self, name: impl Into<String>) -> Result<ApiResponse> {
        let body = CreateProjectRequest { name: name.into() };
        self.request(Method::POST, "/project", Some(&body)).await
    }

    /// Invite a user, by email, to a project.
    pub async fn add_user(
        &self,
        project: impl Into<ProjectId>,
        email: impl Into<String>,
    ) -> Result<ApiResponse> {
        let body = AddUserRequest {
            project: project.into(),
            email: email.into(),
        };
        self.request(Method::POST, "/vms/adduser", Some(&body)).await
    }

    /// Provision a VM in a project.
    pub async fn create_vm(
        &self,
        hostname: impl Into<String>,
        pop: impl Into<String>,
        project: impl Into<ProjectId>,
        plan: impl Into<String>,
        os: impl Into<String>,
    ) -> Result<ApiResponse> {
        let body = CreateVmRequest {
            hostname: hostname.into(),
            pop: pop.into(),
            project: project.into(),
            plan: plan.into(),
            os: os.into(),
        };
        self.request(Method::POST, "/vms/create", Some(&body)).await
    }

    /// Delete a VM.
    pub async fn delete_vm(&self, vm: impl Into<VmId>) -> Result<ApiResponse> {
        let body = DeleteVmRequest { vm: vm.into() };
        self.request(Method::DELETE, "/vms/delete", Some(&body)).await
    }

    /// Register a new account.
    pub async fn sign_up(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<ApiResponse> {
        let body = Credentials {
            email: email.into(),
            password: password.into(),
        };
        self.request(Method::POST, "/auth/signup", Some(&body)).await
    }

    /// Log in to an existing account.
    ///
    /// The console only hands out the API key in a `Set-Cookie` response header,
    /// which this method does not read; the returned envelope does not contain it.
    pub async fn login(
        &self,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<ApiResponse> {
        let body = Credentials {
            email: email.into(),
            password: password.into(),
        };
        self.request(Method::POST, "/auth/login", Some(&body)).await
    }

    /// Send a request to `endpoint` (appended to the base URL) and decode the JSON
    /// response body into `R`.
    ///
    /// The body is decoded whatever the HTTP status; the envelope's `meta` is the
    /// caller's to interpret.
    ///
    /// # Errors
    ///
    /// - [`Error::Serialization`] if `body` cannot be encoded
    /// - [`Error::InvalidEndpoint`] if the URL cannot be built
    /// - [`Error::InvalidRequest`] if the API key is not a valid header value
    /// - [`Error::Transport`] (or whatever a custom transport returns) if sending fails
    /// - [`Error::Deserialization`] if the response is not the expected JSON
    pub async fn request<B, R>(&self, method: Method, endpoint: &str, body: Option<&B>) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|err| Error::Serialization(err.to_string()))?;

        let url = Url::parse(&format!("{}{endpoint}", self.inner.base_url))?;
        let mut request = Request::new(method, url);

        let headers = request.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &self.inner.api_key {
            let mut value = HeaderValue::from_str(api_key.expose_secret()).map_err(|err| {
                Error::InvalidRequest(format!("API key is not a valid header value: {err}"))
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        if let Some(payload) = payload {
            *request.body_mut() = Some(payload.into());
        }

        debug!(
            method = %request.method(),
            endpoint,
            authenticated = self.inner.api_key.is_some(),
            "console request"
        );

        let response = self.inner.transport.execute(request).await?;

        debug!(
            endpoint,
            status = %response.status,
            bytes = response.body.len(),
            "console response"
        );

        serde_json::from_slice(&response.body)
            .map_err(|err| Error::Deserialization(err.to_string()))
    }
}

impl fmt::Debug for ConsoleClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleClient")
            .field("base_url", &self.inner.base_url)
            .field("authenticated", &self.is_authenticated())
            .finish_non_exhaustive()
    }
}
