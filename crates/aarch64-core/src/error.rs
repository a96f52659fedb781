//! Error types for console operations.
//!
//! Every failure a request can hit maps onto one variant here, carrying the
//! underlying message unchanged. Nothing is retried or reclassified.

use thiserror::Error;

/// Main error type for console operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Request body could not be encoded as JSON
    #[error("Failed to serialize request body: {0}")]
    Serialization(String),

    /// Endpoint URL could not be built
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Request could not be assembled (e.g. unusable header value)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Network, TLS or connection failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Response body was not the expected JSON
    #[error("Failed to deserialize response: {0}")]
    Deserialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// The API reported `success: false`
    #[error("API error: {0}")]
    Api(String),
}

/// Specialized result type for console operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Returns the error code for this error type.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::InvalidEndpoint(_) => "INVALID_ENDPOINT",
            Self::InvalidRequest(_) => "INVALID_REQUEST",
            Self::Transport(_) => "TRANSPORT_ERROR",
            Self::Deserialization(_) => "DESERIALIZATION_ERROR",
            Self::ConfigError(_) => "CONFIG_ERROR",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Api(_) => "API_ERROR",
        }
    }
}

// Conversions from external error types
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidEndpoint(err.to_string())
    }
}

impl From<validator::ValidationErrors> for Error {
    fn from(err: validator::ValidationErrors) -> Self {
        Self::ValidationError(err.to_string())
    }
}
