//! # Proxy Error Types
//!
//! Typed error handling for the payment intent proxy.
//! All provider operations return `Result<T, ProxyError>`.

use thiserror::Error;

/// Core error type for all proxy operations
#[derive(Debug, Error)]
pub enum ProxyError {
    /// Configuration errors (missing keys, invalid config)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Request rejected before reaching the provider
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Payment provider API error
    #[error("Provider error [{provider}]: {message}")]
    Provider {
        provider: String,
        message: String,
        /// Provider error code (e.g. `parameter_invalid_integer`)
        code: Option<String>,
        /// HTTP status returned by the provider
        status: Option<u16>,
    },

    /// Network/HTTP error communicating with provider
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ProxyError {
    /// The underlying message without the category prefix.
    ///
    /// For provider errors this is the provider's own text, verbatim.
    pub fn message(&self) -> &str {
        match self {
            ProxyError::Configuration(msg)
            | ProxyError::InvalidRequest(msg)
            | ProxyError::Network(msg)
            | ProxyError::Serialization(msg)
            | ProxyError::Internal(msg) => msg,
            ProxyError::Provider { message, .. } => message,
        }
    }

    /// A fixed, category-level message that never carries provider text.
    pub fn sanitized_message(&self) -> &'static str {
        match self {
            ProxyError::InvalidRequest(_) => "invalid request",
            ProxyError::Provider { .. } => "payment provider rejected the request",
            ProxyError::Network(_) => "payment provider unreachable",
            ProxyError::Configuration(_)
            | ProxyError::Serialization(_)
            | ProxyError::Internal(_) => "internal error",
        }
    }

    /// HTTP status the proxy answers with for this error.
    ///
    /// Everything raised by the outbound call collapses to 500; only
    /// requests rejected up front are client errors.
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::InvalidRequest(_) => 400,
            _ => 500,
        }
    }
}

/// Result type alias for proxy operations
pub type ProxyResult<T> = Result<T, ProxyError>;
