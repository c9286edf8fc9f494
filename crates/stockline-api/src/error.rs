//! # API Error Types
//!
//! Error types for the remote API boundary.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       API Error Categories                              │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  GraphQl                │ │
//! │  │  InvalidEndpoint│  │  Http {status}  │  │  Decode                 │ │
//! │  │  ConfigLoad/Save│  │                 │  │  MissingData            │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Every failure surfaces ONCE as a single human-readable message.        │
//! │  There is no retry path anywhere in this crate.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// API boundary error covering configuration, transport and response
/// failures.
#[derive(Debug, Error)]
pub enum ApiError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid API configuration.
    #[error("Invalid API configuration: {0}")]
    InvalidConfig(String),

    /// Endpoint URL failed validation.
    #[error("Invalid endpoint URL: {0}")]
    InvalidEndpoint(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Network-level failure (connect, timeout, TLS, body read).
    #[error("Request failed: {0}")]
    Transport(String),

    /// Server answered with a non-success HTTP status.
    #[error("Server returned HTTP {status}")]
    Http { status: u16 },

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The GraphQL layer reported errors. Multiple server messages are
    /// joined into the one line shown to the user.
    #[error("API error: {message}")]
    GraphQl { message: String },

    /// Response body was not valid JSON of the expected shape.
    #[error("Malformed response: {0}")]
    Decode(String),

    /// Response decoded but the expected data field was absent.
    #[error("Response missing expected field '{0}'")]
    MissingData(String),

    // =========================================================================
    // Request Errors
    // =========================================================================
    /// Caller asked for a structurally impossible aggregation (e.g. month 13).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<stockline_core::CoreError> for ApiError {
    fn from(err: stockline_core::CoreError) -> Self {
        ApiError::InvalidRequest(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ApiError::Http {
                status: status.as_u16(),
            },
            None => ApiError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ApiError {
    fn from(err: url::ParseError) -> Self {
        ApiError::InvalidEndpoint(err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ApiError {
    fn from(err: toml::de::Error) -> Self {
        ApiError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ApiError {
    fn from(err: toml::ser::Error) -> Self {
        ApiError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ApiError {
    /// True for network-level failures where the server never produced a
    /// usable response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Http { .. })
    }

    /// True when the server itself reported the failure through the GraphQL
    /// error channel.
    pub fn is_graphql(&self) -> bool {
        matches!(self, ApiError::GraphQl { .. })
    }

    /// True for configuration problems that no amount of refetching fixes.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ApiError::InvalidConfig(_)
                | ApiError::InvalidEndpoint(_)
                | ApiError::ConfigLoadFailed(_)
                | ApiError::ConfigSaveFailed(_)
        )
    }
}
