//! # Client Error Types
//!
//! Error types for everything that talks to the StockWise backend.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │      HTTP               │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Transport      │  │  Http { status,         │ │
//! │  │  InvalidUrl     │  │  (refused, DNS, │  │         message }       │ │
//! │  │  ConfigLoad     │  │   timeout)      │  │  backend {error} or     │ │
//! │  └─────────────────┘  └─────────────────┘  │  "<action> failed, ..." │ │
//! │                                            └─────────────────────────┘ │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Validation    │  │     Decode      │  │         Io              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  rejected before│  │  2xx with an    │  │  export file writes    │ │
//! │  │  any request    │  │  unusable body  │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use stockwise_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering every failure a backend call can produce.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Base URL does not parse or is not http/https.
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced an HTTP response.
    ///
    /// ## When This Occurs
    /// - Backend not running (connection refused)
    /// - DNS failure
    /// - Connect or request timeout
    #[error("Network error or API server issue: {0}")]
    Transport(String),

    // =========================================================================
    // HTTP Errors
    // =========================================================================
    /// Non-2xx response.
    ///
    /// `message` is the backend's `{error}` field when present, otherwise a
    /// synthesized `"<action> failed, status <code>"`.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx response whose body could not be used.
    #[error("{0}")]
    Decode(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// Input rejected before any request was sent.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// File system failure while exporting.
    #[error("File error: {0}")]
    Io(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => ClientError::Validation(v),
            other => ClientError::Decode(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Transport("request timed out".to_string())
        } else if err.is_connect() {
            ClientError::Transport("could not connect to the StockWise backend".to_string())
        } else if err.is_builder() {
            ClientError::InvalidUrl(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode(format!("Unexpected response from backend: {}", err))
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Io(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    /// Synthesizes the fallback for a non-2xx response without `{error}`.
    pub fn status(action: &str, status: u16) -> Self {
        ClientError::Http {
            status,
            message: format!("{} failed, status {}", action, status),
        }
    }

    /// Returns true if no HTTP response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }

    /// Returns true if the request was rejected locally.
    pub fn is_validation(&self) -> bool {
        matches!(self, ClientError::Validation(_))
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
        )
    }

    /// HTTP status code, when the backend answered.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The line shown to the user.
    ///
    /// ## Taxonomy
    /// - Transport: generic connectivity message
    /// - Http: backend message verbatim, or the status-coded fallback
    /// - Validation: the validation message
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Http { message, .. } => message.clone(),
            ClientError::Validation(v) => v.to_string(),
            other => other.to_string(),
        }
    }
}
