//! # App Error Type
//!
//! Unified error type for dashboard commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Dashboard                          │
//! │                                                                         │
//! │  input line ──► commands::parse ──✗──► AppError { USAGE }              │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │               command handler                                           │
//! │                       │                                                 │
//! │     ValidationError ──┼──► AppError { VALIDATION_ERROR }               │
//! │     ClientError       │                                                 │
//! │       Transport ──────┼──► AppError { NETWORK_ERROR }                  │
//! │       Http ───────────┼──► AppError { BACKEND_ERROR }                  │
//! │       Io ─────────────┼──► AppError { IO_ERROR }                       │
//! │                       ▼                                                 │
//! │            inline "Error: <message>" under the current view            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is fatal; the command loop keeps running.

use std::fmt;
use stockwise_client::ClientError;
use stockwise_core::{CoreError, ValidationError};
use thiserror::Error;

/// Error produced by a dashboard command.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// Machine-readable category
    pub code: ErrorCode,

    /// Line shown to the user
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Command line could not be parsed
    Usage,

    /// Input rejected before any request
    ValidationError,

    /// Backend answered with a non-2xx status
    BackendError,

    /// Backend could not be reached
    NetworkError,

    /// Export file could not be written
    IoError,

    /// Configuration problem
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Usage => "USAGE",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BackendError => "BACKEND_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Usage, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(v) => v.into(),
            other => AppError::new(ErrorCode::Internal, other.to_string()),
        }
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::Validation(_) => ErrorCode::ValidationError,
            ClientError::Transport(_) => ErrorCode::NetworkError,
            ClientError::Http { .. } | ClientError::Decode(_) => ErrorCode::BackendError,
            ClientError::Io(_) => ErrorCode::IoError,
            e if e.is_config_error() => ErrorCode::ConfigError,
            _ => ErrorCode::Internal,
        };
        AppError::new(code, err.user_message())
    }
}

/// Convenience alias for command results.
pub type AppResult<T> = Result<T, AppError>;
