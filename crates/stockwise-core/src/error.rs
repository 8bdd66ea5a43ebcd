//! # Error Types
//!
//! Domain-specific error types for stockwise-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockwise-core errors (this file)                                     │
//! │  ├── CoreError        - Normalization + wrapped validation             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  stockwise-client errors (separate crate)                              │
//! │  └── ClientError      - Transport, HTTP status, decode, config         │
//! │                                                                         │
//! │  Dashboard errors (in app)                                             │
//! │  └── AppError         - What the terminal renders                     │
//! │                                                                         │
//! │  Flow: ValidationError → ClientError → AppError → inline error line   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every `ValidationError` message is shown to the user as-is
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while turning backend payloads into domain values.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The payload did not have the shape the resource requires.
    ///
    /// ## When This Occurs
    /// - Catalog response is not a JSON array
    /// - Metrics or report response is not a JSON object
    /// - Body is not valid JSON at all
    #[error("Unexpected {resource} payload: {reason}")]
    Normalization { resource: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Shorthand for a normalization failure.
    pub fn normalization(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::Normalization {
            resource: resource.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// They are raised before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be greater than zero.
    #[error("{field} must be greater than zero")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-numeric stock level, bad date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Sale date lies after today.
    #[error("sale_date {date} is in the future")]
    DateInFuture { date: String },

    /// The SKU reference carried by a form is missing or malformed.
    ///
    /// ## When This Occurs
    /// ```text
    /// Catalog row selected ──► form keeps skuid
    ///      │
    ///      ▼
    /// skuid lost or truncated (stale listing, bad paste)
    ///      │
    ///      ▼
    /// CorruptReference ──► "SKU reference is corrupt. Please re-select the SKU."
    /// ```
    #[error("SKU reference is corrupt. Please re-select the SKU.")]
    CorruptReference,

    /// An update request carried nothing to change.
    #[error("at least one of {fields} must be provided")]
    NothingToUpdate { fields: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sku_name".to_string(),
        };
        assert_eq!(err.to_string(), "sku_name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity_sold".to_string(),
        };
        assert_eq!(err.to_string(), "quantity_sold must be greater than zero");
    }

    #[test]
    fn test_corrupt_reference_message_is_distinct() {
        assert_eq!(
            ValidationError::CorruptReference.to_string(),
            "SKU reference is corrupt. Please re-select the SKU."
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let core_err: CoreError = ValidationError::CorruptReference.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_normalization_message() {
        let err = CoreError::normalization("catalog", "expected a JSON array");
        assert_eq!(
            err.to_string(),
            "Unexpected catalog payload: expected a JSON array"
        );
    }
}
