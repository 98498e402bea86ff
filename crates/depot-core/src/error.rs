//! # Error Types
//!
//! Domain-specific error types for depot-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  depot-core errors (this file)                                         │
//! │  ├── OrderError       - Terminal outcomes of create_order              │
//! │  └── ValidationError  - Malformed request data                         │
//! │                                                                         │
//! │  depot-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  order-api errors (in app)                                             │
//! │  └── ApiError         - What HTTP clients see (serialized)             │
//! │                                                                         │
//! │  Flow: ValidationError → OrderError → ApiError → HTTP response         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Errors are enum variants carrying structured data, never bare strings
//! 2. Each variant knows its caller-visible [`ErrorCategory`]
//! 3. Messages include the offending ids so a caller can act on them

use serde::Serialize;
use thiserror::Error;

// =============================================================================
// Error Category
// =============================================================================

/// Caller-visible class of an order failure.
///
/// ## HTTP Mapping (done by order-api)
/// ```text
/// NotFound      → 404
/// Unfulfillable → 400
/// Payment       → 402
/// Validation    → 422
/// Internal      → 500
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    NotFound,
    Unfulfillable,
    Payment,
    Validation,
    Internal,
}

// =============================================================================
// Order Error
// =============================================================================

/// Every way `create_order` can fail.
///
/// All variants are terminal for the request. Nothing is persisted for any
/// of them except [`OrderError::Storage`], where the charge already went
/// through but the write did not.
#[derive(Debug, Error)]
pub enum OrderError {
    /// No customer row matches the requested id.
    #[error("Customer with id {0} not found")]
    CustomerNotFound(i64),

    /// One or more requested product ids have no product row.
    ///
    /// Carries every missing id, in request order, not only the first.
    #[error("Products not found: {}", join_ids(.0))]
    ProductsNotFound(Vec<i64>),

    /// No single warehouse stocks every requested product in the requested
    /// quantity.
    #[error("No warehouse has all requested products in sufficient quantity")]
    NoWarehouseAvailable,

    /// The payment processor rejected the charge.
    #[error("Payment failed: {0}")]
    PaymentFailed(String),

    /// The request failed validation before any lookup ran.
    #[error("Invalid request: {0}")]
    InvalidRequest(#[from] ValidationError),

    /// The storage layer failed.
    ///
    /// ## When This Occurs
    /// - Lookup queries fail (nothing was charged)
    /// - The final order write fails after a successful charge; the
    ///   payment id is carried so the charge can be reconciled
    #[error("Storage failure: {message}")]
    Storage {
        message: String,
        payment_id: Option<String>,
    },
}

impl OrderError {
    /// Returns the caller-visible category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            OrderError::CustomerNotFound(_) | OrderError::ProductsNotFound(_) => {
                ErrorCategory::NotFound
            }
            OrderError::NoWarehouseAvailable => ErrorCategory::Unfulfillable,
            OrderError::PaymentFailed(_) => ErrorCategory::Payment,
            OrderError::InvalidRequest(_) => ErrorCategory::Validation,
            OrderError::Storage { .. } => ErrorCategory::Internal,
        }
    }

    /// Creates a Storage error for a failed lookup (no charge made).
    pub fn storage(message: impl Into<String>) -> Self {
        OrderError::Storage {
            message: message.into(),
            payment_id: None,
        }
    }
}

fn join_ids(ids: &[i64]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request data doesn't meet requirements.
/// Used for early validation before any lookup runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-digit card number, bad expiry).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., the same product twice in one order).
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with OrderError.
pub type OrderResult<T> = Result<T, OrderError>;

// =============================================================================
// Unit Tests
// =============================================================================
