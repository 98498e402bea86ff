//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderError                     ErrorCategory    HTTP   code           │
//! │  ──────────                     ─────────────    ────   ────           │
//! │  CustomerNotFound               NotFound         404    NOT_FOUND      │
//! │  ProductsNotFound               NotFound         404    NOT_FOUND      │
//! │  NoWarehouseAvailable           Unfulfillable    400    UNFULFILLABLE  │
//! │  PaymentFailed                  Payment          402    PAYMENT_FAILED │
//! │  InvalidRequest / bad JSON      Validation       422    VALIDATION_ERROR│
//! │  Storage                        Internal         500    INTERNAL       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Response Body
//! ```json
//! { "code": "NOT_FOUND", "message": "Customer with id 7 not found" }
//! ```
//!
//! Internal errors never carry storage details to the client; those are
//! logged instead.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use depot_core::{ErrorCategory, OrderError};

/// API error returned from handlers.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// HTTP status, not part of the body
    #[serde(skip)]
    pub status: StatusCode,

    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// No warehouse can ship the order (400)
    Unfulfillable,

    /// Card was not charged (402)
    PaymentFailed,

    /// Request shape or content rejected (422)
    ValidationError,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Unfulfillable => StatusCode::BAD_REQUEST,
            ErrorCode::PaymentFailed => StatusCode::PAYMENT_REQUIRED,
            ErrorCode::ValidationError => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ErrorCategory> for ErrorCode {
    fn from(category: ErrorCategory) -> Self {
        match category {
            ErrorCategory::NotFound => ErrorCode::NotFound,
            ErrorCategory::Unfulfillable => ErrorCode::Unfulfillable,
            ErrorCategory::Payment => ErrorCode::PaymentFailed,
            ErrorCategory::Validation => ErrorCode::ValidationError,
            ErrorCategory::Internal => ErrorCode::Internal,
        }
    }
}

impl ApiError {
    /// Creates a new API error with the status implied by `code`.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            status: code.status(),
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} with id {} not found", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts order errors to API errors.
impl From<OrderError> for ApiError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::Storage {
                message,
                payment_id: Some(payment_id),
            } => {
                error!(%payment_id, %message, "Order not recorded after charge");
                ApiError::internal(format!(
                    "Order could not be recorded; payment {} needs manual review",
                    payment_id
                ))
            }
            OrderError::Storage {
                message,
                payment_id: None,
            } => {
                error!(%message, "Storage failure");
                ApiError::internal("Internal server error")
            }
            other => ApiError::new(other.category().into(), other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;
