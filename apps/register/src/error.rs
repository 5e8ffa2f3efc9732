//! # API Error Type
//!
//! Unified error type for register commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Till POS                               │
//! │                                                                         │
//! │  stdin                       Rust Backend                               │
//! │  ─────                       ────────────                               │
//! │                                                                         │
//! │  {"command":"confirm_payment", ...}                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad input? ──── ValidationError::InvalidFormat ───┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Rule broken? ─── CoreError::InsufficientTender ── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stdout                                                                 │
//! │  {"error":{"code":"PAYMENT_ERROR","message":"Tendered $200.00 ..."}}    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use till_core::{CoreError, ValidationError};

/// API error returned from register commands.
///
/// ## Serialization
/// This is what the client receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Item not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("[{code:?}] {message}")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown item, customer or held sale
    NotFound,

    /// Input validation failed, including malformed commands
    ValidationError,

    /// Cart operation failed (empty cart, cart in use)
    CartError,

    /// Tender rejected
    PaymentError,

    /// Action not allowed in the current payment state
    InvalidState,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
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

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let message = err.to_string();
        match err {
            CoreError::ItemNotFound(id) => ApiError::not_found("Item", &id.to_string()),
            CoreError::CustomerNotFound(id) => ApiError::not_found("Customer", &id),
            CoreError::HeldSaleNotFound(id) => ApiError::not_found("Held sale", &id),
            CoreError::CartEmpty | CoreError::CartNotEmpty { .. } => {
                ApiError::new(ErrorCode::CartError, message)
            }
            CoreError::InsufficientTender { .. } | CoreError::TenderNotAccepted(_) => {
                ApiError::new(ErrorCode::PaymentError, message)
            }
            CoreError::InvalidTransition { .. } => ApiError::new(ErrorCode::InvalidState, message),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Response serialization failed: {}", err);
        ApiError::internal("Failed to encode response")
    }
}
