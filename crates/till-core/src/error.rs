//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Rejected sale/checkout actions                 │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Register errors (apps/register)                                       │
//! │  └── ApiError         - What the host surface sees (serialized)        │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Front end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart operations themselves are total and never fail. Errors only arise
//! at the session boundary: unknown ids, actions that don't fit the current
//! payment state, and tenders that don't cover the total.

use thiserror::Error;

use crate::money::Money;
use crate::types::{ItemId, TenderType};

// =============================================================================
// Core Error
// =============================================================================

/// Rejected sale and checkout actions.
///
/// A rejected action never mutates session state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No catalog item with this id.
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// No customer with this id in the directory.
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    /// No held sale with this id.
    #[error("Held sale not found: {0}")]
    HeldSaleNotFound(String),

    /// Checkout or hold requested with nothing in the cart.
    #[error("Cart is empty")]
    CartEmpty,

    /// Resume requested while another sale is in progress.
    #[error("Cart already has {lines} line(s); finish or hold the current sale first")]
    CartNotEmpty { lines: usize },

    /// Amount tendered doesn't cover the total.
    ///
    /// ## User Workflow
    /// ```text
    /// Amount Due: $248.37
    /// Amount Paid: $200.00
    ///      │
    ///      ▼
    /// InsufficientTender { due: $248.37, tendered: $200.00 }
    ///      │
    ///      ▼
    /// "Complete Payment" stays disabled, no negative change is shown
    /// ```
    #[error("Tendered {tendered} does not cover amount due {due}")]
    InsufficientTender { due: Money, tendered: Money },

    /// Tender type switched off in the register configuration.
    #[error("Tender type {0} is not accepted")]
    TenderNotAccepted(TenderType),

    /// Action doesn't apply to the current payment state.
    #[error("Cannot {action} while payment is {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when host input (typed amounts, tender names, quantities) doesn't
/// meet requirements, before any business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
