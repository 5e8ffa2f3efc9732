//! # Validation Module
//!
//! Input validation for values typed at the register before they reach the
//! session.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end                                                    │
//! │  ├── Disabled buttons (empty cart, tender below total)                 │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Register command (apps/register)                             │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: amounts, quantities, search text                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SaleSession / Checkout                                       │
//! │  └── State rules (CartEmpty, InsufficientTender, ...)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{parse_tender_amount, validate_quantity_entry};
//!
//! use till_core::Money;
//!
//! let due = Money::from_cents(24837);
//! assert_eq!(parse_tender_amount("250.00", due).unwrap().cents(), 25000);
//! assert!(validate_quantity_entry(5).is_ok());
//! assert!(validate_quantity_entry(5000).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product search query.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates a customer id.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
pub fn validate_customer_id(id: &str) -> ValidationResult<&str> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "customer".to_string(),
            max: 64,
        });
    }

    Ok(id)
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity typed into a cart line.
///
/// ## Rules
/// - Zero or negative is allowed (it removes the line)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Cart line quantity field                                               │
/// │                                                                         │
/// │  User types: 1000                                                      │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_quantity_entry(1000) ← THIS FUNCTION                         │
/// │       │                                                                 │
/// │       ├── qty > 999? → Error: "quantity must be between 0 and 999"     │
/// │       │                                                                 │
/// │       └── OK → set_quantity                                            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_quantity_entry(qty: i64) -> ValidationResult<()> {
    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Parses an amount typed on the tender screen.
///
/// ## Rules
/// - Decimal with at most two fraction digits (see [`Money`]'s `FromStr`)
/// - Never negative
/// - Zero only when `amount_due` is zero (a sale of free items)
pub fn parse_tender_amount(input: &str, amount_due: Money) -> ValidationResult<Money> {
    let amount: Money = input.parse()?;

    if amount.is_negative() || (amount.is_zero() && amount_due.is_positive()) {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(amount)
}

/// Validates a tax rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_tax_rate_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10000 {
        return Err(ValidationError::OutOfRange {
            field: "tax_rate".to_string(),
            min: 0,
            max: 10000,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
