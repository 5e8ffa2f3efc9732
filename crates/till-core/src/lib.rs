//! # till-core: Pure Business Logic for Till POS
//!
//! Cart, pricing and checkout rules for the point-of-sale screen, written as
//! plain data structures and functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Till POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Host surface (apps/register)                    │   │
//! │  │    add_to_cart ──► open_payment ──► confirm_payment ──► new_sale│   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐  ┌──────────┐  ┌──────────┐  ┌──────────────┐   │   │
//! │  │   │ catalog  │  │   cart   │  │ pricing  │  │   checkout   │   │   │
//! │  │   │ Catalog  │  │   Cart   │  │ Pricing  │  │ PaymentState │   │   │
//! │  │   └──────────┘  └──────────┘  └──────────┘  └──────────────┘   │   │
//! │  │                  ┌──────────────────────┐                       │   │
//! │  │                  │ session: SaleSession │                       │   │
//! │  │                  └──────────────────────┘                       │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, TaxRate, TenderType, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Static catalog and product filtering
//! - [`cart`] - Cart lines keyed by item id
//! - [`pricing`] - Subtotal, tax and total
//! - [`checkout`] - Payment state machine
//! - [`session`] - The sale session tying it all together
//! - [`customer`] - Customer directory for the active sale
//! - [`inventory`] - Stock level classification
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation at the host boundary
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Catalog, ItemId, Money, SaleSession, Tender, TenderType};
//!
//! let mut session = SaleSession::new(Catalog::sample());
//! session.add_item(ItemId(1)).unwrap(); // Wireless Earbuds $129.99
//! session.add_item(ItemId(5)).unwrap(); // Wireless Charger $49.99
//! session.add_item(ItemId(5)).unwrap();
//!
//! let totals = session.totals();
//! assert_eq!(totals.subtotal, Money::from_cents(22997));
//! assert_eq!(totals.tax, Money::from_cents(1840));
//! assert_eq!(totals.total, Money::from_cents(24837));
//!
//! session.open_payment().unwrap();
//! let record = session
//!     .confirm_payment(Tender::new(TenderType::Cash, Money::from_cents(25000)))
//!     .unwrap();
//! assert_eq!(record.change, Money::from_cents(163));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod customer;
pub mod error;
pub mod inventory;
pub mod money;
pub mod pricing;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CategoryFilter};
pub use checkout::{Checkout, PaymentRecord, PaymentState};
pub use customer::{Customer, CustomerDirectory};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::{InventoryItem, InventorySummary, StockLevel, StockStatus};
pub use money::Money;
pub use pricing::{CartTotals, Pricing};
pub use session::{HeldSale, SaleSession};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default sales tax rate in basis points (8%).
pub const DEFAULT_TAX_RATE_BPS: u32 = 800;

/// Largest quantity accepted when typed into a cart line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Number of characters in a generated transaction identifier.
pub const TRANSACTION_ID_LEN: usize = 8;
