//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  CatalogItem    │   │    TaxRate      │   │   TenderType    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (ItemId)    │   │  bps (u32)      │   │  Cash           │       │
//! │  │  name           │   │  800 = 8%       │   │  Card           │       │
//! │  │  unit_price     │   └─────────────────┘   │  Mobile         │       │
//! │  │  category       │   ┌─────────────────┐   │  Qr             │       │
//! │  └─────────────────┘   │  RoundingMode   │   └─────────────────┘       │
//! │                        │  Nearest/Up/Down│   ┌─────────────────┐       │
//! │                        └─────────────────┘   │     Tender      │       │
//! │                                              │  type + amount  │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 800 bps = 8%, 825 bps = 8.25%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Creates a tax rate from a percentage (for configuration input).
    pub fn from_percentage(pct: f64) -> Self {
        TaxRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }

    /// Checks if tax rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

/// Shows the rate the way the cart footer labels it: `8%`, `8.25%`.
impl fmt::Display for TaxRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 100;
        let frac = self.0 % 100;
        match frac {
            0 => write!(f, "{}%", whole),
            f2 if f2 % 10 == 0 => write!(f, "{}.{}%", whole, f2 / 10),
            f2 => write!(f, "{}.{:02}%", whole, f2),
        }
    }
}

// =============================================================================
// Rounding Mode
// =============================================================================

/// How a fractional cent of tax is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half up to the nearest cent.
    #[default]
    Nearest,
    /// Any fraction rounds up.
    Up,
    /// Fractions are dropped.
    Down,
}

impl FromStr for RoundingMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "nearest" => Ok(RoundingMode::Nearest),
            "up" => Ok(RoundingMode::Up),
            "down" => Ok(RoundingMode::Down),
            _ => Err(ValidationError::NotAllowed {
                field: "rounding".to_string(),
                allowed: vec!["nearest".into(), "up".into(), "down".into()],
            }),
        }
    }
}

// =============================================================================
// Catalog Item
// =============================================================================

/// Identifier of a sellable item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A sellable item from the catalog. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    pub id: ItemId,

    /// Display name shown on the product grid and cart line.
    pub name: String,

    /// Price per unit (non-negative).
    pub unit_price: Money,

    /// Category used by the product grid filter tabs.
    pub category: String,
}

impl CatalogItem {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        unit_price: Money,
        category: impl Into<String>,
    ) -> Self {
        CatalogItem {
            id: ItemId(id),
            name: name.into(),
            unit_price,
            category: category.into(),
        }
    }
}

// =============================================================================
// Tender
// =============================================================================

/// The payment methods offered on the payment screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TenderType {
    /// Physical cash; the only tender where change is given.
    Cash,
    /// Card swiped or inserted on an external terminal.
    Card,
    /// Tap-to-pay phone wallet.
    Mobile,
    /// Customer scans a QR code.
    Qr,
}

impl TenderType {
    /// Every tender type, in payment-screen tab order.
    pub const ALL: [TenderType; 4] = [
        TenderType::Cash,
        TenderType::Card,
        TenderType::Mobile,
        TenderType::Qr,
    ];

    /// Stable lowercase name, matching the serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            TenderType::Cash => "cash",
            TenderType::Card => "card",
            TenderType::Mobile => "mobile",
            TenderType::Qr => "qr",
        }
    }

    /// Whether the customer may hand over more than the total.
    pub const fn gives_change(&self) -> bool {
        matches!(self, TenderType::Cash)
    }
}

impl fmt::Display for TenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TenderType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cash" => Ok(TenderType::Cash),
            "card" | "credit" | "debit" => Ok(TenderType::Card),
            "mobile" => Ok(TenderType::Mobile),
            "qr" | "qr_code" => Ok(TenderType::Qr),
            _ => Err(ValidationError::NotAllowed {
                field: "tender".to_string(),
                allowed: TenderType::ALL.iter().map(|t| t.as_str().to_string()).collect(),
            }),
        }
    }
}

/// What the customer hands over: a tender type and an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Tender {
    pub tender_type: TenderType,
    pub amount: Money,
}

impl Tender {
    pub fn new(tender_type: TenderType, amount: Money) -> Self {
        Tender {
            tender_type,
            amount,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
