//! # Pricing
//!
//! Subtotal, tax and total for a cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Subtotal                                          $229.97              │
//! │      Σ unit_price × quantity                                            │
//! │  Tax (8%)                                           $18.40              │
//! │      subtotal × rate, rounded ONCE to whole cents                       │
//! │  ────────────────────────────────────────────────────────               │
//! │  Total                                             $248.37              │
//! │      subtotal + tax (exact, no further rounding)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tax is taken on the subtotal, not per line, so `total == subtotal + tax`
//! holds to the cent for every cart.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::{RoundingMode, TaxRate};
use crate::DEFAULT_TAX_RATE_BPS;

/// Tax settings applied to every cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    pub tax_rate: TaxRate,
    pub rounding: RoundingMode,
}

impl Default for Pricing {
    /// 8% sales tax, rounded half-up.
    fn default() -> Self {
        Pricing {
            tax_rate: TaxRate::from_bps(DEFAULT_TAX_RATE_BPS),
            rounding: RoundingMode::Nearest,
        }
    }
}

impl Pricing {
    pub fn new(tax_rate: TaxRate, rounding: RoundingMode) -> Self {
        Pricing { tax_rate, rounding }
    }

    /// Σ line totals. Zero for an empty cart.
    pub fn subtotal(&self, cart: &Cart) -> Money {
        cart.lines().iter().map(|line| line.line_total()).sum()
    }

    /// Tax on the subtotal.
    pub fn tax(&self, cart: &Cart) -> Money {
        self.subtotal(cart).calculate_tax(self.tax_rate, self.rounding)
    }

    /// Subtotal plus tax.
    ///
    /// ```rust
    /// use till_core::{Cart, CatalogItem, Money, Pricing};
    ///
    /// let mut cart = Cart::new();
    /// cart.add_item(&CatalogItem::new(10, "USB-C Cable", Money::from_cents(1499), "Accessories"));
    ///
    /// let pricing = Pricing::default();
    /// assert_eq!(pricing.total(&cart), Money::from_cents(1619)); // $14.99 + $1.20
    /// ```
    pub fn total(&self, cart: &Cart) -> Money {
        self.totals(cart).total
    }

    /// All figures for the cart footer in one pass.
    pub fn totals(&self, cart: &Cart) -> CartTotals {
        let subtotal = self.subtotal(cart);
        let tax = subtotal.calculate_tax(self.tax_rate, self.rounding);

        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            subtotal,
            tax,
            total: subtotal + tax,
            tax_rate: self.tax_rate,
        }
    }
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub tax_rate: TaxRate,
}
