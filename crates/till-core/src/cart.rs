//! # Cart
//!
//! The in-progress collection of items and quantities for one sale.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Operations                                  │
//! │                                                                         │
//! │  Screen Action            Operation               Cart Change           │
//! │  ─────────────            ─────────               ───────────           │
//! │                                                                         │
//! │  Tap product tile ──────► add_item(item) ───────► qty += 1 or push     │
//! │                                                                         │
//! │  Tap [+] / [-] ─────────► increment / decrement ► qty ± 1               │
//! │                                                                         │
//! │  Type quantity ─────────► set_quantity(id, n) ──► qty = n (n<=0 drops) │
//! │                                                                         │
//! │  Tap trash icon ────────► remove_item(id) ──────► line removed         │
//! │                                                                         │
//! │  New sale ──────────────► clear() ──────────────► lines.clear()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - At most one line per item id
//! - Every line has quantity >= 1; anything that would take it to zero
//!   removes the line instead
//! - Line order is insertion order

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CatalogItem, ItemId};

/// One (item, quantity) entry in the cart.
///
/// The item is a snapshot taken when first added, so the line keeps its
/// price even if the catalog is later swapped out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub item: CatalogItem,
    pub quantity: u32,
}

impl CartLine {
    fn new(item: &CatalogItem) -> Self {
        CartLine {
            item: item.clone(),
            quantity: 1,
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.item.unit_price.multiply_quantity(i64::from(self.quantity))
    }
}

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds one unit of `item`: bumps the existing line or appends a new one.
    pub fn add_item(&mut self, item: &CatalogItem) {
        match self.line_mut(item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(item)),
        }
    }

    /// Sets the quantity of an existing line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line (no-op if absent)
    /// - item not in cart: no-op
    pub fn set_quantity(&mut self, item_id: ItemId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(item_id);
            return;
        }

        if let Some(line) = self.line_mut(item_id) {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// The [+] button: one more of an item already in the cart.
    pub fn increment(&mut self, item_id: ItemId) {
        if let Some(quantity) = self.quantity_of(item_id) {
            self.set_quantity(item_id, i64::from(quantity) + 1);
        }
    }

    /// The [-] button: one fewer, dropping the line at zero.
    pub fn decrement(&mut self, item_id: ItemId) {
        if let Some(quantity) = self.quantity_of(item_id) {
            self.set_quantity(item_id, i64::from(quantity) - 1);
        }
    }

    /// Removes a line if present.
    pub fn remove_item(&mut self, item_id: ItemId) {
        self.lines.retain(|line| line.item.id != item_id);
    }

    /// Clears all lines.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_id: ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item.id == item_id)
    }

    fn line_mut(&mut self, item_id: ItemId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item.id == item_id)
    }

    pub fn quantity_of(&self, item_id: ItemId) -> Option<u32> {
        self.line(item_id).map(|line| line.quantity)
    }

    /// Number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl From<Vec<CartLine>> for Cart {
    fn from(lines: Vec<CartLine>) -> Self {
        Cart { lines }
    }
}
