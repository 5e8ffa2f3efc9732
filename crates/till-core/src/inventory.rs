//! # Inventory Status
//!
//! Stock-level classification for the inventory overview.
//!
//! ```text
//!   current == 0        → Out
//!   current <= min      → Low
//!   otherwise           → Good
//!
//!   fill bar = current / max × 100, capped at 100
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::ItemId;

/// Stock status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Good,
    Low,
    Out,
}

/// On-hand quantity with its reorder thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockLevel {
    pub current: u32,
    pub min: u32,
    pub max: u32,
}

impl StockLevel {
    pub fn new(current: u32, min: u32, max: u32) -> Self {
        StockLevel { current, min, max }
    }

    pub fn status(&self) -> StockStatus {
        if self.current == 0 {
            StockStatus::Out
        } else if self.current <= self.min {
            StockStatus::Low
        } else {
            StockStatus::Good
        }
    }

    /// How full the shelf is relative to `max`, in whole percent.
    pub fn fill_percent(&self) -> u8 {
        if self.max == 0 {
            return 0;
        }
        let pct = u64::from(self.current) * 100 / u64::from(self.max);
        pct.min(100) as u8
    }
}

/// One row of the inventory table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub item_id: ItemId,
    pub name: String,
    pub sku: String,
    pub stock: StockLevel,
    pub unit_cost: Money,
}

impl InventoryItem {
    /// On-hand quantity valued at cost.
    pub fn stock_value(&self) -> Money {
        self.unit_cost.multiply_quantity(i64::from(self.stock.current))
    }
}

/// Header cards of the inventory overview.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub item_count: usize,
    pub total_value: Money,
    pub low_stock: usize,
    pub out_of_stock: usize,
}

impl InventorySummary {
    pub fn from_items(items: &[InventoryItem]) -> Self {
        items.iter().fold(
            InventorySummary {
                item_count: items.len(),
                ..Default::default()
            },
            |mut summary, item| {
                summary.total_value += item.stock_value();
                match item.stock.status() {
                    StockStatus::Low => summary.low_stock += 1,
                    StockStatus::Out => summary.out_of_stock += 1,
                    StockStatus::Good => {}
                }
                summary
            },
        )
    }
}

/// Stock on hand for the demo store's catalog.
pub fn sample() -> Vec<InventoryItem> {
    let row = |id: u32, name: &str, sku: &str, stock: StockLevel, cost_cents: i64| InventoryItem {
        item_id: ItemId(id),
        name: name.to_string(),
        sku: sku.to_string(),
        stock,
        unit_cost: Money::from_cents(cost_cents),
    };

    vec![
        row(1, "Wireless Earbuds", "WE001", StockLevel::new(45, 20, 100), 6500),
        row(2, "Smart Watch", "SW002", StockLevel::new(23, 15, 80), 12000),
        row(3, "Bluetooth Speaker", "BS003", StockLevel::new(12, 25, 75), 4500),
        row(4, "Laptop Sleeve", "LS004", StockLevel::new(67, 30, 100), 1500),
        row(5, "Wireless Charger", "WC005", StockLevel::new(0, 20, 60), 2500),
    ]
}

/// Items needing a reorder (low or out), most urgent first.
pub fn reorder_list(items: &[InventoryItem]) -> Vec<&InventoryItem> {
    let mut list: Vec<&InventoryItem> = items
        .iter()
        .filter(|item| item.stock.status() != StockStatus::Good)
        .collect();
    list.sort_by_key(|item| (item.stock.current, item.stock.fill_percent()));
    list
}
