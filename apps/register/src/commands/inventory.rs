//! # Inventory Commands
//!
//! Read-only inventory overview: stock badges, fill bars and the summary
//! cards.

use serde::Serialize;
use till_core::inventory::reorder_list;
use till_core::{InventoryItem, InventorySummary, Money, StockStatus};
use tracing::debug;

use crate::state::InventoryState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub status: StockStatus,
    pub fill_percent: u8,
    pub stock_value: Money,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryResponse {
    pub rows: Vec<InventoryRow>,
    pub summary: InventorySummary,
    /// SKUs to reorder, most urgent first.
    pub reorder: Vec<String>,
}

pub fn get_inventory(inventory: &InventoryState) -> InventoryResponse {
    debug!("get_inventory command");

    let items = inventory.items();
    let rows = items
        .iter()
        .map(|item| InventoryRow {
            status: item.stock.status(),
            fill_percent: item.stock.fill_percent(),
            stock_value: item.stock_value(),
            item: item.clone(),
        })
        .collect();

    InventoryResponse {
        rows,
        summary: InventorySummary::from_items(items),
        reorder: reorder_list(items).into_iter().map(|i| i.sku.clone()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_inventory() {
        let response = get_inventory(&InventoryState::default());

        assert_eq!(response.rows.len(), 5);
        assert_eq!(response.rows[0].status, StockStatus::Good);
        assert_eq!(response.rows[0].fill_percent, 45);
        assert_eq!(response.rows[4].status, StockStatus::Out);
        assert_eq!(response.summary.out_of_stock, 1);
        assert_eq!(response.reorder, vec!["WC005", "BS003"]);
    }

    #[test]
    fn test_row_serializes_flat() {
        let response = get_inventory(&InventoryState::default());
        let json = serde_json::to_value(&response.rows[2]).unwrap();
        assert_eq!(json["sku"], "BS003");
        assert_eq!(json["status"], "low");
        assert_eq!(json["stockValue"], 54000);
    }
}
