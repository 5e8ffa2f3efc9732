//! # Inventory State
//!
//! Stock on hand for the inventory overview. Read-only after startup.

use till_core::inventory::{self, InventoryItem};

#[derive(Debug, Clone)]
pub struct InventoryState {
    items: Vec<InventoryItem>,
}

impl InventoryState {
    pub fn new(items: Vec<InventoryItem>) -> Self {
        InventoryState { items }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }
}

impl Default for InventoryState {
    /// The demo store's stock levels.
    fn default() -> Self {
        InventoryState::new(inventory::sample())
    }
}
