//! # Catalog
//!
//! The read-only list of sellable items, plus the product-grid filter
//! (category tab AND name search).
//!
//! ```text
//! Category tabs: [All] [Electronics] [Accessories] [Home] ...
//! Search:        "wire"
//!      │
//!      ▼
//! filter(CategoryFilter::All, "wire")
//!      │
//!      ▼
//! Wireless Earbuds, Wireless Charger, Wireless Mouse
//! ```

use crate::money::Money;
use crate::types::{CatalogItem, ItemId};

/// Category tab selection on the product grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Named(String),
}

impl CategoryFilter {
    /// Builds a filter from a tab label; `"All"` (any case) or an empty
    /// label selects everything.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if label.is_empty() || label.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Named(label.to_string())
        }
    }

    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Named(name) => name == category,
        }
    }
}

/// Static catalog of sellable items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
    categories: Vec<String>,
}

impl Catalog {
    /// Builds a catalog from items; categories are derived in first-seen order.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for item in &items {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        Catalog { items, categories }
    }

    /// Overrides the category tab list (tabs may exist with no items yet).
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// The demo store's product list.
    pub fn sample() -> Self {
        let item = |id: u32, name: &str, cents: i64, category: &str| {
            CatalogItem::new(id, name, Money::from_cents(cents), category)
        };

        Catalog::new(vec![
            item(1, "Wireless Earbuds", 12999, "Electronics"),
            item(2, "Smart Watch", 19999, "Electronics"),
            item(3, "Bluetooth Speaker", 8999, "Electronics"),
            item(4, "Laptop Sleeve", 2999, "Accessories"),
            item(5, "Wireless Charger", 4999, "Electronics"),
            item(6, "Fitness Tracker", 7999, "Electronics"),
            item(7, "Desk Lamp", 3999, "Home"),
            item(8, "Portable Power Bank", 5999, "Electronics"),
            item(9, "Wireless Mouse", 2499, "Accessories"),
            item(10, "USB-C Cable", 1499, "Accessories"),
            item(11, "Keyboard", 4999, "Accessories"),
            item(12, "Monitor Stand", 3499, "Accessories"),
        ])
        .with_categories(
            [
                "Electronics",
                "Accessories",
                "Home",
                "Office",
                "Clothing",
                "Food & Beverage",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }

    /// Looks up an item by id.
    pub fn get(&self, id: ItemId) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// All items in catalog order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Category tab labels (without the leading "All").
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Items in the selected category whose name contains `query`,
    /// case-insensitive. An empty query matches every item.
    pub fn filter(&self, category: &CategoryFilter, query: &str) -> Vec<&CatalogItem> {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|item| category.matches(&item.category))
            .filter(|item| needle.is_empty() || item.name.to_lowercase().contains(&needle))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
