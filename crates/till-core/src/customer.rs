//! # Customers
//!
//! The customer picker on the sale screen: a small static directory that a
//! sale can be attributed to.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A customer that can be attached to a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Customer {
    /// Slug id, e.g. `"jackson.miller"`.
    pub id: String,
    pub name: String,
}

impl Customer {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Customer {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Read-only list of known customers.
#[derive(Debug, Clone, Default)]
pub struct CustomerDirectory {
    customers: Vec<Customer>,
}

impl CustomerDirectory {
    pub fn new(customers: Vec<Customer>) -> Self {
        CustomerDirectory { customers }
    }

    /// The demo store's regulars.
    pub fn sample() -> Self {
        CustomerDirectory::new(vec![
            Customer::new("jackson.miller", "Jackson Miller"),
            Customer::new("sophia.davis", "Sophia Davis"),
            Customer::new("william.kim", "William Kim"),
            Customer::new("olivia.martinez", "Olivia Martinez"),
            Customer::new("noah.thompson", "Noah Thompson"),
        ])
    }

    pub fn get(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    /// Customers whose name or id contains `query`, case-insensitive.
    pub fn search(&self, query: &str) -> Vec<&Customer> {
        let needle = query.trim().to_lowercase();
        self.customers
            .iter()
            .filter(|c| {
                needle.is_empty()
                    || c.name.to_lowercase().contains(&needle)
                    || c.id.contains(&needle)
            })
            .collect()
    }
}
