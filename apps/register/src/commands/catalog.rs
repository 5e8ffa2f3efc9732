//! # Catalog Commands
//!
//! Product grid browsing: category tabs plus a name search.

use serde::Serialize;
use till_core::validation::validate_search_query;
use till_core::{CatalogItem, CategoryFilter};
use tracing::debug;

use crate::error::ApiError;
use crate::state::SessionState;

/// Label of the tab that shows every category.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    /// Tab labels, "All" first.
    pub categories: Vec<String>,
    pub products: Vec<CatalogItem>,
}

/// Lists products for the product grid.
///
/// ## Arguments
/// * `category` - Category tab label; missing or "All" shows everything
/// * `query` - Case-insensitive name search; missing or blank matches all
pub fn list_products(
    session: &SessionState,
    category: Option<String>,
    query: Option<String>,
) -> Result<ProductListResponse, ApiError> {
    debug!(?category, ?query, "list_products command");

    let query = validate_search_query(query.as_deref().unwrap_or(""))?;
    let filter = CategoryFilter::from_label(category.as_deref().unwrap_or(ALL_CATEGORIES));

    Ok(session.with_session(|s| {
        let catalog = s.catalog();
        let categories = std::iter::once(ALL_CATEGORIES.to_string())
            .chain(catalog.categories().iter().cloned())
            .collect();
        let products = catalog
            .filter(&filter, &query)
            .into_iter()
            .cloned()
            .collect();

        ProductListResponse {
            categories,
            products,
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_everything() {
        let session = SessionState::default();
        let list = list_products(&session, None, None).unwrap();

        assert_eq!(list.products.len(), 12);
        assert_eq!(list.categories[0], "All");
        assert_eq!(list.categories.len(), 7);
    }

    #[test]
    fn test_category_and_query() {
        let session = SessionState::default();

        let list = list_products(
            &session,
            Some("Electronics".to_string()),
            Some("wireless".to_string()),
        )
        .unwrap();
        let names: Vec<&str> = list.products.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Wireless Earbuds", "Wireless Charger"]);

        let list = list_products(&session, Some("Clothing".to_string()), None).unwrap();
        assert!(list.products.is_empty());
    }

    #[test]
    fn test_query_too_long() {
        let session = SessionState::default();
        assert!(list_products(&session, None, Some("x".repeat(101))).is_err());
    }
}
