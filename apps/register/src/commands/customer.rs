//! # Customer Commands
//!
//! The customer picker on the sale screen.

use till_core::validation::{validate_customer_id, validate_search_query};
use till_core::Customer;
use tracing::debug;

use super::cart::CartResponse;
use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

/// Lists customers matching `query` by name or id.
pub fn list_customers(
    session: &SessionState,
    query: Option<String>,
) -> Result<Vec<Customer>, ApiError> {
    debug!(?query, "list_customers command");
    let query = validate_search_query(query.as_deref().unwrap_or(""))?;

    Ok(session.with_session(|s| s.customers().search(&query).into_iter().cloned().collect()))
}

/// Attaches a customer to the sale. Selecting the customer already
/// attached detaches them.
pub fn select_customer(
    session: &SessionState,
    config: &ConfigState,
    customer_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(customer_id = %customer_id, "select_customer command");
    let customer_id = validate_customer_id(customer_id)?;

    session.with_session_mut(|s| {
        s.select_customer(customer_id)?;
        Ok(CartResponse::from_session(s, config))
    })
}

/// Detaches the sale's customer, if one is attached.
pub fn clear_customer(session: &SessionState, config: &ConfigState) -> Result<CartResponse, ApiError> {
    debug!("clear_customer command");

    session.with_session_mut(|s| {
        s.clear_customer()?;
        Ok(CartResponse::from_session(s, config))
    })
}
