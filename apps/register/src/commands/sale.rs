//! # Held Sale Commands
//!
//! "Hold Sale" parks the cart so the register can ring up someone else;
//! a held sale is resumed into an empty register.
//!
//! ```text
//! ┌──────────┐  hold_sale   ┌──────────────┐  resume_sale  ┌──────────┐
//! │ In Cart  │─────────────►│  Held sales  │──────────────►│ In Cart  │
//! └──────────┘              │  (in memory) │               └──────────┘
//!      │                    └──────────────┘
//!      ▼
//!  empty register, next customer
//! ```

use serde::Serialize;
use till_core::{Cart, HeldSale, Money, SaleSession};
use tracing::{debug, info};

use super::cart::CartResponse;
use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

/// One entry in the held sales list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeldSaleSummary {
    pub id: String,
    pub item_count: usize,
    pub total_quantity: u64,
    pub total: Money,
    pub total_display: String,
    pub customer_id: Option<String>,
    pub held_at: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldResponse {
    pub held: HeldSaleSummary,
    pub cart: CartResponse,
}

fn summarize(held: &HeldSale, session: &SaleSession, config: &ConfigState) -> HeldSaleSummary {
    let totals = session.pricing().totals(&Cart::from(held.lines.clone()));
    HeldSaleSummary {
        id: held.id.clone(),
        item_count: totals.item_count,
        total_quantity: totals.total_quantity,
        total: totals.total,
        total_display: config.format_currency(totals.total),
        customer_id: held.customer_id.clone(),
        held_at: held.held_at.to_rfc3339(),
    }
}

/// Parks the current cart and customer.
pub fn hold_sale(session: &SessionState, config: &ConfigState) -> Result<HoldResponse, ApiError> {
    debug!("hold_sale command");

    session.with_session_mut(|s| {
        let held = s.hold()?;
        info!(held_id = %held.id, lines = held.item_count(), "Sale held");
        Ok(HoldResponse {
            held: summarize(&held, s, config),
            cart: CartResponse::from_session(s, config),
        })
    })
}

/// Restores a held sale into the (empty) register.
pub fn resume_sale(
    session: &SessionState,
    config: &ConfigState,
    held_id: &str,
) -> Result<CartResponse, ApiError> {
    debug!(held_id = %held_id, "resume_sale command");

    session.with_session_mut(|s| {
        s.resume(held_id)?;
        info!(held_id = %held_id, "Sale resumed");
        Ok(CartResponse::from_session(s, config))
    })
}

/// Lists held sales, oldest first.
pub fn list_held_sales(session: &SessionState, config: &ConfigState) -> Vec<HeldSaleSummary> {
    debug!("list_held_sales command");

    session.with_session(|s| {
        s.held_sales()
            .iter()
            .map(|held| summarize(held, s, config))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use till_core::ItemId;

    fn setup() -> (SessionState, ConfigState) {
        let config = ConfigState::default();
        (SessionState::from_config(&config), config)
    }

    #[test]
    fn test_hold_list_resume() {
        let (session, config) = setup();
        add_to_cart(&session, &config, ItemId(1)).unwrap();
        add_to_cart(&session, &config, ItemId(5)).unwrap();
        add_to_cart(&session, &config, ItemId(5)).unwrap();

        let hold = hold_sale(&session, &config).unwrap();
        assert!(hold.cart.lines.is_empty());
        assert_eq!(hold.held.total, Money::from_cents(24837));
        assert_eq!(hold.held.total_quantity, 3);

        let held = list_held_sales(&session, &config);
        assert_eq!(held.len(), 1);
        assert_eq!(held[0].total_display, "$248.37");

        let cart = resume_sale(&session, &config, &held[0].id).unwrap();
        assert_eq!(cart.lines.len(), 2);
        assert!(list_held_sales(&session, &config).is_empty());
    }

    #[test]
    fn test_hold_empty_cart() {
        let (session, config) = setup();
        let err = hold_sale(&session, &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_resume_unknown() {
        let (session, config) = setup();
        let err = resume_sale(&session, &config, "does-not-exist").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
