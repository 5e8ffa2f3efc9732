//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│  Tender  │────►│   Paid   │       │
//! │  │  Cart    │     │          │     │  Screen  │     │          │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                 │                │             │
//! │       │           add_to_cart       confirm_payment   new_sale         │
//! │       │           update_item       (checkout.rs)         │             │
//! │       │           remove_item                             │             │
//! │       │                │                                  │             │
//! │       └──────── clear_cart ◄──────────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command here is rejected with `INVALID_STATE` while the tender
//! screen is open.

use serde::Serialize;
use till_core::validation::validate_quantity_entry;
use till_core::{CartTotals, Customer, ItemId, Money, PaymentState, SaleSession};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

/// One cart row as the register displays it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView {
    pub item_id: ItemId,
    pub name: String,
    pub category: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub line_total: Money,
}

/// Cart response including lines, totals and payment state.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLineView>,
    pub totals: CartTotals,
    pub total_display: String,
    pub customer: Option<Customer>,
    pub payment_state: PaymentState,
    pub can_checkout: bool,
}

impl CartResponse {
    pub fn from_session(session: &SaleSession, config: &ConfigState) -> Self {
        let lines = session
            .cart()
            .lines()
            .iter()
            .map(|line| CartLineView {
                item_id: line.item.id,
                name: line.item.name.clone(),
                category: line.item.category.clone(),
                unit_price: line.item.unit_price,
                quantity: line.quantity,
                line_total: line.line_total(),
            })
            .collect();
        let totals = session.totals();

        CartResponse {
            lines,
            total_display: config.format_currency(totals.total),
            totals,
            customer: session.customer().cloned(),
            payment_state: session.payment_state().clone(),
            can_checkout: session.can_checkout(),
        }
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Current Sale panel                                                     │
/// │                                                                         │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  CURRENT SALE                                      2 items     │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Wireless Earbuds        x1            $129.99                 │    │
/// │  │  Wireless Charger        x2             $99.98                 │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  Subtotal                              $229.97                 │    │
/// │  │  Tax (8%)                               $18.40                 │    │
/// │  │  ──────────────────────────────────────────────────            │    │
/// │  │  TOTAL                                 $248.37                 │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                                                                         │
/// │  {"command":"get_cart"} → {"ok":{"lines":[...],"totals":{...}}}         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(session: &SessionState, config: &ConfigState) -> CartResponse {
    debug!("get_cart command");
    session.with_session(|s| CartResponse::from_session(s, config))
}

/// Adds one unit of a catalog item to the cart.
///
/// ## Behavior
/// - If item already in cart: quantity increases by one
/// - If item not in cart: added as a new line
pub fn add_to_cart(
    session: &SessionState,
    config: &ConfigState,
    item_id: ItemId,
) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, "add_to_cart command");

    session.with_session_mut(|s| {
        s.add_item(item_id)?;
        Ok(CartResponse::from_session(s, config))
    })
}

/// Sets the quantity of a cart line.
///
/// ## Behavior
/// - Quantity 0 or below: removes the line
/// - Quantity > 999: rejected
/// - Item not in cart: no change
pub fn update_cart_item(
    session: &SessionState,
    config: &ConfigState,
    item_id: ItemId,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, quantity = %quantity, "update_cart_item command");
    validate_quantity_entry(quantity)?;

    session.with_session_mut(|s| {
        s.set_quantity(item_id, quantity)?;
        Ok(CartResponse::from_session(s, config))
    })
}

/// The "+" button on a cart line.
pub fn increment_cart_item(
    session: &SessionState,
    config: &ConfigState,
    item_id: ItemId,
) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, "increment_cart_item command");

    session.with_session_mut(|s| {
        let next = i64::from(s.cart().quantity_of(item_id).unwrap_or(0)) + 1;
        validate_quantity_entry(next)?;
        s.increment(item_id)?;
        Ok(CartResponse::from_session(s, config))
    })
}

/// The "-" button on a cart line; one below one removes the line.
pub fn decrement_cart_item(
    session: &SessionState,
    config: &ConfigState,
    item_id: ItemId,
) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, "decrement_cart_item command");

    session.with_session_mut(|s| {
        s.decrement(item_id)?;
        Ok(CartResponse::from_session(s, config))
    })
}

/// Removes a line from the cart.
pub fn remove_from_cart(
    session: &SessionState,
    config: &ConfigState,
    item_id: ItemId,
) -> Result<CartResponse, ApiError> {
    debug!(item_id = %item_id, "remove_from_cart command");

    session.with_session_mut(|s| {
        s.remove_item(item_id)?;
        Ok(CartResponse::from_session(s, config))
    })
}

/// Clears all lines from the cart.
///
/// ## When Used
/// - Cashier abandons the sale before payment
pub fn clear_cart(session: &SessionState, config: &ConfigState) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");

    session.with_session_mut(|s| {
        s.clear_cart()?;
        Ok(CartResponse::from_session(s, config))
    })
}
