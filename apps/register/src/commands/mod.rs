//! # Register Commands Module
//!
//! All commands the register accepts on its input stream.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (Request + dispatch)
//! ├── catalog.rs   ◄─── Product grid listing
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── customer.rs  ◄─── Customer picker
//! ├── checkout.rs  ◄─── Payment screen, new sale
//! ├── sale.rs      ◄─── Hold / resume
//! ├── inventory.rs ◄─── Stock overview
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  stdin:  {"command":"add_to_cart","itemId":5}                           │
//! │         │                                                               │
//! │         │ serde_json::from_str::<Request>                               │
//! │         ▼                                                               │
//! │  Request::AddToCart { item_id: ItemId(5) }                              │
//! │         │                                                               │
//! │         │ dispatch(): each command takes only the state it needs        │
//! │         ▼                                                               │
//! │  cart::add_to_cart(&session, &config, item_id)                          │
//! │      -> Result<CartResponse, ApiError>                                  │
//! │         │                                                               │
//! │         │ serde_json::to_value                                          │
//! │         ▼                                                               │
//! │  stdout: {"ok":{"lines":[...],"totals":{...}}}                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod customer;
pub mod inventory;
pub mod sale;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use till_core::ItemId;

use crate::error::ApiError;
use crate::state::{ConfigState, InventoryState, SessionState};

/// One line of register input, tagged by `"command"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum Request {
    GetCart,
    ListProducts {
        category: Option<String>,
        query: Option<String>,
    },
    AddToCart {
        item_id: ItemId,
    },
    UpdateCartItem {
        item_id: ItemId,
        quantity: i64,
    },
    IncrementCartItem {
        item_id: ItemId,
    },
    DecrementCartItem {
        item_id: ItemId,
    },
    RemoveFromCart {
        item_id: ItemId,
    },
    ClearCart,
    ListCustomers {
        query: Option<String>,
    },
    SelectCustomer {
        customer_id: String,
    },
    ClearCustomer,
    OpenPayment,
    ConfirmPayment {
        tender_type: String,
        /// Decimal string, e.g. "250.00". Optional for non-cash tenders.
        #[serde(default)]
        amount: Option<String>,
    },
    CancelPayment,
    NewSale,
    HoldSale,
    ResumeSale {
        held_id: String,
    },
    ListHeldSales,
    GetInventory,
    GetConfig,
}

impl Request {
    /// Command name as written on the wire, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            Request::GetCart => "get_cart",
            Request::ListProducts { .. } => "list_products",
            Request::AddToCart { .. } => "add_to_cart",
            Request::UpdateCartItem { .. } => "update_cart_item",
            Request::IncrementCartItem { .. } => "increment_cart_item",
            Request::DecrementCartItem { .. } => "decrement_cart_item",
            Request::RemoveFromCart { .. } => "remove_from_cart",
            Request::ClearCart => "clear_cart",
            Request::ListCustomers { .. } => "list_customers",
            Request::SelectCustomer { .. } => "select_customer",
            Request::ClearCustomer => "clear_customer",
            Request::OpenPayment => "open_payment",
            Request::ConfirmPayment { .. } => "confirm_payment",
            Request::CancelPayment => "cancel_payment",
            Request::NewSale => "new_sale",
            Request::HoldSale => "hold_sale",
            Request::ResumeSale { .. } => "resume_sale",
            Request::ListHeldSales => "list_held_sales",
            Request::GetInventory => "get_inventory",
            Request::GetConfig => "get_config",
        }
    }
}

/// One line of register output.
///
/// ```json
/// {"ok": { ... }}
/// {"error": {"code": "NOT_FOUND", "message": "Item not found: 42"}}
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    Ok(Value),
    Error(ApiError),
}

impl From<Result<Value, ApiError>> for Response {
    fn from(result: Result<Value, ApiError>) -> Self {
        match result {
            Ok(value) => Response::Ok(value),
            Err(err) => Response::Error(err),
        }
    }
}

fn respond<T: Serialize>(result: Result<T, ApiError>) -> Result<Value, ApiError> {
    Ok(serde_json::to_value(result?)?)
}

/// Routes a request to its command.
pub fn dispatch(
    request: Request,
    session: &SessionState,
    inventory: &InventoryState,
    config: &ConfigState,
) -> Result<Value, ApiError> {
    match request {
        Request::GetCart => respond(Ok(cart::get_cart(session, config))),
        Request::ListProducts { category, query } => {
            respond(catalog::list_products(session, category, query))
        }
        Request::AddToCart { item_id } => respond(cart::add_to_cart(session, config, item_id)),
        Request::UpdateCartItem { item_id, quantity } => {
            respond(cart::update_cart_item(session, config, item_id, quantity))
        }
        Request::IncrementCartItem { item_id } => {
            respond(cart::increment_cart_item(session, config, item_id))
        }
        Request::DecrementCartItem { item_id } => {
            respond(cart::decrement_cart_item(session, config, item_id))
        }
        Request::RemoveFromCart { item_id } => {
            respond(cart::remove_from_cart(session, config, item_id))
        }
        Request::ClearCart => respond(cart::clear_cart(session, config)),
        Request::ListCustomers { query } => respond(customer::list_customers(session, query)),
        Request::SelectCustomer { customer_id } => {
            respond(customer::select_customer(session, config, &customer_id))
        }
        Request::ClearCustomer => respond(customer::clear_customer(session, config)),
        Request::OpenPayment => respond(checkout::open_payment(session, config)),
        Request::ConfirmPayment {
            tender_type,
            amount,
        } => respond(checkout::confirm_payment(
            session,
            config,
            &tender_type,
            amount.as_deref(),
        )),
        Request::CancelPayment => respond(checkout::cancel_payment(session, config)),
        Request::NewSale => respond(checkout::new_sale(session, config)),
        Request::HoldSale => respond(sale::hold_sale(session, config)),
        Request::ResumeSale { held_id } => respond(sale::resume_sale(session, config, &held_id)),
        Request::ListHeldSales => respond(Ok(sale::list_held_sales(session, config))),
        Request::GetInventory => respond(Ok(inventory::get_inventory(inventory))),
        Request::GetConfig => respond(Ok(config::get_config(config))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_parsing() {
        let request: Request = serde_json::from_str(r#"{"command":"get_cart"}"#).unwrap();
        assert_eq!(request, Request::GetCart);

        let request: Request =
            serde_json::from_str(r#"{"command":"update_cart_item","itemId":5,"quantity":3}"#)
                .unwrap();
        assert_eq!(
            request,
            Request::UpdateCartItem {
                item_id: ItemId(5),
                quantity: 3
            }
        );

        let request: Request = serde_json::from_str(
            r#"{"command":"confirm_payment","tenderType":"cash","amount":"250.00"}"#,
        )
        .unwrap();
        assert_eq!(request.name(), "confirm_payment");

        let request: Request =
            serde_json::from_str(r#"{"command":"confirm_payment","tenderType":"card"}"#).unwrap();
        assert_eq!(
            request,
            Request::ConfirmPayment {
                tender_type: "card".to_string(),
                amount: None
            }
        );

        let request: Request = serde_json::from_str(r#"{"command":"clear_customer"}"#).unwrap();
        assert_eq!(request, Request::ClearCustomer);

        let request: Request = serde_json::from_str(r#"{"command":"list_products"}"#).unwrap();
        assert_eq!(
            request,
            Request::ListProducts {
                category: None,
                query: None
            }
        );
    }

    #[test]
    fn test_request_rejects_unknown() {
        assert!(serde_json::from_str::<Request>(r#"{"command":"refund"}"#).is_err());
        assert!(serde_json::from_str::<Request>(r#"{"command":"add_to_cart"}"#).is_err());
    }

    #[test]
    fn test_response_envelope() {
        let ok = serde_json::to_value(Response::Ok(serde_json::json!({"n": 1}))).unwrap();
        assert_eq!(ok["ok"]["n"], 1);

        let err = serde_json::to_value(Response::Error(ApiError::internal("boom"))).unwrap();
        assert_eq!(err["error"]["code"], "INTERNAL");
    }

    #[test]
    fn test_dispatch_get_config() {
        let config = ConfigState::default();
        let value = dispatch(
            Request::GetConfig,
            &SessionState::from_config(&config),
            &InventoryState::default(),
            &config,
        )
        .unwrap();
        assert_eq!(value["taxRateBps"], 800);
        assert_eq!(value["acceptedTenders"][3], "qr");
    }
}
