//! # Checkout Commands
//!
//! The payment screen: open it, take a tender, start the next sale.
//!
//! ```text
//! open_payment ──► confirm_payment ──► new_sale
//!      │                 │
//!      └─ cancel_payment ┘ (only before a tender is accepted)
//! ```

use serde::Serialize;
use till_core::validation::parse_tender_amount;
use till_core::{Money, PaymentRecord, Tender, TenderType, ValidationError};
use tracing::{debug, info};

use super::cart::CartResponse;
use crate::error::ApiError;
use crate::state::{ConfigState, SessionState};

/// What the tender screen shows when it opens.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPrompt {
    pub amount_due: Money,
    pub amount_due_display: String,
    pub accepted_tenders: Vec<TenderType>,
}

/// The confirmation shown after a tender is accepted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub store_name: String,
    pub record: PaymentRecord,
    pub amount_tendered_display: String,
    pub change_display: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSaleResponse {
    /// The sale just paid for, if the register was showing one.
    pub finished: Option<PaymentRecord>,
    pub cart: CartResponse,
}

/// Opens the tender screen for the current cart.
///
/// ## Errors
/// - `CART_ERROR` if the cart is empty
/// - `INVALID_STATE` if a payment is already open or completed
pub fn open_payment(session: &SessionState, config: &ConfigState) -> Result<PaymentPrompt, ApiError> {
    debug!("open_payment command");

    session.with_session_mut(|s| {
        let amount_due = s.open_payment()?;
        info!(amount_due = %amount_due, lines = s.cart().item_count(), "Payment opened");

        Ok(PaymentPrompt {
            amount_due,
            amount_due_display: config.format_currency(amount_due),
            accepted_tenders: s.accepted_tenders().to_vec(),
        })
    })
}

/// Takes a tender and completes the sale.
///
/// ## Arguments
/// * `tender_type` - `cash`, `card`, `mobile` or `qr`
/// * `amount` - Decimal amount handed over, e.g. `"250.00"`. Required for
///   cash; card, mobile and QR are charged the amount due and may omit it.
///
/// ## Errors
/// A cash tender below the amount due is rejected with `PAYMENT_ERROR` and
/// the tender screen stays open.
pub fn confirm_payment(
    session: &SessionState,
    config: &ConfigState,
    tender_type: &str,
    amount: Option<&str>,
) -> Result<PaymentResponse, ApiError> {
    debug!(tender_type = %tender_type, ?amount, "confirm_payment command");

    let tender_type = tender_type.parse::<TenderType>()?;

    let record = session.with_session_mut(|s| -> Result<PaymentRecord, ApiError> {
        let amount_due = s.amount_due().unwrap_or_default();
        let amount = match amount {
            Some(input) => parse_tender_amount(input, amount_due)?,
            None if tender_type.gives_change() => {
                return Err(ValidationError::Required {
                    field: "amount".to_string(),
                }
                .into())
            }
            None => amount_due,
        };
        Ok(s.confirm_payment(Tender::new(tender_type, amount))?)
    })?;
    info!(
        transaction_id = %record.transaction_id,
        tender = %record.tender_type,
        amount_due = %record.amount_due,
        change = %record.change,
        "Payment completed"
    );

    Ok(PaymentResponse {
        store_name: config.store_name.clone(),
        amount_tendered_display: config.format_currency(record.amount_tendered),
        change_display: config.format_currency(record.change),
        record,
    })
}

/// Closes the tender screen without paying. The cart is kept.
pub fn cancel_payment(session: &SessionState, config: &ConfigState) -> Result<CartResponse, ApiError> {
    debug!("cancel_payment command");

    session.with_session_mut(|s| {
        s.cancel_payment()?;
        info!("Payment cancelled");
        Ok(CartResponse::from_session(s, config))
    })
}

/// Starts the next sale: empty cart, no customer, payment reset.
pub fn new_sale(session: &SessionState, config: &ConfigState) -> Result<NewSaleResponse, ApiError> {
    debug!("new_sale command");

    session.with_session_mut(|s| {
        let finished = s.new_sale()?;
        info!(
            finished = ?finished.as_ref().map(|r| r.transaction_id.as_str()),
            "New sale started"
        );
        Ok(NewSaleResponse {
            finished,
            cart: CartResponse::from_session(s, config),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::add_to_cart;
    use crate::error::ErrorCode;
    use till_core::{Catalog, CatalogItem, ItemId, PaymentState, SaleSession};

    fn setup_with_sample_cart() -> (SessionState, ConfigState) {
        let config = ConfigState::default();
        let session = SessionState::from_config(&config);
        add_to_cart(&session, &config, ItemId(1)).unwrap();
        add_to_cart(&session, &config, ItemId(5)).unwrap();
        add_to_cart(&session, &config, ItemId(5)).unwrap();
        (session, config)
    }

    #[test]
    fn test_cash_sale_with_change() {
        let (session, config) = setup_with_sample_cart();

        let prompt = open_payment(&session, &config).unwrap();
        assert_eq!(prompt.amount_due, Money::from_cents(24837));
        assert_eq!(prompt.amount_due_display, "$248.37");
        assert_eq!(prompt.accepted_tenders.len(), 4);

        let paid = confirm_payment(&session, &config, "cash", Some("250.00")).unwrap();
        assert_eq!(paid.record.change, Money::from_cents(163));
        assert_eq!(paid.change_display, "$1.63");
        assert_eq!(paid.record.transaction_id.len(), 8);

        let next = new_sale(&session, &config).unwrap();
        assert_eq!(
            next.finished.unwrap().transaction_id,
            paid.record.transaction_id
        );
        assert!(next.cart.lines.is_empty());
        assert_eq!(next.cart.payment_state, PaymentState::Idle);
    }

    #[test]
    fn test_card_charged_exact_amount() {
        let (session, config) = setup_with_sample_cart();
        open_payment(&session, &config).unwrap();

        let paid = confirm_payment(&session, &config, "card", Some("300")).unwrap();
        assert_eq!(paid.record.amount_tendered, Money::from_cents(24837));
        assert!(paid.record.change.is_zero());
    }

    #[test]
    fn test_card_below_total_is_accepted() {
        let config = ConfigState::default();
        let session = SessionState::from_config(&config);
        add_to_cart(&session, &config, ItemId(1)).unwrap();
        open_payment(&session, &config).unwrap();

        let paid = confirm_payment(&session, &config, "card", Some("1.00")).unwrap();
        assert_eq!(paid.record.amount_due, Money::from_cents(14039));
        assert_eq!(paid.record.amount_tendered, Money::from_cents(14039));
        assert_eq!(paid.amount_tendered_display, "$140.39");
        assert_eq!(paid.change_display, "$0.00");
    }

    #[test]
    fn test_card_without_amount() {
        let (session, config) = setup_with_sample_cart();
        open_payment(&session, &config).unwrap();

        let paid = confirm_payment(&session, &config, "card", None).unwrap();
        assert_eq!(paid.record.amount_tendered, Money::from_cents(24837));
        assert!(paid.record.change.is_zero());
    }

    #[test]
    fn test_cash_without_amount() {
        let (session, config) = setup_with_sample_cart();
        open_payment(&session, &config).unwrap();

        let err = confirm_payment(&session, &config, "cash", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(
            session.with_session(|s| s.amount_due()),
            Some(Money::from_cents(24837))
        );
    }

    #[test]
    fn test_free_sale_takes_zero_tender() {
        let config = ConfigState::default();
        let session = SessionState::new(SaleSession::new(Catalog::new(vec![CatalogItem::new(
            1,
            "Free Sample",
            Money::zero(),
            "Promo",
        )])));
        add_to_cart(&session, &config, ItemId(1)).unwrap();

        let prompt = open_payment(&session, &config).unwrap();
        assert!(prompt.amount_due.is_zero());

        let paid = confirm_payment(&session, &config, "cash", Some("0")).unwrap();
        assert!(paid.record.change.is_zero());
    }

    #[test]
    fn test_zero_cash_rejected_when_amount_due() {
        let (session, config) = setup_with_sample_cart();
        open_payment(&session, &config).unwrap();

        let err = confirm_payment(&session, &config, "cash", Some("0")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_short_tender_rejected() {
        let (session, config) = setup_with_sample_cart();
        open_payment(&session, &config).unwrap();

        let err = confirm_payment(&session, &config, "cash", Some("200.00")).unwrap_err();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert!(matches!(
            session.with_session(|s| s.payment_state().clone()),
            PaymentState::AwaitingTender { .. }
        ));
    }

    #[test]
    fn test_bad_tender_input() {
        let (session, config) = setup_with_sample_cart();
        open_payment(&session, &config).unwrap();

        let err = confirm_payment(&session, &config, "cheque", Some("250")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = confirm_payment(&session, &config, "cash", Some("2.5.0")).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_open_payment_empty_cart() {
        let config = ConfigState::default();
        let session = SessionState::from_config(&config);

        let err = open_payment(&session, &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_cancel_then_edit() {
        let (session, config) = setup_with_sample_cart();
        open_payment(&session, &config).unwrap();

        let err = add_to_cart(&session, &config, ItemId(2)).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);

        let cart = cancel_payment(&session, &config).unwrap();
        assert_eq!(cart.lines.len(), 2);
        assert!(add_to_cart(&session, &config, ItemId(2)).is_ok());
    }

    #[test]
    fn test_new_sale_while_awaiting_tender() {
        let (session, config) = setup_with_sample_cart();
        open_payment(&session, &config).unwrap();

        let err = new_sale(&session, &config).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidState);
    }
}
