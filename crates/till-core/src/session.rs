//! # Sale Session
//!
//! The single controller a register drives: one cart, one payment state,
//! an optional customer, and any sales parked with "Hold Sale".
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Sale Session                                    │
//! │                                                                         │
//! │   add_item / set_quantity / remove_item / select_customer               │
//! │        │            (only while payment state is Idle)                  │
//! │        ▼                                                                │
//! │   open_payment ──► confirm_payment(tender) ──► new_sale                 │
//! │        │                    │                      │                    │
//! │        └── cancel_payment ◄─┘ (rejected tender     └─► cart cleared,    │
//! │            back to editing     leaves state as is)     customer cleared │
//! │                                                                         │
//! │   hold() ──► cart parked as HeldSale, register free for the next sale   │
//! │   resume(id) ──► parked cart restored into an empty register            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every rejected action leaves the session exactly as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::cart::{Cart, CartLine};
use crate::catalog::Catalog;
use crate::checkout::{Checkout, PaymentRecord, PaymentState};
use crate::customer::{Customer, CustomerDirectory};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::{CartTotals, Pricing};
use crate::types::{ItemId, Tender, TenderType};

/// A cart parked with "Hold Sale".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct HeldSale {
    pub id: String,
    pub lines: Vec<CartLine>,
    pub customer_id: Option<String>,
    #[ts(as = "String")]
    pub held_at: DateTime<Utc>,
}

impl HeldSale {
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }
}

/// One register's sale in progress.
#[derive(Debug, Clone)]
pub struct SaleSession {
    catalog: Catalog,
    customers: CustomerDirectory,
    pricing: Pricing,
    cart: Cart,
    checkout: Checkout,
    customer_id: Option<String>,
    held: Vec<HeldSale>,
}

impl SaleSession {
    /// Session over `catalog` with the sample customers, 8% tax and every
    /// tender type accepted.
    pub fn new(catalog: Catalog) -> Self {
        SaleSession {
            catalog,
            customers: CustomerDirectory::sample(),
            pricing: Pricing::default(),
            cart: Cart::new(),
            checkout: Checkout::default(),
            customer_id: None,
            held: Vec::new(),
        }
    }

    pub fn with_pricing(mut self, pricing: Pricing) -> Self {
        self.pricing = pricing;
        self
    }

    pub fn with_accepted_tenders(mut self, accepted: Vec<TenderType>) -> Self {
        self.checkout = Checkout::new(accepted);
        self
    }

    // -------------------------------------------------------------------------
    // Read access
    // -------------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn customers(&self) -> &CustomerDirectory {
        &self.customers
    }

    pub fn pricing(&self) -> Pricing {
        self.pricing
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn payment_state(&self) -> &PaymentState {
        self.checkout.state()
    }

    /// Amount due while the payment screen is open.
    pub fn amount_due(&self) -> Option<Money> {
        self.checkout.amount_due()
    }

    pub fn accepted_tenders(&self) -> &[TenderType] {
        self.checkout.accepted()
    }

    /// The customer attached to this sale, if any.
    pub fn customer(&self) -> Option<&Customer> {
        self.customer_id
            .as_deref()
            .and_then(|id| self.customers.get(id))
    }

    pub fn held_sales(&self) -> &[HeldSale] {
        &self.held
    }

    pub fn totals(&self) -> CartTotals {
        self.pricing.totals(&self.cart)
    }

    /// Whether "Payment" and "Hold Sale" are enabled.
    pub fn can_checkout(&self) -> bool {
        self.checkout.state().is_idle() && !self.cart.is_empty()
    }

    // -------------------------------------------------------------------------
    // Cart editing
    // -------------------------------------------------------------------------

    fn ensure_editable(&self, action: &'static str) -> CoreResult<()> {
        let state = self.checkout.state();
        if state.is_idle() {
            Ok(())
        } else {
            Err(CoreError::InvalidTransition {
                state: state.name(),
                action,
            })
        }
    }

    /// Adds one unit of a catalog item.
    pub fn add_item(&mut self, item_id: ItemId) -> CoreResult<()> {
        self.ensure_editable("add items")?;
        let item = self
            .catalog
            .get(item_id)
            .ok_or(CoreError::ItemNotFound(item_id))?;
        self.cart.add_item(item);
        Ok(())
    }

    /// Sets a line's quantity; `<= 0` removes it.
    pub fn set_quantity(&mut self, item_id: ItemId, quantity: i64) -> CoreResult<()> {
        self.ensure_editable("change quantities")?;
        self.cart.set_quantity(item_id, quantity);
        Ok(())
    }

    pub fn increment(&mut self, item_id: ItemId) -> CoreResult<()> {
        self.ensure_editable("change quantities")?;
        self.cart.increment(item_id);
        Ok(())
    }

    pub fn decrement(&mut self, item_id: ItemId) -> CoreResult<()> {
        self.ensure_editable("change quantities")?;
        self.cart.decrement(item_id);
        Ok(())
    }

    pub fn remove_item(&mut self, item_id: ItemId) -> CoreResult<()> {
        self.ensure_editable("remove items")?;
        self.cart.remove_item(item_id);
        Ok(())
    }

    /// Abandons the current cart without paying.
    pub fn clear_cart(&mut self) -> CoreResult<()> {
        self.ensure_editable("clear the cart")?;
        self.cart.clear();
        Ok(())
    }

    /// Picks a customer for the sale. Picking the one already selected
    /// deselects it, like the picker's checkmark toggle.
    pub fn select_customer(&mut self, customer_id: &str) -> CoreResult<Option<&Customer>> {
        self.ensure_editable("change customer")?;
        if self.customers.get(customer_id).is_none() {
            return Err(CoreError::CustomerNotFound(customer_id.to_string()));
        }

        if self.customer_id.as_deref() == Some(customer_id) {
            self.customer_id = None;
        } else {
            self.customer_id = Some(customer_id.to_string());
        }
        Ok(self.customer())
    }

    /// Detaches whichever customer is attached, if any.
    pub fn clear_customer(&mut self) -> CoreResult<()> {
        self.ensure_editable("change customer")?;
        self.customer_id = None;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Payment
    // -------------------------------------------------------------------------

    /// Opens the payment screen and fixes the amount due.
    pub fn open_payment(&mut self) -> CoreResult<Money> {
        let totals = self.totals();
        self.checkout.begin(&totals)
    }

    /// Records the payment. A cash tender below the total is rejected and
    /// the payment screen stays open.
    pub fn confirm_payment(&mut self, tender: Tender) -> CoreResult<PaymentRecord> {
        self.checkout
            .confirm(tender, self.customer_id.clone(), Utc::now())
    }

    /// Closes the payment screen without paying; the cart is kept.
    pub fn cancel_payment(&mut self) -> CoreResult<()> {
        self.checkout.cancel()
    }

    /// Starts the next sale: clears cart and customer and resets payment.
    /// Returns the record of the sale just finished, if it was paid.
    pub fn new_sale(&mut self) -> CoreResult<Option<PaymentRecord>> {
        let finished = self.checkout.reset()?;
        self.cart.clear();
        self.customer_id = None;
        Ok(finished)
    }

    // -------------------------------------------------------------------------
    // Held sales
    // -------------------------------------------------------------------------

    /// Parks the current cart and customer, leaving the register empty.
    pub fn hold(&mut self) -> CoreResult<HeldSale> {
        self.ensure_editable("hold the sale")?;
        if self.cart.is_empty() {
            return Err(CoreError::CartEmpty);
        }

        let held = HeldSale {
            id: Uuid::new_v4().to_string(),
            lines: self.cart.lines().to_vec(),
            customer_id: self.customer_id.take(),
            held_at: Utc::now(),
        };
        self.cart.clear();
        self.held.push(held.clone());
        Ok(held)
    }

    /// Restores a held sale. The register must have an empty cart.
    pub fn resume(&mut self, held_id: &str) -> CoreResult<()> {
        self.ensure_editable("resume a held sale")?;
        if !self.cart.is_empty() {
            return Err(CoreError::CartNotEmpty {
                lines: self.cart.item_count(),
            });
        }

        let index = self
            .held
            .iter()
            .position(|h| h.id == held_id)
            .ok_or_else(|| CoreError::HeldSaleNotFound(held_id.to_string()))?;

        let held = self.held.remove(index);
        self.cart = Cart::from(held.lines);
        self.customer_id = held
            .customer_id
            .filter(|id| self.customers.get(id).is_some());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoundingMode, TaxRate};

    const EARBUDS: ItemId = ItemId(1);
    const CHARGER: ItemId = ItemId(5);

    fn session_with_sample_cart() -> SaleSession {
        let mut session = SaleSession::new(Catalog::sample());
        session.add_item(EARBUDS).unwrap();
        session.add_item(CHARGER).unwrap();
        session.add_item(CHARGER).unwrap();
        session
    }

    fn cash(cents: i64) -> Tender {
        Tender::new(TenderType::Cash, Money::from_cents(cents))
    }

    #[test]
    fn test_full_sale() {
        let mut session = session_with_sample_cart();
        assert!(session.can_checkout());

        let due = session.open_payment().unwrap();
        assert_eq!(due, Money::from_cents(24837));

        let record = session.confirm_payment(cash(25000)).unwrap();
        assert_eq!(record.change, Money::from_cents(163));
        assert!(matches!(session.payment_state(), PaymentState::Completed(_)));

        let finished = session.new_sale().unwrap().unwrap();
        assert_eq!(finished.transaction_id, record.transaction_id);
        assert!(session.cart().is_empty());
        assert!(session.payment_state().is_idle());
        assert!(session.totals().total.is_zero());
    }

    #[test]
    fn test_unknown_item() {
        let mut session = SaleSession::new(Catalog::sample());
        assert_eq!(
            session.add_item(ItemId(404)),
            Err(CoreError::ItemNotFound(ItemId(404)))
        );
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_open_payment_with_empty_cart() {
        let mut session = SaleSession::new(Catalog::sample());
        assert!(!session.can_checkout());
        assert_eq!(session.open_payment(), Err(CoreError::CartEmpty));
        assert!(session.payment_state().is_idle());
    }

    #[test]
    fn test_cart_locked_while_awaiting_tender() {
        let mut session = session_with_sample_cart();
        session.open_payment().unwrap();

        assert!(matches!(
            session.add_item(EARBUDS),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert!(session.set_quantity(CHARGER, 0).is_err());
        assert!(session.remove_item(EARBUDS).is_err());
        assert!(session.clear_cart().is_err());
        assert!(session.hold().is_err());
        assert!(session.new_sale().is_err());

        // Amount due didn't move
        assert_eq!(session.totals().total, Money::from_cents(24837));
    }

    #[test]
    fn test_short_tender_keeps_payment_open() {
        let mut session = session_with_sample_cart();
        session.open_payment().unwrap();

        let err = session.confirm_payment(cash(20000)).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientTender { .. }));
        assert!(matches!(
            session.payment_state(),
            PaymentState::AwaitingTender { .. }
        ));

        // A corrected amount then goes through
        assert!(session.confirm_payment(cash(24837)).is_ok());
    }

    #[test]
    fn test_cancel_payment_keeps_cart() {
        let mut session = session_with_sample_cart();
        session.open_payment().unwrap();
        session.cancel_payment().unwrap();

        assert_eq!(session.cart().item_count(), 2);
        session.set_quantity(CHARGER, 1).unwrap();
        assert_eq!(session.totals().subtotal, Money::from_cents(17998));
    }

    #[test]
    fn test_customer_toggle_and_record() {
        let mut session = session_with_sample_cart();

        let picked = session.select_customer("sophia.davis").unwrap();
        assert_eq!(picked.unwrap().name, "Sophia Davis");

        assert!(session.select_customer("sophia.davis").unwrap().is_none());
        session.select_customer("noah.thompson").unwrap();

        assert_eq!(
            session.select_customer("nobody"),
            Err(CoreError::CustomerNotFound("nobody".to_string()))
        );
        assert_eq!(session.customer().unwrap().id, "noah.thompson");

        session.open_payment().unwrap();
        let record = session.confirm_payment(cash(30000)).unwrap();
        assert_eq!(record.customer_id.as_deref(), Some("noah.thompson"));

        session.new_sale().unwrap();
        assert!(session.customer().is_none());
    }

    #[test]
    fn test_clear_customer() {
        let mut session = session_with_sample_cart();
        session.select_customer("jackson.miller").unwrap();
        session.clear_customer().unwrap();
        assert!(session.customer().is_none());

        // Clearing with nobody attached is fine
        session.clear_customer().unwrap();

        session.select_customer("jackson.miller").unwrap();
        session.open_payment().unwrap();
        assert!(matches!(
            session.clear_customer(),
            Err(CoreError::InvalidTransition { .. })
        ));
        assert_eq!(session.customer().unwrap().id, "jackson.miller");
    }

    #[test]
    fn test_card_below_total_completes() {
        let mut session = SaleSession::new(Catalog::sample());
        session.add_item(EARBUDS).unwrap();
        assert_eq!(session.open_payment().unwrap(), Money::from_cents(14039));
        assert_eq!(session.amount_due(), Some(Money::from_cents(14039)));

        let record = session
            .confirm_payment(Tender::new(TenderType::Card, Money::from_cents(100)))
            .unwrap();
        assert_eq!(record.amount_tendered, Money::from_cents(14039));
        assert!(record.change.is_zero());
        assert_eq!(session.amount_due(), None);
    }

    #[test]
    fn test_hold_and_resume() {
        let mut session = session_with_sample_cart();
        session.select_customer("william.kim").unwrap();

        let held = session.hold().unwrap();
        assert_eq!(held.item_count(), 2);
        assert!(session.cart().is_empty());
        assert!(session.customer().is_none());
        assert_eq!(session.held_sales().len(), 1);

        // Ring up someone else in between
        session.add_item(ItemId(10)).unwrap();
        assert_eq!(
            session.resume(&held.id),
            Err(CoreError::CartNotEmpty { lines: 1 })
        );
        session.clear_cart().unwrap();

        session.resume(&held.id).unwrap();
        assert!(session.held_sales().is_empty());
        assert_eq!(session.cart().quantity_of(CHARGER), Some(2));
        assert_eq!(session.customer().unwrap().id, "william.kim");
        assert_eq!(session.totals().total, Money::from_cents(24837));
    }

    #[test]
    fn test_hold_empty_cart_and_unknown_resume() {
        let mut session = SaleSession::new(Catalog::sample());
        assert_eq!(session.hold(), Err(CoreError::CartEmpty));
        assert_eq!(
            session.resume("missing"),
            Err(CoreError::HeldSaleNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_custom_pricing_and_tenders() {
        let mut session = SaleSession::new(Catalog::sample())
            .with_pricing(Pricing::new(TaxRate::from_bps(825), RoundingMode::Nearest))
            .with_accepted_tenders(vec![TenderType::Cash]);
        session.add_item(ItemId(10)).unwrap(); // $14.99

        // $14.99 × 8.25% = $1.236675 → $1.24
        assert_eq!(session.totals().tax, Money::from_cents(124));

        session.open_payment().unwrap();
        assert_eq!(
            session.confirm_payment(Tender::new(TenderType::Card, Money::from_cents(1623))),
            Err(CoreError::TenderNotAccepted(TenderType::Card))
        );
    }
}
