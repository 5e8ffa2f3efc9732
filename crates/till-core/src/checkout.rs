//! # Checkout
//!
//! The payment state machine behind the payment screen.
//!
//! ## States
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────────┐   begin(totals)   ┌────────────────┐                    │
//! │   │   Idle   │──────────────────►│ AwaitingTender │                    │
//! │   │          │◄──────────────────│  amount_due    │                    │
//! │   └──────────┘     cancel()      └───────┬────────┘                    │
//! │        ▲                                 │ confirm(tender)              │
//! │        │                                 ▼                              │
//! │        │         reset()         ┌────────────────┐                    │
//! │        └─────────────────────────│   Completed    │                    │
//! │                                  │ PaymentRecord  │                    │
//! │                                  └────────────────┘                    │
//! │                                                                         │
//! │  Anything else → CoreError::InvalidTransition, state untouched          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No gateway is called. Confirming a tender that covers the amount due
//! always succeeds.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing::CartTotals;
use crate::types::{Tender, TenderType};
use crate::TRANSACTION_ID_LEN;

/// A recorded (not settled) payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    /// Short upper-case id shown on the success screen.
    pub transaction_id: String,
    pub tender_type: TenderType,
    pub amount_due: Money,
    pub amount_tendered: Money,
    /// `amount_tendered − amount_due`, never negative.
    pub change: Money,
    pub customer_id: Option<String>,
    #[ts(as = "String")]
    pub completed_at: DateTime<Utc>,
}

/// Where the current sale is in the payment flow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentState {
    /// Building the cart.
    #[default]
    Idle,
    /// Payment screen open with a fixed amount due.
    AwaitingTender {
        #[serde(rename = "amountDue")]
        amount_due: Money,
    },
    /// Payment recorded; waiting for "New Sale".
    Completed(PaymentRecord),
}

impl PaymentState {
    /// Human-readable state name used in error messages.
    pub const fn name(&self) -> &'static str {
        match self {
            PaymentState::Idle => "idle",
            PaymentState::AwaitingTender { .. } => "awaiting tender",
            PaymentState::Completed(_) => "completed",
        }
    }

    pub const fn is_idle(&self) -> bool {
        matches!(self, PaymentState::Idle)
    }
}

/// Payment state plus the tender types this register accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    state: PaymentState,
    accepted: Vec<TenderType>,
}

impl Default for Checkout {
    fn default() -> Self {
        Checkout::new(TenderType::ALL.to_vec())
    }
}

impl Checkout {
    pub fn new(accepted: Vec<TenderType>) -> Self {
        Checkout {
            state: PaymentState::Idle,
            accepted,
        }
    }

    pub fn state(&self) -> &PaymentState {
        &self.state
    }

    pub fn accepted(&self) -> &[TenderType] {
        &self.accepted
    }

    pub fn accepts(&self, tender_type: TenderType) -> bool {
        self.accepted.contains(&tender_type)
    }

    /// Amount due while awaiting tender.
    pub fn amount_due(&self) -> Option<Money> {
        match self.state {
            PaymentState::AwaitingTender { amount_due } => Some(amount_due),
            _ => None,
        }
    }

    fn invalid(&self, action: &'static str) -> CoreError {
        CoreError::InvalidTransition {
            state: self.state.name(),
            action,
        }
    }

    /// `Idle → AwaitingTender`. Requires a non-empty cart.
    pub fn begin(&mut self, totals: &CartTotals) -> CoreResult<Money> {
        if !self.state.is_idle() {
            return Err(self.invalid("open payment"));
        }
        if totals.item_count == 0 {
            return Err(CoreError::CartEmpty);
        }

        self.state = PaymentState::AwaitingTender {
            amount_due: totals.total,
        };
        Ok(totals.total)
    }

    /// `AwaitingTender → Completed`.
    ///
    /// ## Rules
    /// - tender type must be accepted by this register
    /// - cash must cover the amount due and gives change
    /// - card, mobile and QR are charged exactly the amount due; the
    ///   tendered amount is ignored
    pub fn confirm(
        &mut self,
        tender: Tender,
        customer_id: Option<String>,
        now: DateTime<Utc>,
    ) -> CoreResult<PaymentRecord> {
        let amount_due = self
            .amount_due()
            .ok_or_else(|| self.invalid("confirm payment"))?;

        if !self.accepts(tender.tender_type) {
            return Err(CoreError::TenderNotAccepted(tender.tender_type));
        }

        let amount_tendered = if tender.tender_type.gives_change() {
            if tender.amount < amount_due {
                return Err(CoreError::InsufficientTender {
                    due: amount_due,
                    tendered: tender.amount,
                });
            }
            tender.amount
        } else {
            amount_due
        };

        let record = PaymentRecord {
            transaction_id: generate_transaction_id(),
            tender_type: tender.tender_type,
            amount_due,
            amount_tendered,
            change: amount_tendered.saturating_sub_floor(amount_due),
            customer_id,
            completed_at: now,
        };

        self.state = PaymentState::Completed(record.clone());
        Ok(record)
    }

    /// `AwaitingTender → Idle`: payment screen dismissed, cart kept.
    pub fn cancel(&mut self) -> CoreResult<()> {
        match self.state {
            PaymentState::AwaitingTender { .. } => {
                self.state = PaymentState::Idle;
                Ok(())
            }
            _ => Err(self.invalid("cancel payment")),
        }
    }

    /// `Completed → Idle` (or `Idle → Idle`). Returns the finished record,
    /// if any. Rejected while a tender is pending.
    pub fn reset(&mut self) -> CoreResult<Option<PaymentRecord>> {
        match std::mem::take(&mut self.state) {
            PaymentState::Idle => Ok(None),
            PaymentState::Completed(record) => Ok(Some(record)),
            pending @ PaymentState::AwaitingTender { .. } => {
                self.state = pending;
                Err(self.invalid("start a new sale"))
            }
        }
    }
}

const ID_ALPHABET: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Short upper-case base-36 transaction id, e.g. `"K3Z9A0QB"`.
fn generate_transaction_id() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    (0..TRANSACTION_ID_LEN)
        .map(|_| {
            let digit = (bits % 36) as usize;
            bits /= 36;
            char::from(ID_ALPHABET[digit])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn totals(total_cents: i64, item_count: usize) -> CartTotals {
        CartTotals {
            item_count,
            total_quantity: item_count as u64,
            subtotal: Money::from_cents(total_cents),
            tax: Money::zero(),
            total: Money::from_cents(total_cents),
            tax_rate: crate::types::TaxRate::zero(),
        }
    }

    fn awaiting(total_cents: i64) -> Checkout {
        let mut checkout = Checkout::default();
        checkout.begin(&totals(total_cents, 2)).unwrap();
        checkout
    }

    #[test]
    fn test_begin_requires_items() {
        let mut checkout = Checkout::default();
        assert_eq!(checkout.begin(&totals(0, 0)), Err(CoreError::CartEmpty));
        assert!(checkout.state().is_idle());
    }

    #[test]
    fn test_begin_records_amount_due() {
        let checkout = awaiting(24837);
        assert_eq!(checkout.amount_due(), Some(Money::from_cents(24837)));
        assert_eq!(checkout.state().name(), "awaiting tender");
    }

    #[test]
    fn test_begin_twice_is_rejected() {
        let mut checkout = awaiting(24837);
        let err = checkout.begin(&totals(100, 1)).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition { .. }));
        assert_eq!(checkout.amount_due(), Some(Money::from_cents(24837)));
    }

    #[test]
    fn test_cash_change() {
        let mut checkout = awaiting(24837);
        let record = checkout
            .confirm(
                Tender::new(TenderType::Cash, Money::from_cents(25000)),
                None,
                Utc::now(),
            )
            .unwrap();

        assert_eq!(record.change, Money::from_cents(163));
        assert_eq!(record.amount_tendered, Money::from_cents(25000));
        assert_eq!(record.transaction_id.len(), TRANSACTION_ID_LEN);
        assert!(record
            .transaction_id
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase()));
    }

    #[test]
    fn test_exact_tender_has_no_change() {
        let mut checkout = awaiting(24837);
        let record = checkout
            .confirm(
                Tender::new(TenderType::Cash, Money::from_cents(24837)),
                Some("sophia.davis".to_string()),
                Utc::now(),
            )
            .unwrap();
        assert!(record.change.is_zero());
        assert_eq!(record.customer_id.as_deref(), Some("sophia.davis"));
    }

    #[test]
    fn test_insufficient_tender_is_rejected() {
        let mut checkout = awaiting(24837);
        let err = checkout
            .confirm(
                Tender::new(TenderType::Cash, Money::from_cents(24836)),
                None,
                Utc::now(),
            )
            .unwrap_err();

        assert_eq!(
            err,
            CoreError::InsufficientTender {
                due: Money::from_cents(24837),
                tendered: Money::from_cents(24836),
            }
        );
        // Still waiting for a valid tender
        assert_eq!(checkout.amount_due(), Some(Money::from_cents(24837)));
    }

    #[test]
    fn test_card_is_charged_exact_amount() {
        let mut checkout = awaiting(1619);
        let record = checkout
            .confirm(
                Tender::new(TenderType::Card, Money::from_cents(2000)),
                None,
                Utc::now(),
            )
            .unwrap();
        assert_eq!(record.amount_tendered, Money::from_cents(1619));
        assert!(record.change.is_zero());
    }

    #[test]
    fn test_card_below_total_is_charged_amount_due() {
        let mut checkout = awaiting(14039);
        let record = checkout
            .confirm(
                Tender::new(TenderType::Card, Money::from_cents(100)),
                None,
                Utc::now(),
            )
            .unwrap();
        assert_eq!(record.amount_due, Money::from_cents(14039));
        assert_eq!(record.amount_tendered, Money::from_cents(14039));
        assert!(record.change.is_zero());
    }

    #[test]
    fn test_mobile_with_zero_amount_completes() {
        let mut checkout = awaiting(500);
        let record = checkout
            .confirm(Tender::new(TenderType::Mobile, Money::zero()), None, Utc::now())
            .unwrap();
        assert_eq!(record.amount_tendered, Money::from_cents(500));
        assert_eq!(checkout.state(), &PaymentState::Completed(record));
    }

    #[test]
    fn test_transaction_ids_use_base36() {
        let ids: Vec<String> = (0..32).map(|_| generate_transaction_id()).collect();
        for id in &ids {
            assert_eq!(id.len(), TRANSACTION_ID_LEN);
            assert!(id.bytes().all(|b| ID_ALPHABET.contains(&b)));
        }
        assert!(ids.iter().any(|id| id != &ids[0]));
        // 32 ids of 8 base-36 digits almost surely include a letter past F
        assert!(ids
            .iter()
            .any(|id| id.chars().any(|c| ('G'..='Z').contains(&c))));
    }

    #[test]
    fn test_disabled_tender_is_rejected() {
        let mut checkout = Checkout::new(vec![TenderType::Cash, TenderType::Card]);
        checkout.begin(&totals(500, 1)).unwrap();

        let err = checkout
            .confirm(Tender::new(TenderType::Mobile, Money::from_cents(500)), None, Utc::now())
            .unwrap_err();
        assert_eq!(err, CoreError::TenderNotAccepted(TenderType::Mobile));
    }

    #[test]
    fn test_confirm_outside_awaiting_is_rejected() {
        let mut checkout = Checkout::default();
        let err = checkout
            .confirm(Tender::new(TenderType::Cash, Money::from_cents(500)), None, Utc::now())
            .unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidTransition {
                state: "idle",
                action: "confirm payment"
            }
        );
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let mut checkout = awaiting(500);
        checkout.cancel().unwrap();
        assert!(checkout.state().is_idle());
        assert!(checkout.cancel().is_err());
    }

    #[test]
    fn test_reset_after_completion() {
        let mut checkout = awaiting(500);
        checkout
            .confirm(Tender::new(TenderType::Qr, Money::from_cents(500)), None, Utc::now())
            .unwrap();

        let record = checkout.reset().unwrap().unwrap();
        assert_eq!(record.tender_type, TenderType::Qr);
        assert!(checkout.state().is_idle());

        // Idle → Idle is a no-op
        assert_eq!(checkout.reset().unwrap(), None);
    }

    #[test]
    fn test_reset_while_awaiting_is_rejected() {
        let mut checkout = awaiting(500);
        assert!(checkout.reset().is_err());
        assert_eq!(checkout.amount_due(), Some(Money::from_cents(500)));
    }

    #[test]
    fn test_payment_state_serializes_tagged() {
        let json = serde_json::to_value(PaymentState::AwaitingTender {
            amount_due: Money::from_cents(1619),
        })
        .unwrap();
        assert_eq!(json["state"], "awaiting_tender");
        assert_eq!(json["amountDue"], 1619);
    }
}
