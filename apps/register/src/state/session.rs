//! # Session State
//!
//! Holds the register's single sale session.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` so one command at a time
//! sees and changes it. A poisoned lock is recovered rather than
//! propagated: every session operation leaves the session consistent
//! even when it fails.
//!
//! ## Session Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session State Operations                             │
//! │                                                                         │
//! │  Command                  Session call             State change         │
//! │  ───────                  ────────────             ────────────         │
//! │                                                                         │
//! │  add_to_cart ───────────► add_item(id) ──────────► line qty + 1        │
//! │  update_cart_item ──────► set_quantity(id, n) ───► line qty = n        │
//! │  open_payment ──────────► open_payment() ────────► AwaitingTender      │
//! │  confirm_payment ───────► confirm_payment(t) ────► Completed           │
//! │  new_sale ──────────────► new_sale() ────────────► Idle, empty cart    │
//! │  get_cart ──────────────► (read only)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use till_core::{Catalog, SaleSession};

use super::ConfigState;

/// Shared sale session.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<SaleSession>>,
}

impl SessionState {
    /// Wraps an existing session.
    pub fn new(session: SaleSession) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Session over the sample catalog, priced and tendered per `config`.
    pub fn from_config(config: &ConfigState) -> Self {
        let session = SaleSession::new(Catalog::sample())
            .with_pricing(config.pricing())
            .with_accepted_tenders(config.accepted_tenders.clone());
        SessionState::new(session)
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = session_state.with_session(|s| s.totals());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&SaleSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// session_state.with_session_mut(|s| s.add_item(item_id))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut SaleSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut session)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::from_config(&ConfigState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{ItemId, Money, TenderType};

    #[test]
    fn test_from_config_applies_pricing_and_tenders() {
        let config = ConfigState {
            tax_rate_bps: 0,
            accepted_tenders: vec![TenderType::Cash],
            ..ConfigState::default()
        };
        let state = SessionState::from_config(&config);

        state.with_session_mut(|s| s.add_item(ItemId(10))).unwrap();
        let totals = state.with_session(|s| s.totals());
        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.total, Money::from_cents(1499));
        assert_eq!(
            state.with_session(|s| s.accepted_tenders().to_vec()),
            vec![TenderType::Cash]
        );
    }

    #[test]
    fn test_clones_share_the_session() {
        let state = SessionState::default();
        let other = state.clone();

        other.with_session_mut(|s| s.add_item(ItemId(1))).unwrap();
        assert_eq!(state.with_session(|s| s.cart().item_count()), 1);
    }
}
