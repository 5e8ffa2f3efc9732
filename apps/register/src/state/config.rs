//! # Configuration State
//!
//! Stores register configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TILL_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use serde::Serialize;
use till_core::validation::validate_tax_rate_bps;
use till_core::{Money, Pricing, RoundingMode, TaxRate, TenderType, DEFAULT_TAX_RATE_BPS};
use tracing::warn;

/// Register configuration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (shown on the payment confirmation)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Sales tax rate in basis points, e.g. 800 = 8%
    pub tax_rate_bps: u32,

    /// How tax is rounded to whole cents
    pub tax_rounding: RoundingMode,

    /// Tender tabs enabled on the payment screen
    pub accepted_tenders: Vec<TenderType>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Till POS Demo Store"
    /// - Currency: USD ($)
    /// - Tax: 8%, rounded to nearest cent
    /// - Tenders: cash, card, mobile, QR
    fn default() -> Self {
        ConfigState {
            store_name: "Till POS Demo Store".to_string(),
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            currency_decimals: 2,
            tax_rate_bps: DEFAULT_TAX_RATE_BPS,
            tax_rounding: RoundingMode::Nearest,
            accepted_tenders: TenderType::ALL.to_vec(),
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `TILL_STORE_NAME`: Override store name
    /// - `TILL_TAX_RATE`: Tax rate in percent (e.g., "8.25")
    /// - `TILL_TAX_ROUNDING`: `nearest`, `up` or `down`
    /// - `TILL_TENDERS`: Comma list of accepted tenders (e.g., "cash,card")
    ///
    /// Values that fail to parse are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("TILL_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(raw) = lookup("TILL_TAX_RATE") {
            match parse_tax_rate(&raw) {
                Some(bps) => config.tax_rate_bps = bps,
                None => warn!(value = %raw, "Ignoring invalid TILL_TAX_RATE"),
            }
        }

        if let Some(raw) = lookup("TILL_TAX_ROUNDING") {
            match raw.parse::<RoundingMode>() {
                Ok(mode) => config.tax_rounding = mode,
                Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid TILL_TAX_ROUNDING"),
            }
        }

        if let Some(raw) = lookup("TILL_TENDERS") {
            match parse_tenders(&raw) {
                Ok(tenders) if !tenders.is_empty() => config.accepted_tenders = tenders,
                Ok(_) => warn!("Ignoring empty TILL_TENDERS"),
                Err(e) => warn!(value = %raw, error = %e, "Ignoring invalid TILL_TENDERS"),
            }
        }

        config
    }

    /// The pricing rules for this register.
    pub fn pricing(&self) -> Pricing {
        Pricing::new(TaxRate::from_bps(self.tax_rate_bps), self.tax_rounding)
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_cents(1234)), "$12.34");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        let cents = amount.cents();
        let divisor = 10_i64.pow(self.currency_decimals as u32);
        let whole = cents / divisor;
        let frac = (cents % divisor).abs();

        format!(
            "{}{}{}",
            if cents < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}

fn parse_tax_rate(raw: &str) -> Option<u32> {
    let pct = raw.trim().trim_end_matches('%').parse::<f64>().ok()?;
    if !pct.is_finite() || pct < 0.0 {
        return None;
    }
    let bps = TaxRate::from_percentage(pct).bps();
    validate_tax_rate_bps(bps).ok()?;
    Some(bps)
}

fn parse_tenders(raw: &str) -> Result<Vec<TenderType>, till_core::ValidationError> {
    let mut tenders = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let tender = part.parse::<TenderType>()?;
        if !tenders.contains(&tender) {
            tenders.push(tender);
        }
    }
    Ok(tenders)
}
