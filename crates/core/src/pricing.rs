//! FCFA → EUR price derivation: markup, FX conversion, VAT.
//!
//! One module owns every pricing constant and formula. The order validator,
//! the checkout-session endpoint and the client estimate all call into
//! this; the historical deployment had per-endpoint copies that drifted apart.
//!
//! # VAT rule
//!
//! Catalog prices are TTC (VAT included). The VAT amount reported on an
//! order is the *included share* of the subtotal, `subtotal * r / (1 + r)`;
//! totals never add VAT a second time. See DESIGN.md for the decision.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::types::round2;

/// Pricing parameters, environment-overridable on the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// Fixed FX rate, FCFA per EUR.
    pub fcfa_per_eur: Decimal,
    /// Multiplier applied to the raw FCFA base price.
    pub markup_factor: Decimal,
    /// VAT rate as a fraction (0.20 = 20%).
    pub vat_rate: Decimal,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            fcfa_per_eur: Decimal::new(655, 0),
            markup_factor: Decimal::ONE,
            vat_rate: Decimal::new(20, 2),
        }
    }
}

impl PricingConfig {
    /// Derive the EUR sale price (TTC) for a raw FCFA base price.
    ///
    /// The marked-up FCFA amount is rounded to whole francs before
    /// conversion, matching the source list's integer prices; the EUR
    /// result is rounded to 2 decimals. Same inputs, same output, always.
    #[must_use]
    pub fn price_catalog_entry(&self, base_price_fcfa: u32) -> Decimal {
        let marked_up = (Decimal::from(base_price_fcfa) * self.markup_factor)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let eur_ht = marked_up / self.fcfa_per_eur;
        round2(eur_ht * (Decimal::ONE + self.vat_rate))
    }

    /// The VAT share already included in a TTC amount.
    #[must_use]
    pub fn vat_included(&self, amount_ttc: Decimal) -> Decimal {
        round2(amount_ttc * self.vat_rate / (Decimal::ONE + self.vat_rate))
    }

    /// Strip VAT from a TTC amount.
    #[must_use]
    pub fn ht_from_ttc(&self, amount_ttc: Decimal) -> Decimal {
        round2(amount_ttc / (Decimal::ONE + self.vat_rate))
    }
}
