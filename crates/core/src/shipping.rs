//! Weight-based shipping fees for the Bénin → France maritime leg.
//!
//! One canonical tier table, used by every entry point. An earlier revision
//! of the deployment carried a second, flat-fee table in one server handler;
//! that variant is gone. Shipping is charged for every delivery method:
//! pickup options only waive last-mile fees, the maritime leg is always paid.

use std::sync::LazyLock;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::round2;

/// One row of the tier table: a weight upper bound and a per-kg rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingTier {
    /// Exclusive upper bound in kg; `None` marks the catch-all last tier.
    pub max_kg: Option<Decimal>,
    /// Rate in EUR per kg, TTC.
    pub rate_eur_per_kg: Decimal,
    /// Customer-facing label.
    pub label: &'static str,
}

static TIERS: LazyLock<Vec<ShippingTier>> = LazyLock::new(|| {
    vec![
        ShippingTier {
            max_kg: Some(Decimal::from(200)),
            rate_eur_per_kg: Decimal::new(300, 2),
            label: "5 à 199 kg",
        },
        ShippingTier {
            max_kg: Some(Decimal::from(500)),
            rate_eur_per_kg: Decimal::new(275, 2),
            label: "200 à 499 kg",
        },
        ShippingTier {
            max_kg: Some(Decimal::from(1000)),
            rate_eur_per_kg: Decimal::new(250, 2),
            label: "500 à 999 kg",
        },
        ShippingTier {
            max_kg: Some(Decimal::from(2000)),
            rate_eur_per_kg: Decimal::new(225, 2),
            label: "1 à 2 t",
        },
        ShippingTier {
            max_kg: None,
            rate_eur_per_kg: Decimal::new(175, 2),
            label: "2 t et plus",
        },
    ]
});

/// The canonical tier table.
#[must_use]
pub fn tiers() -> &'static [ShippingTier] {
    &TIERS
}

/// The tier covering a total weight: first tier whose bound exceeds it.
#[must_use]
pub fn tier_for_weight(weight_kg: Decimal) -> &'static ShippingTier {
    TIERS
        .iter()
        .find(|t| t.max_kg.is_none_or(|max| weight_kg < max))
        .unwrap_or_else(|| unreachable!("last tier is unbounded"))
}

/// Per-kg rate in EUR for a total weight.
#[must_use]
pub fn rate_for_weight(weight_kg: Decimal) -> Decimal {
    tier_for_weight(weight_kg).rate_eur_per_kg
}

/// Shipping cost (TTC) for a total weight: `round2(weight * rate)`.
///
/// Pure and stateless; the server-authoritative figure and the client
/// estimate are this same function.
#[must_use]
pub fn shipping_for_weight(weight_kg: Decimal) -> Decimal {
    round2(weight_kg * rate_for_weight(weight_kg))
}
