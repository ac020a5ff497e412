//! Per-unit weight estimates, derived from the unit of sale and any
//! quantity token embedded in the product name ("600g" → 0.6 kg).
//!
//! These are estimates for shipping purposes, not scale weights. Liquids
//! are approximated at 1 kg/L; sachets and per-piece items at a flat
//! 0.5 kg each.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::catalog::Unit;

static GRAMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2,4})\s*g").unwrap_or_else(|_| unreachable!("static pattern"))
});
static MILLILITRES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2,4})\s*ml").unwrap_or_else(|_| unreachable!("static pattern"))
});

/// Minimum billed weight per unit, kg.
fn floor_kg() -> Decimal {
    Decimal::new(5, 2)
}

/// Default estimate for sachets and per-piece items, kg.
fn piece_estimate_kg() -> Decimal {
    Decimal::new(5, 1)
}

/// Estimated weight of a single unit of a product, in kg.
#[must_use]
pub fn unit_weight_kg(name: &str, unit: Unit) -> Decimal {
    let lower = name.to_lowercase();
    match unit {
        Unit::Gram => token_kg(&GRAMS, &lower).unwrap_or_else(piece_estimate_kg),
        Unit::Millilitre => token_kg(&MILLILITRES, &lower).unwrap_or_else(piece_estimate_kg),
        Unit::Kilo | Unit::Litre => Decimal::ONE,
        Unit::Sachet | Unit::Each => piece_estimate_kg(),
    }
}

/// Parse an embedded quantity token and convert to kg, clamped to the
/// minimum billed weight.
fn token_kg(pattern: &Regex, lower_name: &str) -> Option<Decimal> {
    let grams: u32 = pattern.captures(lower_name)?.get(1)?.as_str().parse().ok()?;
    Some((Decimal::from(grams) / Decimal::from(1000)).max(floor_kg()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_gram_token() {
        assert_eq!(unit_weight_kg("Aklui de Sorgho - 600g", Unit::Gram), d("0.6"));
        assert_eq!(unit_weight_kg("Lanhouiwin - 100g", Unit::Gram), d("0.1"));
        assert_eq!(
            unit_weight_kg("Sel de mer fin iodé - La baleine - 125g", Unit::Gram),
            d("0.125")
        );
    }

    #[test]
    fn test_millilitre_token() {
        assert_eq!(
            unit_weight_kg("Huile rouge - 500ml", Unit::Millilitre),
            d("0.5")
        );
    }

    #[test]
    fn test_minimum_billed_weight() {
        assert_eq!(unit_weight_kg("Épice test - 30g", Unit::Gram), d("0.05"));
    }

    #[test]
    fn test_unit_without_token_falls_back() {
        // unit says grams but the name carries no quantity token
        assert_eq!(unit_weight_kg("Graine de chia", Unit::Gram), d("0.5"));
    }

    #[test]
    fn test_kilo_litre_and_piece_defaults() {
        assert_eq!(unit_weight_kg("Farine de maÏs - 1kg", Unit::Kilo), d("1"));
        assert_eq!(
            unit_weight_kg("Huile de coco pressée à froid", Unit::Litre),
            d("1")
        );
        assert_eq!(unit_weight_kg("Ail - 1 sachet", Unit::Sachet), d("0.5"));
        assert_eq!(unit_weight_kg("Carte-cadeau", Unit::Each), d("0.5"));
    }
}
