//! Currency tags and the single rounding rule used for every amount.
//!
//! Every intermediate currency value in the system is rounded to 2 decimal
//! places with midpoint-away-from-zero, the same behaviour as the historical
//! `Math.round(x * 100) / 100`. Rounding at each step (rather than once at
//! the end) keeps the validator bit-for-bit reproducible and stops cent
//! drift from compounding across line items.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currencies the shop deals in.
///
/// Base prices are quoted in FCFA (`XOF`); everything customer-facing is EUR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    /// Euro, the sale currency.
    #[default]
    EUR,
    /// West African CFA franc, the source currency of the price list.
    XOF,
}

impl CurrencyCode {
    /// ISO 4217 code.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::EUR => "EUR",
            Self::XOF => "XOF",
        }
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Round a currency or weight value to 2 decimal places, midpoint away
/// from zero.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_round2_midpoint_goes_up() {
        // 7.625 must round to 7.63, not banker's 7.62
        assert_eq!(round2(d("7.625")), d("7.63"));
    }

    #[test]
    fn test_round2_plain() {
        assert_eq!(round2(d("9.1493129")), d("9.15"));
        assert_eq!(round2(d("15")), d("15"));
    }

    #[test]
    fn test_currency_code_display() {
        assert_eq!(CurrencyCode::EUR.to_string(), "EUR");
        assert_eq!(CurrencyCode::XOF.to_string(), "XOF");
    }
}
