//! Newtype IDs for type-safe entity references.

use chrono::{DateTime, Utc};
use rand::{Rng, distr::Alphanumeric};
use serde::{Deserialize, Serialize};

/// Identifier of a catalog product: `prod-<row index>`.
///
/// Row indices are positions in the static price list, so the same list
/// always derives the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Build the id for a price-list row.
    #[must_use]
    pub fn from_row_index(index: usize) -> Self {
        Self(format!("prod-{index}"))
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a validated order: `BNL-<unix millis>-<9 char suffix>`.
///
/// The human-legible prefix lets support staff read ids over the phone;
/// the random suffix keeps two orders created in the same millisecond
/// distinct. There is deliberately no deduplication keyed on this id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generate a fresh order id for the given creation instant.
    #[must_use]
    pub fn generate(at: DateTime<Utc>) -> Self {
        let suffix: String = rand::rng()
            .sample_iter(Alphanumeric)
            .take(9)
            .map(|b| char::from(b).to_ascii_uppercase())
            .collect();
        Self(format!("BNL-{}-{suffix}", at.timestamp_millis()))
    }

    /// Wrap an id received from the wire (webhook replays, admin tooling).
    #[must_use]
    pub const fn from_string(id: String) -> Self {
        Self(id)
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_format() {
        assert_eq!(ProductId::from_row_index(0).as_str(), "prod-0");
        assert_eq!(ProductId::from_row_index(41).as_str(), "prod-41");
    }

    #[test]
    fn test_order_id_shape() {
        let at = Utc::now();
        let id = OrderId::generate(at);
        let parts: Vec<&str> = id.as_str().splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "BNL");
        assert_eq!(parts[1], at.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
        assert!(
            parts[2]
                .chars()
                .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        );
    }

    #[test]
    fn test_order_ids_are_distinct() {
        let at = Utc::now();
        assert_ne!(OrderId::generate(at), OrderId::generate(at));
    }
}
