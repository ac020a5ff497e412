//! Client-side cart state and its derived figures.
//!
//! The cart is a convenience model for storefront surfaces: it lets them
//! show a running subtotal, weight and shipping estimate without a server
//! round trip. Nothing here is authoritative: at checkout the cart is
//! reduced to names and quantities and the validator recomputes everything.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Product, Unit};
use crate::pricing::PricingConfig;
use crate::shipping;
use crate::types::round2;
use crate::validate::{MAX_QUANTITY, RequestItem};
use crate::weight::unit_weight_kg;

/// One cart line. Price and unit are snapshots of the catalog entry at the
/// time the product was added; the validator re-reads both at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub name: String,
    #[serde(rename = "priceEUR")]
    pub price_eur: Decimal,
    pub unit: Unit,
    pub quantity: u32,
}

/// A cart: ordered lines, one per product name.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Add one unit of a product; an existing line is incremented instead
    /// of duplicated. Quantities saturate at the per-line maximum.
    pub fn add(&mut self, product: &Product) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.name == product.name) {
            line.quantity = (line.quantity + 1).min(MAX_QUANTITY);
        } else {
            self.lines.push(CartLine {
                name: product.name.clone(),
                price_eur: product.price,
                unit: product.unit,
                quantity: 1,
            });
        }
    }

    /// Increment an existing line, saturating at the per-line maximum.
    /// Unknown names are ignored.
    pub fn increment(&mut self, name: &str) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.name == name) {
            line.quantity = (line.quantity + 1).min(MAX_QUANTITY);
        }
    }

    /// Decrement an existing line; a line reaching zero is removed.
    /// A deserialized snapshot can already hold a zero-quantity line, so
    /// the subtraction saturates instead of underflowing.
    pub fn decrement(&mut self, name: &str) {
        if let Some(index) = self.lines.iter().position(|l| l.name == name) {
            let line = &mut self.lines[index];
            line.quantity = line.quantity.saturating_sub(1);
            if line.quantity == 0 {
                self.lines.remove(index);
            }
        }
    }

    /// Remove a line outright.
    pub fn remove(&mut self, name: &str) {
        self.lines.retain(|l| l.name != name);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Replace the whole cart with an external snapshot. Carts can be
    /// mutated from several surfaces (tab, stored session); the last
    /// external write wins wholesale, no per-line merging. Zero-quantity
    /// lines in the snapshot are dropped to restore the quantity >= 1
    /// invariant.
    pub fn reconcile(&mut self, external: Cart) {
        self.lines = external.lines;
        self.lines.retain(|l| l.quantity > 0);
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Sum of line totals, TTC, rounded per line.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        round2(
            self.lines
                .iter()
                .map(|l| round2(l.price_eur * Decimal::from(l.quantity)))
                .sum(),
        )
    }

    /// Estimated total weight in kg, from the same per-unit estimates the
    /// validator uses.
    #[must_use]
    pub fn total_weight_kg(&self) -> Decimal {
        self.lines
            .iter()
            .map(|l| unit_weight_kg(&l.name, l.unit) * Decimal::from(l.quantity))
            .sum()
    }

    /// Shipping estimate for the current weight, TTC.
    #[must_use]
    pub fn shipping_estimate(&self) -> Decimal {
        shipping::shipping_for_weight(self.total_weight_kg())
    }

    /// VAT share already included in the subtotal.
    #[must_use]
    pub fn vat_included(&self, pricing: &PricingConfig) -> Decimal {
        pricing.vat_included(self.subtotal())
    }

    /// Subtotal plus shipping estimate, TTC.
    #[must_use]
    pub fn total(&self) -> Decimal {
        round2(self.subtotal() + self.shipping_estimate())
    }

    /// Whether the cart meets the minimum order weight.
    #[must_use]
    pub fn meets_minimum_weight(&self, min_weight_kg: Decimal) -> bool {
        self.total_weight_kg() >= min_weight_kg
    }

    /// Reduce the cart to the shape the validator accepts: names and
    /// quantities only.
    #[must_use]
    pub fn to_request_items(&self) -> Vec<RequestItem> {
        self.lines
            .iter()
            .map(|l| RequestItem {
                name: l.name.clone(),
                quantity: l.quantity,
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::from_raw(
            "PRODUIT,PRIX\nHuile de coco,4994 FCFA\nPiment test - 499g,1000 FCFA",
            &PricingConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_add_increments_existing_line() {
        let cat = catalog();
        let coco = cat.get("Huile de coco").unwrap();
        let mut cart = Cart::new();
        cart.add(coco);
        cart.add(coco);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_decrement_to_zero_removes_line() {
        let cat = catalog();
        let mut cart = Cart::new();
        cart.add(cat.get("Huile de coco").unwrap());
        cart.decrement("Huile de coco");
        assert!(cart.is_empty());
        // decrementing a gone line is a no-op
        cart.decrement("Huile de coco");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_quantity_saturates() {
        let cat = catalog();
        let coco = cat.get("Huile de coco").unwrap();
        let mut cart = Cart::new();
        for _ in 0..150 {
            cart.add(coco);
        }
        assert_eq!(cart.lines()[0].quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_derived_figures_match_validator_arithmetic() {
        let cat = catalog();
        let coco = cat.get("Huile de coco").unwrap();
        let mut cart = Cart::new();
        for _ in 0..5 {
            cart.add(coco);
        }
        assert_eq!(cart.subtotal(), d("45.75"));
        assert_eq!(cart.total_weight_kg(), d("5"));
        assert_eq!(cart.shipping_estimate(), d("15.00"));
        assert_eq!(cart.total(), d("60.75"));
        assert_eq!(cart.vat_included(&PricingConfig::default()), d("7.63"));
        assert!(cart.meets_minimum_weight(d("5")));
        assert!(!cart.meets_minimum_weight(d("5.01")));
    }

    #[test]
    fn test_reconcile_replaces_wholesale() {
        let cat = catalog();
        let mut local = Cart::new();
        local.add(cat.get("Huile de coco").unwrap());

        let mut external = Cart::new();
        external.add(cat.get("Piment test - 499g").unwrap());
        external.increment("Piment test - 499g");

        local.reconcile(external.clone());
        assert_eq!(local, external);
        assert_eq!(local.lines().len(), 1);
        assert_eq!(local.lines()[0].name, "Piment test - 499g");
    }

    #[test]
    fn test_reconcile_drops_zero_quantity_lines() {
        let raw = r#"[
            {"name": "Huile de coco", "priceEUR": 9.15, "unit": "litre", "quantity": 0},
            {"name": "Piment test - 499g", "priceEUR": 1.83, "unit": "g", "quantity": 2}
        ]"#;
        let snapshot: Cart = serde_json::from_str(raw).unwrap();

        let mut cart = Cart::new();
        cart.reconcile(snapshot);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].name, "Piment test - 499g");
    }

    #[test]
    fn test_decrement_zero_quantity_line_does_not_underflow() {
        // a stored snapshot deserialized without reconcile can carry a
        // zero-quantity line
        let raw = r#"[{"name": "Huile de coco", "priceEUR": 9.15, "unit": "litre", "quantity": 0}]"#;
        let mut cart: Cart = serde_json::from_str(raw).unwrap();
        cart.decrement("Huile de coco");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_to_request_items() {
        let cat = catalog();
        let mut cart = Cart::new();
        cart.add(cat.get("Huile de coco").unwrap());
        cart.increment("Huile de coco");
        let items = cart.to_request_items();
        assert_eq!(
            items,
            vec![RequestItem {
                name: "Huile de coco".into(),
                quantity: 2,
            }]
        );
    }
}
