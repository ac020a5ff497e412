//! The trust boundary: a proposed order → an authoritative [`Order`].
//!
//! Clients submit item *names* and quantities only. Every price, weight and
//! fee is recomputed here from the authoritative catalog; client-supplied
//! amounts are never read. Validation failures happen before anything is
//! persisted; the caller only stores an order this function returned.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::order::{DeliveryInfo, DeliveryMethod, Order, OrderLine, PaymentMethod, RequestMeta};
use crate::pricing::PricingConfig;
use crate::shipping;
use crate::types::{CurrencyCode, OrderId, round2};
use crate::weight::unit_weight_kg;

/// Quantity bounds per line item.
pub const MIN_QUANTITY: u32 = 1;
pub const MAX_QUANTITY: u32 = 99;

/// One proposed line item: name and quantity, nothing else is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestItem {
    pub name: String,
    pub quantity: u32,
}

/// A proposed order as submitted by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    #[serde(default)]
    pub items: Vec<RequestItem>,
    #[serde(default)]
    pub delivery_info: DeliveryInfo,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub delivery_method: Option<String>,
}

/// Why a proposed order was rejected. Nothing is persisted on any of these.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("panier vide ou invalide")]
    EmptyCart,

    #[error("informations de livraison incomplètes: champ {0} manquant")]
    MissingDeliveryField(&'static str),

    #[error("produit invalide: {0}")]
    UnknownProduct(String),

    #[error("quantité invalide pour {name}: {quantity} (autorisé: 1 à 99)")]
    QuantityOutOfRange { name: String, quantity: u32 },

    #[error("poids minimum requis: {minimum_kg} kg (poids actuel: {weight_kg} kg)")]
    BelowMinimumWeight {
        weight_kg: Decimal,
        minimum_kg: Decimal,
    },
}

/// Validate a proposed order and assemble the authoritative record.
///
/// Checks run in a fixed order: empty cart, delivery fields, per-item
/// catalog membership and quantity bounds, then the minimum-weight gate;
/// the weight gate fires before any shipping is computed. Each line total
/// and every accumulated amount is rounded to 2 decimals as it is produced
/// so cent drift cannot compound.
///
/// Re-submitting an identical request yields a *new* order with a fresh id;
/// there is intentionally no deduplication (see DESIGN.md).
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered; no partial order is
/// ever produced.
pub fn validate_order(
    catalog: &Catalog,
    pricing: &PricingConfig,
    min_weight_kg: Decimal,
    request: &OrderRequest,
    meta: RequestMeta,
    now: DateTime<Utc>,
) -> Result<Order, ValidationError> {
    if request.items.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    if let Some(field) = request.delivery_info.first_missing_field() {
        return Err(ValidationError::MissingDeliveryField(field));
    }

    let mut lines = Vec::with_capacity(request.items.len());
    let mut subtotal = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;

    for item in &request.items {
        let product = catalog
            .get(&item.name)
            .ok_or_else(|| ValidationError::UnknownProduct(item.name.clone()))?;

        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&item.quantity) {
            return Err(ValidationError::QuantityOutOfRange {
                name: item.name.clone(),
                quantity: item.quantity,
            });
        }

        let quantity = Decimal::from(item.quantity);
        let line_total = round2(product.price * quantity);
        subtotal = round2(subtotal + line_total);
        total_weight += unit_weight_kg(&product.name, product.unit) * quantity;

        lines.push(OrderLine {
            name: product.name.clone(),
            quantity: item.quantity,
            price_eur: product.price,
            total_eur: line_total,
            unit: product.unit,
        });
    }

    if total_weight < min_weight_kg {
        return Err(ValidationError::BelowMinimumWeight {
            weight_kg: round2(total_weight),
            minimum_kg: min_weight_kg,
        });
    }

    let shipping_cost = shipping::shipping_for_weight(total_weight);
    let total_amount = round2(subtotal + shipping_cost);

    Ok(Order {
        order_id: OrderId::generate(now),
        timestamp: now,
        currency: CurrencyCode::EUR,
        items: lines,
        subtotal,
        shipping_cost,
        shipping_cost_ht: pricing.ht_from_ttc(shipping_cost),
        tax_amount: pricing.vat_included(subtotal),
        total_amount,
        amount_eur: total_amount,
        total_weight_kg: round2(total_weight),
        delivery_method: DeliveryMethod::parse_or_default(
            request.delivery_method.as_deref().unwrap_or_default(),
        ),
        delivery_info: request.delivery_info.clone(),
        payment_method: PaymentMethod::parse_or_default(
            request.payment_method.as_deref().unwrap_or_default(),
        ),
        metadata: meta,
    })
}
