//! Validated order records.
//!
//! An [`Order`] is only ever produced by the validator (or rebuilt from a
//! confirmed payment-provider session) and is immutable once created: the
//! store is append-only, corrections are new orders. Wire names are the
//! camelCase names the storefront and the admin dashboard already speak.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::Unit;
use crate::types::{CurrencyCode, OrderId, round2};

/// How the parcel reaches the customer.
///
/// Every method pays the maritime leg; the pickup options waive last-mile
/// fees through self-collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeliveryMethod {
    /// Self-collection in Tence, the cheapest option and the fallback
    /// for unrecognized values.
    #[default]
    #[serde(rename = "pickup-tence")]
    PickupTence,
    #[serde(rename = "pickup-stetienne")]
    PickupStEtienne,
    #[serde(rename = "colissimo")]
    Colissimo,
    #[serde(rename = "relais")]
    Relais,
}

impl DeliveryMethod {
    /// Parse a client-supplied value; anything unrecognized falls back to
    /// the cheapest pickup option.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "pickup-stetienne" => Self::PickupStEtienne,
            "colissimo" => Self::Colissimo,
            "relais" => Self::Relais,
            _ => Self::PickupTence,
        }
    }

    /// Wire / log label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PickupTence => "pickup-tence",
            Self::PickupStEtienne => "pickup-stetienne",
            Self::Colissimo => "colissimo",
            Self::Relais => "relais",
        }
    }
}

impl std::fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentMethod {
    /// Chat deep link: the customer finalizes over WhatsApp.
    #[default]
    #[serde(rename = "whatsapp")]
    Whatsapp,
    /// Wallet network, captured client-side.
    #[serde(rename = "paypal")]
    Paypal,
    /// Card network via hosted checkout.
    #[serde(rename = "stripe")]
    Stripe,
}

impl PaymentMethod {
    /// Parse a client-supplied value; unrecognized → chat deep link.
    #[must_use]
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "paypal" => Self::Paypal,
            "stripe" => Self::Stripe,
            _ => Self::Whatsapp,
        }
    }

    /// Wire / log label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Whatsapp => "whatsapp",
            Self::Paypal => "paypal",
            Self::Stripe => "stripe",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer delivery details.
///
/// `full_name`, `phone`, `address`, `city` and `country` must be non-empty
/// before an order can be validated; email and postal code are optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryInfo {
    pub full_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: String,
    pub address: String,
    #[serde(default)]
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

impl DeliveryInfo {
    /// Name of the first required field that is empty, if any.
    #[must_use]
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("fullName", &self.full_name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("country", &self.country),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
    }
}

/// A validated order line: server-recomputed price and total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    #[serde(rename = "priceEUR")]
    pub price_eur: Decimal,
    #[serde(rename = "totalEUR")]
    pub total_eur: Decimal,
    pub unit: Unit,
}

/// Request metadata recorded with every order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct RequestMeta {
    pub ip: String,
    pub user_agent: String,
}

/// A validated, immutable order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: OrderId,
    pub timestamp: DateTime<Utc>,
    pub currency: CurrencyCode,
    pub items: Vec<OrderLine>,
    /// Sum of line totals, TTC.
    pub subtotal: Decimal,
    /// Shipping, TTC.
    pub shipping_cost: Decimal,
    /// Shipping with VAT stripped.
    #[serde(rename = "shippingCostHT")]
    pub shipping_cost_ht: Decimal,
    /// VAT share already included in the subtotal (informational).
    pub tax_amount: Decimal,
    /// `subtotal + shipping_cost`, TTC.
    pub total_amount: Decimal,
    #[serde(rename = "amountEUR")]
    pub amount_eur: Decimal,
    pub total_weight_kg: Decimal,
    pub delivery_method: DeliveryMethod,
    pub delivery_info: DeliveryInfo,
    pub payment_method: PaymentMethod,
    pub metadata: RequestMeta,
}

impl Order {
    /// Check the money invariants: the subtotal is the sum of line totals
    /// and the grand total is `round2(subtotal + shipping)`.
    #[must_use]
    pub fn totals_consistent(&self) -> bool {
        let line_sum: Decimal = self.items.iter().map(|l| l.total_eur).sum();
        self.subtotal == round2(line_sum)
            && self.total_amount == round2(self.subtotal + self.shipping_cost)
            && self.amount_eur == self.total_amount
    }
}
