//! Stripe hosted-checkout session creation.
//!
//! The request keeps the historical wire shape (clients still send their
//! own `priceEUR` fields), but nothing price-like is read from it: unit
//! prices come from the catalog and shipping from the canonical tiers,
//! exactly as in the order validator.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Value, json};
use url::Url;

use benilink_core::order::DeliveryInfo;
use benilink_core::shipping;
use benilink_core::validate::{MAX_QUANTITY, MIN_QUANTITY, ValidationError};
use benilink_core::weight::unit_weight_kg;

use crate::error::{AppError, Result};
use crate::services::stripe::CheckoutLine;
use crate::state::AppState;

/// Name of the synthetic shipping line; the webhook handler splits it
/// back out of the session's line items.
pub const SHIPPING_LINE_NAME: &str = "Frais de livraison";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
    /// Historical field; ignored, shipping is recomputed.
    #[serde(default, rename = "shippingCostEUR")]
    pub shipping_cost_eur: Option<Decimal>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub success_path: Option<String>,
    #[serde(default)]
    pub cancel_path: Option<String>,
    #[serde(default)]
    pub delivery_info: Option<DeliveryInfo>,
    #[serde(default)]
    pub delivery_method: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutItem {
    pub name: String,
    pub quantity: u32,
    /// Historical field; ignored.
    #[serde(default, rename = "priceEUR")]
    pub price_eur: Option<Decimal>,
    /// Historical field; ignored.
    #[serde(default, rename = "priceFCFA")]
    pub price_fcfa: Option<Decimal>,
}

/// `POST /api/create-checkout-session`
pub async fn create(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<Value>> {
    let Some(stripe) = state.stripe() else {
        return Err(AppError::Configuration(
            "STRIPE_SECRET_KEY is not set".to_string(),
        ));
    };
    let Some(stripe_config) = state.config().stripe.as_ref() else {
        return Err(AppError::Configuration(
            "STRIPE_SECRET_KEY is not set".to_string(),
        ));
    };

    if request.items.is_empty() {
        return Err(ValidationError::EmptyCart.into());
    }

    let mut lines = Vec::with_capacity(request.items.len() + 1);
    let mut total_weight = Decimal::ZERO;

    for item in &request.items {
        let product = state
            .catalog()
            .get(&item.name)
            .ok_or_else(|| ValidationError::UnknownProduct(item.name.clone()))?;
        if !(MIN_QUANTITY..=MAX_QUANTITY).contains(&item.quantity) {
            return Err(ValidationError::QuantityOutOfRange {
                name: item.name.clone(),
                quantity: item.quantity,
            }
            .into());
        }

        total_weight += unit_weight_kg(&product.name, product.unit) * Decimal::from(item.quantity);
        lines.push(CheckoutLine {
            name: product.name.clone(),
            unit_amount_eur: product.price,
            quantity: item.quantity,
        });
    }

    // same gate as the validator; a card payment must not slip under it
    let min_weight = state.config().min_order_weight_kg;
    if total_weight < min_weight {
        return Err(ValidationError::BelowMinimumWeight {
            weight_kg: benilink_core::round2(total_weight),
            minimum_kg: min_weight,
        }
        .into());
    }

    let shipping_cost = shipping::shipping_for_weight(total_weight);
    if shipping_cost > Decimal::ZERO {
        lines.push(CheckoutLine {
            name: SHIPPING_LINE_NAME.to_string(),
            unit_amount_eur: shipping_cost,
            quantity: 1,
        });
    }

    let base = resolve_base_url(request.base_url.as_deref(), &state.config().base_url)?;
    let success_url = join_path(
        &base,
        request
            .success_path
            .as_deref()
            .unwrap_or(&stripe_config.success_path),
    );
    let cancel_url = join_path(
        &base,
        request
            .cancel_path
            .as_deref()
            .unwrap_or(&stripe_config.cancel_path),
    );

    let mut metadata: Vec<(&str, String)> = Vec::new();
    if let Some(info) = &request.delivery_info {
        metadata.push(("fullName", info.full_name.clone()));
        metadata.push(("phone", info.phone.clone()));
        metadata.push(("email", info.email.clone()));
        metadata.push(("address", info.address.clone()));
        metadata.push(("postalCode", info.postal_code.clone()));
        metadata.push(("city", info.city.clone()));
        metadata.push(("country", info.country.clone()));
    }
    if let Some(method) = &request.delivery_method {
        metadata.push(("deliveryMethod", method.clone()));
    }

    let session = stripe
        .create_checkout_session(&lines, &success_url, &cancel_url, &metadata)
        .await?;

    tracing::info!(session_id = %session.id, "Checkout session created");
    Ok(Json(json!({ "sessionId": session.id })))
}

/// Use the client-supplied base URL only when it parses as http(s);
/// anything else falls back to the configured public URL.
fn resolve_base_url(requested: Option<&str>, configured: &str) -> Result<String> {
    if let Some(candidate) = requested {
        if let Ok(url) = Url::parse(candidate) {
            if matches!(url.scheme(), "http" | "https") {
                return Ok(candidate.trim_end_matches('/').to_string());
            }
        }
        return Err(AppError::BadRequest("baseUrl invalide".to_string()));
    }
    Ok(configured.trim_end_matches('/').to_string())
}

fn join_path(base: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_base_url() {
        assert_eq!(
            resolve_base_url(Some("https://benilink.fr/"), "http://localhost:3001").unwrap(),
            "https://benilink.fr"
        );
        assert_eq!(
            resolve_base_url(None, "http://localhost:3001").unwrap(),
            "http://localhost:3001"
        );
        assert!(resolve_base_url(Some("javascript:alert(1)"), "x").is_err());
        assert!(resolve_base_url(Some("not a url"), "x").is_err());
    }

    #[test]
    fn test_join_path() {
        assert_eq!(
            join_path("https://benilink.fr", "/?success=true"),
            "https://benilink.fr/?success=true"
        );
        assert_eq!(join_path("https://benilink.fr", "merci"), "https://benilink.fr/merci");
    }

    #[test]
    fn test_historical_request_shape_parses() {
        let raw = r#"{
            "items": [{"name": "Huile de coco", "quantity": 2, "priceEUR": 1.00}],
            "shippingCostEUR": 0.50,
            "baseUrl": "https://benilink.fr",
            "successPath": "/?success=true"
        }"#;
        let request: CheckoutRequest = serde_json::from_str(raw).unwrap();
        assert_eq!(request.items.len(), 1);
        // historical price fields parse but carry no authority
        assert_eq!(request.items[0].price_eur, Some("1.00".parse().unwrap()));
    }
}
