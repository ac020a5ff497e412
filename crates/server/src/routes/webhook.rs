//! Stripe webhook: turns a completed checkout session into a stored order.
//!
//! The event payload is only trusted for the session id; the session is
//! re-fetched from Stripe with its line items expanded before anything is
//! persisted. Signature verification runs on the raw request bytes.

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use chrono::Utc;
use rust_decimal::Decimal;
use secrecy::ExposeSecret;
use serde_json::{Value, json};

use benilink_core::catalog::Unit;
use benilink_core::order::{
    DeliveryInfo, DeliveryMethod, Order, OrderLine, PaymentMethod, RequestMeta,
};
use benilink_core::types::{CurrencyCode, OrderId, round2};
use benilink_core::weight::unit_weight_kg;

use crate::error::{AppError, Result};
use crate::routes::checkout::SHIPPING_LINE_NAME;
use crate::routes::orders::notify;
use crate::services::stripe::{RetrievedSession, WebhookEvent, verify_signature};
use crate::state::AppState;

/// `POST /api/stripe-webhook`
pub async fn handle(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>> {
    let Some(secret) = state
        .config()
        .stripe
        .as_ref()
        .and_then(|s| s.webhook_secret.as_ref())
    else {
        return Err(AppError::Configuration(
            "STRIPE_WEBHOOK_SECRET is not set".to_string(),
        ));
    };

    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::WebhookSignature("missing Stripe-Signature header".to_string()))?;

    verify_signature(
        &body,
        signature,
        secret.expose_secret(),
        Utc::now().timestamp(),
    )
    .map_err(|err| AppError::WebhookSignature(err.to_string()))?;

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|err| AppError::BadRequest(format!("payload illisible: {err}")))?;

    match event.event_type.as_str() {
        "checkout.session.completed" => {
            let Some(stripe) = state.stripe() else {
                return Err(AppError::Configuration(
                    "STRIPE_SECRET_KEY is not set".to_string(),
                ));
            };
            let session = stripe.retrieve_session(&event.data.object.id).await?;
            let order = order_from_session(&state, &session);
            state.store().append(&order).await?;
            notify(&state, &order);
            tracing::info!(
                order_id = %order.order_id,
                session_id = %session.id,
                total = %order.total_amount,
                "Card order persisted from webhook"
            );
        }
        "charge.refunded" => {
            tracing::info!(object_id = %event.data.object.id, "Charge refunded");
        }
        other => {
            tracing::debug!(event_type = other, "Ignoring webhook event");
        }
    }

    Ok(Json(json!({ "received": true })))
}

/// Rebuild an order from a paid session: the shipping line is split back
/// out, catalog rows supply units and weights, and the amounts are the
/// cents Stripe actually charged.
fn order_from_session(state: &AppState, session: &RetrievedSession) -> Order {
    let now = Utc::now();
    let pricing = &state.config().pricing;

    let mut items = Vec::new();
    let mut subtotal = Decimal::ZERO;
    let mut shipping_cost = Decimal::ZERO;
    let mut total_weight = Decimal::ZERO;

    for line in session.line_items.iter().flat_map(|l| &l.data) {
        let name = line.description.clone().unwrap_or_default();
        let amount = Decimal::new(line.amount_total.unwrap_or(0), 2);

        if name == SHIPPING_LINE_NAME {
            shipping_cost = amount;
            continue;
        }

        let quantity = line.quantity.unwrap_or(1).max(1);
        let unit = state
            .catalog()
            .get(&name)
            .map_or(Unit::Each, |product| product.unit);

        subtotal = round2(subtotal + amount);
        total_weight += unit_weight_kg(&name, unit) * Decimal::from(quantity);
        items.push(OrderLine {
            name,
            quantity,
            price_eur: round2(amount / Decimal::from(quantity)),
            total_eur: amount,
            unit,
        });
    }

    let total_amount = round2(subtotal + shipping_cost);
    let customer = session.customer_details.as_ref();
    let meta = &session.metadata;
    let field = |key: &str| meta.get(key).cloned().unwrap_or_default();

    Order {
        order_id: OrderId::generate(now),
        timestamp: now,
        currency: CurrencyCode::EUR,
        items,
        subtotal,
        shipping_cost,
        shipping_cost_ht: pricing.ht_from_ttc(shipping_cost),
        tax_amount: pricing.vat_included(subtotal),
        total_amount,
        amount_eur: total_amount,
        total_weight_kg: round2(total_weight),
        delivery_method: DeliveryMethod::parse_or_default(&field("deliveryMethod")),
        delivery_info: DeliveryInfo {
            full_name: non_empty_or(
                field("fullName"),
                customer.and_then(|c| c.name.clone()).unwrap_or_default(),
            ),
            phone: field("phone"),
            email: non_empty_or(
                field("email"),
                customer.and_then(|c| c.email.clone()).unwrap_or_default(),
            ),
            address: field("address"),
            postal_code: field("postalCode"),
            city: field("city"),
            country: field("country"),
        },
        payment_method: PaymentMethod::Stripe,
        metadata: RequestMeta {
            ip: "stripe-webhook".to_string(),
            user_agent: "stripe".to_string(),
        },
    }
}

fn non_empty_or(preferred: String, fallback: String) -> String {
    if preferred.trim().is_empty() {
        fallback
    } else {
        preferred
    }
}
