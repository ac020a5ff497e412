//! Order submission: the public trust boundary.

use axum::{Json, extract::State, http::HeaderMap};
use chrono::Utc;
use serde_json::{Value, json};

use benilink_core::order::{Order, RequestMeta};
use benilink_core::validate::{OrderRequest, validate_order};

use crate::error::Result;
use crate::state::AppState;

/// `POST /api/validate-order`
///
/// Validates the submitted cart against the catalog, persists the order,
/// and kicks off notification emails. Prices and weights in the request
/// are ignored; everything is recomputed server-side.
pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<OrderRequest>,
) -> Result<Json<Value>> {
    let order = validate_order(
        state.catalog(),
        &state.config().pricing,
        state.config().min_order_weight_kg,
        &request,
        request_meta(&headers),
        Utc::now(),
    )?;

    state.store().append(&order).await?;
    notify(&state, &order);

    Ok(Json(json!({
        "success": true,
        "orderId": order.order_id,
        "totalAmount": order.total_amount,
        "amountEUR": order.amount_eur,
        "currency": order.currency,
        "message": "Commande enregistrée avec succès",
    })))
}

/// Fire the notification emails without holding up the response. The
/// order is already on disk; a failed send is only logged.
pub fn notify(state: &AppState, order: &Order) {
    let Some(mailer) = state.mailer().cloned() else {
        tracing::debug!(order_id = %order.order_id, "Email not configured, skipping notification");
        return;
    };
    let order = order.clone();
    tokio::spawn(async move {
        if let Err(err) = mailer.send_order_emails(&order).await {
            tracing::warn!(
                order_id = %order.order_id,
                error = %err,
                "Order notification email failed"
            );
        }
    });
}

/// Client metadata recorded with the order: forwarded IP and user agent.
pub fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|v| v.to_str().ok()))
        .unwrap_or("unknown")
        .trim()
        .to_string();
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    RequestMeta { ip, user_agent }
}
