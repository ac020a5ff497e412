//! Admin order listing.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::error::Result;
use crate::middleware::auth::RequireAdmin;
use crate::state::AppState;

/// `GET /api/orders-admin`
///
/// Every persisted order, newest first. Token-gated via [`RequireAdmin`].
pub async fn list(_admin: RequireAdmin, State(state): State<AppState>) -> Result<Json<Value>> {
    let orders = state.store().list().await?;
    Ok(Json(json!({
        "success": true,
        "count": orders.len(),
        "orders": orders,
    })))
}
