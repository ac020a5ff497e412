//! HTTP route handlers for the order API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness check
//!
//! # Public API (permissive CORS)
//! POST /api/validate-order          - Validate and persist an order
//! POST /api/create-checkout-session - Create a Stripe hosted checkout
//! POST /api/stripe-webhook          - Stripe event sink (signed)
//! GET  /api/orders-admin            - Order listing (token-gated)
//! ```

pub mod admin;
pub mod checkout;
pub mod orders;
pub mod webhook;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Create the `/api` router. CORS is deliberately permissive: the
/// storefront is served from a different origin and the endpoints carry
/// their own protection (validation, signatures, admin token).
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/validate-order", post(orders::validate))
        .route("/create-checkout-session", post(checkout::create))
        .route("/stripe-webhook", post(webhook::handle))
        .route("/orders-admin", get(admin::list))
        .layer(CorsLayer::permissive())
}
