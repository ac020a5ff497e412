//! BeniLink order API.
//!
//! HTTP service around the `benilink-core` domain crate: order validation
//! and persistence, Stripe hosted checkout, the signed webhook sink, the
//! admin listing, and order notification emails.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the full application router. Integration tests drive this
/// directly with `tower::ServiceExt::oneshot`.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
pub(crate) mod test_support {
    use benilink_core::catalog::Catalog;
    use benilink_core::pricing::PricingConfig;
    use rust_decimal::Decimal;

    use crate::config::ServerConfig;
    use crate::state::AppState;
    use crate::store::OrderStore;

    /// State over a two-product catalog with known prices, no integrations.
    #[allow(clippy::unwrap_used)]
    pub fn test_state() -> AppState {
        let config = ServerConfig {
            host: std::net::IpAddr::from([127, 0, 0, 1]),
            port: 0,
            base_url: "http://localhost:3001".to_string(),
            orders_dir: std::env::temp_dir(),
            admin_token: None,
            stripe: None,
            resend: None,
            database_url: None,
            sentry_dsn: None,
            sentry_environment: None,
            pricing: PricingConfig::default(),
            min_order_weight_kg: Decimal::from(5),
        };
        let catalog = Catalog::from_raw(
            "PRODUIT,PRIX\nHuile de coco,4994 FCFA\nPiment test - 499g,1000 FCFA",
            &config.pricing,
        )
        .unwrap();
        let store = OrderStore::new(config.orders_dir.clone(), None);
        AppState::with_catalog(config, catalog, store).unwrap()
    }
}
