//! API tests driving the router directly, no network.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use benilink_core::catalog::Catalog;
use benilink_core::pricing::PricingConfig;
use benilink_server::config::{ServerConfig, StripeConfig};
use benilink_server::services::stripe::sign_payload;
use benilink_server::state::AppState;
use benilink_server::store::OrderStore;
use chrono::Utc;
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

const ADMIN_TOKEN: &str = "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6j";
const WEBHOOK_SECRET: &str = "whsec_4f1c9a2d7e8b36005d21cc47a9e1b8d3";

struct TestApp {
    router: Router,
    // keeps the store directory alive for the test's duration
    _orders_dir: TempDir,
}

fn base_config(orders_dir: &TempDir) -> ServerConfig {
    ServerConfig {
        host: std::net::IpAddr::from([127, 0, 0, 1]),
        port: 0,
        base_url: "http://localhost:3001".to_string(),
        orders_dir: orders_dir.path().to_path_buf(),
        admin_token: None,
        stripe: None,
        resend: None,
        database_url: None,
        sentry_dsn: None,
        sentry_environment: None,
        pricing: PricingConfig::default(),
        min_order_weight_kg: Decimal::from(5),
    }
}

/// Router over a two-product catalog with known prices: coconut oil at
/// 9.15 EUR/L and a 499 g spice at 1.83 EUR.
fn spawn_app(configure: impl FnOnce(&mut ServerConfig)) -> TestApp {
    let orders_dir = tempfile::tempdir().unwrap();
    let mut config = base_config(&orders_dir);
    configure(&mut config);

    let catalog = Catalog::from_raw(
        "PRODUIT,PRIX\nHuile de coco,4994 FCFA\nPiment test - 499g,1000 FCFA",
        &config.pricing,
    )
    .unwrap();
    let store = OrderStore::new(config.orders_dir.clone(), None);
    let state = AppState::with_catalog(config, catalog, store).unwrap();

    TestApp {
        router: benilink_server::app(state),
        _orders_dir: orders_dir,
    }
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn delivery_info() -> Value {
    json!({
        "fullName": "Awa Sossou",
        "phone": "+33 7 00 00 00 00",
        "email": "awa@example.fr",
        "address": "2 rue des Lilas",
        "postalCode": "43190",
        "city": "Tence",
        "country": "France"
    })
}

fn coco_order(quantity: u32) -> Value {
    json!({
        "items": [{ "name": "Huile de coco", "quantity": quantity }],
        "deliveryInfo": delivery_info(),
        "deliveryMethod": "colissimo",
        "paymentMethod": "whatsapp"
    })
}

#[tokio::test]
async fn test_health() {
    let app = spawn_app(|_| {});
    let response = app
        .router
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_validate_order_success_figures() {
    let app = spawn_app(|_| {});
    let response = app
        .router
        .oneshot(post_json("/api/validate-order", &coco_order(5)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["totalAmount"], json!(60.75));
    assert_eq!(body["amountEUR"], json!(60.75));
    assert_eq!(body["currency"], json!("EUR"));
    assert!(body["orderId"].as_str().unwrap().starts_with("BNL-"));
}

#[tokio::test]
async fn test_validate_order_persists() {
    let app = spawn_app(|_| {});
    let dir = app._orders_dir.path().to_path_buf();

    let response = app
        .router
        .oneshot(post_json("/api/validate-order", &coco_order(5)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let text = std::fs::read_to_string(dir.join("orders.txt")).unwrap();
    assert!(text.contains("Awa Sossou"));
    assert!(text.contains("TOTAL: 60.75 EUR"));

    let orders: Vec<Value> =
        serde_json::from_str(&std::fs::read_to_string(dir.join("orders.json")).unwrap()).unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0]["shippingCostHT"], json!(12.5));
    assert_eq!(orders[0]["taxAmount"], json!(7.63));
}

#[tokio::test]
async fn test_unknown_product_rejected_and_nothing_stored() {
    let app = spawn_app(|_| {});
    let dir = app._orders_dir.path().to_path_buf();

    let mut order = coco_order(5);
    order["items"][0]["name"] = json!("Huile Inexistante");
    let response = app
        .router
        .oneshot(post_json("/api/validate-order", &order))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["details"]
            .as_str()
            .unwrap()
            .contains("Huile Inexistante")
    );
    assert!(!dir.join("orders.json").exists());
    assert!(!dir.join("orders.txt").exists());
}

#[tokio::test]
async fn test_below_minimum_weight_rejected() {
    let app = spawn_app(|_| {});
    let order = json!({
        "items": [{ "name": "Piment test - 499g", "quantity": 10 }],
        "deliveryInfo": delivery_info()
    });
    let response = app
        .router
        .oneshot(post_json("/api/validate-order", &order))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"].as_str().unwrap().contains("poids minimum"));
}

#[tokio::test]
async fn test_empty_cart_and_bad_quantity_rejected() {
    for order in [
        json!({ "items": [], "deliveryInfo": delivery_info() }),
        coco_order(0),
        coco_order(100),
    ] {
        let app = spawn_app(|_| {});
        let response = app
            .router
            .oneshot(post_json("/api/validate-order", &order))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_missing_delivery_field_rejected() {
    let app = spawn_app(|_| {});
    let mut order = coco_order(5);
    order["deliveryInfo"]["phone"] = json!("");
    let response = app
        .router
        .oneshot(post_json("/api/validate-order", &order))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"].as_str().unwrap().contains("phone"));
}

#[tokio::test]
async fn test_identical_submissions_create_distinct_orders() {
    let app = spawn_app(|_| {});

    let first = app
        .router
        .clone()
        .oneshot(post_json("/api/validate-order", &coco_order(5)))
        .await
        .unwrap();
    let second = app
        .router
        .oneshot(post_json("/api/validate-order", &coco_order(5)))
        .await
        .unwrap();

    let first = body_json(first).await;
    let second = body_json(second).await;
    assert_ne!(first["orderId"], second["orderId"]);

    let orders: Vec<Value> = serde_json::from_str(
        &std::fs::read_to_string(app._orders_dir.path().join("orders.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(orders.len(), 2);
}

#[tokio::test]
async fn test_admin_without_server_token_is_config_error() {
    let app = spawn_app(|_| {});
    let response = app
        .router
        .oneshot(
            Request::get("/api/orders-admin")
                .header("x-admin-token", ADMIN_TOKEN)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_admin_auth() {
    let app = spawn_app(|config| {
        config.admin_token = Some(SecretString::from(ADMIN_TOKEN));
    });

    // no token
    let response = app
        .router
        .clone()
        .oneshot(Request::get("/api/orders-admin").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // wrong token
    let response = app
        .router
        .clone()
        .oneshot(
            Request::get("/api/orders-admin")
                .header("x-admin-token", "nope")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // bearer form works too
    let response = app
        .router
        .oneshot(
            Request::get("/api/orders-admin")
                .header("authorization", format!("Bearer {ADMIN_TOKEN}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["orders"], json!([]));
}

#[tokio::test]
async fn test_admin_lists_newest_first() {
    let app = spawn_app(|config| {
        config.admin_token = Some(SecretString::from(ADMIN_TOKEN));
    });

    for quantity in [5, 6] {
        let response = app
            .router
            .clone()
            .oneshot(post_json("/api/validate-order", &coco_order(quantity)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .router
        .oneshot(
            Request::get("/api/orders-admin")
                .header("x-admin-token", ADMIN_TOKEN)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["count"], json!(2));
    // the 6-bottle order was placed last, so it comes back first
    assert_eq!(body["orders"][0]["items"][0]["quantity"], json!(6));
}

#[tokio::test]
async fn test_checkout_without_stripe_is_config_error() {
    let app = spawn_app(|_| {});
    let request = json!({
        "items": [{ "name": "Huile de coco", "quantity": 5, "priceEUR": 0.01 }]
    });
    let response = app
        .router
        .oneshot(post_json("/api/create-checkout-session", &request))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

fn stripe_config() -> StripeConfig {
    StripeConfig {
        secret_key: SecretString::from("sk_test_1a2b3c4d5e6f7a8b9c0d"),
        webhook_secret: Some(SecretString::from(WEBHOOK_SECRET)),
        success_path: "/?success=true".to_string(),
        cancel_path: "/?canceled=true".to_string(),
    }
}

#[tokio::test]
async fn test_checkout_rejects_below_minimum_weight_despite_client_price() {
    let app = spawn_app(|config| {
        config.stripe = Some(stripe_config());
    });
    // 10 x 499 g = 4.99 kg; the client-supplied price carries no authority
    let request = json!({
        "items": [{ "name": "Piment test - 499g", "quantity": 10, "priceEUR": 0.01 }],
        "deliveryInfo": delivery_info()
    });
    let response = app
        .router
        .oneshot(post_json("/api/create-checkout-session", &request))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["details"].as_str().unwrap().contains("poids minimum"));
}

#[tokio::test]
async fn test_checkout_rejects_unknown_product() {
    let app = spawn_app(|config| {
        config.stripe = Some(stripe_config());
    });
    let request = json!({
        "items": [{ "name": "Huile Inexistante", "quantity": 5 }]
    });
    let response = app
        .router
        .oneshot(post_json("/api/create-checkout-session", &request))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(
        body["details"]
            .as_str()
            .unwrap()
            .contains("Huile Inexistante")
    );
}

#[tokio::test]
async fn test_checkout_rejects_empty_cart_and_bad_quantity() {
    for items in [
        json!([]),
        json!([{ "name": "Huile de coco", "quantity": 0 }]),
        json!([{ "name": "Huile de coco", "quantity": 100 }]),
    ] {
        let app = spawn_app(|config| {
            config.stripe = Some(stripe_config());
        });
        let response = app
            .router
            .oneshot(post_json(
                "/api/create-checkout-session",
                &json!({ "items": items }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_webhook_without_secret_is_config_error() {
    let app = spawn_app(|_| {});
    let response = app
        .router
        .oneshot(post_json("/api/stripe-webhook", &json!({"type": "x"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_webhook_rejects_missing_and_bad_signatures() {
    let payload = json!({
        "type": "payment_intent.created",
        "data": { "object": { "id": "pi_123" } }
    })
    .to_string();

    // missing header
    let app = spawn_app(|config| {
        config.stripe = Some(stripe_config());
    });
    let response = app
        .router
        .oneshot(
            Request::post("/api/stripe-webhook")
                .body(Body::from(payload.clone()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // wrong signature
    let app = spawn_app(|config| {
        config.stripe = Some(stripe_config());
    });
    let header = sign_payload(payload.as_bytes(), "whsec_wrong_9f8e7d6c5b4aVtq", Utc::now().timestamp());
    let response = app
        .router
        .oneshot(
            Request::post("/api/stripe-webhook")
                .header("stripe-signature", header)
                .body(Body::from(payload.clone()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // stale timestamp
    let app = spawn_app(|config| {
        config.stripe = Some(stripe_config());
    });
    let header = sign_payload(
        payload.as_bytes(),
        WEBHOOK_SECRET,
        Utc::now().timestamp() - 3600,
    );
    let response = app
        .router
        .oneshot(
            Request::post("/api/stripe-webhook")
                .header("stripe-signature", header)
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_webhook_acknowledges_unhandled_events() {
    let app = spawn_app(|config| {
        config.stripe = Some(stripe_config());
    });
    let payload = json!({
        "type": "payment_intent.created",
        "data": { "object": { "id": "pi_123" } }
    })
    .to_string();
    let header = sign_payload(payload.as_bytes(), WEBHOOK_SECRET, Utc::now().timestamp());

    let response = app
        .router
        .oneshot(
            Request::post("/api/stripe-webhook")
                .header("stripe-signature", header)
                .body(Body::from(payload))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["received"], json!(true));
}
