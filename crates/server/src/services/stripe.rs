//! Stripe hosted-checkout client and webhook signature verification.
//!
//! Talks to the Stripe REST API directly with form-encoded bodies: one call
//! to create a Checkout Session, one to retrieve a completed session with
//! its line items expanded. Amounts cross this boundary in integer cents.
//!
//! Webhook signatures use Stripe's `v1` scheme: the `Stripe-Signature`
//! header carries a timestamp and one or more HMAC-SHA256 signatures over
//! `"{timestamp}.{raw_body}"`.

use std::collections::HashMap;

use hmac::{Hmac, Mac};
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use secrecy::ExposeSecret;
use serde::Deserialize;
use sha2::Sha256;
use thiserror::Error;

use crate::config::StripeConfig;

/// Stripe API base URL.
const BASE_URL: &str = "https://api.stripe.com/v1";

/// Accepted clock skew between Stripe's timestamp and ours, in seconds.
const SIGNATURE_TOLERANCE_SECS: i64 = 300;

/// Errors that can occur when interacting with the Stripe API.
#[derive(Debug, Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response or convert an amount.
    #[error("Parse error: {0}")]
    Parse(String),

    /// `Stripe-Signature` header is missing or malformed.
    #[error("Malformed signature header: {0}")]
    MalformedSignature(String),

    /// No candidate signature matched the payload.
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// The signed timestamp is outside the accepted tolerance.
    #[error("Signature timestamp outside tolerance: {0}s")]
    TimestampOutOfTolerance(i64),
}

/// A line item to charge, already priced server-side.
#[derive(Debug, Clone)]
pub struct CheckoutLine {
    pub name: String,
    pub unit_amount_eur: Decimal,
    pub quantity: u32,
}

/// A created Checkout Session: the storefront redirects to `url`.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

/// A retrieved session with line items expanded.
#[derive(Debug, Clone, Deserialize)]
pub struct RetrievedSession {
    pub id: String,
    pub payment_status: Option<String>,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub customer_details: Option<CustomerDetails>,
    pub line_items: Option<LineItemList>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CustomerDetails {
    pub email: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LineItemList {
    pub data: Vec<SessionLineItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionLineItem {
    pub description: Option<String>,
    pub quantity: Option<u32>,
    pub amount_total: Option<i64>,
}

/// Minimal webhook event envelope; the session is re-fetched by id rather
/// than trusted from the payload.
#[derive(Debug, Deserialize)]
pub struct WebhookEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: WebhookData,
}

#[derive(Debug, Deserialize)]
pub struct WebhookData {
    pub object: WebhookObject,
}

#[derive(Debug, Deserialize)]
pub struct WebhookObject {
    pub id: String,
}

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
}

impl StripeClient {
    /// Create a new Stripe API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StripeConfig) -> Result<Self, StripeError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.secret_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| StripeError::Parse(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self { client })
    }

    /// Create a payment-mode Checkout Session.
    ///
    /// Each line crosses the boundary in integer cents; `metadata` is
    /// echoed back on the completed session and carries everything needed
    /// to rebuild the order in the webhook handler.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or an amount does not fit
    /// in whole cents.
    pub async fn create_checkout_session(
        &self,
        lines: &[CheckoutLine],
        success_url: &str,
        cancel_url: &str,
        metadata: &[(&str, String)],
    ) -> Result<CheckoutSession, StripeError> {
        let mut form: Vec<(String, String)> = vec![
            ("mode".to_string(), "payment".to_string()),
            ("success_url".to_string(), success_url.to_string()),
            ("cancel_url".to_string(), cancel_url.to_string()),
        ];

        for (index, line) in lines.iter().enumerate() {
            form.push((
                format!("line_items[{index}][price_data][currency]"),
                "eur".to_string(),
            ));
            form.push((
                format!("line_items[{index}][price_data][product_data][name]"),
                line.name.clone(),
            ));
            form.push((
                format!("line_items[{index}][price_data][unit_amount]"),
                eur_to_cents(line.unit_amount_eur)?.to_string(),
            ));
            form.push((
                format!("line_items[{index}][quantity]"),
                line.quantity.to_string(),
            ));
        }

        for (key, value) in metadata {
            form.push((format!("metadata[{key}]"), value.clone()));
        }

        let response = self
            .client
            .post(format!("{BASE_URL}/checkout/sessions"))
            .form(&form)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| StripeError::Parse(e.to_string()))
    }

    /// Retrieve a session by id with its line items expanded.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    pub async fn retrieve_session(&self, session_id: &str) -> Result<RetrievedSession, StripeError> {
        let response = self
            .client
            .get(format!("{BASE_URL}/checkout/sessions/{session_id}"))
            .query(&[("expand[]", "line_items")])
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StripeError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| StripeError::Parse(e.to_string()))
    }
}

/// Convert a 2-decimal EUR amount to integer cents.
fn eur_to_cents(amount: Decimal) -> Result<i64, StripeError> {
    (amount * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or_else(|| StripeError::Parse(format!("amount not representable in cents: {amount}")))
}

/// Verify a `Stripe-Signature` header against the raw request body.
///
/// `now_unix` is injected so tolerance behavior is testable.
///
/// # Errors
///
/// Returns error if the header is malformed, the timestamp is outside the
/// tolerance window, or no `v1` candidate matches.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    signing_secret: &str,
    now_unix: i64,
) -> Result<(), StripeError> {
    let mut timestamp: Option<i64> = None;
    let mut candidates: Vec<Vec<u8>> = Vec::new();

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(value.parse().map_err(|_| {
                    StripeError::MalformedSignature(format!("bad timestamp: {value}"))
                })?);
            }
            Some(("v1", value)) => {
                let bytes = hex::decode(value).map_err(|_| {
                    StripeError::MalformedSignature("v1 is not hex".to_string())
                })?;
                candidates.push(bytes);
            }
            // other schemes (v0) are ignored
            Some(_) => {}
            None => {
                return Err(StripeError::MalformedSignature(format!(
                    "unparseable element: {part}"
                )));
            }
        }
    }

    let timestamp =
        timestamp.ok_or_else(|| StripeError::MalformedSignature("missing t=".to_string()))?;
    if candidates.is_empty() {
        return Err(StripeError::MalformedSignature("missing v1=".to_string()));
    }

    let skew = (now_unix - timestamp).abs();
    if skew > SIGNATURE_TOLERANCE_SECS {
        return Err(StripeError::TimestampOutOfTolerance(skew));
    }

    let mut mac = Hmac::<Sha256>::new_from_slice(signing_secret.as_bytes())
        .map_err(|e| StripeError::Parse(e.to_string()))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    let expected = mac.finalize().into_bytes();

    if candidates.iter().any(|c| constant_time_eq(c, &expected)) {
        Ok(())
    } else {
        Err(StripeError::SignatureMismatch)
    }
}

/// Compare without early exit on the first differing byte.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b.iter()).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Compute a valid signature header for a payload. Test helper, also used
/// by the API tests.
#[must_use]
pub fn sign_payload(payload: &[u8], signing_secret: &str, timestamp: i64) -> String {
    #[allow(clippy::unwrap_used)] // HMAC accepts keys of any length
    let mut mac = Hmac::<Sha256>::new_from_slice(signing_secret.as_bytes()).unwrap();
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    let signature = hex::encode(mac.finalize().into_bytes());
    format!("t={timestamp},v1={signature}")
}
