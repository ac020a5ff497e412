//! Order notification emails via the Resend API.
//!
//! Two messages per order: a confirmation to the customer (when they left
//! an address) and a copy to the operator. Dispatch is best-effort: the
//! order is already persisted when this runs, and a failed send must never
//! surface as an order failure.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use thiserror::Error;

use benilink_core::order::Order;

use crate::config::ResendConfig;

/// Resend API endpoint.
const BASE_URL: &str = "https://api.resend.com";

/// Errors that can occur when sending order emails.
#[derive(Debug, Error)]
pub enum EmailError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to build the client.
    #[error("Parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: String,
    html: String,
}

/// Resend API client for order notifications.
#[derive(Clone)]
pub struct EmailClient {
    client: reqwest::Client,
    from: String,
    operator: String,
}

impl EmailClient {
    /// Create a new Resend API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ResendConfig) -> Result<Self, EmailError> {
        let mut headers = HeaderMap::new();
        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| EmailError::Parse(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder().default_headers(headers).build()?;
        Ok(Self {
            client,
            from: config.from.clone(),
            operator: config.operator.clone(),
        })
    }

    /// Send the confirmation to the customer and the copy to the operator.
    ///
    /// The two sends are independent; the first failure is returned but the
    /// caller only logs it.
    ///
    /// # Errors
    ///
    /// Returns error if either API request fails.
    pub async fn send_order_emails(&self, order: &Order) -> Result<(), EmailError> {
        let customer = order.delivery_info.email.trim();
        if !customer.is_empty() {
            self.send(
                customer,
                format!("Confirmation de votre commande {}", order.order_id),
                customer_html(order),
            )
            .await?;
        }

        self.send(
            &self.operator,
            format!(
                "Nouvelle commande {} - {:.2} EUR",
                order.order_id, order.total_amount
            ),
            operator_html(order),
        )
        .await
    }

    async fn send(&self, to: &str, subject: String, html: String) -> Result<(), EmailError> {
        let body = SendRequest {
            from: &self.from,
            to: vec![to],
            subject,
            html,
        };

        let response = self
            .client
            .post(format!("{BASE_URL}/emails"))
            .json(&body)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(EmailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

/// The shared order summary table, as HTML rows.
fn items_html(order: &Order) -> String {
    use std::fmt::Write;

    let mut rows = String::new();
    for item in &order.items {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td>{}</td><td>{:.2} €</td><td>{:.2} €</td></tr>",
            html_escape(&item.name),
            item.quantity,
            item.price_eur,
            item.total_eur
        );
    }
    rows
}

fn customer_html(order: &Order) -> String {
    let info = &order.delivery_info;
    format!(
        "<h2>Merci pour votre commande, {} !</h2>\
         <p>Votre commande <strong>{}</strong> a bien été enregistrée.</p>\
         <table border=\"1\" cellpadding=\"6\">\
         <tr><th>Produit</th><th>Qté</th><th>Prix</th><th>Total</th></tr>{}</table>\
         <p>Sous-total : {:.2} €<br>\
         Livraison ({}) : {:.2} €<br>\
         dont TVA : {:.2} €<br>\
         <strong>Total : {:.2} €</strong></p>\
         <p>Nous vous contacterons au {} pour organiser la livraison.</p>",
        html_escape(&info.full_name),
        order.order_id,
        items_html(order),
        order.subtotal,
        order.delivery_method,
        order.shipping_cost,
        order.tax_amount,
        order.total_amount,
        html_escape(&info.phone),
    )
}

fn operator_html(order: &Order) -> String {
    let info = &order.delivery_info;
    format!(
        "<h2>Nouvelle commande {}</h2>\
         <p>{} — {}<br>{}, {} {}, {}</p>\
         <table border=\"1\" cellpadding=\"6\">\
         <tr><th>Produit</th><th>Qté</th><th>Prix</th><th>Total</th></tr>{}</table>\
         <p>Poids : {} kg — Livraison : {} — Paiement : {}</p>\
         <p><strong>Total : {:.2} €</strong></p>",
        order.order_id,
        html_escape(&info.full_name),
        html_escape(&info.phone),
        html_escape(&info.address),
        html_escape(&info.postal_code),
        html_escape(&info.city),
        html_escape(&info.country),
        items_html(order),
        order.total_weight_kg,
        order.delivery_method,
        order.payment_method,
        order.total_amount,
    )
}

/// Minimal escaping for customer-supplied strings interpolated into HTML.
fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
        assert_eq!(html_escape("Awa Sossou"), "Awa Sossou");
    }
}
