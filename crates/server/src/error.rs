//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-class errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Client-facing messages stay in French, matching
//! what the storefront displays verbatim.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use benilink_core::validate::ValidationError;

use crate::services::email::EmailError;
use crate::services::stripe::StripeError;
use crate::store::StoreError;

/// Application-level error type for the order API.
#[derive(Debug, Error)]
pub enum AppError {
    /// The submitted order failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The order log could not be written or read.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Stripe API operation failed.
    #[error("Stripe error: {0}")]
    Stripe(#[from] StripeError),

    /// Email dispatch failed.
    #[error("Email error: {0}")]
    Email(#[from] EmailError),

    /// Webhook signature could not be verified.
    #[error("Invalid webhook signature: {0}")]
    WebhookSignature(String),

    /// Admin token missing or wrong.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A required integration is not configured.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(
            self,
            Self::Store(_) | Self::Internal(_) | Self::Configuration(_) | Self::Stripe(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) | Self::BadRequest(_) | Self::WebhookSignature(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Stripe(_) | Self::Email(_) => StatusCode::BAD_GATEWAY,
            Self::Store(_) | Self::Internal(_) | Self::Configuration(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // The storefront shows `error` to the customer; keep internal
        // detail out of the body
        let (message, details) = match &self {
            Self::Validation(err) => ("Commande invalide".to_string(), Some(err.to_string())),
            Self::BadRequest(msg) => (msg.clone(), None),
            Self::WebhookSignature(_) => ("Signature du webhook invalide".to_string(), None),
            Self::Unauthorized(_) => ("Non autorisé".to_string(), None),
            Self::Stripe(_) => ("Erreur du prestataire de paiement".to_string(), None),
            Self::Email(_) => ("Erreur d'envoi de l'email".to_string(), None),
            Self::Store(_) | Self::Internal(_) => (
                "Erreur lors de l'enregistrement de la commande".to_string(),
                None,
            ),
            Self::Configuration(msg) => ("Service non configuré".to_string(), Some(msg.clone())),
        };

        let body = match details {
            Some(details) => json!({ "error": message, "details": details }),
            None => json!({ "error": message }),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            status_of(AppError::Validation(ValidationError::EmptyCart)),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Unauthorized("no token".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(AppError::WebhookSignature("bad v1".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Configuration("stripe".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_validation_message_reaches_client() {
        let err = AppError::Validation(ValidationError::EmptyCart);
        assert_eq!(err.to_string(), "Validation error: panier vide ou invalide");
    }
}
