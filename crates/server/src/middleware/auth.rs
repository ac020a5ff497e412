//! Admin authentication extractor.
//!
//! The admin listing is protected by a single shared token, presented
//! either as an `x-admin-token` header or as a bearer token. There are no
//! admin accounts; the token is the whole scheme.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::config::token_matches;
use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires the admin token.
///
/// Rejects with 500 when no token is configured server-side (the endpoint
/// must never open up because configuration is missing) and 401 when the
/// presented token is absent or wrong.
///
/// # Example
///
/// ```rust,ignore
/// async fn admin_handler(_admin: RequireAdmin) -> impl IntoResponse { ... }
/// ```
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config().admin_token.as_ref() else {
            return Err(AppError::Configuration(
                "ADMIN_DASH_TOKEN is not set".to_string(),
            ));
        };

        let presented = presented_token(parts)
            .ok_or_else(|| AppError::Unauthorized("missing admin token".to_string()))?;

        if token_matches(expected, presented) {
            Ok(Self)
        } else {
            Err(AppError::Unauthorized("wrong admin token".to_string()))
        }
    }
}

/// The token from `x-admin-token`, falling back to `Authorization: Bearer`.
fn presented_token(parts: &Parts) -> Option<&str> {
    if let Some(value) = parts.headers.get("x-admin-token") {
        return value.to_str().ok();
    }
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
