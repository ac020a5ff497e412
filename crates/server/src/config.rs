//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional (server)
//! - `BENILINK_HOST` - Bind address (default: 127.0.0.1)
//! - `BENILINK_PORT` - Listen port (default: 3001)
//! - `BENILINK_BASE_URL` - Public base URL (default: `http://localhost:3001`)
//! - `ORDERS_DIR` - Directory for the order log files (default: data)
//! - `ADMIN_DASH_TOKEN` - Admin listing token (min 32 chars, high entropy)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment tag
//!
//! ## Optional (pricing overrides)
//! - `FCFA_PER_EUR` - FX rate (default: 655)
//! - `MARKUP_FACTOR` - Catalog markup (default: 1)
//! - `VAT_RATE` - VAT rate (default: 0.20)
//! - `MIN_ORDER_WEIGHT_KG` - Minimum order weight (default: 5)
//!
//! ## Optional (integrations; the feature is disabled when unset)
//! - `STRIPE_SECRET_KEY` - Stripe API secret key
//! - `STRIPE_WEBHOOK_SECRET` - Stripe webhook signing secret
//! - `STRIPE_SUCCESS_PATH` - Redirect path after payment (default: /?success=true)
//! - `STRIPE_CANCEL_PATH` - Redirect path on cancel (default: /?canceled=true)
//! - `RESEND_API_KEY` - Resend API key for order emails
//! - `RESEND_FROM` - Sender address for order emails
//! - `RESEND_OPERATOR` - Operator address receiving order copies
//! - `DATABASE_URL` - `PostgreSQL` mirror of the order log

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use benilink_core::pricing::PricingConfig;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_ADMIN_TOKEN_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL, used for Stripe redirect URLs
    pub base_url: String,
    /// Directory holding `orders.txt` and `orders.json`
    pub orders_dir: PathBuf,
    /// Token protecting the admin order listing; the endpoint refuses to
    /// serve anything while this is unset
    pub admin_token: Option<SecretString>,
    /// Stripe checkout configuration, `None` disables card payments
    pub stripe: Option<StripeConfig>,
    /// Resend configuration, `None` disables order emails
    pub resend: Option<ResendConfig>,
    /// `PostgreSQL` mirror of the order log (contains password)
    pub database_url: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Pricing knobs: FX rate, markup, VAT
    pub pricing: PricingConfig,
    /// Minimum order weight in kg
    pub min_order_weight_kg: Decimal,
}

/// Stripe hosted-checkout configuration.
///
/// Implements `Debug` manually to redact secret fields.
#[derive(Clone)]
pub struct StripeConfig {
    /// API secret key (`sk_...`)
    pub secret_key: SecretString,
    /// Webhook signing secret (`whsec_...`); webhooks are rejected
    /// outright when unset
    pub webhook_secret: Option<SecretString>,
    /// Path appended to the base URL after a successful payment
    pub success_path: String,
    /// Path appended to the base URL when the customer cancels
    pub cancel_path: String,
}

impl std::fmt::Debug for StripeConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeConfig")
            .field("secret_key", &"[REDACTED]")
            .field("webhook_secret", &"[REDACTED]")
            .field("success_path", &self.success_path)
            .field("cancel_path", &self.cancel_path)
            .finish()
    }
}

/// Resend transactional email configuration.
#[derive(Clone)]
pub struct ResendConfig {
    /// API key (`re_...`)
    pub api_key: SecretString,
    /// Sender address, e.g. `BeniLink <commandes@benilink.fr>`
    pub from: String,
    /// Operator address receiving a copy of every order
    pub operator: String,
}

impl std::fmt::Debug for ResendConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendConfig")
            .field("api_key", &"[REDACTED]")
            .field("from", &self.from)
            .field("operator", &self.operator)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse or if the admin
    /// token fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("BENILINK_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("BENILINK_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("BENILINK_PORT", "3001")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("BENILINK_PORT".to_string(), e.to_string()))?;
        let base_url = get_env_or_default("BENILINK_BASE_URL", "http://localhost:3001");
        let orders_dir = PathBuf::from(get_env_or_default("ORDERS_DIR", "data"));

        let admin_token = match get_optional_env("ADMIN_DASH_TOKEN") {
            Some(value) => {
                validate_admin_token(&value, "ADMIN_DASH_TOKEN")?;
                Some(SecretString::from(value))
            }
            None => None,
        };

        Ok(Self {
            host,
            port,
            base_url,
            orders_dir,
            admin_token,
            stripe: StripeConfig::from_env(),
            resend: ResendConfig::from_env(),
            database_url: get_optional_env("DATABASE_URL").map(SecretString::from),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            pricing: pricing_from_env()?,
            min_order_weight_kg: get_decimal_or_default("MIN_ORDER_WEIGHT_KG", "5")?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl StripeConfig {
    /// Present only when `STRIPE_SECRET_KEY` is set; the keys are
    /// provider-issued, so they skip the placeholder check.
    fn from_env() -> Option<Self> {
        let secret_key = SecretString::from(get_optional_env("STRIPE_SECRET_KEY")?);
        Some(Self {
            secret_key,
            webhook_secret: get_optional_env("STRIPE_WEBHOOK_SECRET").map(SecretString::from),
            success_path: get_env_or_default("STRIPE_SUCCESS_PATH", "/?success=true"),
            cancel_path: get_env_or_default("STRIPE_CANCEL_PATH", "/?canceled=true"),
        })
    }
}

impl ResendConfig {
    fn from_env() -> Option<Self> {
        let api_key = SecretString::from(get_optional_env("RESEND_API_KEY")?);
        Some(Self {
            api_key,
            from: get_env_or_default("RESEND_FROM", "BeniLink <commandes@benilink.fr>"),
            operator: get_env_or_default("RESEND_OPERATOR", "contact@benilink.fr"),
        })
    }
}

/// Pricing knobs, overridable for staging environments.
fn pricing_from_env() -> Result<PricingConfig, ConfigError> {
    let defaults = PricingConfig::default();
    Ok(PricingConfig {
        fcfa_per_eur: get_decimal_or("FCFA_PER_EUR", defaults.fcfa_per_eur)?,
        markup_factor: get_decimal_or("MARKUP_FACTOR", defaults.markup_factor)?,
        vat_rate: get_decimal_or("VAT_RATE", defaults.vat_rate)?,
    })
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a decimal environment variable, falling back to a default.
fn get_decimal_or(key: &str, default: Decimal) -> Result<Decimal, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<Decimal>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        Err(_) => Ok(default),
    }
}

fn get_decimal_or_default(key: &str, default: &str) -> Result<Decimal, ConfigError> {
    let fallback = default
        .parse::<Decimal>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    get_decimal_or(key, fallback)
}

/// Validate that the admin token is long enough, not a placeholder, and
/// has sufficient entropy.
fn validate_admin_token(token: &str, var_name: &str) -> Result<(), ConfigError> {
    if token.len() < MIN_ADMIN_TOKEN_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_ADMIN_TOKEN_LENGTH,
                token.len()
            ),
        ));
    }
    validate_secret_strength(token, var_name)
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Real tokens (random API-key-like strings) have high entropy
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated token."
            ),
        ));
    }

    Ok(())
}

/// Expose the admin token for comparison in the auth extractor.
#[must_use]
pub fn token_matches(expected: &SecretString, presented: &str) -> bool {
    // Length-revealing comparison is acceptable here: the token is long
    // and random, and the endpoint is read-only.
    expected.expose_secret() == presented
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_single_char() {
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_two_chars() {
        // "ab" has entropy of 1 bit per char (50% a, 50% b)
        let entropy = shannon_entropy("ab");
        assert!((entropy - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_admin_token_placeholder_rejected() {
        let result = validate_admin_token("your-admin-token-here-padding-12", "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_admin_token_too_short() {
        let result = validate_admin_token("aB3$xY9!", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_admin_token_low_entropy() {
        let result = validate_admin_token(&"a".repeat(40), "TEST_VAR");
        assert!(matches!(result, Err(ConfigError::InsecureSecret(_, _))));
    }

    #[test]
    fn test_admin_token_valid() {
        let result = validate_admin_token("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6j", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_token_matches() {
        let expected = SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6j");
        assert!(token_matches(&expected, "aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6j"));
        assert!(!token_matches(&expected, "wrong"));
    }
}
