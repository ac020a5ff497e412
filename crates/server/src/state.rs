//! Application state shared across handlers.

use std::sync::Arc;

use benilink_core::catalog::Catalog;
use thiserror::Error;

use crate::config::ServerConfig;
use crate::services::email::{EmailClient, EmailError};
use crate::services::stripe::{StripeClient, StripeError};
use crate::store::OrderStore;

/// Error assembling the application state.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("catalog error: {0}")]
    Catalog(#[from] benilink_core::catalog::CatalogError),
    #[error("stripe client error: {0}")]
    Stripe(#[from] StripeError),
    #[error("email client error: {0}")]
    Email(#[from] EmailError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// derived catalog, the order store, the configuration, and the optional
/// integration clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    catalog: Catalog,
    store: OrderStore,
    stripe: Option<StripeClient>,
    mailer: Option<EmailClient>,
}

impl AppState {
    /// Create the production state: derive the catalog from the embedded
    /// price list and build the configured integration clients.
    ///
    /// # Errors
    ///
    /// Returns an error if the price list fails to parse or a client
    /// fails to build.
    pub fn new(config: ServerConfig, store: OrderStore) -> Result<Self, StateError> {
        let catalog = Catalog::build(&config.pricing)?;
        Self::with_catalog(config, catalog, store)
    }

    /// Create state around an explicit catalog. Tests inject small
    /// catalogs with known prices through this.
    ///
    /// # Errors
    ///
    /// Returns an error if a configured integration client fails to build.
    pub fn with_catalog(
        config: ServerConfig,
        catalog: Catalog,
        store: OrderStore,
    ) -> Result<Self, StateError> {
        let stripe = config
            .stripe
            .as_ref()
            .map(StripeClient::new)
            .transpose()?;
        let mailer = config
            .resend
            .as_ref()
            .map(EmailClient::new)
            .transpose()?;

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                store,
                stripe,
                mailer,
            }),
        })
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the derived product catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Get a reference to the order store.
    #[must_use]
    pub fn store(&self) -> &OrderStore {
        &self.inner.store
    }

    /// Get the Stripe client, if card payments are configured.
    #[must_use]
    pub fn stripe(&self) -> Option<&StripeClient> {
        self.inner.stripe.as_ref()
    }

    /// Get the email client, if order emails are configured.
    #[must_use]
    pub fn mailer(&self) -> Option<&EmailClient> {
        self.inner.mailer.as_ref()
    }
}
