//! Application state shared across handlers.

use std::sync::Arc;

use crate::commerce::StorefrontClient;
use crate::config::SiteConfig;
use crate::content::{ContentClient, ContentError};

/// Error building application state.
#[derive(Debug, thiserror::Error)]
pub enum StateInitError {
    #[error("content client: {0}")]
    Content(#[from] ContentError),
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the external API clients.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    commerce: StorefrontClient,
    content: ContentClient,
}

impl AppState {
    /// Create a new application state, building clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a client fails to build.
    pub fn new(config: SiteConfig) -> Result<Self, StateInitError> {
        let commerce = StorefrontClient::new(&config.shopify);
        let content = ContentClient::new(&config.content)?;
        Ok(Self::with_clients(config, commerce, content))
    }

    /// Create an application state from pre-built clients.
    ///
    /// Used when the clients point somewhere other than the configured
    /// endpoints (mock environments, proxies).
    #[must_use]
    pub fn with_clients(
        config: SiteConfig,
        commerce: StorefrontClient,
        content: ContentClient,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                commerce,
                content,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Get a reference to the commerce Storefront API client.
    #[must_use]
    pub fn commerce(&self) -> &StorefrontClient {
        &self.inner.commerce
    }

    /// Get a reference to the content API client.
    #[must_use]
    pub fn content(&self) -> &ContentClient {
        &self.inner.content
    }
}
