//! Application state shared across handlers.

use std::sync::Arc;

use portfolio_core::Locale;

use crate::claude::{ClaudeClient, ClaudeError, StructuredGenerator};
use crate::config::SiteConfig;
use crate::content::Portfolio;
use crate::services::delivery::BuildDeliveryError;
use crate::services::{ContactService, Personalizer, build_delivery};

/// Error building application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("failed to create Claude client: {0}")]
    Claude(#[from] ClaudeError),
    #[error(transparent)]
    Delivery(#[from] BuildDeliveryError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: SiteConfig,
    contact: ContactService,
    personalizer: Option<Personalizer>,
    portfolio: Portfolio,
}

impl AppState {
    /// Assemble state from already-built services.
    #[must_use]
    pub fn new(
        config: SiteConfig,
        contact: ContactService,
        personalizer: Option<Personalizer>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                contact,
                personalizer,
                portfolio: Portfolio::site(),
            }),
        }
    }

    /// Build state and its external clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a provider client cannot be created.
    pub fn from_config(config: SiteConfig) -> Result<Self, StateError> {
        let generator = config
            .claude
            .as_ref()
            .map(ClaudeClient::new)
            .transpose()?
            .map(|client| Arc::new(client) as Arc<dyn StructuredGenerator>);

        if generator.is_none() {
            tracing::warn!("CLAUDE_API_KEY not set; personalization is disabled");
        }

        let delivery = build_delivery(&config, generator.clone())?;
        let contact = ContactService::new(delivery, config.locale);
        let personalizer = generator.map(Personalizer::new);

        Ok(Self::new(config, contact, personalizer))
    }

    /// Get a reference to the site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.inner.config
    }

    /// Locale for visitor-facing text.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.inner.config.locale
    }

    /// The contact submission pipeline.
    #[must_use]
    pub fn contact(&self) -> &ContactService {
        &self.inner.contact
    }

    /// The personalizer, if a generative service is configured.
    #[must_use]
    pub fn personalizer(&self) -> Option<&Personalizer> {
        self.inner.personalizer.as_ref()
    }

    /// The site's portfolio content.
    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.inner.portfolio
    }
}
