//! Contact delivery backends.
//!
//! Exactly one backend is active per deployment, chosen by
//! `CONTACT_BACKEND`:
//!
//! - [`SimulatedDelivery`] - logs the submission, no external effect
//! - [`TransactionalEmailDelivery`] - emails the site owner via Resend
//! - [`GenerativeConfirmationDelivery`] - Claude composes the confirmation

pub mod generative;
pub mod simulated;
pub mod transactional;

use std::sync::Arc;

use async_trait::async_trait;
use portfolio_core::{ContactSubmission, DeliveryResult};
use thiserror::Error;

use crate::claude::StructuredGenerator;
use crate::config::{ContactBackend, SiteConfig};
use crate::mail::{MailError, MailSender, ResendClient};

pub use generative::GenerativeConfirmationDelivery;
pub use simulated::SimulatedDelivery;
pub use transactional::TransactionalEmailDelivery;

/// Failure categories a contact submission can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// One or more field constraints unmet; no backend was called.
    Validation,
    /// A required provider credential is missing.
    Configuration,
    /// The provider reported an error.
    Provider,
    /// The generative service answered without the required shape.
    MalformedResponse,
    /// Transport failure or any other fault.
    Unexpected,
}

/// Errors a backend can end a delivery with.
///
/// The payloads carry internal detail for logs; none of it is shown to the
/// visitor.
#[derive(Debug, Error)]
pub enum DeliveryError {
    /// A required credential is not configured.
    #[error("{0} is not configured")]
    NotConfigured(&'static str),

    /// The provider reported an error.
    #[error("provider error: {0}")]
    Provider(String),

    /// The generative service returned no valid structured output.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Any other failure.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl DeliveryError {
    /// The taxonomy category of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NotConfigured(_) => ErrorKind::Configuration,
            Self::Provider(_) => ErrorKind::Provider,
            Self::MalformedResponse(_) => ErrorKind::MalformedResponse,
            Self::Unexpected(_) => ErrorKind::Unexpected,
        }
    }
}

/// Turns a validated contact submission into an outcome.
#[async_trait]
pub trait ContactDelivery: Send + Sync {
    /// Backend name for logs and health output.
    fn name(&self) -> &'static str;

    /// Deliver a submission.
    ///
    /// # Errors
    ///
    /// Returns a [`DeliveryError`] when the backend cannot produce an
    /// outcome; the caller converts it into a visitor-facing failure.
    async fn deliver(&self, submission: &ContactSubmission)
    -> Result<DeliveryResult, DeliveryError>;
}

/// Errors building the configured backend at startup.
#[derive(Debug, Error)]
pub enum BuildDeliveryError {
    /// The mail client could not be created.
    #[error("failed to create mail client: {0}")]
    Mail(#[from] MailError),

    /// The generative backend was selected without a generator.
    #[error("the generative backend requires a Claude client")]
    MissingGenerator,
}

/// Build the backend selected by configuration.
///
/// # Errors
///
/// Returns an error if the mail client cannot be created or the generative
/// backend is selected without a generator.
pub fn build_delivery(
    config: &SiteConfig,
    generator: Option<Arc<dyn StructuredGenerator>>,
) -> Result<Arc<dyn ContactDelivery>, BuildDeliveryError> {
    let contact = &config.contact;

    let delivery: Arc<dyn ContactDelivery> = match contact.backend {
        ContactBackend::Simulated => Arc::new(SimulatedDelivery::new(
            contact.simulated_delay,
            config.locale,
        )),
        ContactBackend::Email => {
            let sender = config
                .resend
                .as_ref()
                .map(ResendClient::new)
                .transpose()?
                .map(|client| Arc::new(client) as Arc<dyn MailSender>);

            if sender.is_none() {
                tracing::warn!("RESEND_API_KEY not set; contact submissions will be rejected");
            }

            Arc::new(TransactionalEmailDelivery::new(
                sender,
                contact.email_from.clone(),
                contact.email_to.clone(),
                config.locale,
            ))
        }
        ContactBackend::Generative => {
            let generator = generator.ok_or(BuildDeliveryError::MissingGenerator)?;
            Arc::new(GenerativeConfirmationDelivery::new(
                generator,
                config.owner_name.clone(),
                config.locale,
            ))
        }
    };

    tracing::info!(backend = delivery.name(), "Contact delivery backend selected");
    Ok(delivery)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            DeliveryError::NotConfigured("RESEND_API_KEY").kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            DeliveryError::Provider("x".into()).kind(),
            ErrorKind::Provider
        );
        assert_eq!(
            DeliveryError::MalformedResponse("x".into()).kind(),
            ErrorKind::MalformedResponse
        );
        assert_eq!(
            DeliveryError::Unexpected("x".into()).kind(),
            ErrorKind::Unexpected
        );
    }

    #[test]
    fn test_not_configured_display() {
        assert_eq!(
            DeliveryError::NotConfigured("RESEND_API_KEY").to_string(),
            "RESEND_API_KEY is not configured"
        );
    }
}
