//! Outgoing email for contact notifications.
//!
//! [`MailSender`] is the seam between the email delivery backend and the
//! provider; [`ResendClient`] is the production implementation.

pub mod resend;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

pub use resend::ResendClient;

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum MailError {
    /// HTTP transport failed before the provider answered.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider rejected the message.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The provider answered with a body that could not be decoded.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl MailError {
    /// Returns `true` if the provider itself reported the failure, as
    /// opposed to a transport fault.
    #[must_use]
    pub const fn is_provider_reported(&self) -> bool {
        matches!(self, Self::Api { .. })
    }
}

/// A fully rendered email ready for the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    /// Sender identity, e.g. `Portfolio <onboarding@resend.dev>`.
    pub from: String,
    /// Recipients.
    pub to: Vec<String>,
    /// Address replies should go to.
    pub reply_to: String,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
    /// Plain-text alternative.
    pub text: String,
}

/// Provider receipt for a sent email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentEmail {
    /// Provider-assigned message ID.
    pub id: String,
}

/// Sends email through an external provider.
#[async_trait]
pub trait MailSender: Send + Sync {
    /// Send a single email.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails or the provider rejects the
    /// message.
    async fn send(&self, email: &OutgoingEmail) -> Result<SentEmail, MailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_provider_reported() {
        let api = MailError::Api {
            status: 422,
            message: "invalid from".to_string(),
        };
        assert!(api.is_provider_reported());

        let parse = MailError::Parse("bad json".to_string());
        assert!(!parse.is_provider_reported());
    }
}
