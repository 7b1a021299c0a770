//! Contact submission pipeline.
//!
//! Validates the raw form, hands valid submissions to the configured
//! [`ContactDelivery`] backend and folds every failure into a
//! [`DeliveryResult`] with a localized message. Internal error detail is
//! logged, never returned.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use portfolio_core::{DeliveryResult, Locale, ValidationOutcome, validate};
use serde_json::Value;
use tracing::instrument;

use super::delivery::{ContactDelivery, ErrorKind};

/// Result of one pass through the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactOutcome {
    /// What the visitor sees.
    pub result: DeliveryResult,
    /// Failure category, `None` on success.
    pub error: Option<ErrorKind>,
}

impl ContactOutcome {
    const fn delivered(result: DeliveryResult) -> Self {
        Self {
            result,
            error: None,
        }
    }

    fn failed(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            result: DeliveryResult::failed(message),
            error: Some(kind),
        }
    }
}

/// Validates and dispatches contact form submissions.
#[derive(Clone)]
pub struct ContactService {
    delivery: Arc<dyn ContactDelivery>,
    locale: Locale,
}

impl ContactService {
    /// Create a service dispatching to `delivery`.
    #[must_use]
    pub fn new(delivery: Arc<dyn ContactDelivery>, locale: Locale) -> Self {
        Self { delivery, locale }
    }

    /// Name of the active backend.
    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.delivery.name()
    }

    /// Process a raw form submission.
    ///
    /// Never fails: invalid input, missing credentials, provider errors,
    /// malformed replies and panics inside the backend all come back as an
    /// unsuccessful [`DeliveryResult`].
    #[instrument(skip_all, fields(backend = self.delivery.name()))]
    pub async fn submit(&self, input: &Value) -> ContactOutcome {
        let submission = match validate(input, self.locale) {
            ValidationOutcome::Valid(submission) => submission,
            invalid @ ValidationOutcome::Invalid(_) => {
                tracing::debug!("Contact submission failed validation");
                return ContactOutcome::failed(ErrorKind::Validation, invalid.combined_message());
            }
        };

        let dispatched = AssertUnwindSafe(self.delivery.deliver(&submission))
            .catch_unwind()
            .await;

        match dispatched {
            Ok(Ok(result)) => {
                tracing::info!(success = result.success, "Contact submission dispatched");
                ContactOutcome::delivered(result)
            }
            Ok(Err(e)) => {
                let kind = e.kind();
                tracing::error!(error = %e, kind = ?kind, "Contact delivery failed");
                ContactOutcome::failed(kind, self.message_for(kind))
            }
            Err(_) => {
                tracing::error!("Contact delivery panicked");
                ContactOutcome::failed(ErrorKind::Unexpected, self.locale.connection_error())
            }
        }
    }

    /// Visitor-facing text for a delivery failure.
    fn message_for(&self, kind: ErrorKind) -> &'static str {
        match kind {
            ErrorKind::Configuration => self.locale.service_not_configured(),
            ErrorKind::Provider => self.locale.retry_later(),
            ErrorKind::Unexpected => self.locale.unexpected_error(),
            ErrorKind::Validation | ErrorKind::MalformedResponse => {
                self.locale.connection_error()
            }
        }
    }
}
