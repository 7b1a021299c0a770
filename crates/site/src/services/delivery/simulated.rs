//! Simulated delivery for development deployments.

use std::time::Duration;

use async_trait::async_trait;
use portfolio_core::{ContactSubmission, DeliveryResult, Locale};

use super::{ContactDelivery, DeliveryError};

/// Logs the submission and reports success after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedDelivery {
    delay: Duration,
    locale: Locale,
}

impl SimulatedDelivery {
    /// Create a simulated backend that waits `delay` before answering.
    #[must_use]
    pub const fn new(delay: Duration, locale: Locale) -> Self {
        Self { delay, locale }
    }
}

#[async_trait]
impl ContactDelivery for SimulatedDelivery {
    fn name(&self) -> &'static str {
        "simulated"
    }

    async fn deliver(
        &self,
        submission: &ContactSubmission,
    ) -> Result<DeliveryResult, DeliveryError> {
        tracing::info!(
            name = submission.name(),
            email = %submission.email(),
            subject = submission.subject(),
            message = submission.message(),
            "Contact form submission received (simulated)"
        );

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(DeliveryResult::succeeded(
            self.locale.thank_you(submission.name()),
        ))
    }
}
