//! Integration tests for the portfolio site.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p portfolio-integration-tests
//! ```
//!
//! No external services are needed: providers are replaced by the in-process
//! doubles below, and the HTTP clients are exercised against `mockito`.
//!
//! # Test Categories
//!
//! - `contact_pipeline` - Validation, dispatch and outcome normalization
//! - `personalization` - Personalization transform
//! - `provider_clients` - Resend and Claude clients against a mock server
//! - `http_routes` - Router-level behavior

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use portfolio_core::Locale;
use portfolio_site::claude::{ClaudeError, OutputSchema, StructuredGenerator};
use portfolio_site::config::{ContactBackend, SiteConfig};
use portfolio_site::mail::{MailError, MailSender, OutgoingEmail, SentEmail};
use portfolio_site::services::ContactService;
use portfolio_site::services::delivery::{
    ContactDelivery, GenerativeConfirmationDelivery, SimulatedDelivery,
    TransactionalEmailDelivery,
};
use serde_json::{Value, json};

/// A form that passes validation.
#[must_use]
pub fn valid_form() -> Value {
    json!({
        "name": "Ana Torres",
        "email": "ana@example.com",
        "subject": "Propuesta de trabajo",
        "message": "Hola Alonso, me gustaría hablar sobre un proyecto."
    })
}

/// Configuration for tests: English, no delay, no providers.
#[must_use]
pub fn test_config(backend: ContactBackend) -> SiteConfig {
    let mut config = SiteConfig {
        locale: Locale::En,
        static_dir: "does-not-exist".into(),
        ..SiteConfig::default()
    };
    config.contact.backend = backend;
    config.contact.simulated_delay = Duration::ZERO;
    config
}

/// How a [`CountingMailSender`] answers.
#[derive(Debug, Clone)]
pub enum MailBehavior {
    Accept,
    Reject { status: u16, message: String },
}

/// Mail sender that counts calls and keeps the last email.
#[derive(Debug)]
pub struct CountingMailSender {
    behavior: MailBehavior,
    calls: AtomicUsize,
    last: Mutex<Option<OutgoingEmail>>,
}

impl CountingMailSender {
    #[must_use]
    pub fn accepting() -> Arc<Self> {
        Self::with(MailBehavior::Accept)
    }

    #[must_use]
    pub fn rejecting(status: u16, message: &str) -> Arc<Self> {
        Self::with(MailBehavior::Reject {
            status,
            message: message.to_string(),
        })
    }

    fn with(behavior: MailBehavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    /// Number of `send` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recently sent email.
    #[must_use]
    pub fn last(&self) -> Option<OutgoingEmail> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MailSender for CountingMailSender {
    async fn send(&self, email: &OutgoingEmail) -> Result<SentEmail, MailError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(email.clone());

        match &self.behavior {
            MailBehavior::Accept => Ok(SentEmail {
                id: format!("email_{n}"),
            }),
            MailBehavior::Reject { status, message } => Err(MailError::Api {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

/// Generator that returns a fixed reply and records prompts.
#[derive(Debug)]
pub struct ScriptedGenerator {
    reply: Option<Value>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedGenerator {
    /// Always answer with `reply`; `None` means no structured output.
    #[must_use]
    pub fn replying(reply: Option<Value>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        })
    }

    /// Number of `generate` calls so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Prompts received so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl StructuredGenerator for ScriptedGenerator {
    async fn generate(
        &self,
        prompt: &str,
        _output: &OutputSchema,
    ) -> Result<Option<Value>, ClaudeError> {
        self.prompts
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(prompt.to_string());
        Ok(self.reply.clone())
    }
}

/// Generator whose provider always fails.
#[derive(Debug)]
pub struct FailingGenerator;

#[async_trait]
impl StructuredGenerator for FailingGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _output: &OutputSchema,
    ) -> Result<Option<Value>, ClaudeError> {
        Err(ClaudeError::Api {
            error_type: "overloaded_error".to_string(),
            message: "Overloaded: internal cluster eu-7".to_string(),
        })
    }
}

/// Generator that panics mid-call.
#[derive(Debug)]
pub struct PanickingGenerator;

#[async_trait]
impl StructuredGenerator for PanickingGenerator {
    async fn generate(
        &self,
        _prompt: &str,
        _output: &OutputSchema,
    ) -> Result<Option<Value>, ClaudeError> {
        panic!("generator crashed")
    }
}

/// Contact service over the simulated backend.
#[must_use]
pub fn simulated_service(locale: Locale) -> ContactService {
    let delivery = Arc::new(SimulatedDelivery::new(Duration::ZERO, locale));
    ContactService::new(delivery, locale)
}

/// Contact service over the email backend with an optional sender.
#[must_use]
pub fn email_service(sender: Option<Arc<dyn MailSender>>, locale: Locale) -> ContactService {
    let delivery: Arc<dyn ContactDelivery> = Arc::new(TransactionalEmailDelivery::new(
        sender,
        "Portfolio <onboarding@resend.dev>".to_string(),
        "owner@example.com".to_string(),
        locale,
    ));
    ContactService::new(delivery, locale)
}

/// Contact service over the generative backend.
#[must_use]
pub fn generative_service(generator: Arc<dyn StructuredGenerator>, locale: Locale) -> ContactService {
    let delivery = Arc::new(GenerativeConfirmationDelivery::new(
        generator,
        "Alonso".to_string(),
        locale,
    ));
    ContactService::new(delivery, locale)
}
