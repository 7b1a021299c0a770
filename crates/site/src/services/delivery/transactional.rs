//! Transactional email delivery.
//!
//! Each valid submission becomes one email to the site owner, with the
//! submitter set as reply-to. Identical submissions are sent again.

use std::sync::Arc;

use askama::Template;
use async_trait::async_trait;
use portfolio_core::{ContactField, ContactSubmission, DeliveryResult, Locale};

use super::{ContactDelivery, DeliveryError};
use crate::mail::{MailSender, OutgoingEmail};

/// HTML body of the owner notification.
#[derive(Template)]
#[template(path = "email/contact_notification.html")]
struct ContactNotificationHtml<'a> {
    lang: &'a str,
    heading: &'a str,
    name_label: &'a str,
    email_label: &'a str,
    subject_label: &'a str,
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Plain text body of the owner notification.
#[derive(Template)]
#[template(path = "email/contact_notification.txt")]
struct ContactNotificationText<'a> {
    heading: &'a str,
    name_label: &'a str,
    email_label: &'a str,
    subject_label: &'a str,
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
}

/// Sends each submission to the site owner through a [`MailSender`].
#[derive(Clone)]
pub struct TransactionalEmailDelivery {
    sender: Option<Arc<dyn MailSender>>,
    from: String,
    to: String,
    locale: Locale,
}

impl TransactionalEmailDelivery {
    /// Create the backend.
    ///
    /// A `None` sender means the provider credential is missing; every
    /// delivery then fails as not configured without contacting anything.
    #[must_use]
    pub fn new(
        sender: Option<Arc<dyn MailSender>>,
        from: String,
        to: String,
        locale: Locale,
    ) -> Self {
        Self {
            sender,
            from,
            to,
            locale,
        }
    }

    fn compose(&self, submission: &ContactSubmission) -> Result<OutgoingEmail, askama::Error> {
        let email = submission.email().as_str();
        let heading = self.locale.notification_heading();
        let name_label = ContactField::Name.label(self.locale);
        let email_label = ContactField::Email.label(self.locale);
        let subject_label = ContactField::Subject.label(self.locale);

        let html = ContactNotificationHtml {
            lang: self.locale.tag(),
            heading,
            name_label,
            email_label,
            subject_label,
            name: submission.name(),
            email,
            subject: submission.subject(),
            message: submission.message(),
        }
        .render()?;
        let text = ContactNotificationText {
            heading,
            name_label,
            email_label,
            subject_label,
            name: submission.name(),
            email,
            subject: submission.subject(),
            message: submission.message(),
        }
        .render()?;

        Ok(OutgoingEmail {
            from: self.from.clone(),
            to: vec![self.to.clone()],
            reply_to: email.to_owned(),
            subject: self.locale.notification_subject(submission.subject()),
            html,
            text,
        })
    }
}

#[async_trait]
impl ContactDelivery for TransactionalEmailDelivery {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn deliver(
        &self,
        submission: &ContactSubmission,
    ) -> Result<DeliveryResult, DeliveryError> {
        let Some(sender) = &self.sender else {
            return Err(DeliveryError::NotConfigured("RESEND_API_KEY"));
        };

        let email = self
            .compose(submission)
            .map_err(|e| DeliveryError::Unexpected(format!("template error: {e}")))?;

        match sender.send(&email).await {
            Ok(sent) => {
                tracing::info!(email_id = %sent.id, "Contact notification sent");
                Ok(DeliveryResult::succeeded(
                    self.locale.thank_you(submission.name()),
                ))
            }
            Err(e) if e.is_provider_reported() => Err(DeliveryError::Provider(e.to_string())),
            Err(e) => Err(DeliveryError::Unexpected(e.to_string())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use portfolio_core::{ValidationOutcome, validate};
    use serde_json::json;

    use super::*;
    use crate::mail::{MailError, SentEmail};

    #[derive(Default)]
    struct Recorder {
        sent: Mutex<Vec<OutgoingEmail>>,
    }

    #[async_trait]
    impl MailSender for Recorder {
        async fn send(&self, email: &OutgoingEmail) -> Result<SentEmail, MailError> {
            self.sent.lock().unwrap().push(email.clone());
            Ok(SentEmail {
                id: "email_123".to_string(),
            })
        }
    }

    struct Rejecting;

    #[async_trait]
    impl MailSender for Rejecting {
        async fn send(&self, _email: &OutgoingEmail) -> Result<SentEmail, MailError> {
            Err(MailError::Api {
                status: 403,
                message: "domain not verified".to_string(),
            })
        }
    }

    fn submission() -> ContactSubmission {
        let form = json!({
            "name": "Ana <b>",
            "email": "ana@example.com",
            "subject": "Trabajo freelance",
            "message": "Hola,\nme interesa tu perfil."
        });
        match validate(&form, Locale::Es) {
            ValidationOutcome::Valid(s) => s,
            ValidationOutcome::Invalid(e) => panic!("fixture should be valid: {e:?}"),
        }
    }

    fn backend(sender: Option<Arc<dyn MailSender>>) -> TransactionalEmailDelivery {
        backend_in(sender, Locale::Es)
    }

    fn backend_in(sender: Option<Arc<dyn MailSender>>, locale: Locale) -> TransactionalEmailDelivery {
        TransactionalEmailDelivery::new(
            sender,
            "Portfolio <onboarding@resend.dev>".to_string(),
            "owner@example.com".to_string(),
            locale,
        )
    }

    #[tokio::test]
    async fn test_sends_notification_to_owner() {
        let recorder = Arc::new(Recorder::default());
        let delivery = backend(Some(recorder.clone() as Arc<dyn MailSender>));

        let result = delivery.deliver(&submission()).await.unwrap();
        assert!(result.success);
        assert!(result.message.contains("Ana"));

        let sent = recorder.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let email = &sent[0];
        assert_eq!(email.to, vec!["owner@example.com".to_string()]);
        assert_eq!(email.reply_to, "ana@example.com");
        assert_eq!(
            email.subject,
            "Nuevo mensaje del formulario de contacto: Trabajo freelance"
        );
        assert!(email.html.contains("<strong>Nombre:</strong>"));
        assert!(email.text.starts_with("Nuevo mensaje del formulario de contacto"));
        assert!(email.text.contains("Ana <b>"));
    }

    #[tokio::test]
    async fn test_html_body_escapes_submitted_text() {
        let recorder = Arc::new(Recorder::default());
        let delivery = backend(Some(recorder.clone() as Arc<dyn MailSender>));
        delivery.deliver(&submission()).await.unwrap();

        let sent = recorder.sent.lock().unwrap();
        let html = &sent[0].html;
        assert!(!html.contains("<b>"));
        assert!(html.contains("Ana &#60;b&#62;"));
        assert!(html.contains("Hola,<br/>me interesa tu perfil."));
    }

    #[tokio::test]
    async fn test_notification_follows_site_locale() {
        let recorder = Arc::new(Recorder::default());
        let delivery = backend_in(Some(recorder.clone() as Arc<dyn MailSender>), Locale::En);
        delivery.deliver(&submission()).await.unwrap();

        let sent = recorder.sent.lock().unwrap();
        assert_eq!(
            sent[0].subject,
            "New contact form message: Trabajo freelance"
        );
        assert!(sent[0].html.contains("<strong>Subject:</strong> Trabajo freelance"));
        assert!(sent[0].text.contains("Email: ana@example.com"));
    }

    #[tokio::test]
    async fn test_missing_sender_is_not_configured() {
        let err = backend(None).deliver(&submission()).await.unwrap_err();
        assert!(matches!(err, DeliveryError::NotConfigured("RESEND_API_KEY")));
    }

    #[tokio::test]
    async fn test_provider_rejection_maps_to_provider_error() {
        let err = backend(Some(Arc::new(Rejecting)))
            .deliver(&submission())
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::Provider(ref m) if m.contains("domain not verified")));
    }
}
