//! Resend API client for transactional email.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::ResendConfig;

use super::{MailError, MailSender, OutgoingEmail, SentEmail};

/// Resend API client.
#[derive(Clone)]
pub struct ResendClient {
    client: reqwest::Client,
    emails_url: String,
}

/// Request body for `POST /emails`.
#[derive(Debug, Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    reply_to: &'a str,
}

/// Success body for `POST /emails`.
#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Error body returned by Resend.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    message: String,
}

impl ResendClient {
    /// Create a new Resend API client.
    ///
    /// # Errors
    ///
    /// Returns error if the API key is not a valid header value or the HTTP
    /// client fails to build.
    pub fn new(config: &ResendConfig) -> Result<Self, MailError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.api_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| MailError::Parse(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            emails_url: format!("{}/emails", config.api_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl MailSender for ResendClient {
    #[instrument(skip(self, email), fields(subject = %email.subject))]
    async fn send(&self, email: &OutgoingEmail) -> Result<SentEmail, MailError> {
        let body = SendEmailRequest {
            from: &email.from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
            reply_to: &email.reply_to,
        };

        let response = self.client.post(&self.emails_url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&raw)
                .map_or(raw, |e| e.message);
            return Err(MailError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let sent: SendEmailResponse = response
            .json()
            .await
            .map_err(|e| MailError::Parse(e.to_string()))?;

        tracing::debug!(email_id = %sent.id, "Email accepted by Resend");
        Ok(SentEmail { id: sent.id })
    }
}

#[cfg(test)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    #[test]
    fn test_emails_url() {
        let client = ResendClient::new(&ResendConfig {
            api_key: SecretString::from("re_9fK2mQx7LpZ4vB8n"),
            api_url: "https://api.resend.com/".to_string(),
        })
        .expect("client");
        assert_eq!(client.emails_url, "https://api.resend.com/emails");
    }

    #[test]
    fn test_invalid_key_rejected() {
        let result = ResendClient::new(&ResendConfig {
            api_key: SecretString::from("re_bad\r\nkey"),
            api_url: "https://api.resend.com".to_string(),
        });
        assert!(matches!(result, Err(MailError::Parse(_))));
    }

    #[test]
    fn test_request_body_shape() {
        let to = vec!["owner@example.com".to_string()];
        let body = SendEmailRequest {
            from: "Portfolio <onboarding@resend.dev>",
            to: &to,
            subject: "New contact form message: Hello",
            html: "<p>Hi</p>",
            text: "Hi",
            reply_to: "ana@example.com",
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["to"][0], "owner@example.com");
        assert_eq!(json["reply_to"], "ana@example.com");
    }
}
