//! Generative confirmation delivery.
//!
//! Claude is asked to compose the confirmation for the sender. Its
//! `{success, message}` reply is passed through unchanged once it has the
//! right shape.

use std::sync::Arc;

use askama::Template;
use async_trait::async_trait;
use portfolio_core::{ContactSubmission, DeliveryResult, Locale};
use serde_json::json;

use super::{ContactDelivery, DeliveryError};
use crate::claude::{GenerationError, OutputSchema, StructuredGenerator, generate_structured};

/// Name of the tool Claude must call with its reply.
pub const CONFIRMATION_TOOL: &str = "contact_confirmation";

#[derive(Template)]
#[template(path = "prompts/contact_confirmation.txt")]
struct ConfirmationPrompt<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    tool_name: &'a str,
    language: &'a str,
    example: &'a str,
}

fn confirmation_schema() -> OutputSchema {
    OutputSchema {
        name: CONFIRMATION_TOOL,
        description: "Report the outcome of a contact form submission to its sender.",
        schema: json!({
            "type": "object",
            "properties": {
                "success": {
                    "type": "boolean",
                    "description": "Whether the submission was handled."
                },
                "message": {
                    "type": "string",
                    "description": "Friendly confirmation addressed to the sender."
                }
            },
            "required": ["success", "message"]
        }),
    }
}

/// Delegates composition of the confirmation to a [`StructuredGenerator`].
#[derive(Clone)]
pub struct GenerativeConfirmationDelivery {
    generator: Arc<dyn StructuredGenerator>,
    owner_name: String,
    locale: Locale,
}

impl GenerativeConfirmationDelivery {
    /// Create the backend.
    #[must_use]
    pub fn new(generator: Arc<dyn StructuredGenerator>, owner_name: String, locale: Locale) -> Self {
        Self {
            generator,
            owner_name,
            locale,
        }
    }

    fn prompt(&self, submission: &ContactSubmission) -> Result<String, askama::Error> {
        let example = self
            .locale
            .confirmation_example(submission.name(), &self.owner_name);

        ConfirmationPrompt {
            name: submission.name(),
            email: submission.email().as_str(),
            subject: submission.subject(),
            message: submission.message(),
            tool_name: CONFIRMATION_TOOL,
            language: self.locale.language_name(),
            example: &example,
        }
        .render()
    }
}

#[async_trait]
impl ContactDelivery for GenerativeConfirmationDelivery {
    fn name(&self) -> &'static str {
        "generative"
    }

    async fn deliver(
        &self,
        submission: &ContactSubmission,
    ) -> Result<DeliveryResult, DeliveryError> {
        let prompt = self
            .prompt(submission)
            .map_err(|e| DeliveryError::Unexpected(format!("template error: {e}")))?;

        generate_structured::<DeliveryResult>(
            self.generator.as_ref(),
            &prompt,
            &confirmation_schema(),
        )
        .await
        .map_err(|e| match e {
            GenerationError::Provider(e) => DeliveryError::Provider(e.to_string()),
            GenerationError::Malformed(detail) => DeliveryError::MalformedResponse(detail),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;

    use portfolio_core::{ValidationOutcome, validate};
    use serde_json::Value;

    use super::*;
    use crate::claude::ClaudeError;

    struct Scripted {
        reply: Option<Value>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(reply: Option<Value>) -> Arc<Self> {
            Arc::new(Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl StructuredGenerator for Scripted {
        async fn generate(
            &self,
            prompt: &str,
            output: &OutputSchema,
        ) -> Result<Option<Value>, ClaudeError> {
            assert_eq!(output.name, CONFIRMATION_TOOL);
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn submission() -> ContactSubmission {
        let form = json!({
            "name": "Ana",
            "email": "ana@example.com",
            "subject": "Hola Alonso",
            "message": "Me gustaría trabajar contigo."
        });
        match validate(&form, Locale::Es) {
            ValidationOutcome::Valid(s) => s,
            ValidationOutcome::Invalid(e) => panic!("fixture should be valid: {e:?}"),
        }
    }

    fn backend(generator: Arc<dyn StructuredGenerator>) -> GenerativeConfirmationDelivery {
        GenerativeConfirmationDelivery::new(generator, "Alonso".to_string(), Locale::Es)
    }

    #[tokio::test]
    async fn test_returns_reply_verbatim() {
        let generator = Scripted::new(Some(json!({
            "success": true,
            "message": "¡Gracias, Ana! Alonso te responderá pronto."
        })));

        let result = backend(generator.clone())
            .deliver(&submission())
            .await
            .unwrap();
        assert_eq!(
            result,
            DeliveryResult::succeeded("¡Gracias, Ana! Alonso te responderá pronto.")
        );

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("From Name: Ana"));
        assert!(prompts[0].contains("Spanish"));
        assert!(prompts[0].contains(CONFIRMATION_TOOL));
    }

    #[tokio::test]
    async fn test_missing_reply_is_malformed() {
        let err = backend(Scripted::new(None))
            .deliver(&submission())
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_wrong_shape_is_malformed() {
        let err = backend(Scripted::new(Some(json!({ "message": "hi" }))))
            .deliver(&submission())
            .await
            .unwrap_err();
        assert!(matches!(err, DeliveryError::MalformedResponse(_)));
    }
}
