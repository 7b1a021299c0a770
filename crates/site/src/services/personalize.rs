//! Portfolio personalization.
//!
//! Rewrites portfolio copy to emphasize what a described visitor cares
//! about. Nothing is cached and nothing is retried.

use std::sync::Arc;

use askama::Template;
use portfolio_core::{PersonalizationRequest, PersonalizationResult};
use serde_json::json;
use thiserror::Error;
use tracing::instrument;

use crate::claude::{
    ClaudeError, GenerationError, OutputSchema, StructuredGenerator, generate_structured,
};

/// Name of the tool Claude must call with the rewritten content.
pub const PERSONALIZE_TOOL: &str = "personalized_portfolio";

#[derive(Template)]
#[template(path = "prompts/personalize.txt")]
struct PersonalizePrompt<'a> {
    visitor_profile: &'a str,
    portfolio_content: &'a str,
    tool_name: &'a str,
}

/// Errors from the personalization transform.
#[derive(Debug, Error)]
pub enum PersonalizeError {
    /// The generative service failed.
    #[error(transparent)]
    Provider(#[from] ClaudeError),

    /// The service answered without usable content.
    #[error("malformed personalization response: {0}")]
    MalformedResponse(String),

    /// Prompt rendering failed.
    #[error("template error: {0}")]
    Template(#[from] askama::Error),
}

impl From<GenerationError> for PersonalizeError {
    fn from(e: GenerationError) -> Self {
        match e {
            GenerationError::Provider(e) => Self::Provider(e),
            GenerationError::Malformed(detail) => Self::MalformedResponse(detail),
        }
    }
}

fn personalize_schema() -> OutputSchema {
    OutputSchema {
        name: PERSONALIZE_TOOL,
        description: "Return the portfolio content adapted to the visitor.",
        schema: json!({
            "type": "object",
            "properties": {
                "personalizedContent": {
                    "type": "string",
                    "description": "The adapted portfolio content."
                }
            },
            "required": ["personalizedContent"]
        }),
    }
}

/// Adapts portfolio content to a visitor profile.
#[derive(Clone)]
pub struct Personalizer {
    generator: Arc<dyn StructuredGenerator>,
}

impl Personalizer {
    /// Create a personalizer backed by `generator`.
    #[must_use]
    pub fn new(generator: Arc<dyn StructuredGenerator>) -> Self {
        Self { generator }
    }

    /// Rewrite the request's content for its visitor.
    ///
    /// # Errors
    ///
    /// Returns an error if the generative service fails or answers without
    /// non-empty content.
    #[instrument(skip_all)]
    pub async fn personalize(
        &self,
        request: &PersonalizationRequest,
    ) -> Result<PersonalizationResult, PersonalizeError> {
        let prompt = PersonalizePrompt {
            visitor_profile: request.visitor_profile(),
            portfolio_content: request.portfolio_content(),
            tool_name: PERSONALIZE_TOOL,
        }
        .render()?;

        let result: PersonalizationResult =
            generate_structured(self.generator.as_ref(), &prompt, &personalize_schema()).await?;

        if result.personalized_content.trim().is_empty() {
            return Err(PersonalizeError::MalformedResponse(
                "empty personalizedContent".to_string(),
            ));
        }

        tracing::info!(
            chars = result.personalized_content.chars().count(),
            "Portfolio content personalized"
        );
        Ok(result)
    }
}
