//! Claude API integration for generative text.
//!
//! # Structured Output
//!
//! Both AI features need a reply of a fixed shape. The shape is declared as
//! an [`OutputSchema`], sent to Claude as the only available tool, and
//! Claude is forced to call it. A reply that does not decode into the
//! expected type is a [`GenerationError::Malformed`], never a default.

pub mod client;
pub mod error;
pub mod types;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub use client::ClaudeClient;
pub use error::{ClaudeError, GenerationError};

use types::Tool;

/// Declared shape of a structured reply.
#[derive(Debug, Clone)]
pub struct OutputSchema {
    /// Tool name the reply is bound to.
    pub name: &'static str,
    /// What the reply represents.
    pub description: &'static str,
    /// JSON Schema of the reply object.
    pub schema: serde_json::Value,
}

impl OutputSchema {
    /// The tool definition offered to Claude.
    #[must_use]
    pub fn as_tool(&self) -> Tool {
        Tool {
            name: self.name.to_string(),
            description: self.description.to_string(),
            input_schema: self.schema.clone(),
        }
    }
}

/// A text-generation service able to return a reply of a declared shape.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Send `prompt` and return the structured reply, or `None` if the
    /// service answered without one.
    ///
    /// # Errors
    ///
    /// Returns an error if the service fails or rejects the request.
    async fn generate(
        &self,
        prompt: &str,
        output: &OutputSchema,
    ) -> Result<Option<serde_json::Value>, ClaudeError>;
}

/// Generate a reply and decode it into `T`.
///
/// # Errors
///
/// Returns [`GenerationError::Provider`] if the service fails and
/// [`GenerationError::Malformed`] if no reply was returned or it does not
/// decode into `T`.
pub async fn generate_structured<T: DeserializeOwned>(
    generator: &dyn StructuredGenerator,
    prompt: &str,
    output: &OutputSchema,
) -> Result<T, GenerationError> {
    let value = generator
        .generate(prompt, output)
        .await?
        .ok_or_else(|| GenerationError::Malformed("no structured reply".to_string()))?;

    serde_json::from_value(value).map_err(|e| GenerationError::Malformed(e.to_string()))
}
