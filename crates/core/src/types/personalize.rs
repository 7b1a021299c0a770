//! Visitor personalization request and result.

use serde::{Deserialize, Serialize};

/// Errors that can occur when building a [`PersonalizationRequest`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PersonalizationInputError {
    /// The visitor profile is empty or whitespace-only.
    #[error("visitor profile cannot be blank")]
    BlankProfile,
    /// There is no portfolio content to adapt.
    #[error("portfolio content cannot be empty")]
    EmptyContent,
}

/// A request to adapt the portfolio copy to a described visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationRequest {
    visitor_profile: String,
    portfolio_content: String,
}

impl PersonalizationRequest {
    /// Build a request.
    ///
    /// # Errors
    ///
    /// Returns [`PersonalizationInputError::BlankProfile`] if the profile has
    /// no visible characters, or [`PersonalizationInputError::EmptyContent`]
    /// if the content is empty.
    pub fn new(
        visitor_profile: impl Into<String>,
        portfolio_content: impl Into<String>,
    ) -> Result<Self, PersonalizationInputError> {
        let visitor_profile = visitor_profile.into();
        let portfolio_content = portfolio_content.into();

        if visitor_profile.trim().is_empty() {
            return Err(PersonalizationInputError::BlankProfile);
        }
        if portfolio_content.trim().is_empty() {
            return Err(PersonalizationInputError::EmptyContent);
        }

        Ok(Self {
            visitor_profile,
            portfolio_content,
        })
    }

    /// Free-text description of the visitor.
    #[must_use]
    pub fn visitor_profile(&self) -> &str {
        &self.visitor_profile
    }

    /// The content to adapt.
    #[must_use]
    pub fn portfolio_content(&self) -> &str {
        &self.portfolio_content
    }
}

/// Portfolio content rewritten for a visitor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizationResult {
    /// The adapted content.
    pub personalized_content: String,
}
