//! Personalization route handler.

use std::panic::AssertUnwindSafe;

use axum::{Json, body::Bytes, extract::State};
use portfolio_core::{PersonalizationInputError, PersonalizationRequest, PersonalizationResult};
use futures::FutureExt;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Personalization request body.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalizeBody {
    #[serde(default)]
    pub visitor_profile: String,
    #[serde(default)]
    pub portfolio_content: Option<String>,
}

/// Adapt portfolio content to a visitor.
///
/// POST /api/personalize
///
/// Without `portfolioContent` the site's own content is adapted.
#[instrument(skip_all)]
pub async fn personalize(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<PersonalizationResult>> {
    let locale = state.locale();

    let body: PersonalizeBody = serde_json::from_slice(&body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Personalize body is not valid JSON");
        PersonalizeBody::default()
    });

    let content = body
        .portfolio_content
        .filter(|c| !c.trim().is_empty())
        .unwrap_or_else(|| state.portfolio().to_prompt_text());

    let request = PersonalizationRequest::new(body.visitor_profile, content).map_err(|e| {
        AppError::BadRequest(match e {
            PersonalizationInputError::BlankProfile => locale.profile_required().to_string(),
            PersonalizationInputError::EmptyContent => e.to_string(),
        })
    })?;

    let personalizer = state.personalizer().ok_or_else(|| {
        AppError::ServiceUnavailable(locale.personalization_unavailable().to_string())
    })?;

    let result = AssertUnwindSafe(personalizer.personalize(&request))
        .catch_unwind()
        .await
        .map_err(|_| AppError::internal(locale.personalization_failed(), "personalization panicked"))?
        .map_err(|e| AppError::upstream(locale.personalization_failed(), e))?;

    Ok(Json(result))
}
