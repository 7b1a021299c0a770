//! Contact form route handler.

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use portfolio_core::DeliveryResult;
use serde_json::Value;
use tracing::instrument;

use crate::services::ErrorKind;
use crate::state::AppState;

/// Submit the contact form.
///
/// POST /api/contact
///
/// The body is an untyped JSON object; anything that fails to parse is
/// validated as an empty form. The response body is always a
/// [`DeliveryResult`], with the status reflecting how the submission ended.
#[instrument(skip_all)]
pub async fn submit(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, Json<DeliveryResult>) {
    let input = serde_json::from_slice::<Value>(&body).unwrap_or_else(|e| {
        tracing::debug!(error = %e, "Contact body is not JSON");
        Value::Null
    });

    let outcome = state.contact().submit(&input).await;

    (status_for(outcome.error), Json(outcome.result))
}

/// HTTP status for a pipeline outcome.
pub const fn status_for(error: Option<ErrorKind>) -> StatusCode {
    match error {
        None => StatusCode::OK,
        Some(ErrorKind::Validation) => StatusCode::BAD_REQUEST,
        Some(ErrorKind::Configuration) => StatusCode::SERVICE_UNAVAILABLE,
        Some(ErrorKind::Provider | ErrorKind::MalformedResponse) => StatusCode::BAD_GATEWAY,
        Some(ErrorKind::Unexpected) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
