//! Unified error handling with Sentry integration.
//!
//! `AppError` is the boundary error for JSON endpoints that answer with an
//! `{error}` body. Server-side failures are captured to Sentry before the
//! response is built; their internal detail never reaches the client.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Application-level error type for the site's API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A feature this deployment has not configured.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An upstream provider failed. `message` is shown to the client.
    #[error("Upstream error: {message}")]
    Upstream {
        message: String,
        #[source]
        source: BoxError,
    },

    /// Internal server error. `message` is shown to the client; `detail`
    /// only reaches logs and Sentry.
    #[error("Internal error: {detail}")]
    Internal { message: String, detail: String },
}

impl AppError {
    /// An upstream failure with a client-safe message.
    pub fn upstream(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Upstream {
            message: message.into(),
            source: Box::new(source),
        }
    }

    /// An internal failure with a client-safe message.
    pub fn internal(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            detail: detail.into(),
        }
    }

    const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// JSON body of an error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Upstream { .. } | Self::Internal { .. }) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                source = ?std::error::Error::source(&self),
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = self.status();

        // Don't expose internal error details to clients
        let error = match self {
            Self::BadRequest(message)
            | Self::ServiceUnavailable(message)
            | Self::Upstream { message, .. }
            | Self::Internal { message, .. } => message,
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
