//! HTTP route handlers for the portfolio site.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (active contact backend)
//!
//! # API
//! GET  /api/portfolio          - Portfolio content as JSON
//! POST /api/contact            - Contact form submission
//! POST /api/personalize        - Personalize portfolio content for a visitor
//! ```

pub mod contact;
pub mod personalize;
pub mod portfolio;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the JSON API routes router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/portfolio", get(portfolio::show))
        .route("/contact", post(contact::submit))
        .route("/personalize", post(personalize::personalize))
}

/// Create all routes for the site.
pub fn routes() -> Router<AppState> {
    Router::new().nest("/api", api_routes())
}
